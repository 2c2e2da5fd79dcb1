//=========================================================================
// Program Catalog
//=========================================================================
//
// Named programs available for launching.
//
// Programs are registered once and launched by name any number of
// times; every launch starts from a fresh `create()` state.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Program, ProgramInfo};
use crate::core::error::{EngineError, EngineResult};
use crate::engine::Engine;

//=== Catalog Entry =======================================================

type Launcher = Box<dyn Fn(&mut Engine) -> EngineResult<()>>;

struct Entry {
    info: ProgramInfo,
    launch: Launcher,
}

//=== ProgramCatalog ======================================================

/// Registry of launchable programs, in registration order.
#[derive(Default)]
pub struct ProgramCatalog {
    entries: Vec<Entry>,
}

impl ProgramCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers `program` under its info name.
    ///
    /// A program already registered under the same name is replaced and
    /// keeps its position in the listing.
    pub fn register<P>(&mut self, program: P)
    where
        P: Program + Clone,
    {
        let info = program.info();
        let entry = Entry {
            info: info.clone(),
            launch: Box::new(move |engine: &mut Engine| engine.launch(program.clone())),
        };

        match self.entries.iter_mut().find(|e| e.info.name == info.name) {
            Some(existing) => {
                warn!("Program {} was already registered and has been replaced", info.name);
                *existing = entry;
            }
            None => {
                debug!("Registered program {}", info.name);
                self.entries.push(entry);
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Metadata of every registered program.
    pub fn list(&self) -> impl Iterator<Item = &ProgramInfo> {
        self.entries.iter().map(|e| &e.info)
    }

    pub fn get(&self, name: &str) -> Option<&ProgramInfo> {
        self.list().find(|info| info.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    //--- Launch -----------------------------------------------------------

    /// Launches the program registered as `name` into `engine`,
    /// replacing whatever was running.
    pub fn launch(&self, name: &str, engine: &mut Engine) -> EngineResult<()> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.info.name == name)
            .ok_or_else(|| EngineError::UnknownProgram(name.to_string()))?;
        (entry.launch)(engine)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::{RedrawContext, UpdateContext};
    use crate::engine::EngineBuilder;

    #[derive(Clone)]
    struct Named(&'static str, &'static str);

    impl Program for Named {
        type State = ();

        fn info(&self) -> ProgramInfo {
            ProgramInfo::new(self.0).with_description(self.1)
        }

        fn create(&self) {}

        fn redraw(&self, _ctx: &mut RedrawContext<'_>, _state: &()) -> EngineResult<()> {
            Ok(())
        }

        fn on_frame(&self, _ctx: &mut UpdateContext<'_>, state: ()) -> EngineResult<()> {
            Ok(state)
        }
    }

    #[test]
    fn lists_in_registration_order() {
        let mut catalog = ProgramCatalog::new();
        catalog.register(Named("snake", ""));
        catalog.register(Named("coffee", ""));

        let names: Vec<&str> = catalog.list().map(|info| info.name.as_str()).collect();
        assert_eq!(names, vec!["snake", "coffee"]);
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut catalog = ProgramCatalog::new();
        catalog.register(Named("snake", "old"));
        catalog.register(Named("coffee", ""));
        catalog.register(Named("snake", "new"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.list().next().map(|i| i.description.as_str()), Some("new"));
    }

    #[test]
    fn launch_by_name() {
        let mut catalog = ProgramCatalog::new();
        catalog.register(Named("snake", ""));
        let mut engine = EngineBuilder::new().build();

        assert_eq!(catalog.launch("snake", &mut engine), Ok(()));
        assert_eq!(engine.program_info().map(|i| i.name.as_str()), Some("snake"));
    }

    #[test]
    fn launch_unknown_name_fails() {
        let catalog = ProgramCatalog::new();
        let mut engine = EngineBuilder::new().build();

        assert_eq!(
            catalog.launch("pong", &mut engine),
            Err(EngineError::UnknownProgram("pong".to_string()))
        );
    }
}
