//=========================================================================
// Frame Runtime: Library Root
//
// A small real-time engine that hosts one interactive program at a time
// and mediates every entity, input event and timer it uses.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the program contract and its frame contexts (`core`)
// - Keep the windowing layer (`platform`) internal
//
// Typical usage:
// ```no_run
// use frame_runtime::prelude::*;
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     let mut engine = EngineBuilder::new().build();
//     // engine.launch(MyProgram)?;
//     engine.run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the entity registry, event queues, timers, contexts and
// collaborator traits. Hosts embedding the engine without a window use
// it together with `Engine::tick`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit window and event loop.
// `engine` defines the main engine entry point.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use platform::PlatformError;
