//=========================================================================
// Feature Tags
//=========================================================================
//
// Capabilities the engine advertises to programs.
//
//   engine:frame-runtime
//   context:<revision>
//   shape:<text|rect|ellipse|line|image>
//   event:<kind>   (every event kind, plus event:timer)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::context::ContextRevision;
use super::entity::ShapeKind;
use super::error::{EngineError, EngineResult};
use super::event::EventKind;
use super::program::ProgramInfo;

//=== Tags ================================================================

pub const ENGINE_TAG: &str = "engine:frame-runtime";
pub const TIMER_TAG: &str = "event:timer";

/// Every tag this engine supports.
pub fn supported() -> Vec<String> {
    let mut tags = vec![
        ENGINE_TAG.to_string(),
        ContextRevision::Junkrat.feature_tag(),
    ];
    tags.extend(ShapeKind::ALL.iter().map(|s| format!("shape:{}", s.as_str())));
    tags.extend(EventKind::ALL.iter().map(|e| format!("event:{}", e.as_str())));
    tags.push(TIMER_TAG.to_string());
    tags
}

pub fn is_supported(tag: &str) -> bool {
    supported().iter().any(|t| t == tag)
}

/// Fails on the first tag of `info` the engine lacks.
pub(crate) fn check(info: &ProgramInfo) -> EngineResult<()> {
    let supported = supported();
    match info.feature_tags.iter().find(|tag| !supported.contains(tag)) {
        Some(tag) => Err(EngineError::UnsupportedFeature {
            program: info.name.clone(),
            tag: tag.clone(),
        }),
        None => Ok(()),
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_shapes_events_and_timer() {
        assert!(is_supported("shape:ellipse"));
        assert!(is_supported("event:swipe"));
        assert!(is_supported("event:timer"));
        assert!(is_supported("context:junkrat"));
        assert!(!is_supported("shape:polygon"));
    }

    #[test]
    fn check_reports_first_missing_tag() {
        let info = ProgramInfo::new("coffee")
            .with_feature_tags(["shape:image", "audio:beep", "net:ws"]);

        assert_eq!(
            check(&info),
            Err(EngineError::UnsupportedFeature {
                program: "coffee".to_string(),
                tag: "audio:beep".to_string(),
            })
        );
    }

    #[test]
    fn empty_tag_list_passes() {
        assert_eq!(check(&ProgramInfo::new("blank")), Ok(()));
    }
}
