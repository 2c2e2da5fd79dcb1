//=========================================================================
// Engine Errors
//=========================================================================
//
// Contract violations raised by the entity/event/timer context.
//
// Every variant is a local, synchronous failure caused by the running
// program. Nothing here is retried; the frame loop stops and reports
// the error to the host.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::entity::EntityKind;
use super::event::EventKind;

//=== EngineError =========================================================

/// Errors surfaced to programs through the context API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Update/Remove/DequeueEvent on an identifier with no registry entry.
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// Create (or rename) targeting an identifier that is already taken.
    #[error("identifier already in use: {0}")]
    DuplicateIdentifier(String),

    /// A second stage was requested while one is registered.
    #[error("stage already exists as {existing}, cannot create {requested}")]
    StageExists {
        /// Identifier currently holding the stage role.
        existing: String,
        /// Identifier of the rejected request.
        requested: String,
    },

    /// Timer interval was zero, negative or not finite.
    #[error("timer {identifier}: interval must be positive, got {interval}")]
    InvalidInterval {
        /// Timer identifier.
        identifier: String,
        /// Rejected interval in milliseconds.
        interval: f64,
    },

    /// A required configuration key is absent.
    #[error("{kind:?} {identifier}: missing attribute `{key}`")]
    MissingAttribute {
        /// Entity identifier.
        identifier: String,
        /// Entity kind being configured.
        kind: EntityKind,
        /// Name of the missing key.
        key: &'static str,
    },

    /// A configuration key holds a value of the wrong type.
    #[error("{identifier}: attribute `{key}` has an invalid value")]
    InvalidAttribute {
        /// Entity identifier.
        identifier: String,
        /// Offending key.
        key: String,
    },

    /// `identifier` is only accepted by Update.
    #[error("{0}: renaming is not allowed in create")]
    RenameOnCreate(String),

    /// The stage has no mutable attributes.
    #[error("{0}: the stage cannot be updated")]
    StageNotUpdatable(String),

    /// The entity does not produce (or cannot subscribe to) this event kind.
    #[error("{identifier}: event `{kind}` is not supported here")]
    UnsupportedEvent {
        /// Entity identifier.
        identifier: String,
        /// Requested event kind.
        kind: EventKind,
    },

    /// An `eventList` entry did not name a known event kind.
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    /// The program requires a feature this engine does not provide.
    #[error("program {program} requires unsupported feature `{tag}`")]
    UnsupportedFeature {
        /// Program name.
        program: String,
        /// The missing feature tag.
        tag: String,
    },

    /// The catalog has no program registered under this name.
    #[error("no program named {0}")]
    UnknownProgram(String),
}

/// Result type for context and engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_identifier() {
        let err = EngineError::UnknownIdentifier("text%hello%0".to_string());
        assert_eq!(err.to_string(), "unknown identifier: text%hello%0");
    }

    #[test]
    fn invalid_interval_reports_value() {
        let err = EngineError::InvalidInterval {
            identifier: "timer%%0".to_string(),
            interval: -5.0,
        };
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn is_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }
}
