//=========================================================================
// Entity Configuration
//=========================================================================
//
// Attribute maps passed to Create and Update.
//
// A `Config` is a flat map of attribute names to `Value`s. Most keys
// are forwarded to the renderer untouched; a few are reserved and
// consumed by the engine itself:
//
//   identifier  rename target (Update only)
//   eventList   event kinds to subscribe (Create only)
//   interval    timer period in milliseconds
//   pause       timer pause/resume switch
//   url         image source
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::BTreeMap;

//=== Internal Dependencies ===============================================

use super::error::{EngineError, EngineResult};
use super::event::EventKind;

//=== Reserved Keys =======================================================

pub const IDENTIFIER: &str = "identifier";
pub const EVENT_LIST: &str = "eventList";
pub const INTERVAL: &str = "interval";
pub const PAUSE: &str = "pause";
pub const URL: &str = "url";

//=== Value ===============================================================

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

//=== Attributes ==========================================================

/// Renderer-facing attributes, already stripped of reserved keys.
pub type Attributes = BTreeMap<String, Value>;

//=== Config ==============================================================

/// Attribute map supplied by a program.
///
/// Built fluently:
/// ```
/// use frame_runtime::core::config::Config;
/// use frame_runtime::core::event::EventKind;
///
/// let config = Config::new()
///     .with("x", 0.5)
///     .with("text", "Hello")
///     .events([EventKind::Click, EventKind::Tap]);
/// assert!(config.get("eventList").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    values: BTreeMap<String, Value>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets the `eventList` attribute.
    pub fn events(self, kinds: impl IntoIterator<Item = EventKind>) -> Self {
        let names: Vec<Value> = kinds.into_iter().map(|k| Value::from(k.as_str())).collect();
        self.with(EVENT_LIST, Value::List(names))
    }

    /// Sets the `identifier` attribute (rename on Update).
    pub fn rename(self, identifier: impl Into<String>) -> Self {
        self.with(IDENTIFIER, Value::Text(identifier.into()))
    }

    /// Sets the `pause` attribute.
    pub fn pause(self, paused: bool) -> Self {
        self.with(PAUSE, paused)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    //--- Reserved Key Extraction ------------------------------------------

    /// Rename target, if present.
    pub(crate) fn identifier(&self, owner: &str) -> EngineResult<Option<&str>> {
        match self.values.get(IDENTIFIER) {
            None => Ok(None),
            Some(Value::Text(s)) => Ok(Some(s)),
            Some(_) => Err(invalid(owner, IDENTIFIER)),
        }
    }

    /// Parsed `eventList`, deduplicated in first-seen order.
    pub(crate) fn event_list(&self, owner: &str) -> EngineResult<Vec<EventKind>> {
        let Some(value) = self.values.get(EVENT_LIST) else {
            return Ok(Vec::new());
        };
        let items = value.as_list().ok_or_else(|| invalid(owner, EVENT_LIST))?;

        let mut kinds = Vec::with_capacity(items.len());
        for item in items {
            let name = item.as_text().ok_or_else(|| invalid(owner, EVENT_LIST))?;
            let kind: EventKind = name.parse()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }

    pub(crate) fn number(&self, owner: &str, key: &str) -> EngineResult<Option<f64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => value.as_number().map(Some).ok_or_else(|| invalid(owner, key)),
        }
    }

    pub(crate) fn flag(&self, owner: &str, key: &str) -> EngineResult<Option<bool>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => value.as_bool().map(Some).ok_or_else(|| invalid(owner, key)),
        }
    }

    pub(crate) fn text(&self, owner: &str, key: &str) -> EngineResult<Option<&str>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => value.as_text().map(Some).ok_or_else(|| invalid(owner, key)),
        }
    }

    /// Keys other than the reserved ones, for the renderer.
    pub(crate) fn attributes(&self) -> Attributes {
        self.values
            .iter()
            .filter(|(key, _)| !is_reserved(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Multiplies the number under `key` by `factor`. Other value types
    /// are left alone.
    pub(crate) fn scale(&mut self, key: &str, factor: f64) {
        if let Some(Value::Number(n)) = self.values.get_mut(key) {
            *n *= factor;
        }
    }

    /// Names of every non-reserved key.
    pub(crate) fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str).filter(|key| !is_reserved(key))
    }
}

fn is_reserved(key: &str) -> bool {
    matches!(key, IDENTIFIER | EVENT_LIST | INTERVAL | PAUSE | URL)
}

fn invalid(owner: &str, key: &str) -> EngineError {
    EngineError::InvalidAttribute {
        identifier: owner.to_string(),
        key: key.to_string(),
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_are_not_forwarded() {
        let config = Config::new()
            .with("x", 0.1)
            .with("text", "Hi")
            .rename("other")
            .events([EventKind::Click]);

        let attrs = config.attributes();
        assert_eq!(attrs.len(), 2);
        assert!(attrs.contains_key("x"));
        assert!(!attrs.contains_key(IDENTIFIER));
        assert!(!attrs.contains_key(EVENT_LIST));
    }

    #[test]
    fn event_list_parses_and_deduplicates() {
        let config = Config::new().with(EVENT_LIST, vec!["click", "tap", "click"]);
        assert_eq!(
            config.event_list("id"),
            Ok(vec![EventKind::Click, EventKind::Tap])
        );
    }

    #[test]
    fn event_list_rejects_unknown_names() {
        let config = Config::new().with(EVENT_LIST, vec!["wheel"]);
        assert_eq!(
            config.event_list("id"),
            Err(EngineError::UnknownEventKind("wheel".to_string()))
        );
    }

    #[test]
    fn event_list_must_be_a_list_of_text() {
        let config = Config::new().with(EVENT_LIST, "click");
        assert!(matches!(
            config.event_list("id"),
            Err(EngineError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn typed_accessors_reject_wrong_types() {
        let config = Config::new().with(INTERVAL, "soon").with(PAUSE, 1);
        assert!(config.number("t", INTERVAL).is_err());
        assert!(config.flag("t", PAUSE).is_err());
        assert_eq!(config.number("t", "missing"), Ok(None));
    }
}
