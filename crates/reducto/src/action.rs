//! Actions and the reserved action types
//!
//! An [`Action`] is a plain record with a required `type` discriminant and an
//! arbitrary set of payload fields. Anything that wants to reach a reducer has
//! to pass through [`IntoAction`] first, which is the only place where loose
//! input (e.g. a JSON value read from disk) is validated.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Discriminant of an action
///
/// Any non-null JSON value is accepted, strings being the common case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionType(Value);

impl ActionType {
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<i64> for ActionType {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

/// A plain, serializable intent to change state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Action {
    #[serde(rename = "type")]
    kind: ActionType,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Action {
    /// Create an action without payload
    pub fn new(kind: impl Into<ActionType>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// Attach a payload field
    ///
    /// A field named `type` is ignored, the discriminant is fixed at creation.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != "type" {
            self.payload.insert(key, value.into());
        }
        self
    }

    pub fn kind(&self) -> &ActionType {
        &self.kind
    }

    /// Whether the action carries the given string type
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl TryFrom<Value> for Action {
    type Error = ConfigurationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut payload = match value {
            Value::Object(map) => map,
            other => {
                return Err(ConfigurationError::ActionNotRecord {
                    found: json_kind(&other),
                })
            }
        };

        match payload.remove("type") {
            None | Some(Value::Null) => Err(ConfigurationError::MissingActionType),
            Some(kind) => Ok(Self {
                kind: ActionType(kind),
                payload,
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Conversion into a validated [`Action`]
///
/// This is the boundary where loosely typed input is checked, so the store
/// never has to inspect the shape of an action again.
pub trait IntoAction {
    fn into_action(self) -> Result<Action, ConfigurationError>;
}

impl IntoAction for Action {
    fn into_action(self) -> Result<Action, ConfigurationError> {
        Ok(self)
    }
}

impl IntoAction for &Action {
    fn into_action(self) -> Result<Action, ConfigurationError> {
        Ok(self.clone())
    }
}

impl IntoAction for Value {
    fn into_action(self) -> Result<Action, ConfigurationError> {
        Action::try_from(self)
    }
}

impl IntoAction for &str {
    fn into_action(self) -> Result<Action, ConfigurationError> {
        Ok(Action::new(self))
    }
}

/// Action types reserved for the store itself
///
/// Reducers must never match on these. For any unknown type, including the
/// ones below, a reducer returns its current state, or its initial state when
/// the current one is absent.
pub mod action_types {
    use rand::Rng;
    use std::sync::LazyLock;

    /// Namespace prefix of all private action types
    pub const NAMESPACE: &str = "@@reducto/";

    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    static INIT: LazyLock<String> = LazyLock::new(|| format!("{}INIT{}", NAMESPACE, random_suffix()));
    static REPLACE: LazyLock<String> =
        LazyLock::new(|| format!("{}REPLACE{}", NAMESPACE, random_suffix()));

    fn random_suffix() -> String {
        let mut rng = rand::thread_rng();
        (0..6)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .map(|c| format!(".{}", c))
            .collect()
    }

    /// Dispatched once by every store before construction returns
    pub fn init() -> &'static str {
        INIT.as_str()
    }

    /// Dispatched by `Store::replace_reducer`
    pub fn replace() -> &'static str {
        REPLACE.as_str()
    }

    /// A fresh random type on every call, used to probe reducers for
    /// special-casing of the private namespace
    pub fn probe_unknown_action() -> String {
        format!("{}PROBE_UNKNOWN_ACTION{}", NAMESPACE, random_suffix())
    }

    pub fn is_reserved(kind: &str) -> bool {
        kind.starts_with(NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_action_from_json() {
        let action: Action = json!({"type": "todos/add", "text": "write tests"})
            .into_action()
            .unwrap();

        assert!(action.is("todos/add"));
        assert_eq!(action.get("text"), Some(&json!("write tests")));
        assert!(action.get("type").is_none());
    }

    #[test]
    fn test_non_record_actions_are_rejected() {
        assert_eq!(
            json!([1, 2]).into_action().unwrap_err(),
            ConfigurationError::ActionNotRecord { found: "an array" }
        );
        assert_eq!(
            json!("INC").into_action().unwrap_err(),
            ConfigurationError::ActionNotRecord { found: "a string" }
        );
    }

    #[test]
    fn test_missing_type_is_rejected() {
        assert_eq!(
            json!({"payload": 1}).into_action().unwrap_err(),
            ConfigurationError::MissingActionType
        );
        assert_eq!(
            json!({"type": null}).into_action().unwrap_err(),
            ConfigurationError::MissingActionType
        );
    }

    #[test]
    fn test_numeric_action_types_are_allowed() {
        let action = json!({"type": 7}).into_action().unwrap();
        assert_eq!(action.kind(), &ActionType::from(7));
        assert_eq!(action.kind().to_string(), "7");
    }

    #[test]
    fn test_serde_roundtrip_keeps_type_field() {
        let action = Action::new("counter/add").with("amount", 3);
        let encoded = serde_json::to_value(&action).unwrap();
        assert_eq!(encoded, json!({"type": "counter/add", "amount": 3}));

        let decoded: Action = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, action);
        assert!(serde_json::from_value::<Action>(json!({"amount": 3})).is_err());
    }

    #[test]
    fn test_reserved_types() {
        assert!(action_types::init().starts_with("@@reducto/INIT."));
        assert!(action_types::replace().starts_with("@@reducto/REPLACE."));
        assert_eq!(action_types::init(), action_types::init());
        assert_ne!(action_types::init(), action_types::replace());
        assert!(action_types::is_reserved(action_types::init()));
        assert!(!action_types::is_reserved("counter/add"));
    }

    #[test]
    fn test_probe_type_is_fresh_every_call() {
        let first = action_types::probe_unknown_action();
        let second = action_types::probe_unknown_action();
        assert!(first.starts_with("@@reducto/PROBE_UNKNOWN_ACTION."));
        // 36^6 possible suffixes, collisions are practically impossible
        assert_ne!(first, second);
    }
}
