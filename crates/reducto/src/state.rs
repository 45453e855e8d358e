//! State values held by the store
//!
//! State is a closed representation: either nothing on purpose ([`State::Null`]),
//! a structured record of named slices ([`State::Record`]), or an opaque value
//! of the caller's choosing ([`State::Opaque`]). Cloning a state shares it, so
//! "did this change" is answered by identity in O(1) with [`State::same_as`].

use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Ordered mapping from slice key to slice state
pub type Record = IndexMap<String, State>;

/// A caller value that can live inside [`State::Opaque`]
///
/// Implemented for every `'static` type that is `Debug` and `Serialize`.
pub trait OpaqueValue: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
    fn to_json(&self) -> serde_json::Result<Value>;
}

impl<T> OpaqueValue for T
where
    T: Any + fmt::Debug + Serialize,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, Default)]
pub enum State {
    /// Deliberately empty
    #[default]
    Null,
    /// Structured record, the shape produced by combined reducers
    Record(Rc<Record>),
    /// Any other value
    Opaque(Rc<dyn OpaqueValue>),
}

impl State {
    pub fn opaque<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + Serialize,
    {
        Self::Opaque(Rc::new(value))
    }

    pub fn from_record(record: Record) -> Self {
        Self::Record(Rc::new(record))
    }

    pub fn empty_record() -> Self {
        Self::from_record(Record::new())
    }

    /// Build a record from `(key, state)` pairs, keeping their order
    pub fn record<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, State)>,
    {
        Self::from_record(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Convert a JSON document: objects become records, `null` becomes
    /// [`State::Null`], everything else is kept as an opaque JSON value.
    /// Object keys keep their document order.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Object(map) => Self::from_record(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from_json(value)))
                    .collect(),
            ),
            other => Self::opaque(other),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Slice stored under `key`, if this is a record
    pub fn slice(&self, key: &str) -> Option<&State> {
        self.as_record().and_then(|record| record.get(key))
    }

    /// Borrow the opaque value as `T`
    pub fn get<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Opaque(value) => value.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Human readable name of the representation, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Record(_) => "record",
            Self::Opaque(value) => value.type_name(),
        }
    }

    /// Identity comparison: true when both sides share the same value
    pub fn same_as(&self, other: &State) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Record(a), Self::Record(b)) => Rc::ptr_eq(a, b),
            (Self::Opaque(a), Self::Opaque(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => false,
        }
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Record(record) => record.as_ref().serialize(serializer),
            Self::Opaque(value) => value
                .to_json()
                .map_err(S::Error::custom)?
                .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Serialize, PartialEq)]
    struct Counter {
        value: i64,
    }

    #[test]
    fn test_clones_share_identity() {
        let state = State::opaque(Counter { value: 1 });
        let shared = state.clone();
        assert!(state.same_as(&shared));

        let equal_but_fresh = State::opaque(Counter { value: 1 });
        assert!(!state.same_as(&equal_but_fresh));
        assert!(State::Null.same_as(&State::Null));
        assert!(!State::Null.same_as(&State::empty_record()));
    }

    #[test]
    fn test_downcast() {
        let state = State::opaque(Counter { value: 5 });
        assert_eq!(state.get::<Counter>(), Some(&Counter { value: 5 }));
        assert_eq!(state.get::<i64>(), None);
        assert!(state.type_name().ends_with("Counter"));
    }

    #[test]
    fn test_from_json_builds_records() {
        let state = State::from_json(json!({"a": 0, "b": {"c": null}}));
        let record = state.as_record().unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(state.slice("a").unwrap().get::<Value>(), Some(&json!(0)));
        assert!(state.slice("b").unwrap().slice("c").unwrap().is_null());
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let text = r#"{"zeta": 1, "alpha": 2, "mid": {"y": 0, "x": 0}}"#;
        let state = State::from_json(serde_json::from_str(text).unwrap());

        let keys: Vec<_> = state.as_record().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(state.to_json().unwrap().to_string(), text.replace(' ', ""));
    }

    #[test]
    fn test_serialize_mixed_state() {
        let state = State::record([
            ("counter", State::opaque(Counter { value: 2 })),
            ("todos", State::opaque(vec!["a".to_string()])),
            ("nothing", State::Null),
        ]);
        assert_eq!(
            state.to_json().unwrap(),
            json!({"counter": {"value": 2}, "todos": ["a"], "nothing": null})
        );
    }
}
