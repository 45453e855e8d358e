//! Development-time diagnostics
//!
//! Warnings are observability only, they never change what a reducer returns.
//! They are emitted in [`DiagnosticsMode::Development`] and silently dropped in
//! [`DiagnosticsMode::Production`].

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsMode {
    Development,
    Production,
}

impl DiagnosticsMode {
    /// Development for debug builds, production for release builds
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl Default for DiagnosticsMode {
    fn default() -> Self {
        Self::from_build()
    }
}

/// Which state a shape warning is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateArgument {
    /// State handed to the store at construction, seen under the init action
    PreloadedState,
    PreviousState,
}

impl fmt::Display for StateArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreloadedState => f.write_str("preloaded state passed to create_store"),
            Self::PreviousState => f.write_str("previous state received by the reducer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    MissingReducer {
        key: String,
    },
    NoReducers,
    UnexpectedStateType {
        argument: StateArgument,
        found: &'static str,
        expected_keys: Vec<String>,
    },
    UnexpectedKeys {
        argument: StateArgument,
        keys: Vec<String>,
        expected_keys: Vec<String>,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingReducer { key } => write!(f, "No reducer provided for key \"{}\"", key),
            Self::NoReducers => f.write_str(
                "Store does not have a valid reducer. Make sure the entries passed \
                 to combine_reducers carry reducers.",
            ),
            Self::UnexpectedStateType {
                argument,
                found,
                expected_keys,
            } => write!(
                f,
                "The {} has unexpected type of \"{}\". Expected a record with the following keys: \"{}\"",
                argument,
                found,
                expected_keys.join("\", \"")
            ),
            Self::UnexpectedKeys {
                argument,
                keys,
                expected_keys,
            } => write!(
                f,
                "Unexpected {} \"{}\" found in {}. Expected to find one of the known reducer keys \
                 instead: \"{}\". Unexpected keys will be ignored.",
                if keys.len() > 1 { "keys" } else { "key" },
                keys.join("\", \""),
                argument,
                expected_keys.join("\", \"")
            ),
        }
    }
}

/// Receiver of development warnings
pub trait WarningSink {
    fn warn(&self, warning: &Warning);
}

/// Forwards warnings to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&self, warning: &Warning) {
        log::warn!("{}", warning);
    }
}

/// Keeps every warning in memory, handy for tests and tooling
#[derive(Debug, Default)]
pub struct MemorySink {
    warnings: RefCell<Vec<Warning>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl WarningSink for MemorySink {
    fn warn(&self, warning: &Warning) {
        self.warnings.borrow_mut().push(warning.clone());
    }
}

/// Diagnostics mode together with the sink warnings go to
#[derive(Clone)]
pub struct Diagnostics {
    mode: DiagnosticsMode,
    sink: Rc<dyn WarningSink>,
}

impl Diagnostics {
    pub fn new(mode: DiagnosticsMode) -> Self {
        Self {
            mode,
            sink: Rc::new(LogSink),
        }
    }

    pub fn development() -> Self {
        Self::new(DiagnosticsMode::Development)
    }

    pub fn production() -> Self {
        Self::new(DiagnosticsMode::Production)
    }

    pub fn with_sink(mut self, sink: Rc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn mode(&self) -> DiagnosticsMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.mode == DiagnosticsMode::Development
    }

    pub fn emit(&self, warning: Warning) {
        if self.is_enabled() {
            self.sink.warn(&warning);
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DiagnosticsMode::default())
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").field("mode", &self.mode).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_drops_warnings() {
        let sink = Rc::new(MemorySink::new());
        let diagnostics = Diagnostics::production().with_sink(sink.clone());
        diagnostics.emit(Warning::NoReducers);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_development_forwards_warnings() {
        let sink = Rc::new(MemorySink::new());
        let diagnostics = Diagnostics::development().with_sink(sink.clone());
        diagnostics.emit(Warning::MissingReducer { key: "todos".into() });
        assert_eq!(
            sink.warnings(),
            vec![Warning::MissingReducer { key: "todos".into() }]
        );
    }

    #[test]
    fn test_unexpected_keys_message() {
        let warning = Warning::UnexpectedKeys {
            argument: StateArgument::PreviousState,
            keys: vec!["c".into(), "d".into()],
            expected_keys: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            warning.to_string(),
            "Unexpected keys \"c\", \"d\" found in previous state received by the reducer. \
             Expected to find one of the known reducer keys instead: \"a\", \"b\". \
             Unexpected keys will be ignored."
        );
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: DiagnosticsMode,
        }
        let wrapper: Wrapper = serde_json::from_str(r#"{"mode":"production"}"#).unwrap();
        assert_eq!(wrapper.mode, DiagnosticsMode::Production);
    }
}
