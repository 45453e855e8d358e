//! Combine independently owned sub-reducers into one root reducer
//!
//! Every sub-reducer owns one slice of a record-shaped root state. The
//! combined reducer hands each slice to its reducer and only builds a new
//! record when at least one slice changed identity, so "nothing changed" is
//! cheap to detect downstream.
//!
//! Sub-reducers are validated once when the combination is built: each one is
//! called with an absent state under the init action and under a random probe
//! action. A failure there is remembered and raised on every invocation of the
//! combined reducer instead of at build time.

use crate::action::{action_types, Action};
use crate::diagnostics::{Diagnostics, StateArgument, Warning};
use crate::error::{Result, StateError};
use crate::reducer::Reducer;
use crate::state::{Record, State};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashSet;

/// Builder for a combined reducer
///
/// ```
/// use reducto::{Action, CombineReducers, Reducer, State};
///
/// let root = CombineReducers::new()
///     .slice("count", Reducer::typed(|| 0i64, |n, a| a.is("INC").then(|| n + 1)))
///     .slice("name", Reducer::new(|s, _| s.cloned().unwrap_or(State::Null)))
///     .build();
///
/// let state = root.reduce(None, &Action::new("INC")).unwrap().unwrap();
/// assert_eq!(state.slice("count").unwrap().get::<i64>(), Some(&1));
/// ```
#[derive(Debug, Default)]
pub struct CombineReducers {
    entries: IndexMap<String, Option<Reducer>>,
    diagnostics: Diagnostics,
}

impl CombineReducers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the reducer owning `key`. A later entry for the same key
    /// replaces the earlier one but keeps its position.
    pub fn slice(self, key: impl Into<String>, reducer: Reducer) -> Self {
        self.entry(key, Some(reducer))
    }

    /// Register an entry that may lack a reducer. Entries without one are
    /// dropped when building, with a development warning.
    pub fn entry(mut self, key: impl Into<String>, reducer: Option<Reducer>) -> Self {
        self.entries.insert(key.into(), reducer);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Build the combined reducer. Never fails, see the module docs for when
    /// validation errors surface.
    pub fn build(self) -> Reducer {
        let mut reducers = IndexMap::with_capacity(self.entries.len());
        for (key, reducer) in self.entries {
            match reducer {
                Some(reducer) => {
                    reducers.insert(key, reducer);
                }
                None => self.diagnostics.emit(Warning::MissingReducer { key }),
            }
        }

        let shape_error = assert_reducer_shape(&reducers).err();
        if let Some(error) = &shape_error {
            log::debug!("Deferring reducer shape error until first use: {}", error);
        }

        let combination = Combination {
            reducers,
            shape_error,
            unexpected_key_cache: RefCell::new(HashSet::new()),
            diagnostics: self.diagnostics,
        };
        Reducer::fallible(move |state, action| combination.reduce(state, action))
    }
}

/// Combine `(key, reducer)` pairs with default diagnostics
pub fn combine_reducers<K, I>(reducers: I) -> Reducer
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Reducer)>,
{
    reducers
        .into_iter()
        .fold(CombineReducers::new(), |builder, (key, reducer)| {
            builder.slice(key, reducer)
        })
        .build()
}

fn assert_reducer_shape(reducers: &IndexMap<String, Reducer>) -> Result<(), StateError> {
    for (key, reducer) in reducers {
        let init = Action::new(action_types::init());
        match reducer.reduce(None, &init) {
            Ok(Some(_)) => {}
            Ok(None) => return Err(StateError::UndefinedDuringInit { key: key.clone() }),
            Err(e) => {
                return Err(StateError::ValidationFailed {
                    key: key.clone(),
                    message: e.to_string(),
                })
            }
        }

        let probe = Action::new(action_types::probe_unknown_action());
        match reducer.reduce(None, &probe) {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(StateError::UndefinedOnProbe {
                    key: key.clone(),
                    namespace: action_types::NAMESPACE,
                })
            }
            Err(e) => {
                return Err(StateError::ValidationFailed {
                    key: key.clone(),
                    message: e.to_string(),
                })
            }
        }
    }
    Ok(())
}

struct Combination {
    reducers: IndexMap<String, Reducer>,
    shape_error: Option<StateError>,
    /// Keys already warned about, each one is reported once per combination
    unexpected_key_cache: RefCell<HashSet<String>>,
    diagnostics: Diagnostics,
}

impl Combination {
    fn reduce(&self, state: Option<&State>, action: &Action) -> Result<Option<State>> {
        if let Some(error) = &self.shape_error {
            return Err(error.clone().into());
        }

        let empty;
        let state = match state {
            Some(state) => state,
            None => {
                empty = State::empty_record();
                &empty
            }
        };

        if self.diagnostics.is_enabled() {
            if let Some(warning) = self.unexpected_state_shape(state, action) {
                self.diagnostics.emit(warning);
            }
        }

        let previous = state.as_record();
        let mut has_changed = false;
        let mut next = Record::with_capacity(self.reducers.len());
        for (key, reducer) in &self.reducers {
            let previous_for_key = previous.and_then(|record| record.get(key));
            let next_for_key = reducer.reduce(previous_for_key, action)?.ok_or_else(|| {
                StateError::UndefinedForAction {
                    key: key.clone(),
                    action_type: action.kind().to_string(),
                }
            })?;

            has_changed = has_changed
                || !previous_for_key.is_some_and(|previous| previous.same_as(&next_for_key));
            next.insert(key.clone(), next_for_key);
        }

        Ok(Some(if has_changed {
            State::from_record(next)
        } else {
            state.clone()
        }))
    }

    fn unexpected_state_shape(&self, state: &State, action: &Action) -> Option<Warning> {
        if self.reducers.is_empty() {
            return Some(Warning::NoReducers);
        }

        let argument = if action.is(action_types::init()) {
            StateArgument::PreloadedState
        } else {
            StateArgument::PreviousState
        };
        let expected_keys = || self.reducers.keys().cloned().collect::<Vec<_>>();

        let Some(record) = state.as_record() else {
            return Some(Warning::UnexpectedStateType {
                argument,
                found: state.type_name(),
                expected_keys: expected_keys(),
            });
        };

        let mut cache = self.unexpected_key_cache.borrow_mut();
        let unexpected: Vec<String> = record
            .keys()
            .filter(|key| !self.reducers.contains_key(*key) && !cache.contains(*key))
            .cloned()
            .collect();
        cache.extend(unexpected.iter().cloned());

        // replacing the reducer sanctions keys the new shape no longer knows
        if action.is(action_types::replace()) || unexpected.is_empty() {
            return None;
        }

        Some(Warning::UnexpectedKeys {
            argument,
            keys: unexpected,
            expected_keys: expected_keys(),
        })
    }
}
