//! Reducer - pure function that produces the next state from the previous state and an action

use crate::action::Action;
use crate::error::{Result, StoreError};
use crate::state::State;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

type ReduceFn = dyn Fn(Option<&State>, &Action) -> Result<Option<State>>;

/// A shareable reducer
///
/// The previous state is `None` when it is absent (e.g. on the very first
/// action); the reducer must then supply its own initial state. Returning
/// `Ok(None)` means the reducer yielded nothing, which the store and the
/// combinator always report as a [`StateError`](crate::StateError).
#[derive(Clone)]
pub struct Reducer(Rc<ReduceFn>);

impl Reducer {
    /// A reducer that always yields a state
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&State>, &Action) -> State + 'static,
    {
        Self(Rc::new(move |state: Option<&State>, action: &Action| Ok(Some(f(state, action)))))
    }

    /// A reducer that may yield nothing
    pub fn partial<F>(f: F) -> Self
    where
        F: Fn(Option<&State>, &Action) -> Option<State> + 'static,
    {
        Self(Rc::new(move |state: Option<&State>, action: &Action| Ok(f(state, action))))
    }

    /// A reducer that may fail
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(Option<&State>, &Action) -> Result<Option<State>> + 'static,
    {
        Self(Rc::new(f))
    }

    /// A reducer over a single typed slice.
    ///
    /// `initial` provides the state when none is present. `f` returns `None`
    /// to leave the slice untouched, in which case the previous state is
    /// handed back as-is and keeps its identity.
    pub fn typed<T, I, F>(initial: I, f: F) -> Self
    where
        T: Any + fmt::Debug + Serialize,
        I: Fn() -> T + 'static,
        F: Fn(&T, &Action) -> Option<T> + 'static,
    {
        Self(Rc::new(move |state: Option<&State>, action: &Action| {
            let current = match state {
                Some(state) => state.clone(),
                None => State::opaque(initial()),
            };
            let Some(value) = current.get::<T>() else {
                return Err(StoreError::Reducer(anyhow::anyhow!(
                    "slice holds {} but the reducer expects {}",
                    current.type_name(),
                    std::any::type_name::<T>()
                )));
            };
            Ok(Some(match f(value, action) {
                Some(next) => State::opaque(next),
                None => current,
            }))
        }))
    }

    pub fn reduce(&self, state: Option<&State>, action: &Action) -> Result<Option<State>> {
        (self.0)(state, action)
    }

    /// Whether both handles point at the same reducer function
    pub fn ptr_eq(&self, other: &Reducer) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reducer({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}
