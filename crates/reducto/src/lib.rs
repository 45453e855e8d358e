//! Reducto
//!
//! A predictable state container. State lives in a single [`Store`] and only
//! changes by dispatching [`Action`]s through a pure [`Reducer`]; listeners
//! are notified synchronously after every committed change.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  dispatch   ┌──────────────────────┐  notify   ┌───────────┐
//! │    Action    │────────────►│        Store         │──────────►│ Listeners │
//! └──────────────┘             │  reducer(state, a)   │           └───────────┘
//!                              └──────────┬───────────┘
//!                                         │ root reducer
//!                              ┌──────────▼───────────┐
//!                              │   CombineReducers    │
//!                              │  key -> sub-reducer  │
//!                              └──────────────────────┘
//! ```
//!
//! Store construction can be decorated with [`Enhancer`]s, chained with
//! [`compose()`].
//!
//! # Example
//!
//! ```
//! use reducto::{Action, CombineReducers, Reducer, Store};
//!
//! let root = CombineReducers::new()
//!     .slice(
//!         "count",
//!         Reducer::typed(|| 0i64, |n, action| match action.kind().as_str() {
//!             Some("counter/increment") => Some(n + 1),
//!             _ => None,
//!         }),
//!     )
//!     .build();
//!
//! let store = Store::new(root)?;
//! let subscription = store.subscribe(|| println!("state changed"))?;
//!
//! store.dispatch(Action::new("counter/increment"))?;
//! let state = store.get_state()?;
//! assert_eq!(state.slice("count").and_then(|s| s.get::<i64>()), Some(&1));
//!
//! subscription.unsubscribe()?;
//! # Ok::<(), reducto::StoreError>(())
//! ```

mod action;
mod combine;
mod compose;
mod diagnostics;
mod error;
mod observable;
mod reducer;
mod state;
mod store;

pub use action::{action_types, Action, ActionType, IntoAction};
pub use combine::{combine_reducers, CombineReducers};
pub use compose::{compose, compose_with, Unary};
pub use diagnostics::{
    Diagnostics, DiagnosticsMode, LogSink, MemorySink, StateArgument, Warning, WarningSink,
};
pub use error::{ConfigurationError, InvalidOperation, Result, StateError, StoreError};
pub use observable::{Observer, StateObservable};
pub use reducer::Reducer;
pub use state::{OpaqueValue, Record, State};
pub use store::{create_store, Enhancer, Listener, Preload, Store, StoreFactory, Subscription};
