//! Error types raised by the store and the reducer combinator

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Every error the store, the combinator or a reducer can raise.
///
/// Errors are always returned synchronously to the immediate caller and never
/// retried or swallowed. A store that returned any of these remains usable.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Bad caller input
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A call made at a time where it is forbidden
    #[error(transparent)]
    InvalidOperation(#[from] InvalidOperation),

    /// A reducer yielded no state
    #[error(transparent)]
    State(#[from] StateError),

    /// A reducer failed for its own reasons
    #[error("reducer failed: {0}")]
    Reducer(#[from] anyhow::Error),
}

/// Bad caller input, detected at the boundary before anything runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("actions must be plain records, found {found}; use custom middleware for other kinds of actions")]
    ActionNotRecord { found: &'static str },

    #[error("actions may not have an undefined \"type\" property; have you misspelled a constant?")]
    MissingActionType,

    #[error("several store enhancers were passed to create_store; compose them together into a single enhancer")]
    SeveralEnhancers,
}

/// Calls that are forbidden while a reducer is executing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    #[error(
        "get_state may not be called while the reducer is executing; \
         the reducer has already received the state as an argument"
    )]
    GetStateWhileReducing,

    #[error(
        "subscribe may not be called while the reducer is executing; \
         subscribe from outside and call get_state in the listener instead"
    )]
    SubscribeWhileReducing,

    #[error("you may not unsubscribe from a store listener while the reducer is executing")]
    UnsubscribeWhileReducing,

    #[error("reducers may not dispatch actions")]
    DispatchWhileReducing,
}

/// A reducer returned no state where one was required
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error(
        "reducer \"{key}\" returned undefined during initialization; if the state passed \
         to the reducer is absent, you must explicitly return the initial state \
         (use State::Null if the reducer should hold no value)"
    )]
    UndefinedDuringInit { key: String },

    #[error(
        "reducer \"{key}\" returned undefined when probed with a random type; don't try to \
         handle actions in the \"{namespace}\" namespace, they are private; return the \
         current state for any unknown action, or the initial state when it is absent"
    )]
    UndefinedOnProbe { key: String, namespace: &'static str },

    #[error(
        "given action \"{action_type}\", reducer \"{key}\" returned undefined; to ignore an \
         action you must explicitly return the previous state (use State::Null if the \
         reducer should hold no value)"
    )]
    UndefinedForAction { key: String, action_type: String },

    #[error("reducer \"{key}\" failed while its shape was validated: {message}")]
    ValidationFailed { key: String, message: String },

    #[error("given action \"{action_type}\", the root reducer returned undefined")]
    RootUndefined { action_type: String },
}
