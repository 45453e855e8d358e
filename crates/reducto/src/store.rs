use crate::action::{action_types, Action, IntoAction};
use crate::compose::Unary;
use crate::error::{ConfigurationError, InvalidOperation, Result, StateError};
use crate::reducer::Reducer;
use crate::state::State;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Builds a store from a reducer and an optional preloaded state
pub type StoreFactory = Rc<dyn Fn(Reducer, Option<State>) -> Result<Store>>;

/// Decorates store construction, e.g. to wrap the reducer or to attach
/// listeners. Chain several with [`compose`](crate::compose()).
pub type Enhancer = Unary<StoreFactory>;

/// Callback invoked after every committed dispatch
pub type Listener = Rc<dyn Fn()>;

/// Second argument of [`create_store`]: a preloaded state, or an enhancer
/// when no preloaded state is needed.
#[derive(Default)]
pub enum Preload {
    #[default]
    Empty,
    State(State),
    Enhancer(Enhancer),
}

impl From<()> for Preload {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl From<State> for Preload {
    fn from(state: State) -> Self {
        Self::State(state)
    }
}

impl From<Option<State>> for Preload {
    fn from(state: Option<State>) -> Self {
        state.map_or(Self::Empty, Self::State)
    }
}

impl From<Enhancer> for Preload {
    fn from(enhancer: Enhancer) -> Self {
        Self::Enhancer(enhancer)
    }
}

/// Create a store.
///
/// With an enhancer, construction is handed over completely: the enhancer
/// receives the plain store factory, and whatever the factory it returns
/// builds is the result. Without one, the store dispatches the reserved init
/// action before returning so every reducer can produce its initial state.
pub fn create_store(
    reducer: Reducer,
    preload: impl Into<Preload>,
    enhancer: Option<Enhancer>,
) -> Result<Store> {
    let (preloaded_state, enhancer) = match (preload.into(), enhancer) {
        (Preload::Enhancer(_), Some(_)) => return Err(ConfigurationError::SeveralEnhancers.into()),
        (Preload::Enhancer(enhancer), None) => (None, Some(enhancer)),
        (Preload::State(state), enhancer) => (Some(state), enhancer),
        (Preload::Empty, enhancer) => (None, enhancer),
    };

    if let Some(enhancer) = enhancer {
        let factory: StoreFactory =
            Rc::new(|reducer: Reducer, state: Option<State>| create_store(reducer, state, None));
        return enhancer(factory)(reducer, preloaded_state);
    }

    let store = Store {
        shared: Rc::new(Shared::new(reducer, preloaded_state)),
    };
    store.dispatch(Action::new(action_types::init()))?;
    log::debug!("Store initialized");
    Ok(store)
}

#[derive(Clone)]
struct Subscriber {
    id: u64,
    listener: Listener,
}

type Listeners = Rc<Vec<Subscriber>>;

struct Shared {
    reducer: RefCell<Reducer>,
    /// `None` only until the init action was reduced
    state: RefCell<Option<State>>,
    /// Listeners of the last notification pass
    committed: RefCell<Listeners>,
    /// Listeners of the next notification pass; shares `committed` until the
    /// first subscription change after a pass
    pending: RefCell<Listeners>,
    dispatching: Cell<bool>,
    next_subscriber_id: Cell<u64>,
}

impl Shared {
    fn new(reducer: Reducer, state: Option<State>) -> Self {
        let listeners: Listeners = Rc::new(Vec::new());
        Self {
            reducer: RefCell::new(reducer),
            state: RefCell::new(state),
            committed: RefCell::new(listeners.clone()),
            pending: RefCell::new(listeners),
            dispatching: Cell::new(false),
            next_subscriber_id: Cell::new(0),
        }
    }

    /// Mutate the pending listeners, cloning them first if they are still
    /// shared with the committed ones
    fn with_pending<R>(&self, f: impl FnOnce(&mut Vec<Subscriber>) -> R) -> R {
        let mut pending = self.pending.borrow_mut();
        if Rc::ptr_eq(&pending, &self.committed.borrow()) {
            *pending = Rc::new((**pending).clone());
        }
        f(Rc::make_mut(&mut pending))
    }

    /// Commit the pending listeners and hand out the snapshot to notify
    fn commit_listeners(&self) -> Listeners {
        let snapshot = self.pending.borrow().clone();
        *self.committed.borrow_mut() = snapshot.clone();
        snapshot
    }

    fn ensure_not_dispatching(&self, operation: InvalidOperation) -> Result<()> {
        if self.dispatching.get() {
            return Err(operation.into());
        }
        Ok(())
    }
}

/// Releases the reentrancy guard on every exit path
struct DispatchGuard<'a>(&'a Cell<bool>);

impl<'a> DispatchGuard<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Store - holds the state and runs the reducer/notify loop
///
/// A `Store` is a cheap handle: clones share the same state, reducer and
/// listeners. It is single-threaded; nothing here blocks or suspends.
#[derive(Clone)]
pub struct Store {
    shared: Rc<Shared>,
}

impl Store {
    /// Create a store without preloaded state or enhancer
    pub fn new(reducer: Reducer) -> Result<Self> {
        create_store(reducer, Preload::Empty, None)
    }

    /// Create a store starting from `state`
    pub fn with_state(reducer: Reducer, state: State) -> Result<Self> {
        create_store(reducer, state, None)
    }

    /// Current state. Not available to reducers, they receive it as argument.
    pub fn get_state(&self) -> Result<State> {
        self.shared
            .ensure_not_dispatching(InvalidOperation::GetStateWhileReducing)?;
        Ok(self.shared.state.borrow().clone().unwrap_or_default())
    }

    /// Register a listener that runs after every committed dispatch.
    ///
    /// A listener subscribed while a notification pass is running is first
    /// called on the next dispatch.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Result<Subscription> {
        self.shared
            .ensure_not_dispatching(InvalidOperation::SubscribeWhileReducing)?;

        let id = self.shared.next_subscriber_id.get();
        self.shared.next_subscriber_id.set(id + 1);
        let listener: Listener = Rc::new(listener);
        self.shared
            .with_pending(|pending| pending.push(Subscriber { id, listener }));
        log::debug!("Listener {} subscribed", id);

        Ok(Subscription {
            id,
            shared: Rc::downgrade(&self.shared),
            subscribed: Cell::new(true),
        })
    }

    /// Run `action` through the reducer, commit the result and notify
    /// listeners. Returns the action unchanged.
    ///
    /// When the reducer fails or yields nothing the state is left untouched
    /// and no listener is called.
    pub fn dispatch(&self, action: impl IntoAction) -> Result<Action> {
        let action = action.into_action()?;
        self.shared
            .ensure_not_dispatching(InvalidOperation::DispatchWhileReducing)?;

        let reducer = self.shared.reducer.borrow().clone();
        let previous = self.shared.state.borrow().clone();
        let next = {
            let _guard = DispatchGuard::engage(&self.shared.dispatching);
            reducer.reduce(previous.as_ref(), &action)?
        };
        let next = next.ok_or_else(|| StateError::RootUndefined {
            action_type: action.kind().to_string(),
        })?;
        *self.shared.state.borrow_mut() = Some(next);

        let listeners = self.shared.commit_listeners();
        log::trace!(
            "Action {} committed, notifying {} listener(s)",
            action.kind(),
            listeners.len()
        );
        for subscriber in listeners.iter() {
            (subscriber.listener)();
        }

        Ok(action)
    }

    /// Swap the reducer and dispatch the reserved replace action so every
    /// slice re-derives its state under the new reducer.
    pub fn replace_reducer(&self, next_reducer: Reducer) -> Result<()> {
        self.shared
            .ensure_not_dispatching(InvalidOperation::DispatchWhileReducing)?;
        *self.shared.reducer.borrow_mut() = next_reducer;
        log::debug!("Reducer replaced");
        self.dispatch(Action::new(action_types::replace()))?;
        Ok(())
    }

    /// Number of listeners that will be notified by the next dispatch
    pub fn listener_count(&self) -> usize {
        self.shared.pending.borrow().len()
    }

    pub(crate) fn downgrade(&self) -> WeakStore {
        WeakStore(Rc::downgrade(&self.shared))
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.shared.state.borrow())
            .field("listeners", &self.listener_count())
            .field("dispatching", &self.shared.dispatching.get())
            .finish()
    }
}

/// Store handle that does not keep the store alive
#[derive(Clone)]
pub(crate) struct WeakStore(Weak<Shared>);

impl WeakStore {
    pub(crate) fn upgrade(&self) -> Option<Store> {
        self.0.upgrade().map(|shared| Store { shared })
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Dropping it does not unsubscribe.
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
    subscribed: Cell<bool>,
}

impl Subscription {
    /// Remove the listener from future notification passes.
    ///
    /// Calling it again is a no-op. A pass that is already running still
    /// calls the listener.
    pub fn unsubscribe(&self) -> Result<()> {
        if !self.subscribed.get() {
            return Ok(());
        }
        let Some(shared) = self.shared.upgrade() else {
            self.subscribed.set(false);
            return Ok(());
        };
        shared.ensure_not_dispatching(InvalidOperation::UnsubscribeWhileReducing)?;

        self.subscribed.set(false);
        shared.with_pending(|pending| pending.retain(|subscriber| subscriber.id != self.id));
        log::debug!("Listener {} unsubscribed", self.id);
        Ok(())
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.get()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("subscribed", &self.subscribed.get())
            .finish()
    }
}
