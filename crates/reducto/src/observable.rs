//! Reactive-stream view of a store
//!
//! Observers get the current state right away and again after every
//! dispatch, until their subscription is cancelled. The projection keeps no
//! state of its own, it is a thin layer over `subscribe` and `get_state`.

use crate::error::Result;
use crate::state::State;
use crate::store::{Store, Subscription};
use std::rc::Rc;

/// Receiver of state updates
pub trait Observer {
    fn next(&self, _state: &State) {}
}

impl<F> Observer for F
where
    F: Fn(&State),
{
    fn next(&self, state: &State) {
        self(state)
    }
}

/// Returned by [`Store::observable`]
#[derive(Debug, Clone)]
pub struct StateObservable {
    store: Store,
}

impl StateObservable {
    /// Push the current state to `observer` now and after every dispatch
    pub fn subscribe(&self, observer: impl Observer + 'static) -> Result<Subscription> {
        let observer = Rc::new(observer);
        observer.next(&self.store.get_state()?);

        let store = self.store.downgrade();
        let listener = observer.clone();
        self.store.subscribe(move || {
            let Some(store) = store.upgrade() else {
                return;
            };
            match store.get_state() {
                Ok(state) => listener.next(&state),
                Err(e) => log::error!("Observer could not read state: {}", e),
            }
        })
    }
}

impl Store {
    pub fn observable(&self) -> StateObservable {
        StateObservable {
            store: self.clone(),
        }
    }
}
