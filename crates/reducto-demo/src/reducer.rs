//! Root reducer - combines the slice reducers

use crate::reducers::{
    counter_reducer::counter_reducer, stats_reducer::stats_reducer, todos_reducer::todos_reducer,
};
use reducto::{CombineReducers, Diagnostics, Reducer};

/// Root reducer the demo starts with
pub fn root_reducer(diagnostics: Diagnostics) -> Reducer {
    CombineReducers::new()
        .slice("counter", counter_reducer())
        .slice("todos", todos_reducer())
        .diagnostics(diagnostics)
        .build()
}

/// Root reducer installed by `:replace`, adds the `stats` slice
pub fn root_reducer_with_stats(diagnostics: Diagnostics) -> Reducer {
    CombineReducers::new()
        .slice("counter", counter_reducer())
        .slice("todos", todos_reducer())
        .slice("stats", stats_reducer())
        .diagnostics(diagnostics)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CounterState, TodosState};
    use pretty_assertions::assert_eq;
    use reducto::{Action, MemorySink, Store};
    use serde_json::json;
    use std::rc::Rc;

    fn store() -> Store {
        Store::new(root_reducer(Diagnostics::development())).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = store().get_state().unwrap();
        assert_eq!(
            state.to_json().unwrap(),
            json!({
                "counter": {"value": 0},
                "todos": {"items": [], "next_id": 0}
            })
        );
    }

    #[test]
    fn test_slices_update_independently() {
        let store = store();
        let before = store.get_state().unwrap();

        store.dispatch(Action::new("counter/add").with("amount", 5)).unwrap();
        let after = store.get_state().unwrap();

        assert_eq!(
            after.slice("counter").unwrap().get::<CounterState>(),
            Some(&CounterState { value: 5 })
        );
        assert!(after
            .slice("todos")
            .unwrap()
            .same_as(before.slice("todos").unwrap()));
    }

    #[test]
    fn test_ignored_action_keeps_root_identity() {
        let store = store();
        store.dispatch(Action::new("todos/add").with("text", "milk")).unwrap();
        let before = store.get_state().unwrap();

        store.dispatch(Action::new("todos/toggle").with("id", 42)).unwrap();
        store.dispatch(Action::new("unrelated/thing")).unwrap();
        assert!(store.get_state().unwrap().same_as(&before));
    }

    #[test]
    fn test_replace_adds_stats_slice() {
        let sink = Rc::new(MemorySink::new());
        let diagnostics = Diagnostics::development().with_sink(sink.clone());
        let store = Store::new(root_reducer(diagnostics.clone())).unwrap();
        store.dispatch(Action::new("todos/add").with("text", "milk")).unwrap();

        store
            .replace_reducer(root_reducer_with_stats(diagnostics))
            .unwrap();
        store.dispatch(Action::new("counter/increment")).unwrap();

        let state = store.get_state().unwrap();
        assert_eq!(
            state.to_json().unwrap()["stats"],
            json!({"actions_seen": 1, "last_action": "counter/increment"})
        );
        assert_eq!(
            state.slice("todos").unwrap().get::<TodosState>().unwrap().items.len(),
            1
        );
        assert!(sink.is_empty());
    }
}
