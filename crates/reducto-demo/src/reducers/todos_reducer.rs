//! Todo list Reducer

use crate::actions::{decode, todos, TodoAction};
use crate::state::{Todo, TodosState};
use reducto::Reducer;

/// Reducer for the todo list.
///
/// Returns `None` when the action does not change anything (unknown id,
/// nothing to clear), so the slice keeps its identity.
pub fn reduce_todos(state: &TodosState, action: &TodoAction) -> Option<TodosState> {
    match action {
        TodoAction::Add { text } => {
            let text = text.trim();
            if text.is_empty() {
                log::debug!("Ignoring empty todo");
                return None;
            }
            let mut next = state.clone();
            next.items.push(Todo {
                id: next.next_id,
                text: text.to_string(),
                done: false,
            });
            next.next_id += 1;
            Some(next)
        }
        TodoAction::Toggle { id } => {
            state.find(*id)?;
            let mut next = state.clone();
            next.items
                .iter_mut()
                .filter(|todo| todo.id == *id)
                .for_each(|todo| todo.done = !todo.done);
            Some(next)
        }
        TodoAction::Remove { id } => {
            state.find(*id)?;
            let mut next = state.clone();
            next.items.retain(|todo| todo.id != *id);
            Some(next)
        }
        TodoAction::ClearCompleted => {
            if state.open_count() == state.items.len() {
                return None;
            }
            let mut next = state.clone();
            next.items.retain(|todo| !todo.done);
            Some(next)
        }
    }
}

/// Store reducer owning the `todos` slice
pub fn todos_reducer() -> Reducer {
    Reducer::typed(TodosState::default, |state, action| {
        reduce_todos(state, &decode::<TodoAction>(action, todos::PREFIX)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn add(state: &TodosState, text: &str) -> TodosState {
        reduce_todos(state, &TodoAction::Add { text: text.into() }).unwrap()
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let state = add(&add(&TodosState::default(), "milk"), " eggs ");
        assert_eq!(
            state.items,
            vec![
                Todo { id: 0, text: "milk".into(), done: false },
                Todo { id: 1, text: "eggs".into(), done: false },
            ]
        );
        assert_eq!(state.next_id, 2);
    }

    #[test]
    fn test_empty_todo_is_ignored() {
        assert_eq!(
            reduce_todos(&TodosState::default(), &TodoAction::Add { text: "  ".into() }),
            None
        );
    }

    #[test]
    fn test_toggle_and_clear_completed() {
        let state = add(&add(&TodosState::default(), "milk"), "eggs");
        let state = reduce_todos(&state, &TodoAction::Toggle { id: 0 }).unwrap();
        assert!(state.find(0).unwrap().done);
        assert_eq!(state.open_count(), 1);

        let state = reduce_todos(&state, &TodoAction::ClearCompleted).unwrap();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].text, "eggs");

        // nothing left to clear
        assert_eq!(reduce_todos(&state, &TodoAction::ClearCompleted), None);
    }

    #[test]
    fn test_unknown_id_changes_nothing() {
        let state = add(&TodosState::default(), "milk");
        assert_eq!(reduce_todos(&state, &TodoAction::Toggle { id: 9 }), None);
        assert_eq!(reduce_todos(&state, &TodoAction::Remove { id: 9 }), None);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let state = add(&TodosState::default(), "milk");
        let state = reduce_todos(&state, &TodoAction::Remove { id: 0 }).unwrap();
        let state = add(&state, "eggs");
        assert_eq!(state.items[0].id, 1);
    }
}
