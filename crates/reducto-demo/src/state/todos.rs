//! Todo list State

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodosState {
    pub items: Vec<Todo>,
    /// Id handed to the next added item, ids are never reused
    pub next_id: u64,
}

impl TodosState {
    pub fn find(&self, id: u64) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    pub fn open_count(&self) -> usize {
        self.items.iter().filter(|todo| !todo.done).count()
    }
}
