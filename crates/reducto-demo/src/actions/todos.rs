//! Todo list actions

use serde::{Deserialize, Serialize};

pub const PREFIX: &str = "todos/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TodoAction {
    #[serde(rename = "todos/add")]
    Add { text: String },
    /// Flip the done flag of an item
    #[serde(rename = "todos/toggle")]
    Toggle { id: u64 },
    #[serde(rename = "todos/remove")]
    Remove { id: u64 },
    /// Drop every item that is done
    #[serde(rename = "todos/clear-completed")]
    ClearCompleted,
}
