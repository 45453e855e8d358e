//! Stats State
//!
//! Only present after the reducer was hot-swapped with `:replace`.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsState {
    /// Application actions reduced since the slice was created
    pub actions_seen: u64,
    /// Type of the most recent application action
    pub last_action: Option<String>,
}
