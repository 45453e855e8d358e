//! Counter actions

use serde::{Deserialize, Serialize};

pub const PREFIX: &str = "counter/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CounterAction {
    #[serde(rename = "counter/increment")]
    Increment,
    #[serde(rename = "counter/decrement")]
    Decrement,
    /// Add a (possibly negative) amount
    #[serde(rename = "counter/add")]
    Add { amount: i64 },
    #[serde(rename = "counter/reset")]
    Reset,
}
