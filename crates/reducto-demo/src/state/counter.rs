use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CounterState {
    pub value: i64,
}
