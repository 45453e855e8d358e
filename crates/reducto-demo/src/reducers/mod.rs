pub mod counter_reducer;
pub mod stats_reducer;
pub mod todos_reducer;
