//! Counter Reducer

use crate::actions::{counter, decode, CounterAction};
use crate::state::CounterState;
use reducto::Reducer;

/// Reducer for the counter slice.
///
/// Accepts only CounterAction, making it type-safe and focused.
pub fn reduce_counter(mut state: CounterState, action: &CounterAction) -> CounterState {
    match action {
        CounterAction::Increment => state.value = state.value.saturating_add(1),
        CounterAction::Decrement => state.value = state.value.saturating_sub(1),
        CounterAction::Add { amount } => state.value = state.value.saturating_add(*amount),
        CounterAction::Reset => state.value = 0,
    }
    state
}

/// Store reducer owning the `counter` slice
pub fn counter_reducer() -> Reducer {
    Reducer::typed(CounterState::default, |state, action| {
        let action = decode::<CounterAction>(action, counter::PREFIX)?;
        Some(reduce_counter(state.clone(), &action))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_actions() {
        let state = CounterState::default();
        let state = reduce_counter(state, &CounterAction::Increment);
        let state = reduce_counter(state, &CounterAction::Add { amount: 10 });
        let state = reduce_counter(state, &CounterAction::Decrement);
        assert_eq!(state.value, 10);

        let state = reduce_counter(state, &CounterAction::Reset);
        assert_eq!(state.value, 0);
    }

    #[test]
    fn test_counter_saturates_at_bounds() {
        let state = CounterState { value: i64::MAX };
        let state = reduce_counter(state, &CounterAction::Add { amount: 1 });
        assert_eq!(state.value, i64::MAX);
        let state = reduce_counter(state, &CounterAction::Increment);
        assert_eq!(state.value, i64::MAX);

        let state = CounterState { value: i64::MIN };
        let state = reduce_counter(state, &CounterAction::Decrement);
        assert_eq!(state.value, i64::MIN);
        let state = reduce_counter(state, &CounterAction::Add { amount: -1 });
        assert_eq!(state.value, i64::MIN);
    }
}
