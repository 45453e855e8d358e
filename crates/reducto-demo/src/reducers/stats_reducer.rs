use crate::state::StatsState;
use reducto::{action_types, Action, Reducer};

pub fn reduce_stats(state: &StatsState, action: &Action) -> Option<StatsState> {
    let kind = action.kind().to_string();
    if action_types::is_reserved(&kind) {
        return None;
    }
    Some(StatsState {
        actions_seen: state.actions_seen + 1,
        last_action: Some(kind),
    })
}

/// Store reducer owning the `stats` slice
pub fn stats_reducer() -> Reducer {
    Reducer::typed(StatsState::default, reduce_stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_application_actions_only() {
        let state = StatsState::default();
        assert_eq!(reduce_stats(&state, &Action::new(action_types::replace())), None);

        let state = reduce_stats(&state, &Action::new("counter/increment")).unwrap();
        assert_eq!(state.actions_seen, 1);
        assert_eq!(state.last_action.as_deref(), Some("counter/increment"));
    }
}
