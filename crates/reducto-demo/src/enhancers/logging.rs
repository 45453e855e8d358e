use reducto::{Enhancer, Reducer, State, StoreFactory};
use std::rc::Rc;

/// Logs every action passing through the root reducer, and what it did
pub fn logging_enhancer() -> Enhancer {
    Rc::new(|next: StoreFactory| -> StoreFactory {
        Rc::new(move |reducer: Reducer, preloaded: Option<State>| {
            let logged = Reducer::fallible(move |state, action| {
                log::debug!("Action: {}", action.kind());
                let result = reducer.reduce(state, action);
                match &result {
                    Ok(Some(reduced)) if state.is_some_and(|s| s.same_as(reduced)) => {
                        log::trace!("Action {} left the state untouched", action.kind())
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Action {} failed: {}", action.kind(), e),
                }
                result
            });
            next(logged, preloaded)
        })
    })
}
