use reducto::{Enhancer, Reducer, State, StoreFactory};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Warns about reducer runs slower than `threshold`
pub fn timing_enhancer(threshold: Duration) -> Enhancer {
    Rc::new(move |next: StoreFactory| -> StoreFactory {
        Rc::new(move |reducer: Reducer, preloaded: Option<State>| {
            let timed = Reducer::fallible(move |state, action| {
                let started = Instant::now();
                let result = reducer.reduce(state, action);
                let elapsed = started.elapsed();
                if elapsed > threshold {
                    log::warn!("Reducing {} took {:?}", action.kind(), elapsed);
                } else {
                    log::trace!("Reducing {} took {:?}", action.kind(), elapsed);
                }
                result
            });
            next(timed, preloaded)
        })
    })
}
