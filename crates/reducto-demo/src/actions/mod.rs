//! Actions module
//!
//! Typed actions per slice. On the wire every action is a plain record with a
//! `type` field such as `counter/add`; the prefix names the owning slice.

pub mod counter;
pub mod todos;

pub use counter::CounterAction;
pub use todos::TodoAction;

use reducto::Action;
use serde::de::DeserializeOwned;

/// Decode a store action into the typed action of one slice.
///
/// Returns `None` for actions owned by other slices. An action carrying this
/// slice's prefix but a malformed payload is logged and ignored.
pub fn decode<T: DeserializeOwned>(action: &Action, prefix: &str) -> Option<T> {
    let kind = action.kind().as_str()?;
    if !kind.starts_with(prefix) {
        return None;
    }

    let decoded = serde_json::to_value(action).and_then(serde_json::from_value);
    match decoded {
        Ok(typed) => Some(typed),
        Err(e) => {
            log::warn!("Ignoring malformed action {}: {}", kind, e);
            None
        }
    }
}
