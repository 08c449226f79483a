//! Read projection over a screen store.
//!
//! A key that was never set and a key bound to the unset sentinel are the
//! same thing to a reader: there is no data, so the caller's fallback wins.

use super::state::{ScreenData, ScreenState};

/// Record at `key`, or `fallback` when the key has no data.
pub fn project<'a>(state: &'a ScreenState, key: &str, fallback: &'a ScreenData) -> &'a ScreenData {
    state.get(key).unwrap_or(fallback)
}

/// Like [`project`], with an optional fallback. `None` means neither the
/// store nor the caller had anything for `key`.
pub fn project_or<'a>(
    state: &'a ScreenState,
    key: &str,
    fallback: Option<&'a ScreenData>,
) -> Option<&'a ScreenData> {
    state.get(key).or(fallback)
}
