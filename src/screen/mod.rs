//! Keyed per-screen state.
//!
//! Independent screens store, merge-update, remove and globally reset small
//! records identified by a string key.
//!
//! - `state.rs` - Store shape (key → record or unset sentinel)
//! - `action.rs` - Set / Unset / Reset intents and their wire tags
//! - `reducer.rs` - Transitions (pure, total)
//! - `projection.rs` - Reads that fall back to a caller default

mod action;
mod projection;
mod reducer;
mod state;

pub use action::{
    screen_reset, screen_set, screen_unset, ScreenAction, SCREEN_RESET, SCREEN_SET, SCREEN_UNSET,
};
pub use projection::{project, project_or};
pub use reducer::ScreenReducer;
pub use state::{ScreenData, ScreenEntry, ScreenKey, ScreenState};
