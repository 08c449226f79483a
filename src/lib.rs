//! Keyed per-screen state container built on a reducer.
//!
//! ```text
//! screen_set / screen_unset / screen_reset
//!            │
//!            ▼
//!   Store<ScreenReducer> ──→ ScreenState ──→ project(key, fallback)
//!            ▲
//!            │
//!      ScreenBindings (one-time init per key)
//! ```

pub mod binding;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod replay;
pub mod screen;
pub mod store;

pub use binding::{BindingError, ScreenBindings, ScreenHandle};
pub use store::Store;
