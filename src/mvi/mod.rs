//! Unidirectional data-flow primitives.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Reader
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```
//!
//! - **State**: Immutable value, replaced wholesale on every transition
//! - **Intent**: A serializable description of what should change
//! - **Reducer**: Pure function that produces the next state from an intent

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
