//! Marker trait for reducer-owned state.

/// Marker trait for state values.
///
/// `Default` is the canonical initial state. `PartialEq` lets containers
/// skip notifying subscribers when a transition changed nothing.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
