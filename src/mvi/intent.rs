//! Marker trait for actions fed into a reducer.

/// Marker trait for intent objects.
///
/// An intent carries exactly the data a reducer needs to perform one
/// transition. Constructing one has no side effects.
pub trait Intent: std::fmt::Debug + Send + 'static {}
