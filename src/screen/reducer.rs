//! Reducer for the screen store.

use std::sync::Arc;

use crate::mvi::Reducer;

use super::action::ScreenAction;
use super::state::ScreenState;

/// Reducer for screen store transitions.
///
/// Total and pure. The input state is consumed, never shared with the result
/// except through `Arc`ed records the transition did not touch.
pub struct ScreenReducer;

impl Reducer for ScreenReducer {
    type State = ScreenState;
    type Intent = ScreenAction;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ScreenAction::Set { key, state: delta } => {
                // Sentinel and missing key both merge onto an empty record.
                let mut record = state.take_data(&key).unwrap_or_default();
                // Copy-on-write: a record still referenced by an older store
                // is cloned before the merge.
                let fields = Arc::make_mut(&mut record);
                for (field, value) in delta {
                    fields.insert(field, value);
                }
                tracing::trace!(key = %key, fields = fields.len(), "screen set");
                state.insert(key, record);
                state
            }

            ScreenAction::Unset { key } => {
                tracing::trace!(key = %key, "screen unset");
                state.remove(&key);
                state
            }

            ScreenAction::Reset => ScreenState::new(),

            ScreenAction::Unrecognized => state,
        }
    }
}
