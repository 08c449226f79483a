//! Actions understood by the screen reducer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::mvi::Intent;

use super::state::{ScreenData, ScreenKey};

pub const SCREEN_SET: &str = "SCREEN_SET";
pub const SCREEN_UNSET: &str = "SCREEN_UNSET";
pub const SCREEN_RESET: &str = "SCREEN_RESET";

/// Intents that can be dispatched to the screen reducer.
///
/// Serialized as an internally tagged object, e.g.
/// `{"type":"SCREEN_SET","key":"login","state":{"step":1}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScreenAction {
    /// Shallow-merge `state` into the record at `key`, creating it if needed.
    /// `state` is a delta, not a replacement.
    #[serde(rename = "SCREEN_SET")]
    Set {
        key: ScreenKey,
        #[serde(default, deserialize_with = "null_as_empty")]
        state: ScreenData,
    },

    /// Drop `key` from the store.
    #[serde(rename = "SCREEN_UNSET")]
    Unset { key: ScreenKey },

    /// Discard every key.
    #[serde(rename = "SCREEN_RESET")]
    Reset,

    /// Any `type` this build does not know. Reduced as a no-op so that logs
    /// written by newer hosts still replay. Cannot be serialized.
    #[serde(other, skip_serializing)]
    Unrecognized,
}

impl Intent for ScreenAction {}

impl ScreenAction {
    /// Wire tag of this action, or `None` for [`ScreenAction::Unrecognized`].
    pub fn action_type(&self) -> Option<&'static str> {
        match self {
            Self::Set { .. } => Some(SCREEN_SET),
            Self::Unset { .. } => Some(SCREEN_UNSET),
            Self::Reset => Some(SCREEN_RESET),
            Self::Unrecognized => None,
        }
    }

    /// Key this action targets, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Set { key, .. } | Self::Unset { key } => Some(key.as_str()),
            Self::Reset | Self::Unrecognized => None,
        }
    }
}

/// Set or update the record for `key`. Merged shallowly by the reducer.
pub fn screen_set(key: impl Into<ScreenKey>, state: ScreenData) -> ScreenAction {
    ScreenAction::Set {
        key: key.into(),
        state,
    }
}

/// Remove the record for `key`.
pub fn screen_unset(key: impl Into<ScreenKey>) -> ScreenAction {
    ScreenAction::Unset { key: key.into() }
}

/// Clear the entire store.
pub fn screen_reset() -> ScreenAction {
    ScreenAction::Reset
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ScreenData, D::Error> {
    Ok(Option::<ScreenData>::deserialize(deserializer)?.unwrap_or_default())
}
