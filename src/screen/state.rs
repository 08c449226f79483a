//! Per-screen store shape.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::mvi::UiState;

/// Identifier of a screen. Caller-chosen, never generated.
pub type ScreenKey = String;

/// Flat mapping of field name to an opaque value.
pub type ScreenData = serde_json::Map<String, Value>;

/// What a key in the store is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEntry {
    /// Accumulated data for the screen.
    Data(Arc<ScreenData>),
    /// Explicitly absent. Serialized as `false` for compatibility with
    /// snapshots written by older hosts. Readers treat it exactly like a
    /// missing key.
    Unset,
}

impl ScreenEntry {
    /// The bound record, or `None` for the sentinel.
    pub fn data(&self) -> Option<&ScreenData> {
        match self {
            Self::Data(data) => Some(data.as_ref()),
            Self::Unset => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<ScreenData> for ScreenEntry {
    fn from(data: ScreenData) -> Self {
        Self::Data(Arc::new(data))
    }
}

impl Serialize for ScreenEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Data(data) => data.as_ref().serialize(serializer),
            Self::Unset => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for ScreenEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Data(ScreenData),
            Flag(bool),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Data(data) => Ok(data.into()),
            Raw::Flag(false) => Ok(Self::Unset),
            Raw::Flag(true) => Err(D::Error::custom(
                "screen entry must be an object or `false`",
            )),
        }
    }
}

/// The whole screen store: one entry per key that has ever been set.
///
/// Transitions never edit a store someone else can observe; the reducer
/// consumes the previous value and returns a new one. Records are shared
/// behind `Arc`, so keys a transition does not touch are carried over
/// without copying.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenState {
    entries: BTreeMap<ScreenKey, ScreenEntry>,
}

impl UiState for ScreenState {}

impl ScreenState {
    /// The canonical empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record bound to `key`. Missing keys and the sentinel both yield `None`.
    pub fn get(&self, key: &str) -> Option<&ScreenData> {
        self.entries.get(key).and_then(ScreenEntry::data)
    }

    /// Raw entry for `key`, letting callers tell the sentinel apart from a
    /// key that was never present.
    pub fn entry(&self, key: &str) -> Option<&ScreenEntry> {
        self.entries.get(key)
    }

    /// Whether `key` currently holds data.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys holding data.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when no key holds data. A store containing only sentinels is
    /// empty by this definition even though it is not equal to `new()`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys holding data, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// `(key, record)` pairs for keys holding data, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScreenData)> {
        self.entries
            .iter()
            .filter_map(|(key, entry)| entry.data().map(|data| (key.as_str(), data)))
    }

    pub(crate) fn insert(&mut self, key: ScreenKey, data: Arc<ScreenData>) {
        self.entries.insert(key, ScreenEntry::Data(data));
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub(crate) fn take_data(&mut self, key: &str) -> Option<Arc<ScreenData>> {
        match self.entries.remove(key) {
            Some(ScreenEntry::Data(data)) => Some(data),
            _ => None,
        }
    }
}

impl<K: Into<ScreenKey>> FromIterator<(K, ScreenEntry)> for ScreenState {
    fn from_iter<I: IntoIterator<Item = (K, ScreenEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
