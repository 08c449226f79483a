//! Per-key read/write handles over a screen [`Store`].
//!
//! A view binds to a screen key, optionally with an initial value. The first
//! bind of a key with an initial value dispatches exactly one `Set` for it;
//! later binds of the same key reuse what is already in the store until the
//! key is released.

use std::collections::HashSet;
use std::marker::PhantomData;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::screen::{project_or, screen_set, screen_unset, ScreenData, ScreenKey, ScreenReducer};
use crate::store::Store;

/// Errors that can occur when converting between typed values and records.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Value for screen '{key}' is not an object")]
    NotARecord { key: ScreenKey },

    #[error("Failed to encode value for screen '{key}': {source}")]
    Encode {
        key: ScreenKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode record for screen '{key}': {source}")]
    Decode {
        key: ScreenKey,
        #[source]
        source: serde_json::Error,
    },
}

/// Hands out [`ScreenHandle`]s and remembers which keys it has initialized.
pub struct ScreenBindings {
    store: Store<ScreenReducer>,
    /// Keys whose initial value has already been dispatched.
    initialized: Mutex<HashSet<ScreenKey>>,
}

impl ScreenBindings {
    pub fn new(store: Store<ScreenReducer>) -> Self {
        Self {
            store,
            initialized: Mutex::new(HashSet::new()),
        }
    }

    pub fn store(&self) -> &Store<ScreenReducer> {
        &self.store
    }

    /// Bind to `key`.
    ///
    /// With `Some(initial)`, dispatches `Set(key, initial)` unless this
    /// binder already did so for `key`. The check and the mark happen under
    /// one lock, so concurrent binds of the same key dispatch once.
    /// `initial` is also the handle's fallback for reads while the key has
    /// no data.
    pub fn bind<T>(
        &self,
        key: impl Into<ScreenKey>,
        initial: Option<T>,
    ) -> Result<ScreenHandle<T>, BindingError>
    where
        T: Serialize + DeserializeOwned,
    {
        let key = key.into();
        let fallback = initial
            .as_ref()
            .map(|value| to_record(&key, value))
            .transpose()?;

        if let Some(record) = &fallback {
            let mut initialized = self.initialized.lock();
            if initialized.insert(key.clone()) {
                tracing::debug!(key = %key, "initializing screen");
                self.store.dispatch(screen_set(key.clone(), record.clone()));
            }
        }

        Ok(ScreenHandle {
            key,
            store: self.store.clone(),
            fallback,
            _value: PhantomData,
        })
    }

    /// End the lifetime of `key` so the next bind with an initial value
    /// initializes it again. Does not touch the store.
    pub fn release(&self, key: &str) -> bool {
        self.initialized.lock().remove(key)
    }

    pub fn is_initialized(&self, key: &str) -> bool {
        self.initialized.lock().contains(key)
    }
}

/// Typed view of one screen key.
///
/// `T` describes the full record shape; [`ScreenHandle::set`] accepts any
/// serializable partial, typically a `json!` object or a struct whose unset
/// fields are skipped.
pub struct ScreenHandle<T> {
    key: ScreenKey,
    store: Store<ScreenReducer>,
    fallback: Option<ScreenData>,
    _value: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ScreenHandle<T> {
    /// Current value: the stored record if the key has data, else the
    /// initial value given at bind time, else `None`.
    pub fn value(&self) -> Result<Option<T>, BindingError> {
        let record = self.store.read(|state| {
            project_or(state, &self.key, self.fallback.as_ref()).cloned()
        });

        record
            .map(|record| {
                serde_json::from_value(Value::Object(record)).map_err(|source| {
                    BindingError::Decode {
                        key: self.key.clone(),
                        source,
                    }
                })
            })
            .transpose()
    }

    /// Merge the fields of `partial` into the stored record.
    pub fn set<P: Serialize + ?Sized>(&self, partial: &P) -> Result<(), BindingError> {
        let record = to_record(&self.key, partial)?;
        self.set_record(record);
        Ok(())
    }

    /// Merge an already-built record.
    pub fn set_record(&self, partial: ScreenData) {
        self.store.dispatch(screen_set(self.key.clone(), partial));
    }

    /// Remove the key from the store. Reads fall back to the initial value.
    pub fn unset(&self) {
        self.store.dispatch(screen_unset(self.key.clone()));
    }
}

fn to_record<V: Serialize + ?Sized>(key: &str, value: &V) -> Result<ScreenData, BindingError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err(BindingError::NotARecord {
            key: key.to_string(),
        }),
        Err(source) => Err(BindingError::Encode {
            key: key.to_string(),
            source,
        }),
    }
}
