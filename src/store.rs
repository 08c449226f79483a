//! Owning state container.
//!
//! Holds the current state of one reducer, applies dispatched intents one at
//! a time, and publishes each resulting state to subscribers.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::mvi::Reducer;

/// Thread-safe container around a reducer's state.
///
/// Cloning is cheap and every clone shares the same state. Dispatches are
/// serialized by an internal lock, so "current state" is always the result
/// of applying every earlier dispatch in order.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Reducer> {
    state: Mutex<R::State>,
    notify: watch::Sender<R::State>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store holding the reducer's canonical initial state.
    pub fn new() -> Self {
        Self::from_state(R::State::default())
    }

    /// Create a store hydrated with `state`.
    pub fn from_state(state: R::State) -> Self {
        let (notify, _) = watch::channel(state.clone());
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(state),
                notify,
            }),
        }
    }

    /// Run `intent` through the reducer and make the result current.
    ///
    /// Subscribers are notified only when the state actually changed.
    pub fn dispatch(&self, intent: R::Intent) {
        let mut guard = self.inner.state.lock();
        tracing::trace!(?intent, "dispatch");

        let next = R::reduce(std::mem::take(&mut *guard), intent);
        *guard = next.clone();

        // Published under the lock so subscribers observe states in order.
        let changed = self.inner.notify.send_if_modified(|published| {
            if *published == next {
                return false;
            }
            *published = next;
            true
        });
        if changed {
            tracing::debug!(receivers = self.inner.notify.receiver_count(), "state published");
        }
    }

    /// Clone of the current state.
    pub fn state(&self) -> R::State {
        self.inner.state.lock().clone()
    }

    /// Borrow the current state for the duration of `f`.
    ///
    /// `f` must not dispatch into this store.
    pub fn read<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&*self.inner.state.lock())
    }

    /// Receiver that sees every state published after this call.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.inner.notify.subscribe()
    }
}
