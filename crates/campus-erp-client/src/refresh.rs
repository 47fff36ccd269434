//! Single-flight token refresh.
//!
//! When several requests hit a 401 at the same time, exactly one refresh
//! call goes out. The first caller becomes the leader and runs the refresh;
//! everyone arriving while it is in flight joins and awaits the same
//! outcome. On success every waiter retries its original request once with
//! the new access token; on failure every waiter fails.

use std::future::Future;

use tokio::sync::{watch, Mutex};
use tracing::debug;

/// The shared result of one refresh attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new access token was obtained.
    Refreshed(String),
    /// The refresh failed; the session is over.
    Failed,
}

/// Coordinates concurrent refresh attempts into one in-flight call.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    inflight: Mutex<Option<watch::Receiver<Option<RefreshOutcome>>>>,
}

impl RefreshCoordinator {
    /// Creates a coordinator with no refresh in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `do_refresh` single-flight.
    ///
    /// The leader executes the closure; joiners never run theirs and await
    /// the leader's outcome instead.
    pub async fn refresh<F, Fut>(&self, do_refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<String>>,
    {
        let mut slot = self.inflight.lock().await;
        if let Some(rx) = slot.as_ref() {
            let rx = rx.clone();
            drop(slot);
            debug!("joining in-flight token refresh");
            return Self::join(rx).await;
        }

        let (tx, rx) = watch::channel(None);
        *slot = Some(rx);
        drop(slot);

        debug!("starting token refresh");
        let outcome = match do_refresh().await {
            Some(access) => RefreshOutcome::Refreshed(access),
            None => RefreshOutcome::Failed,
        };

        // Publish before releasing the slot so late joiners either see the
        // receiver with its final value or start a fresh attempt.
        let _ = tx.send(Some(outcome.clone()));
        *self.inflight.lock().await = None;

        outcome
    }

    async fn join(mut rx: watch::Receiver<Option<RefreshOutcome>>) -> RefreshOutcome {
        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return RefreshOutcome::Failed;
            }
        }
    }
}
