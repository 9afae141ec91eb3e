//! Horn Timer
//!
//! Single-shot background timer that silences the horn after a timed alert.
//! Arming the timer again replaces the pending shut-off, so at most one is ever
//! outstanding. Each arming takes a fresh epoch; a shut-off whose epoch is stale
//! by the time it gets the state lock does nothing.

use crate::events::{emit, DroneEvent, DroneEventSender};
use crate::state::DroneState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

/// Pending horn shut-off for one drone
pub struct HornTimer {
    epoch: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl HornTimer {
    pub fn new() -> Self {
        Self {
            epoch: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Schedule the horn to switch off after `after`, replacing any pending shut-off.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(
        &mut self,
        after: Duration,
        state: Arc<RwLock<DroneState>>,
        events: DroneEventSender,
    ) {
        self.cancel();
        let my_epoch = self.epoch.load(Ordering::SeqCst);
        let epoch = self.epoch.clone();
        // Deadline counts from arming, not from the task's first poll
        let shut_off = tokio::time::sleep(after);

        let handle = tokio::spawn(async move {
            shut_off.await;

            let mut state = state.write().await;
            if epoch.load(Ordering::SeqCst) != my_epoch {
                return;
            }
            state.set_horn(false);
            drop(state);

            debug!("[HORN] Timer elapsed, horn off");
            emit(&events, DroneEvent::HornSilenced);
        });

        self.pending = Some(handle);
    }

    /// Drop the pending shut-off, if any
    pub fn cancel(&mut self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a shut-off is scheduled and has not fired
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for HornTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HornTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
