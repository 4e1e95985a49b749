//! Once-per-mount view-count reporting.

use crate::ContentClient;
use std::sync::atomic::{AtomicBool, Ordering};

/// Fires the view increment for a detail screen at most once.
///
/// One reporter is created per screen mount; the guard ties the increment
/// to the resource id becoming available, independent of whether the main
/// detail fetch succeeds. Failures are swallowed and logged.
#[derive(Debug, Default)]
pub struct ViewReporter {
    fired: AtomicBool,
}

impl ViewReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch the view increment unless this reporter already fired.
    ///
    /// Returns the task handle on the first call, `None` afterwards.
    pub fn report_once(
        &self,
        client: &ContentClient,
        resource_id: &str,
        token: Option<&str>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        if self.fired.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(client.spawn_action(resource_id, "view", token))
    }

    /// Whether this reporter has already fired.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
