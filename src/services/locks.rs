use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::errors::BookingError;

/// One async mutex per court. Holding a court's guard is the serialization
/// point for its check-then-write sequences (create and cancel).
#[derive(Default)]
pub struct CourtLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl CourtLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, court_id: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = match self.locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks
            .entry(court_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Fails with `ConflictCheckTimeout` if the court stays locked for longer
    /// than `timeout`.
    pub async fn acquire(
        &self,
        court_id: &str,
        timeout: Duration,
    ) -> Result<OwnedMutexGuard<()>, BookingError> {
        let lock = self.lock_for(court_id);
        match tokio::time::timeout(timeout, lock.lock_owned()).await {
            Ok(guard) => Ok(guard),
            Err(_) => {
                tracing::warn!(court_id, timeout_ms = timeout.as_millis() as u64, "court lock timed out");
                Err(BookingError::ConflictCheckTimeout)
            }
        }
    }
}
