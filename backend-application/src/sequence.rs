// Sequence issuance
// Turns the counter store's load + compare-and-swap into an atomic increment

use std::sync::Arc;

use backend_domain::ports::CounterStore;
use backend_domain::{RefCode, ReportKind, StorageError};
use tracing::debug;

use crate::AppError;

/// Internal retry budget for optimistic-concurrency conflicts. Each failed
/// attempt left the counter untouched, so exhausting the budget is safe to
/// surface and safe for the caller to retry.
const MAX_ISSUE_ATTEMPTS: u32 = 5;

/// Hands out the next reference code for a kind, unique under concurrent
/// callers. The current value is never cached across calls; every issuance
/// re-reads the durable row.
pub struct SequenceIssuer {
    counters: Arc<dyn CounterStore>,
}

impl SequenceIssuer {
    pub fn new(counters: Arc<dyn CounterStore>) -> Self {
        Self { counters }
    }

    /// Issues the next code for `kind`. The counter row is created lazily on
    /// first issuance, starting at 1.
    pub async fn issue(&self, kind: ReportKind) -> Result<RefCode, AppError> {
        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let snapshot = self.counters.load(kind).await?;
            let (expected, next_value) = match snapshot {
                Some(row) => (Some(row.version), row.last_value + 1),
                None => (None, 1),
            };

            match self.counters.compare_and_swap(kind, expected, next_value).await {
                Ok(()) => return Ok(RefCode::new(kind, next_value)),
                // A lost race, either on the version check or on the lazy
                // first insert. Re-read and try again.
                Err(StorageError::ConcurrentConflict { .. })
                | Err(StorageError::AlreadyExists { .. }) => {
                    debug!(kind = %kind, attempt, "counter conflict, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(AppError::TransactionConflict(format!(
            "counter '{}' still contended after {} attempts",
            kind, MAX_ISSUE_ATTEMPTS
        )))
    }
}
