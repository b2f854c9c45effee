// Sequence counter entity
// One durable row per report kind, created lazily, never deleted

use serde::{Deserialize, Serialize};

/// Point-in-time view of a counter row. `version` guards the
/// compare-and-swap update; `last_value` never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub last_value: u64,
    pub version: i64,
}
