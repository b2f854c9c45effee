use crate::entities::{MatchNotice, RuntimeConfig};

/// Outbound notification to the external embedding/matching service.
///
/// Spawn-style fire-and-forget: the call returns immediately, the request
/// runs on a detached task, and its failure is logged and dropped. The
/// submit path never depends on the matcher being reachable.
pub trait MatcherService: Send + Sync {
    fn spawn_notify(&self, config: RuntimeConfig, notice: MatchNotice);
}
