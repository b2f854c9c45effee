use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::{debug, warn};

use backend_domain::ports::MatcherService;
use backend_domain::{MatchNotice, RuntimeConfig};

/// Fire-and-forget notification to the embedding/matching endpoint.
///
/// Runs on a detached task after the authoritative write has committed.
/// Failures are logged and dropped; nothing is retried and nothing reaches
/// the submit caller. The matcher answers out of band by writing candidate
/// rows back into the store.
#[derive(Default)]
pub struct HttpMatcherService;

impl HttpMatcherService {
    pub fn new() -> Self {
        Self
    }
}

impl MatcherService for HttpMatcherService {
    fn spawn_notify(&self, config: RuntimeConfig, notice: MatchNotice) {
        let Some(url) = config.matcher_url.clone() else {
            debug!("matcher_url not configured, skipping notification");
            return;
        };
        tokio::spawn(async move {
            if let Err(err) = send_notice(&config, &url, &notice).await {
                warn!(record = %notice.record_id.0, "matcher notification failed: {}", err);
            }
        });
    }
}

async fn send_notice(config: &RuntimeConfig, url: &str, notice: &MatchNotice) -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
        .build()?;
    client
        .post(url)
        .json(notice)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// No-outbound stand-in for deployments without a matcher and for tests.
#[derive(Default)]
pub struct NullMatcherService;

impl NullMatcherService {
    pub fn new() -> Self {
        Self
    }
}

impl MatcherService for NullMatcherService {
    fn spawn_notify(&self, _config: RuntimeConfig, notice: MatchNotice) {
        debug!(record = %notice.record_id.0, "matcher notification dropped (null service)");
    }
}
