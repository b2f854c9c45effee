use std::sync::Arc;

use anyhow::Result;

use backend_application::{AppState, Metrics, SequenceIssuer};
use backend_infrastructure::{AppConfig, HttpMatcherService, MemoryStore};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store = Arc::new(MemoryStore::open(runtime_config.store_path.as_deref()).await?);

        let state = AppState {
            config: runtime_config,
            reports: store.clone(),
            owners: store.clone(),
            matches: store.clone(),
            matcher: Arc::new(HttpMatcherService::new()),
            issuer: Arc::new(SequenceIssuer::new(store)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
