use std::sync::Arc;

use backend_domain::ports::{MatchRepository, MatcherService, OwnerRepository, ReportRepository};
use backend_domain::RuntimeConfig;

use crate::{Metrics, SequenceIssuer};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub reports: Arc<dyn ReportRepository>,
    pub owners: Arc<dyn OwnerRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub matcher: Arc<dyn MatcherService>,
    pub issuer: Arc<SequenceIssuer>,
    pub metrics: Arc<Metrics>,
}
