use std::sync::Arc;

use crate::config::Config;
use crate::discovery::DiscoveryEngine;
use crate::interview::InterviewPrep;
use crate::optimizer::ResumeOptimizer;
use crate::outreach::OutreachManager;
use crate::search_config::SearchConfigStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Services are constructed once at startup and passed by
/// handle — no ambient global state.
#[derive(Clone)]
pub struct AppState {
    /// Single owner of the persisted search configurations.
    pub store: Arc<SearchConfigStore>,
    pub discovery: Arc<DiscoveryEngine>,
    pub optimizer: Arc<ResumeOptimizer>,
    pub outreach: Arc<OutreachManager>,
    pub interview: Arc<InterviewPrep>,
    pub config: Config,
}
