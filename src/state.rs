use std::sync::Arc;

use crate::booking::{CollectionLoader, SubmissionPipeline};
use crate::config::Config;
use crate::rate_limit::SubmissionRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub pipeline: SubmissionPipeline,
    pub loader: Arc<CollectionLoader>,
    pub submission_limiter: SubmissionRateLimiter,
}
