use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state::SharedState;

/// Periodically drop rate limiter entries whose window has closed.
/// Runs until shutdown is signaled.
pub fn spawn(state: SharedState, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    let period = Duration::from_secs(state.config.submit_rate_window_secs.max(1));

    tokio::spawn(async move {
        tracing::debug!("Rate limiter sweeper started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = shutdown.changed() => {}
            }

            state.submission_limiter.cleanup();
            tracing::trace!(
                "Rate limiter tracking {} clients",
                state.submission_limiter.tracked()
            );
        }

        tracing::debug!("Rate limiter sweeper stopped");
    })
}
