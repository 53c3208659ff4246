use crate::backend::ProgressBackend;
use crate::progress::ProgressTracker;
use crate::progress::error::ProgressError;
use kaizen_model::module::ModuleRef;
use std::error::Error;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::{CancellationToken, DropGuard};

const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Periodically records the completion a viewer publishes on a watch channel.
///
/// Only increases are sent. Dropping the reporter cancels its timer; [`ProgressReporter::stop`]
/// additionally waits for the final report.
pub struct ProgressReporter {
    token: CancellationToken,
    handle: JoinHandle<()>,
    _guard: DropGuard,
}

impl ProgressReporter {
    pub fn spawn<B: ProgressBackend + 'static>(
        tracker: ProgressTracker<B>,
        module: ModuleRef,
        percentage: watch::Receiver<u8>,
        every: Duration,
    ) -> Self {
        let token = CancellationToken::new();
        let handle = tokio::spawn(report_loop(
            tracker,
            module,
            percentage,
            every.max(MIN_INTERVAL),
            token.clone(),
        ));
        Self {
            _guard: token.clone().drop_guard(),
            token,
            handle,
        }
    }

    pub async fn stop(self) {
        self.token.cancel();
        if let Err(error) = self.handle.await {
            tracing::warn!(error = &error as &dyn Error, "progress reporter task failed");
        }
    }
}

async fn report_loop<B: ProgressBackend>(
    tracker: ProgressTracker<B>,
    module: ModuleRef,
    percentage: watch::Receiver<u8>,
    every: Duration,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut reported = 0;

    loop {
        tokio::select! {
            () = token.cancelled() => break,
            _ = ticker.tick() => {
                reported = report(&tracker, &module, &percentage, reported).await;
            }
        }
    }

    report(&tracker, &module, &percentage, reported).await;
    tracing::debug!(%module, reported, "progress reporter stopped");
}

async fn report<B: ProgressBackend>(
    tracker: &ProgressTracker<B>,
    module: &ModuleRef,
    percentage: &watch::Receiver<u8>,
    reported: u8,
) -> u8 {
    let current = *percentage.borrow();
    if current <= reported {
        return reported;
    }
    match tracker.record(module, current).await {
        Ok(_) | Err(ProgressError::Refresh(_)) => current,
        // Retried on the next tick.
        Err(_) => reported,
    }
}
