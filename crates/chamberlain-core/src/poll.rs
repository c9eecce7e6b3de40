// ── Reconciliation loop ──
//
// Keeps `doorstate` fresh by reading it through its own get-handler,
// then sleeps for a short or long delay depending on whether the door
// has settled at its target. Every outcome leads to another iteration;
// iterations never overlap.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::accessory::GarageDoorOpener;
use crate::config::PollConfig;

/// Source of delays between iterations.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// What one iteration learned about the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Current position matches the target.
    Settled,
    /// Door is moving, or resting somewhere other than the target.
    InTransit,
    /// The read failed; nothing is known this cycle.
    Failed,
}

impl PollConfig {
    /// Pick the delay before the next iteration.
    pub fn delay_for(&self, outcome: PollOutcome) -> Duration {
        match outcome {
            PollOutcome::InTransit => self.active_delay,
            PollOutcome::Settled | PollOutcome::Failed => self.idle_delay,
        }
    }
}

/// Run a single iteration: refresh, then compare against the target.
///
/// Read errors are already reported by the get-handler and are swallowed
/// here.
pub async fn reconcile_once(accessory: &GarageDoorOpener) -> PollOutcome {
    let Ok(current) = accessory.refresh_current().await else {
        return PollOutcome::Failed;
    };

    match accessory.target_state() {
        Some(target) if current.settled_at(target) => PollOutcome::Settled,
        _ => PollOutcome::InTransit,
    }
}

pub(crate) async fn poll_task(
    accessory: Arc<GarageDoorOpener>,
    poll: PollConfig,
    scheduler: Arc<dyn Scheduler>,
) {
    loop {
        let outcome = reconcile_once(&accessory).await;
        let delay = poll.delay_for(outcome);
        debug!(
            accessory = %accessory.name(),
            ?outcome,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "next poll scheduled"
        );
        scheduler.sleep(delay).await;
    }
}
