//! Completion polling for background interactions
//!
//! Background research finishes on the service's schedule; this module
//! polls at a fixed interval until the interaction leaves `in_progress`
//! or the timeout lapses. Elapsed time is counted in poll intervals, not
//! wall clock, so a slow status query does not shorten the window.

use std::time::Duration;

use tracing::{debug, warn};

use crate::interactions::{ClientError, Interaction, InteractionClient};
use crate::progress::ProgressSink;

/// Polling cadence and patience
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Fixed delay between status queries; no backoff
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl PollSettings {
    /// Settings from whole seconds. Zero intervals are floored to one
    /// second; elapsed time advances in interval steps and a zero step
    /// would never reach any timeout.
    pub fn from_secs(poll_interval_secs: u64, timeout_secs: u64) -> Self {
        Self {
            poll_interval: Duration::from_secs(poll_interval_secs.max(1)),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from_secs(3, 300)
    }
}

/// Progress is capped at 90 until a terminal status is actually observed
fn progress_percent(elapsed: Duration, timeout: Duration) -> u8 {
    if timeout.is_zero() {
        return 90;
    }
    (elapsed.as_millis() * 100 / timeout.as_millis()).min(90) as u8
}

/// Poll an interaction until it completes, fails, or the timeout lapses
///
/// Each poll pushes a progress update to the sink; 100 percent is emitted
/// only on the poll that observes a terminal status. A failed status query
/// is reported to the sink and aborts the loop. Both the failure path and
/// timeout expiry end in one final unconditional query, so the caller
/// always receives the freshest state the service would give us; timing
/// out is not itself an error.
pub async fn await_completion(
    client: &dyn InteractionClient,
    interaction_id: &str,
    settings: PollSettings,
    sink: &mut dyn ProgressSink,
) -> Result<Interaction, ClientError> {
    debug!(
        %interaction_id,
        interval_ms = settings.poll_interval.as_millis() as u64,
        timeout_ms = settings.timeout.as_millis() as u64,
        "await_completion: called"
    );

    let mut elapsed = Duration::ZERO;

    while elapsed < settings.timeout {
        match client.get(interaction_id).await {
            Ok(interaction) => {
                if interaction.status.is_terminal() {
                    debug!(status = %interaction.status, "await_completion: terminal status");
                    sink.update(100, "Complete");
                    return Ok(interaction);
                }

                sink.update(
                    progress_percent(elapsed, settings.timeout),
                    &format!("Researching... ({}s elapsed)", elapsed.as_secs()),
                );

                tokio::time::sleep(settings.poll_interval).await;
                elapsed += settings.poll_interval;
            }
            Err(e) => {
                warn!(%interaction_id, error = %e, "await_completion: status query failed");
                sink.error(&format!("Status check failed: {}", e));
                break;
            }
        }
    }

    debug!(%interaction_id, "await_completion: final status query");
    client.get(interaction_id).await
}
