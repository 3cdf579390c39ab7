// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The boot watchdog: a session-scoped deadline forcing a terminal outcome.

use crate::sequencer::BootSequencer;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Reference deadline for a full boot.
pub const DEFAULT_BOOT_DEADLINE: Duration = Duration::from_millis(8000);

/// Forces the sequencer into `Degraded` with `BootTimeout` if boot does not
/// self-report completion in time.
///
/// Armed on every entry into `Booting` (initial start and each retry). The
/// timer fires through [`BootSequencer::expire_attempt`], which verifies the
/// phase *and* the attempt number under the state lock — so a fire that lost
/// the race to `complete()`/`fail()`, or a stale timer that survived a
/// retry, is a no-op. [`Watchdog::disarm`] aborts the task early as cleanup;
/// correctness never depends on it.
#[derive(Debug)]
pub struct Watchdog {
    sequencer: Arc<BootSequencer>,
    deadline: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Watchdog {
    /// Creates a watchdog for the given sequencer. Does not arm it.
    pub fn new(sequencer: Arc<BootSequencer>, deadline: Duration) -> Self {
        Self {
            sequencer,
            deadline,
            task: Mutex::new(None),
        }
    }

    /// Arms the deadline for the sequencer's current boot attempt,
    /// replacing (and aborting) any previously armed timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&self) {
        let attempt = self.sequencer.attempt();
        let deadline = self.deadline;
        let sequencer = Arc::clone(&self.sequencer);
        log::debug!("Watchdog armed for boot attempt {attempt} ({deadline:?}).");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            if sequencer.expire_attempt(attempt) {
                log::warn!("Watchdog fired: boot attempt {attempt} exceeded {deadline:?}.");
            }
        });

        let mut slot = self.task.lock().unwrap();
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    /// Cancels the armed timer, if any. Safe to call repeatedly.
    pub fn disarm(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
            log::debug!("Watchdog disarmed.");
        }
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pelago_core::boot::{BootError, BootPhase};
    use tokio::time::sleep;

    fn fixture(deadline_ms: u64) -> (Arc<BootSequencer>, Watchdog) {
        let sequencer = Arc::new(BootSequencer::new());
        let watchdog = Watchdog::new(
            Arc::clone(&sequencer),
            Duration::from_millis(deadline_ms),
        );
        (sequencer, watchdog)
    }

    #[tokio::test(start_paused = true)]
    async fn unfinished_boot_times_out_exactly_once() {
        let (sequencer, watchdog) = fixture(8000);
        watchdog.arm();

        sleep(Duration::from_millis(8001)).await;
        let snap = sequencer.snapshot();
        assert_eq!(snap.phase, BootPhase::Degraded);
        assert_eq!(snap.error, Some(BootError::BootTimeout));

        // Nothing further happens after the single fire.
        sleep(Duration::from_millis(20000)).await;
        assert_eq!(sequencer.snapshot(), snap);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_before_deadline_makes_the_fire_inert() {
        let (sequencer, watchdog) = fixture(8000);
        watchdog.arm();

        sleep(Duration::from_millis(1000)).await;
        assert!(sequencer.complete());

        sleep(Duration::from_millis(10000)).await;
        let snap = sequencer.snapshot();
        assert_eq!(snap.phase, BootPhase::Running);
        assert_eq!(snap.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_cannot_corrupt_a_later_attempt() {
        let (sequencer, watchdog) = fixture(8000);
        watchdog.arm();

        sleep(Duration::from_millis(1000)).await;
        sequencer.fail(BootError::RendererInitFailed);
        sequencer.retry();
        // Attempt 2 is booting and nobody re-armed or disarmed; let the
        // attempt-1 timer reach its deadline anyway.
        sleep(Duration::from_millis(10000)).await;
        assert_eq!(sequencer.phase(), BootPhase::Booting);
        assert_eq!(sequencer.attempt(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn rearmed_watchdog_times_out_the_retry_too() {
        let (sequencer, watchdog) = fixture(8000);
        watchdog.arm();

        sleep(Duration::from_millis(8001)).await;
        assert_eq!(sequencer.snapshot().error, Some(BootError::BootTimeout));

        sequencer.retry();
        watchdog.arm();
        sleep(Duration::from_millis(8001)).await;
        let snap = sequencer.snapshot();
        assert_eq!(snap.phase, BootPhase::Degraded);
        assert_eq!(snap.error, Some(BootError::BootTimeout));
        assert_eq!(snap.attempt, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_is_idempotent_and_stops_the_fire() {
        let (sequencer, watchdog) = fixture(8000);
        watchdog.arm();
        watchdog.disarm();
        watchdog.disarm();

        sleep(Duration::from_millis(10000)).await;
        assert_eq!(sequencer.phase(), BootPhase::Booting);
    }
}
