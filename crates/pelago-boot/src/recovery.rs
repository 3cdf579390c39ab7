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

//! User-triggered recovery actions over the boot machinery.

use crate::probe::CapabilityProbe;
use crate::sequencer::BootSequencer;
use crate::watchdog::Watchdog;
use pelago_core::boot::BootEvent;
use std::sync::Arc;

/// Thin orchestration over the sequencer, watchdog, and probe for the two
/// banner actions.
///
/// Retry re-runs the full boot sequence from scratch; continuing in
/// degraded mode accepts reduced quality and re-triggers nothing.
#[derive(Debug)]
pub struct RecoveryController {
    sequencer: Arc<BootSequencer>,
    watchdog: Arc<Watchdog>,
    probe: Arc<CapabilityProbe>,
}

impl RecoveryController {
    /// Wires the controller over an existing sequencer, watchdog, and
    /// probe.
    pub fn new(
        sequencer: Arc<BootSequencer>,
        watchdog: Arc<Watchdog>,
        probe: Arc<CapabilityProbe>,
    ) -> Self {
        Self {
            sequencer,
            watchdog,
            probe,
        }
    }

    /// Starts the deadline for the first boot attempt. Call once when the
    /// shell begins initialization.
    pub fn start(&self) {
        self.watchdog.arm();
    }

    /// Re-runs the full boot attempt: machine retry, fresh watchdog, fresh
    /// probe, and a reload broadcast telling every asset collaborator to
    /// re-fetch from scratch (no caching of prior failures).
    ///
    /// No-op while a boot attempt is already in flight.
    pub fn retry(&self) -> bool {
        if !self.sequencer.retry() {
            return false;
        }
        self.probe.reset();
        self.watchdog.arm();
        self.sequencer.events().publish(BootEvent::ReloadRequested);
        true
    }

    /// Accepts running permanently under reduced quality. Only the state
    /// machine moves; asset loads are not re-triggered.
    pub fn continue_in_degraded_mode(&self) -> bool {
        let moved = self.sequencer.continue_in_degraded_mode();
        if moved {
            // Releases the spent timer handle; the fire itself is already
            // inert outside Booting.
            self.watchdog.disarm();
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchdog::DEFAULT_BOOT_DEADLINE;
    use pelago_core::boot::{BootError, BootPhase};
    use std::time::Duration;
    use tokio::time::sleep;

    fn fixture() -> (Arc<BootSequencer>, RecoveryController) {
        let sequencer = Arc::new(BootSequencer::new());
        let watchdog = Arc::new(Watchdog::new(
            Arc::clone(&sequencer),
            DEFAULT_BOOT_DEADLINE,
        ));
        let probe = Arc::new(CapabilityProbe::new());
        let controller = RecoveryController::new(Arc::clone(&sequencer), watchdog, probe);
        (sequencer, controller)
    }

    #[tokio::test(start_paused = true)]
    async fn retry_rearms_the_watchdog_and_broadcasts_reload() {
        let (sequencer, controller) = fixture();
        controller.start();
        sequencer.fail(BootError::AssetLoadTimeout);
        sequencer.events().drain();

        assert!(controller.retry());
        let events = sequencer.events().drain();
        assert!(events.contains(&BootEvent::ReloadRequested));

        // The re-armed watchdog times the new attempt out on its own.
        sleep(DEFAULT_BOOT_DEADLINE + Duration::from_millis(1)).await;
        let snap = sequencer.snapshot();
        assert_eq!(snap.phase, BootPhase::Degraded);
        assert_eq!(snap.error, Some(BootError::BootTimeout));
        assert_eq!(snap.attempt, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_is_a_noop_while_booting() {
        let (sequencer, controller) = fixture();
        controller.start();
        sequencer.events().drain();

        assert!(!controller.retry());
        assert!(
            !sequencer.events().drain().contains(&BootEvent::ReloadRequested),
            "no reload broadcast without an effective retry"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn continue_in_degraded_mode_moves_only_the_machine() {
        let (sequencer, controller) = fixture();
        controller.start();
        sequencer.fail(BootError::RendererInitFailed);
        sequencer.events().drain();

        assert!(controller.continue_in_degraded_mode());
        let snap = sequencer.snapshot();
        assert_eq!(snap.phase, BootPhase::Running);
        assert!(snap.safe_mode);
        assert!(
            !sequencer.events().drain().contains(&BootEvent::ReloadRequested),
            "continuing must not re-trigger asset loads"
        );
    }
}
