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

//! The boot state machine.

use pelago_core::boot::{BootError, BootEvent, BootPhase, BootSnapshot};
use pelago_core::event::EventBus;
use std::sync::Mutex;

/// The single authority over the boot record for a shell's lifetime.
///
/// All mutation funnels through the four transition methods; reads are
/// unrestricted through [`BootSequencer::snapshot`]. Every transition holds
/// the state lock across its check and its mutation, so the first transition
/// out of `Booting` wins and every later-arriving completion or failure
/// signal for the same attempt observes the guard and becomes a no-op. The
/// idempotent state check is the sole concurrency mechanism — multiple
/// subsystems (renderer creation, first-frame signal, individual asset
/// loads) may all race to call [`BootSequencer::complete`] safely.
///
/// Construct one per shell and share it via `Arc`. Nothing here is global;
/// tests run any number of independent sequencers.
#[derive(Debug)]
pub struct BootSequencer {
    state: Mutex<BootSnapshot>,
    events: EventBus<BootEvent>,
}

impl BootSequencer {
    /// Creates a sequencer already in `Booting` for attempt 1.
    pub fn new() -> Self {
        log::info!("Boot attempt 1 started.");
        Self {
            state: Mutex::new(BootSnapshot::default()),
            events: EventBus::new(),
        }
    }

    /// A copy of the current boot record.
    pub fn snapshot(&self) -> BootSnapshot {
        *self.state.lock().unwrap()
    }

    /// The current phase.
    pub fn phase(&self) -> BootPhase {
        self.snapshot().phase
    }

    /// The current boot attempt number.
    pub fn attempt(&self) -> u64 {
        self.snapshot().attempt
    }

    /// The bus carrying [`BootEvent`]s to the shell observer.
    pub fn events(&self) -> &EventBus<BootEvent> {
        &self.events
    }

    /// `Booting -> Running`. No-op unless currently `Booting`.
    ///
    /// Returns whether the transition took effect. Duplicate completion
    /// signals from subsystems racing to report success are expected and
    /// harmless.
    pub fn complete(&self) -> bool {
        let snap = {
            let mut state = self.state.lock().unwrap();
            if state.phase != BootPhase::Booting {
                return false;
            }
            state.phase = BootPhase::Running;
            *state
        };
        log::info!("Boot attempt {} complete; entering Running.", snap.attempt);
        self.events.publish(BootEvent::PhaseChanged(snap));
        true
    }

    /// `Booting -> Degraded`, recording why. No-op unless currently
    /// `Booting`.
    ///
    /// Fatal to the fast path only; always recoverable through
    /// [`BootSequencer::retry`] or
    /// [`BootSequencer::continue_in_degraded_mode`].
    pub fn fail(&self, error: BootError) -> bool {
        let snap = {
            let mut state = self.state.lock().unwrap();
            if state.phase != BootPhase::Booting {
                return false;
            }
            state.phase = BootPhase::Degraded;
            state.safe_mode = true;
            state.error = Some(error);
            *state
        };
        log::warn!(
            "Boot attempt {} failed ({error}); entering Degraded.",
            snap.attempt
        );
        self.events.publish(BootEvent::PhaseChanged(snap));
        true
    }

    /// `{Running|Degraded} -> Booting` for a fresh attempt, clearing the
    /// error and safe mode. No-op while already `Booting`.
    pub fn retry(&self) -> bool {
        let snap = {
            let mut state = self.state.lock().unwrap();
            if state.phase == BootPhase::Booting {
                return false;
            }
            state.phase = BootPhase::Booting;
            state.error = None;
            state.safe_mode = false;
            state.attempt += 1;
            *state
        };
        log::info!("Retry requested; boot attempt {} started.", snap.attempt);
        self.events.publish(BootEvent::PhaseChanged(snap));
        true
    }

    /// `Degraded -> Running` while keeping safe mode set: the user accepts
    /// running permanently under reduced quality without re-attempting a
    /// full boot. Clears the error. No-op unless currently `Degraded`.
    pub fn continue_in_degraded_mode(&self) -> bool {
        let snap = {
            let mut state = self.state.lock().unwrap();
            if state.phase != BootPhase::Degraded {
                return false;
            }
            state.phase = BootPhase::Running;
            state.error = None;
            *state
        };
        log::info!(
            "Continuing in degraded mode (attempt {}).",
            snap.attempt
        );
        self.events.publish(BootEvent::PhaseChanged(snap));
        true
    }

    /// Watchdog entry point: `fail(BootTimeout)` if, and only if, the
    /// sequencer is still `Booting` *the same attempt* the timer was armed
    /// for. Both checks happen under the state lock, so a stale timer that
    /// outlived a retry can never corrupt the newer attempt.
    pub fn expire_attempt(&self, attempt: u64) -> bool {
        let snap = {
            let mut state = self.state.lock().unwrap();
            if state.phase != BootPhase::Booting || state.attempt != attempt {
                return false;
            }
            state.phase = BootPhase::Degraded;
            state.safe_mode = true;
            state.error = Some(BootError::BootTimeout);
            *state
        };
        log::warn!(
            "Boot attempt {} timed out; entering Degraded.",
            snap.attempt
        );
        self.events.publish(BootEvent::PhaseChanged(snap));
        true
    }
}

impl Default for BootSequencer {
    fn default() -> Self {
        Self::new()
    }
}
