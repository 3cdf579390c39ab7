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

//! # Pelago Boot
//!
//! Runtime machinery for the startup sequence: the boot state machine, the
//! watchdog deadline, the resource loader guard, the capability probe, and
//! the recovery controller.
//!
//! The concurrency model is cooperative: state transitions are synchronous
//! and atomic under the sequencer's lock, and the only true concurrency is
//! independent asset loads and the watchdog's timer racing to report an
//! outcome. The first transition out of `Booting` wins; everything that
//! arrives later observes the idempotent guard and becomes a no-op.

#![warn(missing_docs)]

pub mod config;
pub mod guard;
pub mod probe;
pub mod recovery;
pub mod sequencer;
pub mod watchdog;

pub use config::BootConfig;
pub use guard::{guard, guard_all, retry_with_backoff, BatchReport, GuardError};
pub use probe::CapabilityProbe;
pub use recovery::RecoveryController;
pub use sequencer::BootSequencer;
pub use watchdog::{Watchdog, DEFAULT_BOOT_DEADLINE};
