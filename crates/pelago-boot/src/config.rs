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

//! Deadlines and retry bounds for the boot sequence.

use std::time::Duration;

/// Configuration for a boot run.
///
/// The watchdog deadline is the single authoritative bound on the whole
/// sequence; per-asset deadlines only bound individual loads so that one
/// slow fetch cannot consume the entire budget before the others report.
#[derive(Debug, Clone)]
pub struct BootConfig {
    /// Deadline after which an unfinished boot is forced into `Degraded`.
    pub watchdog_deadline: Duration,
    /// Deadline for each individual guarded asset load.
    pub asset_deadline: Duration,
    /// Attempts per asset load before its failure is reported.
    pub asset_retry_attempts: u32,
    /// Delay before the first asset retry; doubles on each further attempt.
    pub asset_retry_initial_delay: Duration,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            watchdog_deadline: Duration::from_millis(8000),
            asset_deadline: Duration::from_millis(5000),
            asset_retry_attempts: 2,
            asset_retry_initial_delay: Duration::from_millis(250),
        }
    }
}
