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

//! Aggregated environment inputs for the policy layer.

use pelago_core::platform::{DeviceProfile, EnvironmentMonitor, VisibilityState};

/// The environment state the policy functions are evaluated against.
///
/// The shell refreshes this on resize, media-query, and visibility events,
/// then recomputes quality and tick budgets from the new values.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentContext {
    /// Observed device characteristics.
    pub device: DeviceProfile,
    /// Observed document visibility.
    pub visibility: VisibilityState,
}

impl EnvironmentContext {
    /// Re-reads every input from the monitor.
    ///
    /// Returns `true` when anything changed, so callers know whether the
    /// derived settings need recomputing.
    pub fn refresh(&mut self, monitor: &dyn EnvironmentMonitor) -> bool {
        let next = Self {
            device: monitor.device_profile(),
            visibility: monitor.visibility(),
        };
        let changed = next.device != self.device || next.visibility != self.visibility;
        if changed {
            log::debug!(
                "EnvironmentContext: device={:?} visibility={:?}",
                next.device,
                next.visibility
            );
            *self = next;
        }
        changed
    }
}
