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

//! Abstractions over the hosting environment.
//!
//! The boot core never inspects the browser (or any other host) directly.
//! The shell owns these signals and exposes them through the
//! [`EnvironmentMonitor`] trait; the core treats them as read-only inputs.

use std::fmt;

/// Device characteristics the quality policy keys off.
///
/// Computed once at startup by the environment owner and re-evaluated on
/// resize or media-query changes. Immutable from the boot core's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProfile {
    /// Heuristic low-power classification (small viewport, mobile GPU).
    pub is_low_power_device: bool,
    /// The user asked the platform for reduced motion.
    pub prefers_reduced_motion: bool,
}

/// Whether the document currently has a visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// The tab/window is visible; full tick rate is warranted.
    #[default]
    Visible,
    /// The tab/window is hidden; only housekeeping ticks are warranted.
    Hidden,
}

/// Non-fatal conditions detected at startup.
///
/// Advisories are logged at warn level and surfaced to diagnostics. They are
/// never escalated to a [`BootError`](crate::boot::BootError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StartupAdvisory {
    /// The page is served from a non-network origin (e.g. `file://`), so
    /// external asset fetches are likely to be blocked by the host.
    NonNetworkOrigin,
}

impl fmt::Display for StartupAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupAdvisory::NonNetworkOrigin => {
                write!(f, "served from a non-network origin; external asset loads may be blocked")
            }
        }
    }
}

/// Trait for observing the physical and browser state of the host.
///
/// Implementations belong to the shell. Reads must be cheap; the policy
/// layer re-queries on every input change.
pub trait EnvironmentMonitor: Send + Sync {
    /// Returns the current device profile.
    fn device_profile(&self) -> DeviceProfile;

    /// Returns the current document visibility.
    fn visibility(&self) -> VisibilityState;

    /// Returns any non-fatal conditions worth reporting at startup.
    fn startup_advisories(&self) -> Vec<StartupAdvisory> {
        Vec::new()
    }
}
