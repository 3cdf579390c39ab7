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

//! The degraded-mode quality policy and the performance-budget signal.

use pelago_core::boot::BootPhase;
use pelago_core::platform::{DeviceProfile, VisibilityState};
use pelago_core::renderer::{AssetStrategy, QualitySettings, ShadowTier};

/// Divisor applied to population budgets in safe mode.
const SAFE_MODE_BUDGET_DIVISOR: u32 = 4;

/// Divisor applied to population budgets on low-power devices.
const LOW_POWER_BUDGET_DIVISOR: u32 = 2;

/// Device-pixel-ratio cap on low-power devices.
const LOW_POWER_PIXEL_RATIO_CAP: f32 = 1.5;

/// Animation duration multiplier for reduced-motion users (~2.75x shorter).
const REDUCED_MOTION_ANIMATION_SCALE: f32 = 0.36;

/// Computes the quality settings for the given boot outcome and device.
///
/// Pure function of its inputs; callers re-invoke it whenever any input
/// changes and diff against the previous result themselves.
///
/// Reduction axes, strictest first:
///
/// | Condition | Budgets | Post | AA | Shadows | Pixel ratio | Assets |
/// |---|---|---|---|---|---|---|
/// | Safe mode / Degraded | 1/4 | off | off | off | 1.0 | procedural |
/// | Low-power device | 1/2 | on | on | low tier | 1.5 | external |
/// | Otherwise | full | on | on | full tier | 2.0 | external |
///
/// `prefers_reduced_motion` is an orthogonal axis: on top of any row above,
/// it halves the particle budget again and shortens default animation
/// durations.
pub fn compute_quality(phase: BootPhase, safe_mode: bool, device: &DeviceProfile) -> QualitySettings {
    let mut quality = QualitySettings::default();

    // A Degraded phase implies the safe-mode reductions even if the flag
    // was not set through the usual transition.
    if safe_mode || phase == BootPhase::Degraded {
        quality.asset_strategy = AssetStrategy::ProceduralOnly;
        quality.instance_budget /= SAFE_MODE_BUDGET_DIVISOR;
        quality.particle_budget /= SAFE_MODE_BUDGET_DIVISOR;
        quality.post_processing = false;
        quality.antialiasing = false;
        quality.shadow_tier = ShadowTier::Off;
        quality.pixel_ratio_cap = 1.0;
    } else if device.is_low_power_device {
        quality.instance_budget /= LOW_POWER_BUDGET_DIVISOR;
        quality.particle_budget /= LOW_POWER_BUDGET_DIVISOR;
        quality.shadow_tier = ShadowTier::Low;
        quality.pixel_ratio_cap = LOW_POWER_PIXEL_RATIO_CAP;
    }

    if device.prefers_reduced_motion {
        quality.particle_budget /= 2;
        quality.animation_scale = REDUCED_MOTION_ANIMATION_SCALE;
    }

    quality
}

/// How often the shell should tick its render/animation loop.
///
/// This replaces any direct throttling of an external animation ticker: the
/// core publishes a budget, the shell decides how to honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickBudget {
    /// Maximum useful tick rate.
    pub max_hz: u32,
}

/// Computes the tick budget for the given document visibility.
pub fn compute_tick_budget(visibility: VisibilityState) -> TickBudget {
    match visibility {
        VisibilityState::Visible => TickBudget { max_hz: 60 },
        // Hidden tabs only need housekeeping ticks.
        VisibilityState::Hidden => TickBudget { max_hz: 2 },
    }
}
