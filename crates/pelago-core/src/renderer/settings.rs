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

//! Quality and feature toggles consumed by the rendering subsystems.

use serde::{Deserialize, Serialize};

/// How visual elements source their geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssetStrategy {
    /// Attempt to fetch external model files, with procedural fallback
    /// per element.
    #[default]
    ExternalModels,
    /// Skip external fetches entirely; every element uses its procedural
    /// stand-in.
    ProceduralOnly,
}

/// Shadow fidelity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowTier {
    /// Shadows disabled.
    Off,
    /// Minimum-resolution shadow map.
    Low,
    /// Full-resolution shadow map.
    #[default]
    Full,
}

impl ShadowTier {
    /// Shadow map edge length in texels, or `None` when shadows are off.
    pub fn map_resolution(&self) -> Option<u32> {
        match self {
            ShadowTier::Off => None,
            ShadowTier::Low => Some(1024),
            ShadowTier::Full => Some(2048),
        }
    }
}

/// A collection of quality settings gating what the rendering subsystems
/// are allowed to do.
///
/// This record is the sole output artifact the boot core produces for the
/// visual layers. It is a pure projection of current state — recomputed
/// whenever phase, safe mode, or the device profile changes — and carries no
/// lifecycle of its own. Consumers diff against their previous copy if they
/// need change notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySettings {
    /// Asset-loading strategy for decorative scene elements.
    pub asset_strategy: AssetStrategy,
    /// Upper bound on instanced decorative objects.
    pub instance_budget: u32,
    /// Upper bound on particles.
    pub particle_budget: u32,
    /// Whether the post-processing chain runs at all.
    pub post_processing: bool,
    /// Whether antialiasing is requested on the context.
    pub antialiasing: bool,
    /// Shadow fidelity tier.
    pub shadow_tier: ShadowTier,
    /// Device-pixel-ratio cap applied to the canvas backing store.
    pub pixel_ratio_cap: f32,
    /// Multiplier on default animation durations; values below 1 shorten
    /// them for reduced-motion users.
    pub animation_scale: f32,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            asset_strategy: AssetStrategy::ExternalModels,
            instance_budget: 900,
            particle_budget: 1500,
            post_processing: true,
            antialiasing: true,
            shadow_tier: ShadowTier::Full,
            pixel_ratio_cap: 2.0,
            animation_scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_full_quality() {
        let q = QualitySettings::default();
        assert_eq!(q.asset_strategy, AssetStrategy::ExternalModels);
        assert!(q.post_processing);
        assert!(q.antialiasing);
        assert_eq!(q.shadow_tier.map_resolution(), Some(2048));
        assert_eq!(q.animation_scale, 1.0);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let q = QualitySettings {
            asset_strategy: AssetStrategy::ProceduralOnly,
            shadow_tier: ShadowTier::Low,
            ..QualitySettings::default()
        };
        let json = serde_json::to_string(&q).expect("serialize");
        let back: QualitySettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, q);
    }

    #[test]
    fn shadow_resolutions_are_tiered() {
        assert_eq!(ShadowTier::Off.map_resolution(), None);
        assert!(ShadowTier::Low.map_resolution() < ShadowTier::Full.map_resolution());
    }
}
