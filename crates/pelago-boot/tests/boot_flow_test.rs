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

//! Integration tests for the full boot flow.
//!
//! These tests exercise probe → guarded loads → sequencer → watchdog →
//! recovery as one system, the way the shell drives it, including the
//! quality policy the rendering subsystems would read afterwards.

use pelago_boot::{guard_all, BootConfig, BootSequencer, CapabilityProbe, RecoveryController, Watchdog};
use pelago_control::compute_quality;
use pelago_core::boot::{BootError, BootEvent, BootPhase};
use pelago_core::platform::DeviceProfile;
use pelago_core::renderer::{AssetStrategy, RenderContext, RenderContextError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Helper: a render context whose health is chosen up front.
struct FakeContext {
    healthy: bool,
}

impl RenderContext for FakeContext {
    fn backend_name(&self) -> &str {
        "fake-webgl2"
    }

    fn submit_clear_pass(&mut self) -> Result<(), RenderContextError> {
        if self.healthy {
            Ok(())
        } else {
            Err(RenderContextError::ContextUnavailable(
                "context creation returned null".to_string(),
            ))
        }
    }
}

/// Helper: a fake asset fetch settling after `delay_ms`.
async fn load_asset(delay_ms: u64, succeed: bool) -> Result<&'static str, String> {
    sleep(Duration::from_millis(delay_ms)).await;
    if succeed {
        Ok("glb-bytes")
    } else {
        Err("404".to_string())
    }
}

/// Helper: sequencer + watchdog + probe + controller wired like the shell
/// does it.
fn boot_fixture(config: &BootConfig) -> (Arc<BootSequencer>, Arc<CapabilityProbe>, RecoveryController) {
    let sequencer = Arc::new(BootSequencer::new());
    let watchdog = Arc::new(Watchdog::new(
        Arc::clone(&sequencer),
        config.watchdog_deadline,
    ));
    let probe = Arc::new(CapabilityProbe::new());
    let controller = RecoveryController::new(Arc::clone(&sequencer), watchdog, Arc::clone(&probe));
    (sequencer, probe, controller)
}

// ─────────────────────────────────────────────────────────────────────────────
// Happy path
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_successful_boot_reaches_running_at_full_quality() {
    let config = BootConfig::default();
    let (sequencer, probe, controller) = boot_fixture(&config);
    controller.start();

    let mut context = FakeContext { healthy: true };
    assert!(probe.run(&mut context).ok);

    let report = guard_all(
        config.asset_deadline,
        vec![
            ("model/hull".to_string(), load_asset(120, true)),
            ("model/kelp".to_string(), load_asset(80, true)),
            ("model/whale".to_string(), load_asset(300, true)),
        ],
    )
    .await;
    assert_eq!(report.failures.len(), 0);

    assert!(sequencer.complete());
    // The watchdog deadline passing afterwards must change nothing.
    sleep(config.watchdog_deadline + Duration::from_millis(1)).await;

    let snap = sequencer.snapshot();
    assert_eq!(snap.phase, BootPhase::Running);
    assert_eq!(snap.error, None);
    assert!(!snap.safe_mode);

    let quality = compute_quality(snap.phase, snap.safe_mode, &DeviceProfile::default());
    assert_eq!(quality.asset_strategy, AssetStrategy::ExternalModels);
    assert!(quality.post_processing);
}

#[tokio::test(start_paused = true)]
async fn test_partial_asset_failure_still_completes() {
    let config = BootConfig::default();
    let (sequencer, probe, controller) = boot_fixture(&config);
    controller.start();

    let mut context = FakeContext { healthy: true };
    assert!(probe.run(&mut context).ok);

    let report = guard_all(
        config.asset_deadline,
        vec![
            ("model/hull".to_string(), load_asset(50, true)),
            ("model/kelp".to_string(), load_asset(50, false)),
            ("model/whale".to_string(), load_asset(10000, true)),
        ],
    )
    .await;
    assert!(report.is_partial());
    assert!(!report.all_failed());

    // Per-resource fallback applies; boot still completes.
    assert!(sequencer.complete());
    assert_eq!(sequencer.phase(), BootPhase::Running);
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure paths
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_all_assets_failing_escalates_to_degraded() {
    let config = BootConfig::default();
    let (sequencer, probe, controller) = boot_fixture(&config);
    controller.start();

    let mut context = FakeContext { healthy: true };
    assert!(probe.run(&mut context).ok);

    let report = guard_all(
        config.asset_deadline,
        vec![
            ("model/hull".to_string(), load_asset(10000, true)),
            ("model/kelp".to_string(), load_asset(50, false)),
        ],
    )
    .await;
    assert!(report.all_failed());
    assert!(sequencer.fail(BootError::AssetLoadTimeout));

    let snap = sequencer.snapshot();
    assert_eq!(snap.phase, BootPhase::Degraded);
    assert!(snap.safe_mode);

    let quality = compute_quality(snap.phase, snap.safe_mode, &DeviceProfile::default());
    assert_eq!(quality.asset_strategy, AssetStrategy::ProceduralOnly);
    assert!(!quality.post_processing);
}

#[tokio::test(start_paused = true)]
async fn test_unreported_boot_is_forced_degraded_by_the_watchdog() {
    let config = BootConfig::default();
    let (sequencer, _probe, controller) = boot_fixture(&config);
    controller.start();

    // Nobody ever reports completion or failure.
    sleep(config.watchdog_deadline + Duration::from_millis(1)).await;

    let snap = sequencer.snapshot();
    assert_eq!(snap.phase, BootPhase::Degraded);
    assert_eq!(snap.error, Some(BootError::BootTimeout));
}

// ─────────────────────────────────────────────────────────────────────────────
// End-to-end recovery scenario
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_probe_failure_then_retry_runs_a_fresh_attempt() {
    let config = BootConfig::default();
    let (sequencer, probe, controller) = boot_fixture(&config);
    controller.start();

    // Boot starts; the capability probe fails.
    let mut context = FakeContext { healthy: false };
    let result = probe.run(&mut context);
    assert!(!result.ok);
    assert!(sequencer.fail(BootError::RendererInitFailed));

    // The banner reads the error kind in plain language.
    let snap = sequencer.snapshot();
    assert_eq!(snap.phase, BootPhase::Degraded);
    let banner = snap.error.map(|e| e.user_message()).unwrap_or_default();
    assert!(banner.contains("3D rendering"));

    // The user clicks retry: fresh attempt, fresh probe, fresh watchdog.
    sequencer.events().drain();
    assert!(controller.retry());
    assert_eq!(sequencer.phase(), BootPhase::Booting);
    assert_eq!(sequencer.attempt(), 2);
    assert_eq!(probe.outcome(), None);
    assert!(sequencer.events().drain().contains(&BootEvent::ReloadRequested));

    // The environment recovered; this attempt probes clean and completes.
    let mut recovered = FakeContext { healthy: true };
    assert!(probe.run(&mut recovered).ok);
    assert!(sequencer.complete());
    assert_eq!(sequencer.phase(), BootPhase::Running);

    // And the fresh watchdog from the retry never corrupts the outcome.
    sleep(config.watchdog_deadline + Duration::from_millis(1)).await;
    assert_eq!(sequencer.phase(), BootPhase::Running);
}

#[tokio::test(start_paused = true)]
async fn test_continue_in_degraded_mode_runs_under_safe_quality() {
    let config = BootConfig::default();
    let (sequencer, _probe, controller) = boot_fixture(&config);
    controller.start();

    sequencer.fail(BootError::AssetLoadTimeout);
    assert!(controller.continue_in_degraded_mode());

    let snap = sequencer.snapshot();
    assert_eq!(snap.phase, BootPhase::Running);
    assert_eq!(snap.error, None);
    assert!(snap.safe_mode);

    // Safe-mode quality is never above low-power, which is never above full.
    let low_power = DeviceProfile {
        is_low_power_device: true,
        prefers_reduced_motion: false,
    };
    let safe = compute_quality(snap.phase, snap.safe_mode, &DeviceProfile::default());
    let low = compute_quality(BootPhase::Running, false, &low_power);
    let full = compute_quality(BootPhase::Running, false, &DeviceProfile::default());
    assert!(safe.instance_budget <= low.instance_budget);
    assert!(low.instance_budget <= full.instance_budget);
    assert!(safe.particle_budget <= low.particle_budget);
    assert!(low.particle_budget <= full.particle_budget);
}
