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

//! Demo shell: one full boot run against fake collaborators.
//!
//! Failure injection through env vars:
//! - `PELAGO_BREAK_RENDERER=1` — the capability probe fails
//! - `PELAGO_SLOW_ASSETS=1`    — every asset load exceeds its deadline
//! - `PELAGO_LOW_POWER=1`, `PELAGO_REDUCED_MOTION=1`, `PELAGO_HIDDEN=1`,
//!   `PELAGO_FILE_ORIGIN=1`    — environment signals

use pelago_boot::{guard_all, BootConfig, BootSequencer, CapabilityProbe, RecoveryController, Watchdog};
use pelago_control::{compute_quality, compute_tick_budget, EnvironmentContext};
use pelago_core::boot::BootError;
use pelago_core::platform::{
    DeviceProfile, EnvironmentMonitor, StartupAdvisory, VisibilityState,
};
use pelago_core::renderer::{RenderContext, RenderContextError};
use std::sync::Arc;
use std::time::Duration;

fn flag(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| v != "0")
}

/// Environment monitor driven by process env vars.
struct DemoEnvironment {
    profile: DeviceProfile,
    visibility: VisibilityState,
    file_origin: bool,
}

impl DemoEnvironment {
    fn from_process_env() -> Self {
        Self {
            profile: DeviceProfile {
                is_low_power_device: flag("PELAGO_LOW_POWER"),
                prefers_reduced_motion: flag("PELAGO_REDUCED_MOTION"),
            },
            visibility: if flag("PELAGO_HIDDEN") {
                VisibilityState::Hidden
            } else {
                VisibilityState::Visible
            },
            file_origin: flag("PELAGO_FILE_ORIGIN"),
        }
    }
}

impl EnvironmentMonitor for DemoEnvironment {
    fn device_profile(&self) -> DeviceProfile {
        self.profile
    }

    fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    fn startup_advisories(&self) -> Vec<StartupAdvisory> {
        if self.file_origin {
            vec![StartupAdvisory::NonNetworkOrigin]
        } else {
            Vec::new()
        }
    }
}

/// Render context whose health is injected.
struct DemoContext {
    healthy: bool,
}

impl RenderContext for DemoContext {
    fn backend_name(&self) -> &str {
        "demo-webgl2"
    }

    fn submit_clear_pass(&mut self) -> Result<(), RenderContextError> {
        if self.healthy {
            Ok(())
        } else {
            Err(RenderContextError::ContextUnavailable(
                "injected failure".to_string(),
            ))
        }
    }
}

async fn fetch_demo_asset(delay_ms: u64) -> Result<&'static str, String> {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    Ok("glb-bytes")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let environment = DemoEnvironment::from_process_env();
    for advisory in environment.startup_advisories() {
        log::warn!("Advisory: {advisory}");
    }

    // Compressed deadlines so the demo settles quickly.
    let config = BootConfig {
        watchdog_deadline: Duration::from_millis(2000),
        asset_deadline: Duration::from_millis(500),
        ..BootConfig::default()
    };

    let sequencer = Arc::new(BootSequencer::new());
    let watchdog = Arc::new(Watchdog::new(
        Arc::clone(&sequencer),
        config.watchdog_deadline,
    ));
    let probe = Arc::new(CapabilityProbe::new());
    let controller = RecoveryController::new(
        Arc::clone(&sequencer),
        Arc::clone(&watchdog),
        Arc::clone(&probe),
    );
    controller.start();

    let mut context = DemoContext {
        healthy: !flag("PELAGO_BREAK_RENDERER"),
    };
    if probe.run(&mut context).ok {
        let asset_delay = if flag("PELAGO_SLOW_ASSETS") { 10_000 } else { 150 };
        let report = guard_all(
            config.asset_deadline,
            vec![
                ("model/hull".to_string(), fetch_demo_asset(asset_delay)),
                ("model/kelp".to_string(), fetch_demo_asset(asset_delay / 2)),
                ("model/whale".to_string(), fetch_demo_asset(asset_delay / 3)),
            ],
        )
        .await;
        if report.all_failed() {
            sequencer.fail(BootError::AssetLoadTimeout);
        } else {
            sequencer.complete();
        }
    } else {
        sequencer.fail(BootError::RendererInitFailed);
    }
    watchdog.disarm();

    let snap = sequencer.snapshot();
    if let Some(error) = snap.error {
        log::warn!("Banner: {}", error.user_message());
        // The demo user always picks "continue in degraded mode".
        controller.continue_in_degraded_mode();
    }

    let mut env_ctx = EnvironmentContext::default();
    env_ctx.refresh(&environment);

    let snap = sequencer.snapshot();
    let quality = compute_quality(snap.phase, snap.safe_mode, &env_ctx.device);
    let budget = compute_tick_budget(env_ctx.visibility);

    for event in sequencer.events().drain() {
        log::info!("Boot event: {event:?}");
    }
    println!("phase: {:?} (safe mode: {})", snap.phase, snap.safe_mode);
    println!("tick budget: {} Hz", budget.max_hz);
    println!("quality: {}", serde_json::to_string_pretty(&quality)?);

    Ok(())
}
