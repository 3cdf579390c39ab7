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

//! The capability probe: a one-shot viability check of the rendering
//! context.

use pelago_core::renderer::{ProbeResult, RenderContext};
use std::sync::Mutex;

/// Exercises the rendering context once per boot attempt.
///
/// The exercise is minimal and side-effect-bounded: submit one trivial
/// clear pass and observe whether the context objects. The outcome is
/// cached, so repeat calls within an attempt return the stored result
/// without touching the context again; a retry clears the cache through
/// [`CapabilityProbe::reset`] so the new attempt re-probes.
///
/// A failing outcome maps to `BootError::RendererInitFailed` at the call
/// site — the probe itself only reports.
#[derive(Debug, Default)]
pub struct CapabilityProbe {
    outcome: Mutex<Option<ProbeResult>>,
}

impl CapabilityProbe {
    /// Creates a probe that has not run yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the check, or returns the cached outcome if it already ran.
    pub fn run(&self, context: &mut dyn RenderContext) -> ProbeResult {
        let mut slot = self.outcome.lock().unwrap();
        if let Some(cached) = slot.as_ref() {
            return cached.clone();
        }

        let result = match context.submit_clear_pass() {
            Ok(()) => {
                log::info!(
                    "Capability probe passed on '{}' backend.",
                    context.backend_name()
                );
                ProbeResult::pass()
            }
            Err(error) => {
                log::error!(
                    "Capability probe failed on '{}' backend: {error}",
                    context.backend_name()
                );
                ProbeResult::fail(error.to_string())
            }
        };
        *slot = Some(result.clone());
        result
    }

    /// The cached outcome, if the probe has run this attempt.
    pub fn outcome(&self) -> Option<ProbeResult> {
        self.outcome.lock().unwrap().clone()
    }

    /// Clears the cached outcome so the next [`CapabilityProbe::run`]
    /// re-exercises the context. Called on retry.
    pub fn reset(&self) {
        *self.outcome.lock().unwrap() = None;
    }
}
