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

//! The narrow rendering-context surface the boot core depends on.
//!
//! The actual renderer (scene graph, materials, post pipeline) is an
//! external collaborator. The capability probe only needs enough of it to
//! prove the context came up: acquire it, submit one trivial clear pass,
//! observe no error.

pub mod settings;

pub use settings::{AssetStrategy, QualitySettings, ShadowTier};

use std::fmt;

/// An error surfaced by the rendering context during the capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderContextError {
    /// No usable context could be acquired (adapter/device creation failed).
    ContextUnavailable(String),
    /// The context exists but rejected the trivial clear pass.
    ClearPassFailed(String),
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderContextError::ContextUnavailable(details) => {
                write!(f, "rendering context unavailable: {details}")
            }
            RenderContextError::ClearPassFailed(details) => {
                write!(f, "trivial clear pass failed: {details}")
            }
        }
    }
}

impl std::error::Error for RenderContextError {}

/// Outcome of the capability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Whether the context passed the trivial exercise.
    pub ok: bool,
    /// Diagnostic text when `ok` is `false`.
    pub reason: Option<String>,
}

impl ProbeResult {
    /// A passing result.
    pub fn pass() -> Self {
        Self { ok: true, reason: None }
    }

    /// A failing result carrying its diagnostic reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

/// Minimal surface of a rendering context, as seen by the boot core.
pub trait RenderContext: Send {
    /// Human-readable backend name for diagnostics.
    fn backend_name(&self) -> &str;

    /// Issues a trivial full-frame clear and submits it.
    ///
    /// Must be side-effect-bounded: one cleared frame, no resources left
    /// alive afterwards.
    fn submit_clear_pass(&mut self) -> Result<(), RenderContextError>;
}
