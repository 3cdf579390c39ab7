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

//! The boot lifecycle contract shared by the whole viewer shell.
//!
//! These types describe *what* state the application is in during startup;
//! the machinery that mutates them lives in `pelago-boot`. Every rendering
//! subsystem and UI surface reads this contract, nothing outside the
//! sequencer writes it.

use std::fmt;

/// The lifecycle phase the application passes through at startup.
///
/// Exactly one phase holds at any time. Transitions are one-directional
/// except for the explicit retry action, which re-enters [`BootPhase::Booting`]
/// from either terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootPhase {
    /// Startup in progress. Visual output is suppressed or replaced by a
    /// loading indicator.
    #[default]
    Booting,
    /// Terminal success. Normal rendering proceeds.
    Running,
    /// Terminal handled failure. Rendering proceeds under the degraded-mode
    /// quality policy.
    Degraded,
}

/// Why a boot attempt was abandoned.
///
/// Recorded together with the transition into [`BootPhase::Degraded`] and
/// cleared on retry. Carries no payload beyond its kind; it only selects
/// user-facing messaging and diagnostic logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// The watchdog deadline elapsed before boot self-reported done.
    BootTimeout,
    /// The capability probe found the rendering context unusable.
    RendererInitFailed,
    /// Required asset loads exceeded their guard deadline with no fallback.
    AssetLoadTimeout,
    /// Any other exception surfaced during boot.
    GenericInitError,
}

impl BootError {
    /// Plain-language text for the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            BootError::BootTimeout => "Loading took too long, so we switched to a lighter scene.",
            BootError::RendererInitFailed => {
                "Your browser could not start 3D rendering, so we switched to a lighter scene."
            }
            BootError::AssetLoadTimeout => {
                "Some scene files could not be fetched, so we switched to a lighter scene."
            }
            BootError::GenericInitError => {
                "Something went wrong while starting up, so we switched to a lighter scene."
            }
        }
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::BootTimeout => write!(f, "boot watchdog deadline elapsed"),
            BootError::RendererInitFailed => write!(f, "rendering context failed its capability probe"),
            BootError::AssetLoadTimeout => write!(f, "required asset loads timed out with no fallback"),
            BootError::GenericInitError => write!(f, "unclassified error during boot"),
        }
    }
}

impl std::error::Error for BootError {}

/// A point-in-time copy of the boot record.
///
/// `safe_mode` is kept separate from `phase` because the user may accept
/// running permanently under reduced quality: after that choice the phase is
/// [`BootPhase::Running`] while `safe_mode` stays `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootSnapshot {
    /// Current lifecycle phase.
    pub phase: BootPhase,
    /// Why the last boot attempt degraded, if it did.
    pub error: Option<BootError>,
    /// Whether the degraded-mode quality policy is active.
    pub safe_mode: bool,
    /// Monotonically increasing boot attempt number; bumped by each retry.
    pub attempt: u64,
}

impl Default for BootSnapshot {
    fn default() -> Self {
        Self {
            phase: BootPhase::Booting,
            error: None,
            safe_mode: false,
            attempt: 1,
        }
    }
}

/// Events published on the sequencer's bus for the shell observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootEvent {
    /// An effective transition changed the boot record.
    PhaseChanged(BootSnapshot),
    /// A retry was requested; asset collaborators must re-attempt their
    /// loads from scratch.
    ReloadRequested,
}
