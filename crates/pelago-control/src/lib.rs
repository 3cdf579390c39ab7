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

//! # Pelago Control
//!
//! Decision logic over observed boot and environment state: the
//! degraded-mode quality policy and the performance-budget signal. Pure
//! functions only — nothing in this crate performs I/O or mutates shared
//! state.

#![warn(missing_docs)]

pub mod context;
pub mod policy;

pub use context::EnvironmentContext;
pub use policy::{compute_quality, compute_tick_budget, TickBudget};
