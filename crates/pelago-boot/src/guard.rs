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

//! The resource loader guard: deadline-bounded asynchronous loads.
//!
//! Timeouts here are expected control flow, not exceptions. Callers branch
//! on the outcome: a timed-out load with a procedural fallback falls back;
//! only the no-fallback-available case escalates to the sequencer.

use futures_util::future::join_all;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Why a guarded operation did not produce a value.
#[derive(Debug, PartialEq)]
pub enum GuardError<E> {
    /// The deadline elapsed before the operation settled.
    DeadlineExceeded {
        /// Caller-supplied diagnostic label.
        label: String,
        /// The deadline that elapsed.
        deadline: Duration,
    },
    /// The operation settled with its own error, propagated unchanged.
    Operation {
        /// Caller-supplied diagnostic label.
        label: String,
        /// The operation's error.
        source: E,
    },
}

impl<E> GuardError<E> {
    /// Whether this is the distinguished timeout outcome.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GuardError::DeadlineExceeded { .. })
    }

    /// The diagnostic label of the operation this error belongs to.
    pub fn label(&self) -> &str {
        match self {
            GuardError::DeadlineExceeded { label, .. } => label,
            GuardError::Operation { label, .. } => label,
        }
    }
}

impl<E: fmt::Display> fmt::Display for GuardError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::DeadlineExceeded { label, deadline } => {
                write!(f, "'{label}' exceeded its {deadline:?} deadline")
            }
            GuardError::Operation { label, source } => {
                write!(f, "'{label}' failed: {source}")
            }
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for GuardError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuardError::DeadlineExceeded { .. } => None,
            GuardError::Operation { source, .. } => Some(source),
        }
    }
}

/// Races an asynchronous operation against a deadline.
///
/// If the operation settles first its result or error propagates unchanged;
/// if the deadline elapses first the guard returns the distinguished
/// timeout error. A zero deadline is a deterministic immediate timeout —
/// the operation is not polled at all.
///
/// On timeout the wrapped future is dropped. Whatever external work it had
/// dispatched (an in-flight fetch, a decode) is abandoned rather than
/// awaited; drop-time cleanup is the only cancellation performed. This is a
/// client-side wait bound, not a cancellation primitive.
pub async fn guard<T, E, F>(label: &str, deadline: Duration, operation: F) -> Result<T, GuardError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    if deadline.is_zero() {
        log::warn!("Guard '{label}': zero deadline, timing out without polling.");
        return Err(GuardError::DeadlineExceeded {
            label: label.to_owned(),
            deadline,
        });
    }

    match tokio::time::timeout(deadline, operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(GuardError::Operation {
            label: label.to_owned(),
            source,
        }),
        Err(_elapsed) => {
            log::warn!("Guard '{label}': deadline of {deadline:?} exceeded.");
            Err(GuardError::DeadlineExceeded {
                label: label.to_owned(),
                deadline,
            })
        }
    }
}

/// Outcome of a batch of independently guarded loads.
#[derive(Debug)]
pub struct BatchReport<T, E> {
    /// Labels and values of the loads that settled in time.
    pub successes: Vec<(String, T)>,
    /// Labels and errors of the loads that failed or timed out.
    pub failures: Vec<(String, GuardError<E>)>,
}

impl<T, E> BatchReport<T, E> {
    /// Number of loads in the batch.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Every load failed. The caller is expected to escalate to the
    /// degraded-mode policy; per-resource fallback covers anything less.
    pub fn all_failed(&self) -> bool {
        self.successes.is_empty() && !self.failures.is_empty()
    }

    /// Some loads failed, some succeeded.
    pub fn is_partial(&self) -> bool {
        !self.successes.is_empty() && !self.failures.is_empty()
    }
}

/// Guards each operation with the same deadline and waits for all of them.
///
/// Failures stay independent: one load timing out never aborts its
/// siblings, and the batch itself always resolves to a report rather than
/// an error. Runs on the caller's task.
pub async fn guard_all<T, E, F>(deadline: Duration, operations: Vec<(String, F)>) -> BatchReport<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let guarded = operations.into_iter().map(|(label, operation)| async move {
        let outcome = guard(&label, deadline, operation).await;
        (label, outcome)
    });

    let mut report = BatchReport {
        successes: Vec::new(),
        failures: Vec::new(),
    };
    for (label, outcome) in join_all(guarded).await {
        match outcome {
            Ok(value) => report.successes.push((label, value)),
            Err(error) => report.failures.push((label, error)),
        }
    }

    if report.all_failed() {
        log::error!("All {} guarded loads failed.", report.total());
    } else if !report.failures.is_empty() {
        log::warn!(
            "{} of {} guarded loads failed; per-resource fallbacks apply.",
            report.failures.len(),
            report.total()
        );
    }
    report
}

/// Attempts an operation up to `max_attempts` times with exponentially
/// increasing delay between attempts, surfacing the final failure only once
/// the bound is exhausted. Composes with [`guard`] by passing a guarded
/// closure.
pub async fn retry_with_backoff<T, E, F, Fut>(
    label: &str,
    max_attempts: u32,
    initial_delay: Duration,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let attempts = max_attempts.max(1);
    let mut delay = initial_delay;
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= attempts {
                    log::error!("'{label}': attempt {attempt}/{attempts} failed ({error}); giving up.");
                    return Err(error);
                }
                log::warn!(
                    "'{label}': attempt {attempt}/{attempts} failed ({error}); retrying in {delay:?}."
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
        }
    }
}
