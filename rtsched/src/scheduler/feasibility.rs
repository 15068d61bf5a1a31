/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Utilisation-based schedulability analysis.
//!
//! # Status: advisory only
//! The Liu & Layland verdict is computed for every Rate Monotonic run and
//! attached to the result.  It never blocks or alters the simulation; the
//! simulated timeline is the ground truth.
//!
//! # Theory
//! **Liu & Layland (1973)**: under Rate Monotonic scheduling a set of `n`
//! independent periodic tasks is schedulable on one processor if
//!
//! $$U = \sum_{i=1}^{n} \frac{C_i}{T_i} \leq n \left(2^{1/n} - 1\right)$$
//!
//! The condition is sufficient, not necessary.
//!
//! | n | Bound |
//! |---|---|
//! | 1 | 1.000 |
//! | 2 | 0.828 |
//! | 3 | 0.780 |
//! | 4 | 0.757 |
//! | ∞ | ln(2) ≈ 0.693 |
//!
//! Between the bound and `1.0` the task set may or may not be schedulable;
//! above `1.0` no uniprocessor policy can meet every deadline.

use crate::task::Task;

/// Compute the Liu & Layland utilisation bound for `n` tasks.
///
/// Returns `0.0` for `n = 0`.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (2.0_f64.powf(1.0 / nf) - 1.0)
}

/// Total utilisation `Σ wcet / period`.  Zero-period tasks contribute nothing.
pub fn total_utilization(tasks: &[Task]) -> f64 {
    tasks.iter().map(Task::utilization).sum()
}

/// Rate Monotonic schedulability verdict: the `(U, L, schedulable_hint)`
/// triple reported next to an RM simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmFeasibility {
    /// Total utilisation of the task set.
    pub utilization: f64,
    /// Liu & Layland bound for the task count.
    pub bound: f64,
    /// `utilization <= bound`.
    pub schedulable_hint: bool,
}

impl RmFeasibility {
    /// Evaluate the Liu & Layland test for `tasks`.
    pub fn evaluate(tasks: &[Task]) -> Self {
        let utilization = total_utilization(tasks);
        let bound = liu_layland_bound(tasks.len());
        Self {
            utilization,
            bound,
            schedulable_hint: utilization <= bound,
        }
    }

    /// Headroom below the bound; negative when the bound is exceeded.
    pub fn slack(&self) -> f64 {
        self.bound - self.utilization
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
