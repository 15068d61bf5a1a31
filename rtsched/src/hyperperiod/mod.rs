/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Hyperperiod calculation.
//!
//! The hyperperiod of a periodic task set is the least common multiple of all
//! task periods: the window after which the whole schedule repeats, and
//! therefore the simulation horizon.
//!
//! | Failure | Variant |
//! |---|---|
//! | no periods at all | [`HyperperiodError::NoPeriods`] |
//! | a period of zero | [`HyperperiodError::ZeroPeriod`] |
//! | LCM does not fit in `u64` | [`HyperperiodError::Overflow`] |
//! | LCM above the caller's sanity limit | [`HyperperiodError::TooLarge`] |
//!
//! [`hyperperiod`] is the pure calculation.  [`HyperperiodCalculator`] adds the
//! limit check; pathological period sets (pairwise coprime values) make the
//! LCM explode, and a run always costs exactly `H` ticks.

pub mod math;

use tracing::{debug, info, warn};

use crate::task::Task;
use math::lcm_of_periods;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default upper limit on the hyperperiod, in ticks.
pub const DEFAULT_HYPERPERIOD_LIMIT: u64 = 1_000_000;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur during hyperperiod calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyperperiodError {
    /// The period list was empty.
    NoPeriods,

    /// The period at `index` is zero.
    ZeroPeriod { index: usize },

    /// LCM calculation overflowed `u64` while combining `a` and `b`.
    Overflow { a: u64, b: u64 },

    /// The hyperperiod exceeded the configured limit.
    TooLarge { value: u64, limit: u64 },
}

impl std::fmt::Display for HyperperiodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HyperperiodError::NoPeriods => write!(f, "no periods to combine"),
            HyperperiodError::ZeroPeriod { index } => {
                write!(f, "period at position {index} is zero")
            }
            HyperperiodError::Overflow { a, b } => {
                write!(f, "LCM overflow computing lcm({a}, {b})")
            }
            HyperperiodError::TooLarge { value, limit } => {
                write!(f, "hyperperiod {value} ticks exceeds limit {limit} ticks")
            }
        }
    }
}

impl std::error::Error for HyperperiodError {}

// ── Pure calculation ──────────────────────────────────────────────────────────

/// Least common multiple of `periods`, folded left to right.
///
/// ```rust
/// use rtsched::hyperperiod::hyperperiod;
///
/// assert_eq!(hyperperiod(&[20, 15, 10, 20]).unwrap(), 60);
/// assert!(hyperperiod(&[]).is_err());
/// ```
pub fn hyperperiod(periods: &[u64]) -> Result<u64, HyperperiodError> {
    lcm_of_periods(periods)
}

// ── HyperperiodCalculator ─────────────────────────────────────────────────────

/// Computes the hyperperiod of a task set and enforces a sanity limit.
///
/// Holds no per-run state, so one calculator can serve any number of
/// scenarios.
#[derive(Debug, Clone, Copy)]
pub struct HyperperiodCalculator {
    limit: u64,
}

impl HyperperiodCalculator {
    /// Create a calculator with [`DEFAULT_HYPERPERIOD_LIMIT`].
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_HYPERPERIOD_LIMIT,
        }
    }

    /// Create a calculator with a custom limit (in ticks).
    pub fn with_limit(limit: u64) -> Self {
        Self { limit }
    }

    /// The configured limit.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Calculate the hyperperiod of `tasks`.
    ///
    /// # Errors
    /// Any [`HyperperiodError`]; `TooLarge` when the LCM exceeds the limit
    /// (a value exactly at the limit is accepted).
    pub fn calculate(&self, tasks: &[Task]) -> Result<u64, HyperperiodError> {
        let periods: Vec<u64> = tasks.iter().map(|t| t.period).collect();
        let hyperperiod = lcm_of_periods(&periods)?;

        if hyperperiod > self.limit {
            warn!(
                hyperperiod,
                limit = self.limit,
                "Hyperperiod exceeds configured limit"
            );
            return Err(HyperperiodError::TooLarge {
                value: hyperperiod,
                limit: self.limit,
            });
        }

        let unique_periods = {
            let mut v = periods;
            v.sort_unstable();
            v.dedup();
            v
        };

        info!(
            task_count = tasks.len(),
            unique_count = unique_periods.len(),
            hyperperiod,
            "Calculated hyperperiod"
        );
        for p in &unique_periods {
            debug!(period = p, jobs = hyperperiod / p, "  unique period");
        }

        Ok(hyperperiod)
    }
}

impl Default for HyperperiodCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn make_task(name: &str, period: u64) -> Task {
        Task::new(name, period, period, 1)
    }

    #[test]
    fn pure_hyperperiod_matches_lcm() {
        assert_eq!(hyperperiod(&[4, 6]).unwrap(), 12);
        assert_eq!(hyperperiod(&[5, 7]).unwrap(), 35);
    }

    #[test]
    fn pure_hyperperiod_is_deterministic() {
        let periods = [20, 15, 10, 20];
        let first = hyperperiod(&periods).unwrap();
        for _ in 0..10 {
            assert_eq!(hyperperiod(&periods).unwrap(), first);
        }
    }

    #[test]
    fn calculator_handles_repeated_periods() {
        let tasks = vec![
            make_task("t1", 20),
            make_task("t2", 15),
            make_task("t3", 10),
            make_task("t4", 20),
        ];
        assert_eq!(HyperperiodCalculator::new().calculate(&tasks).unwrap(), 60);
    }

    #[test]
    fn calculator_rejects_empty_task_set() {
        let err = HyperperiodCalculator::new().calculate(&[]).unwrap_err();
        assert_eq!(err, HyperperiodError::NoPeriods);
    }

    #[test]
    fn calculator_rejects_zero_period() {
        let tasks = vec![make_task("ok", 10), make_task("bad", 0)];
        let err = HyperperiodCalculator::new().calculate(&tasks).unwrap_err();
        assert_eq!(err, HyperperiodError::ZeroPeriod { index: 1 });
    }

    #[test]
    fn hyperperiod_exceeding_limit_returns_too_large_error() {
        let tasks = vec![make_task("a", 7), make_task("b", 11), make_task("c", 13)];
        let err = HyperperiodCalculator::with_limit(1_000)
            .calculate(&tasks)
            .unwrap_err();
        assert_eq!(
            err,
            HyperperiodError::TooLarge {
                value: 1_001,
                limit: 1_000
            }
        );
    }

    #[test]
    fn hyperperiod_at_exactly_the_limit_is_accepted() {
        let tasks = vec![make_task("a", 50)];
        let h = HyperperiodCalculator::with_limit(50).calculate(&tasks).unwrap();
        assert_eq!(h, 50);
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            HyperperiodError::ZeroPeriod { index: 3 }.to_string(),
            "period at position 3 is zero"
        );
        assert!(HyperperiodError::TooLarge {
            value: 10,
            limit: 5
        }
        .to_string()
        .contains("exceeds limit"));
    }
}
