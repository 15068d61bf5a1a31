/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the simulation engine.
//!
//! * [`InputReason`] – why a task set was rejected (carries the task name).
//! * [`HorizonReason`] – why the simulation horizon is unusable.
//! * [`SimError`] – top-level failure returned by the engine.
//!
//! A task set that misses deadlines is **not** an error: misses and
//! preemptions are reported as data in the simulation result.

use thiserror::Error;

use crate::hyperperiod::HyperperiodError;

// ── Input validation ──────────────────────────────────────────────────────────

/// Detailed reason why a task set failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputReason {
    /// No tasks were supplied.
    EmptyTaskSet,

    /// The task at `index` has an empty (or whitespace-only) name.
    EmptyName { index: usize },

    /// Two tasks share a name; job identity would become ambiguous.
    DuplicateName { task: String },

    /// A task has `period == 0`.
    ZeroPeriod { task: String },

    /// The period at `index` is zero, reported where task names are unknown
    /// (the bare period list handed to the hyperperiod calculation).
    ZeroPeriodAt { index: usize },

    /// A task has `deadline == 0`.
    ZeroDeadline { task: String },

    /// A task has `wcet == 0`.
    ZeroWcet { task: String },
}

impl std::fmt::Display for InputReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputReason::EmptyTaskSet => write!(f, "task set is empty"),
            InputReason::EmptyName { index } => {
                write!(f, "task at position {index} has an empty name")
            }
            InputReason::DuplicateName { task } => {
                write!(f, "task name '{task}' is used more than once")
            }
            InputReason::ZeroPeriod { task } => {
                write!(f, "task '{task}' has a period of zero")
            }
            InputReason::ZeroPeriodAt { index } => {
                write!(f, "period at position {index} is zero")
            }
            InputReason::ZeroDeadline { task } => {
                write!(f, "task '{task}' has a relative deadline of zero")
            }
            InputReason::ZeroWcet { task } => {
                write!(f, "task '{task}' has a worst-case execution time of zero")
            }
        }
    }
}

// ── Horizon ───────────────────────────────────────────────────────────────────

/// Detailed reason why a simulation horizon was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HorizonReason {
    /// A horizon of zero ticks.
    Zero,

    /// The hyperperiod does not fit in `u64`.
    Overflow { a: u64, b: u64 },

    /// The hyperperiod exceeds the caller's limit.
    TooLarge { value: u64, limit: u64 },
}

impl std::fmt::Display for HorizonReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HorizonReason::Zero => write!(f, "horizon must be at least one tick"),
            HorizonReason::Overflow { a, b } => {
                write!(f, "hyperperiod overflows computing lcm({a}, {b})")
            }
            HorizonReason::TooLarge { value, limit } => {
                write!(f, "hyperperiod {value} ticks exceeds limit {limit} ticks")
            }
        }
    }
}

// ── Top-level engine errors ───────────────────────────────────────────────────

/// Top-level error type of the simulation engine.
///
/// Every variant is raised before any job is generated; none is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The task set is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(InputReason),

    /// The simulation horizon is unusable.
    #[error("invalid horizon: {0}")]
    InvalidHorizon(HorizonReason),

    /// A policy name could not be parsed.
    #[error("unknown scheduling policy: '{0}' (valid: edf, dm, rm)")]
    UnknownPolicy(String),
}

impl From<HyperperiodError> for SimError {
    fn from(err: HyperperiodError) -> Self {
        match err {
            HyperperiodError::NoPeriods => SimError::InvalidInput(InputReason::EmptyTaskSet),
            HyperperiodError::ZeroPeriod { index } => {
                SimError::InvalidInput(InputReason::ZeroPeriodAt { index })
            }
            HyperperiodError::Overflow { a, b } => {
                SimError::InvalidHorizon(HorizonReason::Overflow { a, b })
            }
            HyperperiodError::TooLarge { value, limit } => {
                SimError::InvalidHorizon(HorizonReason::TooLarge { value, limit })
            }
        }
    }
}
