/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the rtsched simulation engine.
//!
//! Two distinct types model the two sides of the simulation pipeline:
//!
//! ```text
//! scenario  ──►  Task  ──(priority assigner)──►  Task  ──(job generator)──►  Job  ──(dispatch)──►  Timeline
//!                 ↑ static definition            ↑ ranked copy               ↑ one activation, mutated tick by tick
//! ```
//!
//! # Ownership model
//! `Task` values are owned by the scenario and never mutated by the engine:
//! priority assignment produces a fresh `Vec<Task>`.  `Job` values are owned
//! by one simulation run; the dispatcher is the only code that decrements
//! [`Job::remaining`], and jobs are kept after completion so the outcome of
//! each one can be inspected once the run is over.

// ── Priority ──────────────────────────────────────────────────────────────────

/// Scheduling priority of a task.
///
/// Replaces the "optional integer, `None` under EDF" representation with a
/// typed variant so a missing rank can never be confused with a real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// No static rank: the job is ordered dynamically (EDF).
    #[default]
    Dynamic,
    /// Static rank assigned by DM or RM.  `1` is the highest priority.
    Fixed(u32),
}

impl Priority {
    /// Returns the static rank, or `None` for [`Priority::Dynamic`].
    pub fn rank(self) -> Option<u32> {
        match self {
            Priority::Dynamic => None,
            Priority::Fixed(rank) => Some(rank),
        }
    }

    /// Ordering key used by the fixed-priority policies.
    ///
    /// A dynamic priority sorts after every fixed rank.
    pub fn sort_key(self) -> u64 {
        match self {
            Priority::Dynamic => u64::MAX,
            Priority::Fixed(rank) => u64::from(rank),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Dynamic => write!(f, "dynamic"),
            Priority::Fixed(rank) => write!(f, "P{rank}"),
        }
    }
}

// ── Task (static definition) ──────────────────────────────────────────────────

/// A periodic real-time task.
///
/// All timing values are integer ticks.  `wcet <= period` is expected but not
/// enforced; an overloaded task set is a valid (if unschedulable) scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    /// Unique task name within a scenario.
    pub name: String,

    /// Activation period.
    pub period: u64,

    /// Relative deadline, measured from each release.
    pub deadline: u64,

    /// Worst-case execution time.
    pub wcet: u64,

    /// Static priority, filled by the DM / RM assigners.
    pub priority: Priority,
}

impl Task {
    /// Create an unranked task.
    pub fn new(name: impl Into<String>, period: u64, deadline: u64, wcet: u64) -> Self {
        Self {
            name: name.into(),
            period,
            deadline,
            wcet,
            priority: Priority::Dynamic,
        }
    }

    /// Processor utilisation fraction: `wcet / period`.
    ///
    /// Returns `0.0` when `period` is zero to avoid division by zero.
    pub fn utilization(&self) -> f64 {
        if self.period == 0 {
            0.0
        } else {
            self.wcet as f64 / self.period as f64
        }
    }

    /// Returns a copy of this task carrying `priority`.
    pub fn with_priority(&self, priority: Priority) -> Self {
        Self {
            priority,
            ..self.clone()
        }
    }
}

// ── Job (one activation) ──────────────────────────────────────────────────────

/// Identity of a job: owning task name plus 1-based release count.
///
/// The timeline compactor and the outcome analysis group by this key rather
/// than by position in the job vector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobKey {
    pub task_name: String,
    pub sequence: u32,
}

impl std::fmt::Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.task_name, self.sequence)
    }
}

/// One activation of a [`Task`] inside the hyperperiod.
///
/// # Lifecycle
/// `Unreleased → Ready → Running → (Ready → Running)* → Completed`.
/// `remaining` starts at `wcet` and only decreases; once it reaches zero the
/// job is terminal and the dispatcher never selects it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Name of the owning task.
    pub task_name: String,

    /// Position of the owning task in the task set.
    pub task_index: usize,

    /// 1-based release count of the owning task.
    pub sequence: u32,

    /// Release tick.
    pub release: u64,

    /// `release + relative deadline`.  May lie beyond the hyperperiod.
    pub absolute_deadline: u64,

    /// Execution budget copied from the task.
    pub wcet: u64,

    /// Priority copied from the task.
    pub priority: Priority,

    remaining: u64,
}

impl Job {
    /// Build the `k`-th (0-based) activation of `task`.
    ///
    /// Saturating arithmetic keeps absurd periods from panicking; such
    /// values never survive hyperperiod validation anyway.
    pub fn from_task(task: &Task, task_index: usize, k: u64) -> Self {
        let release = k.saturating_mul(task.period);
        Job {
            task_name: task.name.clone(),
            task_index,
            sequence: u32::try_from(k.saturating_add(1)).unwrap_or(u32::MAX),
            release,
            absolute_deadline: release.saturating_add(task.deadline),
            wcet: task.wcet,
            priority: task.priority,
            remaining: task.wcet,
        }
    }

    /// Execution time still owed.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Ticks this job has been granted so far.
    pub fn executed(&self) -> u64 {
        self.wcet - self.remaining
    }

    /// `true` once the whole budget has been consumed.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Identity used for interval grouping.
    pub fn key(&self) -> JobKey {
        JobKey {
            task_name: self.task_name.clone(),
            sequence: self.sequence,
        }
    }

    /// Compares identities without allocating a [`JobKey`].
    pub fn same_job(&self, other: &Job) -> bool {
        self.sequence == other.sequence && self.task_name == other.task_name
    }

    /// Run the job for one tick.  Only the dispatcher calls this.
    pub(crate) fn consume_tick(&mut self) {
        debug_assert!(
            self.remaining > 0,
            "job {}#{} selected with no remaining budget",
            self.task_name,
            self.sequence
        );
        self.remaining = self.remaining.saturating_sub(1);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
