/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Uniprocessor scheduling simulator.
//!
//! [`Simulator::simulate`] runs one periodic task set under EDF, DM or RM for
//! exactly one hyperperiod and returns a [`Simulation`]: the jobs with their
//! final budgets, the per-tick [`Timeline`], the compacted [`Interval`]s, a
//! [`JobReport`] per job and, for RM, the Liu & Layland verdict.
//!
//! ```text
//! tasks ──validate──► assign priorities ──► hyperperiod ──► generate jobs
//!                                                                │
//!        reports ◄── analyze ◄── compact ◄── Timeline ◄── dispatch ◄┘
//! ```
//!
//! # Design notes
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless `simulate()`; every run owns its tasks and jobs |
//! | Policies | One dispatch loop, policy only supplies the selection key |
//! | Priorities | Assigners return a new `Vec<Task>`; the caller's slice is never mutated |
//! | Errors | Validation up front, `Result<Simulation, SimError>` with typed variants |
//! | Deadline misses | Data in the result, never an error |
//! | Thread safety | `Send + Sync`; independent scenarios may run in parallel |
//!
//! # Example
//! ```rust
//! use rtsched::scheduler::{Policy, Simulator};
//! use rtsched::task::Task;
//!
//! let tasks = vec![Task::new("T1", 10, 10, 4)];
//! let sim = Simulator::new().simulate(&tasks, Policy::Rm).unwrap();
//! assert_eq!(sim.hyperperiod, 10);
//! assert!(sim.missed().is_empty());
//! ```

pub mod dispatch;
pub mod error;
pub mod feasibility;
pub mod jobs;
pub mod outcome;
pub mod priority;
pub mod timeline;

pub use dispatch::{dispatch, dispatch_by, Policy};
pub use error::{HorizonReason, InputReason, SimError};
pub use feasibility::RmFeasibility;
pub use outcome::{DeadlineOutcome, JobReport};
pub use timeline::{Interval, Timeline};

use std::collections::{BTreeMap, HashSet};

use tracing::{info, warn};

use crate::hyperperiod::{HyperperiodCalculator, DEFAULT_HYPERPERIOD_LIMIT};
use crate::task::{Job, Task};

use feasibility::total_utilization;
use jobs::generate_jobs;
use priority::{assign_deadline_monotonic, assign_rate_monotonic, clear_priorities};

// ── Validation ────────────────────────────────────────────────────────────────

/// Reject malformed task sets before any job is generated.
///
/// Checks (in order): non-empty set; per task a non-blank unique name and
/// non-zero period, deadline and WCET.  The first failure is returned.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), SimError> {
    if tasks.is_empty() {
        return Err(SimError::InvalidInput(InputReason::EmptyTaskSet));
    }

    let mut names: HashSet<&str> = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        let reason = if task.name.trim().is_empty() {
            Some(InputReason::EmptyName { index })
        } else if !names.insert(task.name.as_str()) {
            Some(InputReason::DuplicateName {
                task: task.name.clone(),
            })
        } else if task.period == 0 {
            Some(InputReason::ZeroPeriod {
                task: task.name.clone(),
            })
        } else if task.deadline == 0 {
            Some(InputReason::ZeroDeadline {
                task: task.name.clone(),
            })
        } else if task.wcet == 0 {
            Some(InputReason::ZeroWcet {
                task: task.name.clone(),
            })
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(SimError::InvalidInput(reason));
        }
    }

    Ok(())
}

// ── Simulation (result) ───────────────────────────────────────────────────────

/// Outcome of one simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Policy the run used.
    pub policy: Policy,

    /// The task set with the priorities actually used (input order).
    pub tasks: Vec<Task>,

    /// Simulation horizon.
    pub hyperperiod: u64,

    /// Every job released in the hyperperiod, with its final budget.
    pub jobs: Vec<Job>,

    /// Which job ran at each tick.
    pub timeline: Timeline,

    /// `timeline` compacted into contiguous runs.
    pub intervals: Vec<Interval>,

    /// One report per job, in `jobs` order.
    pub reports: Vec<JobReport>,

    /// Liu & Layland verdict; `Some` only for RM runs.
    pub rm_feasibility: Option<RmFeasibility>,
}

impl Simulation {
    /// Total utilisation of the task set.
    pub fn utilization(&self) -> f64 {
        total_utilization(&self.tasks)
    }

    /// Reports of jobs that missed their deadline.
    pub fn missed(&self) -> Vec<&JobReport> {
        self.reports
            .iter()
            .filter(|r| r.outcome == DeadlineOutcome::Missed)
            .collect()
    }

    /// Reports of jobs that ran in more than one interval.
    pub fn preempted(&self) -> Vec<&JobReport> {
        self.reports.iter().filter(|r| r.was_preempted()).collect()
    }

    /// Sum of preemptions over all jobs.
    pub fn total_preemptions(&self) -> usize {
        self.reports.iter().map(JobReport::preemptions).sum()
    }

    /// Reports of jobs left incomplete with a deadline at or beyond the
    /// horizon.
    pub fn unresolved(&self) -> Vec<&JobReport> {
        self.reports
            .iter()
            .filter(|r| r.outcome == DeadlineOutcome::Unresolved)
            .collect()
    }

    /// Release ticks per task name – the activation markers of a diagram.
    pub fn releases(&self) -> BTreeMap<&str, Vec<u64>> {
        let mut map: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
        for job in &self.jobs {
            map.entry(job.task_name.as_str()).or_default().push(job.release);
        }
        map
    }

    /// Reports belonging to `task`, in sequence order.
    pub fn reports_for<'a>(&'a self, task: &'a str) -> impl Iterator<Item = &'a JobReport> + 'a {
        self.reports.iter().filter(move |r| r.task_name == task)
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// Holds only configuration (the hyperperiod limit).  All per-run state is
/// allocated inside [`simulate`](Self::simulate) and returned to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simulator {
    hyperperiod: HyperperiodCalculator,
}

impl Simulator {
    /// Create a simulator with [`DEFAULT_HYPERPERIOD_LIMIT`].
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HYPERPERIOD_LIMIT)
    }

    /// Create a simulator that refuses hyperperiods above `limit` ticks.
    pub fn with_limit(limit: u64) -> Self {
        Self {
            hyperperiod: HyperperiodCalculator::with_limit(limit),
        }
    }

    /// The configured hyperperiod limit.
    pub fn limit(&self) -> u64 {
        self.hyperperiod.limit()
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Simulate `tasks` under `policy` for one hyperperiod.
    ///
    /// # Errors
    /// * [`SimError::InvalidInput`] – empty set, blank or duplicate name, or a
    ///   zero period / deadline / WCET.
    /// * [`SimError::InvalidHorizon`] – hyperperiod overflow or above the
    ///   configured limit.
    ///
    /// Unschedulable task sets are **not** errors.
    pub fn simulate(&self, tasks: &[Task], policy: Policy) -> Result<Simulation, SimError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        validate_tasks(tasks)?;

        info!(
            policy = %policy,
            task_count = tasks.len(),
            "=== Simulator::simulate() ==="
        );

        // ── Priorities ────────────────────────────────────────────────────────
        let (tasks, rm_feasibility) = match policy {
            Policy::Edf => (clear_priorities(tasks), None),
            Policy::Dm => (assign_deadline_monotonic(tasks), None),
            Policy::Rm => {
                let (ranked, verdict) = assign_rate_monotonic(tasks);
                Self::log_rm_verdict(&verdict);
                (ranked, Some(verdict))
            }
        };

        let utilization = total_utilization(&tasks);
        if utilization > 1.0 {
            warn!(
                utilization,
                "task set overloads the processor"
            );
        }

        // ── Horizon and jobs ──────────────────────────────────────────────────
        let hyperperiod = self.hyperperiod.calculate(&tasks)?;
        let mut jobs = generate_jobs(&tasks, hyperperiod);

        // ── Dispatch and post-processing ──────────────────────────────────────
        let timeline = dispatch(&mut jobs, hyperperiod, policy)?;
        let intervals = timeline.compact(&jobs);
        let reports = outcome::analyze(&jobs, &intervals, hyperperiod);

        let simulation = Simulation {
            policy,
            tasks,
            hyperperiod,
            jobs,
            timeline,
            intervals,
            reports,
            rm_feasibility,
        };

        Self::log_summary(&simulation);
        Ok(simulation)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Logging helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn log_rm_verdict(verdict: &RmFeasibility) {
        if verdict.schedulable_hint {
            info!(
                utilization = verdict.utilization,
                bound = verdict.bound,
                slack = verdict.slack(),
                "task set is RM-schedulable (utilization within Liu & Layland bound)"
            );
        } else {
            warn!(
                utilization = verdict.utilization,
                bound = verdict.bound,
                slack = verdict.slack(),
                "task set may not be RM-schedulable (utilization exceeds Liu & Layland bound)"
            );
        }
    }

    fn log_summary(simulation: &Simulation) {
        for report in simulation.missed() {
            warn!(
                task = %report.task_name,
                sequence = report.sequence,
                deadline = report.absolute_deadline,
                finish = ?report.finish,
                remaining = report.remaining,
                "deadline missed"
            );
        }

        info!(
            policy = %simulation.policy,
            hyperperiod = simulation.hyperperiod,
            jobs = simulation.jobs.len(),
            busy = simulation.timeline.busy_ticks(),
            idle = simulation.timeline.idle_ticks(),
            preemptions = simulation.total_preemptions(),
            missed = simulation.missed().len(),
            "=== Simulation complete ==="
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
