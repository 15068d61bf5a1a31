/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Tick-by-tick uniprocessor dispatcher.
//!
//! One loop serves every policy; the only thing that varies is the selection
//! key extracted from each ready job.  Per tick `t`:
//!
//! 1. **Release** – every job with `release == t` joins the ready set.
//! 2. **Retire** – jobs with no remaining budget leave the ready set.
//! 3. **Select** – the ready job with the smallest key runs for one tick; on
//!    equal keys the job that joined the ready set first wins.  An empty ready
//!    set records an idle tick.
//!
//! Retirement is lazy: a job that finishes during tick `t` is dropped at the
//! start of tick `t + 1`, before selection, so it can never be picked again.

use std::str::FromStr;

use tracing::{debug, trace};

use super::error::{HorizonReason, SimError};
use super::timeline::Timeline;
use crate::task::Job;

// ── Policy ────────────────────────────────────────────────────────────────────

/// Uniprocessor scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Earliest Deadline First – dynamic, by absolute deadline.
    #[default]
    Edf,
    /// Deadline Monotonic – static rank by relative deadline.
    Dm,
    /// Rate Monotonic – static rank by period.
    Rm,
}

impl Policy {
    /// All policies, in display order.
    pub const ALL: [Policy; 3] = [Policy::Edf, Policy::Dm, Policy::Rm];

    /// Short lowercase name (`edf`, `dm`, `rm`).
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Edf => "edf",
            Policy::Dm => "dm",
            Policy::Rm => "rm",
        }
    }

    /// `true` for the fixed-priority policies.
    pub fn is_static(self) -> bool {
        !matches!(self, Policy::Edf)
    }

    /// Selection key of `job` under this policy; smaller runs first.
    pub fn selection_key(self, job: &Job) -> u64 {
        match self {
            Policy::Edf => job.absolute_deadline,
            Policy::Dm | Policy::Rm => job.priority.sort_key(),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = SimError;

    /// Case-insensitive: `EDF`, `edf` and ` Edf ` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edf" => Ok(Policy::Edf),
            "dm" => Ok(Policy::Dm),
            "rm" => Ok(Policy::Rm),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}

// ── Dispatch loop ─────────────────────────────────────────────────────────────

/// Run `jobs` on one processor for `horizon` ticks under `policy`.
///
/// Convenience wrapper over [`dispatch_by`] with [`Policy::selection_key`].
pub fn dispatch(jobs: &mut [Job], horizon: u64, policy: Policy) -> Result<Timeline, SimError> {
    dispatch_by(jobs, horizon, |job| policy.selection_key(job))
}

/// Run `jobs` for `horizon` ticks, always picking the ready job with the
/// smallest `key`.
///
/// Decrements [`Job::remaining`] of whichever job runs; nothing else in the
/// jobs is touched.  Missed deadlines are not detected here – they are
/// ordinary data read off the jobs and the returned timeline afterwards.
///
/// # Errors
/// [`SimError::InvalidHorizon`] when `horizon` is zero or too large to
/// address in memory.
pub fn dispatch_by<K, F>(jobs: &mut [Job], horizon: u64, key: F) -> Result<Timeline, SimError>
where
    K: Ord,
    F: Fn(&Job) -> K,
{
    if horizon == 0 {
        return Err(SimError::InvalidHorizon(HorizonReason::Zero));
    }
    let capacity = usize::try_from(horizon).map_err(|_| {
        SimError::InvalidHorizon(HorizonReason::TooLarge {
            value: horizon,
            limit: usize::MAX as u64,
        })
    })?;

    // Release order: by release tick, generation order within one tick.
    let mut arrivals: Vec<usize> = (0..jobs.len()).collect();
    arrivals.sort_by_key(|&i| jobs[i].release);
    let mut arrivals = arrivals.into_iter().peekable();

    let mut ready: Vec<usize> = Vec::new();
    let mut slots: Vec<Option<usize>> = Vec::with_capacity(capacity);
    let mut previous: Option<usize> = None;

    for tick in 0..horizon {
        while let Some(index) = arrivals.next_if(|&i| jobs[i].release <= tick) {
            trace!(tick, job = %jobs[index].key(), "released");
            ready.push(index);
        }

        ready.retain(|&i| !jobs[i].is_complete());

        // `min_by_key` keeps the first of equal minima: admission order.
        let selected = ready.iter().copied().min_by_key(|&i| key(&jobs[i]));

        if let Some(index) = selected {
            jobs[index].consume_tick();
        }

        if selected != previous {
            match (previous, selected) {
                (Some(from), Some(to)) if !jobs[from].is_complete() => debug!(
                    tick,
                    from = %jobs[from].key(),
                    to = %jobs[to].key(),
                    "preempted"
                ),
                (_, Some(to)) => debug!(tick, job = %jobs[to].key(), "dispatched"),
                (Some(_), None) => debug!(tick, "idle"),
                (None, None) => {}
            }
        }

        slots.push(selected);
        previous = selected;
    }

    Ok(Timeline::from_slots(slots))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
