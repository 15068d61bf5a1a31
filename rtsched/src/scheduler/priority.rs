/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Static priority assignment for the fixed-priority policies.
//!
//! Each assigner takes the task slice by reference and returns a new,
//! annotated `Vec<Task>` in the **original** order, so a base task list can be
//! reused across scenarios without one run's ranks leaking into the next.
//!
//! Ranks are `1..=n`, `1` being the highest priority.  Ties keep input order
//! (stable sort): two tasks with equal keys are ranked in the order they
//! appear in the task set.

use tracing::debug;

use super::feasibility::RmFeasibility;
use crate::task::{Priority, Task};

/// Deadline Monotonic: shorter relative deadline → higher priority.
pub fn assign_deadline_monotonic(tasks: &[Task]) -> Vec<Task> {
    rank_by(tasks, |t| t.deadline)
}

/// Rate Monotonic: shorter period → higher priority.
///
/// Also returns the Liu & Layland verdict for the set.
pub fn assign_rate_monotonic(tasks: &[Task]) -> (Vec<Task>, RmFeasibility) {
    let ranked = rank_by(tasks, |t| t.period);
    let verdict = RmFeasibility::evaluate(&ranked);
    (ranked, verdict)
}

/// EDF carries no static rank: every task becomes [`Priority::Dynamic`].
pub fn clear_priorities(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .map(|t| t.with_priority(Priority::Dynamic))
        .collect()
}

fn rank_by<K, F>(tasks: &[Task], key: F) -> Vec<Task>
where
    K: Ord,
    F: Fn(&Task) -> K,
{
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    // `sort_by_key` is stable – equal keys keep input order.
    order.sort_by_key(|&i| key(&tasks[i]));

    let mut ranks = vec![0u32; tasks.len()];
    for (position, &index) in order.iter().enumerate() {
        ranks[index] = u32::try_from(position + 1).unwrap_or(u32::MAX);
    }

    tasks
        .iter()
        .zip(ranks)
        .map(|(task, rank)| {
            debug!(task = %task.name, rank, "priority assigned");
            task.with_priority(Priority::Fixed(rank))
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
