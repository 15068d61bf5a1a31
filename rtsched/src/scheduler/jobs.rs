/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Job generation: expands every task into its activations inside the
//! hyperperiod.

use tracing::debug;

use crate::task::{Job, Task};

/// Expand `tasks` into jobs released in `[0, hyperperiod)`.
///
/// For each task (in insertion order) and `k = 0, 1, …` while
/// `k * period < hyperperiod`, one job is emitted with `release = k * period`
/// and `sequence = k + 1`.  The output is grouped by task, **not** sorted by
/// release time; the dispatcher does the time ordering.
///
/// Absolute deadlines may exceed the hyperperiod.  A zero horizon yields no
/// jobs; a zero-period task yields none either (validation rejects both long
/// before this point).
pub fn generate_jobs(tasks: &[Task], hyperperiod: u64) -> Vec<Job> {
    let mut jobs = Vec::new();

    for (index, task) in tasks.iter().enumerate() {
        if task.period == 0 {
            continue;
        }
        let count = hyperperiod.div_ceil(task.period);
        jobs.extend((0..count).map(|k| Job::from_task(task, index, k)));
        debug!(task = %task.name, jobs = count, "generated jobs");
    }

    jobs
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    #[test]
    fn job_count_is_hyperperiod_over_period() {
        let tasks = vec![
            Task::new("T1", 20, 5, 3),
            Task::new("T2", 15, 7, 3),
            Task::new("T3", 10, 10, 4),
        ];
        let jobs = generate_jobs(&tasks, 60);

        let count = |name: &str| jobs.iter().filter(|j| j.task_name == name).count();
        assert_eq!(count("T1"), 3);
        assert_eq!(count("T2"), 4);
        assert_eq!(count("T3"), 6);
        assert_eq!(jobs.len(), 13);
    }

    #[test]
    fn jobs_are_grouped_in_task_insertion_order() {
        let tasks = vec![Task::new("slow", 30, 30, 1), Task::new("fast", 10, 10, 1)];
        let jobs = generate_jobs(&tasks, 30);
        let names: Vec<&str> = jobs.iter().map(|j| j.task_name.as_str()).collect();
        assert_eq!(names, vec!["slow", "fast", "fast", "fast"]);
    }

    #[test]
    fn releases_and_deadlines_follow_the_period() {
        let task = Task::new("T2", 15, 7, 3).with_priority(Priority::Fixed(2));
        let jobs = generate_jobs(&[task], 60);

        let releases: Vec<u64> = jobs.iter().map(|j| j.release).collect();
        let deadlines: Vec<u64> = jobs.iter().map(|j| j.absolute_deadline).collect();
        let sequences: Vec<u32> = jobs.iter().map(|j| j.sequence).collect();

        assert_eq!(releases, vec![0, 15, 30, 45]);
        assert_eq!(deadlines, vec![7, 22, 37, 52]);
        assert_eq!(sequences, vec![1, 2, 3, 4]);
        assert!(jobs.iter().all(|j| j.remaining() == 3));
        assert!(jobs.iter().all(|j| j.priority == Priority::Fixed(2)));
    }

    #[test]
    fn no_job_is_released_at_or_after_the_horizon() {
        let tasks = vec![Task::new("a", 4, 4, 1), Task::new("b", 6, 9, 2)];
        let jobs = generate_jobs(&tasks, 12);
        assert!(jobs.iter().all(|j| j.release < 12));
        // Deadlines past the horizon are allowed.
        assert!(jobs.iter().any(|j| j.absolute_deadline > 12));
    }

    #[test]
    fn zero_horizon_yields_no_jobs() {
        assert!(generate_jobs(&[Task::new("a", 5, 5, 1)], 0).is_empty());
    }

    #[test]
    fn task_index_points_back_to_owner() {
        let tasks = vec![Task::new("a", 5, 5, 1), Task::new("b", 10, 10, 1)];
        let jobs = generate_jobs(&tasks, 10);
        for job in &jobs {
            assert_eq!(tasks[job.task_index].name, job.task_name);
        }
    }
}
