/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-job verdicts derived from the compacted timeline.
//!
//! Everything a Gantt-style renderer needs to mark a job as met, missed or
//! preempted, without re-deriving it from the raw ticks.

use std::collections::BTreeMap;

use super::timeline::Interval;
use crate::task::Job;

/// Deadline verdict of one job at the end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineOutcome {
    /// Completed no later than its absolute deadline.
    Met,
    /// Completed late, or still incomplete once its deadline had passed.
    Missed,
    /// Still incomplete, with a deadline at or beyond the horizon.
    Unresolved,
}

/// Everything known about one job after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    /// Index in the run's job vector.
    pub job: usize,
    pub task_name: String,
    pub sequence: u32,
    pub release: u64,
    pub absolute_deadline: u64,
    /// Budget left at the horizon.
    pub remaining: u64,
    /// `(start, end)` spans on the processor, in tick order.
    pub intervals: Vec<(u64, u64)>,
    /// End of the final interval, when the job completed.
    pub finish: Option<u64>,
    pub outcome: DeadlineOutcome,
}

impl JobReport {
    /// How many times the job was displaced before finishing (or before the
    /// horizon).
    pub fn preemptions(&self) -> usize {
        self.intervals.len().saturating_sub(1)
    }

    pub fn was_preempted(&self) -> bool {
        self.intervals.len() > 1
    }

    pub fn completed(&self) -> bool {
        self.remaining == 0
    }

    /// Ticks between release and completion.
    pub fn response_time(&self) -> Option<u64> {
        self.finish.map(|f| f - self.release)
    }

    /// Ticks past the deadline at completion (`0` when on time).
    pub fn lateness(&self) -> Option<u64> {
        self.finish.map(|f| f.saturating_sub(self.absolute_deadline))
    }
}

/// Build one [`JobReport`] per job, in job-vector order.
///
/// A completed job is judged by the end of its final interval against its
/// real deadline, even when that deadline lies beyond `horizon`.  An
/// incomplete job has missed only if its deadline is strictly before
/// `horizon`; a deadline at or past the horizon is unresolved.
pub fn analyze(jobs: &[Job], intervals: &[Interval], horizon: u64) -> Vec<JobReport> {
    let mut spans: BTreeMap<usize, Vec<(u64, u64)>> = BTreeMap::new();
    for interval in intervals {
        spans
            .entry(interval.job)
            .or_default()
            .push((interval.start, interval.end));
    }

    jobs.iter()
        .enumerate()
        .map(|(index, job)| {
            let intervals = spans.remove(&index).unwrap_or_default();
            let finish = if job.is_complete() {
                Some(intervals.last().map_or(job.release, |&(_, end)| end))
            } else {
                None
            };
            let outcome = match finish {
                Some(end) if end <= job.absolute_deadline => DeadlineOutcome::Met,
                Some(_) => DeadlineOutcome::Missed,
                None if job.absolute_deadline < horizon => DeadlineOutcome::Missed,
                None => DeadlineOutcome::Unresolved,
            };

            JobReport {
                job: index,
                task_name: job.task_name.clone(),
                sequence: job.sequence,
                release: job.release,
                absolute_deadline: job.absolute_deadline,
                remaining: job.remaining(),
                intervals,
                finish,
                outcome,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::dispatch::{dispatch, Policy};
    use crate::scheduler::jobs::generate_jobs;
    use crate::scheduler::priority::assign_rate_monotonic;
    use crate::task::Task;

    fn run(tasks: &[Task], horizon: u64, policy: Policy) -> Vec<JobReport> {
        let ranked = assign_rate_monotonic(tasks).0;
        let mut jobs = generate_jobs(&ranked, horizon);
        let tl = dispatch(&mut jobs, horizon, policy).unwrap();
        let intervals = tl.compact(&jobs);
        analyze(&jobs, &intervals, horizon)
    }

    fn find<'a>(reports: &'a [JobReport], task: &str, seq: u32) -> &'a JobReport {
        reports
            .iter()
            .find(|r| r.task_name == task && r.sequence == seq)
            .unwrap()
    }

    #[test]
    fn on_time_job_is_met() {
        let reports = run(&[Task::new("solo", 10, 10, 4)], 20, Policy::Edf);
        for r in &reports {
            assert_eq!(r.outcome, DeadlineOutcome::Met);
            assert_eq!(r.finish, Some(r.release + 4));
            assert_eq!(r.response_time(), Some(4));
            assert_eq!(r.lateness(), Some(0));
            assert_eq!(r.preemptions(), 0);
        }
    }

    #[test]
    fn rm_overload_marks_late_completion_and_starved_job() {
        // X (4,4,3) outranks Y (6,6,3).  Y#1 runs 3-4, 7-8, 11-12 and
        // finishes at 12 > 6; Y#2 never runs and its deadline is the horizon.
        let tasks = vec![Task::new("X", 4, 4, 3), Task::new("Y", 6, 6, 3)];
        let reports = run(&tasks, 12, Policy::Rm);

        let y1 = find(&reports, "Y", 1);
        assert_eq!(y1.intervals, vec![(3, 4), (7, 8), (11, 12)]);
        assert_eq!(y1.preemptions(), 2);
        assert_eq!(y1.finish, Some(12));
        assert_eq!(y1.outcome, DeadlineOutcome::Missed);
        assert_eq!(y1.lateness(), Some(6));

        let y2 = find(&reports, "Y", 2);
        assert!(y2.intervals.is_empty());
        assert!(!y2.completed());
        assert_eq!(y2.remaining, 3);
        assert_eq!(y2.outcome, DeadlineOutcome::Unresolved);

        for seq in 1..=3 {
            assert_eq!(find(&reports, "X", seq).outcome, DeadlineOutcome::Met);
        }
    }

    #[test]
    fn edf_overload_misses_only_the_late_jobs() {
        let tasks = vec![Task::new("X", 4, 4, 3), Task::new("Y", 6, 6, 3)];
        let reports = run(&tasks, 12, Policy::Edf);

        assert_eq!(find(&reports, "X", 1).outcome, DeadlineOutcome::Met);
        assert_eq!(find(&reports, "Y", 1).outcome, DeadlineOutcome::Met);
        // X#2 runs 6-9 against deadline 8.
        assert_eq!(find(&reports, "X", 2).finish, Some(9));
        assert_eq!(find(&reports, "X", 2).outcome, DeadlineOutcome::Missed);
        assert_eq!(find(&reports, "Y", 2).finish, Some(12));
        assert_eq!(find(&reports, "Y", 2).outcome, DeadlineOutcome::Met);
        // X#3 never ran; its deadline coincides with the horizon.
        assert_eq!(find(&reports, "X", 3).outcome, DeadlineOutcome::Unresolved);
    }

    #[test]
    fn incomplete_job_with_deadline_at_horizon_is_not_missed() {
        let tasks = vec![Task::new("X", 4, 4, 3), Task::new("Y", 6, 6, 3)];
        let reports = run(&tasks, 12, Policy::Edf);

        let x3 = find(&reports, "X", 3);
        assert_eq!(x3.absolute_deadline, 12);
        assert_eq!(x3.remaining, 3);
        assert_ne!(x3.outcome, DeadlineOutcome::Missed);
    }

    #[test]
    fn incomplete_job_with_deadline_before_horizon_is_missed() {
        // fat (4,3,6): fat#1 runs 0-6 and finishes late; fat#2 (deadline 7)
        // runs 6-8 and is still short 4 ticks.  slow#1 (deadline 8) starves.
        let tasks = vec![Task::new("fat", 4, 3, 6), Task::new("slow", 8, 8, 1)];
        let reports = run(&tasks, 8, Policy::Edf);

        let fat1 = find(&reports, "fat", 1);
        assert_eq!(fat1.intervals, vec![(0, 6)]);
        assert_eq!(fat1.outcome, DeadlineOutcome::Missed);

        let fat2 = find(&reports, "fat", 2);
        assert_eq!(fat2.intervals, vec![(6, 8)]);
        assert_eq!(fat2.remaining, 4);
        assert_eq!(fat2.outcome, DeadlineOutcome::Missed);

        let slow1 = find(&reports, "slow", 1);
        assert!(slow1.intervals.is_empty());
        assert_eq!(slow1.outcome, DeadlineOutcome::Unresolved);
    }

    #[test]
    fn incomplete_job_with_deadline_past_horizon_is_unresolved() {
        // Horizon cut short on purpose: the job cannot finish by tick 3.
        let task = Task::new("long", 10, 10, 5);
        let reports = run(&[task], 3, Policy::Edf);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, DeadlineOutcome::Unresolved);
        assert_eq!(reports[0].remaining, 2);
        assert_eq!(reports[0].finish, None);
        assert_eq!(reports[0].response_time(), None);
    }

    #[test]
    fn completed_job_is_judged_against_deadline_beyond_horizon() {
        // D > T: the deadline of the last job lies beyond the horizon but the
        // job completes inside it.
        let reports = run(&[Task::new("d", 5, 8, 2)], 10, Policy::Edf);
        let last = find(&reports, "d", 2);
        assert!(last.absolute_deadline > 10);
        assert_eq!(last.outcome, DeadlineOutcome::Met);
    }

    #[test]
    fn reports_follow_job_vector_order() {
        let tasks = vec![Task::new("a", 5, 5, 1), Task::new("b", 10, 10, 1)];
        let reports = run(&tasks, 10, Policy::Edf);
        let indices: Vec<usize> = reports.iter().map(|r| r.job).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
