/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-tick execution record and its compaction into intervals.

use crate::task::Job;

// ── Timeline ──────────────────────────────────────────────────────────────────

/// Which job occupied the processor at each tick of `[0, horizon)`.
///
/// Slot `t` holds the index (into the run's job vector) of the job that ran
/// during tick `t`, or `None` when the processor was idle.  Produced once by
/// the dispatcher and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timeline {
    slots: Vec<Option<usize>>,
}

impl Timeline {
    pub(crate) fn from_slots(slots: Vec<Option<usize>>) -> Self {
        Self { slots }
    }

    /// Number of ticks covered (the horizon).
    pub fn horizon(&self) -> u64 {
        self.slots.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(tick, job index or idle)` pairs in tick order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Option<usize>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(tick, slot)| (tick as u64, *slot))
    }

    /// Ticks during which some job ran.
    pub fn busy_ticks(&self) -> u64 {
        self.slots.iter().filter(|s| s.is_some()).count() as u64
    }

    /// Ticks during which the processor was idle.
    pub fn idle_ticks(&self) -> u64 {
        self.horizon() - self.busy_ticks()
    }

    /// Collapse consecutive ticks of the same job into [`Interval`]s.
    ///
    /// Jobs are matched by identity key (task name + sequence), not by slot
    /// value.  Idle ticks close the current interval and never produce one of
    /// their own.  A slot with no counterpart in `jobs` only merges with the
    /// same slot value.
    pub fn compact(&self, jobs: &[Job]) -> Vec<Interval> {
        let mut intervals = Vec::new();
        let mut open: Option<(usize, u64)> = None;

        for (tick, slot) in self.iter() {
            if let (Some((current, _)), Some(next)) = (open, slot) {
                let same = match (jobs.get(current), jobs.get(next)) {
                    (Some(a), Some(b)) => a.same_job(b),
                    _ => current == next,
                };
                if same {
                    continue;
                }
            }
            if let Some((job, start)) = open.take() {
                intervals.push(Interval {
                    job,
                    start,
                    end: tick,
                });
            }
            open = slot.map(|job| (job, tick));
        }

        if let Some((job, start)) = open {
            intervals.push(Interval {
                job,
                start,
                end: self.horizon(),
            });
        }

        intervals
    }
}

// ── Interval ──────────────────────────────────────────────────────────────────

/// A contiguous run `[start, end)` of one job on the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Index of the job in the run's job vector.
    pub job: usize,
    pub start: u64,
    /// Exclusive.
    pub end: u64,
}

impl Interval {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn ticks(&self) -> std::ops::Range<u64> {
        self.start..self.end
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
