/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! rtsched – uniprocessor real-time scheduling simulator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task            – Task, Job, Priority, JobKey
//! ├── hyperperiod/    – GCD / LCM helpers and the hyperperiod calculator
//! ├── scheduler/      – Simulator facade
//! │   ├── priority    – DM / RM rank assignment
//! │   ├── feasibility – Liu & Layland bound
//! │   ├── jobs        – job generation over one hyperperiod
//! │   ├── dispatch    – tick loop with a pluggable selection key
//! │   ├── timeline    – per-tick record and interval compaction
//! │   ├── outcome     – per-job met / missed / preempted reports
//! │   └── error       – SimError
//! └── config/         – YAML scenario files
//! ```

pub mod config;
pub mod hyperperiod;
pub mod scheduler;
pub mod task;
