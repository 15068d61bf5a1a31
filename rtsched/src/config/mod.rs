/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Scenario loading.
//!
//! A scenario is a task set plus the policy to run it under.  The expected
//! YAML structure is:
//! ```yaml
//! policy: rm                # optional, default edf
//! hyperperiod_limit: 5000   # optional, default 1_000_000
//! tasks:
//!   - name: T1
//!     period: 20
//!     deadline: 5           # optional, defaults to period
//!     wcet: 3
//!   - name: T2
//!     period: 15
//!     deadline: 7
//!     wcet: 3
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::hyperperiod::DEFAULT_HYPERPERIOD_LIMIT;
use crate::scheduler::{Policy, SimError, Simulation, Simulator};
use crate::task::Task;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    /// Kept as text so an unknown name surfaces as [`SimError::UnknownPolicy`].
    policy: Option<String>,
    #[serde(default = "default_hyperperiod_limit")]
    hyperperiod_limit: u64,
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

/// Per-task fields as they appear in the YAML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskEntry {
    name: String,
    period: u64,
    /// Implicit-deadline task when absent.
    deadline: Option<u64>,
    wcet: u64,
}

fn default_hyperperiod_limit() -> u64 {
    DEFAULT_HYPERPERIOD_LIMIT
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A task set ready to be simulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub policy: Policy,
    pub hyperperiod_limit: u64,
    /// Tasks in file order; the order breaks priority ties.
    pub tasks: Vec<Task>,
}

impl Scenario {
    /// The built-in demonstration set, used when no file is supplied.
    ///
    /// T1 has the tightest deadline but the longest period, so RM and DM
    /// disagree on it: RM misses every T1 job, DM and EDF miss none.
    pub fn demo() -> Self {
        Self {
            policy: Policy::Edf,
            hyperperiod_limit: DEFAULT_HYPERPERIOD_LIMIT,
            tasks: vec![
                Task::new("T1", 20, 5, 3),
                Task::new("T2", 15, 7, 3),
                Task::new("T3", 10, 10, 4),
                Task::new("T4", 20, 20, 3),
            ],
        }
    }

    /// Parses a scenario from YAML text.
    ///
    /// Structural checks only (types, required keys, policy name); task
    /// values are validated by [`Simulator::simulate`].
    ///
    /// # Errors
    /// Returns an error if the YAML is malformed, a required field is
    /// missing, an unknown key is present or the policy name is not one of
    /// `edf`, `dm`, `rm`.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: ScenarioFile =
            serde_yaml::from_str(content).context("Failed to parse scenario YAML")?;

        let policy = match file.policy.as_deref() {
            Some(name) => name
                .parse::<Policy>()
                .context("Invalid `policy` in scenario")?,
            None => Policy::default(),
        };

        let tasks: Vec<Task> = file
            .tasks
            .into_iter()
            .map(|entry| {
                let deadline = entry.deadline.unwrap_or(entry.period);
                Task::new(entry.name, entry.period, deadline, entry.wcet)
            })
            .collect();

        for task in &tasks {
            debug!(
                "  [{name}]  T={period}  D={deadline}  C={wcet}",
                name = task.name,
                period = task.period,
                deadline = task.deadline,
                wcet = task.wcet,
            );
        }

        Ok(Self {
            policy,
            hyperperiod_limit: file.hyperperiod_limit,
            tasks,
        })
    }

    /// Reads and parses the scenario file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its content is rejected
    /// by [`from_yaml_str`](Self::from_yaml_str).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading scenario from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open scenario file: {}", path.display()))?;

        let scenario = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid scenario file: {}", path.display()))?;

        info!(
            policy = %scenario.policy,
            tasks = scenario.tasks.len(),
            "Scenario loaded"
        );
        Ok(scenario)
    }

    /// A simulator honouring this scenario's hyperperiod limit.
    pub fn simulator(&self) -> Simulator {
        Simulator::with_limit(self.hyperperiod_limit)
    }

    /// Simulates the task set under `policy`.
    pub fn run_with(&self, policy: Policy) -> Result<Simulation, SimError> {
        self.simulator().simulate(&self.tasks, policy)
    }

    /// Simulates the task set under the scenario's own policy.
    pub fn run(&self) -> Result<Simulation, SimError> {
        self.run_with(self.policy)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::demo()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    // ── Scenario::demo ────────────────────────────────────────────────────────

    #[test]
    fn demo_scenario_is_the_four_task_set_under_edf() {
        let s = Scenario::demo();
        assert_eq!(s.policy, Policy::Edf);
        assert_eq!(s.hyperperiod_limit, DEFAULT_HYPERPERIOD_LIMIT);
        let names: Vec<&str> = s.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["T1", "T2", "T3", "T4"]);
        assert_eq!(Scenario::default(), s);
    }

    #[test]
    fn demo_scenario_runs_cleanly_under_edf() {
        let sim = Scenario::demo().run().unwrap();
        assert_eq!(sim.hyperperiod, 60);
        assert!(sim.missed().is_empty());
    }

    // ── Scenario::load_from_file ──────────────────────────────────────────────

    #[test]
    fn load_full_scenario_yaml() {
        let yaml = r#"
policy: rm
hyperperiod_limit: 5000
tasks:
  - name: T1
    period: 20
    deadline: 5
    wcet: 3
  - name: T2
    period: 15
    deadline: 7
    wcet: 3
  - name: T3
    period: 10
    wcet: 4
"#;
        let f = yaml_tempfile(yaml);
        let s = Scenario::load_from_file(f.path()).unwrap();

        assert_eq!(s.policy, Policy::Rm);
        assert_eq!(s.hyperperiod_limit, 5000);
        assert_eq!(s.tasks.len(), 3);
        assert_eq!(s.tasks[0], Task::new("T1", 20, 5, 3));
        assert_eq!(s.tasks[1].deadline, 7);
    }

    #[test]
    fn optional_fields_use_defaults_when_absent() {
        let yaml = r#"
tasks:
  - name: only
    period: 12
    wcet: 2
"#;
        let s = Scenario::from_yaml_str(yaml).unwrap();
        assert_eq!(s.policy, Policy::Edf);
        assert_eq!(s.hyperperiod_limit, DEFAULT_HYPERPERIOD_LIMIT);
        assert_eq!(s.tasks[0].deadline, 12, "deadline defaults to period");
    }

    #[test]
    fn policy_name_is_case_insensitive() {
        let s = Scenario::from_yaml_str("policy: DM\ntasks: []\n").unwrap();
        assert_eq!(s.policy, Policy::Dm);
    }

    #[test]
    fn unknown_policy_returns_error() {
        let err = Scenario::from_yaml_str("policy: fifo\ntasks: []\n").unwrap_err();
        let root = err.downcast_ref::<SimError>().unwrap();
        assert_eq!(*root, SimError::UnknownPolicy("fifo".into()));
    }

    #[test]
    fn unknown_task_key_returns_error() {
        let yaml = "tasks:\n  - name: a\n    period: 5\n    wcet: 1\n    prio: 3\n";
        assert!(Scenario::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn missing_wcet_returns_error() {
        let yaml = "tasks:\n  - name: a\n    period: 5\n";
        assert!(Scenario::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn negative_period_returns_error() {
        let yaml = "tasks:\n  - name: a\n    period: -5\n    wcet: 1\n";
        assert!(Scenario::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = Scenario::load_from_file(Path::new("/nonexistent/path/scenario.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(Scenario::load_from_file(f.path()).is_err());
    }

    // ── Scenario::run ─────────────────────────────────────────────────────────

    #[test]
    fn empty_task_list_is_rejected_at_simulation_time() {
        let s = Scenario::from_yaml_str("tasks: []\n").unwrap();
        assert!(s.tasks.is_empty());
        assert!(matches!(s.run(), Err(SimError::InvalidInput(_))));
    }

    #[test]
    fn scenario_limit_is_enforced() {
        let yaml = r#"
hyperperiod_limit: 50
tasks:
  - { name: a, period: 7, wcet: 1 }
  - { name: b, period: 11, wcet: 1 }
"#;
        let s = Scenario::from_yaml_str(yaml).unwrap();
        assert!(matches!(s.run(), Err(SimError::InvalidHorizon(_))));
    }

    #[test]
    fn run_with_overrides_the_file_policy() {
        let s = Scenario::demo();
        let rm = s.run_with(Policy::Rm).unwrap();
        assert_eq!(rm.policy, Policy::Rm);
        assert_eq!(rm.missed().len(), 3);
    }
}
