/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use rtsched::config::Scenario;
use rtsched::scheduler::{DeadlineOutcome, Policy, Simulation};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Uniprocessor EDF / DM / RM scheduling simulator.
///
/// Example:
///   rtsched -c scenario.yaml -p rm
///   RUST_LOG=debug rtsched --compare
#[derive(Debug, Parser)]
#[command(
    name = "rtsched",
    about = "Simulates a periodic task set under EDF, DM or RM for one hyperperiod",
    long_about = None,
)]
struct Cli {
    /// Path to a YAML scenario file (built-in demo set when omitted).
    #[arg(short = 'c', long = "scenario")]
    scenario: Option<PathBuf>,

    /// Scheduling policy: edf, dm or rm. Overrides the scenario file.
    #[arg(short = 'p', long = "policy")]
    policy: Option<Policy>,

    /// Refuse hyperperiods above this many ticks. Overrides the scenario file.
    #[arg(short = 'l', long = "limit")]
    limit: Option<u64>,

    /// Run the task set under all three policies.
    #[arg(long = "compare", default_value_t = false)]
    compare: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        scenario = ?cli.scenario,
        policy   = ?cli.policy,
        limit    = ?cli.limit,
        compare  = cli.compare,
        "Configuration"
    );

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ── Load scenario ─────────────────────────────────────────────────────────
    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::load_from_file(path)?,
        None => {
            warn!("No scenario file provided, using the built-in demo task set");
            Scenario::demo()
        }
    };
    if let Some(policy) = cli.policy {
        scenario.policy = policy;
    }
    if let Some(limit) = cli.limit {
        scenario.hyperperiod_limit = limit;
    }

    // ── Simulate ──────────────────────────────────────────────────────────────
    let policies: Vec<Policy> = if cli.compare {
        Policy::ALL.to_vec()
    } else {
        vec![scenario.policy]
    };

    let mut summary = Vec::with_capacity(policies.len());
    for policy in policies {
        let sim = scenario.run_with(policy)?;
        print_simulation(&sim);
        summary.push((policy, sim.missed().len(), sim.total_preemptions()));
    }

    if summary.len() > 1 {
        info!("Comparison:");
        for (policy, missed, preemptions) in summary {
            info!(
                "  {policy:<4} missed={missed:<3} preemptions={preemptions}",
                policy = policy.to_string(),
            );
        }
    }

    Ok(())
}

fn print_simulation(sim: &Simulation) {
    info!(
        "── {} ── H={} U={:.4}",
        sim.policy,
        sim.hyperperiod,
        sim.utilization()
    );

    for task in &sim.tasks {
        info!(
            "  [{name}]  T={period}  D={deadline}  C={wcet}  priority={priority}",
            name = task.name,
            period = task.period,
            deadline = task.deadline,
            wcet = task.wcet,
            priority = task.priority,
        );
    }

    if let Some(rm) = &sim.rm_feasibility {
        info!(
            "  Liu & Layland: U={:.4} bound={:.4} slack={:+.4} schedulable_hint={}",
            rm.utilization,
            rm.bound,
            rm.slack(),
            rm.schedulable_hint
        );
    }

    for interval in &sim.intervals {
        info!(
            "  {:>6} - {:<6} {}",
            interval.start,
            interval.end,
            sim.jobs[interval.job].key()
        );
    }

    for report in &sim.reports {
        let verdict = match report.outcome {
            DeadlineOutcome::Met => "met",
            DeadlineOutcome::Missed => "MISSED",
            DeadlineOutcome::Unresolved => "unresolved",
        };
        info!(
            "  {name}#{seq:<3} release={release:<5} deadline={deadline:<5} finish={finish:<6} preemptions={pre}  {verdict}",
            name = report.task_name,
            seq = report.sequence,
            release = report.release,
            deadline = report.absolute_deadline,
            finish = report
                .finish
                .map_or_else(|| "-".to_string(), |f| f.to_string()),
            pre = report.preemptions(),
        );
    }

    info!(
        "  busy={} idle={} missed={} preempted={}",
        sim.timeline.busy_ticks(),
        sim.timeline.idle_ticks(),
        sim.missed().len(),
        sim.preempted().len()
    );
}
