/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use batchsched::config::SchedulerConfig;
use batchsched::policy::OrderingPolicy;
use batchsched::report;
use batchsched::scheduler::Scheduler;
use batchsched::workload::{self, WorkloadEntry};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Cluster batch scheduler.
///
/// Example:
///   batchsched -c cluster.yaml -p fcfs -p shortest-duration -o report.csv
#[derive(Debug, Parser)]
#[command(
    name = "batchsched",
    about = "Cluster batch scheduler – first-fit placement under FCFS / smallest-footprint / shortest-duration",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML cluster / workload configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Number of worker nodes (overrides the configuration file).
    #[arg(short = 'n', long = "nodes")]
    nodes: Option<u32>,

    /// Cores per node (overrides the configuration file).
    #[arg(long = "cores")]
    cores: Option<u32>,

    /// Memory per node in GB (overrides the configuration file).
    #[arg(long = "memory")]
    memory: Option<u64>,

    /// Policy pass to run; repeat to run several in the given order.
    /// Default: fcfs, smallest-footprint, shortest-duration.
    #[arg(short = 'p', long = "policy")]
    policies: Vec<OrderingPolicy>,

    /// Utilization report output path.
    #[arg(short = 'o', long = "output", default_value = "utilization_report.csv")]
    output: PathBuf,

    /// After all passes, move pending jobs to the FCFS queue and run one
    /// more FCFS pass.
    #[arg(long = "requeue", default_value_t = false)]
    requeue: bool,
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

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    info!(
        config   = ?cli.config,
        nodes    = ?cli.nodes,
        policies = ?cli.policies,
        output   = %cli.output.display(),
        requeue  = cli.requeue,
        "batchsched starting up"
    );

    // ── Load configuration ────────────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => SchedulerConfig::load_from_file(path)?,
        None => {
            warn!("No configuration file provided, using the reference cluster");
            SchedulerConfig::default()
        }
    };
    if let Some(n) = cli.nodes {
        config.cluster.node_count = n;
    }
    if let Some(c) = cli.cores {
        config.cluster.cores_per_node = c;
    }
    if let Some(m) = cli.memory {
        config.cluster.memory_gb_per_node = m;
    }

    let jobs: Vec<WorkloadEntry> = config.jobs.take().unwrap_or_else(|| {
        info!("No jobs section in configuration, using the sample workload");
        workload::sample_jobs()
    });

    // ── Schedule ──────────────────────────────────────────────────────────────
    let mut scheduler =
        Scheduler::new(&config.cluster).context("Invalid cluster configuration")?;
    workload::submit_all(&mut scheduler, &jobs).context("Failed to submit workload")?;

    let policies = if cli.policies.is_empty() {
        OrderingPolicy::ALL.to_vec()
    } else {
        cli.policies.clone()
    };
    scheduler.run_passes(&policies);

    if cli.requeue && scheduler.requeue_pending(OrderingPolicy::Fcfs) > 0 {
        scheduler.run_pass(OrderingPolicy::Fcfs);
    }

    for job in scheduler.pending() {
        warn!(job = job.id(), cores = job.cores(), memory_gb = job.memory_gb(), "job left pending");
    }

    // ── Report ────────────────────────────────────────────────────────────────
    report::write_csv_file(&scheduler.utilization(), &cli.output)?;
    info!(
        allocated = scheduler.allocations().len(),
        pending = scheduler.pending().len(),
        "Utilization report generated in '{}'",
        cli.output.display()
    );
    Ok(())
}
