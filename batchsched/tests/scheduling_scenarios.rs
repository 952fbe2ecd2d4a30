/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! End-to-end scheduling scenarios through the public API.

use batchsched::config::{ClusterConfig, SchedulerConfig};
use batchsched::job::{Job, JobId};
use batchsched::policy::OrderingPolicy;
use batchsched::report;
use batchsched::scheduler::audit::check_conservation;
use batchsched::scheduler::{PlacementEvent, Scheduler};
use batchsched::workload::{self, sample_jobs};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scheduler(nodes: u32, cores: u32, memory_gb: u64) -> Scheduler {
    Scheduler::new(&ClusterConfig::new(nodes, cores, memory_gb)).unwrap()
}

fn job(id: JobId, cores: u32, memory_gb: u64, exec_hours: u32) -> Job {
    Job::new(id, id, cores, memory_gb, exec_hours).unwrap()
}

// ── Pending accumulation ──────────────────────────────────────────────────────

#[test]
fn second_job_lands_in_pending_on_single_small_node() {
    let mut sched = scheduler(1, 10, 10);
    sched.submit(OrderingPolicy::Fcfs, job(1, 8, 8, 1)).unwrap();
    sched.submit(OrderingPolicy::Fcfs, job(2, 8, 8, 1)).unwrap();

    let report = sched.run_pass(OrderingPolicy::Fcfs);

    assert_eq!(
        report.events,
        vec![
            PlacementEvent::Allocated { job: 1, node: 0 },
            PlacementEvent::Pending { job: 2 },
        ]
    );
    assert_eq!(sched.pending().len(), 1);
    assert_eq!(sched.pending()[0].id(), 2);
    assert_eq!(sched.nodes()[0].available_cores(), 2);
    assert_eq!(sched.nodes()[0].available_memory_gb(), 2);
}

// ── Ordering through full passes ──────────────────────────────────────────────

#[test]
fn smallest_footprint_pass_order() {
    let mut sched = scheduler(8, 24, 64);
    let p = OrderingPolicy::SmallestFootprintFirst;
    sched.submit(p, job(1, 10, 32, 5)).unwrap(); // 1600
    sched.submit(p, job(2, 5, 16, 3)).unwrap(); // 240
    sched.submit(p, job(3, 12, 40, 1)).unwrap(); // 480

    assert_eq!(sched.run_pass(p).dequeue_order(), vec![2, 3, 1]);
}

#[test]
fn shortest_duration_pass_order() {
    let mut sched = scheduler(8, 24, 64);
    let p = OrderingPolicy::ShortestDurationFirst;
    for (id, exec) in [(1, 5), (2, 3), (3, 2), (4, 6), (5, 1)] {
        sched.submit(p, job(id, 1, 1, exec)).unwrap();
    }
    assert_eq!(sched.run_pass(p).dequeue_order(), vec![5, 3, 2, 1, 4]);
}

// ── Cross-pass depletion ──────────────────────────────────────────────────────

#[test]
fn earlier_pass_depletes_pool_for_later_pass() {
    let mut sched = scheduler(2, 24, 64);
    // FCFS fills node 0 and most of node 1.
    sched.submit(OrderingPolicy::Fcfs, job(1, 24, 64, 1)).unwrap();
    sched.submit(OrderingPolicy::Fcfs, job(2, 20, 10, 1)).unwrap();
    // Fits an idle node, but not what FCFS left behind.
    sched
        .submit(OrderingPolicy::ShortestDurationFirst, job(3, 8, 8, 1))
        .unwrap();
    sched
        .submit(OrderingPolicy::ShortestDurationFirst, job(4, 4, 8, 2))
        .unwrap();

    let reports = sched.run_passes(&[
        OrderingPolicy::Fcfs,
        OrderingPolicy::ShortestDurationFirst,
    ]);

    assert_eq!(reports[0].allocated(), 2);
    assert_eq!(
        reports[1].events,
        vec![
            PlacementEvent::Pending { job: 3 },
            PlacementEvent::Allocated { job: 4, node: 1 },
        ]
    );
    assert_eq!(sched.nodes()[1].available_cores(), 0);
}

// ── Reference run ─────────────────────────────────────────────────────────────

#[test]
fn sample_workload_on_reference_cluster() {
    let mut sched = Scheduler::new(&ClusterConfig::default()).unwrap();
    workload::submit_all(&mut sched, &sample_jobs()).unwrap();

    let reports = sched.run_all();
    let order: Vec<Vec<JobId>> = reports.iter().map(|r| r.dequeue_order()).collect();
    assert_eq!(order, vec![vec![1, 4], vec![2, 5], vec![3]]);
    assert!(sched.pending().is_empty());

    // Node 0 takes jobs 1 and 4 and is left with 12G, too little for job 2
    // (16G) or job 5 (40G); both go to node 1.  Job 3 needs a fresh node.
    let placements: Vec<(JobId, u32)> = sched
        .allocations()
        .iter()
        .map(|a| (a.job, a.node))
        .collect();
    assert_eq!(placements, vec![(1, 0), (4, 0), (2, 1), (5, 1), (3, 2)]);

    let rows = sched.utilization();
    assert_eq!(rows.len(), 128);
    assert!((rows[0].cpu_pct - 75.0).abs() < 1e-9);
    assert!((rows[0].memory_pct - 81.25).abs() < 1e-9);
    assert_eq!(rows[127].cpu_pct, 0.0);
    assert!(check_conservation(sched.nodes(), sched.allocations()).is_empty());
}

#[test]
fn sample_workload_report_csv() {
    let mut sched = Scheduler::new(&ClusterConfig::new(3, 24, 64)).unwrap();
    workload::submit_all(&mut sched, &sample_jobs()).unwrap();
    sched.run_all();

    let mut buf = Vec::new();
    report::write_csv(&sched.utilization(), &mut buf).unwrap();
    let csv = String::from_utf8(buf).unwrap();

    assert_eq!(
        csv,
        "NodeID,CPU Utilization (%),Memory Utilization (%)\n\
         0,75.00,81.25\n\
         1,70.83,87.50\n\
         2,83.33,75.00\n"
    );
}

// ── Utilization ───────────────────────────────────────────────────────────────

#[test]
fn utilization_is_idempotent_without_new_passes() {
    let mut sched = scheduler(4, 24, 64);
    sched.submit(OrderingPolicy::Fcfs, job(1, 12, 16, 1)).unwrap();
    sched.run_all();

    let a = sched.utilization();
    let b = sched.utilization();
    assert_eq!(a, b);
    assert!((a[0].cpu_pct - 50.0).abs() < 1e-9);
}

// ── Configuration-driven run ──────────────────────────────────────────────────

#[test]
fn yaml_workload_drives_scheduler() {
    let yaml = r#"
cluster:
  node_count: 1
  cores_per_node: 10
  memory_gb_per_node: 10
jobs:
  - { id: 1, cores: 8, memory_gb: 8, exec_hours: 1, policy: fcfs }
  - { id: 2, cores: 8, memory_gb: 8, exec_hours: 1, policy: fcfs }
  - { id: 3, cores: 2, memory_gb: 2, exec_hours: 4, policy: shortest-duration }
"#;
    let cfg = SchedulerConfig::from_yaml_str(yaml).unwrap();
    let mut sched = Scheduler::new(&cfg.cluster).unwrap();
    workload::submit_all(&mut sched, cfg.jobs.as_deref().unwrap()).unwrap();

    sched.run_all();

    let pending: Vec<JobId> = sched.pending().iter().map(Job::id).collect();
    assert_eq!(pending, vec![2]);
    assert_eq!(sched.nodes()[0].available_cores(), 0);
}

#[test]
fn demo_configuration_file_runs() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/cluster.yaml");
    let cfg = SchedulerConfig::load_from_file(&path).unwrap();
    assert_eq!(cfg.cluster, ClusterConfig::new(4, 24, 64));

    let mut sched = Scheduler::new(&cfg.cluster).unwrap();
    let jobs = cfg.jobs.unwrap();
    assert_eq!(workload::submit_all(&mut sched, &jobs).unwrap(), 7);
    sched.run_all();

    // Job 7 (16 cores / 60G) finds no node with 60G left.
    let pending: Vec<JobId> = sched.pending().iter().map(Job::id).collect();
    assert_eq!(pending, vec![7]);
    assert_eq!(sched.allocations().len(), 6);
    assert_eq!(sched.nodes()[1].available_cores(), 0);
}
