/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Job sources.
//!
//! A workload is a list of [`WorkloadEntry`] tuples, each routed to exactly
//! one policy queue.  It comes either from the `jobs:` section of a YAML
//! configuration file or from the built-in [`sample_jobs`] list.

use serde::Deserialize;
use tracing::debug;

use crate::job::{Job, JobError, JobId};
use crate::policy::OrderingPolicy;
use crate::scheduler::{Scheduler, SchedulerError};

/// One job as supplied by a job source, tagged with the queue it goes to.
///
/// ```yaml
/// - { id: 1, arrival_time: 1, cores: 10, memory_gb: 32, exec_hours: 5, policy: fcfs }
/// ```
///
/// `arrival_time` defaults to `0` and `policy` to `fcfs`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkloadEntry {
    pub id: JobId,
    #[serde(default)]
    pub arrival_time: u32,
    pub cores: u32,
    pub memory_gb: u64,
    pub exec_hours: u32,
    #[serde(default)]
    pub policy: OrderingPolicy,
}

impl WorkloadEntry {
    pub fn new(
        policy: OrderingPolicy,
        id: JobId,
        arrival_time: u32,
        cores: u32,
        memory_gb: u64,
        exec_hours: u32,
    ) -> Self {
        Self {
            id,
            arrival_time,
            cores,
            memory_gb,
            exec_hours,
            policy,
        }
    }

    /// Validate the demands and build the [`Job`].
    pub fn to_job(&self) -> Result<Job, JobError> {
        Job::new(
            self.id,
            self.arrival_time,
            self.cores,
            self.memory_gb,
            self.exec_hours,
        )
    }
}

/// The built-in sample workload: five jobs spread over the three queues.
pub fn sample_jobs() -> Vec<WorkloadEntry> {
    use OrderingPolicy::*;
    vec![
        WorkloadEntry::new(Fcfs, 1, 1, 10, 32, 5),
        WorkloadEntry::new(SmallestFootprintFirst, 2, 2, 5, 16, 3),
        WorkloadEntry::new(ShortestDurationFirst, 3, 3, 20, 48, 2),
        WorkloadEntry::new(Fcfs, 4, 4, 8, 20, 6),
        WorkloadEntry::new(SmallestFootprintFirst, 5, 5, 12, 40, 1),
    ]
}

/// Submit every entry to its policy queue, in list order.
///
/// Stops at the first invalid or duplicate job; entries before it stay
/// queued.  Returns the number of jobs submitted.
pub fn submit_all(
    scheduler: &mut Scheduler,
    entries: &[WorkloadEntry],
) -> Result<usize, SchedulerError> {
    for entry in entries {
        let job = entry.to_job()?;
        debug!(job = entry.id, policy = %entry.policy, "job submitted");
        scheduler.submit(entry.policy, job)?;
    }
    Ok(entries.len())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
