/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the batch scheduler.
//!
//! Three layers:
//!
//! * [`AdmissionReason`]: why one node turned one job away (carries exact
//!   resource values).  Not an error for the pass: a job every node rejects
//!   becomes *pending*, which is an ordinary outcome.
//! * [`ReleaseError`]: a release that would break the node ledger invariant.
//! * [`SchedulerError`]: construction and submission failures returned from
//!   [`Scheduler`](super::Scheduler).
//!
//! An empty queue is never an error; a pass over it is a no-op.

use thiserror::Error;

use crate::job::{JobError, JobId};
use crate::node::NodeId;

// ── Admission control ─────────────────────────────────────────────────────────

/// Detailed reason why a node could not take a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionReason {
    /// Fewer free cores than the job requests.
    InsufficientCores { required: u32, available: u32 },

    /// Less free memory than the job requests.
    InsufficientMemory { required_gb: u64, available_gb: u64 },
}

impl std::fmt::Display for AdmissionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdmissionReason::InsufficientCores {
                required,
                available,
            } => write!(
                f,
                "job requires {} cores but node only has {} available",
                required, available
            ),

            AdmissionReason::InsufficientMemory {
                required_gb,
                available_gb,
            } => write!(
                f,
                "job requires {}GB but node only has {}GB available",
                required_gb, available_gb
            ),
        }
    }
}

// ── Release ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseError {
    /// Returning the job's resources would push availability above the
    /// node's totals, i.e. the job was never allocated there.
    #[error("releasing job {job} would exceed the capacity of node {node}")]
    ExceedsCapacity { node: NodeId, job: JobId },
}

// ── Top-level scheduler errors ────────────────────────────────────────────────

/// Which per-node capacity was configured as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Cores,
    Memory,
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capacity::Cores => write!(f, "cores_per_node"),
            Capacity::Memory => write!(f, "memory_gb_per_node"),
        }
    }
}

/// Error type returned by [`Scheduler`](super::Scheduler) construction and
/// job submission.
///
/// | Variant | Raised by |
/// |---|---|
/// | `NoNodes` / `ZeroCapacity` | `Scheduler::new`, `ClusterConfig::validate` |
/// | `DuplicateJob` / `InvalidJob` | `Scheduler::submit`, workload loading |
/// | `UnknownPolicy` | `OrderingPolicy::from_str` |
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The cluster was configured with zero nodes.
    #[error("node pool is empty; node_count must be at least 1")]
    NoNodes,

    /// A per-node capacity was configured as zero.
    #[error("{0} must be greater than zero")]
    ZeroCapacity(Capacity),

    /// A job with this id was already submitted to this scheduler.
    #[error("job {job} was already submitted; job ids must be unique")]
    DuplicateJob { job: JobId },

    /// A job failed validation.
    #[error(transparent)]
    InvalidJob(#[from] JobError),

    /// The policy name is not recognised.
    #[error("unknown ordering policy: '{0}' (valid: fcfs, smallest-footprint, shortest-duration)")]
    UnknownPolicy(String),
}
