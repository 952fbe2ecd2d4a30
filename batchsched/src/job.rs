/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Job data structures for the batch scheduler.
//!
//! Three types model the life of one unit of work:
//!
//! ```text
//! job source ──(WorkloadEntry)──►  Job  ──(placement)──►  Allocation   (placed)
//!                                   │
//!                                   └──────────────────►  pending list (not placed)
//! ```
//!
//! # Ownership model
//! A [`Job`] is **moved** into exactly one policy queue on submission and
//! moved out again when the pass dequeues it.  After placement it either
//! leaves behind an [`Allocation`] record (the job itself is then dropped by
//! the scheduler) or is moved, unmodified, into the pending list.  The
//! resource demands are private fields with no setters, so nothing can
//! change them once [`Job::new`] has validated them.

use std::fmt;

use thiserror::Error;

use crate::node::NodeId;

/// Caller-assigned job identifier.  Unique within one scheduler.
pub type JobId = u32;

// ── Resource kinds ────────────────────────────────────────────────────────────

/// The three demand dimensions a job carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cores,
    Memory,
    ExecTime,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Cores => write!(f, "cores"),
            Resource::Memory => write!(f, "memory"),
            Resource::ExecTime => write!(f, "execution time"),
        }
    }
}

/// Rejection raised by [`Job::new`] for a demand that cannot be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    /// A resource demand was zero.  Demands are unsigned, so zero is the only
    /// non-positive value that can reach the constructor.
    #[error("job {job} requests zero {resource}; every demand must be positive")]
    ZeroResource { job: JobId, resource: Resource },
}

// ── Job ───────────────────────────────────────────────────────────────────────

/// One unit of work and its resource demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    /// Informational only; scheduling is not gated on it.
    arrival_time: u32,
    cores: u32,
    memory_gb: u64,
    exec_hours: u32,
    /// Lifecycle flag.  Nothing in the allocation engine flips it.
    completed: bool,
}

impl Job {
    /// Create a job, rejecting zero demands.
    ///
    /// Demands larger than any node are accepted; they simply end up pending.
    pub fn new(
        id: JobId,
        arrival_time: u32,
        cores: u32,
        memory_gb: u64,
        exec_hours: u32,
    ) -> Result<Self, JobError> {
        let zero = if cores == 0 {
            Some(Resource::Cores)
        } else if memory_gb == 0 {
            Some(Resource::Memory)
        } else if exec_hours == 0 {
            Some(Resource::ExecTime)
        } else {
            None
        };
        if let Some(resource) = zero {
            return Err(JobError::ZeroResource { job: id, resource });
        }

        Ok(Self {
            id,
            arrival_time,
            cores,
            memory_gb,
            exec_hours,
            completed: false,
        })
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn arrival_time(&self) -> u32 {
        self.arrival_time
    }

    /// CPU cores required.
    pub fn cores(&self) -> u32 {
        self.cores
    }

    /// Memory required, in GB.
    pub fn memory_gb(&self) -> u64 {
        self.memory_gb
    }

    /// Execution time, in hours.
    pub fn exec_hours(&self) -> u32 {
        self.exec_hours
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Resource-weighted cost: `exec_hours × cores × memory_gb`.
    ///
    /// Widened to `u128` so the product of the three demands cannot overflow.
    pub fn footprint(&self) -> u128 {
        self.exec_hours as u128 * self.cores as u128 * self.memory_gb as u128
    }
}

// ── Allocation (output) ───────────────────────────────────────────────────────

/// Record of one successful placement: which job holds how much of which
/// node.
///
/// Carries the demand alongside the ids so the ledger audit can check
/// capacity conservation without the job itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub job: JobId,
    pub node: NodeId,
    pub cores: u32,
    pub memory_gb: u64,
}

impl Allocation {
    pub fn new(job: &Job, node: NodeId) -> Self {
        Self {
            job: job.id(),
            node,
            cores: job.cores(),
            memory_gb: job.memory_gb(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
