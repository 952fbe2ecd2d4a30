/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Worker node resource ledger.
//!
//! A [`WorkerNode`] owns two availability counters (cores, memory) and the
//! fixed totals they are measured against.  The only mutators are
//! [`allocate`](WorkerNode::allocate) and [`release`](WorkerNode::release),
//! and both take `&mut self`: the capacity check and the subtraction happen
//! inside one call, so no caller can observe (or race) the gap between them.
//!
//! Invariant, at all times:
//! `0 <= available_cores <= total_cores` and
//! `0 <= available_memory_gb <= total_memory_gb`.

use tracing::debug;

use crate::job::Job;
use crate::scheduler::error::{AdmissionReason, ReleaseError};

/// Node identifier: position in the pool, assigned at scheduler construction.
pub type NodeId = u32;

/// Per-node total cores in the reference configuration.
pub const DEFAULT_CORES_PER_NODE: u32 = 24;

/// Per-node total memory (GB) in the reference configuration.
pub const DEFAULT_MEMORY_GB_PER_NODE: u64 = 64;

// ── NodeUtilization ───────────────────────────────────────────────────────────

/// One row handed to the report sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeUtilization {
    pub node_id: NodeId,
    pub cpu_pct: f64,
    pub memory_pct: f64,
}

// ── WorkerNode ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerNode {
    id: NodeId,
    total_cores: u32,
    total_memory_gb: u64,
    available_cores: u32,
    available_memory_gb: u64,
}

impl WorkerNode {
    /// Create an idle node.  Totals are expected to be non-zero; the
    /// scheduler validates that before building its pool.
    pub fn new(id: NodeId, total_cores: u32, total_memory_gb: u64) -> Self {
        Self {
            id,
            total_cores,
            total_memory_gb,
            available_cores: total_cores,
            available_memory_gb: total_memory_gb,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn total_cores(&self) -> u32 {
        self.total_cores
    }

    pub fn total_memory_gb(&self) -> u64 {
        self.total_memory_gb
    }

    pub fn available_cores(&self) -> u32 {
        self.available_cores
    }

    pub fn available_memory_gb(&self) -> u64 {
        self.available_memory_gb
    }

    /// Returns `true` if `job` would fit into the residual capacity right now.
    pub fn fits(&self, job: &Job) -> bool {
        self.check(job).is_ok()
    }

    fn check(&self, job: &Job) -> Result<(), AdmissionReason> {
        if self.available_cores < job.cores() {
            return Err(AdmissionReason::InsufficientCores {
                required: job.cores(),
                available: self.available_cores,
            });
        }
        if self.available_memory_gb < job.memory_gb() {
            return Err(AdmissionReason::InsufficientMemory {
                required_gb: job.memory_gb(),
                available_gb: self.available_memory_gb,
            });
        }
        Ok(())
    }

    /// Reserve the job's cores and memory.
    ///
    /// On `Err` the ledger is untouched and the reason names the first
    /// dimension that fell short (cores are checked before memory).
    pub fn allocate(&mut self, job: &Job) -> Result<(), AdmissionReason> {
        self.check(job)?;
        self.available_cores -= job.cores();
        self.available_memory_gb -= job.memory_gb();

        debug!(
            node = self.id,
            job = job.id(),
            cores_left = self.available_cores,
            memory_left_gb = self.available_memory_gb,
            "resources reserved"
        );
        Ok(())
    }

    /// Return the job's cores and memory to the pool.
    ///
    /// Must only be paired with a prior successful [`allocate`](Self::allocate)
    /// of the same job.  A release that would lift availability above the
    /// totals is refused and leaves the ledger untouched.
    pub fn release(&mut self, job: &Job) -> Result<(), ReleaseError> {
        let cores = self
            .available_cores
            .checked_add(job.cores())
            .filter(|&c| c <= self.total_cores);
        let memory = self
            .available_memory_gb
            .checked_add(job.memory_gb())
            .filter(|&m| m <= self.total_memory_gb);

        match (cores, memory) {
            (Some(cores), Some(memory)) => {
                self.available_cores = cores;
                self.available_memory_gb = memory;
                debug!(
                    node = self.id,
                    job = job.id(),
                    cores_left = self.available_cores,
                    memory_left_gb = self.available_memory_gb,
                    "resources released"
                );
                Ok(())
            }
            _ => Err(ReleaseError::ExceedsCapacity {
                node: self.id,
                job: job.id(),
            }),
        }
    }

    /// `100 × (1 − available / total)` for cores.
    pub fn cpu_utilization_pct(&self) -> f64 {
        100.0 * (1.0 - self.available_cores as f64 / self.total_cores as f64)
    }

    /// `100 × (1 − available / total)` for memory.
    pub fn memory_utilization_pct(&self) -> f64 {
        100.0 * (1.0 - self.available_memory_gb as f64 / self.total_memory_gb as f64)
    }

    pub fn utilization(&self) -> NodeUtilization {
        NodeUtilization {
            node_id: self.id,
            cpu_pct: self.cpu_utilization_pct(),
            memory_pct: self.memory_utilization_pct(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
