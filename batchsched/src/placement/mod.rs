/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Node placement strategies.
//!
//! A strategy receives one job and the whole node pool and, in a single
//! call, both picks a node and commits the reservation on it.  There is no
//! separate "find" step a caller could act on after the pool has changed.
//!
//! Only [`FirstFit`] is shipped.  Further strategies plug in through
//! [`Scheduler::with_strategy`](crate::scheduler::Scheduler::with_strategy)
//! without touching the pass logic.

use tracing::debug;

use crate::job::Job;
use crate::node::{NodeId, WorkerNode};

/// Select a node for `job` and reserve its resources there.
pub trait PlacementStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the id of the node that now holds `job`, or `None` if no node
    /// could take it.  On `None` every node's ledger is unchanged.
    fn try_place(&self, job: &Job, nodes: &mut [WorkerNode]) -> Option<NodeId>;
}

/// Scan nodes in id order and take the first one with enough room.
///
/// `O(nodes)` per job, no backtracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl PlacementStrategy for FirstFit {
    fn name(&self) -> &'static str {
        "first_fit"
    }

    fn try_place(&self, job: &Job, nodes: &mut [WorkerNode]) -> Option<NodeId> {
        for node in nodes.iter_mut() {
            match node.allocate(job) {
                Ok(()) => return Some(node.id()),
                Err(reason) => {
                    debug!(job = job.id(), node = node.id(), %reason, "node skipped");
                }
            }
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
