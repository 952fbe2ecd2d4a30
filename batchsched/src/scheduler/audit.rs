/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Node ledger audit.
//!
//! Run after every pass.  For each node the free capacity plus everything
//! the allocation records say is held there must equal the node's total:
//!
//! ```text
//! available_cores     + Σ alloc.cores     == total_cores
//! available_memory_gb + Σ alloc.memory_gb == total_memory_gb
//! ```
//!
//! A violation means the ledger and the allocation records disagree.  The
//! scheduler logs it as a warning; the pass result is not invalidated.

use std::collections::BTreeMap;

use crate::job::Allocation;
use crate::node::{NodeId, WorkerNode};

/// One node whose ledger does not balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConservationViolation {
    pub node: NodeId,
    /// `available + allocated` for cores, as observed.
    pub cores_accounted: u64,
    pub total_cores: u32,
    /// `available + allocated` for memory, as observed.
    pub memory_accounted_gb: u128,
    pub total_memory_gb: u64,
}

/// Check capacity conservation for every node.
///
/// Returns the violating nodes in id order; an empty vector means every
/// ledger balances.  Allocation records naming a node that is not in
/// `nodes` are ignored.
pub fn check_conservation(
    nodes: &[WorkerNode],
    allocations: &[Allocation],
) -> Vec<ConservationViolation> {
    // node → (cores, memory) held by allocation records
    let mut held: BTreeMap<NodeId, (u64, u128)> = BTreeMap::new();
    for alloc in allocations {
        let entry = held.entry(alloc.node).or_default();
        entry.0 += alloc.cores as u64;
        entry.1 += alloc.memory_gb as u128;
    }

    nodes
        .iter()
        .filter_map(|node| {
            let (cores, memory) = held.get(&node.id()).copied().unwrap_or_default();
            let cores_accounted = node.available_cores() as u64 + cores;
            let memory_accounted_gb = node.available_memory_gb() as u128 + memory;

            let balanced = cores_accounted == node.total_cores() as u64
                && memory_accounted_gb == node.total_memory_gb() as u128;
            (!balanced).then(|| ConservationViolation {
                node: node.id(),
                cores_accounted,
                total_cores: node.total_cores(),
                memory_accounted_gb,
                total_memory_gb: node.total_memory_gb(),
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
