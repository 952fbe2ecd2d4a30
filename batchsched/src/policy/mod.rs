/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Job ordering policies and the queue they parameterise.
//!
//! A policy is data, not code: [`OrderingPolicy::sort_key`] maps a job to an
//! ascending key and one generic [`PolicyQueue`] dequeues the smallest key
//! first.  The three policies are three instantiations of that one queue.
//!
//! | Policy | Key | Effect |
//! |---|---|---|
//! | `Fcfs` | constant `0` | enqueue order only (plain FIFO) |
//! | `SmallestFootprintFirst` | `exec × cores × memory` | lightest resource-time cost first |
//! | `ShortestDurationFirst` | `exec` | shortest job first |
//!
//! Equal keys are dequeued in enqueue order, so every policy is stable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::job::Job;
use crate::scheduler::error::SchedulerError;

// ── OrderingPolicy ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum OrderingPolicy {
    /// First come, first served.
    #[default]
    #[serde(rename = "fcfs")]
    Fcfs,
    /// Ascending [`Job::footprint`].
    #[serde(rename = "smallest-footprint")]
    SmallestFootprintFirst,
    /// Ascending execution time.
    #[serde(rename = "shortest-duration")]
    ShortestDurationFirst,
}

impl OrderingPolicy {
    /// All policies, in the order a full scheduling run drains them.
    pub const ALL: [OrderingPolicy; 3] = [
        OrderingPolicy::Fcfs,
        OrderingPolicy::SmallestFootprintFirst,
        OrderingPolicy::ShortestDurationFirst,
    ];

    /// Ascending dequeue key for `job` under this policy.
    pub fn sort_key(self, job: &Job) -> u128 {
        match self {
            OrderingPolicy::Fcfs => 0,
            OrderingPolicy::SmallestFootprintFirst => job.footprint(),
            OrderingPolicy::ShortestDurationFirst => job.exec_hours() as u128,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderingPolicy::Fcfs => "fcfs",
            OrderingPolicy::SmallestFootprintFirst => "smallest-footprint",
            OrderingPolicy::ShortestDurationFirst => "shortest-duration",
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderingPolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderingPolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SchedulerError::UnknownPolicy(s.to_string()))
    }
}

// ── PolicyQueue ───────────────────────────────────────────────────────────────

/// Heap entry.  Ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// `(key, seq)` pair first.
#[derive(Debug)]
struct QueuedJob {
    key: u128,
    seq: u64,
    job: Job,
}

impl PartialEq for QueuedJob {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for QueuedJob {}

impl PartialOrd for QueuedJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedJob {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: smaller key wins, then earlier enqueue.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A job queue whose dequeue order is fixed by one [`OrderingPolicy`].
#[derive(Debug)]
pub struct PolicyQueue {
    policy: OrderingPolicy,
    heap: BinaryHeap<QueuedJob>,
    next_seq: u64,
}

impl PolicyQueue {
    pub fn new(policy: OrderingPolicy) -> Self {
        Self {
            policy,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    pub fn push(&mut self, job: Job) {
        let key = self.policy.sort_key(&job);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueuedJob { key, seq, job });
    }

    /// Remove and return the next job in policy order.
    pub fn pop(&mut self) -> Option<Job> {
        self.heap.pop().map(|q| q.job)
    }

    /// The job [`pop`](Self::pop) would return next.
    pub fn peek(&self) -> Option<&Job> {
        self.heap.peek().map(|q| &q.job)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
