//! Batch scheduler: node pool, policy queues and scheduling passes.
//!
//! [`Scheduler`] owns a fixed pool of [`WorkerNode`]s, one [`PolicyQueue`]
//! per [`OrderingPolicy`], the list of pending jobs and the allocation
//! records.  A *pass* drains one policy's queue in that policy's order and
//! offers every job to the placement strategy against the shared pool:
//!
//! ```text
//! submit(policy, job) ──► PolicyQueue[policy]
//!                               │ run_pass(policy)
//!                               ▼
//!                    PlacementStrategy::try_place(job, nodes)
//!                         │                      │
//!                   Some(node)                  None
//!                         ▼                      ▼
//!              allocations.push(..)      pending.push(job)
//! ```
//!
//! # Pass semantics
//! * A pass ends when its queue is empty; a pass over an empty queue is a
//!   no-op that returns an empty [`PassReport`].
//! * Pending jobs are **not** retried within the pass.  They accumulate
//!   across passes of every policy until the caller moves them back with
//!   [`Scheduler::requeue_pending`].
//! * The node pool is shared by all policies.  Passes run back to back see
//!   the capacity left behind by earlier passes.
//!
//! # Concurrency
//! Everything runs on the caller's thread.  Placement mutates nodes through
//! `&mut self`, so the check-and-reserve step in
//! [`WorkerNode::allocate`] cannot interleave with another placement.
//!
//! # Example
//! ```rust,ignore
//! let mut scheduler = Scheduler::new(&ClusterConfig::default())?;
//! scheduler.submit(OrderingPolicy::Fcfs, Job::new(1, 1, 10, 32, 5)?)?;
//! let reports = scheduler.run_all();
//! let rows = scheduler.utilization();
//! ```

pub mod audit;
pub mod error;

pub use error::{AdmissionReason, Capacity, ReleaseError, SchedulerError};

use std::collections::{BTreeMap, HashSet};

use tracing::{info, warn};

use crate::config::ClusterConfig;
use crate::job::{Allocation, Job, JobId};
use crate::node::{NodeId, NodeUtilization, WorkerNode};
use crate::placement::{FirstFit, PlacementStrategy};
use crate::policy::{OrderingPolicy, PolicyQueue};

use audit::check_conservation;

// ── Pass results ──────────────────────────────────────────────────────────────

/// Per-job outcome of a pass, in the order jobs were dequeued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementEvent {
    /// The job now holds resources on `node`.
    Allocated { job: JobId, node: NodeId },
    /// No node had room; the job was moved to the pending list.
    Pending { job: JobId },
}

impl PlacementEvent {
    pub fn job(&self) -> JobId {
        match *self {
            PlacementEvent::Allocated { job, .. } | PlacementEvent::Pending { job } => job,
        }
    }
}

/// Everything one pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub policy: OrderingPolicy,
    pub events: Vec<PlacementEvent>,
}

impl PassReport {
    /// Job ids in the order the pass offered them to placement.
    pub fn dequeue_order(&self) -> Vec<JobId> {
        self.events.iter().map(PlacementEvent::job).collect()
    }

    pub fn allocated(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PlacementEvent::Allocated { .. }))
            .count()
    }

    pub fn pending(&self) -> usize {
        self.events.len() - self.allocated()
    }

    /// `true` when the queue was already empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

pub struct Scheduler {
    /// Indexed by [`NodeId`]; scan order is never reshuffled.
    nodes: Vec<WorkerNode>,

    /// One independent queue per policy.
    queues: BTreeMap<OrderingPolicy, PolicyQueue>,

    /// Jobs no node could take, across all passes, in failure order.
    pending: Vec<Job>,

    /// One record per successful placement, in placement order.
    allocations: Vec<Allocation>,

    /// Every job id ever submitted, for duplicate detection.
    submitted: HashSet<JobId>,

    strategy: Box<dyn PlacementStrategy>,
}

impl Scheduler {
    /// Build a scheduler with `config.node_count` idle nodes (ids
    /// `0..node_count`) and first-fit placement.
    ///
    /// # Errors
    /// [`SchedulerError::NoNodes`] or [`SchedulerError::ZeroCapacity`] if the
    /// cluster shape is invalid.
    pub fn new(config: &ClusterConfig) -> Result<Self, SchedulerError> {
        config.validate()?;

        let nodes: Vec<WorkerNode> = (0..config.node_count)
            .map(|id| WorkerNode::new(id, config.cores_per_node, config.memory_gb_per_node))
            .collect();
        let queues = OrderingPolicy::ALL
            .into_iter()
            .map(|p| (p, PolicyQueue::new(p)))
            .collect();

        info!(
            node_count = config.node_count,
            cores_per_node = config.cores_per_node,
            memory_gb_per_node = config.memory_gb_per_node,
            "node pool initialised"
        );

        Ok(Self {
            nodes,
            queues,
            pending: Vec::new(),
            allocations: Vec::new(),
            submitted: HashSet::new(),
            strategy: Box::new(FirstFit),
        })
    }

    /// Replace the placement strategy.
    pub fn with_strategy(mut self, strategy: impl PlacementStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    // ── Submission ────────────────────────────────────────────────────────────

    /// Enqueue `job` on `policy`'s queue.
    ///
    /// # Errors
    /// [`SchedulerError::DuplicateJob`] if a job with the same id was
    /// submitted before (to any queue).  The rejected job is dropped.
    pub fn submit(&mut self, policy: OrderingPolicy, job: Job) -> Result<(), SchedulerError> {
        if !self.submitted.insert(job.id()) {
            return Err(SchedulerError::DuplicateJob { job: job.id() });
        }
        self.queue_mut(policy).push(job);
        Ok(())
    }

    /// Move every pending job back onto `policy`'s queue for a later pass.
    ///
    /// Never called by the scheduler itself.  Returns the number of jobs
    /// moved.
    pub fn requeue_pending(&mut self, policy: OrderingPolicy) -> usize {
        let jobs = std::mem::take(&mut self.pending);
        let moved = jobs.len();
        let queue = self.queue_mut(policy);
        for job in jobs {
            queue.push(job);
        }
        if moved > 0 {
            info!(policy = %policy, jobs = moved, "pending jobs re-queued");
        }
        moved
    }

    fn queue_mut(&mut self, policy: OrderingPolicy) -> &mut PolicyQueue {
        self.queues
            .entry(policy)
            .or_insert_with(|| PolicyQueue::new(policy))
    }

    // ── Scheduling passes ─────────────────────────────────────────────────────

    /// Drain `policy`'s queue against the node pool.
    pub fn run_pass(&mut self, policy: OrderingPolicy) -> PassReport {
        let queue = self
            .queues
            .entry(policy)
            .or_insert_with(|| PolicyQueue::new(policy));

        info!(
            policy = %policy,
            strategy = self.strategy.name(),
            queued = queue.len(),
            "=== scheduling pass ==="
        );

        let mut events = Vec::with_capacity(queue.len());
        while let Some(job) = queue.pop() {
            match self.strategy.try_place(&job, &mut self.nodes) {
                Some(node) => {
                    info!(job = job.id(), node = node, "✓ allocated");
                    self.allocations.push(Allocation::new(&job, node));
                    events.push(PlacementEvent::Allocated {
                        job: job.id(),
                        node,
                    });
                }
                None => {
                    warn!(
                        job = job.id(),
                        cores = job.cores(),
                        memory_gb = job.memory_gb(),
                        "✗ no node can fit job, moved to pending"
                    );
                    events.push(PlacementEvent::Pending { job: job.id() });
                    self.pending.push(job);
                }
            }
        }

        self.run_ledger_audit();

        let report = PassReport { policy, events };
        info!(
            policy = %policy,
            allocated = report.allocated(),
            pending = report.pending(),
            "pass done"
        );
        report
    }

    /// Run one pass per policy in [`OrderingPolicy::ALL`] order.
    pub fn run_all(&mut self) -> Vec<PassReport> {
        self.run_passes(&OrderingPolicy::ALL)
    }

    /// Run one pass per entry of `policies`, in the given order.
    pub fn run_passes(&mut self, policies: &[OrderingPolicy]) -> Vec<PassReport> {
        policies.iter().map(|&p| self.run_pass(p)).collect()
    }

    /// Emit a warning for every node whose ledger does not balance against
    /// the allocation records.
    fn run_ledger_audit(&self) {
        for v in check_conservation(&self.nodes, &self.allocations) {
            warn!(
                node = v.node,
                cores_accounted = v.cores_accounted,
                total_cores = v.total_cores,
                memory_accounted_gb = v.memory_accounted_gb as u64,
                total_memory_gb = v.total_memory_gb,
                "node ledger does not balance against allocation records"
            );
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// All nodes, in id order.
    pub fn nodes(&self) -> &[WorkerNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&WorkerNode> {
        self.nodes.get(id as usize)
    }

    /// Jobs that failed placement, in failure order.
    pub fn pending(&self) -> &[Job] {
        &self.pending
    }

    /// Successful placements, in placement order.
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Number of jobs waiting in `policy`'s queue.
    pub fn queued(&self, policy: OrderingPolicy) -> usize {
        self.queues.get(&policy).map_or(0, PolicyQueue::len)
    }

    /// Per-node utilisation rows, in node-id order.  Read-only: calling it
    /// twice without an intervening pass returns identical rows.
    pub fn utilization(&self) -> Vec<NodeUtilization> {
        self.nodes.iter().map(WorkerNode::utilization).collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
