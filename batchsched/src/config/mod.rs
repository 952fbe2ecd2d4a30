//! Cluster and workload configuration loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! cluster:
//!   node_count: 128
//!   cores_per_node: 24
//!   memory_gb_per_node: 64
//! jobs:
//!   - { id: 1, arrival_time: 1, cores: 10, memory_gb: 32, exec_hours: 5, policy: fcfs }
//!   - { id: 2, arrival_time: 2, cores: 5, memory_gb: 16, exec_hours: 3, policy: smallest-footprint }
//! ```
//!
//! Every field is optional.  A missing `cluster` section (or key) falls back
//! to the reference cluster; a missing `jobs` section means "no workload in
//! the file" and leaves the choice of job source to the caller.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::node::{DEFAULT_CORES_PER_NODE, DEFAULT_MEMORY_GB_PER_NODE};
use crate::scheduler::error::{Capacity, SchedulerError};
use crate::workload::WorkloadEntry;

/// Number of nodes in the reference cluster.
pub const DEFAULT_NODE_COUNT: u32 = 128;

// ── ClusterConfig ─────────────────────────────────────────────────────────────

/// Shape of the node pool: every node is built with the same totals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub node_count: u32,
    pub cores_per_node: u32,
    pub memory_gb_per_node: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            cores_per_node: DEFAULT_CORES_PER_NODE,
            memory_gb_per_node: DEFAULT_MEMORY_GB_PER_NODE,
        }
    }
}

impl ClusterConfig {
    pub fn new(node_count: u32, cores_per_node: u32, memory_gb_per_node: u64) -> Self {
        Self {
            node_count,
            cores_per_node,
            memory_gb_per_node,
        }
    }

    /// Reject shapes that would produce an empty pool or a node whose
    /// utilisation is undefined (zero total).
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.node_count == 0 {
            return Err(SchedulerError::NoNodes);
        }
        if self.cores_per_node == 0 {
            return Err(SchedulerError::ZeroCapacity(Capacity::Cores));
        }
        if self.memory_gb_per_node == 0 {
            return Err(SchedulerError::ZeroCapacity(Capacity::Memory));
        }
        Ok(())
    }
}

// ── SchedulerConfig ───────────────────────────────────────────────────────────

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// `None` when the file has no `jobs` section.
    #[serde(default)]
    pub jobs: Option<Vec<WorkloadEntry>>,
}

impl SchedulerConfig {
    /// Parses `path` into a validated configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is
    /// structurally invalid, or the cluster shape fails
    /// [`ClusterConfig::validate`].
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading scheduler configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))?;

        info!(
            nodes = config.cluster.node_count,
            cores_per_node = config.cluster.cores_per_node,
            memory_gb_per_node = config.cluster.memory_gb_per_node,
            jobs = ?config.jobs.as_ref().map(Vec::len),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parses a YAML document.  Split out of
    /// [`load_from_file`](Self::load_from_file) so tests need no file.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserialises as unit, not as an empty mapping.
        if content.trim().is_empty() {
            debug!("empty configuration document, using defaults");
            return Ok(Self::default());
        }

        let config: SchedulerConfig =
            serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.cluster.validate()?;

        if let Some(jobs) = &config.jobs {
            for entry in jobs {
                debug!(
                    "  Job: {} | cores: {} | memory: {}GB | exec: {}h | policy: {}",
                    entry.id, entry.cores, entry.memory_gb, entry.exec_hours, entry.policy,
                );
            }
        }
        Ok(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
