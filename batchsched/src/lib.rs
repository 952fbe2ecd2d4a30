/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! batchsched – cluster batch scheduler
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── job           – Job, JobId, Allocation record
//! ├── node          – WorkerNode resource ledger, utilization rows
//! ├── policy/       – ordering policies + generic policy queue
//! ├── placement/    – PlacementStrategy trait, first-fit
//! ├── scheduler/    – passes, pending list, errors, ledger audit
//! ├── config/       – YAML cluster / workload configuration
//! ├── workload      – job sources (YAML entries, sample list)
//! └── report/       – utilization CSV writer
//! ```

pub mod config;
pub mod job;
pub mod node;
pub mod placement;
pub mod policy;
pub mod report;
pub mod scheduler;
pub mod workload;
