// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Verification harness shared by every semaphore design
//!
//! Two scenarios:
//! - [`stress`] - concurrent acquirers and releasers hammering one
//!   semaphore until a cancellation signal fires
//! - [`fairness`] - staggered arrivals and paced releases, observing the
//!   order in which blocked acquirers resume

pub mod fairness;
pub mod stress;

pub use fairness::{run_fairness, FairnessConfig};
pub use stress::{run_stress, StressConfig, StressReport};

use thiserror::Error;

/// Rejected harness topologies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    /// The unit split is impossible.
    #[error("releaser count {releasers} exceeds total unit count {units}")]
    TopologyMismatch { releasers: usize, units: usize },
    /// A run with nothing to do.
    #[error("at least one unit is required")]
    NoUnits,
}
