// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fairness probe
//!
//! Launches acquirers with staggered start delays so their arrival order
//! is observable, then issues paced releases and records the order in
//! which the acquirers actually resume.

use super::HarnessError;
use crate::semaphore::Semaphore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Fairness run parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FairnessConfig {
    /// Number of acquirers to launch.
    pub acquirers: usize,
    /// Arrival spacing: acquirer `i` waits `i * stagger` before acquiring,
    /// and releases are issued `stagger` apart.
    #[serde(with = "humantime_serde")]
    pub stagger: Duration,
}

impl FairnessConfig {
    pub fn new(acquirers: usize) -> Self {
        Self {
            acquirers,
            stagger: Duration::from_millis(50),
        }
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }
}

/// Drive one semaphore through the fairness scenario.
///
/// Launches `config.acquirers` units with staggered starts, then issues
/// one release per unit, spaced `config.stagger` apart. `on_unblock` is
/// invoked with each unit index shortly after that unit resumes; the
/// complete unblock order is returned once every unit has finished.
///
/// The staggering makes arrival order observable. Whether unblock order
/// matches it is a per-design guarantee, not a property of this probe:
/// only the coordinator design promises an exact match.
pub async fn run_fairness(
    sem: Arc<dyn Semaphore>,
    config: &FairnessConfig,
    mut on_unblock: impl FnMut(usize),
) -> Result<Vec<usize>, HarnessError> {
    if config.acquirers == 0 {
        return Err(HarnessError::NoUnits);
    }

    let (order_tx, mut order_rx) = mpsc::channel(config.acquirers);

    for unit in 0..config.acquirers {
        let sem = Arc::clone(&sem);
        let order_tx = order_tx.clone();
        let delay = config.stagger * unit as u32;
        tokio::spawn(async move {
            sleep(delay).await;
            tracing::trace!(unit, "arriving");
            sem.acquire().await;
            let _ = order_tx.send(unit).await;
        });
    }
    drop(order_tx);

    let mut order = Vec::with_capacity(config.acquirers);
    for _ in 0..config.acquirers {
        sem.release().await;
        sleep(config.stagger).await;
        // Surface resumptions promptly instead of batching them at the end.
        while let Ok(unit) = order_rx.try_recv() {
            on_unblock(unit);
            order.push(unit);
        }
    }
    while let Some(unit) = order_rx.recv().await {
        on_unblock(unit);
        order.push(unit);
    }

    Ok(order)
}

#[cfg(test)]
#[path = "fairness_tests.rs"]
mod tests;
