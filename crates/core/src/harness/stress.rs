// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mixed stress scenario
//!
//! Releaser units feed capacity in a tight loop while acquirer units
//! drain it, until a cancellation signal fires. The run records how many
//! operations each unit completed.

use super::HarnessError;
use crate::semaphore::Semaphore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Stress run parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StressConfig {
    /// Units that call `release` in a loop.
    pub releasers: usize,
    /// Total units; `units - releasers` of them call `acquire` in a loop.
    pub units: usize,
    /// Wall-clock window the units run for.
    #[serde(with = "humantime_serde")]
    pub window: Duration,
}

impl StressConfig {
    pub fn new(releasers: usize, units: usize) -> Self {
        Self {
            releasers,
            units,
            window: Duration::from_secs(1),
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    fn validate(&self) -> Result<(), HarnessError> {
        if self.units == 0 {
            return Err(HarnessError::NoUnits);
        }
        if self.releasers > self.units {
            return Err(HarnessError::TopologyMismatch {
                releasers: self.releasers,
                units: self.units,
            });
        }
        Ok(())
    }
}

/// Operation counts collected from one stress run.
#[derive(Clone, Debug)]
pub struct StressReport {
    /// Completed operations per unit, releasers first.
    pub per_unit: Vec<u64>,
}

impl StressReport {
    /// The tab-separated row emitted by the harness binary.
    pub fn row(&self, label: &str) -> String {
        let mut row = String::from(label);
        for ops in &self.per_unit {
            row.push('\t');
            row.push_str(&ops.to_string());
        }
        row
    }
}

/// Drive one semaphore through the stress scenario.
///
/// Spawns `config.releasers` releaser units and the rest as acquirers,
/// lets them run for `config.window`, then cancels. Every unit polls its
/// group's cancellation flag between operations, so cancellation is
/// cooperative: a unit blocked inside `acquire` or `release` with no
/// counterpart in sight only observes the flag once that operation
/// completes. Acquirers are cancelled and joined first, while releasers
/// are still feeding units, so no acquirer stays blocked past
/// cancellation; releasers follow. Exactly `config.units` operation
/// counts are collected before this returns.
pub async fn run_stress(
    sem: Arc<dyn Semaphore>,
    config: &StressConfig,
) -> Result<StressReport, HarnessError> {
    config.validate()?;

    let (stop_releasers_tx, stop_releasers) = watch::channel(false);
    let (stop_acquirers_tx, stop_acquirers) = watch::channel(false);
    let (ops_tx, mut ops_rx) = mpsc::channel(config.units);

    let mut releasers = Vec::with_capacity(config.releasers);
    for unit in 0..config.releasers {
        releasers.push(spawn_releaser(
            Arc::clone(&sem),
            unit,
            stop_releasers.clone(),
            ops_tx.clone(),
        ));
    }

    let mut acquirers = Vec::with_capacity(config.units - config.releasers);
    for unit in config.releasers..config.units {
        acquirers.push(spawn_acquirer(
            Arc::clone(&sem),
            unit,
            stop_acquirers.clone(),
            ops_tx.clone(),
        ));
    }
    drop(ops_tx);

    tokio::time::sleep(config.window).await;

    // Acquirers first: releasers keep supplying units, so every blocked
    // acquire completes and its unit sees the flag.
    let _ = stop_acquirers_tx.send(true);
    for handle in acquirers {
        let _ = handle.await;
    }
    let _ = stop_releasers_tx.send(true);
    for handle in releasers {
        let _ = handle.await;
    }

    let mut per_unit = vec![0u64; config.units];
    while let Some((unit, ops)) = ops_rx.recv().await {
        per_unit[unit] = ops;
    }

    Ok(StressReport { per_unit })
}

fn spawn_releaser(
    sem: Arc<dyn Semaphore>,
    unit: usize,
    stop: watch::Receiver<bool>,
    ops_tx: mpsc::Sender<(usize, u64)>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ops = 0u64;
        while !*stop.borrow() {
            tracing::trace!(unit, "release");
            sem.release().await;
            ops += 1;
        }
        let _ = ops_tx.send((unit, ops)).await;
    })
}

fn spawn_acquirer(
    sem: Arc<dyn Semaphore>,
    unit: usize,
    stop: watch::Receiver<bool>,
    ops_tx: mpsc::Sender<(usize, u64)>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ops = 0u64;
        while !*stop.borrow() {
            tracing::trace!(unit, "waiting");
            sem.acquire().await;
            tracing::trace!(unit, "unblocked");
            ops += 1;
        }
        let _ = ops_tx.send((unit, ops)).await;
    })
}

#[cfg(test)]
#[path = "stress_tests.rs"]
mod tests;
