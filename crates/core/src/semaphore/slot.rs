// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buffered-slot semaphore
//!
//! The baseline design: a bounded channel acts as a pool of "held"
//! markers. Acquiring inserts a marker and releasing drains one, so the
//! channel's own backpressure is the entire blocking story.

use super::Semaphore;
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

/// Semaphore backed by a fixed-capacity marker pool.
///
/// `acquire` inserts a marker and blocks while the pool is full (every
/// unit of capacity held); `release` drains one and blocks while the pool
/// is empty (a release with no matching acquire). Blocked callers resume
/// in whatever order the channel's internal wait list produces. That
/// order is FIFO in practice, but it is an implementation detail of the
/// channel, not part of this design's contract.
pub struct SlotSemaphore {
    /// Send half of the pool: one queued marker per held unit.
    held_tx: mpsc::Sender<()>,
    /// Receive half, shared by every releasing caller.
    held_rx: Mutex<mpsc::Receiver<()>>,
}

impl SlotSemaphore {
    /// Create a pool with `capacity` slots, `initial` of them available.
    ///
    /// `capacity` must be at least 1 and `initial` at most `capacity`.
    pub fn new(capacity: usize, initial: usize) -> Self {
        let capacity = capacity.max(1);
        let (held_tx, held_rx) = mpsc::channel(capacity);
        // Pre-fill so exactly `initial` units start out acquirable.
        for _ in 0..capacity.saturating_sub(initial.min(capacity)) {
            // The buffer has room for `capacity` markers, so this cannot fail.
            let _ = held_tx.try_send(());
        }
        Self {
            held_tx,
            held_rx: Mutex::new(held_rx),
        }
    }
}

#[async_trait]
impl Semaphore for SlotSemaphore {
    async fn acquire(&self) {
        // The receiver lives in `self`, so the channel is never closed here.
        let _ = self.held_tx.send(()).await;
    }

    async fn release(&self) {
        let mut held = self.held_rx.lock().await;
        let _ = held.recv().await;
    }
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
