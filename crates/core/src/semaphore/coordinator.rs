// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator-based semaphore
//!
//! One spawned task owns every piece of mutable state (the available
//! count and the waiter queue) and is the only code that touches it.
//! Acquire and release requests are funneled to it through two bounded
//! channels, which serializes every transition and yields a provable
//! FIFO unblock order for accepted registrations.

use super::Semaphore;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::{mpsc, oneshot};

/// Pending requests each channel buffers before submission itself
/// suspends. The coordinator drains its inbox faster than callers fill
/// it under any realistic load.
const REQUEST_BACKLOG: usize = 100;

/// The coordinator's view of the semaphore: an available count plus a
/// FIFO queue of waiter handles.
///
/// Pure state, generic over the waiter handle so transitions can be
/// tested without a runtime. A handle returned from [`register`] or
/// [`release`] is a caller that must be notified now.
///
/// [`register`]: CoordinatorState::register
/// [`release`]: CoordinatorState::release
#[derive(Debug)]
pub struct CoordinatorState<W> {
    capacity: usize,
    available: usize,
    waiters: VecDeque<W>,
}

impl<W> CoordinatorState<W> {
    pub fn new(capacity: usize, initial: usize) -> Self {
        Self {
            capacity,
            available: initial.min(capacity),
            waiters: VecDeque::new(),
        }
    }

    /// Units free for immediate acquisition.
    pub fn available(&self) -> usize {
        self.available
    }

    /// Registrations currently queued.
    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }

    /// Register an acquire request. Hands the waiter straight back when a
    /// unit is free right now; otherwise appends it to the queue.
    pub fn register(&mut self, waiter: W) -> Option<W> {
        if self.available > 0 {
            self.available -= 1;
            Some(waiter)
        } else {
            self.waiters.push_back(waiter);
            None
        }
    }

    /// Process a release. Pops the oldest waiter when one is queued (the
    /// freed unit is handed off directly, bypassing the count); otherwise
    /// the unit goes back into the available pool.
    pub fn release(&mut self) -> Option<W> {
        match self.waiters.pop_front() {
            Some(waiter) => Some(waiter),
            None => {
                // Saturate rather than let an unbalanced release push the
                // count past capacity. Unreachable under balanced usage.
                self.available = (self.available + 1).min(self.capacity);
                None
            }
        }
    }
}

/// Semaphore whose state lives inside a single serializing task.
pub struct CoordinatorSemaphore {
    acquire_tx: mpsc::Sender<oneshot::Sender<()>>,
    release_tx: mpsc::Sender<()>,
}

impl CoordinatorSemaphore {
    /// Spawn the coordinator task and return the handle callers share.
    ///
    /// The task exits once every clone of the handle has been dropped and
    /// both request channels have drained.
    pub fn new(capacity: usize, initial: usize) -> Self {
        let (acquire_tx, mut acquire_rx) = mpsc::channel::<oneshot::Sender<()>>(REQUEST_BACKLOG);
        let (release_tx, mut release_rx) = mpsc::channel::<()>(REQUEST_BACKLOG);

        tokio::spawn(async move {
            let mut state: CoordinatorState<oneshot::Sender<()>> =
                CoordinatorState::new(capacity, initial);
            loop {
                tokio::select! {
                    Some(()) = release_rx.recv() => {
                        if let Some(waiter) = state.release() {
                            let _ = waiter.send(());
                        }
                    }
                    Some(reply) = acquire_rx.recv() => {
                        if let Some(waiter) = state.register(reply) {
                            let _ = waiter.send(());
                        }
                    }
                    else => break,
                }
            }
        });

        Self {
            acquire_tx,
            release_tx,
        }
    }
}

#[async_trait]
impl Semaphore for CoordinatorSemaphore {
    /// Submit a private notification handle to the coordinator, then
    /// block until it fires.
    ///
    /// FIFO order is measured from the moment the coordinator accepts the
    /// registration. A caller can itself be suspended submitting the
    /// registration while the request channel is full; ordering between
    /// two callers both stuck at that step is decided by the channel, not
    /// by this design.
    async fn acquire(&self) {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.acquire_tx.send(reply_tx).await.is_err() {
            // Coordinator gone: every handle was dropped already.
            return;
        }
        let _ = reply_rx.await;
    }

    async fn release(&self) {
        let _ = self.release_tx.send(()).await;
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
