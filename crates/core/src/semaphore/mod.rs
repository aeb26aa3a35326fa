// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Counting semaphores with interchangeable internals
//!
//! Every design satisfies the same two-operation contract; they differ in
//! how blocked acquirers are queued and therefore in the unblock-order
//! guarantee each one can make:
//! - [`slot`] - a buffered slot pool, no contractual order
//! - [`coordinator`] - a serializing coordinator task, FIFO from
//!   registration acceptance
//! - [`chained`] - a decentralized token-passing chain, FIFO from link
//!   publication

pub mod chained;
pub mod coordinator;
pub mod slot;

pub use chained::ChainedSemaphore;
pub use coordinator::{CoordinatorSemaphore, CoordinatorState};
pub use slot::SlotSemaphore;

use async_trait::async_trait;
use std::sync::Arc;

/// Shared contract for all semaphore designs.
///
/// Neither operation has a failure surface. Misuse (more releases than
/// acquires plus the initial count, or the reverse) is a precondition
/// violation that shows up as a permanently blocked caller, not as an
/// error value.
#[async_trait]
pub trait Semaphore: Send + Sync {
    /// Block until a unit of capacity is available, then take it.
    async fn acquire(&self);

    /// Return a unit of capacity.
    async fn release(&self);
}

/// Selector for the available semaphore designs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SemaphoreKind {
    /// Buffered slot pool.
    Slot,
    /// Serializing coordinator task.
    Coordinator,
    /// Decentralized token-passing chain.
    Chained,
}

impl SemaphoreKind {
    /// Every design, in the order the harness reports them.
    pub const ALL: [SemaphoreKind; 3] = [
        SemaphoreKind::Slot,
        SemaphoreKind::Coordinator,
        SemaphoreKind::Chained,
    ];

    /// Label used in harness reports.
    pub fn label(&self) -> &'static str {
        match self {
            SemaphoreKind::Slot => "slot",
            SemaphoreKind::Coordinator => "coordinator",
            SemaphoreKind::Chained => "chained",
        }
    }

    /// Construct this design with `initial` of `capacity` units available.
    ///
    /// `capacity` must be at least 1 and `initial` at most `capacity`.
    pub fn build(&self, capacity: usize, initial: usize) -> Arc<dyn Semaphore> {
        match self {
            SemaphoreKind::Slot => Arc::new(SlotSemaphore::new(capacity, initial)),
            SemaphoreKind::Coordinator => Arc::new(CoordinatorSemaphore::new(capacity, initial)),
            SemaphoreKind::Chained => Arc::new(ChainedSemaphore::new(capacity, initial)),
        }
    }
}
