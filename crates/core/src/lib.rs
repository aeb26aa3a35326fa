// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! turnstile-core: counting semaphores built three different ways
//!
//! This crate provides:
//! - The [`Semaphore`] capability contract shared by every design
//! - Three implementations with distinct fairness trade-offs:
//!   buffered-slot, coordinator, and chained-waiter
//! - A reusable verification harness (stress and fairness runners)

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod harness;
pub mod semaphore;

pub use harness::{
    run_fairness, run_stress, FairnessConfig, HarnessError, StressConfig, StressReport,
};
pub use semaphore::{
    ChainedSemaphore, CoordinatorSemaphore, Semaphore, SemaphoreKind, SlotSemaphore,
};
