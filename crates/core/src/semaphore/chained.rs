// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chained-waiter semaphore
//!
//! A decentralized design with no coordinator task. Pending acquirers
//! form a logical chain: each one waits on the link its predecessor
//! published, and the right to consume release tokens travels hop by hop
//! down that chain.

use super::Semaphore;
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

/// Token passed between links of the wait chain.
enum Token {
    /// One unit of capacity, injected by `release`.
    Release,
    /// The receiving end of the release channel, forwarded by a finished
    /// predecessor so the next link can consume release tokens.
    Handoff(mpsc::Receiver<Token>),
}

/// Semaphore built from a dynamically grown chain of waiter links.
///
/// Links are owned channel halves rather than pointers into a shared
/// list: whoever pops the current tail slot is the only caller that can
/// ever touch that link again, so the chain needs no shared mutable
/// structure at all.
pub struct ChainedSemaphore {
    /// The pending tail slot. Holds exactly one link receiver, except in
    /// the window between a pop and the matching publish.
    tail_rx: Mutex<mpsc::Receiver<mpsc::Receiver<Token>>>,
    tail_tx: mpsc::Sender<mpsc::Receiver<Token>>,
    /// Injection point for release tokens, bounded by `capacity` so the
    /// available count can never exceed it.
    release_tx: mpsc::Sender<Token>,
}

impl ChainedSemaphore {
    /// Create a chain with `capacity` units, `initial` of them available.
    ///
    /// `capacity` must be at least 1 and `initial` at most `capacity`.
    pub fn new(capacity: usize, initial: usize) -> Self {
        let capacity = capacity.max(1);
        let (release_tx, release_rx) = mpsc::channel(capacity);
        let (tail_tx, tail_rx) = mpsc::channel(1);

        // Seed the chain so the first acquirer consumes release tokens
        // directly; both sends have room and cannot fail.
        let _ = tail_tx.try_send(release_rx);
        for _ in 0..initial.min(capacity) {
            let _ = release_tx.try_send(Token::Release);
        }

        Self {
            tail_rx: Mutex::new(tail_rx),
            tail_tx,
            release_tx,
        }
    }
}

#[async_trait]
impl Semaphore for ChainedSemaphore {
    /// Join the chain and wait for a release token to reach this link.
    ///
    /// FIFO order holds from the moment the fresh tail link has been
    /// published. A caller suspended between popping the old slot and
    /// publishing its own holds later arrivals behind it, and its
    /// position relative to callers that raced it to the pop is decided
    /// by the scheduler. That window is inherent to the chain
    /// construction; this is the weakest ordering guarantee of the three
    /// designs.
    async fn acquire(&self) {
        // Pop the current tail slot. This is the only point where two
        // acquirers contend.
        let slot = {
            let mut tail = self.tail_rx.lock().await;
            tail.recv().await
        };
        let Some(mut wait) = slot else {
            // Chain torn down mid-call; nothing left to wait for.
            return;
        };

        // Publish the link the next arrival will wait on. The slot was
        // just emptied, so this send completes immediately.
        let (next_tx, next_rx) = mpsc::channel(1);
        let _ = self.tail_tx.send(next_rx).await;

        // Walk handoffs until a release token arrives through our link.
        let released = loop {
            match wait.recv().await {
                Some(Token::Release) => break wait,
                Some(Token::Handoff(next)) => wait = next,
                None => return,
            }
        };

        // Pass the release channel one hop down. A link carries at most
        // one token, so its buffer slot is free and this never blocks.
        let _ = next_tx.send(Token::Handoff(released)).await;
    }

    /// Inject one release token at the head of the chain.
    ///
    /// Suspends once `capacity` unconsumed tokens are pending, which is
    /// what keeps the available count within capacity.
    async fn release(&self) {
        let _ = self.release_tx.send(Token::Release).await;
    }
}

#[cfg(test)]
#[path = "chained_tests.rs"]
mod tests;
