// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const TICK: Duration = Duration::from_millis(50);

#[tokio::test]
async fn initial_units_grant_without_a_release() {
    let sem = SlotSemaphore::new(2, 2);
    sem.acquire().await;
    sem.acquire().await;
}

#[tokio::test]
async fn acquire_blocks_once_all_capacity_is_held() {
    let sem = SlotSemaphore::new(1, 1);
    sem.acquire().await;
    let blocked = timeout(TICK, sem.acquire()).await;
    assert!(blocked.is_err(), "acquire should block at capacity");
}

#[tokio::test]
async fn release_blocks_without_a_matching_acquire() {
    // Nothing held yet, so the pool has no marker to drain.
    let sem = SlotSemaphore::new(1, 1);
    let blocked = timeout(TICK, sem.release()).await;
    assert!(blocked.is_err(), "release should block on an empty pool");
}

#[tokio::test]
async fn release_unblocks_a_pending_acquire() {
    let sem = Arc::new(SlotSemaphore::new(1, 0));
    let waiter = {
        let sem = Arc::clone(&sem);
        tokio::spawn(async move { sem.acquire().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    sem.release().await;

    timeout(Duration::from_secs(1), waiter)
        .await
        .expect("acquire did not unblock after release")
        .unwrap();
}

#[tokio::test]
async fn units_are_conserved_across_a_burst() {
    let sem = Arc::new(SlotSemaphore::new(4, 0));

    // Feed four units, consume four units, in arbitrary interleaving.
    for _ in 0..4 {
        sem.release().await;
    }
    for _ in 0..4 {
        timeout(Duration::from_secs(1), sem.acquire())
            .await
            .expect("a released unit should satisfy an acquire");
    }

    // Everything handed out again: the next acquire must block.
    let blocked = timeout(TICK, sem.acquire()).await;
    assert!(blocked.is_err());
}
