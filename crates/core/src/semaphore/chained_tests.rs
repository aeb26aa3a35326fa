// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const TICK: Duration = Duration::from_millis(50);

#[tokio::test]
async fn initial_units_grant_without_a_release() {
    let sem = ChainedSemaphore::new(4, 2);
    timeout(Duration::from_secs(1), sem.acquire())
        .await
        .expect("first seeded unit");
    timeout(Duration::from_secs(1), sem.acquire())
        .await
        .expect("second seeded unit");
}

#[tokio::test]
async fn release_token_reaches_the_head_waiter() {
    let sem = Arc::new(ChainedSemaphore::new(1, 0));
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

#[tokio::test(flavor = "multi_thread")]
async fn eligibility_propagates_down_the_chain() {
    let sem: Arc<ChainedSemaphore> = Arc::new(ChainedSemaphore::new(16, 0));
    let mut waiters = Vec::new();

    for unit in 0..3u64 {
        let sem = Arc::clone(&sem);
        waiters.push(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30 * unit)).await;
            sem.acquire().await;
        }));
    }
    tokio::time::sleep(Duration::from_millis(150)).await;

    for _ in 0..3 {
        sem.release().await;
    }

    for waiter in waiters {
        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("every chained waiter should resume")
            .unwrap();
    }
}

#[tokio::test]
async fn release_suspends_once_capacity_tokens_are_pending() {
    let sem = ChainedSemaphore::new(2, 0);
    sem.release().await;
    sem.release().await;

    let blocked = timeout(TICK, sem.release()).await;
    assert!(blocked.is_err(), "release should block at the capacity bound");
}

#[tokio::test]
async fn pending_tokens_satisfy_later_acquires() {
    let sem = ChainedSemaphore::new(8, 0);
    sem.release().await;
    sem.release().await;

    timeout(Duration::from_secs(1), sem.acquire())
        .await
        .expect("first pending token");
    timeout(Duration::from_secs(1), sem.acquire())
        .await
        .expect("second pending token");

    let blocked = timeout(TICK, sem.acquire()).await;
    assert!(blocked.is_err(), "no third token was injected");
}
