//! Deferred (future-returning) wrapper behavior.

use catch_this::{attempt, catch_async, run_async, Error, Try};
use futures_util::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use thiserror::Error as ThisError;
use tokio::sync::oneshot;

#[derive(Debug, ThisError)]
#[error("upstream returned {0}")]
struct Upstream(u16);

async fn status(code: u16) -> Result<&'static str, Upstream> {
    tokio::task::yield_now().await;
    match code {
        200 => Ok("ok"),
        other => Err(Upstream(other)),
    }
}

#[tokio::test]
async fn deferred_success() {
    let outcome = run_async(|| async { 456 }).await;
    assert_eq!(outcome.value(), Some(&456));
    assert!(outcome.error().is_none());
}

#[tokio::test]
async fn deferred_falsy_success() {
    assert_eq!(run_async(|| async { 0 }).await.unwrap_or(99), 0);
}

#[tokio::test]
async fn deferred_rejection_with_message() {
    let outcome = catch_async(|| async { Err::<u8, _>(Error::msg("boom")) }).await;
    assert_eq!(outcome.error().unwrap().message(), "boom");
}

#[tokio::test]
async fn deferred_panic_while_polling() {
    let outcome = run_async(|| async {
        tokio::task::yield_now().await;
        panic!("boom");
    })
    .await;
    let outcome: catch_this::Outcome<()> = outcome;
    assert_eq!(outcome.error().unwrap().message(), "boom");
}

#[tokio::test]
async fn deferred_structured_error_keeps_kind() {
    let outcome = catch_async(|| status(503)).await;
    let err = outcome.error().unwrap();
    assert!(matches!(err.downcast_ref::<Upstream>(), Some(Upstream(503))));

    assert_eq!(catch_async(|| status(200)).await.unwrap(), "ok");
}

#[tokio::test]
async fn question_mark_in_async_block() {
    let outcome = catch_async(|| async {
        let first = status(200).await?;
        let second = status(404).await?;
        Ok::<_, Error>((first, second))
    })
    .await;
    assert_eq!(outcome.error().unwrap().message(), "upstream returned 404");
}

#[test]
fn throwing_before_the_future_exists_settles_synchronously() {
    let settle = run_async(|| -> std::future::Ready<u8> { panic!("no future") });
    assert!(settle.is_settled());
    let outcome = settle.now_or_never().expect("already settled");
    assert_eq!(outcome.error().unwrap().message(), "no future");
}

#[test]
fn wrapper_never_polls_on_its_own() {
    struct Never;
    impl Future for Never {
        type Output = u8;
        fn poll(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<u8> {
            Poll::Pending
        }
    }

    let mut settle = run_async(|| Never);
    assert!(!settle.is_settled());
    assert!((&mut settle).now_or_never().is_none());
    assert!((&mut settle).now_or_never().is_none());
}

#[tokio::test]
async fn settles_when_the_inner_future_does() {
    let (tx, rx) = oneshot::channel::<u32>();
    let settle = catch_async(|| rx);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let _ = tx.send(7);
    });

    assert_eq!(settle.await.unwrap(), 7);
}

#[tokio::test]
async fn dropped_sender_is_a_failure() {
    let (tx, rx) = oneshot::channel::<u32>();
    drop(tx);
    let outcome = catch_async(|| rx).await;
    assert!(outcome.error().unwrap().is::<oneshot::error::RecvError>());
}

#[tokio::test]
async fn attempt_async_block() {
    let outcome = attempt! { async try { status(200).await? } }.await;
    assert_eq!(outcome.unwrap(), "ok");

    let outcome = attempt! { async try { status(500).await? } }.await;
    assert!(outcome.is_failure());
}

#[tokio::test]
async fn explicit_context_applies_its_policy() {
    let strict = Try::with_normalizer(|cause: catch_this::Cause| match cause {
        catch_this::Cause::Panicked(_) => Error::msg("task crashed"),
        other => catch_this::normalize(other),
    });
    let outcome = strict
        .run_async(|| async {
            tokio::task::yield_now().await;
            panic!("index out of bounds");
        })
        .await;
    let outcome: catch_this::Outcome<()> = outcome;
    assert_eq!(outcome.error().unwrap().message(), "task crashed");
}

#[tokio::test]
async fn nested_future_is_flattened_by_awaiting_inside() {
    let inner = || async { status(200).await };
    let outcome = catch_async(|| async move { inner().await }).await;
    assert_eq!(outcome.unwrap(), "ok");

    let outcome = catch_async(|| async { async { status(503).await }.await }).await;
    assert!(outcome.error().unwrap().is::<Upstream>());
}
