//! The future returned by the deferred entry points.

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

/// Future of an [`Outcome`](crate::Outcome), returned by
/// [`Try::run_async`](crate::Try::run_async) and
/// [`Try::catch_async`](crate::Try::catch_async).
///
/// A `Settle` is either already settled (the thunk failed before it could
/// produce a future) or still pending on the wrapped future. It never blocks
/// and does no work until polled. If the wrapped future never completes,
/// neither does the `Settle`; there is no built-in timeout.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Settle<F: Future> {
    state: State<F>,
}

enum State<F: Future> {
    Settled(Option<F::Output>),
    Pending(Pin<Box<F>>),
}

// The inner future is boxed and the output is never pinned.
impl<F: Future> Unpin for Settle<F> {}

impl<F: Future> Settle<F> {
    pub(crate) fn settled(output: F::Output) -> Self {
        Self {
            state: State::Settled(Some(output)),
        }
    }

    pub(crate) fn pending(fut: F) -> Self {
        Self {
            state: State::Pending(Box::pin(fut)),
        }
    }

    /// Whether the outcome is already known without polling.
    pub fn is_settled(&self) -> bool {
        matches!(self.state, State::Settled(_))
    }
}

impl<F: Future> Future for Settle<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            State::Settled(slot) => match slot.take() {
                Some(output) => Poll::Ready(output),
                None => panic!("`Settle` polled after completion"),
            },
            State::Pending(fut) => {
                let output = match fut.as_mut().poll(cx) {
                    Poll::Ready(output) => output,
                    Poll::Pending => return Poll::Pending,
                };
                this.state = State::Settled(None);
                Poll::Ready(output)
            }
        }
    }
}

impl<F: Future> fmt::Debug for Settle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Settled(Some(_)) => "settled",
            State::Settled(None) => "taken",
            State::Pending(_) => "pending",
        };
        f.debug_struct("Settle").field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    #[test]
    fn settled_is_ready_on_first_poll() {
        let settle = Settle::<core::future::Ready<u8>>::settled(3);
        assert!(settle.is_settled());
        assert_eq!(settle.now_or_never(), Some(3));
    }

    #[test]
    fn pending_waits_for_inner() {
        let mut settle = Settle::pending(futures_util::future::pending::<u8>());
        assert!(!settle.is_settled());
        assert_eq!((&mut settle).now_or_never(), None);
        assert_eq!(format!("{settle:?}"), "Settle { state: \"pending\" }");
    }

    #[test]
    fn pending_becomes_taken_after_completion() {
        let mut settle = Settle::pending(async { 5 });
        assert_eq!((&mut settle).now_or_never(), Some(5));
        assert_eq!(format!("{settle:?}"), "Settle { state: \"taken\" }");
    }
}
