use std::{future::Future, time::Duration};

use tokio::{sync::watch, time::Instant};

use crate::errors::ReceiptValidationError;

/// Cancellation and deadline for a single validation call.
///
/// The context is threaded through to the transport: when it is canceled or
/// its deadline passes, the in-flight request future is dropped and the call
/// fails with [`ReceiptValidationError::Canceled`] or
/// [`ReceiptValidationError::DeadlineExceeded`]. No response is produced.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    canceled: Option<watch::Receiver<bool>>,
}

/// Cancels every [`CallContext`] cloned from the one it was created with.
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

impl CallContext {
    /// A context that is never canceled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Sets a deadline `timeout` from now. An earlier existing deadline is
    /// kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Attaches a cancellation signal, replacing any previously attached one.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.canceled = Some(rx);
        (self, CancelHandle(tx))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drives `fut` to completion unless the context is canceled or its
    /// deadline passes first. An already-canceled context never polls `fut`.
    pub(crate) async fn run<T, F>(&self, fut: F) -> Result<T, ReceiptValidationError>
    where
        F: Future<Output = Result<T, ReceiptValidationError>>,
    {
        let canceled = async {
            if let Some(rx) = &self.canceled {
                let mut rx = rx.clone();
                // A dropped handle can no longer cancel.
                let closed = rx.wait_for(|canceled| *canceled).await.is_err();
                if !closed {
                    return;
                }
            }
            std::future::pending::<()>().await
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = canceled => Err(ReceiptValidationError::Canceled),
            _ = expired => Err(ReceiptValidationError::DeadlineExceeded),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[tokio::test]
    async fn background_context_runs_future() {
        let result = CallContext::background().run(async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn canceled_context_never_polls_future() {
        let (ctx, handle) = CallContext::background().with_cancel();
        handle.cancel();
        assert!(ctx.is_canceled());
        let polled = AtomicBool::new(false);
        let result = ctx
            .run(async {
                polled.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(ReceiptValidationError::Canceled)));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn dropped_handle_does_not_cancel() {
        let (ctx, handle) = CallContext::background().with_cancel();
        drop(handle);
        let result = ctx.run(async { Ok("done") }).await;
        assert_eq!(result.unwrap(), "done");
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_interrupts_slow_future() {
        let ctx = CallContext::background().with_timeout(Duration::from_secs(1));
        let result: Result<(), _> = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(ReceiptValidationError::DeadlineExceeded)));
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_deadline_is_kept() {
        let ctx = CallContext::background()
            .with_timeout(Duration::from_secs(1))
            .with_timeout(Duration::from_secs(60));
        assert_eq!(ctx.deadline(), Some(Instant::now() + Duration::from_secs(1)));
    }
}
