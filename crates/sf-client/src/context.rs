//! Per-call cancellation and deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{Error, ErrorKind, Result};

/// Cancellation and deadline scope for a single operation.
///
/// Every network operation takes a `&Context`. The transport races the
/// in-flight request against it and aborts with [`ErrorKind::Cancelled`] or
/// [`ErrorKind::Timeout`]. Cloning a context shares its cancellation signal.
///
/// ```rust,ignore
/// let (ctx, cancel) = Context::cancellable();
/// let ctx = ctx.timeout(Duration::from_secs(10));
/// tokio::spawn(async move { shutdown.await; cancel.cancel(); });
/// let case = client.sobject("Case").get(&ctx, Some(id)).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancelled: Option<watch::Receiver<bool>>,
}

/// Handle that cancels every clone of the [`Context`] it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel the associated context. In-flight requests are aborted.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().timeout(timeout)
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::background().deadline(deadline)
    }

    /// A context paired with a handle that cancels it.
    pub fn cancellable() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            cancelled: Some(receiver),
        };
        (ctx, CancelHandle { sender })
    }

    /// Derive a context whose deadline is at most `timeout` from now.
    ///
    /// A timeout too large to represent as an instant adds no deadline.
    pub fn timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.deadline(deadline),
            None => self,
        }
    }

    /// Derive a context with the earlier of the existing and given deadline.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// The deadline, if any.
    pub fn deadline_at(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once the associated [`CancelHandle`] has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drive `fut` to completion unless the context is cancelled or its
    /// deadline passes first. A context that is already done never polls `fut`.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let cancelled = async {
            match self.cancelled.clone() {
                Some(mut rx) => {
                    let handle_dropped = rx.wait_for(|cancelled| *cancelled).await.is_err();
                    // A dropped handle can no longer cancel; wait forever.
                    if handle_dropped {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(Error::new(ErrorKind::Cancelled)),
            _ = expired => Err(Error::new(ErrorKind::Timeout)),
            result = fut => result,
        }
    }
}
