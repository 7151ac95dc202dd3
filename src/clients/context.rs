//! Cancellation context for API calls.
//!
//! Every call to [`Client::form_request`](crate::Client::form_request) runs
//! under a [`RequestContext`]. The context is the only place a request can be
//! aborted: the client imposes no timeout of its own.
//!
//! A context combines a [`CancellationToken`] with an optional deadline.
//! Cloning a context shares the token, so cancelling any clone cancels them
//! all.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use idcloudhost_api::RequestContext;
//!
//! let ctx = RequestContext::with_timeout(Duration::from_secs(30));
//! assert!(ctx.deadline().is_some());
//!
//! let other = ctx.clone();
//! other.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::clients::errors::HttpError;

/// Cancellation token plus optional deadline governing one or more requests.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context that is never cancelled unless [`cancel`](Self::cancel) is called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an instant yields a context
    /// without a deadline.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Creates a context that expires at `deadline`.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Creates a context driven by an existing cancellation token.
    #[must_use]
    pub const fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Derives a child context with an additional timeout.
    ///
    /// The child is cancelled when this context is cancelled. Its deadline is
    /// the earlier of this context's deadline and `timeout` from now.
    /// Cancelling the child does not cancel the parent. A timeout too large
    /// to represent keeps this context's deadline.
    #[must_use]
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(current), Some(requested)) => Some(current.min(requested)),
            (current, requested) => current.or(requested),
        };
        Self {
            token: self.token.child_token(),
            deadline,
        }
    }

    /// Cancels this context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` if the context has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns `true` if the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the underlying cancellation token.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Fails fast if the context is already done.
    pub(crate) fn check(&self) -> Result<(), HttpError> {
        if self.is_cancelled() {
            return Err(HttpError::Cancelled);
        }
        if self.is_expired() {
            return Err(HttpError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub(crate) async fn done(&self) -> HttpError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                () = self.token.cancelled() => HttpError::Cancelled,
                () = tokio::time::sleep_until(deadline) => HttpError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                HttpError::Cancelled
            }
        }
    }
}
