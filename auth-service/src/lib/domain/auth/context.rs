use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::auth::errors::AuthError;

/// Cancellation and deadline bounding a single service call.
///
/// Every storage, hashing and signing step of an operation runs through
/// [`RequestContext::run`], so the operation stops at the first step boundary after the
/// token is cancelled or the deadline passes.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Context with no deadline and a fresh cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().with_deadline(Instant::now() + timeout)
    }

    /// Tighten the deadline. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Bind the context to an external cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail if the context has already ended. Errors are tagged with `op`.
    ///
    /// # Errors
    /// * `Cancelled` - Token was cancelled
    /// * `DeadlineExceeded` - Deadline has passed
    pub fn check(&self, op: &'static str) -> Result<(), AuthError> {
        if self.cancellation.is_cancelled() {
            return Err(AuthError::Cancelled { op });
        }

        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AuthError::DeadlineExceeded { op }),
            _ => Ok(()),
        }
    }

    /// Drive `future` to completion unless the context ends first.
    ///
    /// The future is dropped as soon as cancellation or the deadline wins.
    pub async fn run<F>(&self, op: &'static str, future: F) -> Result<F::Output, AuthError>
    where
        F: Future,
    {
        self.check(op)?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(AuthError::Cancelled { op }),
            _ = deadline => Err(AuthError::DeadlineExceeded { op }),
            output = future => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OP: &str = "test.op";

    #[tokio::test]
    async fn test_run_completes() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(5));

        let result = ctx.run(OP, async { 42 }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_run_without_deadline() {
        let ctx = RequestContext::new();
        assert!(ctx.deadline().is_none());

        let result = ctx.run(OP, async { "done" }).await;
        assert_eq!(result.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_pre_cancelled_context() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = RequestContext::new().with_cancellation(token);

        assert!(matches!(ctx.check(OP), Err(AuthError::Cancelled { op: OP })));
        let result = ctx.run(OP, async { 1 }).await;
        assert!(matches!(result, Err(AuthError::Cancelled { op: OP })));
    }

    #[tokio::test]
    async fn test_expired_deadline() {
        let ctx = RequestContext::with_timeout(Duration::ZERO);

        let result = ctx.run(OP, async { 1 }).await;
        assert!(matches!(result, Err(AuthError::DeadlineExceeded { op: OP })));
    }

    #[tokio::test]
    async fn test_deadline_interrupts_pending_future() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));

        let result = ctx.run(OP, std::future::pending::<()>()).await;
        assert!(matches!(result, Err(AuthError::DeadlineExceeded { op: OP })));
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_pending_future() {
        let token = CancellationToken::new();
        let ctx = RequestContext::new().with_cancellation(token.clone());

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let result = ctx.run(OP, std::future::pending::<()>()).await;
        assert!(matches!(result, Err(AuthError::Cancelled { op: OP })));
    }

    #[test]
    fn test_with_deadline_keeps_earliest() {
        let now = Instant::now();
        let early = now + Duration::from_secs(1);
        let late = now + Duration::from_secs(10);

        let ctx = RequestContext::new().with_deadline(late).with_deadline(early);
        assert_eq!(ctx.deadline(), Some(early));

        let ctx = RequestContext::new().with_deadline(early).with_deadline(late);
        assert_eq!(ctx.deadline(), Some(early));
    }
}
