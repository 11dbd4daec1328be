use crate::shared::error::BackendError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Per-request execution context.
///
/// Every outbound call made on behalf of one inbound request receives the same
/// context, so cancelling the token (or passing the deadline) aborts every
/// backend call chained beneath that request.
///
/// Cloning is cheap: the token is reference-counted and clones observe the
/// same cancellation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context with a fresh request id, no deadline, and its own token
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Creates a context bound to an existing cancellation token
    pub fn with_token(cancellation: CancellationToken) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            cancellation,
            deadline: None,
        }
    }

    /// Sets the deadline to `timeout` from now
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Drives `fut` to completion unless the request is cancelled or its
    /// deadline passes first.
    ///
    /// # Errors
    /// Returns `BackendError::Cancelled` or `BackendError::DeadlineExceeded`;
    /// otherwise the future's own error converted into `BackendError`.
    pub async fn run<T, E, F>(&self, fut: F) -> Result<T, BackendError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<BackendError>,
    {
        if self.is_cancelled() {
            return Err(BackendError::Cancelled);
        }

        let bounded = async {
            match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                    Ok(result) => result.map_err(Into::<BackendError>::into),
                    Err(_) => Err(BackendError::DeadlineExceeded),
                },
                None => fut.await.map_err(Into::<BackendError>::into),
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(BackendError::Cancelled),
            result = bounded => result,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
