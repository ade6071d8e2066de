//! Cancellation
//!
//! A cloneable cancel signal threaded from the originating request through
//! every store call and handler invocation.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{PipelineError, Result};

/// Cancel signal shared by every clone.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Signals cancellation to every holder of this token.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `future` unless `token` fires first.
///
/// An already-cancelled token never polls the future.
pub async fn run_cancellable<F, T>(token: &CancelToken, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if token.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(PipelineError::Cancelled),
        result = future => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_uncancelled_future_completes() {
        let token = CancelToken::new();
        let value = run_cancellable(&token, async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_cancelled_token_never_polls() {
        let token = CancelToken::new();
        token.cancel();

        let polled = AtomicBool::new(false);
        let result: Result<()> = run_cancellable(&token, async {
            polled.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(PipelineError::Cancelled)));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_flight_aborts() {
        let token = CancelToken::new();
        let canceller = token.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let result: Result<()> = run_cancellable(&token, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(PipelineError::Cancelled)));
        assert!(token.is_cancelled());
    }
}
