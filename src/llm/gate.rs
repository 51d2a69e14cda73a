//! Generation gate.
//!
//! One model instance serves every request, so generations are serialized
//! through a semaphore instead of piling onto the backend. A request that
//! cannot get a permit within the acquire timeout fails rather than queueing
//! forever.

use crate::types::{AppError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Limits concurrent generations against the loaded model.
pub struct GenerationGate {
    semaphore: Arc<Semaphore>,
    acquire_timeout: Duration,
}

impl GenerationGate {
    /// Create a gate allowing `max_concurrent` in-flight generations.
    pub fn new(max_concurrent: usize, acquire_timeout: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            acquire_timeout,
        }
    }

    /// Acquire a generation slot; the permit releases on drop.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        match tokio::time::timeout(
            self.acquire_timeout,
            self.semaphore.clone().acquire_owned(),
        )
        .await
        {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(AppError::Internal("generation gate closed".to_string())),
            Err(_) => Err(AppError::Llm(
                "Timed out waiting for the model to become available".to_string(),
            )),
        }
    }

    /// Number of slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn permits_release_on_drop() {
        let gate = GenerationGate::new(1, Duration::from_millis(100));
        assert_eq!(gate.available(), 1);

        let permit = gate.acquire().await.unwrap();
        assert_eq!(gate.available(), 0);

        drop(permit);
        assert_eq!(gate.available(), 1);
    }

    #[tokio::test]
    async fn acquire_times_out_when_model_is_busy() {
        let gate = GenerationGate::new(1, Duration::from_millis(20));
        let _held = gate.acquire().await.unwrap();

        let err = gate.acquire().await.unwrap_err();
        assert!(err.to_string().contains("Timed out"));
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped_to_one() {
        let gate = GenerationGate::new(0, Duration::from_millis(20));
        assert_eq!(gate.available(), 1);
    }
}
