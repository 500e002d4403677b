//! Guarded remote reads: per-call timeout plus bounded retry with
//! exponential backoff.
//!
//! Exhaustion returns the last error unchanged, so callers fold it into a
//! verdict exactly as they would a first-attempt failure.

use std::fmt::Display;
use std::future::Future;

use nomi_core::config::ReadPolicy;
use nomi_core::error::{ChainError, StorageError};
use tracing::warn;

/// Error types that can represent a timed-out remote call.
pub trait RemoteError: Display {
    fn timed_out(call: &str, after_ms: u64) -> Self;

    /// Whether another attempt could plausibly succeed.
    fn is_retryable(&self) -> bool;
}

impl RemoteError for ChainError {
    fn timed_out(call: &str, after_ms: u64) -> Self {
        ChainError::Timeout {
            call: call.to_string(),
            after_ms,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, ChainError::Rpc(_) | ChainError::Timeout { .. })
    }
}

impl RemoteError for StorageError {
    fn timed_out(call: &str, after_ms: u64) -> Self {
        StorageError::Timeout {
            call: call.to_string(),
            after_ms,
        }
    }

    fn is_retryable(&self) -> bool {
        !matches!(self, StorageError::Serialization(_))
    }
}

/// Run `op` under the read policy's timeout, retrying retryable failures.
pub async fn guarded<T, E, F, Fut>(policy: &ReadPolicy, call: &str, mut op: F) -> Result<T, E>
where
    E: RemoteError,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        let result = match tokio::time::timeout(policy.timeout(), op()).await {
            Ok(result) => result,
            Err(_) => Err(E::timed_out(call, policy.timeout_ms)),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.retries && err.is_retryable() => {
                attempt += 1;
                warn!(call, attempt, error = %err, "remote read failed, retrying");
                tokio::time::sleep(policy.backoff(attempt)).await;
            }
            Err(err) => return Err(err),
        }
    }
}
