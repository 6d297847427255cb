pub mod coverage;
pub mod error;
pub mod locate;

use std::time::Duration;

use error::{ApiError, ApiResult};

/// Runs CPU-bound geometry off the async workers, bounded by `timeout`
pub(crate) async fn run_blocking<T, F>(timeout: Duration, task: F) -> ApiResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(task)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ApiError::Internal(e.to_string())),
        Err(_) => {
            log::warn!("Computation exceeded {:?}", timeout);
            Err(ApiError::Timeout)
        }
    }
}
