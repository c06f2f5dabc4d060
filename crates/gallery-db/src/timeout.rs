use gallery_core::AppError;
use std::future::Future;
use std::time::Duration;

/// Run `fut`, failing with `AppError::Timeout` once `after` has elapsed.
pub async fn with_timeout<T, F>(operation: &'static str, after: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, timeout_ms = after.as_millis() as u64, "Metadata store call timed out");
            Err(AppError::Timeout { operation, after })
        }
    }
}
