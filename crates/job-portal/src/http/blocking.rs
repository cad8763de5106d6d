use tokio::task;

use super::error::ApiError;

/// Run a synchronous service call (password hashing, resume file IO) on the
/// blocking pool so request workers stay free.
pub(crate) async fn run_blocking<T, E, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
        .map_err(Into::into)
}
