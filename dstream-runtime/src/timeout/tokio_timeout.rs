use futures::future::Future;
use std::time::Duration;
pub use tokio::time::error::Elapsed as TimeoutError;

/// Await `f` for at most `dur`. A zero duration still polls `f` once.
pub async fn timeout<F, T>(dur: Duration, f: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(dur, f).await
}
