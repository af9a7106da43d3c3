use futures::future::Future;
use std::time::Duration;
pub use async_std::future::TimeoutError;

/// Await `f` for at most `dur`. A zero duration still polls `f` once.
pub async fn timeout<F, T>(dur: Duration, f: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    async_std::future::timeout(dur, f).await
}
