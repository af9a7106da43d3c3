use thiserror::Error;

/// Type alias of the [`Result`] type specific to DStream providers.
pub type ProviderResult<T> = std::result::Result<T, ProviderErr>;

#[derive(Error, Debug)]
/// Errors that may occur while hosting a provider.
///
/// Cancellation and reaching a configured bound are normal terminations and never surface here.
pub enum ProviderErr {
    #[error("Malformed configuration: {0}")]
    Config(#[source] serde_json::Error),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode envelope: {0}")]
    Json(#[source] serde_json::Error),
}
