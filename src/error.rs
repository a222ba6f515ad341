use thiserror::Error;

/// Failure fetching or decoding the remote photo listing. Surfaced to the
/// caller unretried; the session decides recovery.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transport failure before a usable response arrived.
    #[error("photo listing request failed: {0}")]
    Request(reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("photo listing returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not decode as a listing of photo records.
    #[error("malformed photo listing: {0}")]
    Malformed(reqwest::Error),
}

/// Failure reading or writing a persisted preference slot. Reads soft-fail
/// to defaults at the store boundary; writes are reported and swallowed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying key-value backend failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A slot value could not be serialized.
    #[error("encoding preference slot '{slot}': {source}")]
    Encode {
        slot: &'static str,
        source: serde_json::Error,
    },
}
