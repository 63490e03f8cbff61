/// Error types
///
/// Every error that travels inside an iced `Message` must be `Clone`,
/// so causes from foreign crates are carried as strings.
use thiserror::Error;

/// A background (or icon) variant that never became available.
///
/// This is the only failure mode of the background resolver. It is logged
/// and otherwise swallowed: the variant simply stays ineligible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetLoadFailure {
    #[error("request failed: {0}")]
    Request(String),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("could not decode image: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for AssetLoadFailure {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AssetLoadFailure::Status(status.as_u16()),
            None => AssetLoadFailure::Request(err.to_string()),
        }
    }
}

impl From<image::ImageError> for AssetLoadFailure {
    fn from(err: image::ImageError) -> Self {
        AssetLoadFailure::Decode(err.to_string())
    }
}

/// Errors from the Moonstream HTTP API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("running offline, API is not reachable")]
    Offline,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::UnexpectedResponse(err.to_string())
        } else {
            ApiError::Http(err.to_string())
        }
    }
}

/// Errors from the local subscriptions snapshot
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not create data directory: {0}")]
    Io(#[from] std::io::Error),
}
