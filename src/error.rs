use reqwest::StatusCode;

/// Errors raised while resolving, downloading, or converting course content.
///
/// `InvalidReference` and any error during course resolution or item listing
/// are fatal to the run; everything raised inside per-item processing is
/// caught at the item boundary and logged.
#[derive(thiserror::Error, Debug)]
pub enum DownloadError {
    #[error("course URL does not contain a course id: {0}")]
    InvalidReference(String),

    #[error("API request failed with status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("subtitle conversion failed: {0}")]
    Conversion(String),
}
