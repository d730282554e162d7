use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} for postal code {postal_code}")]
    Status { status: u16, postal_code: String },

    #[error("malformed lookup response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid lookup URL: {0}")]
    Url(String),
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;
