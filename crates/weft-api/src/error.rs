//! API error types

use thiserror::Error;

/// Errors produced by the store API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration has no store host
    #[error("No store configured; run 'weft configure' first")]
    MissingStore,

    /// Configuration has no theme id
    #[error("No theme_id configured; run 'weft configure' with a theme id first")]
    MissingThemeId,

    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Terminal non-2xx response after retries were exhausted
    #[error("Store API returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        message: String,
    },

    /// Asset payload carried neither a value nor an attachment
    #[error("Malformed asset payload for '{0}'")]
    MalformedAsset(String),

    /// Attachment was not valid base64
    #[error("Invalid base64 attachment: {0}")]
    Attachment(#[from] base64::DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: 422,
            message: "asset key taken".to_string(),
        };
        assert_eq!(err.to_string(), "Store API returned 422: asset key taken");
    }

    #[test]
    fn test_malformed_asset_display() {
        let err = ApiError::MalformedAsset("assets/x.png".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed asset payload for 'assets/x.png'"
        );
    }
}
