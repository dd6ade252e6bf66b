//! Run-level error type
//!
//! Anything surfacing as a `DcfError` aborts the whole batch. Per-ticker
//! conditions are reported through [`crate::financials::Rejection`] and
//! solver warnings instead.

/// Fatal fault raised while analyzing a ticker list
#[derive(Debug, thiserror::Error)]
pub enum DcfError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed response for {ticker}: {reason}")]
    MalformedResponse { ticker: String, reason: String },

    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl DcfError {
    pub fn malformed(ticker: &str, reason: impl Into<String>) -> Self {
        DcfError::MalformedResponse {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_ticker() {
        let err = DcfError::malformed("ABT", "EPS Diluted is not a number");
        assert_eq!(
            err.to_string(),
            "malformed response for ABT: EPS Diluted is not a number"
        );
    }
}
