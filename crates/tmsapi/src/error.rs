//! Error types for TMS API operations.

use thiserror::Error;

use crate::search::SearchableResource;

/// Errors from TMS API operations.
///
/// Variants fall into two groups: transport faults (`Transport`, `Status`),
/// which a caller may retry, and request-construction faults, which are
/// raised before any network I/O and will fail the same way again.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TmsError {
    /// The HTTP client failed to send the request or read the response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("TMS API error (HTTP {status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A requested search field is not searchable for the resource.
    #[error("invalid search fields for {resource}: {}", fields.join(", "))]
    InvalidSearchField {
        /// Resource being searched.
        resource: SearchableResource,
        /// Fields that were rejected.
        fields: Vec<String>,
    },

    /// A search parameter is not accepted by the resource.
    #[error("invalid search parameters for {resource}: {}", parameters.join(", "))]
    InvalidParameter {
        /// Resource being searched.
        resource: SearchableResource,
        /// Parameter names that were rejected.
        parameters: Vec<String>,
    },

    /// A mandatory argument was empty or omitted.
    #[error("{0} is a required parameter")]
    MissingParameter(&'static str),

    /// A date/time argument could not be parsed as ISO 8601.
    #[error("invalid ISO 8601 datetime: {0}")]
    InvalidDateTime(String),

    /// A POST body was neither a JSON object nor `null`.
    #[error("POST body must be a JSON object")]
    InvalidBody,

    /// A base URL or request path could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body was not valid JSON.
    #[error("failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TmsError {
    /// Returns `true` for network and HTTP-status faults.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// Returns `true` for faults detected while building the request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSearchField { .. }
                | Self::InvalidParameter { .. }
                | Self::MissingParameter(_)
                | Self::InvalidDateTime(_)
                | Self::InvalidBody
                | Self::Url(_)
        )
    }
}

/// Result alias for TMS API operations.
pub type Result<T> = std::result::Result<T, TmsError>;

/// Fails with `MissingParameter` when `value` is empty.
pub(crate) fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(TmsError::MissingParameter(name));
    }
    Ok(value)
}
