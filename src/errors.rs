use thiserror::Error;

/// Generic message used when the service gives no better diagnostic.
pub const GENERIC_FAILURE: &str = "Failed to process text";

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("API configuration is missing: {0}")]
    Configuration(String),

    #[error("{0}")]
    Service(String),

    #[error("Failed to process API response: {0}")]
    ResponseShape(String),
}

impl SummarizeError {
    /// Builds a `Service` error from the most specific detail available.
    #[must_use]
    pub fn service(detail: Option<&str>) -> Self {
        match detail.map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => SummarizeError::Service(format!("{GENERIC_FAILURE}: {d}")),
            None => SummarizeError::Service(GENERIC_FAILURE.to_string()),
        }
    }

    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, SummarizeError::Configuration(_))
    }

    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self, SummarizeError::Service(_))
    }

    #[must_use]
    pub const fn is_response_shape(&self) -> bool {
        matches!(self, SummarizeError::ResponseShape(_))
    }
}
