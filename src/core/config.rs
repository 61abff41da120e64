use std::env;
use std::fmt;

use url::Url;

use super::models::ModelVersion;
use crate::errors::SummarizeError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const V1_URL_VAR: &str = "GEMINI_1_5_URL";
pub const V2_URL_VAR: &str = "GEMINI_2_0_URL";

/// Process-wide settings, loaded once at startup and passed to the client.
///
/// Missing values are allowed here; they are reported when a request is made.
#[derive(Clone, Default)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_v1_url: Option<String>,
    pub gemini_v2_url: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: non_blank_var(API_KEY_VAR),
            gemini_v1_url: non_blank_var(V1_URL_VAR),
            gemini_v2_url: non_blank_var(V2_URL_VAR),
        }
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    /// Endpoint for a model version; blank entries count as unset.
    #[must_use]
    pub fn endpoint_for(&self, version: ModelVersion) -> Option<&str> {
        let url = match version {
            ModelVersion::V1 => self.gemini_v1_url.as_deref(),
            ModelVersion::V2 => self.gemini_v2_url.as_deref(),
        };
        url.filter(|u| !u.trim().is_empty())
    }

    /// # Errors
    ///
    /// Returns `Configuration` if the endpoint is not an http(s) URL.
    pub fn validate_endpoint(endpoint: &str) -> Result<Url, SummarizeError> {
        let url = Url::parse(endpoint.trim()).map_err(|e| {
            SummarizeError::Configuration(format!("invalid endpoint URL: {e}"))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SummarizeError::Configuration(format!(
                "unsupported endpoint scheme: {other}"
            ))),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_v1_url", &self.gemini_v1_url)
            .field("gemini_v2_url", &self.gemini_v2_url)
            .finish()
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
