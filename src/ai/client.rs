//! Gemini `generateContent` client
//!
//! Sends one instruction per request and hands the body to the normalizer.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{Instrument, error, info, info_span};
use url::Url;
use uuid::Uuid;

use super::response::ResponseNormalizer;
use crate::core::config::AppConfig;
use crate::core::models::{ModelVersion, Payload, SummaryResult};
use crate::errors::SummarizeError;

/// Status and body of a completed HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The request never produced a response (DNS, TLS, connection reset...).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError(error.to_string())
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` as JSON to `endpoint` with the credential as the `key` query parameter.
    async fn post_json(
        &self,
        endpoint: &Url,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport with the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the outgoing request without sending it.
    fn build_request(
        &self,
        endpoint: &Url,
        api_key: &str,
        body: &Value,
    ) -> Result<reqwest::Request, TransportError> {
        // The credential travels in the query string only, never in a header.
        let request = self
            .client
            .post(endpoint.clone())
            .query(&[("key", api_key)])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(body)
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &Url,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        let request = self.build_request(endpoint, api_key, body)?;
        let response = self.client.execute(request).await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

pub struct ServiceClient<T = HttpTransport> {
    config: AppConfig,
    transport: T,
    normalizer: ResponseNormalizer,
}

impl ServiceClient<HttpTransport> {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self::with_transport(config, HttpTransport::default())
    }
}

impl<T: Transport> ServiceClient<T> {
    #[must_use]
    pub fn with_transport(config: AppConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            normalizer: ResponseNormalizer,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// # Errors
    ///
    /// - `Configuration` if the credential or the endpoint for `version` is
    ///   missing; no request is made in that case.
    /// - `Service` on transport failure or a non-2xx status.
    /// - `ResponseShape` if the body is not the expected JSON shape.
    pub async fn send(
        &self,
        payload: &Payload,
        version: ModelVersion,
    ) -> Result<SummaryResult, SummarizeError> {
        let (api_key, endpoint) = self.resolve(version)?;

        let span = info_span!(
            "summarize_request",
            correlation_id = %Uuid::new_v4(),
            model = %version,
        );

        self.dispatch(payload, version, api_key, &endpoint)
            .instrument(span)
            .await
    }

    async fn dispatch(
        &self,
        payload: &Payload,
        version: ModelVersion,
        api_key: &str,
        endpoint: &Url,
    ) -> Result<SummaryResult, SummarizeError> {
        info!(endpoint = %endpoint, "Sending summary request");

        #[cfg(feature = "debug-logs")]
        info!("Using instruction:\n{}", payload.instruction_text);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            instruction_chars = payload.instruction_text.chars().count(),
            "Instruction prepared"
        );

        let response = self
            .transport
            .post_json(endpoint, api_key, &payload.to_request_body())
            .await
            .map_err(|e| {
                error!(error = %e, "Summary request failed in transport");
                SummarizeError::service(Some(e.0.as_str()))
            })?;

        if !response.is_success() {
            error!(
                status = response.status,
                body = %response.body,
                "Summary service returned an error status"
            );
            return Err(service_error_from(&response));
        }

        let raw: Value = serde_json::from_str(&response.body).map_err(|e| {
            SummarizeError::ResponseShape(format!("invalid JSON body from Gemini {version}: {e}"))
        })?;
        let result = self.normalizer.normalize(&raw, version)?;

        info!(
            total_tokens = result.total_tokens,
            summary_chars = result.text.chars().count(),
            "Summary request completed"
        );
        Ok(result)
    }

    fn resolve(&self, version: ModelVersion) -> Result<(&str, Url), SummarizeError> {
        let Some(api_key) = self.config.api_key() else {
            return Err(SummarizeError::Configuration("API key is not set".to_string()));
        };
        let Some(endpoint) = self.config.endpoint_for(version) else {
            return Err(SummarizeError::Configuration(format!(
                "no endpoint configured for Gemini {version}"
            )));
        };
        let endpoint = AppConfig::validate_endpoint(endpoint)?;
        Ok((api_key, endpoint))
    }
}

/// Prefers the service's own `error.message`, then the status line.
fn service_error_from(response: &TransportResponse) -> SummarizeError {
    let structured = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty());

    // error.message from the body wins; otherwise report the status code.
    // `SummarizeError::service` falls back to the generic text if both are blank.
    match structured {
        Some(message) => SummarizeError::service(Some(message.as_str())),
        None => {
            let status_line = format!("Request failed with status code {}", response.status);
            SummarizeError::service(Some(status_line.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_http_request_puts_key_in_query_only() {
        let transport = HttpTransport::default();
        let endpoint = Url::parse("https://example.com/v1/models/x:generateContent").unwrap();
        let body = serde_json::json!({ "a": 1 });

        let request = transport
            .build_request(&endpoint, "sek ret&k", &body)
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().path(), "/v1/models/x:generateContent");
        // Space and ampersand must be encoded so the key stays one parameter
        assert_eq!(request.url().query(), Some("key=sek+ret%26k"));

        let content_type = request
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .unwrap();
        assert_eq!(content_type, "application/json");

        // No header may carry the credential in any form
        for (name, value) in request.headers() {
            let value = value.to_str().unwrap_or_default();
            assert!(!value.contains("sek"), "key leaked into header {name}");
        }

        let sent = request.body().and_then(reqwest::Body::as_bytes).unwrap();
        let sent: Value = serde_json::from_slice(sent).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn test_success_range() {
        assert!(response(200, "").is_success());
        assert!(response(204, "").is_success());
        assert!(!response(199, "").is_success());
        assert!(!response(301, "").is_success());
        assert!(!response(500, "").is_success());
    }

    #[test]
    fn test_service_error_prefers_structured_message() {
        let err = service_error_from(&response(
            400,
            r#"{"error":{"code":400,"message":"API key not valid"}}"#,
        ));
        assert_eq!(err.to_string(), "Failed to process text: API key not valid");
    }

    #[test]
    fn test_service_error_falls_back_to_status() {
        let err = service_error_from(&response(503, "<html>unavailable</html>"));
        assert_eq!(
            err.to_string(),
            "Failed to process text: Request failed with status code 503"
        );

        let err = service_error_from(&response(429, r#"{"error":{"message":"  "}}"#));
        assert!(err.to_string().ends_with("status code 429"));
    }

    #[test]
    fn test_resolve_requires_key_and_endpoint() {
        let client = ServiceClient::new(AppConfig {
            gemini_api_key: None,
            gemini_v1_url: Some("https://example.com/v1".to_string()),
            gemini_v2_url: None,
        });
        assert!(client.resolve(ModelVersion::V1).unwrap_err().is_configuration());

        let client = ServiceClient::new(AppConfig {
            gemini_api_key: Some("k".to_string()),
            gemini_v1_url: Some("https://example.com/v1".to_string()),
            gemini_v2_url: None,
        });
        assert!(client.resolve(ModelVersion::V1).is_ok());
        assert!(client.resolve(ModelVersion::V2).unwrap_err().is_configuration());
    }
}
