use condense::errors::{GENERIC_FAILURE, SummarizeError};
use std::error::Error;

#[test]
fn test_summarize_error_implements_error_trait() {
    // Verify SummarizeError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = SummarizeError::Configuration("API key is not set".to_string());
    assert_error(&error);
}

#[test]
fn test_summarize_error_display() {
    let error = SummarizeError::Configuration("API key is not set".to_string());
    assert_eq!(
        format!("{error}"),
        "API configuration is missing: API key is not set"
    );

    let error = SummarizeError::service(Some("quota exhausted"));
    assert_eq!(format!("{error}"), "Failed to process text: quota exhausted");

    let error =
        SummarizeError::ResponseShape("Unexpected response structure from Gemini 1.5".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to process API response: Unexpected response structure from Gemini 1.5"
    );
}

#[test]
fn test_service_error_without_detail_is_generic() {
    // Missing or blank details fall back to the bare generic message
    assert_eq!(SummarizeError::service(None).to_string(), GENERIC_FAILURE);
    assert_eq!(SummarizeError::service(Some("   ")).to_string(), GENERIC_FAILURE);
}

#[test]
fn test_error_kind_predicates() {
    let config = SummarizeError::Configuration(String::new());
    let service = SummarizeError::service(None);
    let shape = SummarizeError::ResponseShape(String::new());

    assert!(config.is_configuration() && !config.is_service() && !config.is_response_shape());
    assert!(service.is_service() && !service.is_configuration());
    assert!(shape.is_response_shape() && !shape.is_service());
}
