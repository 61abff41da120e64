//! Normalizes `generateContent` responses into a [`SummaryResult`].
//!
//! Extraction paths are looked up per [`ModelVersion`] so the two service
//! generations can diverge without changing the caller-facing contract.

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::models::{ModelVersion, SummaryResult};
use crate::errors::SummarizeError;

/// JSON pointers used to read one service generation's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionPaths {
    pub text: &'static str,
    pub usage: &'static str,
    pub total_tokens: &'static str,
    pub prompt_tokens: &'static str,
    pub response_tokens: &'static str,
}

const GENERATE_CONTENT_PATHS: ExtractionPaths = ExtractionPaths {
    text: "/candidates/0/content/parts/0/text",
    usage: "/usageMetadata",
    total_tokens: "/totalTokenCount",
    prompt_tokens: "/promptTokenCount",
    response_tokens: "/candidatesTokenCount",
};

const EXTRACTION_TABLE: &[(ModelVersion, ExtractionPaths)] = &[
    (ModelVersion::V1, GENERATE_CONTENT_PATHS),
    (ModelVersion::V2, GENERATE_CONTENT_PATHS),
];

const MARKDOWN_MARKERS: &[char] = &['#', '*', '_', '`'];

#[must_use]
pub fn paths_for(version: ModelVersion) -> ExtractionPaths {
    EXTRACTION_TABLE
        .iter()
        .find(|(v, _)| *v == version)
        .map_or(GENERATE_CONTENT_PATHS, |(_, paths)| *paths)
}

/// Removes `#`, `*`, `_` and backticks, leaving every other character as is.
#[must_use]
pub fn strip_markdown(text: &str) -> String {
    text.chars()
        .filter(|c| !MARKDOWN_MARKERS.contains(c))
        .collect()
}

/// Strips markers and drops the indentation left behind on lines that
/// opened with one, so `* Point` becomes `Point`. Line breaks are kept.
#[must_use]
pub fn clean_summary(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let stripped = strip_markdown(line);
            // Only lines that opened with a marker lose their leading blanks;
            // indentation on any other line is kept as sent.
            if line.trim_start().starts_with(MARKDOWN_MARKERS) {
                stripped.trim_start_matches([' ', '\t']).to_string()
            } else {
                stripped
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// # Errors
    ///
    /// Returns `ResponseShape` when the summary text is not present at the
    /// expected path for `version`.
    pub fn normalize(
        &self,
        raw: &Value,
        version: ModelVersion,
    ) -> Result<SummaryResult, SummarizeError> {
        let paths = paths_for(version);

        let Some(text) = raw
            .pointer(paths.text)
            .and_then(Value::as_str)
            // An empty string counts as missing, same as an absent field
            .filter(|t| !t.is_empty())
        else {
            warn!(model = %version, "Summary text missing from response");
            return Err(SummarizeError::ResponseShape(format!(
                "Unexpected response structure from Gemini {version}"
            )));
        };

        // Each counter falls back to 0 on its own, so partial usage is fine.
        let usage = raw.pointer(paths.usage);
        let counter = |pointer: &str| {
            usage
                .and_then(|u| u.pointer(pointer))
                .and_then(Value::as_u64)
                .unwrap_or(0)
        };

        let result = SummaryResult {
            text: clean_summary(text),
            total_tokens: counter(paths.total_tokens),
            prompt_tokens: counter(paths.prompt_tokens),
            response_tokens: counter(paths.response_tokens),
        };

        debug!(
            model = %version,
            total_tokens = result.total_tokens,
            prompt_tokens = result.prompt_tokens,
            response_tokens = result.response_tokens,
            "Normalized summary response"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(text: &str) -> Value {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
    }

    #[test]
    fn test_strip_markdown_markers() {
        assert_eq!(strip_markdown("**Bold** and `code`"), "Bold and code");
        assert_eq!(strip_markdown("# Title\n__x__ y_z"), " Title\nx yz");
        assert_eq!(strip_markdown("a-b+c\n\nd"), "a-b+c\n\nd");
    }

    #[test]
    fn test_clean_summary_drops_marker_indentation_only() {
        assert_eq!(
            clean_summary("* Point one\n* Point two"),
            "Point one\nPoint two"
        );
        assert_eq!(clean_summary("## Title\n\n  plain line"), "Title\n\n  plain line");
        assert_eq!(clean_summary("a **b** c\n"), "a b c\n");
    }

    #[test]
    fn test_normalize_reads_first_candidate_first_part() {
        let raw = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ],
            "usageMetadata": {
                "totalTokenCount": 10,
                "promptTokenCount": 7,
                "candidatesTokenCount": 3
            }
        });
        let result = ResponseNormalizer.normalize(&raw, ModelVersion::V2).unwrap();
        assert_eq!(
            result,
            SummaryResult {
                text: "first".to_string(),
                total_tokens: 10,
                prompt_tokens: 7,
                response_tokens: 3,
            }
        );
    }

    #[test]
    fn test_missing_usage_defaults_to_zero() {
        let result = ResponseNormalizer
            .normalize(&response("ok"), ModelVersion::V1)
            .unwrap();
        assert_eq!(result.total_tokens, 0);
        assert_eq!(result.prompt_tokens, 0);
        assert_eq!(result.response_tokens, 0);
    }

    #[test]
    fn test_partial_usage_defaults_each_counter() {
        let mut raw = response("ok");
        raw["usageMetadata"] = json!({ "promptTokenCount": 5, "totalTokenCount": "x" });
        let result = ResponseNormalizer.normalize(&raw, ModelVersion::V1).unwrap();
        assert_eq!(result.prompt_tokens, 5);
        assert_eq!(result.total_tokens, 0);
        assert_eq!(result.response_tokens, 0);
    }

    #[test]
    fn test_missing_path_at_every_level_is_shape_error() {
        let cases = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": 5 }] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }),
            json!(null),
        ];
        for raw in &cases {
            let err = ResponseNormalizer
                .normalize(raw, ModelVersion::V2)
                .unwrap_err();
            assert!(err.is_response_shape(), "case: {raw}");
            assert!(err.to_string().contains("Gemini 2.0"), "case: {raw}");
        }
    }

    #[test]
    fn test_error_names_model_version() {
        let err = ResponseNormalizer
            .normalize(&json!({}), ModelVersion::V1)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to process API response: Unexpected response structure from Gemini 1.5"
        );
    }

    #[test]
    fn test_every_version_has_paths() {
        for version in ModelVersion::ALL {
            assert!(EXTRACTION_TABLE.iter().any(|(v, _)| *v == version));
            assert_eq!(paths_for(version).text, "/candidates/0/content/parts/0/text");
        }
    }
}
