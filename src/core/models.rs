use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Upstream service generation a request targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelVersion {
    #[default]
    #[serde(rename = "1.5")]
    V1,
    #[serde(rename = "2.0")]
    V2,
}

impl ModelVersion {
    pub const ALL: [ModelVersion; 2] = [ModelVersion::V1, ModelVersion::V2];

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ModelVersion::V1 => "1.5",
            ModelVersion::V2 => "2.0",
        }
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ModelVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1.5" | "v1" => Ok(ModelVersion::V1),
            "2.0" | "v2" => Ok(ModelVersion::V2),
            other => Err(format!("unknown model version: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationOptions {
    pub model_version: ModelVersion,
    pub prompt_override: Option<String>,
    pub keywords: Option<String>,
}

impl SummarizationOptions {
    #[must_use]
    pub fn new(model_version: ModelVersion) -> Self {
        Self {
            model_version,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt_override = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Override text when it carries anything besides whitespace.
    #[must_use]
    pub fn active_override(&self) -> Option<&str> {
        self.prompt_override
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }

    #[must_use]
    pub fn active_keywords(&self) -> Option<&str> {
        self.keywords.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// The single instruction string sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub instruction_text: String,
}

impl Payload {
    /// Single-turn content envelope carrying the instruction as its only part.
    #[must_use]
    pub fn to_request_body(&self) -> Value {
        json!({
            "contents": [{
                "parts": [{
                    "text": self.instruction_text
                }]
            }]
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub text: String,
    pub total_tokens: u64,
    pub prompt_tokens: u64,
    pub response_tokens: u64,
}
