//! Instruction assembly for summary requests.

use tracing::debug;

use crate::core::models::{Payload, SummarizationOptions};
use crate::prompt::{PromptTemplate, keyword_clause, sanitize_input};

#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    template: PromptTemplate,
}

impl RequestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the instruction used when a request carries no override.
    #[must_use]
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Builds `{instruction}{keyword clause} {sanitized text}`.
    #[must_use]
    pub fn build(&self, input_text: &str, options: &SummarizationOptions) -> Payload {
        let sanitized = sanitize_input(input_text);

        let mut instruction = match options.active_override() {
            Some(custom) => custom.to_string(),
            None => self.template.text.clone(),
        };

        if let Some(keywords) = options.active_keywords() {
            instruction.push_str(&keyword_clause(keywords));
        }

        instruction.push(' ');
        instruction.push_str(&sanitized);

        debug!(
            template = %self.template.name,
            custom_prompt = options.active_override().is_some(),
            keywords = options.active_keywords().is_some(),
            input_chars = input_text.chars().count(),
            sanitized_chars = sanitized.len(),
            "Built summary instruction"
        );

        Payload {
            instruction_text: instruction,
        }
    }
}
