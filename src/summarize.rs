//! Caller-facing entry points tying the builder and the client together.

use tracing::info;

use crate::ai::{HttpTransport, RequestBuilder, ServiceClient, Transport};
use crate::core::config::AppConfig;
use crate::core::models::{ModelVersion, SummarizationOptions, SummaryResult};
use crate::errors::SummarizeError;
use crate::prompt::PromptTemplate;

/// Outcome of a plain summary and its keyword-emphasized variant.
#[derive(Debug)]
pub struct EmphasisOutcome {
    pub plain: Result<SummaryResult, SummarizeError>,
    /// `None` when no keywords were given.
    pub emphasized: Option<Result<SummaryResult, SummarizeError>>,
}

pub struct Summarizer<T = HttpTransport> {
    builder: RequestBuilder,
    client: ServiceClient<T>,
}

impl Summarizer<HttpTransport> {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self::with_client(ServiceClient::new(config))
    }
}

impl<T: Transport> Summarizer<T> {
    #[must_use]
    pub fn with_client(client: ServiceClient<T>) -> Self {
        Self {
            builder: RequestBuilder::new(),
            client,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.builder = self.builder.with_template(template);
        self
    }

    #[must_use]
    pub fn client(&self) -> &ServiceClient<T> {
        &self.client
    }

    /// # Errors
    ///
    /// See [`ServiceClient::send`].
    pub async fn summarize(
        &self,
        text: &str,
        model_version: ModelVersion,
        prompt_override: Option<&str>,
        keywords: Option<&str>,
    ) -> Result<SummaryResult, SummarizeError> {
        let options = SummarizationOptions {
            model_version,
            prompt_override: prompt_override.map(str::to_string),
            keywords: keywords.map(str::to_string),
        };
        self.summarize_with_options(text, &options).await
    }

    /// # Errors
    ///
    /// See [`ServiceClient::send`].
    pub async fn summarize_with_options(
        &self,
        text: &str,
        options: &SummarizationOptions,
    ) -> Result<SummaryResult, SummarizeError> {
        let payload = self.builder.build(text, options);
        self.client.send(&payload, options.model_version).await
    }

    /// Runs the plain summary and, when keywords are present, the emphasized
    /// one concurrently. Each side fails independently.
    pub async fn summarize_with_emphasis(
        &self,
        text: &str,
        options: &SummarizationOptions,
    ) -> EmphasisOutcome {
        let plain_options = SummarizationOptions {
            keywords: None,
            ..options.clone()
        };

        if options.active_keywords().is_none() {
            return EmphasisOutcome {
                plain: self.summarize_with_options(text, &plain_options).await,
                emphasized: None,
            };
        }

        info!(model = %options.model_version, "Running plain and keyword summaries");
        let (plain, emphasized) = tokio::join!(
            self.summarize_with_options(text, &plain_options),
            self.summarize_with_options(text, options),
        );

        EmphasisOutcome {
            plain,
            emphasized: Some(emphasized),
        }
    }
}

/// One-shot summary over HTTP using `config`.
///
/// # Errors
///
/// See [`ServiceClient::send`].
pub async fn summarize(
    config: &AppConfig,
    text: &str,
    options: &SummarizationOptions,
) -> Result<SummaryResult, SummarizeError> {
    Summarizer::new(config.clone())
        .summarize_with_options(text, options)
        .await
}
