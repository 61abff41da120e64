//! condense - a text summarization client for the Gemini `generateContent` API.
//!
//! A request goes through three steps:
//! 1. [`ai::RequestBuilder`] sanitizes the input and composes the instruction
//! 2. [`ai::ServiceClient`] checks configuration and performs the HTTP call
//! 3. [`ai::ResponseNormalizer`] maps the response into a [`SummaryResult`]
//!
//! # Example
//!
//! ```no_run
//! use condense::core::config::AppConfig;
//! use condense::core::models::ModelVersion;
//! use condense::Summarizer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     condense::setup_logging();
//!
//!     let summarizer = Summarizer::new(AppConfig::from_env());
//!     let result = summarizer
//!         .summarize("Some long article text...", ModelVersion::V2, None, Some("rust, safety"))
//!         .await?;
//!
//!     println!("{}", result.text);
//!     println!("tokens used: {}", result.total_tokens);
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod summarize;
pub mod utils;

pub use crate::core::models::{ModelVersion, Payload, SummarizationOptions, SummaryResult};
pub use errors::SummarizeError;
pub use summarize::{EmphasisOutcome, Summarizer, summarize};

/// Configure structured JSON logging.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; only the first subscriber is installed.
///
/// # Example
///
/// ```
/// condense::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
