use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::error;

use condense::core::config::AppConfig;
use condense::prompt::PromptTemplate;
use condense::utils::TextStats;
use condense::{ModelVersion, SummarizationOptions, SummaryResult, Summarizer};

/// Shown instead of a summary when a request fails.
const FALLBACK_MESSAGE: &str = "Error processing text. Please try again.";

#[derive(Debug, Parser)]
#[command(name = "condense", about = "Summarize text with Gemini")]
struct Cli {
    /// Text to summarize; read from --file or stdin when omitted
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Model version: 1.5 or 2.0
    #[arg(short, long, default_value = "1.5", env = "CONDENSE_MODEL")]
    model: ModelVersion,

    /// Custom instruction replacing the template
    #[arg(short, long)]
    prompt: Option<String>,

    /// Built-in template name (points, brief, paragraph)
    #[arg(long, default_value = "points")]
    template: String,

    /// Keywords the summary should emphasize
    #[arg(short, long)]
    keywords: Option<String>,

    /// Also produce a plain summary alongside the keyword one
    #[arg(long, requires = "keywords")]
    emphasis: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print character and token counts
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    condense::setup_logging();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "condense failed");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let input = read_input(&cli).await?;
    if input.trim().is_empty() {
        bail!("no input text");
    }

    let Some(template) = PromptTemplate::find_builtin(&cli.template) else {
        bail!("unknown template: {}", cli.template);
    };

    let summarizer = Summarizer::new(AppConfig::from_env()).with_template(template);
    let options = SummarizationOptions {
        model_version: cli.model,
        prompt_override: cli.prompt.clone(),
        keywords: cli.keywords.clone(),
    };

    if cli.stats {
        let stats = TextStats::of(&input);
        println!(
            "Input - Characters: {} Tokens: {}",
            stats.char_count, stats.token_estimate
        );
    }

    if cli.emphasis {
        let outcome = summarizer.summarize_with_emphasis(&input, &options).await;
        let plain_ok = report(&cli, "Summary", outcome.plain)?;
        let emphasized_ok = match outcome.emphasized {
            Some(result) => report(&cli, "Keyword summary", result)?,
            None => true,
        };
        return Ok(plain_ok && emphasized_ok);
    }

    let result = summarizer.summarize_with_options(&input, &options).await;
    report(&cli, "Summary", result)
}

async fn read_input(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cli.file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("reading stdin")?;
    Ok(buf)
}

/// Prints one result; returns whether it succeeded.
fn report(
    cli: &Cli,
    label: &str,
    result: Result<SummaryResult, condense::SummarizeError>,
) -> Result<bool> {
    let (summary, ok) = match result {
        Ok(summary) => (summary, true),
        Err(e) => {
            error!(error = %e, "{label} failed");
            eprintln!("{e}");
            (
                SummaryResult {
                    text: FALLBACK_MESSAGE.to_string(),
                    ..SummaryResult::default()
                },
                false,
            )
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("== {label} ==");
        println!("{}", summary.text);
    }

    if cli.stats {
        let stats = TextStats::of(&summary.text);
        println!(
            "Output - Characters: {} Tokens: {} API Tokens: {} (prompt {}, response {})",
            stats.char_count,
            stats.token_estimate,
            summary.total_tokens,
            summary.prompt_tokens,
            summary.response_tokens
        );
    }

    Ok(ok)
}
