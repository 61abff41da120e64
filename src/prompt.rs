use once_cell::sync::Lazy;
use regex::Regex;

/// Five-point summary instruction used when no override is given.
pub const DEFAULT_INSTRUCTION: &str = "Summarize the content in 5 points without using any bullets, numbers, or dashes. Each point should be 1-2 sentences or 3 sentences max. Start each point in a new line. Focus on the core subject, addressing the most relevant and critical aspects directly related to it. Avoid using introductory labels like 'What,' 'Why,' or 'When.' Eliminate tangential information and provide a summary that highlights only the most important details, ensuring it centers around the main topic.";

const BRIEF_INSTRUCTION: &str = "Summarize the content in 3 short points without using any bullets, numbers, or dashes. Start each point in a new line and keep each to a single sentence. Focus only on the main topic.";

const PARAGRAPH_INSTRUCTION: &str = "Summarize the content as a single paragraph of at most 5 sentences. Do not use headings, bullets, or lists. Focus on the core subject and leave out tangential details.";

const KEYWORD_CLAUSE_PREFIX: &str =
    " Additionally, ensure the summary emphasizes and incorporates these keywords and related concepts: ";

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("static regex compile"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex compile"));

/// A named instruction template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: String,
    pub text: String,
}

impl PromptTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn default_points() -> Self {
        Self::new("points", DEFAULT_INSTRUCTION)
    }

    /// Templates shipped with the crate, default first.
    #[must_use]
    pub fn builtin() -> Vec<PromptTemplate> {
        vec![
            Self::default_points(),
            Self::new("brief", BRIEF_INSTRUCTION),
            Self::new("paragraph", PARAGRAPH_INSTRUCTION),
        ]
    }

    #[must_use]
    pub fn find_builtin(name: &str) -> Option<PromptTemplate> {
        Self::builtin()
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::default_points()
    }
}

/// Keeps only ASCII letters and digits, then drops any whitespace left over.
#[must_use]
pub fn sanitize_input(text: &str) -> String {
    let cleaned = NON_ALPHANUMERIC.replace_all(text, "");
    WHITESPACE.replace_all(&cleaned, "").into_owned()
}

/// Emphasis clause appended to the instruction; keywords are passed through raw.
#[must_use]
pub fn keyword_clause(keywords: &str) -> String {
    format!("{KEYWORD_CLAUSE_PREFIX}{keywords}.")
}
