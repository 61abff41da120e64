/// Character count and rough token estimate for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub char_count: usize,
    pub token_estimate: usize,
}

impl TextStats {
    #[must_use]
    pub fn of(text: &str) -> Self {
        let char_count = text.chars().count();
        Self {
            char_count,
            token_estimate: estimate_tokens(char_count),
        }
    }
}

/// Four characters per token, rounded up.
#[must_use]
pub const fn estimate_tokens(char_count: usize) -> usize {
    char_count.div_ceil(4)
}
