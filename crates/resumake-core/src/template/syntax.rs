//! Delimiter sets

/// Delimiters for the three tag kinds
///
/// The default set keeps templates readable as LaTeX: none of the markers
/// use `{`, `}`, `%` or `\`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    pub variable_start: String,
    pub variable_end: String,
    pub block_start: String,
    pub block_end: String,
    pub comment_start: String,
    pub comment_end: String,
}

impl Syntax {
    /// `<< var >>`, `<BLOCK> stmt </BLOCK>`, `<# comment #>`
    pub fn latex() -> Self {
        Self {
            variable_start: "<<".to_string(),
            variable_end: ">>".to_string(),
            block_start: "<BLOCK>".to_string(),
            block_end: "</BLOCK>".to_string(),
            comment_start: "<#".to_string(),
            comment_end: "#>".to_string(),
        }
    }

    /// Reject empty delimiters, which would make the tokenizer loop forever
    pub(crate) fn is_valid(&self) -> bool {
        [
            &self.variable_start,
            &self.variable_end,
            &self.block_start,
            &self.block_end,
            &self.comment_start,
            &self.comment_end,
        ]
        .iter()
        .all(|d| !d.is_empty())
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self::latex()
    }
}
