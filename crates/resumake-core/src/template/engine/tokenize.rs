//! Tokenization for template engine
//!
//! Splits a template into literal text and tag tokens in a single forward
//! pass. Tags are delimited by the three start/end pairs of a [`Syntax`].

use super::super::error::TemplateError;
use super::super::syntax::Syntax;

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Literal text between tags
    Text,
    /// `<< expr >>`
    Variable,
    /// `<BLOCK> stmt </BLOCK>`
    Block,
    /// `<# ... #>`
    Comment,
}

/// A slice of the template with position metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    /// Text for `Text`, the untrimmed inner content for tags
    pub content: &'a str,
    /// Line number where the token starts (for error messages)
    pub line: usize,
}

const TAG_KINDS: [TokenKind; 3] = [TokenKind::Variable, TokenKind::Block, TokenKind::Comment];

/// Iterator over tokens in a template string
///
/// Each opener's next occurrence is cached and only searched again once the
/// scan position moves past it, so every byte is looked at a bounded number
/// of times.
pub(crate) struct TokenStream<'a> {
    source: &'a str,
    syntax: &'a Syntax,
    pos: usize,
    line: usize,
    /// Cached next position of each opener (`None` = not found before EOF)
    next_open: [Option<usize>; 3],
    failed: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str, syntax: &'a Syntax) -> Self {
        let mut stream = Self {
            source,
            syntax,
            pos: 0,
            line: 1,
            next_open: [None; 3],
            failed: false,
        };
        for i in 0..TAG_KINDS.len() {
            stream.refresh_opener(i);
        }
        stream
    }

    fn delimiters(&self, kind: TokenKind) -> (&'a str, &'a str) {
        let syntax = self.syntax;
        match kind {
            TokenKind::Variable => (&syntax.variable_start, &syntax.variable_end),
            TokenKind::Block => (&syntax.block_start, &syntax.block_end),
            TokenKind::Comment => (&syntax.comment_start, &syntax.comment_end),
            TokenKind::Text => ("", ""),
        }
    }

    fn refresh_opener(&mut self, index: usize) {
        let (open, _) = self.delimiters(TAG_KINDS[index]);
        self.next_open[index] = self.source[self.pos..].find(open).map(|i| self.pos + i);
    }

    /// Earliest opener at or after `pos`. On a tie the longer opener wins,
    /// so a delimiter that is a prefix of another does not shadow it.
    fn next_tag(&mut self) -> Option<(usize, TokenKind)> {
        let mut best: Option<(usize, usize, TokenKind)> = None;

        for (i, kind) in TAG_KINDS.iter().enumerate() {
            if matches!(self.next_open[i], Some(at) if at < self.pos) {
                self.refresh_opener(i);
            }

            if let Some(at) = self.next_open[i] {
                let len = self.delimiters(*kind).0.len();
                let better = match best {
                    None => true,
                    Some((best_at, best_len, _)) => {
                        at < best_at || (at == best_at && len > best_len)
                    }
                };
                if better {
                    best = Some((at, len, *kind));
                }
            }
        }

        best.map(|(at, _, kind)| (at, kind))
    }

    fn advance_to(&mut self, new_pos: usize) {
        self.line += count_newlines(&self.source[self.pos..new_pos]);
        self.pos = new_pos;
    }

    fn kind_name(kind: TokenKind) -> &'static str {
        match kind {
            TokenKind::Variable => "variable",
            TokenKind::Block => "block",
            TokenKind::Comment => "comment",
            TokenKind::Text => "text",
        }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token<'a>, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.source.len() {
            return None;
        }

        let source = self.source;
        let start = self.pos;
        let line = self.line;

        match self.next_tag() {
            None => {
                self.advance_to(source.len());
                Some(Ok(Token {
                    kind: TokenKind::Text,
                    content: &source[start..],
                    line,
                }))
            }
            Some((at, _)) if at > start => {
                self.advance_to(at);
                Some(Ok(Token {
                    kind: TokenKind::Text,
                    content: &source[start..at],
                    line,
                }))
            }
            Some((at, kind)) => {
                let (open, close) = self.delimiters(kind);
                let content_start = at + open.len();

                match source[content_start..].find(close) {
                    Some(offset) => {
                        let content_end = content_start + offset;
                        self.advance_to(content_end + close.len());
                        Some(Ok(Token {
                            kind,
                            content: &source[content_start..content_end],
                            line,
                        }))
                    }
                    None => {
                        self.failed = true;
                        Some(Err(TemplateError::MalformedSyntax {
                            message: format!(
                                "Unclosed {} tag: '{}' without matching '{}'",
                                Self::kind_name(kind),
                                open,
                                close
                            ),
                            line,
                        }))
                    }
                }
            }
        }
    }
}

/// Count newlines in text
pub(crate) fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
