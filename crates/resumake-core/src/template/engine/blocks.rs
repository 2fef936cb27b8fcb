//! Block statements and block matching
//!
//! Turns the token stream into a tree: `for` / `if` bodies are collected
//! until their matching `endfor` / `endif`, respecting nesting.

use super::super::error::TemplateError;
use super::expr::{parse_condition, parse_expr, strip_keyword, Condition, Expr};
use super::tokenize::{TokenKind, TokenStream};

/// Parsed template tree node
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Output {
        expr: Expr,
        line: usize,
    },
    For {
        var: String,
        iterable: Expr,
        body: Vec<Node>,
        /// Rendered when the iterable is empty
        empty: Vec<Node>,
        line: usize,
    },
    If {
        branches: Vec<(Condition, Vec<Node>)>,
        otherwise: Vec<Node>,
        line: usize,
    },
    Include {
        path: String,
        line: usize,
    },
}

/// Content of a `<BLOCK> ... </BLOCK>` tag
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    For { var: String, iterable: Expr },
    EndFor,
    If(Condition),
    Elif(Condition),
    Else,
    EndIf,
    Include(String),
}

impl Statement {
    fn keyword(&self) -> &'static str {
        match self {
            Statement::For { .. } => "for",
            Statement::EndFor => "endfor",
            Statement::If(_) => "if",
            Statement::Elif(_) => "elif",
            Statement::Else => "else",
            Statement::EndIf => "endif",
            Statement::Include(_) => "include",
        }
    }
}

pub(crate) fn parse_statement(content: &str, line: usize) -> Result<Statement, TemplateError> {
    let content = content.trim();
    let keyword = content.split_whitespace().next().unwrap_or("");

    match keyword {
        "for" => parse_for(content, line),
        "if" => Ok(Statement::If(parse_condition(&content[2..], line)?)),
        "elif" => Ok(Statement::Elif(parse_condition(&content[4..], line)?)),
        "else" | "endfor" | "endif" => {
            if content != keyword {
                return Err(malformed(
                    &format!("'{}' takes no arguments", keyword),
                    line,
                ));
            }
            Ok(match keyword {
                "else" => Statement::Else,
                "endfor" => Statement::EndFor,
                _ => Statement::EndIf,
            })
        }
        "include" => {
            let target = content[7..].trim();
            let unquoted = target
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .or_else(|| target.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
            match unquoted {
                Some(path) if !path.is_empty() => Ok(Statement::Include(path.to_string())),
                _ => Err(malformed(
                    &format!("include expects a quoted path, found '{}'", target),
                    line,
                )),
            }
        }
        "" => Err(malformed("Empty block tag", line)),
        other => Err(malformed(&format!("Unknown block tag '{}'", other), line)),
    }
}

/// `for <var> in <expr>`
fn parse_for(content: &str, line: usize) -> Result<Statement, TemplateError> {
    let invalid = || {
        malformed(
            &format!("Invalid for syntax: expected 'for item in items', found '{}'", content),
            line,
        )
    };

    let rest = strip_keyword(content, "for").ok_or_else(invalid)?;
    let (var, rest) = rest.split_once(char::is_whitespace).ok_or_else(invalid)?;
    let iterable = strip_keyword(rest.trim_start(), "in").ok_or_else(invalid)?;

    let valid_var = var.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && var.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !valid_var || var == "loop" {
        return Err(malformed(&format!("Invalid loop variable '{}'", var), line));
    }

    Ok(Statement::For {
        var: var.to_string(),
        iterable: parse_expr(iterable, line)?,
    })
}

/// Statement that ended a body, with its line
type Terminator = Option<(Statement, usize)>;

/// Recursive-descent builder over a token stream
pub(crate) struct TreeBuilder<'a> {
    tokens: TokenStream<'a>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(tokens: TokenStream<'a>) -> Self {
        Self { tokens }
    }

    /// Parse the whole template. A stray `endfor`/`endif`/`else`/`elif`
    /// at top level is an error.
    pub fn build(mut self) -> Result<Vec<Node>, TemplateError> {
        let (nodes, end) = self.parse_body()?;
        match end {
            None => Ok(nodes),
            Some((statement, line)) => Err(unexpected(&statement, line)),
        }
    }

    fn parse_body(&mut self) -> Result<(Vec<Node>, Terminator), TemplateError> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.next() {
            let token = token?;
            match token.kind {
                TokenKind::Text => nodes.push(Node::Text(token.content.to_string())),
                TokenKind::Comment => {}
                TokenKind::Variable => nodes.push(Node::Output {
                    expr: parse_expr(token.content, token.line)?,
                    line: token.line,
                }),
                TokenKind::Block => match parse_statement(token.content, token.line)? {
                    Statement::For { var, iterable } => {
                        nodes.push(self.parse_for_body(var, iterable, token.line)?)
                    }
                    Statement::If(condition) => {
                        nodes.push(self.parse_if_body(condition, token.line)?)
                    }
                    Statement::Include(path) => nodes.push(Node::Include {
                        path,
                        line: token.line,
                    }),
                    other => return Ok((nodes, Some((other, token.line)))),
                },
            }
        }

        Ok((nodes, None))
    }

    fn parse_for_body(
        &mut self,
        var: String,
        iterable: Expr,
        line: usize,
    ) -> Result<Node, TemplateError> {
        let (body, end) = self.parse_body()?;
        let empty = match end {
            Some((Statement::EndFor, _)) => Vec::new(),
            Some((Statement::Else, _)) => match self.parse_body()? {
                (empty, Some((Statement::EndFor, _))) => empty,
                (_, Some((statement, at))) => return Err(unexpected(&statement, at)),
                (_, None) => return Err(unclosed("for", line)),
            },
            Some((statement, at)) => return Err(unexpected(&statement, at)),
            None => return Err(unclosed("for", line)),
        };

        Ok(Node::For {
            var,
            iterable,
            body,
            empty,
            line,
        })
    }

    fn parse_if_body(&mut self, condition: Condition, line: usize) -> Result<Node, TemplateError> {
        let mut branches = Vec::new();
        let mut condition = condition;

        loop {
            let (body, end) = self.parse_body()?;
            branches.push((condition, body));

            match end {
                Some((Statement::EndIf, _)) => {
                    return Ok(Node::If {
                        branches,
                        otherwise: Vec::new(),
                        line,
                    })
                }
                Some((Statement::Elif(next), _)) => condition = next,
                Some((Statement::Else, _)) => {
                    return match self.parse_body()? {
                        (otherwise, Some((Statement::EndIf, _))) => Ok(Node::If {
                            branches,
                            otherwise,
                            line,
                        }),
                        (_, Some((statement, at))) => Err(unexpected(&statement, at)),
                        (_, None) => Err(unclosed("if", line)),
                    };
                }
                Some((statement, at)) => return Err(unexpected(&statement, at)),
                None => return Err(unclosed("if", line)),
            }
        }
    }
}

fn unexpected(statement: &Statement, line: usize) -> TemplateError {
    malformed(
        &format!("Unexpected '{}' without a matching open block", statement.keyword()),
        line,
    )
}

fn unclosed(keyword: &str, line: usize) -> TemplateError {
    malformed(&format!("Unclosed '{}' block", keyword), line)
}

fn malformed(message: &str, line: usize) -> TemplateError {
    TemplateError::MalformedSyntax {
        message: message.to_string(),
        line,
    }
}
