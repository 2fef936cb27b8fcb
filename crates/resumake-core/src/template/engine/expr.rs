//! Expression parsing: `path.to.value | filter | filter("arg")`

use serde_yaml::Value;

use super::super::error::TemplateError;

/// Left-hand side of an expression
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    /// Dotted lookup, e.g. `jobs.0.title`
    Path(Vec<String>),
    /// Quoted or numeric literal
    Literal(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilterCall {
    pub name: String,
    pub args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expr {
    pub operand: Operand,
    pub filters: Vec<FilterCall>,
}

impl Expr {
    /// Dotted key as written, for error messages
    pub fn key(&self) -> String {
        match &self.operand {
            Operand::Path(parts) => parts.join("."),
            Operand::Literal(Value::String(s)) => format!("\"{}\"", s),
            Operand::Literal(other) => serde_yaml::to_string(other)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
        }
    }
}

/// `if` / `elif` condition
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Condition {
    pub negated: bool,
    pub expr: Expr,
}

pub(crate) fn parse_condition(source: &str, line: usize) -> Result<Condition, TemplateError> {
    let trimmed = source.trim();
    match strip_keyword(trimmed, "not") {
        Some(rest) => Ok(Condition {
            negated: true,
            expr: parse_expr(rest, line)?,
        }),
        None => Ok(Condition {
            negated: false,
            expr: parse_expr(trimmed, line)?,
        }),
    }
}

/// Strip a leading keyword followed by whitespace
pub(crate) fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

pub(crate) fn parse_expr(source: &str, line: usize) -> Result<Expr, TemplateError> {
    let segments = split_outside_quotes(source, '|', line)?;
    let mut segments = segments.into_iter();

    let head = segments.next().unwrap_or_default();
    let operand = parse_operand(head.trim(), line)?;

    let filters = segments
        .map(|segment| parse_filter(segment.trim(), line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Expr { operand, filters })
}

fn parse_operand(text: &str, line: usize) -> Result<Operand, TemplateError> {
    if text.is_empty() {
        return Err(malformed("Empty expression", line));
    }
    if let Some(literal) = parse_literal(text, line)? {
        return Ok(Operand::Literal(literal));
    }

    let parts: Vec<String> = text.split('.').map(str::to_string).collect();
    if parts.iter().any(|p| !is_identifier(p) && p.parse::<usize>().is_err()) {
        return Err(malformed(&format!("Invalid expression '{}'", text), line));
    }
    Ok(Operand::Path(parts))
}

fn parse_filter(text: &str, line: usize) -> Result<FilterCall, TemplateError> {
    let (name, args) = match text.find('(') {
        Some(open) => {
            let inner = text[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| malformed(&format!("Unclosed argument list in '{}'", text), line))?;
            let args = if inner.trim().is_empty() {
                Vec::new()
            } else {
                split_outside_quotes(inner, ',', line)?
                    .into_iter()
                    .map(|arg| {
                        parse_literal(arg.trim(), line)?.ok_or_else(|| {
                            let arg = arg.trim();
                            let message =
                                format!("Filter arguments must be literals, found '{}'", arg);
                            malformed(&message, line)
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            };
            (text[..open].trim(), args)
        }
        None => (text, Vec::new()),
    };

    if !is_identifier(name) {
        return Err(malformed(&format!("Invalid filter name '{}'", name), line));
    }

    Ok(FilterCall {
        name: name.to_string(),
        args,
    })
}

/// `"text"`, `'text'` or an integer; `Ok(None)` for anything else
fn parse_literal(text: &str, line: usize) -> Result<Option<Value>, TemplateError> {
    let first = match text.chars().next() {
        Some(c) => c,
        None => return Ok(None),
    };

    if first == '"' || first == '\'' {
        let body = &text[1..];
        return match body.strip_suffix(first) {
            Some(inner) if !inner.contains(first) => Ok(Some(Value::String(inner.to_string()))),
            _ => Err(malformed(&format!("Unterminated string literal {}", text), line)),
        };
    }

    if first == '-' || first.is_ascii_digit() {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Some(Value::Number(n.into())));
        }
    }

    Ok(None)
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Split on `separator`, ignoring separators inside quotes
fn split_outside_quotes(
    text: &str,
    separator: char,
    line: usize,
) -> Result<Vec<&str>, TemplateError> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut last = 0;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == separator => {
                parts.push(&text[last..i]);
                last = i + c.len_utf8();
            }
            None => {}
        }
    }

    if quote.is_some() {
        return Err(malformed(&format!("Unterminated string literal in '{}'", text.trim()), line));
    }

    parts.push(&text[last..]);
    Ok(parts)
}

fn malformed(message: &str, line: usize) -> TemplateError {
    TemplateError::MalformedSyntax {
        message: message.to_string(),
        line,
    }
}
