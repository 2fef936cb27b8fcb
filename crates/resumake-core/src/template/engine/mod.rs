//! Template engine implementation

mod blocks;
mod expr;
mod filters;
mod helpers;
mod tokenize;

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::ResumeData;
use crate::template::error::TemplateError;
use crate::template::syntax::Syntax;

use blocks::{Node, TreeBuilder};
use expr::{Condition, Expr, Operand};
use helpers::{is_truthy, resolve_segments, stringify_value, untag};
use tokenize::TokenStream;

pub use filters::{coerce_text, expect_text, Filter, FilterRegistry};

/// Maximum include nesting (include cycle protection)
const MAX_INCLUDE_DEPTH: usize = 16;

/// Template context holding the YAML data for rendering
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    data: Mapping,
}

impl TemplateContext {
    /// Create a new template context from a YAML mapping
    pub fn new(data: Mapping) -> Self {
        Self { data }
    }

    /// Get the underlying mapping
    pub fn data(&self) -> &Mapping {
        &self.data
    }
}

impl From<&ResumeData> for TemplateContext {
    fn from(data: &ResumeData) -> Self {
        Self::new(data.root().clone())
    }
}

/// Variable lookup: loop bindings shadow the root mapping, innermost first
struct Scope<'a> {
    root: &'a Mapping,
    frames: Vec<(String, Value)>,
}

impl<'a> Scope<'a> {
    fn new(root: &'a Mapping) -> Self {
        Self {
            root,
            frames: Vec::new(),
        }
    }

    fn lookup(&self, segments: &[String]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        let base = self
            .frames
            .iter()
            .rev()
            .find(|(name, _)| name == first)
            .map(|(_, value)| value)
            .or_else(|| self.root.get(first.as_str()))?;
        resolve_segments(base, rest)
    }
}

/// Include resolution state
#[derive(Clone, Copy)]
struct IncludeState<'p> {
    dir: Option<&'p Path>,
    depth: usize,
}

/// Template engine for rendering templates with YAML data
pub struct TemplateEngine {
    syntax: Syntax,
    filters: FilterRegistry,
    keep_trailing_newline: bool,
}

impl TemplateEngine {
    /// Create a new template engine with the LaTeX-safe syntax and the
    /// built-in filters
    pub fn new() -> Self {
        Self {
            syntax: Syntax::latex(),
            filters: FilterRegistry::with_builtins(),
            keep_trailing_newline: false,
        }
    }

    /// Use a different delimiter set
    pub fn with_syntax(mut self, syntax: Syntax) -> Result<Self, TemplateError> {
        if !syntax.is_valid() {
            return Err(TemplateError::MalformedSyntax {
                message: "Delimiters must not be empty".to_string(),
                line: 0,
            });
        }
        self.syntax = syntax;
        Ok(self)
    }

    /// Keep a single newline at the end of each template source. By default
    /// it is dropped, as Jinja does.
    pub fn keep_trailing_newline(mut self, keep: bool) -> Self {
        self.keep_trailing_newline = keep;
        self
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Register (or replace) a named filter
    pub fn add_filter<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&Value, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.filters.insert(name, Box::new(filter));
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains(name)
    }

    /// Render a template with the given context. `include` tags fail
    /// because there is no directory to resolve them against.
    pub fn render(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        self.render_source(template, context, None)
    }

    /// Render a template whose `include` paths resolve against `base_dir`
    pub fn render_with_base(
        &self,
        template: &str,
        context: &TemplateContext,
        base_dir: &Path,
    ) -> Result<String, TemplateError> {
        self.render_source(template, context, Some(base_dir))
    }

    fn render_source(
        &self,
        template: &str,
        context: &TemplateContext,
        dir: Option<&Path>,
    ) -> Result<String, TemplateError> {
        let nodes = self.parse(template)?;
        let mut scope = Scope::new(context.data());
        let mut output = String::with_capacity(template.len());
        self.render_nodes(&nodes, &mut scope, IncludeState { dir, depth: 0 }, &mut output)?;
        Ok(output)
    }

    fn parse(&self, template: &str) -> Result<Vec<Node>, TemplateError> {
        let source = if self.keep_trailing_newline {
            template
        } else {
            strip_trailing_newline(template)
        };
        TreeBuilder::new(TokenStream::new(source, &self.syntax)).build()
    }

    fn render_nodes(
        &self,
        nodes: &[Node],
        scope: &mut Scope,
        include: IncludeState,
        output: &mut String,
    ) -> Result<(), TemplateError> {
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Output { expr, line } => {
                    let value = self
                        .evaluate(expr, scope, *line)?
                        .ok_or_else(|| TemplateError::UndefinedKey {
                            key: expr.key(),
                            line: *line,
                        })?;
                    output.push_str(&stringify_value(&value, &expr.key())?);
                }
                Node::For {
                    var,
                    iterable,
                    body,
                    empty,
                    line,
                } => self.render_for(var, iterable, body, empty, *line, scope, include, output)?,
                Node::If {
                    branches,
                    otherwise,
                    line,
                } => {
                    let mut taken = None;
                    for (condition, body) in branches {
                        if self.check(condition, scope, *line)? {
                            taken = Some(body);
                            break;
                        }
                    }
                    self.render_nodes(taken.unwrap_or(otherwise), scope, include, output)?;
                }
                Node::Include { path, line } => {
                    self.render_include(path, *line, scope, include, output)?
                }
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render_for(
        &self,
        var: &str,
        iterable: &Expr,
        body: &[Node],
        empty: &[Node],
        line: usize,
        scope: &mut Scope,
        include: IncludeState,
        output: &mut String,
    ) -> Result<(), TemplateError> {
        let value = self
            .evaluate(iterable, scope, line)?
            .ok_or_else(|| TemplateError::UndefinedKey {
                key: iterable.key(),
                line,
            })?;

        let items: Vec<Value> = match untag(&value) {
            Value::Sequence(items) => items.clone(),
            Value::Mapping(map) => map.keys().cloned().collect(),
            _ => {
                return Err(TemplateError::NotIterable {
                    key: iterable.key(),
                    line,
                })
            }
        };

        if items.is_empty() {
            return self.render_nodes(empty, scope, include, output);
        }

        let length = items.len();
        for (index, item) in items.into_iter().enumerate() {
            scope.frames.push(("loop".to_string(), loop_info(index, length)));
            scope.frames.push((var.to_string(), item));
            let result = self.render_nodes(body, scope, include, output);
            scope.frames.truncate(scope.frames.len() - 2);
            result?;
        }
        Ok(())
    }

    fn render_include(
        &self,
        path: &str,
        line: usize,
        scope: &mut Scope,
        include: IncludeState,
        output: &mut String,
    ) -> Result<(), TemplateError> {
        let failed = |reason: String| TemplateError::IncludeFailed {
            path: path.to_string(),
            reason,
            line,
        };

        let dir = include.dir.ok_or_else(|| {
            failed("no template directory to resolve includes against".to_string())
        })?;
        if include.depth >= MAX_INCLUDE_DEPTH {
            return Err(failed(format!(
                "include depth exceeds {} (include cycle?)",
                MAX_INCLUDE_DEPTH
            )));
        }

        let full_path: PathBuf = dir.join(path);
        let source = fs::read_to_string(&full_path)
            .map_err(|e| failed(format!("{}: {}", full_path.display(), e)))?;
        let nodes = self.parse(&source)?;

        let nested_dir = full_path.parent().unwrap_or(dir);
        log::debug!("including {}", full_path.display());
        self.render_nodes(
            &nodes,
            scope,
            IncludeState {
                dir: Some(nested_dir),
                depth: include.depth + 1,
            },
            output,
        )
    }

    fn check(
        &self,
        condition: &Condition,
        scope: &Scope,
        line: usize,
    ) -> Result<bool, TemplateError> {
        // Undefined paths are false in conditions
        let truthy = self
            .evaluate(&condition.expr, scope, line)?
            .as_ref()
            .is_some_and(is_truthy);
        Ok(truthy != condition.negated)
    }

    /// Evaluate an expression. `Ok(None)` means the path is undefined.
    ///
    /// An undefined operand skips every filter up to the first `default`,
    /// which supplies the value.
    fn evaluate(
        &self,
        expr: &Expr,
        scope: &Scope,
        line: usize,
    ) -> Result<Option<Value>, TemplateError> {
        let mut value = match &expr.operand {
            Operand::Literal(literal) => Some(literal.clone()),
            Operand::Path(segments) => scope.lookup(segments).cloned(),
        };

        for call in &expr.filters {
            let filter = self
                .filters
                .get(&call.name)
                .ok_or_else(|| TemplateError::UnknownFilter {
                    name: call.name.clone(),
                    line,
                })?;

            let current = match value.take() {
                Some(current) => current,
                None if call.name == "default" => Value::Null,
                None => continue,
            };
            let filtered = filter(&current, &call.args).map_err(|message| {
                TemplateError::FilterFailed {
                    name: call.name.clone(),
                    message,
                    line,
                }
            })?;
            value = Some(filtered);
        }

        Ok(value)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_trailing_newline(source: &str) -> &str {
    source
        .strip_suffix("\r\n")
        .or_else(|| source.strip_suffix('\n'))
        .unwrap_or(source)
}

/// `loop.index`, `loop.index0`, `loop.first`, `loop.last`, `loop.length`
fn loop_info(index: usize, length: usize) -> Value {
    let mut info = Mapping::new();
    info.insert("index".into(), Value::Number(((index + 1) as u64).into()));
    info.insert("index0".into(), Value::Number((index as u64).into()));
    info.insert("first".into(), Value::Bool(index == 0));
    info.insert("last".into(), Value::Bool(index + 1 == length));
    info.insert("length".into(), Value::Number((length as u64).into()));
    Value::Mapping(info)
}

/// Convenience function to render a template
pub fn render(template: &str, context: &TemplateContext) -> Result<String, TemplateError> {
    TemplateEngine::new().render(template, context)
}

#[cfg(test)]
mod tests;
