//! Filter application tests

use super::helpers::{resume_context, simple_context, yaml_context};
use super::*;

#[test]
fn test_join_filter() {
    let context = resume_context();
    let result = render(r#"<< skills | join(", ") >>"#, &context).unwrap();
    assert_eq!(result, "Rust, LaTeX, YAML");
}

#[test]
fn test_filter_chain() {
    let context = resume_context();
    let result = render(r#"<< skills | join("/") | upper >>"#, &context).unwrap();
    assert_eq!(result, "RUST/LATEX/YAML");
}

#[test]
fn test_default_for_undefined() {
    let context = simple_context();
    let result = render(r#"<< phone | default("n/a") >>"#, &context).unwrap();
    assert_eq!(result, "n/a");
}

#[test]
fn test_default_keeps_defined_value() {
    let context = simple_context();
    let result = render(r#"<< title | default("n/a") >>"#, &context).unwrap();
    assert_eq!(result, "My Title");
}

#[test]
fn test_default_then_more_filters() {
    let context = simple_context();
    let result = render(r#"<< phone | default("none") | upper >>"#, &context).unwrap();
    assert_eq!(result, "NONE");
}

#[test]
fn test_default_replaces_null() {
    let context = yaml_context("phone: ~\n");
    let result = render(r#"<< phone | default("n/a") >>"#, &context).unwrap();
    assert_eq!(result, "n/a");
}

#[test]
fn test_default_after_other_filters() {
    let context = simple_context();
    let result = render(r#"<< phone | upper | default("none") >>"#, &context).unwrap();
    assert_eq!(result, "none");
}

#[test]
fn test_undefined_without_default_is_error() {
    let context = simple_context();
    let result = render("<< phone | upper >>", &context);
    assert!(matches!(result, Err(TemplateError::UndefinedKey { .. })));
}

#[test]
fn test_unknown_filter_on_undefined_is_reported() {
    let context = simple_context();
    let result = render(r#"<< phone | shout | default("x") >>"#, &context);
    assert!(matches!(result, Err(TemplateError::UnknownFilter { .. })));
}

#[test]
fn test_custom_filter() {
    let mut engine = TemplateEngine::new();
    engine.add_filter("bracket", |value, _args| {
        Ok(serde_yaml::Value::String(format!("[{}]", expect_text(value)?)))
    });
    assert!(engine.has_filter("bracket"));

    let context = simple_context();
    let result = engine.render("<< title | bracket >>", &context).unwrap();
    assert_eq!(result, "[My Title]");
}

#[test]
fn test_custom_filter_replaces_builtin() {
    let mut engine = TemplateEngine::new();
    engine.add_filter("upper", |_, _| Ok(serde_yaml::Value::String("replaced".into())));

    let context = simple_context();
    assert_eq!(engine.render("<< title | upper >>", &context).unwrap(), "replaced");
}

#[test]
fn test_filter_in_loop_iterable() {
    let context = super::helpers::yaml_context("words: [\"  a \", b]\n");
    let template = "<BLOCK> for w in words </BLOCK>(<< w | trim >>)<BLOCK> endfor </BLOCK>";
    assert_eq!(render(template, &context).unwrap(), "(a)(b)");
}
