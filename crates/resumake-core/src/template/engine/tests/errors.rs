//! Error handling tests for template engine

use super::helpers::{resume_context, simple_context};
use super::*;

#[test]
fn test_error_undefined_key() {
    let context = simple_context();
    let result = render("Value: <<nonexistent>>", &context);
    match result {
        Err(TemplateError::UndefinedKey { key, line }) => {
            assert_eq!(key, "nonexistent");
            assert_eq!(line, 1);
        }
        _ => panic!("Expected UndefinedKey error"),
    }
}

#[test]
fn test_error_undefined_nested_key_reports_line() {
    let context = resume_context();
    let result = render("line one\nline two\n<< basics.phone >>", &context);
    match result {
        Err(TemplateError::UndefinedKey { key, line }) => {
            assert_eq!(key, "basics.phone");
            assert_eq!(line, 3);
        }
        _ => panic!("Expected UndefinedKey error"),
    }
}

#[test]
fn test_error_index_out_of_range() {
    let context = resume_context();
    let result = render("<< jobs.9.title >>", &context);
    assert!(matches!(result, Err(TemplateError::UndefinedKey { .. })));
}

#[test]
fn test_error_undefined_in_loop_body() {
    let context = resume_context();
    let template = "<BLOCK> for job in jobs </BLOCK><< job.salary >><BLOCK> endfor </BLOCK>";
    match render(template, &context) {
        Err(TemplateError::UndefinedKey { key, .. }) => assert_eq!(key, "job.salary"),
        _ => panic!("Expected UndefinedKey error"),
    }
}

#[test]
fn test_error_sequence_in_output() {
    let context = resume_context();
    let result = render("Skills: << skills >>", &context);
    match result {
        Err(TemplateError::SequenceInOutput { key }) => assert_eq!(key, "skills"),
        _ => panic!("Expected SequenceInOutput error"),
    }
}

#[test]
fn test_error_mapping_in_output() {
    let context = resume_context();
    let result = render("<< basics >>", &context);
    match result {
        Err(TemplateError::MappingInOutput { key }) => assert_eq!(key, "basics"),
        _ => panic!("Expected MappingInOutput error"),
    }
}

#[test]
fn test_error_not_iterable() {
    let context = resume_context();
    let template = "\n<BLOCK> for c in basics.name </BLOCK>x<BLOCK> endfor </BLOCK>";
    match render(template, &context) {
        Err(TemplateError::NotIterable { key, line }) => {
            assert_eq!(key, "basics.name");
            assert_eq!(line, 2);
        }
        _ => panic!("Expected NotIterable error"),
    }
}

#[test]
fn test_error_loop_over_undefined() {
    let context = resume_context();
    let template = "<BLOCK> for x in awards </BLOCK><< x >><BLOCK> endfor </BLOCK>";
    match render(template, &context) {
        Err(TemplateError::UndefinedKey { key, .. }) => assert_eq!(key, "awards"),
        _ => panic!("Expected UndefinedKey error"),
    }
}

#[test]
fn test_error_unknown_filter() {
    let context = simple_context();
    match render("<< title | shout >>", &context) {
        Err(TemplateError::UnknownFilter { name, line }) => {
            assert_eq!(name, "shout");
            assert_eq!(line, 1);
        }
        _ => panic!("Expected UnknownFilter error"),
    }
}

#[test]
fn test_error_filter_failed() {
    let context = resume_context();
    match render("<< basics.name | join >>", &context) {
        Err(TemplateError::FilterFailed { name, message, .. }) => {
            assert_eq!(name, "join");
            assert!(message.contains("expected a sequence"));
        }
        _ => panic!("Expected FilterFailed error"),
    }
}

#[test]
fn test_error_malformed_unclosed_variable() {
    let context = simple_context();
    match render("Title: << title", &context) {
        Err(TemplateError::MalformedSyntax { message, line }) => {
            assert!(message.contains("Unclosed variable tag"));
            assert_eq!(line, 1);
        }
        _ => panic!("Expected MalformedSyntax error"),
    }
}

#[test]
fn test_error_unclosed_for_block() {
    let context = resume_context();
    match render("<BLOCK> for s in skills </BLOCK><< s >>", &context) {
        Err(TemplateError::MalformedSyntax { message, .. }) => {
            assert!(message.contains("Unclosed 'for' block"));
        }
        _ => panic!("Expected MalformedSyntax error"),
    }
}

#[test]
fn test_error_unclosed_if_block() {
    let context = simple_context();
    let result = render("<BLOCK> if enabled </BLOCK>x<BLOCK> else </BLOCK>y", &context);
    assert!(matches!(result, Err(TemplateError::MalformedSyntax { .. })));
}

#[test]
fn test_error_stray_end_tag() {
    let context = simple_context();
    match render("x\n<BLOCK> endfor </BLOCK>", &context) {
        Err(TemplateError::MalformedSyntax { message, line }) => {
            assert!(message.contains("Unexpected 'endfor'"));
            assert_eq!(line, 2);
        }
        _ => panic!("Expected MalformedSyntax error"),
    }
}

#[test]
fn test_error_mismatched_end_tag() {
    let context = resume_context();
    let result = render("<BLOCK> for s in skills </BLOCK><BLOCK> endif </BLOCK>", &context);
    assert!(matches!(result, Err(TemplateError::MalformedSyntax { .. })));
}

#[test]
fn test_error_unknown_block_tag() {
    let context = simple_context();
    match render("<BLOCK> macro x </BLOCK>", &context) {
        Err(TemplateError::MalformedSyntax { message, .. }) => {
            assert!(message.contains("Unknown block tag 'macro'"));
        }
        _ => panic!("Expected MalformedSyntax error"),
    }
}

#[test]
fn test_error_invalid_for_syntax() {
    let context = resume_context();
    for template in [
        "<BLOCK> for skills </BLOCK><BLOCK> endfor </BLOCK>",
        "<BLOCK> for s of skills </BLOCK><BLOCK> endfor </BLOCK>",
        "<BLOCK> for loop in skills </BLOCK><BLOCK> endfor </BLOCK>",
    ] {
        assert!(
            matches!(render(template, &context), Err(TemplateError::MalformedSyntax { .. })),
            "expected MalformedSyntax for {:?}",
            template
        );
    }
}

#[test]
fn test_error_syntax_errors_win_over_data_errors() {
    // Parsing happens before any lookup
    let context = simple_context();
    let result = render("<< missing >> << broken", &context);
    assert!(matches!(result, Err(TemplateError::MalformedSyntax { .. })));
}

#[test]
fn test_error_display_format() {
    let err = TemplateError::UndefinedKey {
        key: "basics.name".to_string(),
        line: 4,
    };
    assert_eq!(err.to_string(), "Undefined key 'basics.name' at line 4");
}

#[test]
fn test_empty_delimiters_rejected() {
    let mut syntax = Syntax::latex();
    syntax.comment_end = String::new();
    assert!(TemplateEngine::new().with_syntax(syntax).is_err());
}
