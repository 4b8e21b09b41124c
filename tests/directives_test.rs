use depchain::directives::{extract_header, parse_directives, tokenize};

// ---------------------------------------------------------------------------
// Header extraction
// ---------------------------------------------------------------------------

#[test]
fn test_header_collects_leading_comment_lines() {
    let content = "//= require a\n// plain comment\nvar code = 1;\n// trailing\n";
    assert_eq!(extract_header(content), "//= require a\n// plain comment\n");
}

#[test]
fn test_header_recognizes_hash_comments() {
    let content = "#= require b\n# note\ncoffee = true\n";
    assert_eq!(extract_header(content), "#= require b\n# note\n");
}

#[test]
fn test_header_recognizes_block_comment_lines() {
    let content = "/*\n *= require base\n */\nbody();\n";
    assert_eq!(extract_header(content), "/*\n *= require base\n */\n");
}

#[test]
fn test_blank_line_ends_header() {
    let content = "// top\n\n//= require hidden\n";
    assert_eq!(extract_header(content), "// top\n");
}

#[test]
fn test_no_header_for_file_starting_with_code() {
    assert_eq!(extract_header("var x = 1;\n//= require a\n"), "");
    assert_eq!(extract_header(""), "");
}

// ---------------------------------------------------------------------------
// Directive parsing
// ---------------------------------------------------------------------------

#[test]
fn test_parses_line_comment_directives() {
    let header = "//= require a\n//= require_tree lib\n";
    assert_eq!(
        parse_directives(header),
        vec!["require a".to_string(), "require_tree lib".to_string()]
    );
}

#[test]
fn test_parses_hash_and_block_directives() {
    let header = "#= require y\n *= require base */\n";
    assert_eq!(
        parse_directives(header),
        vec!["require y".to_string(), "require base".to_string()]
    );
}

#[test]
fn test_plain_comments_are_not_directives() {
    let header = "// just a comment\n# another one\n";
    assert!(parse_directives(header).is_empty());
}

#[test]
fn test_directives_keep_file_order() {
    let header = "//= require one\n// interleaved\n//= require two\n//= require three\n";
    assert_eq!(
        parse_directives(header),
        vec![
            "require one".to_string(),
            "require two".to_string(),
            "require three".to_string()
        ]
    );
}

#[test]
fn test_directives_after_code_are_ignored_end_to_end() {
    let content = "// header\nvar x = 1;\n//= require late\n";
    let directives = parse_directives(&extract_header(content));
    assert!(directives.is_empty());
}

// ---------------------------------------------------------------------------
// Tokenizing
// ---------------------------------------------------------------------------

#[test]
fn test_tokenize_splits_on_whitespace() {
    assert_eq!(
        tokenize("require b x"),
        vec!["require".to_string(), "b".to_string(), "x".to_string()]
    );
}

#[test]
fn test_tokenize_strips_quotes() {
    assert_eq!(
        tokenize("require 'b'  \"x\""),
        vec!["require".to_string(), "b".to_string(), "x".to_string()]
    );
}
