use once_cell::sync::Lazy;
use regex::Regex;

/// Directive line inside a comment header: optional comment punctuation, an
/// `=` marker, then the command text, with an optional closing block marker.
/// `//= require a`, `#= require_tree .` and ` *= require b */` all match.
static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\W*=\s*(\w.*?)(?:\*/)?\s*$").unwrap_or_else(|e| panic!("regex: {e}"))
});

/// Returns `true` if a line can be part of a leading comment header.
///
/// Recognizes line comments (`//`, `#`), CoffeeScript block comments
/// (`###`), and C-style block comment lines (`/*` openers and `*`
/// continuations). Anything else, including a blank line, ends the header.
fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//")
        || trimmed.starts_with('#')
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
}

/// Extracts the maximal run of consecutive comment-only lines from the start
/// of `content`. Returns an empty string if the file does not begin with a
/// comment line.
pub fn extract_header(content: &str) -> String {
    let mut header = String::new();

    for line in content.lines() {
        if !is_comment_line(line) {
            break;
        }
        header.push_str(line);
        header.push('\n');
    }

    header
}

/// Finds every directive line within a comment header and returns the
/// captured command text (command name plus arguments) in file order.
///
/// Directives appearing after the first non-comment line are ignored by
/// design, so callers should pass the output of [`extract_header`].
pub fn parse_directives(header: &str) -> Vec<String> {
    DIRECTIVE
        .captures_iter(header)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Splits directive command text into words, stripping quote characters
/// around path arguments first.
pub fn tokenize(directive: &str) -> Vec<String> {
    directive
        .replace(['\'', '"'], "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
