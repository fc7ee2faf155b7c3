// tests/cli_tests.rs

use flyql::cli::{self, CheckResult, CliOptions};
use flyql::errno;

fn options(query: &str) -> CliOptions {
    CliOptions {
        query: query.to_string(),
        ..Default::default()
    }
}

// ============================================================================
// Parse
// ============================================================================

#[test]
fn test_parse_prints_tree() {
    let output = cli::execute_parse(&options("a=1")).unwrap();
    assert!(!output.failed);
    assert_eq!(
        output.json,
        r#"{"key":{"segments":["a"],"raw":"a"},"operator":"=","value":1}"#
    );
}

#[test]
fn test_parse_prints_internal_nodes() {
    let output = cli::execute_parse(&options("a=1 or b=x")).unwrap();
    assert!(output.json.starts_with(r#"{"bool_operator":"or","left":"#));
    assert!(output.json.contains(r#""value":"x""#));
}

#[test]
fn test_parse_pretty() {
    let mut opts = options("a=1");
    opts.pretty = true;
    let output = cli::execute_parse(&opts).unwrap();
    assert!(output.json.contains("\n  \"operator\": \"=\""));
}

#[test]
fn test_parse_error_is_raised() {
    let err = cli::execute_parse(&options("key")).unwrap_err();
    assert_eq!(err.errno(), Some(errno::UNEXPECTED_EOF));
    assert!(err.to_string().starts_with("Parse error: unexpected EOF"));
}

#[test]
fn test_parse_no_raise_reports_diagnostics() {
    let mut opts = options("");
    opts.no_raise = true;
    let output = cli::execute_parse(&opts).unwrap();
    assert!(output.failed);
    assert!(output.json.contains(r#""errno":24"#));
    assert!(output.json.contains(r#""state":"Error""#));
}

#[test]
fn test_parse_partial_reports_state() {
    let mut opts = options("key=");
    opts.partial = true;
    let output = cli::execute_parse(&opts).unwrap();
    assert!(!output.failed);
    assert!(output.json.contains(r#""state":"KeyValueOperator""#));
    assert!(output.json.contains(r#""key_value_operator":"=""#));
    assert!(!output.json.contains("message"));
}

// ============================================================================
// Check
// ============================================================================

#[test]
fn test_check_valid() {
    let result = cli::execute_check(&options("a=1 and (b=2 or c=3)")).unwrap();
    assert_eq!(result, CheckResult::SyntaxValid);
}

#[test]
fn test_check_invalid() {
    let err = cli::execute_check(&options("(a=1")).unwrap_err();
    assert_eq!(err.errno(), Some(errno::UNMATCHED_PAREN_EOF));
}

#[test]
fn test_check_ignores_no_raise() {
    let mut opts = options("a=1 and");
    opts.no_raise = true;
    let err = cli::execute_check(&opts).unwrap_err();
    assert_eq!(err.errno(), Some(errno::UNEXPECTED_EOF_AFTER_BOOL_OP));
}

// ============================================================================
// Tokens
// ============================================================================

#[test]
fn test_tokens() {
    let json = cli::execute_tokens(&options("a=1")).unwrap();
    assert_eq!(json, "[0,0,1,0,0,0,1,1,2,0,0,1,1,3,0]");
}

#[test]
fn test_tokens_on_failing_input() {
    let json = cli::execute_tokens(&options("a=")).unwrap();
    assert_eq!(json, "[0,0,1,0,0,0,1,1,2,0]");
}
