mod common;

use common::*;
use sqlnode_core::SqlError;

fn syntax_offset(sql: &str) -> usize {
    match parse_err(sql) {
        SqlError::Syntax { offset, .. } => offset,
        other => panic!("Expected syntax error for {sql}, got {other:?}"),
    }
}

fn lexical_offset(sql: &str) -> usize {
    match parse_err(sql) {
        SqlError::Lexical { offset, .. } => offset,
        other => panic!("Expected lexical error for {sql}, got {other:?}"),
    }
}

#[test]
fn error_empty_input() {
    let err = parse_err("");
    assert!(matches!(err, SqlError::Syntax { offset: 0, .. }));
    assert!(err.to_string().contains("end of input"), "{err}");
}

#[test]
fn error_missing_select_list() {
    assert_eq!(syntax_offset("SELECT FROM t"), 7);
}

#[test]
fn error_missing_table_name() {
    assert_eq!(syntax_offset("SELECT a FROM WHERE"), 14);
}

#[test]
fn error_trailing_tokens() {
    assert_eq!(syntax_offset("SELECT a FROM t t2 t3"), 19);
}

#[test]
fn error_unclosed_paren() {
    let sql = "SELECT (a + b FROM t";
    assert_eq!(syntax_offset(sql), 14);
}

#[test]
fn error_incomplete_expression() {
    assert_eq!(syntax_offset("SELECT a FROM t WHERE a ="), 25);
}

#[test]
fn error_join_without_condition() {
    let err = parse_err("SELECT a FROM t JOIN u WHERE a = 1");
    assert!(matches!(err, SqlError::Syntax { offset: 23, .. }), "{err:?}");
}

#[test]
fn error_derived_table_needs_alias() {
    let err = parse_err("SELECT a FROM (SELECT a FROM t)");
    assert!(matches!(err, SqlError::Syntax { .. }), "{err:?}");
}

#[test]
fn error_insert_without_source() {
    let err = parse_err("INSERT INTO t (a, b)");
    assert!(matches!(err, SqlError::Syntax { offset: 20, .. }), "{err:?}");
}

#[test]
fn error_update_without_set() {
    assert_eq!(syntax_offset("UPDATE t a = 1"), 11);
}

#[test]
fn error_case_without_when() {
    assert_eq!(syntax_offset("SELECT CASE END FROM t"), 12);
}

#[test]
fn error_message_names_the_token() {
    let err = parse_err("SELECT a FROM t ORDER a");
    let message = err.to_string();
    assert!(message.contains("expected"), "{message}");
    assert_eq!(err.offset(), 22);
}

#[test]
fn error_unterminated_string() {
    assert_eq!(lexical_offset("SELECT 'open"), 7);
}

#[test]
fn error_unterminated_quoted_identifier() {
    assert_eq!(lexical_offset("SELECT \"open FROM t"), 7);
}

#[test]
fn error_unexpected_character() {
    assert_eq!(lexical_offset("SELECT a FROM t WHERE a = #"), 26);
}

#[test]
fn error_malformed_number() {
    assert_eq!(lexical_offset("SELECT 12abc"), 7);
}

#[test]
fn error_double_literal_out_of_range() {
    assert_eq!(lexical_offset("SELECT 1e999"), 7);
    assert_eq!(lexical_offset("SELECT a FROM t WHERE a < -1.5E+400"), 27);
    let err = parse_err("SELECT 1e999");
    assert!(err.to_string().contains("outside the range of DOUBLE"), "{err}");
    parse("SELECT 1.5e308");
}

#[test]
fn error_unterminated_block_comment() {
    let err = parse_err("SELECT 1 /* never closed");
    assert!(matches!(err, SqlError::Lexical { .. }), "{err:?}");
}

#[test]
fn error_positions_are_not_contract_violations() {
    assert!(!parse_err("SELECT").is_contract_violation());
    assert!(!parse_err("SELECT 'x").is_contract_violation());
}

#[test]
fn error_second_statement_fails_whole_batch() {
    let mut parser = sqlnode_core::SqlParser::default();
    let err = parser
        .parse_statements("SELECT 1; SELECT FROM")
        .unwrap_err();
    assert_eq!(err.offset(), 17);
}
