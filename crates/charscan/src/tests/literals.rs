use crate::{
    CharStreamScanner, CollectingMessageHandler, ScanError, Severity,
};

#[test]
fn string_literal_with_every_escape_kind() {
    let source = "\"Hi \\\"\\176\\477\\579\\u2022\\uuuuu2211\\\"\\n\"";
    let mut s = CharStreamScanner::from_text(source);
    let value = s.read_java_string_literal(Severity::Error).unwrap();
    assert_eq!(value, "Hi \"~'7/9\u{2022}\u{2211}\"\n");
    assert_eq!(s.position(), 39);
    assert!(s.is_eot().unwrap());
}

#[test]
fn string_literal_simple() {
    let mut s = CharStreamScanner::from_text("\"plain\" rest");
    assert_eq!(
        s.read_java_string_literal(Severity::Error).unwrap(),
        "plain"
    );
    assert_eq!(s.next().unwrap(), Some(' '));
}

#[test]
fn string_literal_octal_forms() {
    // \0 alone, \12 two digits, \377 the largest three-digit form.
    let mut s = CharStreamScanner::from_text("\"\\0\\12\\377\"");
    assert_eq!(
        s.read_java_string_literal(Severity::Error).unwrap(),
        "\0\n\u{FF}"
    );
}

#[test]
fn string_literal_three_digit_form_needs_a_low_first_digit() {
    // \477 is \47 then '7' because 4 > 3.
    let mut s = CharStreamScanner::from_text("\"\\477\"");
    assert_eq!(s.read_java_string_literal(Severity::Error).unwrap(), "'7");
}

#[test]
fn string_literal_must_start_with_a_quote() {
    let mut s = CharStreamScanner::from_text("plain");
    assert!(matches!(
        s.read_java_string_literal(Severity::Error),
        Err(ScanError::Expecting { .. })
    ));
}

#[test]
fn strict_string_literal_fails_on_bad_escape() {
    let mut s = CharStreamScanner::from_text("\"a\\q\"");
    let err = s.read_java_string_literal(Severity::Error).unwrap_err();
    match err {
        ScanError::Message { text, .. } => {
            assert_eq!(text, "illegal escape sequence \\q");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn tolerant_string_literal_substitutes_question_marks() {
    let mut s = CharStreamScanner::from_text("\"a\\qb\"");
    assert_eq!(
        s.read_java_string_literal(Severity::Warning).unwrap(),
        "a?b"
    );
}

#[test]
fn tolerant_unterminated_string_yields_the_prefix() {
    let mut s = CharStreamScanner::from_text("\"abc");
    assert_eq!(s.read_java_string_literal(Severity::Warning).unwrap(), "abc");
}

#[test]
fn strict_unterminated_string_fails() {
    let mut s = CharStreamScanner::from_text("\"abc");
    assert!(matches!(
        s.read_java_string_literal(Severity::Error),
        Err(ScanError::Message { .. })
    ));
}

#[test]
fn collected_messages_carry_positions() {
    let mut s = CharStreamScanner::from_text("\"a\\q\"")
        .with_message_handler(CollectingMessageHandler::default());
    // The collecting handler swallows even error-severity messages.
    assert_eq!(s.read_java_string_literal(Severity::Error).unwrap(), "a?");
}

#[test]
fn char_literal_plain_and_escaped() {
    let mut s = CharStreamScanner::from_text("'a''\\n''\\u0041''\\377'");
    assert_eq!(s.read_java_char_literal(Severity::Error).unwrap(), 'a');
    assert_eq!(s.read_java_char_literal(Severity::Error).unwrap(), '\n');
    assert_eq!(s.read_java_char_literal(Severity::Error).unwrap(), 'A');
    assert_eq!(s.read_java_char_literal(Severity::Error).unwrap(), '\u{FF}');
    assert!(s.is_eot().unwrap());
}

#[test]
fn char_literal_rejects_multiple_characters() {
    let mut s = CharStreamScanner::from_text("'ab'");
    assert!(matches!(
        s.read_java_char_literal(Severity::Error),
        Err(ScanError::Message { .. })
    ));

    let mut tolerant = CharStreamScanner::from_text("'ab'");
    assert_eq!(
        tolerant.read_java_char_literal(Severity::Warning).unwrap(),
        '?'
    );
}

#[test]
fn char_literal_rejects_empty() {
    let mut s = CharStreamScanner::from_text("''");
    assert!(matches!(
        s.read_java_char_literal(Severity::Error),
        Err(ScanError::Message { .. })
    ));
}

#[test]
fn char_literal_must_start_with_a_quote() {
    let mut s = CharStreamScanner::from_text("a");
    assert!(matches!(
        s.read_java_char_literal(Severity::Error),
        Err(ScanError::Expecting { .. })
    ));
}
