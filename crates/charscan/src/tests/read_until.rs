use crate::{
    CharStreamScanner, LatinDigit, Newline, ScanError, ScanSyntax,
};

use super::stream;

fn entity_syntax() -> ScanSyntax {
    ScanSyntax {
        escape: Some('\\'),
        quote_start: Some('"'),
        quote_end: Some('"'),
        quote_escape: Some('$'),
        alt_quote_start: Some('\''),
        alt_quote_end: Some('\''),
        alt_quote_escape: Some('\''),
        alt_quote_escape_lazy: true,
        entity_start: Some('&'),
        entity_end: Some(';'),
        entity_resolver: Some(Box::new(|name| match name {
            "lt" => Some("<".to_string()),
            "gt" => Some(">".to_string()),
            _ => None,
        })),
        ..Default::default()
    }
}

#[test]
fn plain_read_until_leaves_the_stop() {
    let mut s = CharStreamScanner::from_text("hello;world");
    assert_eq!(s.read_until(';', false).unwrap().as_deref(), Some("hello"));
    assert_eq!(s.next().unwrap(), Some(';'));
    // No stop before EOT: accept_eot decides.
    assert_eq!(s.read_until(';', false).unwrap(), None);
    let mut s = CharStreamScanner::from_text("rest");
    assert_eq!(s.read_until(';', true).unwrap().as_deref(), Some("rest"));
}

#[test]
fn empty_input_read_until() {
    let mut s = CharStreamScanner::from_text("");
    assert_eq!(s.read_until(';', true).unwrap().as_deref(), Some(""));
    let mut s = CharStreamScanner::from_text("");
    assert_eq!(s.read_until(';', false).unwrap(), None);
}

#[test]
fn escaped_read_until() {
    let mut s = CharStreamScanner::from_text("a\\;b;c");
    assert_eq!(
        s.read_until_escaped(';', false, '\\').unwrap().as_deref(),
        Some("a;b")
    );
    assert_eq!(s.next().unwrap(), Some(';'));
}

#[test]
fn escaped_read_until_with_stop_as_escape() {
    // ";;" is a literal ";"; a lone ";" before a non-stop terminates with
    // the lone occurrence consumed.
    let mut s = CharStreamScanner::from_text("a;;b;c");
    assert_eq!(
        s.read_until_escaped(';', false, ';').unwrap().as_deref(),
        Some("a;b")
    );
    assert_eq!(s.next().unwrap(), Some('c'));
}

#[test]
fn read_until_filter_leaves_the_match() {
    let mut s = CharStreamScanner::from_text("abc123");
    assert_eq!(
        s.read_until_filter(&LatinDigit, false).unwrap().as_deref(),
        Some("abc")
    );
    assert_eq!(s.next().unwrap(), Some('1'));
}

#[test]
fn comment_scanning_with_stop_string_and_trim() {
    let text = "/* comment */\n  /*\n   *   Line  1.    \n   * Line2  \n   */";
    let mut s = CharStreamScanner::from_text(text);
    let nl = Newline;

    assert!(s.expect_str("/*", false).unwrap());
    assert_eq!(
        s.read_until_stop_string(&nl, false, "*/", false, true)
            .unwrap()
            .as_deref(),
        Some("comment")
    );
    assert_eq!(s.skip_newline().unwrap(), 1);
    assert_eq!(s.skip_while(' ').unwrap(), 2);
    assert!(s.expect_str("/*", false).unwrap());
    // The comment body starts with an immediate newline.
    assert_eq!(
        s.read_until_stop_string(&nl, false, "*/", false, true)
            .unwrap()
            .as_deref(),
        Some("")
    );
    assert_eq!(s.skip_newline().unwrap(), 1);
    assert_eq!(s.skip_while(' ').unwrap(), 3);
    assert!(s.expect_one('*').unwrap());
    assert_eq!(
        s.read_until_stop_string(&nl, false, "*/", false, true)
            .unwrap()
            .as_deref(),
        Some("Line  1.")
    );
    assert_eq!(s.skip_newline().unwrap(), 1);
    assert_eq!(s.skip_while(' ').unwrap(), 3);
    assert!(s.expect_one('*').unwrap());
    assert_eq!(
        s.read_until_stop_string(&nl, false, "*/", false, true)
            .unwrap()
            .as_deref(),
        Some("Line2")
    );
    assert_eq!(s.skip_newline().unwrap(), 1);
    // The closing line holds only spaces before the stop string.
    assert_eq!(
        s.read_until_stop_string(&nl, false, "*/", false, true)
            .unwrap()
            .as_deref(),
        Some("")
    );
    assert!(s.is_eot().unwrap());

    // With trimming disabled the spaces survive.
    let mut tail = CharStreamScanner::from_text("   */");
    assert_eq!(
        tail.read_until_stop_string(&nl, true, "*/", false, false)
            .unwrap()
            .as_deref(),
        Some("   ")
    );
}

#[test]
fn stop_string_requires_content() {
    let mut s = CharStreamScanner::from_text("abc");
    assert!(matches!(
        s.read_until_stop_string(&Newline, true, "", false, false),
        Err(ScanError::InvalidArgument(_))
    ));
}

#[test]
fn full_syntax_scan() {
    let text = r#"Hi "$"quote$"", 'a''l\t' and \"esc\'&lt;&gt;&lt;x&gt;!"#;
    let mut s = CharStreamScanner::from_text(text);
    let result = s.read_until_with_syntax('!', false, &entity_syntax()).unwrap();
    assert_eq!(result.as_deref(), Some(r#"Hi "quote", a'l\t and "esc'<><x>"#));
    // The syntax-driven overload consumes the stop.
    assert!(s.is_eot().unwrap());
}

#[test]
fn full_syntax_scan_across_refills() {
    let text = r#"Hi "$"quote$"", 'a''l\t' and \"esc\'&lt;&gt;&lt;x&gt;!"#;
    for capacity in [1, 2, 3, 8] {
        let mut s = stream(text, capacity);
        let result = s
            .read_until_with_syntax('!', false, &entity_syntax())
            .unwrap();
        assert_eq!(
            result.as_deref(),
            Some(r#"Hi "quote", a'l\t and "esc'<><x>"#),
            "capacity {capacity}"
        );
    }
}

#[test]
fn lazy_quote_escape_keeps_a_literal_quote() {
    let syntax = ScanSyntax {
        quote_start: Some('\''),
        quote_end: Some('\''),
        quote_escape: Some('\''),
        quote_escape_lazy: true,
        ..Default::default()
    };
    let mut s = CharStreamScanner::from_text("can''t!");
    assert_eq!(
        s.read_until_with_syntax('!', false, &syntax)
            .unwrap()
            .as_deref(),
        Some("can't")
    );
}

#[test]
fn eager_quote_escape_collapses_to_empty_quotation() {
    let syntax = ScanSyntax {
        quote_start: Some('\''),
        quote_end: Some('\''),
        quote_escape: Some('\''),
        quote_escape_lazy: false,
        ..Default::default()
    };
    let mut s = CharStreamScanner::from_text("can''t!");
    assert_eq!(
        s.read_until_with_syntax('!', false, &syntax)
            .unwrap()
            .as_deref(),
        Some("cant")
    );
}

#[test]
fn quotation_content_is_unwrapped() {
    let syntax = ScanSyntax {
        quote_start: Some('\''),
        quote_end: Some('\''),
        quote_escape: Some('\''),
        quote_escape_lazy: true,
        ..Default::default()
    };
    // An escaped quote at the start of a quotation stays inside it.
    let mut s = CharStreamScanner::from_text("'''a'");
    assert_eq!(
        s.read_until_with_syntax('!', true, &syntax)
            .unwrap()
            .as_deref(),
        Some("'a")
    );
}

#[test]
fn unknown_entity_fails() {
    let mut s = CharStreamScanner::from_text("a&zz;b!");
    let err = s
        .read_until_with_syntax('!', false, &entity_syntax())
        .unwrap_err();
    match err {
        ScanError::UnknownEntity { name } => assert_eq!(name, "zz"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unterminated_entity_stays_verbatim() {
    let mut s = CharStreamScanner::from_text("a&lt");
    assert_eq!(
        s.read_until_with_syntax('!', true, &entity_syntax())
            .unwrap()
            .as_deref(),
        Some("a&lt")
    );
}

#[test]
fn filter_stop_with_syntax_consumes_the_match() {
    let syntax = ScanSyntax {
        quote_start: Some('"'),
        quote_end: Some('"'),
        ..Default::default()
    };
    let mut s = CharStreamScanner::from_text("ab\"1\"c5d");
    assert_eq!(
        s.read_until_filter_with_syntax(&LatinDigit, false, &syntax)
            .unwrap()
            .as_deref(),
        // The quoted digit is content, the bare digit is the stop.
        Some("ab1c")
    );
    assert_eq!(s.next().unwrap(), Some('d'));
}

#[test]
fn refill_boundary_equivalence_for_read_until() {
    let text = "a longer piece of text; with a stop in the middle";
    let mut reference = CharStreamScanner::from_text(text);
    let expected = reference.read_until(';', false).unwrap();
    for capacity in [1, 2, 3, 4, 16] {
        let mut s = stream(text, capacity);
        assert_eq!(s.read_until(';', false).unwrap(), expected);
        assert_eq!(s.next().unwrap(), Some(';'));
    }
}
