use crate::{
    CharStreamScanner, FilterFn, LatinDigit, LatinLetter, ScanError, Whitespace,
};

use super::stream;

#[test]
fn word_scanning_sequence() {
    // "abc def  ghi": alternating read_while / skip_while with bounds.
    let mut s = CharStreamScanner::from_text("abc def  ghi");
    assert_eq!(s.read_while(&LatinLetter).unwrap(), "abc");
    assert_eq!(s.skip_while(' ').unwrap(), 1);
    assert_eq!(s.read_while(&LatinLetter).unwrap(), "def");
    assert_eq!(s.skip_while(' ').unwrap(), 2);
    assert_eq!(s.read_while_bounded(&LatinLetter, 0, 2).unwrap(), "gh");
    assert_eq!(s.read_while_bounded(&LatinLetter, 0, 2).unwrap(), "i");
    assert!(s.is_eot().unwrap());
}

#[test]
fn read_while_bounded_min_shortfall() {
    let mut s = CharStreamScanner::from_text("ab12");
    let err = s.read_while_bounded(&LatinDigit, 3, 5).unwrap_err();
    match err {
        ScanError::RequireMatch {
            min,
            max,
            description,
            found,
        } => {
            assert_eq!((min, max, found), (3, 5, 0));
            assert_eq!(description, "a Latin digit");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn read_while_bounded_invalid_range() {
    let mut s = CharStreamScanner::from_text("ab");
    assert!(matches!(
        s.read_while_bounded(&LatinLetter, 3, 2),
        Err(ScanError::InvalidRange { min: 3, max: 2 })
    ));
    // Raised before any state change.
    assert_eq!(s.position(), 0);
}

#[test]
fn expect_one_variants() {
    let mut s = CharStreamScanner::from_text("a1 b");
    assert!(s.expect_one('a').unwrap());
    assert!(!s.expect_one('x').unwrap());
    assert!(s.expect_one_matching(&LatinDigit).unwrap());
    assert!(s.expect_one_matching(&Whitespace).unwrap());
    assert!(!s.expect_one_matching(&LatinDigit).unwrap());
    assert_eq!(s.next().unwrap(), Some('b'));
}

#[test]
fn require_one_mismatch() {
    let mut s = CharStreamScanner::from_text("x");
    let err = s.require_one('y').unwrap_err();
    assert!(matches!(err, ScanError::Expecting { .. }));
    s.require_one('x').unwrap();
}

#[test]
fn skip_while_matching_is_bounded() {
    let mut s = CharStreamScanner::from_text("aaaaab");
    assert_eq!(s.skip_while_matching(&LatinLetter, 3).unwrap(), 3);
    assert_eq!(s.skip_while_matching(&LatinLetter, 10).unwrap(), 3);
    assert_eq!(s.skip_while_matching(&LatinLetter, 10).unwrap(), 0);
}

#[test]
fn skip_until_consumes_the_stop() {
    let mut s = CharStreamScanner::from_text("abc;def");
    assert!(s.skip_until(';').unwrap());
    assert_eq!(s.next().unwrap(), Some('d'));
    assert!(!s.skip_until(';').unwrap());
    assert!(s.is_eot().unwrap());
}

#[test]
fn skip_until_escaped_honors_the_escape() {
    let mut s = CharStreamScanner::from_text("a\\;b;c");
    assert!(s.skip_until_escaped(';', '\\').unwrap());
    assert_eq!(s.next().unwrap(), Some('c'));
}

#[test]
fn skip_until_escaped_doubled_stop() {
    // escape == stop: ";;" is a literal, a lone ";" terminates.
    let mut s = CharStreamScanner::from_text("a;;b;c");
    assert!(s.skip_until_escaped(';', ';').unwrap());
    assert_eq!(s.next().unwrap(), Some('c'));
}

#[test]
fn custom_filter_descriptions_flow_into_errors() {
    let hex = FilterFn::new(|c: char| c.is_ascii_hexdigit(), "a hex digit");
    let mut s = CharStreamScanner::from_text("xyz");
    let err = s.read_while_bounded(&hex, 1, 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Require at least 1 up to 2 character(s) matching a hex digit but found only 0"
    );
}

#[test]
fn streamed_word_scanning_matches_in_memory() {
    for capacity in [1, 2, 3, 5] {
        let mut s = stream("abc def  ghi", capacity);
        assert_eq!(s.read_while(&LatinLetter).unwrap(), "abc");
        assert_eq!(s.skip_while(' ').unwrap(), 1);
        assert_eq!(s.read_while(&LatinLetter).unwrap(), "def");
        assert_eq!(s.skip_while(' ').unwrap(), 2);
        assert_eq!(s.read_while(&LatinLetter).unwrap(), "ghi");
        assert!(s.is_eot().unwrap());
    }
}
