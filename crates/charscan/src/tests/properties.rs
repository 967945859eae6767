use quickcheck_macros::quickcheck;

use crate::{CharStreamScanner, LatinLetter};

use super::stream;

/// Draining a streaming scanner char by char matches the in-memory
/// scanner, including position/line/column, for any capacity.
#[quickcheck]
fn stream_matches_in_memory(text: String, capacity: usize) -> bool {
    let capacity = capacity % 7 + 1;
    let mut in_memory = CharStreamScanner::from_text(&text);
    let mut streamed = stream(&text, capacity);
    loop {
        let a = in_memory.next().unwrap();
        let b = streamed.next().unwrap();
        if a != b {
            return false;
        }
        if a.is_none() {
            break;
        }
    }
    in_memory.position() == streamed.position()
        && in_memory.line() == streamed.line()
        && in_memory.column() == streamed.column()
}

/// Alternating read_while / read_until_filter partitions the input
/// losslessly.
#[quickcheck]
fn read_while_and_read_until_partition(text: String) -> bool {
    let mut s = CharStreamScanner::from_text(&text);
    let mut rebuilt = String::new();
    while !s.is_eot().unwrap() {
        rebuilt.push_str(&s.read_while(&LatinLetter).unwrap());
        if let Some(chunk) = s.read_until_filter(&LatinLetter, true).unwrap() {
            rebuilt.push_str(&chunk);
        }
    }
    rebuilt == text
}

/// Position always equals the number of consumed characters.
#[quickcheck]
fn position_counts_consumed_chars(text: String, steps: Vec<u8>) -> bool {
    let mut s = CharStreamScanner::from_text(&text);
    let mut consumed = 0;
    for step in steps {
        consumed += s.skip(usize::from(step) % 5).unwrap();
        if s.position() != consumed {
            return false;
        }
    }
    true
}

/// Any formatted i64 parses back to itself.
#[quickcheck]
fn i64_roundtrip(value: i64) -> bool {
    let mut s = CharStreamScanner::from_text(value.to_string());
    s.read_i64().unwrap() == Some(value) && s.is_eot().unwrap()
}

/// Composed doubles match the standard parser for exactly representable
/// mantissa/exponent combinations (mantissa below 2^53, |exponent| within
/// the exact region of the power table).
#[quickcheck]
fn f64_matches_std_in_the_exact_domain(mantissa: i32, exponent: i8) -> bool {
    let exponent = i32::from(exponent) % 21;
    let literal = format!("{mantissa}e{exponent}");
    let expected: f64 = literal.parse().unwrap();
    let mut s = CharStreamScanner::from_text(&literal);
    let parsed = s.read_f64().unwrap();
    parsed.map(f64::to_bits) == Some(expected.to_bits())
}

/// Joining read_line results with '\n' reproduces the input with all
/// terminator variants normalized.
#[quickcheck]
fn line_join_roundtrip(text: String) -> bool {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut s = CharStreamScanner::from_text(&text);
    let mut lines = Vec::new();
    while let Some(line) = s.read_line(false).unwrap() {
        lines.push(line);
    }
    let mut joined = lines.join("\n");
    if normalized.ends_with('\n') {
        joined.push('\n');
    }
    joined == normalized
}

/// read_until with accept_eot reconstructs the scanned prefix.
#[quickcheck]
fn read_until_reconstructs_the_prefix(text: String) -> bool {
    let mut s = CharStreamScanner::from_text(&text);
    let prefix = s.read_until(';', true).unwrap().unwrap_or_default();
    let consumed_stop = s.next().unwrap().map(String::from).unwrap_or_default();
    let rest: String = std::iter::from_fn(|| s.next().unwrap()).collect();
    format!("{prefix}{consumed_stop}{rest}") == text
}
