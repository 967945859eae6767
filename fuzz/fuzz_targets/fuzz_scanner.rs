#![no_main]
//! Drives the scanner surface over arbitrary text twice, once in memory
//! and once through a streaming source with an arbitrary tiny capacity,
//! and asserts the two agree. Catches refill-boundary divergence and
//! panics in the operation vocabulary.

use arbitrary::Arbitrary;
use charscan::{CharStreamScanner, IterSource, LatinDigit, LatinLetter, Severity};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    Next,
    Peek,
    Skip(u8),
    SkipNewline,
    ReadLine { trim: bool },
    ReadUntilSemicolon { accept_eot: bool },
    ReadWhileLetters,
    SkipWhileSpaces,
    ReadI64,
    ReadF64,
    ReadJavaString,
    ExpectWord,
}

#[derive(Debug, Arbitrary)]
struct Plan {
    text: String,
    capacity: u8,
    ops: Vec<Op>,
}

fn stream(text: &str, capacity: usize) -> CharStreamScanner {
    let chars: Vec<char> = text.chars().collect();
    CharStreamScanner::from_reader(IterSource::new(chars.into_iter()), capacity)
}

fn apply(scanner: &mut CharStreamScanner, op: Op) -> String {
    match op {
        Op::Next => format!("{:?}", scanner.next()),
        Op::Peek => format!("{:?}", scanner.peek()),
        Op::Skip(n) => format!("{:?}", scanner.skip(usize::from(n) % 9)),
        Op::SkipNewline => format!("{:?}", scanner.skip_newline()),
        Op::ReadLine { trim } => format!("{:?}", scanner.read_line(trim)),
        Op::ReadUntilSemicolon { accept_eot } => {
            format!("{:?}", scanner.read_until(';', accept_eot))
        }
        Op::ReadWhileLetters => format!("{:?}", scanner.read_while(&LatinLetter)),
        Op::SkipWhileSpaces => format!("{:?}", scanner.skip_while(' ')),
        Op::ReadI64 => format!("{:?}", scanner.read_i64()),
        Op::ReadF64 => format!("{:?}", scanner.read_f64()),
        Op::ReadJavaString => format!("{:?}", scanner.read_java_string_literal(Severity::Warning)),
        Op::ExpectWord => format!("{:?}", scanner.expect_one_matching(&LatinDigit)),
    }
}

fuzz_target!(|plan: Plan| {
    // Capacity at least 8 so the longest fixed lookahead ("Infinity")
    // never turns into a configuration error on the streamed side only.
    let capacity = usize::from(plan.capacity) % 9 + 8;
    let mut in_memory = CharStreamScanner::from_text(&plan.text);
    let mut streamed = stream(&plan.text, capacity);
    for op in &plan.ops {
        let a = apply(&mut in_memory, *op);
        let b = apply(&mut streamed, *op);
        assert_eq!(a, b, "op {op:?} diverged at capacity {capacity}");
        in_memory.assert_window_invariants();
        streamed.assert_window_invariants();
    }
});
