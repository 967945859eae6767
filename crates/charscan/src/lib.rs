//! A cursor-based character-stream scanner for handwritten
//! recursive-descent parsers.
//!
//! [`CharStreamScanner`] consumes either a fully materialized text or a
//! streaming character source with a bounded lookahead buffer, and exposes
//! a rich operation vocabulary: peek, advance, expect, match-while,
//! read-until, skip-over, plus specialized readers for line-oriented text,
//! quoted/escaped segments ([`ScanSyntax`]) and numeric literals (the
//! [`NumberParser`] driver with typed parsers).
//!
//! ```rust
//! use charscan::{CharStreamScanner, LatinLetter};
//!
//! let mut scanner = CharStreamScanner::from_text("abc 42");
//! assert_eq!(scanner.read_while(&LatinLetter).unwrap(), "abc");
//! assert_eq!(scanner.skip_while(' ').unwrap(), 1);
//! assert_eq!(scanner.read_i32().unwrap(), Some(42));
//! assert!(scanner.is_eot().unwrap());
//! ```

#![allow(missing_docs)]

mod error;
mod filter;
mod message;
mod number;
mod scanner;
mod source;
mod syntax;

#[cfg(test)]
mod tests;

pub use error::{ScanError, ScanResult};
pub use filter::{
    AnyChar, CharFilter, CharIs, FilterFn, LatinDigit, LatinLetter, Newline, OctalDigit,
    SingleQuote, Whitespace,
};
pub use message::{
    CollectingMessageHandler, DefaultMessageHandler, MessageHandler, ScanMessage, Severity,
};
pub use number::{JavaNumber, NumberParser, RadixMode, StringNumberParser, TypedNumberParser};
pub use scanner::{CharStreamScanner, DEFAULT_CAPACITY};
pub use source::{CharRead, IterSource, Utf8Reader};
pub use syntax::{EntityResolver, ScanSyntax};
