//! The number subsystem: the generic `read_number` driver, the parser
//! callback contract, and the typed readers built on top of it.
//!
//! The driver reads at most one number token at the cursor and delegates
//! every decision to a [`NumberParser`]: whether a sign is welcome, which
//! radix a `0x`/`0b`/leading-zero prefix maps to, whether a digit, dot or
//! exponent is still part of the token, and which "special" completions
//! (`NaN`, `Infinity`, `_`) are recognized.
//!
//! Digits are probed under `max(radix, 10)` (16 for hex) on purpose: for
//! input like `0b1012` the parser must see the trailing `2` so it can
//! raise a well-formed numeric error instead of silently stopping after
//! `101` and leaving the `2` behind.

mod typed;


pub use typed::{JavaNumber, TypedNumberParser};

use crate::{
    error::ScanResult,
    scanner::CharStreamScanner,
};

/// Which numeric prefixes a typed parser recognizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadixMode {
    /// `0x`, `0b` and leading-zero octal.
    #[default]
    All,
    /// Decimal only; every prefix is rejected.
    Only10,
    /// `0x` and `0b`, but a leading zero stays decimal (`010` is ten).
    NoOctal,
}

impl RadixMode {
    pub(crate) fn apply(self, probed: u32) -> u32 {
        match self {
            RadixMode::All => probed,
            RadixMode::Only10 => 0,
            RadixMode::NoOctal => {
                if probed == 8 {
                    0
                } else {
                    probed
                }
            }
        }
    }
}

/// Callback contract of [`read_number`](CharStreamScanner::read_number).
///
/// Every accessor is consulted before the corresponding characters are
/// consumed; returning a rejection leaves them in the stream.
pub trait NumberParser {
    /// A leading `+` or `-`. Rejecting aborts the read with nothing
    /// consumed.
    fn sign(&mut self, c: char) -> bool;

    /// A radix prefix probe: `probed` is 16 for `x`/`X`, 2 for `b`/`B` and
    /// 8 for a digit after a leading zero; `symbol` is the probed
    /// character. Returns the radix to apply, or 0 to reject the prefix.
    fn radix(&mut self, probed: u32, symbol: char) -> u32;

    /// A digit with its value under the probing radix. Rejecting ends the
    /// token before this digit.
    fn digit(&mut self, value: u32, c: char) -> bool;

    /// A decimal dot. Rejecting ends the token before the dot.
    fn dot(&mut self) -> bool;

    /// An exponent symbol (`e`/`E` at radix 10, `p`/`P` at radix 16) with
    /// the sign that follows it, if any. Accepting consumes both.
    fn exponent(&mut self, symbol: char, sign: Option<char>) -> bool;

    /// The completion expected at `c` for a special token (e.g. `"NaN"`,
    /// `"Infinity"`, `"_"`), or `None` when `c` starts nothing special.
    fn special_candidate(&mut self, c: char) -> Option<&'static str>;

    /// A special completion that matched in full.
    fn special(&mut self, text: &str);
}

fn is_exponent_symbol(c: char, radix: u32) -> bool {
    match radix {
        10 => c == 'e' || c == 'E',
        16 => c == 'p' || c == 'P',
        _ => false,
    }
}

impl CharStreamScanner {
    /// Reads at most one number token at the cursor, delegating every
    /// decision to `parser`. Stops at the first character that yields no
    /// action; a rejected leading sign aborts with nothing consumed.
    ///
    /// # Errors
    ///
    /// Fails when closed, when a refill fails, or when matching a special
    /// completion needs more lookahead than the capacity allows.
    pub fn read_number<P: NumberParser>(&mut self, parser: &mut P) -> ScanResult<()> {
        self.ensure_open()?;
        match self.peek()? {
            None => return Ok(()),
            Some(c @ ('+' | '-')) => {
                if !parser.sign(c) {
                    return Ok(());
                }
                self.advance_one()?;
            }
            Some(_) => {}
        }
        let mut radix = 10;
        if self.peek()? == Some('0') {
            if let Some(symbol) = self.lookahead_char(1)? {
                let probed = match symbol {
                    'x' | 'X' => 16,
                    'b' | 'B' => 2,
                    '0'..='9' => 8,
                    _ => 0,
                };
                if probed != 0 {
                    let applied = parser.radix(probed, symbol);
                    if applied != 0 {
                        radix = applied;
                        self.advance_one()?;
                        if probed != 8 {
                            // The octal "symbol" is a digit and stays in the
                            // stream; x/X/b/B are consumed with the prefix.
                            self.advance_one()?;
                        }
                    }
                }
            }
        }
        let digit_radix = radix.max(10);
        loop {
            let Some(c) = self.peek()? else {
                return Ok(());
            };
            if let Some(value) = c.to_digit(digit_radix) {
                if !parser.digit(value, c) {
                    return Ok(());
                }
                self.advance_one()?;
            } else if c == '.' {
                if !parser.dot() {
                    return Ok(());
                }
                self.advance_one()?;
            } else if is_exponent_symbol(c, radix) {
                let sign = match self.lookahead_char(1)? {
                    Some(s @ ('+' | '-')) => Some(s),
                    _ => None,
                };
                if !parser.exponent(c, sign) {
                    return Ok(());
                }
                self.advance_one()?;
                if sign.is_some() {
                    self.advance_one()?;
                }
            } else if let Some(expected) = parser.special_candidate(c) {
                if self.expect(expected, false, false, 0)? {
                    parser.special(expected);
                } else {
                    return Ok(());
                }
            } else {
                return Ok(());
            }
        }
    }

    /// Consumes one digit under `radix` and returns its value, `None` when
    /// the next character is no such digit.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn read_digit(&mut self, radix: u32) -> ScanResult<Option<u32>> {
        match self.peek()? {
            Some(c) => match c.to_digit(radix) {
                Some(value) => {
                    self.advance_one()?;
                    Ok(Some(value))
                }
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    /// Reads an `i32` with [`RadixMode::All`].
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed or out-of-range token.
    pub fn read_i32(&mut self) -> ScanResult<Option<i32>> {
        self.read_i32_with_radix_mode(RadixMode::All)
    }

    /// Reads an `i32` under the given radix mode; `None` when the cursor
    /// is not on a number.
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed or out-of-range token.
    pub fn read_i32_with_radix_mode(&mut self, mode: RadixMode) -> ScanResult<Option<i32>> {
        let start = self.position();
        let mut parser = TypedNumberParser::new_i32(mode);
        self.read_number(&mut parser)?;
        if self.position() == start {
            return Ok(None);
        }
        parser.into_i32().map(Some)
    }

    /// Reads an `i64` with [`RadixMode::All`].
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed or out-of-range token.
    pub fn read_i64(&mut self) -> ScanResult<Option<i64>> {
        self.read_i64_with_radix_mode(RadixMode::All)
    }

    /// Reads an `i64` under the given radix mode; `None` when the cursor
    /// is not on a number.
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed or out-of-range token.
    pub fn read_i64_with_radix_mode(&mut self, mode: RadixMode) -> ScanResult<Option<i64>> {
        let start = self.position();
        let mut parser = TypedNumberParser::new_i64(mode);
        self.read_number(&mut parser)?;
        if self.position() == start {
            return Ok(None);
        }
        parser.into_i64().map(Some)
    }

    /// Reads an `f64` with [`RadixMode::All`]. Accepts signed, dotted,
    /// exponent-bearing, radix-prefixed (hex floats with a `p` exponent) and
    /// special (`NaN`, `Infinity`) literals.
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed token.
    pub fn read_f64(&mut self) -> ScanResult<Option<f64>> {
        self.read_f64_with_radix_mode(RadixMode::All)
    }

    /// Reads an `f64` under the given radix mode; `None` when the cursor
    /// is not on a number.
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed token.
    pub fn read_f64_with_radix_mode(&mut self, mode: RadixMode) -> ScanResult<Option<f64>> {
        let start = self.position();
        let mut parser = TypedNumberParser::new_f64(mode);
        self.read_number(&mut parser)?;
        if self.position() == start {
            return Ok(None);
        }
        parser.into_f64().map(Some)
    }

    /// Reads an `f32` with [`RadixMode::All`].
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed token.
    pub fn read_f32(&mut self) -> ScanResult<Option<f32>> {
        self.read_f32_with_radix_mode(RadixMode::All)
    }

    /// Reads an `f32` under the given radix mode; `None` when the cursor
    /// is not on a number.
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed token.
    pub fn read_f32_with_radix_mode(&mut self, mode: RadixMode) -> ScanResult<Option<f32>> {
        let start = self.position();
        let mut parser = TypedNumberParser::new_f32(mode);
        self.read_number(&mut parser)?;
        if self.position() == start {
            return Ok(None);
        }
        parser.into_f32().map(Some)
    }

    /// Reads a full Java number literal: optional radix prefix, optional
    /// `_` separators between digits, optional type suffix (`l`/`L`,
    /// `f`/`F`, `d`/`D`). Without a suffix, a dot or exponent makes it a
    /// [`JavaNumber::Double`], otherwise a [`JavaNumber::Int`].
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`](crate::ScanError::NumberFormat) for a
    /// malformed token, including misplaced separators.
    pub fn read_java_number_literal(&mut self) -> ScanResult<Option<JavaNumber>> {
        let start = self.position();
        let mut parser = TypedNumberParser::java_literal();
        self.read_number(&mut parser)?;
        if self.position() == start {
            return Ok(None);
        }
        match self.peek()? {
            Some('l' | 'L') => {
                self.advance_one()?;
                parser.into_i64().map(|v| Some(JavaNumber::Long(v)))
            }
            Some('f' | 'F') => {
                self.advance_one()?;
                parser.into_f32().map(|v| Some(JavaNumber::Float(v)))
            }
            Some('d' | 'D') => {
                self.advance_one()?;
                parser.into_f64().map(|v| Some(JavaNumber::Double(v)))
            }
            _ => {
                if parser.is_floating() {
                    parser.into_f64().map(|v| Some(JavaNumber::Double(v)))
                } else {
                    parser.into_i32().map(|v| Some(JavaNumber::Int(v)))
                }
            }
        }
    }
}

/// A parser that accepts everything lexically plausible and yields the raw
/// token text, for callers that delegate to `str::parse`.
#[derive(Debug, Default)]
pub struct StringNumberParser {
    text: String,
    radix: u32,
    seen_dot: bool,
    seen_exponent: bool,
}

impl StringNumberParser {
    /// New empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::new(),
            radix: 10,
            seen_dot: false,
            seen_exponent: false,
        }
    }

    /// The accumulated token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the parser, returning the token text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// The radix the token was prefixed with (10 when unprefixed).
    #[must_use]
    pub fn radix(&self) -> u32 {
        self.radix
    }
}

impl NumberParser for StringNumberParser {
    fn sign(&mut self, c: char) -> bool {
        self.text.push(c);
        true
    }

    fn radix(&mut self, probed: u32, symbol: char) -> u32 {
        self.radix = probed;
        self.text.push('0');
        if probed != 8 {
            self.text.push(symbol);
        }
        probed
    }

    fn digit(&mut self, _value: u32, c: char) -> bool {
        self.text.push(c);
        true
    }

    fn dot(&mut self) -> bool {
        if self.seen_dot || self.seen_exponent {
            return false;
        }
        self.seen_dot = true;
        self.text.push('.');
        true
    }

    fn exponent(&mut self, symbol: char, sign: Option<char>) -> bool {
        if self.seen_exponent {
            return false;
        }
        self.seen_exponent = true;
        self.text.push(symbol);
        if let Some(s) = sign {
            self.text.push(s);
        }
        true
    }

    fn special_candidate(&mut self, c: char) -> Option<&'static str> {
        let at_start = self.text.is_empty()
            || (self.text.len() == 1 && (self.text.starts_with('+') || self.text.starts_with('-')));
        if !at_start {
            return None;
        }
        match c {
            'N' => Some("NaN"),
            'I' => Some("Infinity"),
            _ => None,
        }
    }

    fn special(&mut self, text: &str) {
        self.text.push_str(text);
    }
}
