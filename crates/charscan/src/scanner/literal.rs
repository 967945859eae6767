//! Readers for Java-syntax string and character literals.
//!
//! Both readers report damage through the message handler with the severity
//! the caller chose: [`Severity::Error`] with the default handler makes any
//! problem fatal (strict mode), while [`Severity::Warning`] substitutes `?`
//! for the broken piece and keeps scanning (tolerant mode).

use crate::{
    error::ScanResult,
    message::Severity,
};

use super::CharStreamScanner;

impl CharStreamScanner {
    /// Reads a Java string literal at the cursor, returning its decoded
    /// value. The input must start with `"`.
    ///
    /// Supported escapes: `\t \n \r \b \f \\ \' \"`, octal `\N`..`\NNN`
    /// (three digits only when the first is `0`-`3`), and `\uXXXX` with any
    /// number of `u`s collapsed. Anything else is an illegal escape
    /// sequence.
    ///
    /// # Errors
    ///
    /// [`ScanError::Expecting`](crate::ScanError::Expecting) when the
    /// cursor is not on a `"`; in strict mode, whatever the message
    /// handler raises for damaged input. In tolerant mode an unterminated
    /// literal yields the text read so far.
    pub fn read_java_string_literal(&mut self, severity: Severity) -> ScanResult<String> {
        self.ensure_open()?;
        self.require_one('"')?;
        let mut out = String::new();
        loop {
            match self.next()? {
                None => {
                    self.raise(severity, "unterminated string literal".to_string())?;
                    return Ok(out);
                }
                Some('"') => return Ok(out),
                Some('\\') => {
                    if let Some(c) = self.read_java_escape(severity)? {
                        out.push(c);
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// Reads a Java character literal at the cursor. The input must start
    /// with `'`. Accepts one logical character (including the escapes of
    /// [`read_java_string_literal`](Self::read_java_string_literal))
    /// followed by `'`.
    ///
    /// # Errors
    ///
    /// [`ScanError::Expecting`](crate::ScanError::Expecting) when the
    /// cursor is not on a `'`; in strict mode, whatever the message
    /// handler raises. Tolerant mode yields `?` for damaged input.
    pub fn read_java_char_literal(&mut self, severity: Severity) -> ScanResult<char> {
        self.ensure_open()?;
        self.require_one('\'')?;
        let value = match self.next()? {
            None => {
                self.raise(severity, "unterminated char literal".to_string())?;
                return Ok('?');
            }
            Some('\'') => {
                self.raise(severity, "empty char literal".to_string())?;
                return Ok('?');
            }
            Some('\\') => self.read_java_escape(severity)?.unwrap_or('?'),
            Some(c) => c,
        };
        if self.expect_one('\'')? {
            Ok(value)
        } else {
            self.raise(
                severity,
                "char literal must contain exactly one character".to_string(),
            )?;
            Ok('?')
        }
    }

    /// Decodes one escape sequence; the leading backslash is already
    /// consumed. `None` means the text ended inside the escape.
    fn read_java_escape(&mut self, severity: Severity) -> ScanResult<Option<char>> {
        let Some(c) = self.next()? else {
            self.raise(severity, "unterminated escape sequence".to_string())?;
            return Ok(None);
        };
        match c {
            't' => Ok(Some('\t')),
            'n' => Ok(Some('\n')),
            'r' => Ok(Some('\r')),
            'b' => Ok(Some('\u{0008}')),
            'f' => Ok(Some('\u{000C}')),
            '\\' | '\'' | '"' => Ok(Some(c)),
            '0'..='7' => self.read_octal_escape(c),
            'u' => self.read_unicode_escape(severity),
            other => {
                self.raise(severity, format!("illegal escape sequence \\{other}"))?;
                Ok(Some('?'))
            }
        }
    }

    /// Octal escape: up to three digits, the three-digit form only when the
    /// first digit is 0-3 (so the value stays below 256).
    fn read_octal_escape(&mut self, first: char) -> ScanResult<Option<char>> {
        let mut value = first.to_digit(8).unwrap_or(0);
        let extra = if first <= '3' { 2 } else { 1 };
        for _ in 0..extra {
            match self.peek()? {
                Some(d @ '0'..='7') => {
                    self.advance_one()?;
                    value = value * 8 + d.to_digit(8).unwrap_or(0);
                }
                _ => break,
            }
        }
        // Values are at most 0o377 and therefore always scalar.
        Ok(char::from_u32(value))
    }

    /// Unicode escape: any number of `u`s collapse into one, then exactly
    /// four hex digits.
    fn read_unicode_escape(&mut self, severity: Severity) -> ScanResult<Option<char>> {
        while self.peek()? == Some('u') {
            self.advance_one()?;
        }
        let mut value: u32 = 0;
        for _ in 0..4 {
            match self.next()? {
                None => {
                    self.raise(severity, "unterminated escape sequence".to_string())?;
                    return Ok(None);
                }
                Some(h) if h.is_ascii_hexdigit() => {
                    value = value * 16 + h.to_digit(16).unwrap_or(0);
                }
                Some(other) => {
                    self.raise(
                        severity,
                        format!("illegal escape sequence \\u..{other}"),
                    )?;
                    return Ok(Some('?'));
                }
            }
        }
        match char::from_u32(value) {
            Some(decoded) => Ok(Some(decoded)),
            None => {
                self.raise(
                    severity,
                    format!("illegal escape sequence \\u{value:04X}"),
                )?;
                Ok(Some('?'))
            }
        }
    }
}
