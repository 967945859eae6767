//! The `read_until` family, including the syntax-driven scan.
//!
//! Stop-consumption policy: the character- and filter-based overloads leave
//! the stop in the stream so the caller can inspect it; the syntax-driven
//! overloads and the stop-string overload consume the stop they matched.
//!
//! The syntax-driven scan is an explicit finite state machine over the
//! configured escape, quote and entity characters. Surrounding quote
//! characters are removed from the output; the inner text is preserved
//! after escape processing, and entities are replaced by the resolver's
//! output verbatim.

use crate::{
    error::{ScanError, ScanResult},
    filter::CharFilter,
    syntax::ScanSyntax,
};

use super::{CharStreamScanner, eq_char};

/// States of the syntax-driven scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyntaxState {
    /// Accumulating normal text.
    Scan,
    /// The previous character was the escape; the current one is literal.
    Escape,
    /// Inside a quotation; the plain escape is disabled.
    Quote,
    /// After the quote-escape inside a quotation.
    QuoteEscape,
    /// Collecting an entity body.
    Entity,
}

/// Parameters of the quotation currently open.
#[derive(Debug, Clone, Copy)]
struct QuoteFrame {
    start: char,
    end: char,
    escape: Option<char>,
    lazy: bool,
    /// Output length when the quotation opened, for the empty-content rule.
    content_start: usize,
}

impl CharStreamScanner {
    /// Reads until `stop` is reached, leaving it unconsumed. At end of
    /// text, returns the accumulated text when `accept_eot` is `true` and
    /// `None` otherwise.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn read_until(&mut self, stop: char, accept_eot: bool) -> ScanResult<Option<String>> {
        self.ensure_open()?;
        self.scratch.clear();
        loop {
            match self.peek()? {
                None => return Ok(accept_eot.then(|| self.scratch.clone())),
                Some(c) if c == stop => return Ok(Some(self.scratch.clone())),
                Some(c) => {
                    self.advance_one()?;
                    self.scratch.push(c);
                }
            }
        }
    }

    /// Reads until `stop`, treating the character after `escape` as
    /// literal. When `escape == stop`, a doubled occurrence is a literal
    /// stop character and a lone occurrence terminates the scan with the
    /// lone character consumed.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn read_until_escaped(
        &mut self,
        stop: char,
        accept_eot: bool,
        escape: char,
    ) -> ScanResult<Option<String>> {
        self.ensure_open()?;
        self.scratch.clear();
        loop {
            match self.peek()? {
                None => return Ok(accept_eot.then(|| self.scratch.clone())),
                Some(c) if c == escape => {
                    self.advance_one()?;
                    match self.peek()? {
                        Some(n) if escape != stop || n == stop => {
                            self.advance_one()?;
                            self.scratch.push(n);
                        }
                        // A lone stop-valued escape terminates; a dangling
                        // escape at end of text is dropped.
                        _ if escape == stop => return Ok(Some(self.scratch.clone())),
                        _ => return Ok(accept_eot.then(|| self.scratch.clone())),
                    }
                }
                Some(c) if c == stop => return Ok(Some(self.scratch.clone())),
                Some(c) => {
                    self.advance_one()?;
                    self.scratch.push(c);
                }
            }
        }
    }

    /// Reads until `filter` accepts a character, leaving it unconsumed.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn read_until_filter<F: CharFilter>(
        &mut self,
        filter: &F,
        accept_eot: bool,
    ) -> ScanResult<Option<String>> {
        self.ensure_open()?;
        self.scratch.clear();
        loop {
            match self.peek()? {
                None => return Ok(accept_eot.then(|| self.scratch.clone())),
                Some(c) if filter.accept(c) => return Ok(Some(self.scratch.clone())),
                Some(c) => {
                    self.advance_one()?;
                    self.scratch.push(c);
                }
            }
        }
    }

    /// Reads until either `filter` accepts a character (left unconsumed)
    /// or `stop` matches in full (consumed). `trim` strips surrounding
    /// spaces from the result.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidArgument`] for an empty `stop`;
    /// [`ScanError::LookaheadExceedsCapacity`] when `stop` is longer than
    /// the capacity of a streaming scanner.
    pub fn read_until_stop_string<F: CharFilter>(
        &mut self,
        filter: &F,
        accept_eot: bool,
        stop: &str,
        ignore_case: bool,
        trim: bool,
    ) -> ScanResult<Option<String>> {
        self.ensure_open()?;
        let Some(first) = stop.chars().next() else {
            return Err(ScanError::InvalidArgument(
                "read_until_stop_string requires a non-empty stop",
            ));
        };
        self.scratch.clear();
        let finish = |scratch: &String| {
            if trim {
                scratch.trim_matches(' ').to_string()
            } else {
                scratch.clone()
            }
        };
        loop {
            match self.peek()? {
                None => return Ok(accept_eot.then(|| finish(&self.scratch))),
                Some(c) if filter.accept(c) => return Ok(Some(finish(&self.scratch))),
                Some(c) => {
                    if eq_char(c, first, ignore_case)
                        && self.expect(stop, ignore_case, false, 0)?
                    {
                        return Ok(Some(finish(&self.scratch)));
                    }
                    self.advance_one()?;
                    self.scratch.push(c);
                }
            }
        }
    }

    /// Syntax-driven scan terminated by `stop`, which is consumed.
    ///
    /// # Errors
    ///
    /// [`ScanError::UnknownEntity`] when the resolver rejects an entity,
    /// plus the usual refill failure modes.
    pub fn read_until_with_syntax(
        &mut self,
        stop: char,
        accept_eot: bool,
        syntax: &ScanSyntax,
    ) -> ScanResult<Option<String>> {
        self.scan_syntax(&|c| c == stop, accept_eot, syntax)
    }

    /// Syntax-driven scan terminated by `filter`, whose match is consumed.
    ///
    /// # Errors
    ///
    /// As [`read_until_with_syntax`](Self::read_until_with_syntax).
    pub fn read_until_filter_with_syntax<F: CharFilter>(
        &mut self,
        filter: &F,
        accept_eot: bool,
        syntax: &ScanSyntax,
    ) -> ScanResult<Option<String>> {
        self.scan_syntax(&|c| filter.accept(c), accept_eot, syntax)
    }

    fn scan_syntax(
        &mut self,
        is_stop: &dyn Fn(char) -> bool,
        accept_eot: bool,
        syntax: &ScanSyntax,
    ) -> ScanResult<Option<String>> {
        self.ensure_open()?;
        let mut out = String::new();
        let mut entity = String::new();
        let mut state = SyntaxState::Scan;
        let mut frame: Option<QuoteFrame> = None;
        // Set to the quote character when the last quotation closed through
        // the lazy-escape rule; the next occurrence of that character is a
        // literal quote instead of a new quotation.
        let mut lazy_close: Option<char> = None;
        loop {
            let Some(c) = self.peek()? else { break };
            match state {
                SyntaxState::Scan => {
                    if is_stop(c) {
                        self.advance_one()?;
                        return Ok(Some(out));
                    }
                    self.advance_one()?;
                    if syntax.escape == Some(c) {
                        state = SyntaxState::Escape;
                    } else if syntax.entity_active() && syntax.entity_start == Some(c) {
                        entity.clear();
                        state = SyntaxState::Entity;
                    } else if lazy_close == Some(c) {
                        out.push(c);
                        lazy_close = None;
                    } else if syntax.quote_active() && syntax.quote_start == Some(c) {
                        frame = Some(QuoteFrame {
                            start: c,
                            end: syntax.quote_end.unwrap_or(c),
                            escape: syntax.quote_escape,
                            lazy: syntax.quote_escape_lazy,
                            content_start: out.len(),
                        });
                        state = SyntaxState::Quote;
                        lazy_close = None;
                    } else if syntax.alt_quote_active() && syntax.alt_quote_start == Some(c) {
                        frame = Some(QuoteFrame {
                            start: c,
                            end: syntax.alt_quote_end.unwrap_or(c),
                            escape: syntax.alt_quote_escape,
                            lazy: syntax.alt_quote_escape_lazy,
                            content_start: out.len(),
                        });
                        state = SyntaxState::Quote;
                        lazy_close = None;
                    } else {
                        out.push(c);
                        lazy_close = None;
                    }
                }
                SyntaxState::Escape => {
                    self.advance_one()?;
                    out.push(c);
                    state = SyntaxState::Scan;
                }
                SyntaxState::Quote => {
                    let active = frame.expect("quote state without frame");
                    self.advance_one()?;
                    if active.escape == Some(c) {
                        state = SyntaxState::QuoteEscape;
                    } else if c == active.end {
                        frame = None;
                        state = SyntaxState::Scan;
                    } else {
                        out.push(c);
                    }
                }
                SyntaxState::QuoteEscape => {
                    let active = frame.expect("quote-escape state without frame");
                    if c == active.end {
                        // Escaped quote: literal end character, still quoted.
                        self.advance_one()?;
                        out.push(c);
                        state = SyntaxState::Quote;
                    } else if active.escape == Some(active.end) {
                        // The escape we saw was really the closing quote.
                        // Lazy rule: an empty quotation collapses to one
                        // literal quote character.
                        if active.lazy && out.len() == active.content_start {
                            out.push(active.start);
                            lazy_close = Some(active.start);
                        }
                        frame = None;
                        state = SyntaxState::Scan;
                        // Reprocess the current character in Scan.
                    } else {
                        // The escape did not escape anything; it was a
                        // regular character. Reprocess in Quote.
                        out.push(active.escape.unwrap_or(active.end));
                        state = SyntaxState::Quote;
                    }
                }
                SyntaxState::Entity => {
                    self.advance_one()?;
                    if syntax.entity_end == Some(c) {
                        match syntax.resolve_entity(&entity) {
                            Some(replacement) => out.push_str(&replacement),
                            None => {
                                return Err(ScanError::UnknownEntity {
                                    name: std::mem::take(&mut entity),
                                });
                            }
                        }
                        state = SyntaxState::Scan;
                    } else {
                        entity.push(c);
                    }
                }
            }
        }
        // End of text. Settle dangling states, then honor accept_eot.
        match state {
            SyntaxState::QuoteEscape => {
                let active = frame.expect("quote-escape state without frame");
                if active.escape == Some(active.end) {
                    if active.lazy && out.len() == active.content_start {
                        out.push(active.start);
                    }
                } else if let Some(escape) = active.escape {
                    out.push(escape);
                }
            }
            SyntaxState::Entity => {
                // Unterminated entity: keep the raw text.
                if let Some(start) = syntax.entity_start {
                    out.push(start);
                }
                out.push_str(&entity);
            }
            SyntaxState::Scan | SyntaxState::Escape | SyntaxState::Quote => {}
        }
        Ok(accept_eot.then_some(out))
    }
}
