//! The scanner: cursor state, refill discipline and the core operation
//! vocabulary.
//!
//! Overview
//! - [`CharStreamScanner`] owns a primary character window (`buffer`,
//!   `offset`, `limit`) and, for streaming sources, a secondary lookahead
//!   window of the same capacity. In-memory scanners hold the whole text as
//!   their buffer and never refill.
//! - `position` counts the characters consumed before the current window;
//!   the absolute position is `position + offset`. `line`/`column` advance
//!   exactly once per consumed character: `\n` bumps the line and resets the
//!   column, every other character (including `\r`) bumps the column.
//! - Reads that may cross a refill accumulate into a single reusable
//!   `scratch` buffer that is reset, not reallocated, at the start of each
//!   such read.
//!
//! Lookahead
//! - Operations that must inspect `L` characters beyond the cursor validate
//!   `L <= capacity` *before* touching any state and fail with a
//!   configuration error otherwise. Filling the lookahead window never
//!   consumes; consuming through it happens naturally when a refill swaps
//!   the windows.
//!
//! Invariants
//! - `0 <= offset <= limit` after every public operation.
//! - An atomic [`expect`](CharStreamScanner::expect) either consumes the
//!   whole expectation or leaves the scanner untouched.
//! - The backing source is released exactly once, either when it reports
//!   end-of-stream or on [`close`](CharStreamScanner::close); afterwards all
//!   operations fail with [`ScanError::Closed`] (post-close) or behave as
//!   end-of-text (post-EOS).

mod literal;
mod until;


use std::io::Read;

use crate::{
    error::{ScanError, ScanResult},
    filter::CharFilter,
    message::{DefaultMessageHandler, MessageHandler, ScanMessage, Severity},
    source::{CharRead, Utf8Reader},
};

/// Default buffer capacity for reader-backed scanners.
pub const DEFAULT_CAPACITY: usize = 4096;

/// A cursor over a character stream with bounded lookahead.
///
/// Construct with [`from_text`](Self::from_text) for in-memory input or
/// [`from_reader`](Self::from_reader) for streaming input. Instances are
/// single-threaded by design and must not be shared.
pub struct CharStreamScanner {
    buffer: Box<[char]>,
    offset: usize,
    limit: usize,
    lookahead: Box<[char]>,
    lookahead_limit: usize,
    position: usize,
    line: usize,
    column: usize,
    scratch: String,
    reader: Option<Box<dyn CharRead>>,
    streaming: bool,
    capacity: usize,
    eos: bool,
    closed: bool,
    handler: Box<dyn MessageHandler>,
}

impl core::fmt::Debug for CharStreamScanner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CharStreamScanner")
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .field("lookahead_limit", &self.lookahead_limit)
            .field("position", &self.position)
            .field("line", &self.line)
            .field("column", &self.column)
            .field("streaming", &self.streaming)
            .field("eos", &self.eos)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl CharStreamScanner {
    /// Scanner over an in-memory text. The whole text is the buffer; there
    /// is no refill and lookahead is unbounded within the text.
    #[must_use]
    pub fn from_text(text: impl AsRef<str>) -> Self {
        let buffer: Box<[char]> = text.as_ref().chars().collect();
        let limit = buffer.len();
        Self {
            buffer,
            offset: 0,
            limit,
            lookahead: Box::default(),
            lookahead_limit: 0,
            position: 0,
            line: 1,
            column: 1,
            scratch: String::new(),
            reader: None,
            streaming: false,
            capacity: usize::MAX,
            eos: true,
            closed: false,
            handler: Box::new(DefaultMessageHandler),
        }
    }

    /// Scanner over a streaming source with the given buffer capacity.
    ///
    /// The capacity also bounds lookahead; it is clamped to at least 1.
    pub fn from_reader(source: impl CharRead + 'static, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: vec!['\0'; capacity].into_boxed_slice(),
            offset: 0,
            limit: 0,
            lookahead: vec!['\0'; capacity].into_boxed_slice(),
            lookahead_limit: 0,
            position: 0,
            line: 1,
            column: 1,
            scratch: String::new(),
            reader: Some(Box::new(source)),
            streaming: true,
            capacity,
            eos: false,
            closed: false,
            handler: Box::new(DefaultMessageHandler),
        }
    }

    /// Scanner over a streaming source with [`DEFAULT_CAPACITY`].
    pub fn from_reader_default(source: impl CharRead + 'static) -> Self {
        Self::from_reader(source, DEFAULT_CAPACITY)
    }

    /// Scanner over a byte reader, decoding UTF-8 incrementally.
    pub fn from_utf8_reader(reader: impl Read + 'static, capacity: usize) -> Self {
        Self::from_reader(Utf8Reader::new(reader), capacity)
    }

    /// Replaces the message handler (the default fails on error-severity
    /// messages).
    #[must_use]
    pub fn with_message_handler(mut self, handler: impl MessageHandler + 'static) -> Self {
        self.handler = Box::new(handler);
        self
    }

    // ------------------------------------------------------------------
    // State accessors

    /// Characters consumed since construction.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position + self.offset
    }

    /// 1-based line of the character at the cursor.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the character at the cursor.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Lookahead capacity; `None` for in-memory scanners (bounded only by
    /// the text itself).
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.streaming.then_some(self.capacity)
    }

    /// Whether the backing source has been exhausted (always true for
    /// in-memory scanners). Buffered characters may still be readable.
    #[must_use]
    pub fn is_eos(&self) -> bool {
        self.eos
    }

    /// Whether no further character can be delivered, refilling if needed.
    ///
    /// # Errors
    ///
    /// Fails when closed or when the refill fails.
    pub fn is_eot(&mut self) -> ScanResult<bool> {
        Ok(!self.has_next()?)
    }

    /// Closes the scanner and releases the backing source. Idempotent.
    pub fn close(&mut self) {
        self.closed = true;
        self.reader = None;
        self.eos = true;
    }

    // ------------------------------------------------------------------
    // Basic cursor

    /// Whether at least one character is reachable, refilling if needed.
    ///
    /// # Errors
    ///
    /// Fails when closed or when the refill fails.
    pub fn has_next(&mut self) -> ScanResult<bool> {
        self.ensure_open()?;
        self.has_more()
    }

    /// Consumes and returns the next character, `None` at end of text.
    ///
    /// # Errors
    ///
    /// Fails when closed or when the refill fails.
    pub fn next(&mut self) -> ScanResult<Option<char>> {
        self.ensure_open()?;
        if !self.has_more()? {
            return Ok(None);
        }
        let c = self.buffer[self.offset];
        self.offset += 1;
        self.bump(c);
        Ok(Some(c))
    }

    /// Returns the next character without consuming it.
    ///
    /// # Errors
    ///
    /// Fails when closed or when the refill fails.
    pub fn peek(&mut self) -> ScanResult<Option<char>> {
        self.ensure_open()?;
        if !self.has_more()? {
            return Ok(None);
        }
        Ok(Some(self.buffer[self.offset]))
    }

    /// Returns the character `k` positions past the cursor without
    /// consuming, `None` when the text ends first.
    ///
    /// # Errors
    ///
    /// [`ScanError::LookaheadExceedsCapacity`] when `k + 1` exceeds the
    /// capacity of a streaming scanner; raised before any state change.
    pub fn peek_at(&mut self, k: usize) -> ScanResult<Option<char>> {
        self.ensure_open()?;
        self.ensure_lookahead(k + 1)?;
        Ok(self.char_at(k))
    }

    /// Returns up to `count` upcoming characters without consuming.
    ///
    /// # Errors
    ///
    /// [`ScanError::LookaheadExceedsCapacity`] when `count` exceeds the
    /// capacity of a streaming scanner.
    pub fn peek_string(&mut self, count: usize) -> ScanResult<String> {
        self.ensure_open()?;
        self.ensure_lookahead(count)?;
        let mut out = String::new();
        for k in 0..count {
            match self.char_at(k) {
                Some(c) => out.push(c),
                None => break,
            }
        }
        Ok(out)
    }

    /// Returns the upcoming run of characters matching `filter`, up to
    /// `max`, without consuming.
    ///
    /// # Errors
    ///
    /// [`ScanError::LookaheadExceedsCapacity`] when `max` exceeds the
    /// capacity of a streaming scanner.
    pub fn peek_while<F: CharFilter>(&mut self, filter: &F, max: usize) -> ScanResult<String> {
        self.ensure_open()?;
        self.ensure_lookahead(max)?;
        let mut out = String::new();
        for k in 0..max {
            match self.char_at(k) {
                Some(c) if filter.accept(c) => out.push(c),
                _ => break,
            }
        }
        Ok(out)
    }

    /// Consumes up to `count` characters and returns them.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn read(&mut self, count: usize) -> ScanResult<String> {
        self.ensure_open()?;
        self.scratch.clear();
        let mut taken = 0;
        while taken < count && self.has_more()? {
            let c = self.buffer[self.offset];
            self.offset += 1;
            self.bump(c);
            self.scratch.push(c);
            taken += 1;
        }
        Ok(self.scratch.clone())
    }

    /// Consumes up to `count` characters, returning how many were skipped.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn skip(&mut self, count: usize) -> ScanResult<usize> {
        self.ensure_open()?;
        let mut skipped = 0;
        while skipped < count && self.has_more()? {
            let c = self.buffer[self.offset];
            self.offset += 1;
            self.bump(c);
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Consumes one logical newline: `\n` (returns 1) or `\r\n` (returns 2,
    /// also when the `\n` only arrives after a refill). Returns 0 and
    /// consumes nothing otherwise; a lone `\r` is left in place.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn skip_newline(&mut self) -> ScanResult<usize> {
        self.ensure_open()?;
        match self.peek()? {
            Some('\n') => {
                self.advance_one()?;
                Ok(1)
            }
            Some('\r') => {
                if self.lookahead_char(1)? == Some('\n') {
                    self.advance_one()?;
                    self.advance_one()?;
                    Ok(2)
                } else {
                    Ok(0)
                }
            }
            _ => Ok(0),
        }
    }

    // ------------------------------------------------------------------
    // Match / expect

    /// Atomic expectation: when the stream continues with `expected`
    /// starting `offset` characters past the cursor, consumes through the
    /// end of the match and returns `true`. Otherwise, or when
    /// `lookahead` is `true`, the scanner state is left untouched.
    ///
    /// # Errors
    ///
    /// [`ScanError::LookaheadExceedsCapacity`] when `offset` plus the
    /// length of `expected` exceeds the capacity of a streaming scanner.
    pub fn expect(
        &mut self,
        expected: &str,
        ignore_case: bool,
        lookahead: bool,
        offset: usize,
    ) -> ScanResult<bool> {
        self.ensure_open()?;
        let len = expected.chars().count();
        self.ensure_lookahead(offset + len)?;
        let mut k = offset;
        for ec in expected.chars() {
            let Some(c) = self.char_at(k) else {
                return Ok(false);
            };
            if !eq_char(c, ec, ignore_case) {
                return Ok(false);
            }
            k += 1;
        }
        if !lookahead {
            for _ in 0..(offset + len) {
                self.advance_one()?;
            }
        }
        Ok(true)
    }

    /// Shorthand for [`expect`](Self::expect) at the cursor, consuming.
    ///
    /// # Errors
    ///
    /// As [`expect`](Self::expect).
    pub fn expect_str(&mut self, expected: &str, ignore_case: bool) -> ScanResult<bool> {
        self.expect(expected, ignore_case, false, 0)
    }

    /// Non-atomic expectation: consumes the longest common prefix of the
    /// stream and `expected`, returning `false` on the first mismatch.
    /// Only for callers that accept partial consumption.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn expect_unsafe(&mut self, expected: &str, ignore_case: bool) -> ScanResult<bool> {
        self.ensure_open()?;
        for ec in expected.chars() {
            match self.peek()? {
                Some(c) if eq_char(c, ec, ignore_case) => self.advance_one()?,
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Consumes one character when it equals `expected`.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn expect_one(&mut self, expected: char) -> ScanResult<bool> {
        match self.peek()? {
            Some(c) if c == expected => {
                self.advance_one()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Consumes one character when `filter` accepts it.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn expect_one_matching<F: CharFilter>(&mut self, filter: &F) -> ScanResult<bool> {
        match self.peek()? {
            Some(c) if filter.accept(c) => {
                self.advance_one()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Like [`expect_str`](Self::expect_str) but fails with
    /// [`ScanError::Expecting`] when the stream differs.
    ///
    /// # Errors
    ///
    /// [`ScanError::Expecting`] on mismatch, plus the failure modes of
    /// [`expect`](Self::expect).
    pub fn require(&mut self, expected: &str, ignore_case: bool) -> ScanResult<()> {
        if self.expect(expected, ignore_case, false, 0)? {
            return Ok(());
        }
        let found = self.peek_string(expected.chars().count())?;
        Err(ScanError::Expecting {
            expected: expected.to_string(),
            found,
        })
    }

    /// Like [`expect_one`](Self::expect_one) but fails with
    /// [`ScanError::Expecting`] when the next character differs.
    ///
    /// # Errors
    ///
    /// [`ScanError::Expecting`] on mismatch.
    pub fn require_one(&mut self, expected: char) -> ScanResult<()> {
        if self.expect_one(expected)? {
            return Ok(());
        }
        let found = self.peek()?.map(String::from).unwrap_or_default();
        Err(ScanError::Expecting {
            expected: expected.to_string(),
            found,
        })
    }

    // ------------------------------------------------------------------
    // Skip / read while

    /// Consumes characters equal to `c`, returning the count.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn skip_while(&mut self, c: char) -> ScanResult<usize> {
        self.ensure_open()?;
        let mut count = 0;
        while self.peek()? == Some(c) {
            self.advance_one()?;
            count += 1;
        }
        Ok(count)
    }

    /// Consumes characters matching `filter`, up to `max`, returning the
    /// count.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn skip_while_matching<F: CharFilter>(
        &mut self,
        filter: &F,
        max: usize,
    ) -> ScanResult<usize> {
        self.ensure_open()?;
        let mut count = 0;
        while count < max {
            match self.peek()? {
                Some(c) if filter.accept(c) => {
                    self.advance_one()?;
                    count += 1;
                }
                _ => break,
            }
        }
        Ok(count)
    }

    /// Reads characters matching `filter` until the first mismatch or end
    /// of text.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn read_while<F: CharFilter>(&mut self, filter: &F) -> ScanResult<String> {
        self.read_while_bounded(filter, 0, usize::MAX)
    }

    /// Reads between `min` and `max` characters matching `filter`.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidRange`] when `min > max` (before any state
    /// change); [`ScanError::RequireMatch`] when fewer than `min`
    /// characters matched (the matched characters stay consumed).
    pub fn read_while_bounded<F: CharFilter>(
        &mut self,
        filter: &F,
        min: usize,
        max: usize,
    ) -> ScanResult<String> {
        self.ensure_open()?;
        if min > max {
            return Err(ScanError::InvalidRange { min, max });
        }
        self.scratch.clear();
        let mut count = 0;
        while count < max {
            match self.peek()? {
                Some(c) if filter.accept(c) => {
                    self.advance_one()?;
                    self.scratch.push(c);
                    count += 1;
                }
                _ => break,
            }
        }
        if count < min {
            return Err(ScanError::RequireMatch {
                min,
                max,
                description: filter.description().to_string(),
                found: count,
            });
        }
        Ok(self.scratch.clone())
    }

    /// Consumes characters until `stop` has been consumed, returning
    /// whether it was found before end of text.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn skip_until(&mut self, stop: char) -> ScanResult<bool> {
        self.ensure_open()?;
        while let Some(c) = self.next()? {
            if c == stop {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Like [`skip_until`](Self::skip_until), but `escape` makes the
    /// following character literal. When `escape == stop`, a doubled
    /// occurrence is a literal stop and a lone occurrence terminates.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn skip_until_escaped(&mut self, stop: char, escape: char) -> ScanResult<bool> {
        self.ensure_open()?;
        while let Some(c) = self.next()? {
            if c == escape {
                if escape == stop {
                    // Doubled occurrence is a literal stop; a lone one
                    // terminates the scan.
                    match self.peek()? {
                        Some(n) if n == stop => self.advance_one()?,
                        _ => return Ok(true),
                    }
                } else if self.peek()?.is_some() {
                    self.advance_one()?;
                }
            } else if c == stop {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Scans forward until `substring` appears (consuming it, returns
    /// `true`), `stop_filter` accepts a character (not consumed, returns
    /// `false`), or end of text (returns `false`). Candidate positions are
    /// found by matching the first character, then confirmed atomically
    /// with lookahead.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidArgument`] for an empty `substring`;
    /// [`ScanError::LookaheadExceedsCapacity`] when `substring` is longer
    /// than the capacity of a streaming scanner.
    pub fn skip_over<F: CharFilter>(
        &mut self,
        substring: &str,
        ignore_case: bool,
        stop_filter: Option<&F>,
    ) -> ScanResult<bool> {
        self.ensure_open()?;
        let Some(first) = substring.chars().next() else {
            return Err(ScanError::InvalidArgument("skip_over requires a non-empty substring"));
        };
        loop {
            let Some(c) = self.peek()? else {
                return Ok(false);
            };
            if let Some(filter) = stop_filter {
                if filter.accept(c) {
                    return Ok(false);
                }
            }
            if eq_char(c, first, ignore_case) && self.expect(substring, ignore_case, false, 0)? {
                return Ok(true);
            }
            self.advance_one()?;
        }
    }

    // ------------------------------------------------------------------
    // Line reading

    /// Reads up to and including the next line terminator (`\n`, `\r\n`
    /// or a lone `\r`), returning the line without it. `None` only when
    /// already at end of text. `trim` strips leading and trailing spaces
    /// from the returned line without changing what is consumed.
    ///
    /// # Errors
    ///
    /// Fails when closed or when a refill fails.
    pub fn read_line(&mut self, trim: bool) -> ScanResult<Option<String>> {
        self.ensure_open()?;
        if !self.has_more()? {
            return Ok(None);
        }
        self.scratch.clear();
        loop {
            match self.peek()? {
                None => break,
                Some('\n') => {
                    self.advance_one()?;
                    break;
                }
                Some('\r') => {
                    self.advance_one()?;
                    if self.peek()? == Some('\n') {
                        self.advance_one()?;
                    }
                    break;
                }
                Some(c) => {
                    self.advance_one()?;
                    self.scratch.push(c);
                }
            }
        }
        let line = if trim {
            self.scratch.trim_matches(' ').to_string()
        } else {
            self.scratch.clone()
        };
        Ok(Some(line))
    }

    // ------------------------------------------------------------------
    // Internals

    pub(crate) fn ensure_open(&self) -> ScanResult<()> {
        if self.closed {
            return Err(ScanError::Closed);
        }
        Ok(())
    }

    /// Non-validating `has_next`; refills when the window is drained.
    pub(crate) fn has_more(&mut self) -> ScanResult<bool> {
        if self.offset < self.limit {
            return Ok(true);
        }
        self.fill()
    }

    /// Consumes the drained primary window and produces the next one:
    /// swaps in the lookahead window when populated, otherwise reads from
    /// the backing source. End-of-stream releases the source exactly once.
    fn fill(&mut self) -> ScanResult<bool> {
        if !self.streaming {
            return Ok(false);
        }
        debug_assert_eq!(self.offset, self.limit, "fill with unread characters");
        self.position += self.limit;
        self.offset = 0;
        self.limit = 0;
        if self.lookahead_limit > 0 {
            core::mem::swap(&mut self.buffer, &mut self.lookahead);
            self.limit = self.lookahead_limit;
            self.lookahead_limit = 0;
            return Ok(true);
        }
        let outcome = match self.reader.as_mut() {
            None => return Ok(false),
            Some(reader) => reader.read_chars(&mut self.buffer),
        };
        match outcome {
            Ok(0) => {
                self.release_source();
                Ok(false)
            }
            Ok(n) => {
                self.limit = n;
                Ok(true)
            }
            Err(e) => {
                self.release_source();
                Err(e)
            }
        }
    }

    /// Populates the secondary window, filling it completely unless the
    /// backing source ends first. Idempotent.
    fn fill_lookahead(&mut self) -> ScanResult<bool> {
        if !self.streaming {
            return Ok(false);
        }
        if self.lookahead_limit > 0 {
            return Ok(true);
        }
        let mut filled = 0;
        let mut eof = false;
        let mut failure = None;
        if let Some(reader) = self.reader.as_mut() {
            while filled < self.lookahead.len() {
                match reader.read_chars(&mut self.lookahead[filled..]) {
                    Ok(0) => {
                        eof = true;
                        break;
                    }
                    Ok(n) => filled += n,
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }
        } else {
            return Ok(false);
        }
        if eof || failure.is_some() {
            self.release_source();
        }
        self.lookahead_limit = filled;
        match failure {
            Some(e) => Err(e),
            None => Ok(filled > 0),
        }
    }

    fn release_source(&mut self) {
        self.reader = None;
        self.eos = true;
    }

    /// Validates a lookahead request of `len` characters against the
    /// capacity, then makes the characters reachable where possible.
    pub(crate) fn ensure_lookahead(&mut self, len: usize) -> ScanResult<()> {
        if !self.streaming {
            return Ok(());
        }
        if len > self.capacity {
            return Err(ScanError::LookaheadExceedsCapacity {
                requested: len,
                capacity: self.capacity,
            });
        }
        if self.offset + len > self.limit {
            self.fill_lookahead()?;
        }
        Ok(())
    }

    /// Character `k` positions past the cursor from the primary or
    /// secondary window; `None` when not reachable.
    pub(crate) fn char_at(&self, k: usize) -> Option<char> {
        let idx = self.offset + k;
        if idx < self.limit {
            return Some(self.buffer[idx]);
        }
        let j = idx - self.limit;
        (j < self.lookahead_limit).then(|| self.lookahead[j])
    }

    /// Relaxed single-character lookahead used internally where the
    /// request is guaranteed to fit any capacity (e.g. the second
    /// character of `\r\n`): fills the secondary window without the
    /// capacity check.
    pub(crate) fn lookahead_char(&mut self, k: usize) -> ScanResult<Option<char>> {
        if self.offset + k >= self.limit && self.streaming {
            self.fill_lookahead()?;
        }
        Ok(self.char_at(k))
    }

    /// Consumes exactly one reachable character.
    pub(crate) fn advance_one(&mut self) -> ScanResult<()> {
        if self.offset >= self.limit {
            self.fill()?;
        }
        debug_assert!(self.offset < self.limit, "advance past end of text");
        let c = self.buffer[self.offset];
        self.offset += 1;
        self.bump(c);
        Ok(())
    }

    fn bump(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Routes a positioned message through the installed handler.
    pub(crate) fn raise(&mut self, severity: Severity, text: String) -> ScanResult<()> {
        let message = ScanMessage {
            severity,
            line: self.line,
            column: self.column,
            text,
        };
        self.handler.message(message)
    }
}

// Inspection helpers to validate buffer invariants from the fuzz harness
// and the test suite without exposing internals in production.
#[cfg(any(test, feature = "fuzzing"))]
impl CharStreamScanner {
    /// Asserts the window invariants that every public operation must
    /// preserve.
    ///
    /// # Panics
    ///
    /// When a buffer or position invariant is violated.
    pub fn assert_window_invariants(&self) {
        assert!(self.offset <= self.limit, "offset past limit");
        assert!(self.limit <= self.buffer.len(), "limit past buffer");
        assert!(
            self.lookahead_limit <= self.lookahead.len(),
            "lookahead limit past window"
        );
        assert!(
            self.line >= 1 && self.column >= 1,
            "line/column are 1-based"
        );
    }

    /// The raw `(offset, limit, lookahead_limit)` window state.
    #[must_use]
    pub fn window_state(&self) -> (usize, usize, usize) {
        (self.offset, self.limit, self.lookahead_limit)
    }
}

pub(crate) fn eq_char(a: char, b: char, ignore_case: bool) -> bool {
    if a == b {
        return true;
    }
    ignore_case && a.to_lowercase().eq(b.to_lowercase())
}
