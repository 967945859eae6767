//! Backing character sources for streaming scanners.
//!
//! The scanner only depends on the fill contract of [`CharRead`]: deliver at
//! least one character per call unless the source is exhausted. [`Utf8Reader`]
//! adapts any [`std::io::Read`] with incremental UTF-8 decoding; [`IterSource`]
//! adapts a char iterator (mostly useful in tests, where it makes refill
//! boundaries easy to control).

use std::io::Read;

use crate::error::{ScanError, ScanResult};

/// A source of decoded characters.
pub trait CharRead {
    /// Reads characters into `out`, returning how many were written.
    ///
    /// A return of `0` means the source is exhausted; the scanner will not
    /// call again. Blocking sources must deliver at least one character
    /// otherwise.
    ///
    /// # Errors
    ///
    /// I/O or decoding failures. The scanner treats any error as fatal and
    /// releases the source.
    fn read_chars(&mut self, out: &mut [char]) -> ScanResult<usize>;
}

/// Incremental UTF-8 decoder over a byte reader.
pub struct Utf8Reader<R> {
    inner: R,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
}

impl<R: Read> Utf8Reader<R> {
    /// Wraps `inner` with an internal byte buffer.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0; 8 * 1024],
            start: 0,
            end: 0,
            eof: false,
        }
    }

    /// Moves pending bytes to the front and reads more from the inner reader.
    fn refill(&mut self) -> ScanResult<()> {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        let n = self.inner.read(&mut self.buf[self.end..])?;
        if n == 0 {
            self.eof = true;
        }
        self.end += n;
        Ok(())
    }
}

impl<R: Read> CharRead for Utf8Reader<R> {
    fn read_chars(&mut self, out: &mut [char]) -> ScanResult<usize> {
        let mut written = 0;
        while written < out.len() {
            match bstr::decode_utf8(&self.buf[self.start..self.end]) {
                (Some(ch), size) => {
                    self.start += size;
                    out[written] = ch;
                    written += 1;
                }
                (None, 0) => {
                    // Byte buffer drained.
                    if self.eof {
                        break;
                    }
                    if written > 0 {
                        // Deliver what we have before blocking again.
                        break;
                    }
                    self.refill()?;
                }
                (None, size) => {
                    // Invalid prefix, or a valid prefix cut off at the end of
                    // the byte buffer. Only refill can tell them apart.
                    if self.start + size == self.end && !self.eof {
                        if written > 0 {
                            break;
                        }
                        self.refill()?;
                    } else {
                        if written > 0 {
                            // Deliver the decoded prefix; the error surfaces
                            // on the next call.
                            break;
                        }
                        return Err(ScanError::InvalidUtf8);
                    }
                }
            }
        }
        Ok(written)
    }
}

/// Adapter delivering characters from any iterator.
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    /// Wraps `iter`.
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I: Iterator<Item = char>> CharRead for IterSource<I> {
    fn read_chars(&mut self, out: &mut [char]) -> ScanResult<usize> {
        let mut written = 0;
        while written < out.len() {
            let Some(ch) = self.iter.next() else { break };
            out[written] = ch;
            written += 1;
        }
        Ok(written)
    }
}
