//! Messages emitted by the scanner and the handler that receives them.
//!
//! Literal readers report problems through a [`MessageHandler`] instead of
//! failing directly, so that a caller can opt into tolerant parsing: with
//! [`Severity::Warning`] the reader substitutes `?` for the broken piece and
//! keeps going, while the [`DefaultMessageHandler`] turns every
//! [`Severity::Error`] into a hard [`ScanError::Message`].

use crate::error::{ScanError, ScanResult};

/// How serious a [`ScanMessage`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// The input is unusable; the default handler fails.
    Error,
    /// The input is damaged but a substitute was produced.
    Warning,
    /// Informational only.
    Info,
}

/// A positioned diagnostic produced while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanMessage {
    /// Message severity.
    pub severity: Severity,
    /// 1-based line of the character the message refers to.
    pub line: usize,
    /// 1-based column of the character the message refers to.
    pub column: usize,
    /// Human-readable description.
    pub text: String,
}

/// Receiver for [`ScanMessage`]s.
///
/// Returning an `Err` aborts the operation that produced the message.
pub trait MessageHandler {
    /// Handles one message.
    ///
    /// # Errors
    ///
    /// Implementations decide which severities are fatal.
    fn message(&mut self, message: ScanMessage) -> ScanResult<()>;
}

/// The handler installed when none is supplied: fails on [`Severity::Error`],
/// swallows warnings and infos.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMessageHandler;

impl MessageHandler for DefaultMessageHandler {
    fn message(&mut self, message: ScanMessage) -> ScanResult<()> {
        match message.severity {
            Severity::Error => Err(ScanError::Message {
                line: message.line,
                column: message.column,
                text: message.text,
            }),
            Severity::Warning | Severity::Info => Ok(()),
        }
    }
}

/// A handler that records every message and never fails.
///
/// Useful when a caller wants to keep scanning through damaged input and
/// inspect the damage afterwards.
#[derive(Debug, Default)]
pub struct CollectingMessageHandler {
    /// Messages in emission order.
    pub messages: Vec<ScanMessage>,
}

impl MessageHandler for CollectingMessageHandler {
    fn message(&mut self, message: ScanMessage) -> ScanResult<()> {
        self.messages.push(message);
        Ok(())
    }
}
