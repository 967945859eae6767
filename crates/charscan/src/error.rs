use thiserror::Error;

/// Result alias used by every fallible scanner operation.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors raised by [`CharStreamScanner`](crate::CharStreamScanner) and its
/// collaborators.
///
/// Configuration errors (`LookaheadExceedsCapacity`, `InvalidRange`,
/// `InvalidArgument`) are raised before any state change. I/O errors close
/// the backing source as a side effect and leave the scanner unusable.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Any operation after [`close`](crate::CharStreamScanner::close).
    #[error("scanner is closed")]
    Closed,

    /// A lookahead request larger than the configured buffer capacity.
    #[error("lookahead of {requested} character(s) exceeds the buffer capacity of {capacity}")]
    LookaheadExceedsCapacity {
        /// Characters the operation would have needed to inspect.
        requested: usize,
        /// The capacity the scanner was constructed with.
        capacity: usize,
    },

    /// A `min`/`max` pair where `min > max`.
    #[error("invalid range: minimum {min} exceeds maximum {max}")]
    InvalidRange {
        /// Requested minimum.
        min: usize,
        /// Requested maximum.
        max: usize,
    },

    /// An argument that is structurally unusable (e.g. an empty stop string).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A malformed numeric token.
    #[error("{}", number_format_message(.text, *.radix))]
    NumberFormat {
        /// The token text exactly as it appeared in the input.
        text: String,
        /// The radix the token was parsed under.
        radix: u32,
    },

    /// A failed [`require`](crate::CharStreamScanner::require).
    #[error("Expecting \"{expected}\" but found: \"{found}\"")]
    Expecting {
        /// The string that was required.
        expected: String,
        /// What the stream actually held (possibly truncated).
        found: String,
    },

    /// A bounded [`read_while_bounded`](crate::CharStreamScanner::read_while_bounded)
    /// that matched fewer than `min` characters.
    #[error(
        "Require at least {min} up to {max} character(s) matching {description} but found only {found}"
    )]
    RequireMatch {
        /// Required minimum match count.
        min: usize,
        /// Permitted maximum match count.
        max: usize,
        /// The filter's human description.
        description: String,
        /// Characters actually matched.
        found: usize,
    },

    /// An entity reference the resolver did not recognize.
    #[error("unknown entity \"{name}\"")]
    UnknownEntity {
        /// The entity name between the entity delimiters, exclusive.
        name: String,
    },

    /// A message the active [`MessageHandler`](crate::MessageHandler) turned
    /// into a hard failure (the default handler does this for
    /// [`Severity::Error`](crate::Severity::Error)).
    #[error("{text} at {line}:{column}")]
    Message {
        /// 1-based line of the offending character.
        line: usize,
        /// 1-based column of the offending character.
        column: usize,
        /// The message text.
        text: String,
    },

    /// Bytes from the backing reader that do not form valid UTF-8.
    #[error("invalid UTF-8 in character stream")]
    InvalidUtf8,

    /// An I/O failure from the backing reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn number_format_message(text: &str, radix: u32) -> String {
    if radix == 10 {
        format!("For input string: \"{text}\"")
    } else {
        format!("For input string: \"{text}\" under radix {radix}")
    }
}
