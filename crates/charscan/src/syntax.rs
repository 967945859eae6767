//! Configuration for syntax-driven `read_until` scans.
//!
//! A [`ScanSyntax`] value describes how a scan treats escapes, quotations
//! and entity references. It is immutable for the duration of a single
//! scan and owned by the caller; the scanner only borrows it.
//!
//! The *quote-escape-lazy* flag applies only when quote start, end and
//! escape are all the same character. It decides whether a doubled quote
//! outside an active quotation is a literal quote character (lazy, the
//! SQL `can''t` convention) or an empty quoted region (eager).

use core::fmt;

/// Callback resolving the text between the entity delimiters, exclusive.
///
/// Returning `None` signals an unknown entity and fails the scan.
pub type EntityResolver = Box<dyn Fn(&str) -> Option<String>>;

/// Quote, escape and entity configuration for a syntax-driven scan.
///
/// All characters default to "unset"; an unset feature never triggers.
/// A quotation is only active when both its start and end are set.
///
/// # Examples
///
/// ```rust
/// use charscan::ScanSyntax;
///
/// let syntax = ScanSyntax {
///     escape: Some('\\'),
///     quote_start: Some('"'),
///     quote_end: Some('"'),
///     ..Default::default()
/// };
/// ```
#[derive(Default)]
pub struct ScanSyntax {
    /// Escape outside quotations: the following character is literal.
    pub escape: Option<char>,
    /// Opens the main quotation.
    pub quote_start: Option<char>,
    /// Closes the main quotation.
    pub quote_end: Option<char>,
    /// Escapes `quote_end` inside the main quotation.
    pub quote_escape: Option<char>,
    /// Lazy rule for the main quote triple (see module docs).
    pub quote_escape_lazy: bool,
    /// Opens the alternative quotation.
    pub alt_quote_start: Option<char>,
    /// Closes the alternative quotation.
    pub alt_quote_end: Option<char>,
    /// Escapes `alt_quote_end` inside the alternative quotation.
    pub alt_quote_escape: Option<char>,
    /// Lazy rule for the alternative quote triple.
    pub alt_quote_escape_lazy: bool,
    /// Starts an entity reference.
    pub entity_start: Option<char>,
    /// Terminates an entity reference.
    pub entity_end: Option<char>,
    /// Resolver invoked synchronously for each entity.
    pub entity_resolver: Option<EntityResolver>,
}

impl ScanSyntax {
    /// New syntax with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves an entity name, `None` when the entity is unknown or no
    /// resolver is installed.
    #[must_use]
    pub fn resolve_entity(&self, name: &str) -> Option<String> {
        self.entity_resolver.as_ref().and_then(|resolve| resolve(name))
    }

    pub(crate) fn quote_active(&self) -> bool {
        self.quote_start.is_some() && self.quote_end.is_some()
    }

    pub(crate) fn alt_quote_active(&self) -> bool {
        self.alt_quote_start.is_some() && self.alt_quote_end.is_some()
    }

    pub(crate) fn entity_active(&self) -> bool {
        self.entity_start.is_some() && self.entity_end.is_some()
    }
}

impl fmt::Debug for ScanSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanSyntax")
            .field("escape", &self.escape)
            .field("quote_start", &self.quote_start)
            .field("quote_end", &self.quote_end)
            .field("quote_escape", &self.quote_escape)
            .field("quote_escape_lazy", &self.quote_escape_lazy)
            .field("alt_quote_start", &self.alt_quote_start)
            .field("alt_quote_end", &self.alt_quote_end)
            .field("alt_quote_escape", &self.alt_quote_escape)
            .field("alt_quote_escape_lazy", &self.alt_quote_escape_lazy)
            .field("entity_start", &self.entity_start)
            .field("entity_end", &self.entity_end)
            .field(
                "entity_resolver",
                &self.entity_resolver.as_ref().map(|_| ".."),
            )
            .finish()
    }
}
