mod cursor;
mod literals;
mod properties;
mod read_until;

use crate::{CharStreamScanner, IterSource};

/// Streaming scanner over `text` with the given capacity; the tests use
/// small capacities to force refill boundaries into the middle of tokens.
pub(crate) fn stream(text: &str, capacity: usize) -> CharStreamScanner {
    let chars: Vec<char> = text.chars().collect();
    CharStreamScanner::from_reader(IterSource::new(chars.into_iter()), capacity)
}
