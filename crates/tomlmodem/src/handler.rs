//! The event-consumer contract the grammar driver pushes into.

use bstr::{BStr, BString};

/// Receives the structural event stream of one parse, synchronously.
///
/// The parser invokes each callback inline and to completion before it reads
/// another byte, so implementations may freely mutate their own state without
/// synchronization. Every callback returns `Result`; returning `Err` aborts
/// the parse immediately — no further input is consumed and the error
/// surfaces as [`Error::Handler`](crate::Error::Handler). Consumers that
/// cannot fail use `type Error = core::convert::Infallible`.
///
/// All methods default to no-ops, so a consumer only implements the events it
/// cares about.
///
/// Textual payloads are byte strings: the parser hands input bytes through
/// as-is (decoding escapes where the grammar says so) and never validates
/// whole strings as UTF-8.
///
/// # Ordering guarantees
///
/// - Exactly one `start_document`/`finish_document` pair brackets the whole
///   parse.
/// - `key` is always immediately followed by exactly one complete value
///   (a scalar, or a fully nested `start_*`…`finish_*` pair) before the next
///   `key` or table header at that level.
/// - `start_array`/`finish_array` and `start_inline_table`/
///   `finish_inline_table` nest properly; each `finish_*` carries the number
///   of elements or pairs emitted between the two.
/// - `table`/`array_table` occur only at the top level, between fully closed
///   values. Their path slice is borrowed and valid only for the duration of
///   the call.
pub trait Handler {
    /// Error type a callback may abort with.
    type Error;

    /// Parsing is about to begin.
    fn start_document(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// The whole input was consumed successfully.
    fn finish_document(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A `#` comment; `text` excludes the `#` and the line terminator.
    fn comment(&mut self, text: &BStr) -> Result<(), Self::Error> {
        let _ = text;
        Ok(())
    }

    /// The key of a key-value pair (top-level or inside an inline table).
    fn key(&mut self, name: &BStr) -> Result<(), Self::Error> {
        let _ = name;
        Ok(())
    }

    /// A string value, escapes decoded and newlines normalized.
    fn string(&mut self, value: &BStr) -> Result<(), Self::Error> {
        let _ = value;
        Ok(())
    }

    /// An integer value.
    fn integer(&mut self, value: i64) -> Result<(), Self::Error> {
        let _ = value;
        Ok(())
    }

    /// A floating-point value.
    fn floating_point(&mut self, value: f64) -> Result<(), Self::Error> {
        let _ = value;
        Ok(())
    }

    /// A boolean value.
    fn boolean(&mut self, value: bool) -> Result<(), Self::Error> {
        let _ = value;
        Ok(())
    }

    /// A bare identifier value — the value-alias extension beyond standard
    /// TOML. What the name refers to is the consumer's business.
    fn symbol(&mut self, name: &BStr) -> Result<(), Self::Error> {
        let _ = name;
        Ok(())
    }

    /// An array value begins.
    fn start_array(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// The matching array ends; `items` elements were emitted inside it.
    fn finish_array(&mut self, items: usize) -> Result<(), Self::Error> {
        let _ = items;
        Ok(())
    }

    /// An inline table value begins.
    fn start_inline_table(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// The matching inline table ends; `pairs` key-value pairs were emitted
    /// inside it.
    fn finish_inline_table(&mut self, pairs: usize) -> Result<(), Self::Error> {
        let _ = pairs;
        Ok(())
    }

    /// A `[path]` table header.
    fn table(&mut self, path: &[BString]) -> Result<(), Self::Error> {
        let _ = path;
        Ok(())
    }

    /// A `[[path]]` array-of-tables header.
    fn array_table(&mut self, path: &[BString]) -> Result<(), Self::Error> {
        let _ = path;
        Ok(())
    }
}
