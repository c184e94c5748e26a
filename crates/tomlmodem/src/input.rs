//! Single-character-lookahead cursor over a forward-only byte source.

use crate::error::SyntaxError;

/// A pull cursor with exactly one byte of lookahead.
///
/// The cursor never seeks and never re-reads: [`ByteCursor::get`] consumes the
/// lookahead byte and refills it from the underlying iterator, advancing the
/// consumed-byte count by one. That count is the basis for every error offset
/// the parser reports.
#[derive(Debug)]
pub(crate) struct ByteCursor<I> {
    iter: I,
    lookahead: Option<u8>,
    processed: usize,
}

impl<I: Iterator<Item = u8>> ByteCursor<I> {
    pub(crate) fn new(mut iter: I) -> Self {
        let lookahead = iter.next();
        Self {
            iter,
            lookahead,
            processed: 0,
        }
    }

    /// The next unconsumed byte, or `None` at end of input.
    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.lookahead
    }

    /// Consumes and returns the next byte.
    ///
    /// At end of input this is the single site that produces the
    /// "Unexpected end of input" error; its offset equals the number of bytes
    /// consumed, i.e. the total input length for an unterminated construct.
    #[inline]
    pub(crate) fn get(&mut self) -> Result<u8, SyntaxError> {
        match self.lookahead.take() {
            Some(byte) => {
                self.processed += 1;
                self.lookahead = self.iter.next();
                Ok(byte)
            }
            None => Err(SyntaxError::new(
                "Unexpected end of input",
                self.processed,
            )),
        }
    }

    #[inline]
    pub(crate) fn eof(&self) -> bool {
        self.lookahead.is_none()
    }

    /// Number of bytes consumed so far. Monotonic.
    #[inline]
    pub(crate) fn processed(&self) -> usize {
        self.processed
    }

    /// Offset of the most recently consumed byte (0 before any consumption).
    #[inline]
    pub(crate) fn last_char_offset(&self) -> usize {
        self.processed.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::ByteCursor;

    #[test]
    fn peek_does_not_advance() {
        let mut cursor = ByteCursor::new(b"ab".iter().copied());
        assert_eq!(cursor.peek(), Some(b'a'));
        assert_eq!(cursor.peek(), Some(b'a'));
        assert_eq!(cursor.processed(), 0);
        assert_eq!(cursor.get().unwrap(), b'a');
        assert_eq!(cursor.peek(), Some(b'b'));
        assert_eq!(cursor.processed(), 1);
    }

    #[test]
    fn eof_after_last_byte() {
        let mut cursor = ByteCursor::new(b"x".iter().copied());
        assert!(!cursor.eof());
        cursor.get().unwrap();
        assert!(cursor.eof());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn get_past_end_reports_total_length() {
        let mut cursor = ByteCursor::new(b"abc".iter().copied());
        for _ in 0..3 {
            cursor.get().unwrap();
        }
        let err = cursor.get().unwrap_err();
        assert_eq!(err.message, "Unexpected end of input");
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn last_char_offset_clamps_at_zero() {
        let mut cursor = ByteCursor::new(b"q".iter().copied());
        assert_eq!(cursor.last_char_offset(), 0);
        cursor.get().unwrap();
        assert_eq!(cursor.last_char_offset(), 0);
    }
}
