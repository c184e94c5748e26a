//! Parse failures: grammar errors with byte offsets, and consumer-raised
//! aborts.

use alloc::string::String;

/// A fatal grammar or lexical error.
///
/// Carries a human-readable message and the byte offset the diagnostic points
/// at. For most failures this is the offset of the last consumed byte; for
/// failures detected only after look-ahead (an inhomogeneous array element, an
/// invalid escape sequence, an unclassifiable bare token) it is the offset of
/// the offending construct's first byte, so the diagnostic names the true
/// cause rather than where the scan happened to stop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at byte {offset})")]
pub struct SyntaxError {
    /// What went wrong.
    pub message: String,
    /// Byte offset into the input the message refers to.
    pub offset: usize,
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Everything that can abort a parse.
///
/// Parsing halts immediately and permanently on the first error; events
/// already delivered to the handler stand as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error<E> {
    /// The input violated the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The handler rejected a callback; no further input was consumed.
    #[error("handler error: {0}")]
    Handler(E),
}
