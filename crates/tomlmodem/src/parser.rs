//! The recursive-descent grammar driver.
//!
//! One forward pass, one byte of lookahead, no backtracking: the driver pulls
//! bytes through [`ByteCursor`], dispatches to the string scanners and the
//! bare-token classifier, and pushes every recognized unit to the [`Handler`]
//! synchronously before reading further. Nothing larger than the current
//! token is ever buffered, so memory use is bounded by the longest single
//! string, not the document.
//!
//! # Examples
//!
//! ```rust
//! use tomlmodem::{Event, EventCollector, parse_str};
//!
//! let mut handler = EventCollector::new();
//! parse_str("[server]\nhost = \"example.com\"\n", &mut handler).unwrap();
//! assert_eq!(
//!     handler.into_events(),
//!     vec![
//!         Event::StartDocument,
//!         Event::Table(vec!["server".into()]),
//!         Event::Key("host".into()),
//!         Event::String("example.com".into()),
//!         Event::FinishDocument,
//!     ]
//! );
//! ```
use alloc::{format, string::String, vec::Vec};

use bstr::{BString, ByteSlice};

use crate::{
    classify::{is_control, is_key_char, is_word_char},
    error::{Error, SyntaxError},
    escape::{append_codepoint, codepoint},
    handler::Handler,
    input::ByteCursor,
};

/// Transient value-type tag, used only to enforce array homogeneity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TomlType {
    String,
    Integer,
    Float,
    Boolean,
    Symbol,
    Array,
    Table,
}

/// Parses a complete TOML document from any forward-only byte source,
/// delivering events to `handler`.
///
/// This is the usual entry point; [`parse_slice`] and [`parse_str`] are thin
/// wrappers for in-memory input. See [`Parser`] if you want to name the type.
///
/// # Errors
///
/// Returns [`Error::Syntax`] on the first grammar violation, or
/// [`Error::Handler`] if a callback rejects an event. Either way the parse
/// halts immediately; events already delivered stand as-is.
pub fn parse<I, H>(input: I, handler: &mut H) -> Result<(), Error<H::Error>>
where
    I: IntoIterator<Item = u8>,
    H: Handler,
{
    Parser::new(input.into_iter(), handler).parse()
}

/// Parses a TOML document from a byte slice. See [`parse`].
///
/// # Errors
///
/// See [`parse`].
pub fn parse_slice<H: Handler>(input: &[u8], handler: &mut H) -> Result<(), Error<H::Error>> {
    parse(input.iter().copied(), handler)
}

/// Parses a TOML document from a string. See [`parse`].
///
/// # Errors
///
/// See [`parse`].
pub fn parse_str<H: Handler>(input: &str, handler: &mut H) -> Result<(), Error<H::Error>> {
    parse(input.bytes(), handler)
}

/// The streaming TOML parser: a single-use recursive-descent driver over one
/// byte source and one handler.
#[derive(Debug)]
pub struct Parser<'h, I, H> {
    input: ByteCursor<I>,
    handler: &'h mut H,
}

impl<'h, I, H> Parser<'h, I, H>
where
    I: Iterator<Item = u8>,
    H: Handler,
{
    pub fn new(input: I, handler: &'h mut H) -> Self {
        Self {
            input: ByteCursor::new(input),
            handler,
        }
    }

    /// Runs the parse to completion. Consumes the parser: the pass is
    /// forward-only and cannot be restarted.
    ///
    /// # Errors
    ///
    /// See [`parse`].
    pub fn parse(mut self) -> Result<(), Error<H::Error>> {
        self.handler.start_document().map_err(Error::Handler)?;

        self.parse_expression()?;

        while !self.input.eof() {
            self.parse_new_line()?;
            self.parse_expression()?;
        }

        self.handler.finish_document().map_err(Error::Handler)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Top-level structure
    // ------------------------------------------------------------------

    /// One line's worth of grammar: empty, comment, table header, or
    /// key-value pair, each optionally followed by a trailing comment.
    fn parse_expression(&mut self) -> Result<(), Error<H::Error>> {
        self.skip_spaces();

        match self.input.peek() {
            None | Some(b'\r' | b'\n') => Ok(()),
            Some(b'#') => self.parse_comment(),
            Some(b'[') => {
                self.parse_table_header()?;
                self.skip_spaces();
                if self.input.peek() == Some(b'#') {
                    self.parse_comment()?;
                }
                Ok(())
            }
            Some(_) => {
                self.parse_kv_pair()?;
                self.skip_spaces();
                if self.input.peek() == Some(b'#') {
                    self.parse_comment()?;
                }
                Ok(())
            }
        }
    }

    /// `[path]` or `[[path]]` with spaces allowed around the dots.
    fn parse_table_header(&mut self) -> Result<(), Error<H::Error>> {
        self.input.get()?;

        let array_item = self.input.peek() == Some(b'[');
        if array_item {
            self.input.get()?;
        }

        let mut path: Vec<BString> = Vec::new();
        loop {
            self.skip_spaces();
            path.push(self.parse_key()?);
            self.skip_spaces();

            if self.input.peek() == Some(b']') {
                self.input.get()?;
                if array_item {
                    self.expect(b"]")?;
                }
                break;
            }
            self.expect(b".")?;
        }

        if array_item {
            self.handler.array_table(&path).map_err(Error::Handler)?;
        } else {
            self.handler.table(&path).map_err(Error::Handler)?;
        }
        Ok(())
    }

    fn parse_kv_pair(&mut self) -> Result<(), Error<H::Error>> {
        let key = self.parse_key()?;
        self.handler.key(key.as_bstr()).map_err(Error::Handler)?;
        self.skip_spaces();
        self.expect(b"=")?;
        self.skip_spaces();
        self.parse_value()?;
        Ok(())
    }

    /// A bare key (run of key characters) or a double-quoted key (basic
    /// string grammar). Must be non-empty either way.
    fn parse_key(&mut self) -> Result<BString, Error<H::Error>> {
        let mut key = BString::from("");

        if self.input.peek() == Some(b'"') {
            self.input.get()?;
            self.parse_basic_string(&mut key)?;

            if key.is_empty() {
                return Err(SyntaxError::new(
                    "Expected a non-empty key",
                    self.input.last_char_offset(),
                )
                .into());
            }
        } else {
            let byte = self.input.get()?;
            if !is_key_char(byte) {
                return Err(SyntaxError::new(
                    "Expected a non-empty key",
                    self.input.last_char_offset(),
                )
                .into());
            }
            key.push(byte);

            while self.input.peek().is_some_and(is_key_char) {
                key.push(self.input.get()?);
            }
        }

        Ok(key)
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    /// Dispatches on one character of lookahead and returns the type tag of
    /// the value it produced (needed for array homogeneity).
    fn parse_value(&mut self) -> Result<TomlType, Error<H::Error>> {
        match self.input.peek() {
            Some(b'{') => {
                self.parse_inline_table()?;
                Ok(TomlType::Table)
            }
            Some(b'[') => {
                self.parse_array()?;
                Ok(TomlType::Array)
            }
            Some(b'"') => {
                self.parse_string()?;
                Ok(TomlType::String)
            }
            Some(b'\'') => {
                self.parse_literal_string()?;
                Ok(TomlType::String)
            }
            _ => self.parse_bare_token(),
        }
    }

    fn parse_array(&mut self) -> Result<(), Error<H::Error>> {
        self.input.get()?;
        self.handler.start_array().map_err(Error::Handler)?;
        self.skip_spaces_and_empty_lines()?;

        let mut element_type: Option<TomlType> = None;
        let mut items = 0usize;

        loop {
            if self.input.peek() == Some(b']') {
                self.input.get()?;
                self.handler.finish_array(items).map_err(Error::Handler)?;
                return Ok(());
            }

            let item_offset = self.input.processed();
            let item_type = self.parse_value()?;

            if element_type.is_some_and(|first| first != item_type) {
                return Err(SyntaxError::new(
                    "All array elements must be of the same type",
                    item_offset,
                )
                .into());
            }
            element_type = Some(item_type);
            items += 1;

            // Blank lines and comments are tolerated around commas, a
            // deliberate relaxation versus the published grammar.
            self.skip_spaces_and_empty_lines()?;

            match self.input.get()? {
                b']' => {
                    self.handler.finish_array(items).map_err(Error::Handler)?;
                    return Ok(());
                }
                b',' => self.skip_spaces_and_empty_lines()?,
                _ => {
                    return Err(SyntaxError::new(
                        "Expected ',' or ']' after an array element",
                        self.input.last_char_offset(),
                    )
                    .into());
                }
            }
        }
    }

    /// `{ key = value, ... }`, strictly single-line, no trailing comma.
    fn parse_inline_table(&mut self) -> Result<(), Error<H::Error>> {
        self.input.get()?;
        self.handler.start_inline_table().map_err(Error::Handler)?;
        let mut pairs = 0usize;

        self.skip_spaces();

        if self.input.peek() == Some(b'}') {
            self.input.get()?;
            self.handler
                .finish_inline_table(pairs)
                .map_err(Error::Handler)?;
            return Ok(());
        }

        loop {
            let key = self.parse_key()?;
            self.handler.key(key.as_bstr()).map_err(Error::Handler)?;
            self.skip_spaces();
            self.expect(b"=")?;
            self.skip_spaces();
            self.parse_value()?;
            self.skip_spaces();

            pairs += 1;

            match self.input.get()? {
                b'}' => {
                    self.handler
                        .finish_inline_table(pairs)
                        .map_err(Error::Handler)?;
                    return Ok(());
                }
                b',' => self.skip_spaces(),
                _ => {
                    return Err(SyntaxError::new(
                        "Expected ',' or '}' after an inline table element",
                        self.input.last_char_offset(),
                    )
                    .into());
                }
            }
        }
    }

    /// Maximal run of word characters, classified as boolean, integer,
    /// float, or symbol — in that priority order.
    fn parse_bare_token(&mut self) -> Result<TomlType, Error<H::Error>> {
        let token_offset = self.input.processed();

        let byte = self.input.get()?;
        if !is_word_char(byte) {
            return Err(SyntaxError::new(
                "Expected a non-empty symbol",
                self.input.last_char_offset(),
            )
            .into());
        }

        let mut token = BString::from("");
        token.push(byte);
        while self.input.peek().is_some_and(is_word_char) {
            token.push(self.input.get()?);
        }

        if token == "true" {
            self.handler.boolean(true).map_err(Error::Handler)?;
            return Ok(TomlType::Boolean);
        }
        if token == "false" {
            self.handler.boolean(false).map_err(Error::Handler)?;
            return Ok(TomlType::Boolean);
        }

        // Word characters are ASCII, so this cannot fail; the fallback keeps
        // the classifier total.
        let Ok(text) = core::str::from_utf8(&token) else {
            return Err(SyntaxError::new("Invalid value", token_offset).into());
        };

        if text.bytes().all(|b| b.is_ascii_digit()) {
            let value: i64 = text.parse().map_err(|_| {
                SyntaxError::new("Integer value is out of range", token_offset)
            })?;
            self.handler.integer(value).map_err(Error::Handler)?;
            return Ok(TomlType::Integer);
        }

        if is_float_token(text) {
            let value: f64 = text
                .parse()
                .map_err(|_| SyntaxError::new("Invalid value", token_offset))?;
            self.handler.floating_point(value).map_err(Error::Handler)?;
            return Ok(TomlType::Float);
        }

        if is_symbol_token(text) {
            self.handler
                .symbol(token.as_bstr())
                .map_err(Error::Handler)?;
            return Ok(TomlType::Symbol);
        }

        Err(SyntaxError::new("Invalid value", token_offset).into())
    }

    // ------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------

    /// `"` lookahead: basic, empty, or multiline-basic string.
    fn parse_string(&mut self) -> Result<(), Error<H::Error>> {
        self.input.get()?;
        let mut value = BString::from("");

        if self.input.peek() == Some(b'"') {
            self.input.get()?;
            if self.input.peek() == Some(b'"') {
                self.input.get()?;
                self.parse_multiline_string(&mut value)?;
            }
            // An immediate closing pair is the empty string.
        } else {
            self.parse_basic_string(&mut value)?;
        }

        self.handler.string(value.as_bstr()).map_err(Error::Handler)?;
        Ok(())
    }

    /// Body of a `"…"` string, opening quote already consumed.
    fn parse_basic_string(&mut self, out: &mut BString) -> Result<(), Error<H::Error>> {
        loop {
            let byte = self.input.get()?;
            if is_control(byte) {
                return Err(SyntaxError::new(
                    "Control characters must be escaped",
                    self.input.last_char_offset(),
                )
                .into());
            }
            match byte {
                b'"' => return Ok(()),
                b'\\' => {
                    let escape_offset = self.input.last_char_offset();
                    self.parse_escape_sequence(escape_offset, out)?;
                }
                _ => out.push(byte),
            }
        }
    }

    /// Body of a `"""…"""` string, opening delimiter already consumed.
    /// Raw newlines normalize to `\n`; a leading newline is discarded;
    /// backslash-newline splices lines together.
    fn parse_multiline_string(&mut self, out: &mut BString) -> Result<(), Error<H::Error>> {
        if matches!(self.input.peek(), Some(b'\r' | b'\n')) {
            self.parse_new_line()?;
        }

        loop {
            if matches!(self.input.peek(), Some(b'\r' | b'\n')) {
                self.parse_new_line()?;
                out.push(b'\n');
                continue;
            }

            let byte = self.input.get()?;
            if is_control(byte) {
                return Err(SyntaxError::new(
                    "Control characters must be escaped",
                    self.input.last_char_offset(),
                )
                .into());
            }
            match byte {
                b'"' => {
                    // One or two quotes mid-string are literal content.
                    if self.input.peek() == Some(b'"') {
                        self.input.get()?;
                        if self.input.peek() == Some(b'"') {
                            self.input.get()?;
                            return Ok(());
                        }
                        out.push(b'"');
                    }
                    out.push(b'"');
                }
                b'\\' => {
                    if matches!(self.input.peek(), Some(b'\r' | b'\n')) {
                        // Line splicing: the newline and all following
                        // whitespace contribute nothing.
                        self.parse_new_line()?;
                        while matches!(
                            self.input.peek(),
                            Some(b' ' | b'\t' | b'\r' | b'\n')
                        ) {
                            self.input.get()?;
                        }
                        continue;
                    }

                    let escape_offset = self.input.last_char_offset();
                    self.parse_escape_sequence(escape_offset, out)?;
                }
                _ => out.push(byte),
            }
        }
    }

    /// `'` lookahead: literal, empty, or multiline-literal string. No escape
    /// processing in any of them.
    fn parse_literal_string(&mut self) -> Result<(), Error<H::Error>> {
        self.input.get()?;
        let mut value = BString::from("");

        if self.input.peek() == Some(b'\'') {
            self.input.get()?;
            if self.input.peek() == Some(b'\'') {
                self.input.get()?;
                self.parse_multiline_literal_string(&mut value)?;
            }
        } else {
            loop {
                let byte = self.input.get()?;
                if byte == b'\'' {
                    break;
                }
                if is_control(byte) && byte != b'\t' {
                    return Err(SyntaxError::new(
                        "Control characters are not allowed",
                        self.input.last_char_offset(),
                    )
                    .into());
                }
                value.push(byte);
            }
        }

        self.handler.string(value.as_bstr()).map_err(Error::Handler)?;
        Ok(())
    }

    /// Body of a `'''…'''` string, opening delimiter already consumed.
    fn parse_multiline_literal_string(
        &mut self,
        out: &mut BString,
    ) -> Result<(), Error<H::Error>> {
        if matches!(self.input.peek(), Some(b'\r' | b'\n')) {
            self.parse_new_line()?;
        }

        loop {
            if matches!(self.input.peek(), Some(b'\r' | b'\n')) {
                self.parse_new_line()?;
                out.push(b'\n');
                continue;
            }

            let byte = self.input.get()?;
            if byte == b'\'' {
                if self.input.peek() == Some(b'\'') {
                    self.input.get()?;
                    if self.input.peek() == Some(b'\'') {
                        self.input.get()?;
                        return Ok(());
                    }
                    out.push(b'\'');
                }
                out.push(b'\'');
            } else if is_control(byte) && byte != b'\t' {
                return Err(SyntaxError::new(
                    "Control characters are not allowed",
                    self.input.last_char_offset(),
                )
                .into());
            } else {
                out.push(byte);
            }
        }
    }

    /// One escape sequence, backslash already consumed. `escape_offset` is
    /// the backslash's offset — all escape diagnostics point there.
    fn parse_escape_sequence(
        &mut self,
        escape_offset: usize,
        out: &mut BString,
    ) -> Result<(), Error<H::Error>> {
        match self.input.get()? {
            b'b' => out.push(0x08),
            b't' => out.push(b'\t'),
            b'n' => out.push(b'\n'),
            b'f' => out.push(0x0C),
            b'r' => out.push(b'\r'),
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'u' => {
                let value = codepoint(&mut self.input, 4)?;
                append_codepoint(value, escape_offset, out)?;
            }
            b'U' => {
                let value = codepoint(&mut self.input, 8)?;
                append_codepoint(value, escape_offset, out)?;
            }
            _ => {
                return Err(SyntaxError::new("Invalid escape-sequence", escape_offset).into());
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lexical helpers
    // ------------------------------------------------------------------

    /// `#` to end of line; the `#` and the terminator are not part of the
    /// delivered text. Tab is the only control byte a comment may contain.
    fn parse_comment(&mut self) -> Result<(), Error<H::Error>> {
        self.input.get()?;

        let mut text = BString::from("");
        while let Some(byte) = self.input.peek() {
            if byte != b'\t' && is_control(byte) {
                break;
            }
            text.push(self.input.get()?);
        }

        self.handler.comment(text.as_bstr()).map_err(Error::Handler)?;
        Ok(())
    }

    /// Exactly one line terminator: `\n` or `\r\n`.
    fn parse_new_line(&mut self) -> Result<(), Error<H::Error>> {
        let mut byte = self.input.get()?;
        if byte == b'\r' {
            byte = self.input.get()?;
        }
        if byte != b'\n' {
            return Err(SyntaxError::new(
                "Expected new-line",
                self.input.last_char_offset(),
            )
            .into());
        }
        Ok(())
    }

    fn skip_spaces(&mut self) {
        while matches!(self.input.peek(), Some(b' ' | b'\t')) {
            // Cannot fail: the lookahead byte is present.
            let _ = self.input.get();
        }
    }

    /// Skips spaces, blank lines, and whole comment lines. Used between
    /// array elements, where vertical whitespace is allowed.
    fn skip_spaces_and_empty_lines(&mut self) -> Result<(), Error<H::Error>> {
        while !self.input.eof() {
            self.skip_spaces();

            match self.input.peek() {
                Some(b'#') => {
                    self.parse_comment()?;
                    self.parse_new_line()?;
                }
                Some(b'\r' | b'\n') => self.parse_new_line()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// Consumes one byte and checks it against `expected`, failing with a
    /// message that lists the alternatives.
    fn expect(&mut self, expected: &[u8]) -> Result<u8, Error<H::Error>> {
        let byte = self.input.get()?;
        if expected.contains(&byte) {
            return Ok(byte);
        }

        let mut list = String::new();
        for (i, &alternative) in expected.iter().enumerate() {
            if i > 0 {
                list.push_str(", ");
            }
            list.push('\'');
            list.push_str(&display_byte(alternative));
            list.push('\'');
        }

        Err(SyntaxError::new(
            format!("Expected one of the following symbols: {list}"),
            self.input.last_char_offset(),
        )
        .into())
    }
}

/// Renders a byte for diagnostics, escaping the unprintable.
fn display_byte(byte: u8) -> String {
    match byte {
        b'\\' => String::from("\\\\"),
        b'\'' => String::from("\\'"),
        b'"' => String::from("\\\""),
        0x08 => String::from("\\b"),
        b'\t' => String::from("\\t"),
        b'\r' => String::from("\\r"),
        b'\n' => String::from("\\n"),
        byte if byte.is_ascii_graphic() || byte == b' ' => String::from(byte as char),
        byte => format!("\\x{byte:02x}"),
    }
}

/// The bare-token float pattern: optional sign, then `digits`, `digits.`,
/// `.digits`, or `digits.digits`, with an optional `[eE][+-]?digits`
/// exponent. Every match is parseable by `f64::from_str`.
fn is_float_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    let bytes = match bytes.first() {
        Some(b'+' | b'-') => &bytes[1..],
        _ => bytes,
    };

    let (mantissa, exponent) = match bytes.iter().position(|&b| matches!(b, b'e' | b'E')) {
        Some(split) => (&bytes[..split], Some(&bytes[split + 1..])),
        None => (bytes, None),
    };

    let mantissa_ok = match mantissa.iter().position(|&b| b == b'.') {
        Some(dot) => {
            let (int_part, frac_part) = (&mantissa[..dot], &mantissa[dot + 1..]);
            (!int_part.is_empty() || !frac_part.is_empty())
                && int_part.iter().all(u8::is_ascii_digit)
                && frac_part.iter().all(u8::is_ascii_digit)
        }
        None => !mantissa.is_empty() && mantissa.iter().all(u8::is_ascii_digit),
    };
    if !mantissa_ok {
        return false;
    }

    match exponent {
        Some(exp) => {
            let exp = match exp.first() {
                Some(b'+' | b'-') => &exp[1..],
                _ => exp,
            };
            !exp.is_empty() && exp.iter().all(u8::is_ascii_digit)
        }
        None => true,
    }
}

/// The symbol pattern: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_symbol_token(token: &str) -> bool {
    let mut bytes = token.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}
