//! Buffered events: a recorded form of the handler callbacks, for consumers
//! and tests that want to inspect a parse after the fact.

use alloc::borrow::ToOwned;
use alloc::vec::Vec;
use core::convert::Infallible;

use bstr::{BStr, BString};

use crate::handler::Handler;

/// One recorded handler callback.
///
/// Events have no identity beyond their position in the recorded sequence;
/// the parser itself keeps no event history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    StartDocument,
    FinishDocument,
    Comment(BString),
    Key(BString),
    String(BString),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Symbol(BString),
    StartArray,
    /// Carries the element count of the array it closes.
    FinishArray(usize),
    StartInlineTable,
    /// Carries the pair count of the inline table it closes.
    FinishInlineTable(usize),
    Table(Vec<BString>),
    ArrayTable(Vec<BString>),
}

/// A [`Handler`] that records every event it receives, in order.
///
/// # Examples
///
/// ```
/// use tomlmodem::{Event, EventCollector, parse_str};
///
/// let mut handler = EventCollector::new();
/// parse_str("answer = 42\n", &mut handler).unwrap();
/// assert_eq!(
///     handler.into_events(),
///     vec![
///         Event::StartDocument,
///         Event::Key("answer".into()),
///         Event::Integer(42),
///         Event::FinishDocument,
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Vec<Event>,
}

impl EventCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the collector, returning the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Handler for EventCollector {
    type Error = Infallible;

    fn start_document(&mut self) -> Result<(), Infallible> {
        self.events.push(Event::StartDocument);
        Ok(())
    }

    fn finish_document(&mut self) -> Result<(), Infallible> {
        self.events.push(Event::FinishDocument);
        Ok(())
    }

    fn comment(&mut self, text: &BStr) -> Result<(), Infallible> {
        self.events.push(Event::Comment(text.to_owned()));
        Ok(())
    }

    fn key(&mut self, name: &BStr) -> Result<(), Infallible> {
        self.events.push(Event::Key(name.to_owned()));
        Ok(())
    }

    fn string(&mut self, value: &BStr) -> Result<(), Infallible> {
        self.events.push(Event::String(value.to_owned()));
        Ok(())
    }

    fn integer(&mut self, value: i64) -> Result<(), Infallible> {
        self.events.push(Event::Integer(value));
        Ok(())
    }

    fn floating_point(&mut self, value: f64) -> Result<(), Infallible> {
        self.events.push(Event::Float(value));
        Ok(())
    }

    fn boolean(&mut self, value: bool) -> Result<(), Infallible> {
        self.events.push(Event::Boolean(value));
        Ok(())
    }

    fn symbol(&mut self, name: &BStr) -> Result<(), Infallible> {
        self.events.push(Event::Symbol(name.to_owned()));
        Ok(())
    }

    fn start_array(&mut self) -> Result<(), Infallible> {
        self.events.push(Event::StartArray);
        Ok(())
    }

    fn finish_array(&mut self, items: usize) -> Result<(), Infallible> {
        self.events.push(Event::FinishArray(items));
        Ok(())
    }

    fn start_inline_table(&mut self) -> Result<(), Infallible> {
        self.events.push(Event::StartInlineTable);
        Ok(())
    }

    fn finish_inline_table(&mut self, pairs: usize) -> Result<(), Infallible> {
        self.events.push(Event::FinishInlineTable(pairs));
        Ok(())
    }

    fn table(&mut self, path: &[BString]) -> Result<(), Infallible> {
        self.events.push(Event::Table(path.to_vec()));
        Ok(())
    }

    fn array_table(&mut self, path: &[BString]) -> Result<(), Infallible> {
        self.events.push(Event::ArrayTable(path.to_vec()));
        Ok(())
    }
}
