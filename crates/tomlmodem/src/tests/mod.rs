use alloc::vec::Vec;

use crate::{Error, Event, EventCollector, SyntaxError, parse_str};

mod properties;

/// Parses `input`, expecting success, and returns the recorded events.
pub(crate) fn events(input: &str) -> Vec<Event> {
    let mut handler = EventCollector::new();
    parse_str(input, &mut handler).unwrap();
    handler.into_events()
}

/// Parses `input`, expecting a grammar failure, and returns it.
pub(crate) fn syntax_error(input: &str) -> SyntaxError {
    let mut handler = EventCollector::new();
    match parse_str(input, &mut handler) {
        Ok(()) => panic!("expected a parse failure for {input:?}"),
        Err(Error::Syntax(err)) => err,
        Err(Error::Handler(never)) => match never {},
    }
}
