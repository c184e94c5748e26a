//! A streaming, SAX-style TOML parser.
//!
//! `tomlmodem` converts TOML-formatted bytes into an ordered sequence of
//! structural events — comments, keys, typed scalars, array and table
//! boundaries — delivered synchronously to a caller-supplied [`Handler`]. It
//! builds no document: the consumer decides whether the event stream becomes
//! a tree, a map, a validation result, or nothing at all. The pass is
//! single-threaded, forward-only, and buffers at most the current token plus
//! one byte of lookahead.
//!
//! Beyond standard TOML, bare identifier values (`mode = fast`) are delivered
//! as *symbol* events, a value-alias extension whose resolution is left to
//! the consumer.
//!
//! # Examples
//!
//! Record the event stream of a small document:
//!
//! ```rust
//! use tomlmodem::{Event, EventCollector, parse_str};
//!
//! let mut handler = EventCollector::new();
//! parse_str("[server]\nport = 8080 # tcp\n", &mut handler).unwrap();
//! assert_eq!(
//!     handler.into_events(),
//!     vec![
//!         Event::StartDocument,
//!         Event::Table(vec!["server".into()]),
//!         Event::Key("port".into()),
//!         Event::Integer(8080),
//!         Event::Comment(" tcp".into()),
//!         Event::FinishDocument,
//!     ]
//! );
//! ```
//!
//! Or implement [`Handler`] directly and keep only what you need:
//!
//! ```rust
//! use bstr::BStr;
//! use tomlmodem::{Handler, parse_str};
//!
//! #[derive(Default)]
//! struct KeyCounter(usize);
//!
//! impl Handler for KeyCounter {
//!     type Error = core::convert::Infallible;
//!
//!     fn key(&mut self, _name: &BStr) -> Result<(), Self::Error> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut counter = KeyCounter::default();
//! parse_str("a = 1\nb = 2\n", &mut counter).unwrap();
//! assert_eq!(counter.0, 2);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod classify;
mod error;
mod escape;
#[cfg(feature = "events")]
mod event;
mod handler;
mod input;
mod parser;

#[cfg(all(test, feature = "events"))]
mod tests;

pub use error::{Error, SyntaxError};
#[cfg(feature = "events")]
pub use event::{Event, EventCollector};
pub use handler::Handler;
pub use parser::{Parser, parse, parse_slice, parse_str};
