use alloc::{string::String, vec::Vec};

use quickcheck_macros::quickcheck;

use crate::{Error, Event, EventCollector, parse_slice, parse_str};

#[quickcheck]
fn never_panics_and_offsets_stay_in_bounds(input: Vec<u8>) -> bool {
    let mut handler = EventCollector::new();
    match parse_slice(&input, &mut handler) {
        Ok(()) => true,
        Err(Error::Syntax(err)) => err.offset <= input.len(),
        Err(Error::Handler(never)) => match never {},
    }
}

#[quickcheck]
fn generated_integer_documents_round_trip(values: Vec<i64>) -> bool {
    use core::fmt::Write;

    let mut document = String::new();
    for (i, value) in values.iter().enumerate() {
        // Negative literals classify as floats, so keep the values unsigned.
        writeln!(document, "k{i} = {}", value.unsigned_abs() >> 1).unwrap();
    }

    let mut handler = EventCollector::new();
    parse_str(&document, &mut handler).unwrap();

    let integers: Vec<i64> = handler
        .into_events()
        .into_iter()
        .filter_map(|event| match event {
            Event::Integer(value) => Some(value),
            _ => None,
        })
        .collect();

    integers
        .iter()
        .zip(values.iter())
        .all(|(parsed, original)| *parsed as u64 == original.unsigned_abs() >> 1)
        && integers.len() == values.len()
}
