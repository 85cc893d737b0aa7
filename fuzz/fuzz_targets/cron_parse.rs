//! Fuzz target for cron entry parsing.
//!
//! Feeds arbitrary text to the entry and field parsers. Parsing must never
//! panic, and anything accepted must display back to text that reparses to
//! the same entry.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cronwalk_schedule::{CronEntry, CronField, FieldKind};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Whole expression
    expression: String,
    /// Single field text and the kind to parse it as
    field: String,
    kind: u8,
}

fuzz_target!(|input: FuzzInput| {
    if let Ok(entry) = CronEntry::parse(&input.expression) {
        let text = entry.to_string();
        let reparsed = CronEntry::parse(&text).expect("displayed entry must reparse");
        assert_eq!(reparsed, entry);
    }

    let kind = FieldKind::ALL[input.kind as usize % FieldKind::ALL.len()];
    if let Ok(field) = CronField::parse(kind, &input.field) {
        let (min, max) = kind.bounds();
        let values = field.values();
        assert!(!values.is_empty());
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(values.iter().all(|v| (min..=max).contains(v)));
    }
});
