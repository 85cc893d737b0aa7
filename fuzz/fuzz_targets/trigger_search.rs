//! Fuzz target for trigger search.
//!
//! Builds entries from arbitrary field text and searches from arbitrary
//! reference instants. Searches must terminate without panicking, and any
//! trigger returned must match the entry and lie on the right side of the
//! reference.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{NaiveDate, NaiveDateTime};
use libfuzzer_sys::fuzz_target;

use cronwalk_schedule::{CronEntry, SearchConfig};

#[derive(Debug, Arbitrary)]
struct FuzzSearch {
    fields: [String; 6],
    /// Reference instant as (year offset, ordinal day, minute of day)
    year_offset: u8,
    ordinal: u16,
    minute_of_day: u16,
    max_steps: u16,
}

impl FuzzSearch {
    fn reference(&self) -> Option<NaiveDateTime> {
        let year = 1990 + i32::from(self.year_offset % 130);
        let date = NaiveDate::from_yo_opt(year, u32::from(self.ordinal % 365) + 1)?;
        let minute = u32::from(self.minute_of_day % 1440);
        date.and_hms_opt(minute / 60, minute % 60, 0)
    }
}

fuzz_target!(|input: FuzzSearch| {
    let [minute, hour, dom, month, dow, year] = &input.fields;
    let Ok(entry) = CronEntry::from_fields(minute, hour, dom, month, dow, year) else {
        return;
    };
    let Some(reference) = input.reference() else {
        return;
    };

    let config = SearchConfig::new().with_max_search_steps(u32::from(input.max_steps));
    let entry = entry.with_config(config);

    if let Ok(next) = entry.next_trigger_after(reference) {
        assert!(next > reference);
        assert!(entry.matches(next));
    }
    if let Ok(prev) = entry.prev_trigger_before(reference) {
        assert!(prev < reference);
        assert!(entry.matches(prev));
    }
});
