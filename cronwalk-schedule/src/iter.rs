//! Iterators over successive trigger instants.

use crate::entry::CronEntry;
use chrono::NaiveDateTime;
use cronwalk_log::debug;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Trigger instants walked from a reference time, one query per item.
///
/// Created by [`CronEntry::upcoming`] and [`CronEntry::preceding`]. The
/// iterator is fused: once a search fails (year range exhausted, budget
/// spent) it keeps returning `None`.
///
/// ```
/// use chrono::NaiveDate;
/// use cronwalk_schedule::CronEntry;
///
/// let entry = CronEntry::parse("0 9 * * 1-5 *").unwrap();
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 15)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
///
/// let days: Vec<u32> = entry
///     .upcoming(friday)
///     .take(3)
///     .map(|t| chrono::Datelike::day(&t))
///     .collect();
/// assert_eq!(days, [18, 19, 20]);
/// ```
#[derive(Debug, Clone)]
pub struct Triggers<'a> {
    entry: &'a CronEntry,
    cursor: Option<NaiveDateTime>,
    direction: Direction,
}

impl<'a> Triggers<'a> {
    pub(crate) fn new(entry: &'a CronEntry, from: NaiveDateTime, direction: Direction) -> Self {
        Self {
            entry,
            cursor: Some(from),
            direction,
        }
    }
}

impl Iterator for Triggers<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        let result = match self.direction {
            Direction::Forward => self.entry.next_trigger_after(cursor),
            Direction::Backward => self.entry.prev_trigger_before(cursor),
        };

        match result {
            Ok(trigger) => {
                self.cursor = Some(trigger);
                Some(trigger)
            }
            Err(e) => {
                debug!("Trigger iteration for '{}' ended: {}", self.entry, e);
                None
            }
        }
    }
}

impl FusedIterator for Triggers<'_> {}
