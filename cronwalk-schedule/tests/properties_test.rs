//! Property tests for field parsing and trigger search.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use cronwalk_schedule::{CronEntry, CronError, CronField, FieldKind};
use proptest::prelude::*;

fn kind() -> impl Strategy<Value = FieldKind> {
    proptest::sample::select(FieldKind::ALL.to_vec())
}

fn part(kind: FieldKind) -> BoxedStrategy<String> {
    let (min, max) = kind.bounds();
    prop_oneof![
        Just("*".to_string()),
        (1..=max.min(30)).prop_map(|step| format!("*/{step}")),
        (min..=max).prop_map(|v| v.to_string()),
        (min..=max, 1..=10u32).prop_map(|(v, step)| format!("{v}/{step}")),
        (min..=max, min..=max).prop_map(|(a, b)| format!("{}-{}", a.min(b), a.max(b))),
        (min..=max, min..=max, 1..=10u32)
            .prop_map(|(a, b, step)| format!("{}-{}/{}", a.min(b), a.max(b), step)),
    ]
    .boxed()
}

fn field_text(kind: FieldKind) -> BoxedStrategy<String> {
    prop::collection::vec(part(kind), 1..4)
        .prop_map(|parts| parts.join(","))
        .boxed()
}

fn field() -> impl Strategy<Value = (FieldKind, String)> {
    kind().prop_flat_map(|kind| field_text(kind).prop_map(move |text| (kind, text)))
}

/// Entries with an open year range, so searches rarely run out of years.
fn entry() -> impl Strategy<Value = CronEntry> {
    (
        field_text(FieldKind::Minute),
        field_text(FieldKind::Hour),
        field_text(FieldKind::DayOfMonth),
        field_text(FieldKind::Month),
        field_text(FieldKind::DayOfWeek),
    )
        .prop_map(|(minute, hour, dom, month, dow)| {
            CronEntry::from_fields(&minute, &hour, &dom, &month, &dow, "*").unwrap()
        })
}

/// The same schedule twice: with a generated year field and with `*`.
fn entry_with_years() -> impl Strategy<Value = (CronEntry, CronEntry)> {
    (
        field_text(FieldKind::Minute),
        field_text(FieldKind::Hour),
        field_text(FieldKind::DayOfMonth),
        field_text(FieldKind::Month),
        field_text(FieldKind::DayOfWeek),
        field_text(FieldKind::Year),
    )
        .prop_map(|(minute, hour, dom, month, dow, year)| {
            (
                CronEntry::from_fields(&minute, &hour, &dom, &month, &dow, &year).unwrap(),
                CronEntry::from_fields(&minute, &hour, &dom, &month, &dow, "*").unwrap(),
            )
        })
}

fn year_start(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// First trigger of `open` inside `year` that is later than `after`.
fn first_in_year(open: &CronEntry, after: NaiveDateTime, year: i32) -> Option<NaiveDateTime> {
    let start = after.max(year_start(year) - Duration::minutes(1));
    open.next_trigger_after(start)
        .ok()
        .filter(|t| t.year() == year)
}

/// Last trigger of `open` inside `year` that is earlier than `before`.
fn last_in_year(open: &CronEntry, before: NaiveDateTime, year: i32) -> Option<NaiveDateTime> {
    let end = before.min(year_start(year + 1));
    open.prev_trigger_before(end)
        .ok()
        .filter(|t| t.year() == year)
}

fn reference() -> impl Strategy<Value = NaiveDateTime> {
    (2001..2090i32, 1..=12u32, 1..=28u32, 0..24u32, 0..60u32, 0..60u32).prop_map(
        |(y, mo, d, h, mi, s)| {
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap()
        },
    )
}

proptest! {
    #[test]
    fn parsed_values_are_sorted_unique_and_bounded((kind, text) in field()) {
        let field = CronField::parse(kind, &text).unwrap();
        let (min, max) = kind.bounds();
        let values = field.values();

        prop_assert!(!values.is_empty());
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(values.iter().all(|v| (min..=max).contains(v)));
        prop_assert_eq!(field.first(), values[0]);
        prop_assert_eq!(field.last(), *values.last().unwrap());
        prop_assert_eq!(field.raw(), text.as_str());
    }

    #[test]
    fn next_and_prev_find_nearest_allowed((kind, text) in field()) {
        let field = CronField::parse(kind, &text).unwrap();
        let (min, max) = kind.bounds();

        for v in min..=max {
            match field.next(v) {
                Some(n) => {
                    prop_assert!(n >= v);
                    prop_assert!((v..n).all(|between| !field.contains(between)));
                }
                None => prop_assert!(field.last() < v),
            }
            match field.prev(v) {
                Some(p) => {
                    prop_assert!(p <= v);
                    prop_assert!((p + 1..=v).all(|between| !field.contains(between)));
                }
                None => prop_assert!(field.first() > v),
            }
            prop_assert_eq!(field.contains(v), field.next(v) == Some(v));
        }
    }

    #[test]
    fn next_trigger_is_nearest_match(entry in entry(), after in reference()) {
        let next = match entry.next_trigger_after(after) {
            Ok(next) => next,
            Err(CronError::UnreachableSchedule { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };

        prop_assert!(next > after);
        prop_assert!(entry.matches(next));

        // Nothing triggers between `after` and `next`.
        let prev = entry.prev_trigger_before(next).ok();
        prop_assert!(prev.is_none_or(|p| p <= after));

        if next - after <= Duration::days(2) {
            let mut t = next - Duration::minutes(1);
            while t > after {
                prop_assert!(!entry.matches(t), "{} matches before {}", t, next);
                t -= Duration::minutes(1);
            }
        }
    }

    #[test]
    fn prev_trigger_is_nearest_match(entry in entry(), before in reference()) {
        let prev = match entry.prev_trigger_before(before) {
            Ok(prev) => prev,
            Err(CronError::UnreachableSchedule { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };

        prop_assert!(prev < before);
        prop_assert!(entry.matches(prev));

        let next = entry.next_trigger_after(prev).ok();
        prop_assert!(next.is_none_or(|n| n >= before));
    }

    #[test]
    fn year_field_bounds_forward_search((entry, open) in entry_with_years(), after in reference()) {
        let expected = entry
            .field(FieldKind::Year)
            .values()
            .iter()
            .map(|&y| y as i32)
            .filter(|&y| y >= after.year())
            .find_map(|y| first_in_year(&open, after, y));

        match entry.next_trigger_after(after) {
            Ok(next) => {
                prop_assert!(entry.matches(next));
                prop_assert_eq!(Some(next), expected);
            }
            // Only acceptable when no allowed year has a trigger left.
            Err(CronError::UnreachableSchedule { .. }) => prop_assert_eq!(expected, None),
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        }
    }

    #[test]
    fn year_field_bounds_backward_search((entry, open) in entry_with_years(), before in reference()) {
        let expected = entry
            .field(FieldKind::Year)
            .values()
            .iter()
            .rev()
            .map(|&y| y as i32)
            .filter(|&y| y <= before.year())
            .find_map(|y| last_in_year(&open, before, y));

        match entry.prev_trigger_before(before) {
            Ok(prev) => {
                prop_assert!(entry.matches(prev));
                prop_assert_eq!(Some(prev), expected);
            }
            Err(CronError::UnreachableSchedule { .. }) => prop_assert_eq!(expected, None),
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        }
    }

    #[test]
    fn display_round_trips(entry in entry()) {
        let text = entry.to_string();
        let reparsed = CronEntry::parse(&text).unwrap();
        prop_assert_eq!(reparsed.to_string(), text);
        prop_assert_eq!(reparsed, entry);
    }
}
