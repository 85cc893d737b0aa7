//! Integration tests for cronwalk-schedule

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use cronwalk_schedule::*;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

#[test]
fn test_cron_entry_parsing() {
    assert!(CronEntry::parse("0 0 * * * *").is_ok());
    assert!(CronEntry::parse("invalid").is_err());
    assert!(CronEntry::parse("0 0 * * *").is_err());
}

#[test]
fn test_entry_accessors_return_raw_text() {
    let entry = CronEntry::parse("*/10 8-18 1,15 1-6 1-5 2024").unwrap();
    assert_eq!(entry.minutes(), "*/10");
    assert_eq!(entry.hours(), "8-18");
    assert_eq!(entry.days_of_month(), "1,15");
    assert_eq!(entry.months(), "1-6");
    assert_eq!(entry.days_of_week(), "1-5");
    assert_eq!(entry.years(), "2024");
}

#[test]
fn test_extra_whitespace_is_accepted() {
    let entry = CronEntry::parse("  0   12\t1 * *  * ").unwrap();
    assert_eq!(entry.to_string(), "0 12 1 * * *");
}

#[test]
fn test_scenario_noon_first_of_month() {
    let entry = CronEntry::parse("0 12 1 * * *").unwrap();
    let next = entry.next_trigger_after(at(2024, 3, 15, 0, 0)).unwrap();
    assert_eq!(next, at(2024, 4, 1, 12, 0));
}

#[test]
fn test_every_monday_lands_on_monday() {
    let entry = CronEntry::parse("0 0 * * 1 *").unwrap();
    let mut reference = at(2024, 1, 1, 0, 0);
    for _ in 0..60 {
        let next = entry.next_trigger_after(reference).unwrap();
        assert_eq!(next.weekday(), Weekday::Mon);
        assert_eq!((next.hour(), next.minute()), (0, 0));
        reference += chrono::Duration::hours(29);
    }
}

#[test]
fn test_leap_day_skips_non_leap_year() {
    let entry = CronEntry::from_fields("0", "0", "29", "2", "*", "*").unwrap();
    assert_eq!(
        entry.next_trigger_after(at(2023, 1, 1, 0, 0)).unwrap(),
        at(2024, 2, 29, 0, 0)
    );
    // 2100 is not a leap year, so the last Feb 29 in range is 2096
    assert_eq!(
        entry.next_trigger_after(at(2097, 1, 1, 0, 0)),
        Err(CronError::UnreachableSchedule {
            expression: "0 0 29 2 * *".to_string(),
            steps: 5,
        })
    );
}

#[test]
fn test_thirty_first_walks_long_months() {
    let entry = CronEntry::parse("30 6 31 * * *").unwrap();
    let months: Vec<u32> = entry
        .upcoming(at(2024, 1, 31, 7, 0))
        .take(6)
        .map(|t| t.month())
        .collect();
    assert_eq!(months, [3, 5, 7, 8, 10, 12]);
}

#[test]
fn test_backward_walk_mirrors_forward_walk() {
    let entry = CronEntry::parse("15,45 9-11 */10 * 1-5 *").unwrap();
    let start = at(2024, 5, 1, 0, 0);

    let forward: Vec<_> = entry.upcoming(start).take(40).collect();
    let last = *forward.last().unwrap();

    let mut backward: Vec<_> = entry.preceding(last).take(39).collect();
    backward.reverse();
    assert_eq!(backward, forward[..39]);
}

#[test]
fn test_year_field_restricts_search() {
    let entry = CronEntry::parse("0 0 1 1 * 2030,2040").unwrap();
    let triggers: Vec<_> = entry.upcoming(at(2024, 1, 1, 0, 0)).collect();
    assert_eq!(triggers, [at(2030, 1, 1, 0, 0), at(2040, 1, 1, 0, 0)]);

    let triggers: Vec<_> = entry.preceding(at(2050, 1, 1, 0, 0)).collect();
    assert_eq!(triggers, [at(2040, 1, 1, 0, 0), at(2030, 1, 1, 0, 0)]);
}

#[test]
fn test_search_config_from_lookup() {
    let config = SearchConfig::from_lookup(|key| {
        (key == MAX_SEARCH_STEPS_ENV).then(|| "2".to_string())
    });
    let entry = CronEntry::parse("0 0 13 * 5 *").unwrap().with_config(config);
    assert!(matches!(
        entry.next_trigger_after(at(2024, 1, 1, 0, 0)),
        Err(CronError::UnreachableSchedule { .. })
    ));
}

#[test]
fn test_field_error_reports_label_and_fragment() {
    let err = CronEntry::parse("0 20-30 * * * *").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Hour field contains range ending above maximum: '20-30'"
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_round_trip() {
    let entry = CronEntry::parse(CronPresets::WEEKDAYS_9AM).unwrap();
    let json = serde_json::to_string(&entry).unwrap();
    assert_eq!(json, "\"0 9 * * 1-5 *\"");

    let back: CronEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);

    assert!(serde_json::from_str::<CronEntry>("\"0 9 * *\"").is_err());
}
