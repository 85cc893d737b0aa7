//! Six-field cron entries and trigger queries.

use crate::calendar::weekday_index;
use crate::config::SearchConfig;
use crate::error::{CronError, CronResult};
use crate::field::{CronField, FieldKind};
use crate::iter::{Direction, Triggers};
use crate::search::SearchBudget;
use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Utc};
use cronwalk_log::{debug, trace};
use std::fmt;
use std::str::FromStr;

/// Number of whitespace-separated fields in an entry.
pub const FIELD_COUNT: usize = 6;

/// Parsed cron entry: `minute hour day-of-month month day-of-week year`.
///
/// Day of month and day of week must both match for an instant to trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CronEntry {
    pub(crate) minutes: CronField,
    pub(crate) hours: CronField,
    pub(crate) days_of_month: CronField,
    pub(crate) months: CronField,
    pub(crate) days_of_week: CronField,
    pub(crate) years: CronField,
    config: SearchConfig,
}

impl CronEntry {
    /// Parse a six-field cron entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use cronwalk_schedule::CronEntry;
    ///
    /// // Noon on the first of every month
    /// let entry = CronEntry::parse("0 12 1 * * *").unwrap();
    ///
    /// let after = NaiveDate::from_ymd_opt(2024, 3, 15)
    ///     .unwrap()
    ///     .and_hms_opt(0, 0, 0)
    ///     .unwrap();
    /// let next = entry.next_trigger_after(after).unwrap();
    /// assert_eq!(next.to_string(), "2024-04-01 12:00:00");
    /// ```
    pub fn parse(expression: &str) -> CronResult<Self> {
        let tokens: Vec<&str> = expression.split_whitespace().collect();
        let [minute, hour, day_of_month, month, day_of_week, year] = tokens[..] else {
            return Err(CronError::Format {
                expression: expression.to_string(),
                expected: FIELD_COUNT,
                found: tokens.len(),
            });
        };

        Self::from_fields(minute, hour, day_of_month, month, day_of_week, year)
    }

    /// Build an entry from six separate field values.
    pub fn from_fields(
        minute: &str,
        hour: &str,
        day_of_month: &str,
        month: &str,
        day_of_week: &str,
        year: &str,
    ) -> CronResult<Self> {
        let entry = Self {
            minutes: CronField::parse(FieldKind::Minute, minute)?,
            hours: CronField::parse(FieldKind::Hour, hour)?,
            days_of_month: CronField::parse(FieldKind::DayOfMonth, day_of_month)?,
            months: CronField::parse(FieldKind::Month, month)?,
            days_of_week: CronField::parse(FieldKind::DayOfWeek, day_of_week)?,
            years: CronField::parse(FieldKind::Year, year)?,
            config: SearchConfig::default(),
        };
        debug!("Parsed cron entry '{}'", entry);
        Ok(entry)
    }

    /// Replace the search limits used by trigger queries.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn minutes(&self) -> &str {
        self.minutes.raw()
    }

    pub fn hours(&self) -> &str {
        self.hours.raw()
    }

    pub fn days_of_month(&self) -> &str {
        self.days_of_month.raw()
    }

    pub fn months(&self) -> &str {
        self.months.raw()
    }

    pub fn days_of_week(&self) -> &str {
        self.days_of_week.raw()
    }

    pub fn years(&self) -> &str {
        self.years.raw()
    }

    /// The parsed field at `kind`.
    pub fn field(&self, kind: FieldKind) -> &CronField {
        match kind {
            FieldKind::Minute => &self.minutes,
            FieldKind::Hour => &self.hours,
            FieldKind::DayOfMonth => &self.days_of_month,
            FieldKind::Month => &self.months,
            FieldKind::DayOfWeek => &self.days_of_week,
            FieldKind::Year => &self.years,
        }
    }

    /// Whether the minute containing `at` is a trigger instant.
    pub fn matches(&self, at: NaiveDateTime) -> bool {
        let Ok(year) = u32::try_from(at.year()) else {
            return false;
        };
        self.minutes.contains(at.minute())
            && self.hours.contains(at.hour())
            && self.days_of_month.contains(at.day())
            && self.months.contains(at.month())
            && self.days_of_week.contains(weekday_index(at.date()))
            && self.years.contains(year)
    }

    /// Next trigger after the current UTC time.
    pub fn next_trigger(&self) -> CronResult<NaiveDateTime> {
        self.next_trigger_after(Utc::now().naive_utc())
    }

    /// Earliest trigger instant strictly after `after`.
    pub fn next_trigger_after(&self, after: NaiveDateTime) -> CronResult<NaiveDateTime> {
        let mut budget = SearchBudget::new(self.config.max_search_steps);
        let mut base = after
            .checked_add_signed(Duration::minutes(1))
            .ok_or(CronError::DateOutOfRange(after))?;

        loop {
            let candidate = self.forward_candidate(base, &mut budget)?;
            if self.days_of_week.contains(weekday_index(candidate.date())) {
                return Ok(candidate);
            }

            trace!(
                "{} rejected by day of week '{}'",
                candidate,
                self.days_of_week
            );
            budget.spend(self)?;
            base = candidate
                .date()
                .succ_opt()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .ok_or(CronError::DateOutOfRange(candidate))?;
        }
    }

    /// Latest trigger instant strictly before `before`.
    pub fn prev_trigger_before(&self, before: NaiveDateTime) -> CronResult<NaiveDateTime> {
        let mut budget = SearchBudget::new(self.config.max_search_steps);
        let mut base = last_minute_before(before).ok_or(CronError::DateOutOfRange(before))?;

        loop {
            let candidate = self.backward_candidate(base, &mut budget)?;
            if self.days_of_week.contains(weekday_index(candidate.date())) {
                return Ok(candidate);
            }

            trace!(
                "{} rejected by day of week '{}'",
                candidate,
                self.days_of_week
            );
            budget.spend(self)?;
            base = candidate
                .date()
                .pred_opt()
                .and_then(|date| date.and_hms_opt(23, 59, 0))
                .ok_or(CronError::DateOutOfRange(candidate))?;
        }
    }

    /// Successive triggers after `after`, earliest first.
    ///
    /// The iterator ends when no further trigger can be found.
    pub fn upcoming(&self, after: NaiveDateTime) -> Triggers<'_> {
        Triggers::new(self, after, Direction::Forward)
    }

    /// Successive triggers before `before`, latest first.
    pub fn preceding(&self, before: NaiveDateTime) -> Triggers<'_> {
        Triggers::new(self, before, Direction::Backward)
    }
}

/// Start of the latest whole minute that begins strictly before `at`.
fn last_minute_before(at: NaiveDateTime) -> Option<NaiveDateTime> {
    let truncated = at.with_second(0)?.with_nanosecond(0)?;
    if truncated < at {
        Some(truncated)
    } else {
        at.checked_sub_signed(Duration::minutes(1))
    }
}

impl fmt::Display for CronEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.minutes, self.hours, self.days_of_month, self.months, self.days_of_week, self.years
        )
    }
}

impl FromStr for CronEntry {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for CronEntry {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CronEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CronEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let expression = String::deserialize(deserializer)?;
        Self::parse(&expression).map_err(serde::de::Error::custom)
    }
}

/// Common cron entry presets.
pub struct CronPresets;

impl CronPresets {
    /// Every minute
    pub const EVERY_MINUTE: &'static str = "* * * * * *";

    /// Every 5 minutes
    pub const EVERY_5_MINUTES: &'static str = "*/5 * * * * *";

    /// Every 15 minutes
    pub const EVERY_15_MINUTES: &'static str = "*/15 * * * * *";

    /// Every 30 minutes
    pub const EVERY_30_MINUTES: &'static str = "*/30 * * * * *";

    /// Every hour, on the hour
    pub const HOURLY: &'static str = "0 * * * * *";

    /// Every day at midnight
    pub const DAILY: &'static str = "0 0 * * * *";

    /// Every Sunday at midnight
    pub const WEEKLY: &'static str = "0 0 * * 0 *";

    /// The 1st of every month at midnight
    pub const MONTHLY: &'static str = "0 0 1 * * *";

    /// January 1st at midnight
    pub const YEARLY: &'static str = "0 0 1 1 * *";

    /// Monday to Friday at 9 AM
    pub const WEEKDAYS_9AM: &'static str = "0 9 * * 1-5 *";

    /// Saturday and Sunday at 10 AM
    pub const WEEKENDS_10AM: &'static str = "0 10 * * 0,6 *";

    pub const ALL: [&'static str; 11] = [
        Self::EVERY_MINUTE,
        Self::EVERY_5_MINUTES,
        Self::EVERY_15_MINUTES,
        Self::EVERY_30_MINUTES,
        Self::HOURLY,
        Self::DAILY,
        Self::WEEKLY,
        Self::MONTHLY,
        Self::YEARLY,
        Self::WEEKDAYS_9AM,
        Self::WEEKENDS_10AM,
    ];
}
