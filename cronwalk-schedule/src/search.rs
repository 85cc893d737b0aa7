//! Field-by-field trigger search.
//!
//! Both directions walk the calendar from minute up to year. Each field
//! takes the nearest allowed value relative to the working base; when a
//! field has no such value it wraps to its first (or last) value and carries
//! into the next coarser field, and when a coarser field moves, every finer
//! field snaps back to its first (or last) value. Day of week is not part of
//! this walk: callers filter candidates and restart on the adjacent day.

use crate::calendar::{days_in_month, following_month, preceding_month};
use crate::entry::CronEntry;
use crate::error::{CronError, CronResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use cronwalk_log::debug;

/// Step counter shared by every loop of one query.
#[derive(Debug)]
pub(crate) struct SearchBudget {
    used: u32,
    limit: u32,
}

impl SearchBudget {
    pub(crate) fn new(limit: u32) -> Self {
        Self { used: 0, limit }
    }

    pub(crate) fn used(&self) -> u32 {
        self.used
    }

    /// Consume one step, failing once the limit is passed.
    pub(crate) fn spend(&mut self, entry: &CronEntry) -> CronResult<()> {
        self.used += 1;
        if self.used > self.limit {
            return Err(unreachable(entry, self));
        }
        Ok(())
    }
}

// Callers own the report; these only leave a debug trail.
fn unreachable(entry: &CronEntry, budget: &SearchBudget) -> CronError {
    debug!(
        "Search for '{}' gave up after {} of {} steps",
        entry,
        budget.used(),
        budget.limit
    );
    unreachable_error(entry, budget)
}

fn years_exhausted(entry: &CronEntry, budget: &SearchBudget, year: i32) -> CronError {
    debug!(
        "Year field '{}' of '{}' has no allowed year left from {}",
        entry.years, entry, year
    );
    unreachable_error(entry, budget)
}

fn unreachable_error(entry: &CronEntry, budget: &SearchBudget) -> CronError {
    CronError::UnreachableSchedule {
        expression: entry.to_string(),
        steps: budget.used(),
    }
}

impl CronEntry {
    /// Earliest instant at or after `base` (truncated to the minute) that
    /// satisfies every field except day of week.
    pub(crate) fn forward_candidate(
        &self,
        base: NaiveDateTime,
        budget: &mut SearchBudget,
    ) -> CronResult<NaiveDateTime> {
        let (minutes, hours, days, months) =
            (&self.minutes, &self.hours, &self.days_of_month, &self.months);

        let mut hour_base = base.hour();
        let mut day_base = base.day();
        let mut month_base = base.month();
        let mut year = base.year();

        let mut minute = match minutes.next(base.minute()) {
            Some(minute) => minute,
            None => {
                hour_base += 1;
                minutes.first()
            }
        };

        let mut hour = match hours.next(hour_base) {
            Some(hour) => {
                if hour > hour_base {
                    minute = minutes.first();
                }
                hour
            }
            None => {
                minute = minutes.first();
                day_base += 1;
                hours.first()
            }
        };

        let mut day = match days.next(day_base) {
            Some(day) => {
                if day > day_base {
                    minute = minutes.first();
                    hour = hours.first();
                }
                day
            }
            None => {
                minute = minutes.first();
                hour = hours.first();
                (month_base, year) = following_month(month_base, year);
                days.first()
            }
        };

        while day > days_in_month(year, month_base) {
            budget.spend(self)?;
            minute = minutes.first();
            hour = hours.first();
            day = days.first();
            (month_base, year) = following_month(month_base, year);
        }

        let mut month = match months.next(month_base) {
            Some(month) => {
                if month > month_base {
                    minute = minutes.first();
                    hour = hours.first();
                    day = days.first();
                }
                month
            }
            None => {
                minute = minutes.first();
                hour = hours.first();
                day = days.first();
                year += 1;
                months.first()
            }
        };

        loop {
            budget.spend(self)?;

            let allowed_year = self.years.next(u32::try_from(year).unwrap_or(0));
            match allowed_year {
                None => return Err(years_exhausted(self, budget, year)),
                Some(allowed) if (allowed as i32) > year => {
                    year = allowed as i32;
                    month = months.first();
                    day = days.first();
                    hour = hours.first();
                    minute = minutes.first();
                }
                Some(_) => {}
            }

            if day <= days_in_month(year, month) {
                break;
            }

            // Day does not exist in this month; move to the next allowed one.
            minute = minutes.first();
            hour = hours.first();
            day = days.first();
            match months.next(month + 1) {
                Some(next) => month = next,
                None => {
                    month = months.first();
                    year += 1;
                }
            }
        }

        assemble(year, month, day, hour, minute).ok_or_else(|| unreachable(self, budget))
    }

    /// Latest instant at or before `base` (truncated to the minute) that
    /// satisfies every field except day of week.
    pub(crate) fn backward_candidate(
        &self,
        base: NaiveDateTime,
        budget: &mut SearchBudget,
    ) -> CronResult<NaiveDateTime> {
        let (minutes, hours, days, months) =
            (&self.minutes, &self.hours, &self.days_of_month, &self.months);

        let mut hour_base = Some(base.hour());
        let mut day_base = base.day();
        let mut month_base = base.month();
        let mut year = base.year();

        let mut minute = match minutes.prev(base.minute()) {
            Some(minute) => minute,
            None => {
                hour_base = base.hour().checked_sub(1);
                minutes.last()
            }
        };

        let mut hour = match hour_base.and_then(|h| hours.prev(h)) {
            Some(hour) => {
                if hour_base.is_some_and(|h| hour < h) {
                    minute = minutes.last();
                }
                hour
            }
            None => {
                minute = minutes.last();
                day_base -= 1;
                hours.last()
            }
        };

        let day = match days.prev(day_base) {
            Some(day) => {
                if day < day_base {
                    minute = minutes.last();
                    hour = hours.last();
                }
                day
            }
            None => {
                minute = minutes.last();
                hour = hours.last();
                loop {
                    (month_base, year) = preceding_month(month_base, year);
                    if let Some(day) = self.last_day_in(month_base, year) {
                        break day;
                    }
                    budget.spend(self)?;
                }
            }
        };

        let mut day = Some(day);
        let mut month = match months.prev(month_base) {
            Some(month) => {
                if month < month_base {
                    minute = minutes.last();
                    hour = hours.last();
                    day = self.last_day_in(month, year);
                }
                month
            }
            None => {
                minute = minutes.last();
                hour = hours.last();
                year -= 1;
                day = self.last_day_in(months.last(), year);
                months.last()
            }
        };

        let day = loop {
            budget.spend(self)?;

            let allowed_year = u32::try_from(year).ok().and_then(|y| self.years.prev(y));
            match allowed_year {
                None => return Err(years_exhausted(self, budget, year)),
                Some(allowed) if (allowed as i32) < year => {
                    year = allowed as i32;
                    month = months.last();
                    hour = hours.last();
                    minute = minutes.last();
                    day = self.last_day_in(month, year);
                }
                Some(_) => {}
            }

            if let Some(day) = day {
                break day;
            }

            // No allowed day fits this month; move to the previous allowed one.
            minute = minutes.last();
            hour = hours.last();
            match months.prev(month - 1) {
                Some(prev) => month = prev,
                None => {
                    month = months.last();
                    year -= 1;
                }
            }
            day = self.last_day_in(month, year);
        };

        assemble(year, month, day, hour, minute).ok_or_else(|| unreachable(self, budget))
    }

    /// Largest allowed day of month that exists in `month` of `year`.
    fn last_day_in(&self, month: u32, year: i32) -> Option<u32> {
        self.days_of_month.prev(days_in_month(year, month))
    }
}

fn assemble(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).and_then(|date| date.and_hms_opt(hour, minute, 0))
}
