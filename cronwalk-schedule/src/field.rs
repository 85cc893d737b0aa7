//! Single cron field parsing and value queries.

use crate::error::{CronError, CronResult, ParseReason};
use std::collections::BTreeSet;
use std::fmt;

/// Position of a field inside a cron entry.
///
/// Each kind carries its label and its inclusive value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Minute (0-59)
    Minute,
    /// Hour (0-23)
    Hour,
    /// Day of month (1-31)
    DayOfMonth,
    /// Month (1-12)
    Month,
    /// Day of week (0-6, Sunday = 0)
    DayOfWeek,
    /// Year (2000-2100)
    Year,
}

impl FieldKind {
    /// All kinds in expression order.
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
        FieldKind::Year,
    ];

    /// Inclusive `(min, max)` domain.
    pub const fn bounds(self) -> (u32, u32) {
        match self {
            FieldKind::Minute => (0, 59),
            FieldKind::Hour => (0, 23),
            FieldKind::DayOfMonth => (1, 31),
            FieldKind::Month => (1, 12),
            FieldKind::DayOfWeek => (0, 6),
            FieldKind::Year => (2000, 2100),
        }
    }

    /// Label used in diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            FieldKind::Minute => "Minute",
            FieldKind::Hour => "Hour",
            FieldKind::DayOfMonth => "DayOfMonth",
            FieldKind::Month => "Month",
            FieldKind::DayOfWeek => "DayOfWeek",
            FieldKind::Year => "Year",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One parsed cron field.
///
/// The allowed values are expanded once at parse time and kept sorted, so
/// every query is a binary search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CronField {
    kind: FieldKind,
    raw: String,
    // Non-empty, strictly ascending, within `kind.bounds()`.
    values: Vec<u32>,
}

impl CronField {
    /// Parse a field value.
    ///
    /// The value is a comma-separated list of parts; each part is `*`, a
    /// number or a `start-end` range, optionally followed by `/step`. A
    /// number with a step means "every `step` from the number up to the
    /// field maximum".
    ///
    /// ```
    /// use cronwalk_schedule::{CronField, FieldKind};
    ///
    /// let minutes = CronField::parse(FieldKind::Minute, "*/15").unwrap();
    /// assert_eq!(minutes.values(), &[0, 15, 30, 45]);
    ///
    /// let hours = CronField::parse(FieldKind::Hour, "9,1-5").unwrap();
    /// assert_eq!(hours.values(), &[1, 2, 3, 4, 5, 9]);
    /// ```
    pub fn parse(kind: FieldKind, text: &str) -> CronResult<Self> {
        if text.is_empty() {
            return Err(CronError::FieldValue { field: kind });
        }

        let mut values = BTreeSet::new();
        for part in text.split(',') {
            expand_part(kind, part, &mut values)?;
        }

        Ok(Self {
            kind,
            raw: text.to_string(),
            values: values.into_iter().collect(),
        })
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The text the field was parsed from, unchanged.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Allowed values in ascending order.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Smallest allowed value.
    pub fn first(&self) -> u32 {
        self.values[0]
    }

    /// Largest allowed value.
    pub fn last(&self) -> u32 {
        self.values[self.values.len() - 1]
    }

    /// Smallest allowed value greater than or equal to `start`.
    pub fn next(&self, start: u32) -> Option<u32> {
        let idx = self.values.partition_point(|&v| v < start);
        self.values.get(idx).copied()
    }

    /// Largest allowed value less than or equal to `before`.
    pub fn prev(&self, before: u32) -> Option<u32> {
        let idx = self.values.partition_point(|&v| v <= before);
        idx.checked_sub(1).map(|i| self.values[i])
    }

    /// Whether `value` is allowed.
    pub fn contains(&self, value: u32) -> bool {
        self.values.binary_search(&value).is_ok()
    }
}

impl fmt::Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn expand_part(kind: FieldKind, part: &str, values: &mut BTreeSet<u32>) -> CronResult<()> {
    let fail = |reason| CronError::FieldParse {
        field: kind,
        fragment: part.to_string(),
        reason,
    };

    if part.is_empty() {
        return Err(fail(ParseReason::EmptyValue));
    }

    let (base, step) = match part.split_once('/') {
        Some((base, step)) => {
            if base.is_empty() {
                return Err(fail(ParseReason::EmptyValue));
            }
            let step = parse_number(step)
                .filter(|s| *s > 0)
                .ok_or_else(|| fail(ParseReason::InvalidStep))?;
            (base, Some(step))
        }
        None => (part, None),
    };

    let (min, max) = kind.bounds();
    let (start, end) = if base == "*" {
        (min, max)
    } else if let Some((lo, hi)) = base.split_once('-') {
        let (Some(lo), Some(hi)) = (parse_number(lo), parse_number(hi)) else {
            return Err(fail(ParseReason::UnexpectedCharacter));
        };
        if lo < min {
            return Err(fail(ParseReason::RangeBelowMinimum));
        }
        if hi > max {
            return Err(fail(ParseReason::RangeAboveMaximum));
        }
        if lo > hi {
            return Err(fail(ParseReason::ReversedRange));
        }
        (lo, hi)
    } else {
        let value = parse_number(base).ok_or_else(|| fail(ParseReason::UnexpectedCharacter))?;
        if value < min {
            return Err(fail(ParseReason::ValueBelowMinimum));
        }
        if value > max {
            return Err(fail(ParseReason::ValueAboveMaximum));
        }
        // `N/M` runs from N to the top of the domain.
        (value, if step.is_some() { max } else { value })
    };

    values.extend((start..=end).step_by(step.unwrap_or(1) as usize));
    Ok(())
}

/// Plain decimal digits only; signs and whitespace are rejected.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
