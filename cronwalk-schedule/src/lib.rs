//! Six-field cron entries and trigger search.
//!
//! An entry has the fields `minute hour day-of-month month day-of-week year`:
//!
//! | Field | Values |
//! |---|---|
//! | Minute | 0-59 |
//! | Hour | 0-23 |
//! | Day of month | 1-31 |
//! | Month | 1-12 |
//! | Day of week | 0-6 (Sunday = 0) |
//! | Year | 2000-2100 |
//!
//! Each field accepts `*`, numbers, `a-b` ranges and comma lists, any part
//! optionally followed by `/step`. Times are naive calendar values with
//! one-minute resolution; the caller decides what time zone they live in.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use cronwalk_schedule::CronEntry;
//!
//! // Every Monday at midnight
//! let entry = CronEntry::parse("0 0 * * 1 *").unwrap();
//!
//! let after = NaiveDate::from_ymd_opt(2024, 3, 15)
//!     .unwrap()
//!     .and_hms_opt(9, 30, 0)
//!     .unwrap();
//! let next = entry.next_trigger_after(after).unwrap();
//! let prev = entry.prev_trigger_before(after).unwrap();
//!
//! assert_eq!(next.to_string(), "2024-03-18 00:00:00");
//! assert_eq!(prev.to_string(), "2024-03-11 00:00:00");
//! ```
//!
//! ## Presets
//!
//! ```
//! use cronwalk_schedule::{CronEntry, CronPresets};
//!
//! let daily = CronEntry::parse(CronPresets::DAILY).unwrap();
//! assert_eq!(daily.to_string(), "0 0 * * * *");
//! ```
//!
//! ## Search limits
//!
//! Schedules that can never fire (the 31st of February, a year range in the
//! past) fail with [`CronError::UnreachableSchedule`] instead of looping.
//! The number of retries a query may take is set by [`SearchConfig`].
//!
//! ```
//! use cronwalk_schedule::{CronEntry, CronError, SearchConfig};
//!
//! let entry = CronEntry::parse("0 0 31 2 * *")
//!     .unwrap()
//!     .with_config(SearchConfig::from_env());
//! let err = entry.next_trigger().unwrap_err();
//! assert!(matches!(err, CronError::UnreachableSchedule { .. }));
//! ```

mod calendar;
pub mod config;
pub mod entry;
pub mod error;
pub mod field;
pub mod iter;
mod search;

pub use config::{MAX_SEARCH_STEPS_ENV, SearchConfig};
pub use entry::{CronEntry, CronPresets, FIELD_COUNT};
pub use error::{CronError, CronResult, ParseReason};
pub use field::{CronField, FieldKind};
pub use iter::Triggers;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::entry::{CronEntry, CronPresets};
    pub use crate::error::{CronError, CronResult};
    pub use crate::field::{CronField, FieldKind};
}
