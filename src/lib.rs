// cronwalk - six-field cron expressions and trigger search
//
// The facade re-exports the schedule crate at the top level and the logging
// crate as `cronwalk::log`.

// Re-export the schedule API
pub use cronwalk_schedule::*;

// Logging macros and runtime level control
pub use cronwalk_log as log;

// Calendar types used throughout the API
pub use chrono;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CronEntry, CronError, CronField, CronPresets, CronResult, FieldKind, SearchConfig,
        Triggers,
    };
    pub use chrono::{NaiveDate, NaiveDateTime};
}
