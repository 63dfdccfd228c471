//! Weekly time gate for the unmatched-items report.
//!
//! A gate is a set of (weekday, hour) slots in UTC. It is open for every
//! timestamp whose weekday and hour equal one of the slots; there is no
//! tolerance around the hour boundary.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single recurring UTC hour, e.g. Monday 01:00-01:59
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub weekday: Weekday,
    pub hour: u32,
}

impl ScheduleSlot {
    /// The slot a timestamp falls into
    pub fn of(now: DateTime<Utc>) -> Self {
        Self {
            weekday: now.weekday(),
            hour: now.hour(),
        }
    }
}

impl fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}", self.weekday, self.hour)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeeklyGate {
    slots: HashSet<ScheduleSlot>,
}

impl WeeklyGate {
    pub fn new(slots: impl IntoIterator<Item = ScheduleSlot>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.slots.contains(&ScheduleSlot::of(now))
    }
}
