//! Task data structures and the time-of-day format they use.
//!
//! A task is scheduled at a 12-hour clock time written `H:MM AM` or `H:MM PM`.
//! [`ClockTime`] is the strict parser for that format; it orders times on a
//! 24-hour clock so the auto-complete sweep can compare them directly.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::{Category, Priority};

/// A single entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    /// Scheduled time, normally in `H:MM AM|PM` form.
    pub time: String,
    pub priority: Priority,
    pub category: Category,
    pub completed: bool,
}

/// Raw form input for creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub time: String,
    pub priority: Priority,
    pub category: Category,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            time: String::new(),
            priority: Priority::Medium,
            category: Category::Personal,
        }
    }
}

impl TaskDraft {
    /// Pre-fill a draft from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            time: task.time.clone(),
            priority: task.priority,
            category: task.category,
        }
    }

    /// Check the required fields and normalise them.
    ///
    /// Title and time are trimmed; the time must parse as a [`ClockTime`].
    pub fn validate(&self) -> Result<NewTask, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.time.trim().is_empty() {
            return Err(ValidationError::EmptyTime);
        }
        let time = self.time.parse::<ClockTime>()?;
        Ok(NewTask {
            title: title.to_string(),
            time,
            priority: self.priority,
            category: self.category,
        })
    }
}

/// Validated task input accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub time: ClockTime,
    pub priority: Priority,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task title is required")]
    EmptyTitle,
    #[error("Time is required")]
    EmptyTime,
    #[error(transparent)]
    InvalidTime(#[from] TimeParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a time like 3:30 PM, got '{0}'")]
pub struct TimeParseError(pub String);

/// Time of day at minute resolution, held on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Build from a 24-hour `hour` (0-23) and `minute` (0-59).
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(t: NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    /// Parse `H:MM AM` / `H:MM PM` (meridiem case-insensitive, hour 1-12).
    ///
    /// 12 AM is hour 0, 12 PM stays 12, other PM hours add 12.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeParseError(s.to_string());
        let (clock, meridiem) = s.trim().split_once(' ').ok_or_else(err)?;
        let pm = match meridiem.to_ascii_uppercase().as_str() {
            "AM" => false,
            "PM" => true,
            _ => return Err(err()),
        };
        let (hour_str, minute_str) = clock.split_once(':').ok_or_else(err)?;
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hour_str) || hour_str.len() > 2 || minute_str.len() != 2 || !all_digits(minute_str) {
            return Err(err());
        }
        let hour: u8 = hour_str.parse().map_err(|_| err())?;
        let minute: u8 = minute_str.parse().map_err(|_| err())?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(err());
        }
        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, meridiem) = match self.hour {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{}:{:02} {}", hour, self.minute, meridiem)
    }
}
