use chrono::{NaiveDate, NaiveTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

const TIME_FORMAT: &str = "%H:%M";

/// Time-of-day key of a slot, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    pub fn from_minutes(minutes_since_midnight: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(minutes_since_midnight / 60, minutes_since_midnight % 60, 0)
            .map(Self)
    }

    /// 12-hour clock rendering used in notices, e.g. `9:30 AM`.
    pub fn display_12h(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not an HH:MM slot key")]
pub struct SlotTimeError(String);

impl FromStr for SlotTime {
    type Err = SlotTimeError;

    /// Only canonical keys are accepted: `09:00` parses, `9:0` does not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let time = NaiveTime::parse_from_str(key, TIME_FORMAT)
            .map(Self)
            .map_err(|_| SlotTimeError(key.to_owned()))?;
        if time.to_string() != key {
            return Err(SlotTimeError(key.to_owned()));
        }
        Ok(time)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Available,
    Booked,
}

/// One bookable interval. `booked_by` and `purpose` are set exactly when the
/// slot is `Booked`; only `ScheduleState` mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: SlotTime,
    pub status: SlotStatus,
    pub booked_by: Option<String>,
    pub purpose: Option<String>,
}

impl Slot {
    pub fn available(time: SlotTime) -> Self {
        Self {
            time,
            status: SlotStatus::Available,
            booked_by: None,
            purpose: None,
        }
    }

    pub fn is_booked(&self) -> bool {
        self.status == SlotStatus::Booked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledRecord {
    pub date: NaiveDate,
    pub time: SlotTime,
    pub name: String,
    pub purpose: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("slot length must be greater than zero minutes")]
    ZeroStep,
    #[error("end hour {0} lies beyond the end of the day")]
    EndHourOutOfRange(u32),
    #[error("start hour {start} must be before end hour {end}")]
    EmptyWorkingDay { start: u32, end: u32 },
    #[error("slot length of {step} minutes exceeds the {working_minutes} minute working day")]
    StepExceedsWorkingDay { step: u32, working_minutes: u32 },
}

/// Working hours `[start_hour, end_hour)` split into `step_minutes` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub step_minutes: u32,
}

impl ScheduleConfig {
    pub fn new(start_hour: u32, end_hour: u32, step_minutes: u32) -> Result<Self, ConfigurationError> {
        if step_minutes == 0 {
            return Err(ConfigurationError::ZeroStep);
        }
        if end_hour > 24 {
            return Err(ConfigurationError::EndHourOutOfRange(end_hour));
        }
        if start_hour >= end_hour {
            return Err(ConfigurationError::EmptyWorkingDay {
                start: start_hour,
                end: end_hour,
            });
        }
        let working_minutes = (end_hour - start_hour) * 60;
        if step_minutes > working_minutes {
            return Err(ConfigurationError::StepExceedsWorkingDay {
                step: step_minutes,
                working_minutes,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
            step_minutes,
        })
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            step_minutes: 30,
        }
    }
}
