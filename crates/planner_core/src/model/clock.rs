//! Twelve-hour clock values as entered through the time picker.
//!
//! # Responsibility
//! - Validate hour/minute/AM-PM input independently of any widget.
//! - Convert between the 12-hour picker form and stored 24-hour times.
//!
//! # Invariants
//! - `hour` is always within `1..=12`, `minute` within `0..=59`.
//! - PM with hour != 12 adds 12; AM with hour == 12 maps to 0; any other
//!   combination keeps the hour unchanged. The inverse is used for prefill.

use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static CLOCK_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s*:\s*(\d{1,2})\s*([AaPp][Mm])\s*$").expect("valid clock regex")
});

/// Clock input validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    InvalidHour(String),
    InvalidMinute(String),
    InvalidMeridiem(String),
    InvalidLabel(String),
}

impl Display for ClockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHour(value) => write!(f, "hour must be within 1..=12, got `{value}`"),
            Self::InvalidMinute(value) => {
                write!(f, "minute must be within 0..=59, got `{value}`")
            }
            Self::InvalidMeridiem(value) => write!(f, "expected AM or PM, got `{value}`"),
            Self::InvalidLabel(value) => {
                write!(f, "expected a time like `2:30 PM`, got `{value}`")
            }
        }
    }
}

impl Error for ClockError {}

/// AM/PM token of a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl FromStr for Meridiem {
    type Err = ClockError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            _ => Err(ClockError::InvalidMeridiem(value.to_string())),
        }
    }
}

/// A validated 12-hour clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl ClockTime {
    /// Builds a clock reading from numeric parts.
    ///
    /// # Errors
    /// - `InvalidHour` when `hour` is outside `1..=12`.
    /// - `InvalidMinute` when `minute` is outside `0..=59`.
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self, ClockError> {
        if !(1..=12).contains(&hour) {
            return Err(ClockError::InvalidHour(hour.to_string()));
        }
        if minute > 59 {
            return Err(ClockError::InvalidMinute(minute.to_string()));
        }
        Ok(Self {
            hour,
            minute,
            meridiem,
        })
    }

    /// Builds a clock reading from the picker's raw strings (`"02"`, `"30"`, `"PM"`).
    pub fn from_parts(hour: &str, minute: &str, meridiem: &str) -> Result<Self, ClockError> {
        let parsed_hour =
            picker_number(hour).ok_or_else(|| ClockError::InvalidHour(hour.to_string()))?;
        let parsed_minute =
            picker_number(minute).ok_or_else(|| ClockError::InvalidMinute(minute.to_string()))?;
        let meridiem = meridiem.parse::<Meridiem>()?;
        Self::new(parsed_hour, parsed_minute, meridiem)
    }

    /// Converts a 24-hour reading into the picker representation.
    pub fn from_24_hour(hour: u8, minute: u8) -> Result<Self, ClockError> {
        if hour > 23 {
            return Err(ClockError::InvalidHour(hour.to_string()));
        }
        let meridiem = if hour >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let hour_12 = match hour % 12 {
            0 => 12,
            other => other,
        };
        Self::new(hour_12, minute, meridiem)
    }

    /// Prefill helper for edit forms.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        let hour = time.hour() as u8;
        let minute = time.minute() as u8;
        let meridiem = if hour >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let hour_12 = match hour % 12 {
            0 => 12,
            other => other,
        };
        Self {
            hour: hour_12,
            minute,
            meridiem,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Returns `(hour, minute)` on a 24-hour clock.
    pub fn to_24_hour(self) -> (u8, u8) {
        let hour = match (self.meridiem, self.hour) {
            (Meridiem::Pm, hour) if hour != 12 => hour + 12,
            (Meridiem::Am, 12) => 0,
            (_, hour) => hour,
        };
        (hour, self.minute)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        let (hour, minute) = self.to_24_hour();
        NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0).unwrap_or_default()
    }

    /// `HH:MM` label on a 24-hour clock, as shown next to project tasks.
    pub fn label_24_hour(self) -> String {
        let (hour, minute) = self.to_24_hour();
        format!("{hour:02}:{minute:02}")
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:02} {}",
            self.hour,
            self.minute,
            self.meridiem.label()
        )
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    /// Parses labels such as `2:30 PM` or `12:05am`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let caps = CLOCK_LABEL_RE
            .captures(value)
            .ok_or_else(|| ClockError::InvalidLabel(value.to_string()))?;
        let hour = caps.get(1).map_or("", |m| m.as_str());
        let minute = caps.get(2).map_or("", |m| m.as_str());
        let meridiem = caps.get(3).map_or("", |m| m.as_str());
        Self::from_parts(hour, minute, meridiem)
    }
}

/// Picker fields carry plain ASCII digits only; signs and blanks are rejected.
fn picker_number(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
