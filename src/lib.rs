//! # Fiftyeight Clock Face Core Library
//!
//! This library holds the layout and classification engine behind the
//! fiftyeight watchface. Given one time/date sample and a configuration record
//! it decides, every tick and from scratch:
//!
//! - which width class each digit of the time uses ([`classify`])
//! - how two-digit dates compress their leading digit ([`number_format`])
//! - the exact pixel geometry of the centered time block ([`layout`])
//! - where the hour, minute and second marks sit on the dial ([`radial`])
//! - how wide each corner widget is and where it anchors ([`widgets`])
//! - how a weekday abbreviation spreads over the bottom anchors ([`day_abbrev`])
//!
//! ## Design Philosophy
//!
//! ### Stateless Ticks
//! Every computation is a pure function of its inputs. The only state that
//! survives a tick is the caller-owned [`config::ConfigFlags`] and, in debug
//! mode, the [`debug_cycle::DebugCycle`] counter. Recomputing a tick with the
//! same inputs always yields the same [`face::Frame`].
//!
//! ### Bounded Work
//! A frame holds at most four time digits, three marks, two widgets and three
//! weekday letters. Nothing in a tick blocks or grows without bound.
//!
//! ### Degraded Frames Over Failures
//! Glyph images live in an external atlas. When a sheet is missing or a glyph
//! falls outside its sheet the draw is dropped and logged; the layout keeps
//! the space it reserved and the rest of the frame proceeds.
//!
//! ## Core Types
//!
//! - [`TimeSample`]: hour, minute and second of one tick
//! - [`DateSample`]: day of month, month and weekday of one tick
//! - [`SensorSample`]: battery and step readings supplied by the platform
//! - [`ScreenBounds`] and [`Rect`]: integer pixel geometry

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Module declarations
pub mod atlas;
pub mod classify;
pub mod config;
pub mod day_abbrev;
pub mod debug_cycle;
pub mod face;
pub mod fast_math;
pub mod layout;
pub mod number_format;
pub mod radial;
pub mod renderer;
pub mod widgets;

/// A sample field was outside its documented domain.
///
/// Raised at the collaborator boundary so the classification code never sees
/// out-of-range values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("hour {0} out of range 0..=23")]
    Hour(u8),
    #[error("minute {0} out of range 0..=59")]
    Minute(u8),
    #[error("second {0} out of range 0..=59")]
    Second(u8),
    #[error("day {0} out of range 1..=31")]
    Day(u8),
    #[error("month {0} out of range 1..=12")]
    Month(u8),
    #[error("weekday {0} out of range 0..=6")]
    Weekday(u8),
}

/// Wall-clock time of one tick.
///
/// # Example
/// ```
/// use fiftyeight_lib::TimeSample;
///
/// let t = TimeSample::new(21, 5, 30).unwrap();
/// assert!(t.is_pm());
/// assert_eq!(t.hour12(), 9);
/// assert_eq!(t.display_hour(true), 21);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSample {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
}

impl TimeSample {
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, SampleError> {
        if hour > 23 {
            return Err(SampleError::Hour(hour));
        }
        if minute > 59 {
            return Err(SampleError::Minute(minute));
        }
        if second > 59 {
            return Err(SampleError::Second(second));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Take the time of day from any chrono value.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            // Leap seconds are reported as 60 by some sources
            second: time.second().min(59) as u8,
        }
    }

    pub fn is_pm(&self) -> bool {
        self.hour >= 12
    }

    /// Hour on a 12-hour dial, 1-12 (midnight and noon both map to 12).
    pub fn hour12(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Hour as shown by the digital readout.
    pub fn display_hour(&self, use_24h: bool) -> u8 {
        if use_24h {
            self.hour
        } else {
            self.hour12()
        }
    }
}

/// Calendar date of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSample {
    /// Day of month, 1-31
    pub day: u8,
    /// Month, 1-12
    pub month: u8,
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
}

impl DateSample {
    pub fn new(day: u8, month: u8, weekday: u8) -> Result<Self, SampleError> {
        if !(1..=31).contains(&day) {
            return Err(SampleError::Day(day));
        }
        if !(1..=12).contains(&month) {
            return Err(SampleError::Month(month));
        }
        if weekday > 6 {
            return Err(SampleError::Weekday(weekday));
        }
        Ok(Self {
            day,
            month,
            weekday,
        })
    }

    /// Take the calendar date from any chrono value.
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            day: date.day() as u8,
            month: date.month() as u8,
            weekday: date.weekday().num_days_from_sunday() as u8,
        }
    }
}

/// Battery and health readings, acquired by the platform and handed in per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Charge, 0-100
    pub battery_percent: u8,
    /// Steps taken since the start of the day
    pub step_count: u32,
}

impl Default for SensorSample {
    fn default() -> Self {
        Self {
            battery_percent: 100,
            step_count: 0,
        }
    }
}

/// Pixel size of the drawable surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: i32,
    pub height: i32,
}

impl ScreenBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }
}

/// Axis-aligned integer rectangle in screen or atlas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
