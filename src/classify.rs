//! # Digit Width Classification
//!
//! Picks a [`SizeClass`] for each digit of the time readout. The hour is the
//! visual anchor of the face, so a single-digit hour gets the widest glyph
//! and two-digit hours are narrowed to keep the block on screen.
//!
//! Two rule tables are supported, selected by [`Ruleset`]:
//!
//! ### Refined (default)
//! | Case                          | Hour tens   | Hour ones   | Minute tens | Minute ones |
//! |-------------------------------|-------------|-------------|-------------|-------------|
//! | hour 1-9                      | (omitted)   | Priority    | see below   | see below   |
//! | hour 10, 12-23                | Least       | Priority    |             |             |
//! | hour 11                       | Subpriority | Subpriority |             |             |
//! | minutes 01-09                 |             |             | Lesser      | Subpriority |
//! | any other minute              |             |             | Subpriority | Subpriority |
//!
//! ### Compact
//! | Case            | Hour tens   | Hour ones   | Minute tens | Minute ones |
//! |-----------------|-------------|-------------|-------------|-------------|
//! | hour 0-9        | (omitted)   | Priority    | Subpriority | Subpriority |
//! | hour 11         | Subpriority | Subpriority | Least       | Least       |
//! | other two-digit | Lesser      | Lesser      | Least       | Least       |
//!
//! Both tables are total over hours 0-23 and minutes 0-59.

use crate::atlas::SizeClass;
use crate::TimeSample;
use serde::{Deserialize, Serialize};

/// Which digit rule table to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ruleset {
    #[default]
    Refined,
    Compact,
}

/// The four digits of the readout, after 12/24-hour conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TimeDigits {
    pub hour_tens: u8,
    pub hour_ones: u8,
    pub minute_tens: u8,
    pub minute_ones: u8,
}

impl TimeDigits {
    /// Split a displayed hour (0-23) and minute into digits.
    pub fn new(display_hour: u8, minute: u8) -> Self {
        Self {
            hour_tens: display_hour / 10,
            hour_ones: display_hour % 10,
            minute_tens: minute / 10,
            minute_ones: minute % 10,
        }
    }

    /// Digits as the readout shows them in the given clock mode.
    pub fn from_sample(time: &TimeSample, use_24h: bool) -> Self {
        Self::new(time.display_hour(use_24h), time.minute)
    }

    /// The hour tens digit is dropped from the layout when it is zero.
    pub fn has_hour_tens(&self) -> bool {
        self.hour_tens != 0
    }
}

/// Width class chosen for each digit position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DigitClasses {
    pub hour_tens: SizeClass,
    pub hour_ones: SizeClass,
    pub minute_tens: SizeClass,
    pub minute_ones: SizeClass,
}

impl DigitClasses {
    /// Classes in readout order: hour tens, hour ones, minute tens, minute ones.
    pub fn as_array(&self) -> [SizeClass; 4] {
        [
            self.hour_tens,
            self.hour_ones,
            self.minute_tens,
            self.minute_ones,
        ]
    }
}

/// Classify every digit of the readout.
///
/// Pure and total: the same digits and ruleset always give the same classes.
pub fn classify(digits: &TimeDigits, ruleset: Ruleset) -> DigitClasses {
    match ruleset {
        Ruleset::Refined => classify_refined(digits),
        Ruleset::Compact => classify_compact(digits),
    }
}

fn classify_refined(d: &TimeDigits) -> DigitClasses {
    let (hour_tens, hour_ones) = match (d.hour_tens, d.hour_ones) {
        (0, _) => (SizeClass::Priority, SizeClass::Priority),
        (1, 1) => (SizeClass::Subpriority, SizeClass::Subpriority),
        (_, _) => (SizeClass::Least, SizeClass::Priority),
    };

    let (minute_tens, minute_ones) = if d.minute_tens == 0 && d.minute_ones > 0 {
        (SizeClass::Lesser, SizeClass::Subpriority)
    } else {
        (SizeClass::Subpriority, SizeClass::Subpriority)
    };

    DigitClasses {
        hour_tens,
        hour_ones,
        minute_tens,
        minute_ones,
    }
}

fn classify_compact(d: &TimeDigits) -> DigitClasses {
    if d.hour_tens == 0 {
        return DigitClasses {
            hour_tens: SizeClass::Priority,
            hour_ones: SizeClass::Priority,
            minute_tens: SizeClass::Subpriority,
            minute_ones: SizeClass::Subpriority,
        };
    }

    let hour = if d.hour_tens == 1 && d.hour_ones == 1 {
        SizeClass::Subpriority
    } else {
        SizeClass::Lesser
    };

    DigitClasses {
        hour_tens: hour,
        hour_ones: hour,
        minute_tens: SizeClass::Least,
        minute_ones: SizeClass::Least,
    }
}
