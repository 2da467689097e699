//! # Radial Marks
//!
//! Places the hour, minute and second dots on a fixed circle around the
//! screen center. Angle zero is 12 o'clock and angles grow clockwise, which in
//! screen coordinates (y down) means every angle is offset by `-π/2`.
//!
//! Positions come from [`crate::fast_math`] and are rounded to the nearest
//! pixel, so a mark lies within [`POSITION_TOLERANCE`] of the true circle.

use crate::fast_math::{self, FRAC_PI_2, TAU};
use crate::{ScreenBounds, TimeSample};
use serde::Serialize;

/// Radius of the circle the marks travel on.
pub const DIAL_RADIUS: i32 = 50;

/// Radius of each drawn dot.
pub const MARK_RADIUS: i32 = 4;

/// Worst-case distance, in pixels, between a mark and the ideal circle:
/// half a pixel diagonal of rounding plus the sine error scaled by the radius.
pub const POSITION_TOLERANCE: f32 =
    0.75 + fast_math::SIN_MAX_ERROR * 2.0 * DIAL_RADIUS as f32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RadialMark {
    pub hand: Hand,
    /// Screen angle in radians
    pub angle: f32,
    pub x: i32,
    pub y: i32,
}

/// The marks of one tick. A hand is `None` when configuration hides it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RadialMarks {
    pub hour: Option<RadialMark>,
    pub minute: Option<RadialMark>,
    pub second: Option<RadialMark>,
}

impl RadialMarks {
    /// Marks in paint order: hour, minute, then second, so later hands win
    /// where they overlap.
    pub fn in_draw_order(&self) -> impl Iterator<Item = &RadialMark> {
        [&self.hour, &self.minute, &self.second]
            .into_iter()
            .flatten()
    }
}

/// Which hands to compute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkVisibility {
    pub hour_minute: bool,
    pub second: bool,
}

pub fn second_angle(second: u8) -> f32 {
    (second as f32 / 60.0) * TAU - FRAC_PI_2
}

pub fn minute_angle(minute: u8) -> f32 {
    (minute as f32 / 60.0) * TAU - FRAC_PI_2
}

/// Hour hand angle, advanced smoothly by the minutes.
pub fn hour_angle(time: &TimeSample) -> f32 {
    let hour = time.hour12() as f32 + time.minute as f32 / 60.0;
    (hour / 12.0) * TAU - FRAC_PI_2
}

/// Point on a circle of `radius` around `center` at `angle`.
pub fn mark_at(hand: Hand, angle: f32, center: (i32, i32), radius: i32) -> RadialMark {
    let r = radius as f32;
    RadialMark {
        hand,
        angle,
        x: center.0 + fast_math::round(r * fast_math::cos(angle)) as i32,
        y: center.1 + fast_math::round(r * fast_math::sin(angle)) as i32,
    }
}

/// Compute the visible marks for one time sample.
pub fn marks(time: &TimeSample, screen: ScreenBounds, visibility: MarkVisibility) -> RadialMarks {
    let center = screen.center();
    let place = |hand, angle| mark_at(hand, angle, center, DIAL_RADIUS);

    RadialMarks {
        hour: visibility
            .hour_minute
            .then(|| place(Hand::Hour, hour_angle(time))),
        minute: visibility
            .hour_minute
            .then(|| place(Hand::Minute, minute_angle(time.minute))),
        second: visibility
            .second
            .then(|| place(Hand::Second, second_angle(time.second))),
    }
}
