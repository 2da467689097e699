//! # Time Block Layout
//!
//! Turns classified digits into absolute x positions and centers the block.
//!
//! ```text
//!  start_x
//!  |<-- hour tens -->|2|<-- hour ones -->|2|: 8 :|2|<-- min tens -->|2|<-- min ones -->|
//!  |<------------------------------- total_width --------------------------------------->|
//! ```
//!
//! The hour tens slot is absent when its digit is zero, taking no width and no
//! spacing with it. The colon always sits between the hour and minute groups.

use crate::atlas::SizeClass;
use crate::classify::{DigitClasses, TimeDigits};
use crate::Rect;
use serde::Serialize;

/// Horizontal gap between adjacent slots.
pub const DIGIT_SPACING: i32 = 2;

/// Width reserved for the colon.
pub const COLON_WIDTH: i32 = 8;

/// What occupies a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SlotKind {
    Digit { value: u8, class: SizeClass },
    Colon,
}

/// One position in the readout, before placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub kind: SlotKind,
    /// Absent slots contribute neither width nor spacing
    pub present: bool,
}

impl Slot {
    pub fn digit(value: u8, class: SizeClass) -> Self {
        Self {
            kind: SlotKind::Digit { value, class },
            present: true,
        }
    }

    pub fn colon() -> Self {
        Self {
            kind: SlotKind::Colon,
            present: true,
        }
    }

    pub fn width(&self) -> i32 {
        match self.kind {
            SlotKind::Digit { class, .. } => class.width(),
            SlotKind::Colon => COLON_WIDTH,
        }
    }
}

/// A placed digit. `x_offset` is relative to [`LayoutResult::start_x`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DigitSlot {
    pub value: u8,
    pub size_class: SizeClass,
    pub x_offset: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutResult {
    /// Left edge of the block on screen
    pub start_x: i32,
    pub total_width: i32,
    /// Present digits, left to right
    pub digits: Vec<DigitSlot>,
    /// Colon offset relative to `start_x`, if a colon slot was present
    pub colon_offset: Option<i32>,
}

impl LayoutResult {
    pub fn absolute_x(&self, slot: &DigitSlot) -> i32 {
        self.start_x + slot.x_offset
    }

    /// Box covering the whole block when its top edge is at `y`.
    pub fn bounding_box(&self, y: i32, height: i32) -> Rect {
        Rect::new(self.start_x, y, self.total_width, height)
    }
}

/// Place slots left to right and center them on a surface `screen_width` wide.
///
/// `total_width` is the sum of present slot widths plus one [`DIGIT_SPACING`]
/// between each pair of neighbours. `start_x` is floored, so an odd leftover
/// pixel lands on the right.
pub fn compose(slots: &[Slot], screen_width: i32) -> LayoutResult {
    let mut digits = Vec::with_capacity(slots.len());
    let mut colon_offset = None;
    let mut cursor = 0;

    for (index, slot) in slots.iter().filter(|s| s.present).enumerate() {
        if index > 0 {
            cursor += DIGIT_SPACING;
        }
        match slot.kind {
            SlotKind::Digit { value, class } => digits.push(DigitSlot {
                value,
                size_class: class,
                x_offset: cursor,
            }),
            SlotKind::Colon => colon_offset = Some(cursor),
        }
        cursor += slot.width();
    }

    LayoutResult {
        start_x: (screen_width - cursor).div_euclid(2),
        total_width: cursor,
        digits,
        colon_offset,
    }
}

/// Slots of the time readout in declaration order.
pub fn time_slots(digits: &TimeDigits, classes: &DigitClasses) -> [Slot; 5] {
    [
        Slot {
            present: digits.has_hour_tens(),
            ..Slot::digit(digits.hour_tens, classes.hour_tens)
        },
        Slot::digit(digits.hour_ones, classes.hour_ones),
        Slot::colon(),
        Slot::digit(digits.minute_tens, classes.minute_tens),
        Slot::digit(digits.minute_ones, classes.minute_ones),
    ]
}

pub fn compose_time(digits: &TimeDigits, classes: &DigitClasses, screen_width: i32) -> LayoutResult {
    compose(&time_slots(digits, classes), screen_width)
}
