//! Mixed-width rendering of one- and two-digit date numbers.
//!
//! A leading 1, 2 or 3 is drawn from the half-width sheet so two-digit days
//! and months stay compact. Repeated digits (11, 22) keep both glyphs full
//! width so the pair reads as a matched set.

use crate::atlas::SizeClass;
use serde::Serialize;

/// Gap between the two glyphs of a number.
pub const DATE_DIGIT_SPACING: i32 = 2;

/// One glyph of a formatted number, positioned relative to the number's left edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateGlyph {
    pub value: u8,
    pub half: bool,
    pub x_offset: i32,
}

impl DateGlyph {
    pub fn size_class(&self) -> SizeClass {
        if self.half {
            SizeClass::DateHalf
        } else {
            SizeClass::DateFull
        }
    }

    pub fn width(&self) -> i32 {
        self.size_class().width()
    }
}

/// A number laid out as one or two date glyphs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MixedNumber {
    pub glyphs: Vec<DateGlyph>,
    /// Footprint from the first glyph's left edge to the last glyph's right edge
    pub width: i32,
}

impl MixedNumber {
    /// `(value, is_half)` per glyph, left to right.
    pub fn pairs(&self) -> Vec<(u8, bool)> {
        self.glyphs.iter().map(|g| (g.value, g.half)).collect()
    }

    pub fn height(&self) -> i32 {
        SizeClass::DateFull.height()
    }
}

/// Lay out a day-of-month or month number.
///
/// # Example
/// ```
/// use fiftyeight_lib::number_format::format_number;
///
/// let day = format_number(31);
/// assert_eq!(day.pairs(), vec![(3, true), (1, false)]);
/// assert_eq!(day.glyphs[1].x_offset, 12);
/// assert_eq!(day.width, 32);
/// ```
pub fn format_number(value: u8) -> MixedNumber {
    let mut glyphs = Vec::with_capacity(2);

    if value < 10 {
        glyphs.push(DateGlyph {
            value,
            half: false,
            x_offset: 0,
        });
    } else {
        let tens = (value / 10) % 10;
        let ones = value % 10;
        let half_tens = tens != ones && (1..=3).contains(&tens);

        let first = DateGlyph {
            value: tens,
            half: half_tens,
            x_offset: 0,
        };
        let second = DateGlyph {
            value: ones,
            half: false,
            x_offset: first.width() + DATE_DIGIT_SPACING,
        };
        glyphs.push(first);
        glyphs.push(second);
    }

    let width = glyphs
        .last()
        .map(|g| g.x_offset + g.width())
        .unwrap_or_default();

    MixedNumber { glyphs, width }
}
