//! Weekday abbreviation placement.
//!
//! The letters of the day name are spread over fixed anchors along the bottom
//! edge rather than set as a word: a two-letter name takes the left and right
//! anchors, a three-letter name adds the center one.

use crate::atlas::{LETTER_HEIGHT, LETTER_WIDTH};
use crate::ScreenBounds;
use serde::Serialize;

pub const LETTER_PADDING_SIDE: i32 = 10;
pub const LETTER_PADDING_BOTTOM: i32 = 10;

const THREE_LETTER: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
const TWO_LETTER: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LetterPlacement {
    pub letter: char,
    pub anchor: Anchor,
    pub x: i32,
    pub y: i32,
}

/// Abbreviation for a weekday (0 = Sunday). Values past 6 wrap.
pub fn abbreviation(weekday: u8, two_letter: bool) -> &'static str {
    let index = usize::from(weekday % 7);
    if two_letter {
        TWO_LETTER[index]
    } else {
        THREE_LETTER[index]
    }
}

pub fn anchor_x(anchor: Anchor, screen: ScreenBounds) -> i32 {
    match anchor {
        Anchor::Left => LETTER_PADDING_SIDE,
        Anchor::Center => (screen.width - LETTER_WIDTH).div_euclid(2),
        Anchor::Right => screen.width - LETTER_WIDTH - LETTER_PADDING_SIDE,
    }
}

/// Anchors used by an abbreviation of `len` letters, left to right.
fn anchors_for(len: usize) -> &'static [Anchor] {
    match len {
        2 => &[Anchor::Left, Anchor::Right],
        3 => &[Anchor::Left, Anchor::Center, Anchor::Right],
        _ => &[],
    }
}

/// Place each letter of the weekday's abbreviation on its anchor.
pub fn place(weekday: u8, two_letter: bool, screen: ScreenBounds) -> Vec<LetterPlacement> {
    let name = abbreviation(weekday, two_letter);
    let y = screen.height - LETTER_HEIGHT - LETTER_PADDING_BOTTOM;

    name.chars()
        .zip(anchors_for(name.len()))
        .map(|(letter, &anchor)| LetterPlacement {
            letter,
            anchor,
            x: anchor_x(anchor, screen),
            y,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenBounds = ScreenBounds {
        width: 144,
        height: 168,
    };

    #[test]
    fn test_abbreviations() {
        assert_eq!(abbreviation(0, false), "SUN");
        assert_eq!(abbreviation(3, true), "WE");
        assert_eq!(abbreviation(6, false), "SAT");
        assert_eq!(abbreviation(7, false), "SUN");
    }

    #[test]
    fn test_three_letter_split() {
        let letters = place(1, false, SCREEN);
        let summary: Vec<(char, Anchor, i32)> =
            letters.iter().map(|l| (l.letter, l.anchor, l.x)).collect();
        assert_eq!(
            summary,
            vec![
                ('M', Anchor::Left, 10),
                ('O', Anchor::Center, 62),
                ('N', Anchor::Right, 114),
            ]
        );
        assert!(letters.iter().all(|l| l.y == 144));
    }

    #[test]
    fn test_two_letter_split_skips_center() {
        let letters = place(4, true, SCREEN);
        assert_eq!(letters.len(), 2);
        assert_eq!((letters[0].letter, letters[0].anchor), ('T', Anchor::Left));
        assert_eq!((letters[1].letter, letters[1].anchor), ('H', Anchor::Right));
    }

    #[test]
    fn test_every_weekday_places_all_letters() {
        for weekday in 0..7 {
            assert_eq!(place(weekday, false, SCREEN).len(), 3);
            assert_eq!(place(weekday, true, SCREEN).len(), 2);
        }
    }
}
