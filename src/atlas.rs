//! # Glyph Atlas Addressing
//!
//! Glyph images live in sprite sheets owned by the platform. This module only
//! knows the *shape* of those sheets: which cell a digit, letter or indicator
//! frame occupies and how large each cell is. Loading and decoding the images
//! is the platform's job; it reports which sheets are available through the
//! [`GlyphAtlas`] trait.
//!
//! ## Sheet Layouts
//!
//! | Sheet                | Cell    | Grid (cols × rows) | Content                    |
//! |----------------------|---------|--------------------|----------------------------|
//! | `Digits(class)`      | class   | 3 × 4              | 1 2 3 / 4 5 6 / 7 8 9 / 0  |
//! | `Letters`            | 20 × 14 | 3 × 9              | A-Z, row major             |
//! | `AmPm`               | 20 × 14 | 1 × 2              | P, A                       |
//! | `Battery`            | 44 × 14 | 1 × 10             | full .. empty              |
//! | `Steps`              | 44 × 14 | 1 × 9              | none .. goal reached       |
//!
//! Digit `0` sits alone on the last row (row 3, column 0), so it is never
//! addressed as `(0 - 1)`.

use crate::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Width variant a digit glyph is drawn in.
///
/// The four time classes are named after how much visual weight they carry;
/// the two date classes serve the mixed-width numbers of the date widgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    /// Widest time digit
    Priority,
    Subpriority,
    Lesser,
    /// Narrowest time digit
    Least,
    /// Full-width date digit
    DateFull,
    /// Half-width date digit, used to compress a leading 1, 2 or 3
    DateHalf,
}

/// `(width, height)` per [`SizeClass`], indexed by discriminant.
const GLYPH_SIZES: [(i32, i32); 6] = [
    (40, 18), // Priority
    (30, 18), // Subpriority
    (20, 18), // Lesser
    (13, 18), // Least
    (20, 14), // DateFull
    (10, 14), // DateHalf
];

/// Height shared by all time digit classes.
pub const TIME_GLYPH_HEIGHT: i32 = 18;

/// Size of a weekday letter cell.
pub const LETTER_WIDTH: i32 = 20;
pub const LETTER_HEIGHT: i32 = 14;

/// Columns per row in every multi-column sheet.
pub const SPRITES_PER_ROW: i32 = 3;

impl SizeClass {
    pub const ALL: [SizeClass; 6] = [
        SizeClass::Priority,
        SizeClass::Subpriority,
        SizeClass::Lesser,
        SizeClass::Least,
        SizeClass::DateFull,
        SizeClass::DateHalf,
    ];

    pub const fn width(self) -> i32 {
        GLYPH_SIZES[self as usize].0
    }

    pub const fn height(self) -> i32 {
        GLYPH_SIZES[self as usize].1
    }
}

/// One sprite sheet the platform may provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetId {
    Digits(SizeClass),
    Letters,
    AmPm,
    Battery,
    Steps,
}

impl SheetId {
    /// Every sheet the face can draw from.
    pub fn all() -> impl Iterator<Item = SheetId> {
        SizeClass::ALL
            .into_iter()
            .map(SheetId::Digits)
            .chain([SheetId::Letters, SheetId::AmPm, SheetId::Battery, SheetId::Steps])
    }

    /// Size of a single cell.
    pub fn cell_size(self) -> (i32, i32) {
        match self {
            SheetId::Digits(class) => (class.width(), class.height()),
            SheetId::Letters | SheetId::AmPm => (LETTER_WIDTH, LETTER_HEIGHT),
            SheetId::Battery | SheetId::Steps => (44, 14),
        }
    }

    /// Cells per row and per column in the sheet as shipped.
    pub fn grid(self) -> (i32, i32) {
        match self {
            SheetId::Digits(_) => (SPRITES_PER_ROW, 4),
            SheetId::Letters => (SPRITES_PER_ROW, 9),
            SheetId::AmPm => (1, 2),
            SheetId::Battery => (1, 10),
            SheetId::Steps => (1, 9),
        }
    }

    /// Pixel size of a complete sheet.
    pub fn full_size(self) -> (i32, i32) {
        let (w, h) = self.cell_size();
        let (cols, rows) = self.grid();
        (w * cols, h * rows)
    }
}

/// Why a glyph could not be resolved. None of these abort a tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtlasError {
    /// The sheet is not loaded or reports a degenerate size
    #[error("sprite sheet {0:?} unavailable")]
    SheetMissing(SheetId),

    #[error("digit {0} has no glyph")]
    InvalidDigit(u8),

    #[error("letter {0:?} has no glyph")]
    InvalidLetter(char),

    /// The computed cell lies outside the sheet's reported size
    #[error("cell row {row}/{max_row}, col {col}/{max_col} outside sheet {sheet:?}")]
    OutOfBounds {
        sheet: SheetId,
        row: i32,
        col: i32,
        max_row: i32,
        max_col: i32,
    },
}

/// Cell `(row, col)` of a digit in a 3-column digit sheet.
pub fn digit_cell(value: u8) -> Option<(i32, i32)> {
    match value {
        0 => Some((3, 0)),
        1..=9 => {
            let index = value as i32 - 1;
            Some((index / SPRITES_PER_ROW, index % SPRITES_PER_ROW))
        }
        _ => None,
    }
}

/// Cell `(row, col)` of an ASCII letter in the letter sheet.
pub fn letter_cell(letter: char) -> Option<(i32, i32)> {
    let upper = letter.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() {
        return None;
    }
    let index = (upper as u8 - b'A') as i32;
    Some((index / SPRITES_PER_ROW, index % SPRITES_PER_ROW))
}

/// Read-only view of the sprite sheets the platform has loaded.
///
/// Implementors only report sheet sizes; the provided methods turn a glyph
/// request into a source rectangle and check it against that size.
pub trait GlyphAtlas {
    /// Pixel size of a loaded sheet, `None` when the sheet is absent.
    fn sheet_size(&self, sheet: SheetId) -> Option<(i32, i32)>;

    /// Source rectangle of cell `(row, col)`, bounds-checked against the sheet.
    fn cell_rect(&self, sheet: SheetId, row: i32, col: i32) -> Result<Rect, AtlasError> {
        let (sheet_w, sheet_h) = self
            .sheet_size(sheet)
            .filter(|&(w, h)| w > 0 && h > 0)
            .ok_or(AtlasError::SheetMissing(sheet))?;
        let (cell_w, cell_h) = sheet.cell_size();

        let max_col = sheet_w / cell_w;
        let max_row = sheet_h / cell_h;
        if row < 0 || col < 0 || col >= max_col || row >= max_row {
            return Err(AtlasError::OutOfBounds {
                sheet,
                row,
                col,
                max_row,
                max_col,
            });
        }

        Ok(Rect::new(col * cell_w, row * cell_h, cell_w, cell_h))
    }

    /// Source rectangle of a digit glyph in the given width class.
    fn glyph_rect(&self, class: SizeClass, value: u8) -> Result<Rect, AtlasError> {
        let (row, col) = digit_cell(value).ok_or(AtlasError::InvalidDigit(value))?;
        self.cell_rect(SheetId::Digits(class), row, col)
    }

    fn letter_rect(&self, letter: char) -> Result<Rect, AtlasError> {
        let (row, col) = letter_cell(letter).ok_or(AtlasError::InvalidLetter(letter))?;
        self.cell_rect(SheetId::Letters, row, col)
    }

    /// Source rectangle of frame `index` in a single-column indicator sheet.
    fn frame_rect(&self, sheet: SheetId, index: i32) -> Result<Rect, AtlasError> {
        self.cell_rect(sheet, index, 0)
    }
}

/// Sheet sizes registered by whoever loaded the images.
#[derive(Clone, Debug, Default)]
pub struct SheetCatalog {
    sizes: HashMap<SheetId, (i32, i32)>,
}

impl SheetCatalog {
    /// Catalog with nothing loaded; every glyph lookup reports a missing sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every sheet present at its shipped size.
    pub fn complete() -> Self {
        let mut catalog = Self::new();
        for sheet in SheetId::all() {
            let (w, h) = sheet.full_size();
            catalog.insert(sheet, w, h);
        }
        catalog
    }

    pub fn insert(&mut self, sheet: SheetId, width: i32, height: i32) {
        self.sizes.insert(sheet, (width, height));
    }

    pub fn remove(&mut self, sheet: SheetId) {
        self.sizes.remove(&sheet);
    }
}

impl GlyphAtlas for SheetCatalog {
    fn sheet_size(&self, sheet: SheetId) -> Option<(i32, i32)> {
        self.sizes.get(&sheet).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_class_has_one_width() {
        assert_eq!(SizeClass::Priority.width(), 40);
        assert_eq!(SizeClass::Subpriority.width(), 30);
        assert_eq!(SizeClass::Lesser.width(), 20);
        assert_eq!(SizeClass::Least.width(), 13);
        assert_eq!(SizeClass::DateFull.width(), 20);
        assert_eq!(SizeClass::DateHalf.width(), 10);
        assert_eq!(SizeClass::Priority.height(), TIME_GLYPH_HEIGHT);
    }

    #[test]
    fn test_digit_cells() {
        assert_eq!(digit_cell(0), Some((3, 0)));
        assert_eq!(digit_cell(1), Some((0, 0)));
        assert_eq!(digit_cell(3), Some((0, 2)));
        assert_eq!(digit_cell(4), Some((1, 0)));
        assert_eq!(digit_cell(9), Some((2, 2)));
        assert_eq!(digit_cell(10), None);
    }

    #[test]
    fn test_glyph_rect_in_complete_catalog() {
        let atlas = SheetCatalog::complete();

        let zero = atlas.glyph_rect(SizeClass::Priority, 0).unwrap();
        assert_eq!(zero, Rect::new(0, 54, 40, 18));

        let eight = atlas.glyph_rect(SizeClass::Least, 8).unwrap();
        assert_eq!(eight, Rect::new(13, 36, 13, 18));

        let half_three = atlas.glyph_rect(SizeClass::DateHalf, 3).unwrap();
        assert_eq!(half_three, Rect::new(20, 0, 10, 14));
    }

    #[test]
    fn test_missing_sheet_is_reported() {
        let mut atlas = SheetCatalog::complete();
        atlas.remove(SheetId::Digits(SizeClass::Lesser));

        assert_eq!(
            atlas.glyph_rect(SizeClass::Lesser, 5),
            Err(AtlasError::SheetMissing(SheetId::Digits(SizeClass::Lesser)))
        );
        // Other sheets are unaffected
        assert!(atlas.glyph_rect(SizeClass::Priority, 5).is_ok());
    }

    #[test]
    fn test_truncated_sheet_rejects_zero_row() {
        let mut atlas = SheetCatalog::new();
        // Only three rows shipped: 1-9 resolve, 0 does not
        atlas.insert(SheetId::Digits(SizeClass::Priority), 120, 54);

        assert!(atlas.glyph_rect(SizeClass::Priority, 9).is_ok());
        assert_eq!(
            atlas.glyph_rect(SizeClass::Priority, 0),
            Err(AtlasError::OutOfBounds {
                sheet: SheetId::Digits(SizeClass::Priority),
                row: 3,
                col: 0,
                max_row: 3,
                max_col: 3,
            })
        );
    }

    #[test]
    fn test_degenerate_sheet_counts_as_missing() {
        let mut atlas = SheetCatalog::new();
        atlas.insert(SheetId::AmPm, 0, 28);
        assert_eq!(
            atlas.frame_rect(SheetId::AmPm, 0),
            Err(AtlasError::SheetMissing(SheetId::AmPm))
        );
    }

    #[test]
    fn test_letters_and_frames() {
        let atlas = SheetCatalog::complete();
        assert_eq!(atlas.letter_rect('a').unwrap(), Rect::new(0, 0, 20, 14));
        assert_eq!(atlas.letter_rect('Z').unwrap(), Rect::new(20, 112, 20, 14));
        assert_eq!(atlas.letter_rect('?'), Err(AtlasError::InvalidLetter('?')));

        assert_eq!(
            atlas.frame_rect(SheetId::Battery, 9).unwrap(),
            Rect::new(0, 126, 44, 14)
        );
        assert!(atlas.frame_rect(SheetId::Steps, 9).is_err());
    }
}
