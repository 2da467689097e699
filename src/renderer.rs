//! # Frame Rendering
//!
//! Paints a composed [`Frame`] onto any embedded-graphics `DrawTarget` with
//! binary color, and provides an in-memory [`AsciiCanvas`] for previewing the
//! face in a terminal during development.
//!
//! The atlas only reports sheet geometry, so sprite draws are painted as the
//! outline of their destination cell. Marks, the backdrop and the colon are
//! solid primitives and come out exactly as a device would show them.

use crate::face::Frame;
use crate::Rect;
use core::convert::Infallible;
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
};

/// Pixels per terminal character, horizontally and vertically.
const ASCII_CELL_WIDTH: i32 = 2;
const ASCII_CELL_HEIGHT: i32 = 4;

/// Ink and paper colors for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub foreground: BinaryColor,
    pub background: BinaryColor,
}

impl Theme {
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme {
                foreground: BinaryColor::Off,
                background: BinaryColor::On,
            }
        } else {
            Theme {
                foreground: BinaryColor::On,
                background: BinaryColor::Off,
            }
        }
    }
}

fn to_rectangle(rect: &Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x, rect.y),
        Size::new(rect.width.max(0) as u32, rect.height.max(0) as u32),
    )
}

fn sprite_cell(x: i32, y: i32, source: &Rect) -> Rectangle {
    to_rectangle(&Rect::new(x, y, source.width, source.height))
}

/// Paint a frame in its documented order: marks, backdrop, time glyphs,
/// colon, widgets, weekday letters.
pub fn draw_frame<D>(frame: &Frame, display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let theme = Theme::for_mode(frame.dark_mode);
    let fill = PrimitiveStyle::with_fill(theme.foreground);
    let outline = PrimitiveStyle::with_stroke(theme.foreground, 1);

    display.clear(theme.background)?;

    for mark in &frame.marks {
        Circle::with_center(Point::new(mark.x, mark.y), (mark.radius * 2) as u32)
            .into_styled(fill)
            .draw(display)?;
    }

    // Marks passing behind the digits are hidden
    to_rectangle(&frame.backdrop)
        .into_styled(PrimitiveStyle::with_fill(theme.background))
        .draw(display)?;

    for glyph in &frame.glyphs {
        sprite_cell(glyph.x, glyph.y, &glyph.source)
            .into_styled(outline)
            .draw(display)?;
    }

    for dot in &frame.colon {
        to_rectangle(dot).into_styled(fill).draw(display)?;
    }

    for widget in &frame.widgets {
        for sprite in &widget.sprites {
            sprite_cell(sprite.x, sprite.y, &sprite.source)
                .into_styled(outline)
                .draw(display)?;
        }
    }

    for letter in &frame.letters {
        sprite_cell(letter.sprite.x, letter.sprite.y, &letter.sprite.source)
            .into_styled(outline)
            .draw(display)?;
    }

    Ok(())
}

/// Framebuffer held in memory, printable as text.
pub struct AsciiCanvas {
    size: Size,
    pixels: Vec<BinaryColor>,
}

impl AsciiCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        AsciiCanvas {
            size: Size::new(width, height),
            pixels: vec![BinaryColor::Off; width as usize * height as usize],
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        let (w, h) = (self.size.width as usize, self.size.height as usize);
        if x >= w || y >= h {
            return None;
        }
        Some(y * w + x)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        self.index(Point::new(x, y)).map(|i| self.pixels[i])
    }

    /// Downsample to text, one character per 2x4 pixel block, shaded by how
    /// many of its pixels are on.
    pub fn to_ascii(&self) -> String {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        let cells = ASCII_CELL_WIDTH * ASCII_CELL_HEIGHT;
        let mut out = String::new();

        for row in (0..h).step_by(ASCII_CELL_HEIGHT as usize) {
            for col in (0..w).step_by(ASCII_CELL_WIDTH as usize) {
                let lit = (0..ASCII_CELL_HEIGHT)
                    .flat_map(|dy| (0..ASCII_CELL_WIDTH).map(move |dx| (col + dx, row + dy)))
                    .filter(|&(x, y)| self.pixel(x, y) == Some(BinaryColor::On))
                    .count() as i32;

                out.push(match lit {
                    0 => ' ',
                    n if n == cells => '#',
                    n if n * 2 >= cells => '+',
                    _ => '.',
                });
            }
            out.push('\n');
        }
        out
    }
}

impl OriginDimensions for AsciiCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for AsciiCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Off-screen pixels are clipped
            if let Some(i) = self.index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}

/// Paint a frame into a fresh canvas of the frame's screen size.
pub fn render_canvas(frame: &Frame) -> AsciiCanvas {
    let mut canvas = AsciiCanvas::new(
        frame.screen.width.max(0) as u32,
        frame.screen.height.max(0) as u32,
    );
    draw_frame(frame, &mut canvas).unwrap_or_else(|never| match never {});
    canvas
}

/// Render a frame as terminal text.
pub fn draw_ascii(frame: &Frame) -> String {
    render_canvas(frame).to_ascii()
}
