//! # Frame Composition
//!
//! Runs every stage of the engine for one tick and collects the results into a
//! [`Frame`]: ordered draw lists the rendering surface paints in sequence.
//!
//! ## Paint Order
//! 1. Radial marks (hour, minute, second)
//! 2. Backdrop: a background-colored box exactly covering the time block, so
//!    a mark behind the digits never bleeds through
//! 3. Time digit glyphs and the colon
//! 4. Corner widgets
//! 5. Weekday letters
//!
//! Glyph lookups that fail are logged and dropped from the draw lists. The
//! layout was computed before any lookup, so the remaining glyphs keep their
//! positions.

use crate::atlas::{GlyphAtlas, SheetId, SizeClass, TIME_GLYPH_HEIGHT};
use crate::classify::{classify, TimeDigits};
use crate::config::ConfigFlags;
use crate::day_abbrev::{self, Anchor};
use crate::debug_cycle::DebugCycle;
use crate::layout::{compose_time, LayoutResult};
use crate::radial::{self, Hand, MarkVisibility, MARK_RADIUS};
use crate::widgets::{self, Corner, WidgetContent, WidgetContext, WidgetSpec, WidgetType};
use crate::{DateSample, Rect, ScreenBounds, SensorSample, TimeSample};
use log::{debug, warn};
use serde::Serialize;

/// Side of each square colon dot.
pub const COLON_DOT_SIZE: i32 = 4;

/// Everything sampled from the outside world for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TickInput {
    pub time: TimeSample,
    pub date: DateSample,
    pub sensors: SensorSample,
}

/// A time digit to blit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GlyphDraw {
    pub sheet: SheetId,
    pub size_class: SizeClass,
    pub value: u8,
    /// Cell within the sheet
    pub source: Rect,
    pub x: i32,
    pub y: i32,
}

/// Any other sprite cell to blit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpriteDraw {
    pub sheet: SheetId,
    pub source: Rect,
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MarkDraw {
    pub hand: Hand,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WidgetDraw {
    pub spec: WidgetSpec,
    pub sprites: Vec<SpriteDraw>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LetterDraw {
    pub letter: char,
    pub anchor: Anchor,
    pub sprite: SpriteDraw,
}

/// Draw lists for one tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub screen: ScreenBounds,
    pub dark_mode: bool,
    /// Samples the frame was built from, after any debug substitution
    pub input: TickInput,
    pub layout: LayoutResult,
    pub marks: Vec<MarkDraw>,
    pub backdrop: Rect,
    pub glyphs: Vec<GlyphDraw>,
    pub colon: Vec<Rect>,
    pub widgets: Vec<WidgetDraw>,
    pub letters: Vec<LetterDraw>,
}

/// Top edge of the vertically centered time block.
pub fn time_block_y(screen: ScreenBounds) -> i32 {
    (screen.height - TIME_GLYPH_HEIGHT).div_euclid(2)
}

/// The two colon dots for a colon slot whose left edge is `colon_x`.
pub fn colon_dots(colon_x: i32, y: i32) -> Vec<Rect> {
    vec![
        Rect::new(colon_x + 2, y + 4, COLON_DOT_SIZE, COLON_DOT_SIZE),
        Rect::new(colon_x + 2, y + 10, COLON_DOT_SIZE, COLON_DOT_SIZE),
    ]
}

fn widget_sprites(spec: &WidgetSpec, atlas: &impl GlyphAtlas) -> Vec<SpriteDraw> {
    match &spec.content {
        WidgetContent::Number(number) => number
            .glyphs
            .iter()
            .filter_map(|glyph| {
                let class = glyph.size_class();
                match atlas.glyph_rect(class, glyph.value) {
                    Ok(source) => Some(SpriteDraw {
                        sheet: SheetId::Digits(class),
                        source,
                        x: spec.x + glyph.x_offset,
                        y: spec.y,
                    }),
                    Err(e) => {
                        warn!("Skipping {:?} widget digit: {}", spec.widget_type, e);
                        None
                    }
                }
            })
            .collect(),
        WidgetContent::Frame { sheet, index } => match atlas.frame_rect(*sheet, *index) {
            Ok(source) => vec![SpriteDraw {
                sheet: *sheet,
                source,
                x: spec.x,
                y: spec.y,
            }],
            Err(e) => {
                warn!("Skipping {:?} widget: {}", spec.widget_type, e);
                Vec::new()
            }
        },
    }
}

/// Build the complete draw lists for one tick.
///
/// Pure: identical arguments always produce an identical frame.
pub fn compose_frame(
    input: &TickInput,
    config: &ConfigFlags,
    screen: ScreenBounds,
    atlas: &impl GlyphAtlas,
) -> Frame {
    // Digital readout
    let digits = TimeDigits::from_sample(&input.time, config.use_24h);
    let classes = classify(&digits, config.ruleset);
    let layout = compose_time(&digits, &classes, screen.width);
    let y = time_block_y(screen);

    let glyphs = layout
        .digits
        .iter()
        .filter_map(|slot| match atlas.glyph_rect(slot.size_class, slot.value) {
            Ok(source) => Some(GlyphDraw {
                sheet: SheetId::Digits(slot.size_class),
                size_class: slot.size_class,
                value: slot.value,
                source,
                x: layout.absolute_x(slot),
                y,
            }),
            Err(e) => {
                warn!("Skipping time digit {}: {}", slot.value, e);
                None
            }
        })
        .collect();

    let colon = layout
        .colon_offset
        .map(|offset| colon_dots(layout.start_x + offset, y))
        .unwrap_or_default();

    // Radial marks
    let visibility = MarkVisibility {
        hour_minute: config.show_hour_minute_dots,
        second: config.show_second_dot,
    };
    let marks = radial::marks(&input.time, screen, visibility)
        .in_draw_order()
        .map(|mark| MarkDraw {
            hand: mark.hand,
            x: mark.x,
            y: mark.y,
            radius: MARK_RADIUS,
        })
        .collect();

    // Corner widgets
    let ctx = WidgetContext {
        time: input.time,
        date: input.date,
        sensors: input.sensors,
        use_24h: config.use_24h,
        step_goal: config.step_goal,
    };
    let corners: [(Corner, WidgetType); 2] = [
        (Corner::TopLeft, config.top_left_widget),
        (Corner::TopRight, config.top_right_widget),
    ];
    let widgets = corners
        .into_iter()
        .filter_map(|(corner, widget_type)| widgets::resolve(widget_type, corner, &ctx, screen))
        .filter_map(|spec| {
            let sprites = widget_sprites(&spec, atlas);
            (!sprites.is_empty()).then_some(WidgetDraw { spec, sprites })
        })
        .collect();

    // Weekday letters
    let letters = day_abbrev::place(input.date.weekday, config.two_letter_day, screen)
        .into_iter()
        .filter_map(|placement| match atlas.letter_rect(placement.letter) {
            Ok(source) => Some(LetterDraw {
                letter: placement.letter,
                anchor: placement.anchor,
                sprite: SpriteDraw {
                    sheet: SheetId::Letters,
                    source,
                    x: placement.x,
                    y: placement.y,
                },
            }),
            Err(e) => {
                warn!("Skipping weekday letter: {}", e);
                None
            }
        })
        .collect();

    Frame {
        screen,
        dark_mode: config.dark_mode,
        input: *input,
        backdrop: layout.bounding_box(y, TIME_GLYPH_HEIGHT),
        layout,
        marks,
        glyphs,
        colon,
        widgets,
        letters,
    }
}

/// The face as driven by a periodic scheduler.
///
/// Owns the configuration record and the debug counter, the only state that
/// outlives a tick.
pub struct ClockFace<A: GlyphAtlas> {
    config: ConfigFlags,
    screen: ScreenBounds,
    atlas: A,
    debug: DebugCycle,
}

impl<A: GlyphAtlas> ClockFace<A> {
    pub fn new(config: ConfigFlags, screen: ScreenBounds, atlas: A) -> Self {
        Self {
            config: config.sanitized(),
            screen,
            atlas,
            debug: DebugCycle::new(),
        }
    }

    pub fn config(&self) -> &ConfigFlags {
        &self.config
    }

    pub fn debug_cycle(&self) -> &DebugCycle {
        &self.debug
    }

    /// Replace the whole configuration. Takes effect from the next tick.
    pub fn apply_config(&mut self, config: ConfigFlags) {
        debug!("Applying configuration {:?}", config);
        self.config = config.sanitized();
    }

    /// Compose the frame for one tick.
    ///
    /// In debug mode the sampled time and date are replaced by the current
    /// debug table entry and the counter advances.
    pub fn tick(&mut self, input: TickInput) -> Frame {
        let input = if self.config.debug_mode {
            let (time, date) = self.debug.samples();
            debug!(
                "Debug entry {}: {:02}:{:02} day {} month {} weekday {}",
                self.debug.counter(),
                time.hour,
                time.minute,
                date.day,
                date.month,
                date.weekday
            );
            self.debug.advance();
            TickInput {
                time,
                date,
                ..input
            }
        } else {
            input
        };

        let frame = compose_frame(&input, &self.config, self.screen, &self.atlas);
        debug!(
            "Frame: block {}px at x={}, {} glyphs, {} marks, {} widgets",
            frame.layout.total_width,
            frame.layout.start_x,
            frame.glyphs.len(),
            frame.marks.len(),
            frame.widgets.len()
        );
        frame
    }
}
