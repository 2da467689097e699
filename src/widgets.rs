//! # Corner Widgets
//!
//! Small indicators anchored to the two top corners of the face. A widget in
//! the right corner is right-aligned, so its width must be known before it can
//! be placed. Width and drawable content come from one function,
//! [`widget_content`], and both the positioning pass and the drawing pass read
//! from its result. That keeps the anchor and the painted footprint from
//! drifting apart.
//!
//! | Widget      | Width                        | Content                          |
//! |-------------|------------------------------|----------------------------------|
//! | `MonthDate` | mixed-width month number     | date glyphs                      |
//! | `DayDate`   | mixed-width day number       | date glyphs                      |
//! | `AmPm`      | 20 px (hidden in 24h mode)   | frame 0 = PM, 1 = AM             |
//! | `Battery`   | 44 px                        | frame 0 (full) .. 9 (empty)      |
//! | `Steps`     | 44 px                        | frame 0 .. 8 (goal reached)      |
//! | `None`      | 0 px, nothing drawn          |                                  |

use crate::atlas::SheetId;
use crate::number_format::{format_number, MixedNumber};
use crate::{DateSample, ScreenBounds, SensorSample, TimeSample};
use serde::{Deserialize, Deserializer, Serialize};

pub const WIDGET_PADDING_TOP: i32 = 10;
pub const WIDGET_PADDING_SIDE: i32 = 10;

pub const AM_PM_WIDTH: i32 = 20;
pub const INDICATOR_WIDTH: i32 = 44;

/// Number of frames in the battery sheet.
pub const BATTERY_FRAMES: i32 = 10;
/// Number of frames in the step progress sheet.
pub const STEP_FRAMES: i32 = 9;

/// Widget selectable for a corner. Unknown names deserialize as `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    #[default]
    None,
    MonthDate,
    DayDate,
    AmPm,
    Battery,
    Steps,
}

impl WidgetType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "month_date" => WidgetType::MonthDate,
            "day_date" => WidgetType::DayDate,
            "am_pm" => WidgetType::AmPm,
            "battery" => WidgetType::Battery,
            "steps" => WidgetType::Steps,
            _ => WidgetType::None,
        }
    }
}

impl<'de> Deserialize<'de> for WidgetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(WidgetType::from_name(&name))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
}

/// Everything a widget may read during one tick.
#[derive(Clone, Copy, Debug)]
pub struct WidgetContext {
    pub time: TimeSample,
    pub date: DateSample,
    pub sensors: SensorSample,
    pub use_24h: bool,
    pub step_goal: u32,
}

/// What a widget paints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetContent {
    /// A date number drawn from the date digit sheets
    Number(MixedNumber),
    /// A single frame of a one-column indicator sheet
    Frame { sheet: SheetId, index: i32 },
}

impl WidgetContent {
    pub fn width(&self) -> i32 {
        match self {
            WidgetContent::Number(number) => number.width,
            WidgetContent::Frame { sheet, .. } => sheet.cell_size().0,
        }
    }

    pub fn height(&self) -> i32 {
        match self {
            WidgetContent::Number(number) => number.height(),
            WidgetContent::Frame { sheet, .. } => sheet.cell_size().1,
        }
    }
}

/// A widget with its footprint resolved and its anchor placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WidgetSpec {
    pub widget_type: WidgetType,
    pub corner: Corner,
    pub width: i32,
    pub x: i32,
    pub y: i32,
    pub content: WidgetContent,
}

/// Battery frame for a charge level, in 10 % buckets from full to empty.
pub fn battery_frame(percent: u8) -> i32 {
    (BATTERY_FRAMES - 1) - i32::from(percent.min(99) / 10)
}

/// Step progress frame: one frame per ninth of the goal, the last frame once
/// the goal is reached.
pub fn steps_frame(steps: u32, goal: u32) -> i32 {
    if steps >= goal {
        return STEP_FRAMES - 1;
    }

    let (steps, goal) = (u64::from(steps), u64::from(goal));
    (1..STEP_FRAMES as u64)
        .rev()
        .find(|&ninth| steps >= goal * ninth / 9)
        .map_or(0, |ninth| ninth as i32 - 1)
}

/// The content a widget would paint this tick, or `None` if it paints nothing.
pub fn widget_content(widget_type: WidgetType, ctx: &WidgetContext) -> Option<WidgetContent> {
    match widget_type {
        WidgetType::None => None,
        WidgetType::MonthDate => Some(WidgetContent::Number(format_number(ctx.date.month))),
        WidgetType::DayDate => Some(WidgetContent::Number(format_number(ctx.date.day))),
        WidgetType::AmPm if ctx.use_24h => None,
        WidgetType::AmPm => Some(WidgetContent::Frame {
            sheet: SheetId::AmPm,
            index: if ctx.time.is_pm() { 0 } else { 1 },
        }),
        WidgetType::Battery => Some(WidgetContent::Frame {
            sheet: SheetId::Battery,
            index: battery_frame(ctx.sensors.battery_percent),
        }),
        WidgetType::Steps => Some(WidgetContent::Frame {
            sheet: SheetId::Steps,
            index: steps_frame(ctx.sensors.step_count, ctx.step_goal),
        }),
    }
}

/// Footprint width of a widget; zero when it paints nothing.
pub fn widget_width(widget_type: WidgetType, ctx: &WidgetContext) -> i32 {
    widget_content(widget_type, ctx).map_or(0, |content| content.width())
}

/// Left edge of a widget of `width` in `corner`.
pub fn anchor_x(corner: Corner, width: i32, screen: ScreenBounds) -> i32 {
    match corner {
        Corner::TopLeft => WIDGET_PADDING_SIDE,
        Corner::TopRight => screen.width - width - WIDGET_PADDING_SIDE,
    }
}

/// Resolve a widget's footprint and anchor. `None` means no draw is issued.
pub fn resolve(
    widget_type: WidgetType,
    corner: Corner,
    ctx: &WidgetContext,
    screen: ScreenBounds,
) -> Option<WidgetSpec> {
    let content = widget_content(widget_type, ctx)?;
    let width = content.width();

    Some(WidgetSpec {
        widget_type,
        corner,
        width,
        x: anchor_x(corner, width, screen),
        y: WIDGET_PADDING_TOP,
        content,
    })
}
