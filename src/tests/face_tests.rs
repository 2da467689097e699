//! # End-to-End Tests for the Clock Face
//!
//! These tests drive whole ticks through the library the way the binary does
//! and check the observable geometry of the resulting frames, together with
//! configuration file handling and argument parsing.

use crate::Options;
use clap::Parser;
use fiftyeight_lib::atlas::{SheetCatalog, SheetId, SizeClass};
use fiftyeight_lib::classify::{classify, Ruleset, TimeDigits};
use fiftyeight_lib::config::{Config, ConfigError, ConfigFlags};
use fiftyeight_lib::face::{compose_frame, ClockFace, TickInput};
use fiftyeight_lib::layout::compose_time;
use fiftyeight_lib::widgets::WidgetType;
use fiftyeight_lib::{DateSample, Rect, ScreenBounds, SensorSample, TimeSample};
use std::fs;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const SCREEN: ScreenBounds = ScreenBounds {
    width: 144,
    height: 168,
};

fn tick_input(hour: u8, minute: u8, day: u8, weekday: u8) -> TickInput {
    TickInput {
        time: TimeSample::new(hour, minute, 0).unwrap(),
        date: DateSample::new(day, 1, weekday).unwrap(),
        sensors: SensorSample::default(),
    }
}

/// Whether the displayed hour has a nonzero tens digit.
fn hour_tens_shown(hour: u8, use_24h: bool) -> bool {
    let shown = match (use_24h, hour % 12) {
        (true, _) => hour,
        (false, 0) => 12,
        (false, h) => h,
    };
    shown >= 10
}

/// Every minute of the day, in both clock modes and both rulesets, produces a
/// block whose width is the sum of its slots plus spacing, centered with any
/// odd pixel on the right.
#[test]
fn time_block_is_centered_for_every_minute() {
    for ruleset in [Ruleset::Refined, Ruleset::Compact] {
        for use_24h in [false, true] {
            for hour in 0..24 {
                for minute in 0..60 {
                    let time = TimeSample::new(hour, minute, 0).unwrap();
                    let digits = TimeDigits::from_sample(&time, use_24h);
                    let classes = classify(&digits, ruleset);
                    let layout = compose_time(&digits, &classes, SCREEN.width);

                    // Glyph widths, an 8 px colon and a 2 px gap between neighbours
                    let [tens, ones, minute_tens, minute_ones] = classes.as_array();
                    let hour_width = if hour_tens_shown(hour, use_24h) {
                        tens.width() + 2 + ones.width()
                    } else {
                        ones.width()
                    };
                    let expected =
                        hour_width + 2 + 8 + 2 + minute_tens.width() + 2 + minute_ones.width();
                    assert_eq!(
                        layout.total_width, expected,
                        "width at {:02}:{:02} ({:?}, 24h={})",
                        hour, minute, ruleset, use_24h
                    );

                    let slack = SCREEN.width - layout.total_width - 2 * layout.start_x;
                    assert!(
                        slack == 0 || slack == 1,
                        "{:02}:{:02} is off center by {}",
                        hour,
                        minute,
                        slack
                    );
                    assert!(layout.start_x >= 0, "{:02}:{:02} overflows", hour, minute);
                }
            }
        }
    }
}

/// 9:05 in 12-hour mode: no hour tens, a colon, then "0" narrowed to lesser.
#[test]
fn nine_oh_five_frame_geometry() {
    let frame = compose_frame(
        &tick_input(9, 5, 14, 2),
        &ConfigFlags::default(),
        SCREEN,
        &SheetCatalog::complete(),
    );

    let placed: Vec<(u8, SizeClass, i32)> = frame
        .glyphs
        .iter()
        .map(|g| (g.value, g.size_class, g.x))
        .collect();
    assert_eq!(
        placed,
        vec![
            (9, SizeClass::Priority, 20),
            (0, SizeClass::Lesser, 72),
            (5, SizeClass::Subpriority, 94),
        ]
    );
    assert_eq!(frame.layout.colon_offset, Some(42));
    assert_eq!(frame.backdrop, Rect::new(20, 75, 104, 18));

    // Glyph sources follow the sheet addressing: 0 sits alone on the last row
    assert_eq!(frame.glyphs[1].source, Rect::new(0, 54, 20, 18));
    assert_eq!(frame.glyphs[0].source, Rect::new(80, 36, 40, 18));
}

/// Day 31 in the top-right corner is right-aligned on its mixed width.
#[test]
fn day_thirty_one_in_right_corner() {
    let config = ConfigFlags {
        top_left_widget: WidgetType::None,
        top_right_widget: WidgetType::DayDate,
        ..ConfigFlags::default()
    };
    let frame = compose_frame(
        &tick_input(10, 30, 31, 0),
        &config,
        SCREEN,
        &SheetCatalog::complete(),
    );

    assert_eq!(frame.widgets.len(), 1);
    let widget = &frame.widgets[0];
    assert_eq!(widget.spec.width, 32);
    assert_eq!(widget.spec.x, 144 - 32 - 10);

    let sprites: Vec<(SheetId, i32)> = widget.sprites.iter().map(|s| (s.sheet, s.x)).collect();
    assert_eq!(
        sprites,
        vec![
            (SheetId::Digits(SizeClass::DateHalf), 102),
            (SheetId::Digits(SizeClass::DateFull), 114),
        ]
    );
}

/// The JSON dump exposes the draw lists by field name.
#[test]
fn frame_serializes_to_json() {
    let frame = compose_frame(
        &tick_input(9, 5, 14, 2),
        &ConfigFlags::default(),
        SCREEN,
        &SheetCatalog::complete(),
    );
    let value = serde_json::to_value(&frame).unwrap();

    assert_eq!(value["layout"]["total_width"], 104);
    assert_eq!(value["glyphs"].as_array().unwrap().len(), 3);
    assert_eq!(value["widgets"][0]["spec"]["widget_type"], "day_date");
    assert_eq!(value["letters"][0]["letter"], "T");
}

/// Debug mode replays the time table with period 20 regardless of the clock.
#[test]
fn debug_mode_repeats_time_table() {
    let config = ConfigFlags {
        debug_mode: true,
        ..ConfigFlags::default()
    };
    let mut face = ClockFace::new(config, SCREEN, SheetCatalog::complete());

    let first: Vec<TimeSample> = (0..20)
        .map(|_| face.tick(tick_input(17, 42, 1, 0)).input.time)
        .collect();
    let second: Vec<TimeSample> = (0..20)
        .map(|_| face.tick(tick_input(3, 3, 1, 0)).input.time)
        .collect();

    let hm = |t: &TimeSample| (t.hour, t.minute);
    assert_eq!(
        first.iter().map(hm).collect::<Vec<_>>(),
        second.iter().map(hm).collect::<Vec<_>>()
    );
    assert_eq!(face.debug_cycle().counter(), 40);
}

/// Identical inputs produce identical frames.
#[test]
fn composition_is_deterministic() {
    let input = tick_input(23, 59, 28, 6);
    let config = ConfigFlags::default();
    let atlas = SheetCatalog::complete();
    assert_eq!(
        compose_frame(&input, &config, SCREEN, &atlas),
        compose_frame(&input, &config, SCREEN, &atlas)
    );
}

#[test]
fn config_file_round_trip() {
    let temp_file = NamedTempFile::new().expect("Should create temp file");

    let mut config = Config::default();
    config.face.dark_mode = true;
    config.face.top_left_widget = WidgetType::Steps;
    config.face.step_goal = 6000;
    config.save_to_path(temp_file.path()).unwrap();

    let loaded = Config::try_load_from_path(temp_file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn invalid_config_file_falls_back_to_defaults() {
    let temp_file = NamedTempFile::new().expect("Should create temp file");
    fs::write(temp_file.path(), "[face\ndark_mode = maybe").unwrap();

    let loaded = Config::try_load_from_path(temp_file.path());
    assert!(matches!(loaded, Err(ConfigError::Parse(_))));
    assert_eq!(Config::or_default(loaded), Config::default());
}

#[test]
fn unknown_widget_in_config_file_is_none() {
    let temp_file = NamedTempFile::new().expect("Should create temp file");
    fs::write(
        temp_file.path(),
        "[face]\ntop_left_widget = \"weather\"\nstep_goal = 0\n",
    )
    .unwrap();

    let loaded = Config::try_load_from_path(temp_file.path()).unwrap();
    assert_eq!(loaded.face.top_left_widget, WidgetType::None);
    assert_eq!(loaded.face.step_goal, 10_000);
}

#[test]
fn options_defaults_and_flags() {
    let defaults = Options::try_parse_from(["fiftyeight"]).unwrap();
    assert!(!defaults.once && !defaults.json && !defaults.debug && !defaults.write_config);
    assert_eq!(defaults.config_path, PathBuf::from("fiftyeight.toml"));
    assert_eq!(defaults.battery_percent, 100);
    assert_eq!(defaults.step_count, 0);

    let options = Options::try_parse_from([
        "fiftyeight",
        "--once",
        "--json",
        "--debug",
        "--config",
        "/tmp/face.toml",
        "--battery",
        "42",
        "--steps",
        "1234",
    ])
    .unwrap();
    assert!(options.once && options.json && options.debug);
    assert_eq!(options.config_path, PathBuf::from("/tmp/face.toml"));
    assert_eq!(options.battery_percent, 42);
    assert_eq!(options.step_count, 1234);
}

#[test]
fn options_reject_bad_input() {
    assert!(Options::try_parse_from(["fiftyeight", "--config"]).is_err());
    assert!(Options::try_parse_from(["fiftyeight", "--battery", "lots"]).is_err());
    assert!(Options::try_parse_from(["fiftyeight", "--battery", "150"]).is_err());
    assert!(Options::try_parse_from(["fiftyeight", "--stdout"]).is_err());
}
