//! # Debug Cycling
//!
//! In debug mode the face ignores the clock and walks a fixed table of
//! synthetic times, one entry per tick, so every width class, colon offset,
//! mixed-width date and weekday split shows up on screen within a couple of
//! minutes of visual QA.
//!
//! ## Cycle Structure
//! - **Counter**: 0..=99, advanced once per tick, wraps to 0
//! - **Time**: `TIME_TABLE[counter % 20]`, period 20
//! - **Weekday**: `(counter / 5) % 7`, period 35
//! - **Day of month**: `counter % 31 + 1`, all 31 days within one lap
//! - **Month**: `counter % 12 + 1`
//! - **Second**: `counter * 3 % 60`, sweeping the second mark around the dial

use crate::{DateSample, TimeSample};

/// Counter values before wrapping.
pub const COUNTER_BOUND: u8 = 100;

/// Synthetic `(hour, minute)` pairs. Hours are 24-hour so both clock modes
/// get single-digit, "1x", "2x" and 11 o'clock readouts.
pub const TIME_TABLE: [(u8, u8); 20] = [
    (1, 0),
    (9, 5),
    (10, 0),
    (11, 11),
    (12, 34),
    (0, 7),
    (13, 59),
    (21, 10),
    (23, 45),
    (4, 40),
    (7, 1),
    (8, 22),
    (10, 59),
    (11, 0),
    (12, 0),
    (2, 30),
    (5, 55),
    (6, 9),
    (19, 19),
    (22, 22),
];

/// Bounded counter driving the synthetic samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugCycle {
    counter: u8,
}

impl DebugCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given counter value, wrapped into range.
    pub fn starting_at(counter: u8) -> Self {
        Self {
            counter: counter % COUNTER_BOUND,
        }
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Move to the next entry. Called once per tick by the scheduler.
    pub fn advance(&mut self) {
        self.counter = (self.counter + 1) % COUNTER_BOUND;
    }

    /// Synthetic samples for the current counter value.
    pub fn samples(&self) -> (TimeSample, DateSample) {
        let c = self.counter;
        let (hour, minute) = TIME_TABLE[usize::from(c) % TIME_TABLE.len()];

        let time = TimeSample {
            hour,
            minute,
            second: ((u16::from(c) * 3) % 60) as u8,
        };
        let date = DateSample {
            day: c % 31 + 1,
            month: c % 12 + 1,
            weekday: (c / 5) % 7,
        };

        (time, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_wraps() {
        let mut cycle = DebugCycle::starting_at(99);
        cycle.advance();
        assert_eq!(cycle.counter(), 0);
        assert_eq!(DebugCycle::starting_at(250).counter(), 50);
    }

    #[test]
    fn test_table_entries_are_valid_samples() {
        let mut cycle = DebugCycle::new();
        for _ in 0..COUNTER_BOUND {
            let (time, date) = cycle.samples();
            assert!(TimeSample::new(time.hour, time.minute, time.second).is_ok());
            assert!(DateSample::new(date.day, date.month, date.weekday).is_ok());
            cycle.advance();
        }
    }

    #[test]
    fn test_periods() {
        let at = |c| DebugCycle::starting_at(c).samples();

        assert_eq!(
            (at(20).0.hour, at(20).0.minute),
            (at(0).0.hour, at(0).0.minute)
        );
        assert_eq!(at(35).1.weekday, at(0).1.weekday);
        assert_eq!(at(40).1.weekday, at(5).1.weekday);
        assert_ne!(at(5).1.weekday, at(0).1.weekday);
    }

    #[test]
    fn test_one_lap_covers_every_day_and_weekday() {
        let mut days = [false; 31];
        let mut weekdays = [false; 7];
        let mut cycle = DebugCycle::new();
        for _ in 0..COUNTER_BOUND {
            let (_, date) = cycle.samples();
            days[usize::from(date.day - 1)] = true;
            weekdays[usize::from(date.weekday)] = true;
            cycle.advance();
        }
        assert!(days.iter().all(|&seen| seen));
        assert!(weekdays.iter().all(|&seen| seen));
    }
}
