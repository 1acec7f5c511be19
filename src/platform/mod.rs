//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (frame clock, calendar day)
//! - Input (held keys, on-screen buttons)
//!
//! Storage lives in `persistence`.

pub mod input;
pub mod time;

pub use input::{Direction, KeyboardState, MobileButtons, sample, sample_directions};
pub use time::{day_number, now_ms, today, utc_offset_min};
