//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock in milliseconds)
//! - Pointer positions mapped into the play-field

pub mod input;
pub mod time;

pub use input::{Viewport, pointer_to_field};
pub use time::{Clock, ManualClock, SystemClock};
