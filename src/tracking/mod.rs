//! Fasting and workout state machines
//!
//! Both machines are methods on the model types that return a new value and
//! leave the receiver untouched.

pub mod fasting;
pub mod workout;

pub use fasting::{format_elapsed, timeline, FastingStage, StageStatus, TimelineEntry};
pub use workout::DEFAULT_ROUTINE_TEMPLATE;
