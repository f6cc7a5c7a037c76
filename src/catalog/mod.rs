//! Static catalogs
//!
//! Read-only exercise and food data shipped with the application.

mod exercises;
mod foods;

pub use exercises::{exercise_name, exercises, find_exercise};
pub use foods::{find_food, foods};
