//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

mod bombs;
mod gameplay;
mod level;
mod power_ups;

pub use bombs::*;
pub use gameplay::*;
pub use level::*;
pub use power_ups::*;
