//! Game rules organized by domain.
//!
//! - `effects`: timed status effects on the player
//! - `explosion`: blast shape of a detonating bomb
//! - `power_up_defs`: the power-up catalog and how each kind applies

pub mod effects;
pub mod explosion;
pub mod power_up_defs;
