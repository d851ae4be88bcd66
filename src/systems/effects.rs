//! Timed effect bookkeeping.
//!
//! Functions here operate on StatusEffects data directly. Power-up entities
//! only hand over a duration; expiry is driven from here by the tick loop.

use crate::components::{ActiveEffect, EffectType, StatusEffects};

/// Check if a StatusEffects component has a specific effect active
pub fn has_effect(effects: &StatusEffects, effect_type: EffectType) -> bool {
    effects.effects.iter().any(|e| e.effect_type == effect_type)
}

/// Add or refresh an effect with the given duration
pub fn add_effect(effects: &mut StatusEffects, effect_type: EffectType, duration_ms: u32) {
    if let Some(existing) = effects.effects.iter_mut().find(|e| e.effect_type == effect_type) {
        existing.remaining_ms = duration_ms;
    } else {
        effects.effects.push(ActiveEffect {
            effect_type,
            remaining_ms: duration_ms,
        });
    }
}

/// Get remaining duration of an effect (None if not active)
pub fn get_effect_duration(effects: &StatusEffects, effect_type: EffectType) -> Option<u32> {
    effects
        .effects
        .iter()
        .find(|e| e.effect_type == effect_type)
        .map(|e| e.remaining_ms)
}

/// Advance all effects by `dt_ms`, dropping the ones that ran out.
/// Returns the effects that expired during this tick.
pub fn tick_effects(effects: &mut StatusEffects, dt_ms: u32) -> Vec<EffectType> {
    let mut expired = Vec::new();
    effects.effects.retain_mut(|e| {
        e.remaining_ms = e.remaining_ms.saturating_sub(dt_ms);
        if e.remaining_ms == 0 {
            expired.push(e.effect_type);
            false
        } else {
            true
        }
    });
    expired
}
