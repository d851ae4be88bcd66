//! Power-up entity: hidden inside a destructible block, revealed when the
//! block breaks, consumed exactly once when the player walks onto it.
//!
//! Hidden -> Revealed -> Consumed. Calls from the wrong state are silent
//! no-ops so duplicate destruction or collision reports are harmless.

use crate::components::PowerUpType;
use crate::events::{EventQueue, GameEvent};
use crate::player::PlayerCapabilities;
use crate::systems::power_up_defs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerUp {
    x: i32,
    y: i32,
    kind: PowerUpType,
    visible: bool,
    collected: bool,
}

impl PowerUp {
    pub fn new(x: i32, y: i32, kind: PowerUpType) -> Self {
        Self {
            x,
            y,
            kind,
            visible: false,
            collected: false,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn kind(&self) -> PowerUpType {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Make the power-up visible. Returns true only on the hidden -> revealed transition.
    pub fn reveal(&mut self, events: &mut EventQueue) -> bool {
        if self.visible || self.collected {
            return false;
        }
        self.visible = true;
        events.push(GameEvent::PowerUpRevealed {
            position: self.position(),
            kind: self.kind,
        });
        true
    }

    /// Apply the effect to the player and consume the power-up.
    /// Does nothing unless the power-up is revealed and not yet collected.
    pub fn apply_effect<P: PlayerCapabilities + ?Sized>(
        &mut self,
        player: &mut P,
        events: &mut EventQueue,
    ) -> bool {
        if !self.visible || self.collected {
            return false;
        }

        power_up_defs::apply_to_player(self.kind, player);
        self.collected = true;
        self.visible = false;

        let (player_x, player_y) = player.position();
        tracing::debug!(
            power_up = self.kind.name(),
            player_x,
            player_y,
            "power-up effect applied"
        );
        events.push(GameEvent::PowerUpCollected {
            position: self.position(),
            kind: self.kind,
        });
        true
    }
}
