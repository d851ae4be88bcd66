//! Exit door entity.
//!
//! Visibility (driven by block destruction) and activation (driven by the
//! enemy count) are independent flags and may change in either order. The
//! door never looks at enemies itself.

use crate::events::{EventQueue, GameEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitDoor {
    x: i32,
    y: i32,
    visible: bool,
    activated: bool,
}

impl ExitDoor {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            visible: false,
            activated: false,
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

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn reveal(&mut self, events: &mut EventQueue) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        events.push(GameEvent::ExitDoorRevealed { position: self.position() });
        true
    }

    pub fn activate(&mut self, events: &mut EventQueue) -> bool {
        if self.activated {
            return false;
        }
        self.activated = true;
        events.push(GameEvent::ExitDoorActivated { position: self.position() });
        true
    }

    pub fn deactivate(&mut self, events: &mut EventQueue) -> bool {
        if !self.activated {
            return false;
        }
        self.activated = false;
        events.push(GameEvent::ExitDoorDeactivated { position: self.position() });
        true
    }

    /// Whether a player at (x, y) can leave the level. Visibility plays no part.
    pub fn can_use_to_exit(&self, player_x: i32, player_y: i32) -> bool {
        self.activated && self.is_player_on_door(player_x, player_y)
    }

    pub fn is_player_on_door(&self, player_x: i32, player_y: i32) -> bool {
        player_x == self.x && player_y == self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_hidden_and_inactive() {
        let door = ExitDoor::new(5, 5);
        assert!(!door.is_visible());
        assert!(!door.is_activated());
    }

    #[test]
    fn test_exit_requires_activation() {
        let mut door = ExitDoor::new(5, 5);
        let mut events = EventQueue::new();
        door.reveal(&mut events);

        assert!(door.is_player_on_door(5, 5));
        assert!(!door.can_use_to_exit(5, 5));

        door.activate(&mut events);
        assert!(door.can_use_to_exit(5, 5));
        assert!(!door.can_use_to_exit(5, 4));
        assert!(!door.can_use_to_exit(4, 5));
    }

    #[test]
    fn test_activate_before_reveal() {
        let mut door = ExitDoor::new(3, 4);
        let mut events = EventQueue::new();

        door.activate(&mut events);
        assert!(door.is_activated());
        assert!(!door.is_visible());
        assert!(door.can_use_to_exit(3, 4));
    }

    #[test]
    fn test_transitions_are_idempotent() {
        let mut door = ExitDoor::new(1, 2);
        let mut events = EventQueue::new();

        assert!(door.reveal(&mut events));
        assert!(!door.reveal(&mut events));
        assert!(!door.deactivate(&mut events));
        assert!(door.activate(&mut events));
        assert!(!door.activate(&mut events));
        assert!(door.deactivate(&mut events));
        assert!(!door.deactivate(&mut events));
        assert!(!door.can_use_to_exit(1, 2));
        assert!(door.is_visible());

        let kinds: Vec<_> = events.drain().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec!["exit_door_revealed", "exit_door_activated", "exit_door_deactivated"]
        );
    }
}
