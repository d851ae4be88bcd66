//! Cell -> entity side lookup.
//!
//! Tiles never reference entities. The level keeps this map from grid
//! coordinates to the entity buried in that cell (power-up or exit door)
//! and to the bomb sitting on it. Buried contents are bound once when the
//! level is built; bombs are registered on placement and removed on
//! detonation.

use std::collections::HashMap;

use hecs::{Entity, World};

use crate::components::{Bomb, Position};
use crate::exit_door::ExitDoor;
use crate::power_up::PowerUp;

#[derive(Debug, Clone, Default)]
pub struct EntityLookup {
    /// Power-up or exit door bound to a cell
    contents: HashMap<(i32, i32), Entity>,
    /// At most one bomb per cell
    bombs: HashMap<(i32, i32), Entity>,
}

impl EntityLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lookup from current world state
    pub fn rebuild_from_world(world: &World) -> Self {
        let mut lookup = Self::new();
        lookup.rebuild_in_place(world);
        lookup
    }

    pub fn rebuild_in_place(&mut self, world: &World) {
        self.contents.clear();
        self.bombs.clear();

        for (entity, power_up) in world.query::<&PowerUp>().iter() {
            self.contents.insert(power_up.position(), entity);
        }
        for (entity, door) in world.query::<&ExitDoor>().iter() {
            self.contents.insert(door.position(), entity);
        }
        for (entity, (pos, _)) in world.query::<(&Position, &Bomb)>().iter() {
            self.bombs.insert(pos.as_tuple(), entity);
        }
    }

    pub fn contents_at(&self, position: (i32, i32)) -> Option<Entity> {
        self.contents.get(&position).copied()
    }

    pub fn register_bomb(&mut self, position: (i32, i32), entity: Entity) {
        self.bombs.insert(position, entity);
    }

    pub fn has_bomb(&self, position: (i32, i32)) -> bool {
        self.bombs.contains_key(&position)
    }

    pub fn remove_bomb(&mut self, position: (i32, i32)) -> Option<Entity> {
        self.bombs.remove(&position)
    }

    pub fn bomb_count(&self) -> usize {
        self.bombs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PowerUpType;

    #[test]
    fn test_rebuild_finds_power_ups_doors_and_bombs() {
        let mut world = World::new();
        let power_up = world.spawn((PowerUp::new(1, 2, PowerUpType::RangeUp),));
        let door = world.spawn((ExitDoor::new(3, 3),));
        let bomb = world.spawn((Position::new(0, 0), Bomb::new(1, 3_000)));

        let lookup = EntityLookup::rebuild_from_world(&world);
        assert_eq!(lookup.contents_at((1, 2)), Some(power_up));
        assert_eq!(lookup.contents_at((3, 3)), Some(door));
        assert_eq!(lookup.contents_at((0, 0)), None);
        assert!(lookup.has_bomb((0, 0)));
        assert_eq!(lookup.clone().remove_bomb((0, 0)), Some(bomb));
        assert_eq!(lookup.bomb_count(), 1);
    }

    #[test]
    fn test_remove_bomb() {
        let mut world = World::new();
        let bomb = world.spawn(());
        let mut lookup = EntityLookup::new();
        lookup.register_bomb((4, 1), bomb);
        assert!(lookup.has_bomb((4, 1)));
        assert_eq!(lookup.remove_bomb((4, 1)), Some(bomb));
        assert!(!lookup.has_bomb((4, 1)));
        assert_eq!(lookup.remove_bomb((4, 1)), None);
    }
}
