//! Level initialization - spawns a layout's entities into a fresh world.

use crate::components::{Enemy, Position};
use crate::exit_door::ExitDoor;
use crate::level_data::LevelLayout;
use crate::power_up::PowerUp;

use hecs::{Entity, World};

/// Entities created for a level
pub struct SpawnedLevel {
    pub world: World,
    pub exit_door: Entity,
}

/// Spawn the exit door, hidden power-ups and enemies described by a layout.
/// The layout is expected to have been validated already.
pub fn init_world(layout: &LevelLayout) -> SpawnedLevel {
    let mut world = World::new();

    let (exit_x, exit_y) = layout.exit;
    let exit_door = world.spawn((ExitDoor::new(exit_x, exit_y),));

    for placement in &layout.power_ups {
        world.spawn((PowerUp::new(placement.x, placement.y, placement.kind),));
    }

    spawn_enemies(&mut world, &layout.enemies);

    tracing::debug!(
        power_ups = layout.power_ups.len(),
        enemies = layout.enemies.len(),
        "level entities spawned"
    );

    SpawnedLevel { world, exit_door }
}

fn spawn_enemies(world: &mut World, positions: &[(i32, i32)]) {
    for &(x, y) in positions {
        world.spawn((Position::new(x, y), Enemy));
    }
}
