//! A running level: tile grid, buried entities, enemies and bombs.
//!
//! The level is the only place that connects the pieces: destroying a block
//! reveals whatever is bound to that cell, walking onto a revealed power-up
//! collects it, and every change in the enemy count re-arms or disarms the
//! exit door. Entity mutators are only called from here, and the engine only
//! drives the level while the flow state is `Running`.

use hecs::{Entity, World};

use crate::components::{Bomb, Direction, Enemy, Position};
use crate::entity_lookup::EntityLookup;
use crate::events::{self, DestructibleBlockListener, EventQueue, GameEvent};
use crate::exit_door::ExitDoor;
use crate::grid::Grid;
use crate::level_data::{LevelError, LevelLayout};
use crate::player::{Player, PlayerCapabilities};
use crate::power_up::PowerUp;
use crate::systems::explosion;

use super::initialization;

/// Outcome of the level so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    InProgress,
    Completed,
    PlayerDied,
}

pub struct Level {
    pub grid: Grid,
    world: World,
    lookup: EntityLookup,
    events: EventQueue,
    exit_door: Entity,
    player_start: (i32, i32),
    bomb_fuse_ms: u32,
    status: LevelStatus,
    block_listener: Option<Box<dyn DestructibleBlockListener>>,
}

impl Level {
    /// Validate a layout and build the level from it
    pub fn from_layout(layout: &LevelLayout, bomb_fuse_ms: u32) -> Result<Self, LevelError> {
        let grid = layout.validate()?;
        let spawned = initialization::init_world(layout);
        let lookup = EntityLookup::rebuild_from_world(&spawned.world);

        let mut level = Self {
            grid,
            world: spawned.world,
            lookup,
            events: EventQueue::new(),
            exit_door: spawned.exit_door,
            player_start: layout.player_start,
            bomb_fuse_ms,
            status: LevelStatus::InProgress,
            block_listener: None,
        };
        // A level without enemies starts with an armed exit
        level.sync_exit_with_enemies();
        Ok(level)
    }

    pub fn set_block_listener(&mut self, listener: Box<dyn DestructibleBlockListener>) {
        self.block_listener = Some(listener);
    }

    pub fn player_start(&self) -> (i32, i32) {
        self.player_start
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    // =========================================================================
    // DESTRUCTION FEED
    // =========================================================================

    /// Destroy the destructible block at (x, y) and reveal whatever it hid.
    /// Returns false if there was no destructible block there.
    pub fn destroy_block(&mut self, x: i32, y: i32) -> bool {
        if !self.grid.destroy(x, y) {
            return false;
        }

        self.events.push(GameEvent::BlockDestroyed { position: (x, y) });
        if let Some(listener) = self.block_listener.as_mut() {
            listener.on_block_destroyed(x, y);
        }

        if let Some(entity) = self.lookup.contents_at((x, y)) {
            if let Ok(mut power_up) = self.world.get::<&mut PowerUp>(entity) {
                power_up.reveal(&mut self.events);
            }
            if let Ok(mut door) = self.world.get::<&mut ExitDoor>(entity) {
                door.reveal(&mut self.events);
            }
        }
        true
    }

    // =========================================================================
    // PLAYER
    // =========================================================================

    /// Collect a revealed power-up under the player, if there is one
    pub fn collect_power_up<P: PlayerCapabilities + ?Sized>(&mut self, player: &mut P) -> bool {
        let Some(entity) = self.lookup.contents_at(player.position()) else {
            return false;
        };
        let Ok(mut power_up) = self.world.get::<&mut PowerUp>(entity) else {
            return false;
        };
        power_up.apply_effect(player, &mut self.events)
    }

    /// React to the player arriving on a cell: pickups, enemy contact, exit
    pub fn on_player_moved(&mut self, player: &mut Player) -> LevelStatus {
        if self.status != LevelStatus::InProgress {
            return self.status;
        }

        self.collect_power_up(player);

        if self.enemy_at(player.position()) {
            self.kill_player(player.position());
            return self.status;
        }

        self.check_exit(player);
        self.status
    }

    /// Move the player one tile if the target cell is open. Bombs block movement.
    pub fn try_move_player(&mut self, player: &mut Player, direction: Direction) -> bool {
        if self.status != LevelStatus::InProgress {
            return false;
        }
        let (x, y) = direction.step_from(player.x, player.y);
        if !self.grid.is_traversable(x, y) || self.lookup.has_bomb((x, y)) {
            return false;
        }

        player.set_position(x, y);
        self.on_player_moved(player);
        true
    }

    /// Drop one of the player's own bombs on their cell
    pub fn player_place_bomb(&mut self, player: &Player) -> bool {
        if self.status != LevelStatus::InProgress {
            return false;
        }
        if self.player_bomb_count() >= player.max_bombs as usize {
            return false;
        }
        self.place_bomb(player.position(), Bomb::new(player.range, self.bomb_fuse_ms))
    }

    fn check_exit(&mut self, player: &Player) {
        let (px, py) = player.position();
        let can_exit = self
            .world
            .get::<&ExitDoor>(self.exit_door)
            .map(|door| door.can_use_to_exit(px, py))
            .unwrap_or(false);

        if can_exit {
            self.status = LevelStatus::Completed;
            self.events.push(GameEvent::LevelCompleted { position: (px, py) });
        }
    }

    fn kill_player(&mut self, position: (i32, i32)) {
        self.status = LevelStatus::PlayerDied;
        self.events.push(GameEvent::PlayerKilled { position });
    }

    // =========================================================================
    // ENEMY LIFECYCLE FEED
    // =========================================================================

    pub fn enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    pub fn enemy_at(&self, position: (i32, i32)) -> bool {
        self.world
            .query::<(&Position, &Enemy)>()
            .iter()
            .any(|(_, (pos, _))| pos.as_tuple() == position)
    }

    /// Spawn (or respawn) an enemy. Disarms the exit door.
    pub fn spawn_enemy(&mut self, x: i32, y: i32) -> Entity {
        let entity = self.world.spawn((Position::new(x, y), Enemy));
        self.events.push(GameEvent::EnemySpawned { position: (x, y) });
        self.sync_exit_with_enemies();
        entity
    }

    /// Kill every enemy standing on a cell. Returns how many died.
    pub fn kill_enemies_at(&mut self, position: (i32, i32)) -> usize {
        let victims: Vec<Entity> = self
            .world
            .query::<(&Position, &Enemy)>()
            .iter()
            .filter(|(_, (pos, _))| pos.as_tuple() == position)
            .map(|(entity, _)| entity)
            .collect();

        for &entity in &victims {
            self.despawn(entity);
            self.events.push(GameEvent::EnemyKilled { position });
        }
        if !victims.is_empty() {
            self.sync_exit_with_enemies();
        }
        victims.len()
    }

    /// Arm the exit once no enemies are left, disarm it while any are alive
    fn sync_exit_with_enemies(&mut self) {
        let enemies_alive = self.enemy_count() > 0;
        if let Ok(mut door) = self.world.get::<&mut ExitDoor>(self.exit_door) {
            if enemies_alive {
                door.deactivate(&mut self.events);
            } else {
                door.activate(&mut self.events);
            }
        }
    }

    // =========================================================================
    // BOMBS
    // =========================================================================

    /// Place a bomb on an open cell without a bomb already on it
    pub fn place_bomb(&mut self, position: (i32, i32), bomb: Bomb) -> bool {
        let (x, y) = position;
        if !self.grid.is_traversable(x, y) || self.lookup.has_bomb(position) {
            return false;
        }
        let entity = self.world.spawn((Position::new(x, y), bomb));
        self.lookup.register_bomb(position, entity);
        self.events.push(GameEvent::BombPlaced { position });
        true
    }

    pub fn bomb_count(&self) -> usize {
        self.lookup.bomb_count()
    }

    fn player_bomb_count(&self) -> usize {
        self.world
            .query::<&Bomb>()
            .iter()
            .filter(|(_, bomb)| !bomb.from_bomb_rain)
            .count()
    }

    /// Advance the level by `dt_ms`: bomb rain, fuses, blasts, exit check
    pub fn tick(&mut self, dt_ms: u32, player: &mut Player) -> LevelStatus {
        puffin::profile_function!();

        if self.status != LevelStatus::InProgress {
            return self.status;
        }

        for target in player.take_queued_bombs() {
            self.place_bomb(target, Bomb::rained(player.range, self.bomb_fuse_ms));
        }

        let mut detonating = Vec::new();
        for (_, (pos, bomb)) in self.world.query_mut::<(&Position, &mut Bomb)>() {
            bomb.fuse_remaining_ms = bomb.fuse_remaining_ms.saturating_sub(dt_ms);
            if bomb.fuse_remaining_ms == 0 {
                detonating.push(pos.as_tuple());
            }
        }
        self.resolve_detonations(detonating, player);

        if self.status == LevelStatus::InProgress {
            self.check_exit(player);
        }
        self.status
    }

    /// Detonate bombs, chaining into any bomb caught in a blast
    fn resolve_detonations(&mut self, mut pending: Vec<(i32, i32)>, player: &Player) {
        puffin::profile_function!();

        while let Some(center) = pending.pop() {
            let Some(entity) = self.lookup.remove_bomb(center) else {
                continue;
            };
            let range = self.world.get::<&Bomb>(entity).map(|b| b.range).unwrap_or(0);
            self.despawn(entity);
            self.events.push(GameEvent::BombExploded { position: center, range });

            for cell in explosion::blast_cells(&self.grid, center, range) {
                if self.lookup.has_bomb(cell) && !pending.contains(&cell) {
                    pending.push(cell);
                }
                self.destroy_block(cell.0, cell.1);
                self.kill_enemies_at(cell);
                if cell == player.position()
                    && !player.is_shielded()
                    && self.status == LevelStatus::InProgress
                {
                    self.kill_player(cell);
                }
            }
        }
    }

    fn despawn(&mut self, entity: Entity) {
        if let Err(err) = self.world.despawn(entity) {
            tracing::warn!(?entity, %err, "entity already gone");
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn exit_door(&self) -> Option<ExitDoor> {
        self.world.get::<&ExitDoor>(self.exit_door).ok().map(|d| (*d).clone())
    }

    pub fn power_up_at(&self, position: (i32, i32)) -> Option<PowerUp> {
        let entity = self.lookup.contents_at(position)?;
        self.world.get::<&PowerUp>(entity).ok().map(|p| (*p).clone())
    }

    pub fn visible_power_ups(&self) -> Vec<PowerUp> {
        self.world
            .query::<&PowerUp>()
            .iter()
            .filter(|(_, p)| p.is_visible())
            .map(|(_, p)| p.clone())
            .collect()
    }

    /// Drain pending events, logging each one
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        let drained: Vec<GameEvent> = self.events.drain().collect();
        for event in &drained {
            events::log_event(event);
        }
        drained
    }
}
