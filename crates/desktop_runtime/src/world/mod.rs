//! Top-down world: scenes, the player sprite, and the camera that follows it.

pub mod camera;
pub mod facing;
pub mod locations;
pub mod movement;
pub mod scene;

use crate::config::RuntimeConfig;

pub use facing::Facing;
pub use locations::{location, resolve_saved_location, Location, LocationId, LOCATIONS};
pub use movement::{HeldKeys, MoveKey};
pub use scene::{
    interactables, nearby_interaction, Interactable, InteractionKind, Prop, SceneKind, SceneRect,
    Size, PLAYER_SIZE,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        self.sub(other).length()
    }
}

/// Walking-loop transition produced by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkChange {
    Started,
    Stopped,
}

/// Player and camera state for the current scene.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub camera: Vec2,
    pub facing: Facing,
    pub next_facing_sample_ms: u64,
    pub walking: bool,
    /// False until the scene warm-up delay elapses after a location change.
    pub scene_ready: bool,
    pub keys: HeldKeys,
}

impl WorldState {
    /// Fresh state with player and camera at the scene's spawn point.
    pub fn spawn(location_id: LocationId) -> Self {
        let start = location(location_id).scene.spawn_point();
        Self {
            position: start,
            velocity: Vec2::ZERO,
            camera: start,
            facing: Facing::Idle,
            next_facing_sample_ms: 0,
            walking: false,
            scene_ready: false,
            keys: HeldKeys::default(),
        }
    }

    /// Runs one animation frame: physics, camera follow, and a throttled facing sample.
    pub fn advance_frame(
        &mut self,
        location_id: LocationId,
        config: &RuntimeConfig,
        now_ms: u64,
    ) -> Option<WalkChange> {
        let scene = location(location_id).scene.size();
        (self.position, self.velocity) =
            movement::step(self.position, self.velocity, self.keys, scene, &config.movement);
        self.camera = camera::follow(self.camera, self.position, &config.camera);

        if now_ms >= self.next_facing_sample_ms {
            self.facing = Facing::from_velocity(self.velocity, config.movement.facing_speed);
            self.next_facing_sample_ms = now_ms + config.movement.animation_poll_ms;
        }

        let walking = movement::is_walking(self.velocity, &config.movement);
        let change = match (self.walking, walking) {
            (false, true) => Some(WalkChange::Started),
            (true, false) => Some(WalkChange::Stopped),
            _ => None,
        };
        self.walking = walking;
        change
    }

    /// Whether another animation frame would change anything.
    pub fn needs_frame(&self) -> bool {
        self.keys.any()
            || self.velocity != Vec2::ZERO
            || self.camera != self.position
            || self.facing != Facing::Idle
    }

    /// Releases held keys and stops the player, e.g. when pausing.
    pub fn halt(&mut self) -> Option<WalkChange> {
        self.keys = HeldKeys::default();
        self.velocity = Vec2::ZERO;
        std::mem::replace(&mut self.walking, false).then_some(WalkChange::Stopped)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn spawn_places_camera_on_player() {
        let world = WorldState::spawn(LocationId::WarehouseB7);
        assert_eq!(world.position, Vec2 { x: 776.0, y: 816.0 });
        assert_eq!(world.camera, world.position);
        assert!(!world.needs_frame());
    }

    #[test]
    fn walking_starts_and_stops_with_input() {
        let config = RuntimeConfig::default();
        let mut world = WorldState::spawn(LocationId::PlayerRoom);
        world.keys.set(MoveKey::Left, true);

        assert_eq!(world.advance_frame(LocationId::PlayerRoom, &config, 0), Some(WalkChange::Started));
        assert_eq!(world.advance_frame(LocationId::PlayerRoom, &config, 16), None);
        assert!(world.needs_frame());

        world.keys.set(MoveKey::Left, false);
        let mut stopped = false;
        for frame in 0..20 {
            if world.advance_frame(LocationId::PlayerRoom, &config, 32 + frame * 16)
                == Some(WalkChange::Stopped)
            {
                stopped = true;
            }
        }
        assert!(stopped);
        assert_eq!(world.velocity, Vec2::ZERO);
    }

    #[test]
    fn facing_is_sampled_on_poll_interval() {
        let config = RuntimeConfig::default();
        let mut world = WorldState::spawn(LocationId::PlayerRoom);
        world.velocity = Vec2 { x: 0.0, y: -1.0 };
        world.keys.set(MoveKey::Up, true);
        world.advance_frame(LocationId::PlayerRoom, &config, 0);
        assert_eq!(world.facing, Facing::Up);
        assert_eq!(world.next_facing_sample_ms, 50);

        world.keys = HeldKeys::default();
        world.keys.set(MoveKey::Right, true);
        world.velocity = Vec2 { x: 1.0, y: 0.0 };
        world.advance_frame(LocationId::PlayerRoom, &config, 20);
        assert_eq!(world.facing, Facing::Up);
        world.advance_frame(LocationId::PlayerRoom, &config, 50);
        assert_eq!(world.facing, Facing::Right);
    }

    #[test]
    fn halt_clears_motion() {
        let mut world = WorldState::spawn(LocationId::PlayerRoom);
        world.walking = true;
        world.velocity = Vec2 { x: 1.0, y: 0.0 };
        world.keys.set(MoveKey::Right, true);
        assert_eq!(world.halt(), Some(WalkChange::Stopped));
        assert_eq!(world.halt(), None);
        assert_eq!(world.keys, HeldKeys::default());
    }
}
