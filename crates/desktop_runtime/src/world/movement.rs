use crate::config::MovementConfig;

use super::{scene::Size, Vec2, PLAYER_SIZE};

/// Movement keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    /// Maps a lowercased `KeyboardEvent.key` to a movement key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "arrowup" => Some(Self::Up),
            "s" | "arrowdown" => Some(Self::Down),
            "a" | "arrowleft" => Some(Self::Left),
            "d" | "arrowright" => Some(Self::Right),
            _ => None,
        }
    }
}

impl HeldKeys {
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Up => self.up = pressed,
            MoveKey::Down => self.down = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Unit-length input direction, or zero when opposing keys cancel.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f64::from(u8::from(pos)) - f64::from(u8::from(neg));
        let raw = Vec2 {
            x: axis(self.left, self.right),
            y: axis(self.up, self.down),
        };
        let length = raw.length();
        if length > 0.0 {
            raw.scale(1.0 / length)
        } else {
            raw
        }
    }
}

/// Advances velocity and position by one frame.
pub fn step(
    position: Vec2,
    velocity: Vec2,
    keys: HeldKeys,
    scene: Size,
    config: &MovementConfig,
) -> (Vec2, Vec2) {
    let direction = keys.direction();
    let target = direction.scale(config.max_speed);

    let axis = |v: f64, target: f64, input: f64| {
        let mut v = v + (target - v) * config.acceleration;
        if input == 0.0 {
            v *= config.friction;
        }
        if v.abs() < config.rest_threshold {
            0.0
        } else {
            v
        }
    };
    let velocity = Vec2 {
        x: axis(velocity.x, target.x, direction.x),
        y: axis(velocity.y, target.y, direction.y),
    };

    let position = Vec2 {
        x: (position.x + velocity.x).clamp(0.0, scene.width - PLAYER_SIZE.width),
        y: (position.y + velocity.y).clamp(0.0, scene.height - PLAYER_SIZE.height),
    };
    (position, velocity)
}

/// Whether the walking loop should be audible at this velocity.
pub fn is_walking(velocity: Vec2, config: &MovementConfig) -> bool {
    velocity.x.abs() > config.walk_cue_speed || velocity.y.abs() > config.walk_cue_speed
}
