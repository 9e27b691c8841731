//! Semester Siege - a top-down dungeon arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (map generation, movement, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance (enemy, power-up, wave and grade tables)
//! - `controls`: Input event translation
//! - `ui`: Fixed on-screen click targets
//! - `render`: Renderer boundary and frame composition
//! - `status`: Per-tick status report
//! - `session`: Wall-clock tick driver
//! - `settings`: Headless driver settings
//! - `autopilot`: Demo pilot for headless runs

pub mod autopilot;
pub mod controls;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod status;
pub mod tuning;
pub mod ui;

pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (pixels, y axis points up)
    pub const WINDOW_WIDTH: f32 = 1280.0;
    pub const WINDOW_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SIZE: u32 = 30;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const INITIAL_LIVES: u32 = 3;

    /// Player bullets
    pub const PLAYER_BULLET_SPEED: f32 = 300.0;
    /// Collision radius of a player bullet
    pub const PLAYER_BULLET_RADIUS: f32 = 3.0;
    /// Collision radius of an enemy bullet
    pub const ENEMY_BULLET_RADIUS: f32 = 2.0;
    /// Total fan angle of a spread shot (45 degrees)
    pub const SPREAD_ARC: f32 = std::f32::consts::FRAC_PI_4;

    /// Waves
    pub const WAVE_DURATION: f32 = 30.0;
    pub const WAVE_COUNT: u32 = 4;

    /// Field power-ups
    pub const MAX_FIELD_POWERUPS: usize = 3;
    pub const POWERUP_SPAWN_MIN: f32 = 10.0;
    pub const POWERUP_SPAWN_MAX: f32 = 20.0;

    /// Map grid
    pub const MAP_WIDTH: usize = 32;
    pub const MAP_HEIGHT: usize = 18;
    pub const TILE_SIZE: f32 = 40.0;
    pub const MIN_ROOMS: usize = 8;
    pub const MAX_ROOMS: usize = 12;
    pub const MIN_ROOM_SIZE: usize = 6;
    pub const MAX_ROOM_SIZE: usize = 12;
    /// Room placement gives up after this many candidates
    pub const ROOM_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Frame cadence of the tick driver (milliseconds)
    pub const FRAME_INTERVAL_MS: u64 = 16;
}

/// RGB color in 0..1 range
pub type Rgb = [f32; 3];

/// Unit vector for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the vector from `from` to `to`, or `None` when the points coincide
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> Option<f32> {
    let delta = to - from;
    if delta.length_squared() > 0.0 {
        Some(delta.y.atan2(delta.x))
    } else {
        None
    }
}

/// Check whether a point lies inside the window rectangle (edges inclusive)
#[inline]
pub fn in_window(pos: Vec2) -> bool {
    pos.x >= 0.0 && pos.x <= consts::WINDOW_WIDTH && pos.y >= 0.0 && pos.y <= consts::WINDOW_HEIGHT
}
