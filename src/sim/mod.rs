//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (a seed reproduces the map and every spawn)
//! - Stable iteration order (entity lists are kept in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod map;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, circle_rect_overlap, circles_overlap, resolve_collisions};
pub use map::{Room, Tile, TileMap};
pub use state::{
    ActiveEffect, Enemy, EnemyBullet, FieldPowerUp, GameState, Movement, Player, PlayerBullet,
    Rect,
};
pub use tick::{fire, spread_angles, tick};
