//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`], which the tick
//! driver owns and lends out by `&mut`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::map::TileMap;
use crate::consts::*;
use crate::tuning::{Effect, EffectKind, EnemyKind, Grade, PowerUpKind};

/// A bullet fired by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub pos: Vec2,
    /// Heading in radians
    pub direction: f32,
    pub speed: f32,
}

/// A bullet fired by an enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub direction: f32,
    pub speed: f32,
    /// Type of the enemy that fired it (for color)
    pub source: EnemyKind,
}

/// An enemy entity; removed as soon as `hp` reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: u32,
    /// Seconds until the next attack
    pub attack_cooldown: f32,
}

impl Enemy {
    /// Fresh enemy with full hit points, ready to attack immediately
    pub fn spawn(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            hp: kind.stats().hp,
            attack_cooldown: 0.0,
        }
    }
}

/// A power-up lying on the floor, waiting to be picked up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// A picked-up power-up counting down to expiry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub source: PowerUpKind,
    pub effect: Effect,
    /// Seconds left
    pub remaining: f32,
}

impl ActiveEffect {
    pub fn from_powerup(kind: PowerUpKind) -> Self {
        let stats = kind.stats();
        Self {
            source: kind,
            effect: stats.effect,
            remaining: stats.duration,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.effect.kind()
    }
}

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Movement {
    /// Unit-per-axis intent; up is +y
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y += 1.0;
        }
        if self.down {
            axis.y -= 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }
}

/// Axis-aligned rectangle (min corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Feet position; the sprite extends upward by `size`
    pub pos: Vec2,
    pub size: u32,
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: spawn_point(),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    /// Hitbox half extents (integer halves of width = 2/3 size, height = size)
    pub fn half_extents(&self) -> Vec2 {
        let width = (self.size / 3) * 2;
        Vec2::new((width / 2) as f32, (self.size / 2) as f32)
    }

    /// Collision hitbox, centered half a height above the feet
    pub fn hitbox(&self) -> Rect {
        let half = self.half_extents();
        let center = Vec2::new(self.pos.x, self.pos.y + half.y);
        Rect {
            min: center - half,
            size: half * 2.0,
        }
    }

    /// Corners probed against walls when the player stands at `pos`
    pub fn probe_corners(&self, pos: Vec2) -> [Vec2; 4] {
        let half = self.half_extents();
        [
            Vec2::new(pos.x - half.x, pos.y - half.y),
            Vec2::new(pos.x + half.x, pos.y - half.y),
            Vec2::new(pos.x - half.x, pos.y + half.y),
            Vec2::new(pos.x + half.x, pos.y + half.y),
        ]
    }
}

fn spawn_point() -> Vec2 {
    Vec2::new(
        (WINDOW_WIDTH as u32 / 2) as f32,
        (WINDOW_HEIGHT as u32 / 2) as f32,
    )
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state for one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the session RNG started from
    pub seed: u64,
    #[serde(skip, default = "unseeded_rng")]
    pub rng: Pcg32,
    /// Generated once; kept across restarts
    pub map: TileMap,
    /// Kept across restarts (position is reset)
    pub player: Player,
    pub movement: Movement,
    pub score: u32,
    pub lives: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Current wave, 1-based
    pub wave: u32,
    /// Seconds left in the current wave
    pub wave_timer: f32,
    pub enemy_spawn_timer: f32,
    pub powerup_spawn_timer: f32,
    pub player_bullets: Vec<PlayerBullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub enemies: Vec<Enemy>,
    pub field_powerups: Vec<FieldPowerUp>,
    pub active_effects: Vec<ActiveEffect>,
    /// Set when the session ends
    pub final_grade: Option<Grade>,
}

impl GameState {
    /// Create a new session with a freshly generated map
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let map = TileMap::generate(&mut rng);
        Self::with_rng(seed, rng, map)
    }

    /// Create a new session on a prepared map
    pub fn with_map(seed: u64, map: TileMap) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed), map)
    }

    fn with_rng(seed: u64, rng: Pcg32, map: TileMap) -> Self {
        let mut state = Self {
            seed,
            rng,
            map,
            player: Player::default(),
            movement: Movement::default(),
            score: 0,
            lives: INITIAL_LIVES,
            paused: false,
            game_over: false,
            wave: 1,
            wave_timer: WAVE_DURATION,
            enemy_spawn_timer: 0.0,
            powerup_spawn_timer: 0.0,
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            field_powerups: Vec::new(),
            active_effects: Vec::new(),
            final_grade: None,
        };
        state.place_player();
        state
    }

    /// Reinitialize every dynamic field, keeping the map and the player
    pub fn reset(&mut self) {
        self.movement = Movement::default();
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.paused = false;
        self.game_over = false;
        self.wave = 1;
        self.wave_timer = WAVE_DURATION;
        self.enemy_spawn_timer = 0.0;
        self.powerup_spawn_timer = 0.0;
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.field_powerups.clear();
        self.active_effects.clear();
        self.final_grade = None;
        self.place_player();
    }

    /// Put the player at the window center, or on a random floor tile if
    /// the center is blocked
    fn place_player(&mut self) {
        self.player.pos = spawn_point();
        let blocked = self
            .player
            .probe_corners(self.player.pos)
            .iter()
            .any(|c| self.map.is_wall(c.x, c.y));
        if blocked {
            if let Some(pos) = self.map.random_floor_position(&mut self.rng) {
                log::debug!("Spawn point blocked, player placed at {:?}", pos);
                self.player.pos = pos;
            }
        }
    }

    /// The active effect of the given kind, if any
    pub fn active_effect(&self, kind: EffectKind) -> Option<&ActiveEffect> {
        self.active_effects.iter().find(|e| e.kind() == kind)
    }

    /// Multiplier of the active effect of the given kind (1.0 when inactive)
    pub fn effect_multiplier(&self, kind: EffectKind) -> f32 {
        self.active_effect(kind)
            .map(|e| e.effect.multiplier())
            .unwrap_or(1.0)
    }

    /// Activate a power-up, replacing any active effect of the same kind
    pub fn activate_powerup(&mut self, kind: PowerUpKind) {
        let effect = ActiveEffect::from_powerup(kind);
        self.active_effects.retain(|e| e.kind() != effect.kind());
        self.active_effects.push(effect);
        log::info!("Activated {}", kind.as_str());
    }

    /// Take one hit; ends the session when no lives remain
    pub fn hit_player(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::info!("Player hit, {} lives remaining", self.lives);
        if self.lives == 0 && !self.game_over {
            log::info!("Out of lives");
            self.end_game();
        }
    }

    /// Stop the session and record the grade earned so far
    pub fn end_game(&mut self) {
        self.game_over = true;
        let grade = Grade::from_score(self.score);
        self.final_grade = Some(grade);
        log::info!("Game over, final grade {}", grade);
    }

    /// Grade for the current score
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.score)
    }

    /// JSON snapshot for external consumers (renderers, debugging)
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
