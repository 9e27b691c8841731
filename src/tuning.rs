//! Data-driven game balance
//!
//! Every enemy type, power-up type, wave and grade band is a closed
//! enumeration indexing a static table of constants.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Rgb;

pub const WHITE: Rgb = [1.0, 1.0, 1.0];
pub const RED: Rgb = [1.0, 0.0, 0.0];
pub const GREEN: Rgb = [0.0, 1.0, 0.0];
pub const BLUE: Rgb = [0.0, 0.0, 1.0];
pub const YELLOW: Rgb = [1.0, 1.0, 0.0];
pub const PURPLE: Rgb = [0.5, 0.0, 0.5];
pub const CYAN: Rgb = [0.0, 0.8, 0.8];
pub const ORANGE: Rgb = [1.0, 0.5, 0.0];
pub const GREY: Rgb = [0.5, 0.5, 0.5];

/// How an enemy attacks when its cooldown expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    /// Contact damage, resolved by the collision pass
    Melee,
    SingleShot,
    DoubleShot,
    QuadShot,
    BurstShot,
}

const SINGLE_ANGLES: [f32; 1] = [0.0];
const DOUBLE_ANGLES: [f32; 2] = [0.0, PI];
const QUAD_ANGLES: [f32; 4] = [0.0, FRAC_PI_2, PI, PI + FRAC_PI_2];
const BURST_ANGLES: [f32; 8] = [
    0.0,
    FRAC_PI_4,
    FRAC_PI_2,
    3.0 * FRAC_PI_4,
    PI,
    5.0 * FRAC_PI_4,
    3.0 * FRAC_PI_2,
    7.0 * FRAC_PI_4,
];

impl AttackKind {
    /// Directions (radians) of the bullets fired by one attack
    pub fn bullet_angles(self) -> &'static [f32] {
        match self {
            AttackKind::Melee => &[],
            AttackKind::SingleShot => &SINGLE_ANGLES,
            AttackKind::DoubleShot => &DOUBLE_ANGLES,
            AttackKind::QuadShot => &QUAD_ANGLES,
            AttackKind::BurstShot => &BURST_ANGLES,
        }
    }
}

/// Per-type enemy constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyStats {
    pub color: Rgb,
    /// Collision and draw radius
    pub size: f32,
    pub speed: f32,
    pub hp: u32,
    pub points: u32,
    pub attack: AttackKind,
    /// Melee reach (melee only)
    pub attack_range: f32,
    /// Projectile speed (shooters only)
    pub bullet_speed: f32,
    /// Seconds between attacks
    pub attack_cooldown: f32,
}

const QUIZ: EnemyStats = EnemyStats {
    color: GREY,
    size: 20.0,
    speed: 100.0,
    hp: 1,
    points: 1,
    attack: AttackKind::Melee,
    attack_range: 30.0,
    bullet_speed: 0.0,
    attack_cooldown: 1.0,
};

const ASSIGNMENT: EnemyStats = EnemyStats {
    color: YELLOW,
    size: 25.0,
    speed: 80.0,
    hp: 2,
    points: 2,
    attack: AttackKind::SingleShot,
    attack_range: 0.0,
    bullet_speed: 150.0,
    attack_cooldown: 2.0,
};

const PRESENTATION: EnemyStats = EnemyStats {
    color: RED,
    size: 35.0,
    speed: 50.0,
    hp: 4,
    points: 4,
    attack: AttackKind::QuadShot,
    attack_range: 0.0,
    bullet_speed: 250.0,
    attack_cooldown: 4.0,
};

const MIDTERM: EnemyStats = EnemyStats {
    color: PURPLE,
    size: 30.0,
    speed: 60.0,
    hp: 3,
    points: 3,
    attack: AttackKind::DoubleShot,
    attack_range: 0.0,
    bullet_speed: 200.0,
    attack_cooldown: 3.0,
};

const FINAL: EnemyStats = EnemyStats {
    color: ORANGE,
    size: 28.0,
    speed: 90.0,
    hp: 2,
    points: 2,
    attack: AttackKind::BurstShot,
    attack_range: 0.0,
    bullet_speed: 180.0,
    attack_cooldown: 2.5,
};

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Quiz,
    Assignment,
    Presentation,
    Midterm,
    Final,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Quiz,
        EnemyKind::Assignment,
        EnemyKind::Presentation,
        EnemyKind::Midterm,
        EnemyKind::Final,
    ];

    pub fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyKind::Quiz => &QUIZ,
            EnemyKind::Assignment => &ASSIGNMENT,
            EnemyKind::Presentation => &PRESENTATION,
            EnemyKind::Midterm => &MIDTERM,
            EnemyKind::Final => &FINAL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Quiz => "QUIZ",
            EnemyKind::Assignment => "ASSIGNMENT",
            EnemyKind::Presentation => "PRESENTATION",
            EnemyKind::Midterm => "MIDTERM",
            EnemyKind::Final => "FINAL",
        }
    }
}

/// Gameplay modifier applied while a power-up is active.
///
/// At most one active effect of each kind exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    SpeedBoost,
    SpreadShot,
    BulletSpeed,
    BulletSize,
}

/// Effect kind plus its magnitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    SpeedBoost { multiplier: f32 },
    SpreadShot { bullets: u32 },
    BulletSpeed { multiplier: f32 },
    BulletSize { multiplier: f32 },
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::SpeedBoost { .. } => EffectKind::SpeedBoost,
            Effect::SpreadShot { .. } => EffectKind::SpreadShot,
            Effect::BulletSpeed { .. } => EffectKind::BulletSpeed,
            Effect::BulletSize { .. } => EffectKind::BulletSize,
        }
    }

    /// Multiplier carried by the effect (1.0 for count-based effects)
    pub fn multiplier(&self) -> f32 {
        match *self {
            Effect::SpeedBoost { multiplier }
            | Effect::BulletSpeed { multiplier }
            | Effect::BulletSize { multiplier } => multiplier,
            Effect::SpreadShot { .. } => 1.0,
        }
    }
}

/// Per-type power-up constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpStats {
    pub color: Rgb,
    /// Pickup radius
    pub size: f32,
    /// Seconds the effect stays active
    pub duration: f32,
    pub effect: Effect,
}

const CHATGPT: PowerUpStats = PowerUpStats {
    color: CYAN,
    size: 15.0,
    duration: 5.0,
    effect: Effect::SpeedBoost { multiplier: 2.0 },
};

const CHEGG: PowerUpStats = PowerUpStats {
    color: ORANGE,
    size: 15.0,
    duration: 3.0,
    effect: Effect::SpreadShot { bullets: 8 },
};

const QUILLBOT: PowerUpStats = PowerUpStats {
    color: GREEN,
    size: 15.0,
    duration: 4.0,
    effect: Effect::BulletSpeed { multiplier: 1.5 },
};

const GRAMMARLY: PowerUpStats = PowerUpStats {
    color: PURPLE,
    size: 15.0,
    duration: 4.0,
    effect: Effect::BulletSize { multiplier: 1.5 },
};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    ChatGpt,
    Chegg,
    Quillbot,
    Grammarly,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ChatGpt,
        PowerUpKind::Chegg,
        PowerUpKind::Quillbot,
        PowerUpKind::Grammarly,
    ];

    pub fn stats(self) -> &'static PowerUpStats {
        match self {
            PowerUpKind::ChatGpt => &CHATGPT,
            PowerUpKind::Chegg => &CHEGG,
            PowerUpKind::Quillbot => &QUILLBOT,
            PowerUpKind::Grammarly => &GRAMMARLY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::ChatGpt => "CHATGPT",
            PowerUpKind::Chegg => "CHEGG",
            PowerUpKind::Quillbot => "QUILLBOT",
            PowerUpKind::Grammarly => "GRAMMARLY",
        }
    }
}

/// One timed phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveConfig {
    /// Enemy types that may spawn during the wave
    pub enemies: &'static [EnemyKind],
    /// Seconds between enemy spawns
    pub spawn_rate: f32,
    /// Applied to every enemy's base speed
    pub speed_multiplier: f32,
}

const WAVES: [WaveConfig; 4] = [
    WaveConfig {
        enemies: &[EnemyKind::Quiz, EnemyKind::Assignment],
        spawn_rate: 2.0,
        speed_multiplier: 1.0,
    },
    WaveConfig {
        enemies: &[EnemyKind::Quiz, EnemyKind::Assignment, EnemyKind::Midterm],
        spawn_rate: 1.5,
        speed_multiplier: 1.2,
    },
    WaveConfig {
        enemies: &[
            EnemyKind::Quiz,
            EnemyKind::Assignment,
            EnemyKind::Midterm,
            EnemyKind::Presentation,
        ],
        spawn_rate: 1.0,
        speed_multiplier: 1.4,
    },
    WaveConfig {
        enemies: &[
            EnemyKind::Quiz,
            EnemyKind::Assignment,
            EnemyKind::Midterm,
            EnemyKind::Presentation,
            EnemyKind::Final,
        ],
        spawn_rate: 0.8,
        speed_multiplier: 1.6,
    },
];

/// Look up a wave by its 1-based index
pub fn wave_config(wave: u32) -> Option<&'static WaveConfig> {
    let index = usize::try_from(wave).ok()?.checked_sub(1)?;
    WAVES.get(index)
}

/// Letter grade awarded from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
}

/// Descending score thresholds; the first one at or below the score wins
const GRADE_THRESHOLDS: [(u32, Grade); 12] = [
    (90, Grade::A),
    (85, Grade::AMinus),
    (80, Grade::BPlus),
    (75, Grade::B),
    (70, Grade::BMinus),
    (65, Grade::CPlus),
    (60, Grade::C),
    (57, Grade::CMinus),
    (55, Grade::DPlus),
    (52, Grade::D),
    (50, Grade::DMinus),
    (0, Grade::F),
];

impl Grade {
    pub fn from_score(score: u32) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|&(_, grade)| grade)
            .unwrap_or(Grade::F)
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }

    pub fn gpa(&self) -> f32 {
        match self {
            Grade::A => 4.0,
            Grade::AMinus => 3.7,
            Grade::BPlus => 3.3,
            Grade::B => 3.0,
            Grade::BMinus => 2.7,
            Grade::CPlus => 2.3,
            Grade::C => 2.0,
            Grade::CMinus => 1.7,
            Grade::DPlus => 1.3,
            Grade::D => 1.0,
            Grade::DMinus => 0.7,
            Grade::F => 0.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grade::A => "Excellent",
            Grade::AMinus => "Very Good",
            Grade::BPlus => "Good Plus",
            Grade::B => "Good",
            Grade::BMinus => "Good Minus",
            Grade::CPlus => "Fair Plus",
            Grade::C => "Fair",
            Grade::CMinus => "Fair Minus",
            Grade::DPlus => "Poor Plus",
            Grade::D => "Poor",
            Grade::DMinus => "Poor Minus",
            Grade::F => "Failure",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (GPA: {:.1}) - {}", self.letter(), self.gpa(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(0), Grade::F);
        assert_eq!(Grade::from_score(49), Grade::F);
        assert_eq!(Grade::from_score(50), Grade::DMinus);
        assert_eq!(Grade::from_score(56), Grade::DPlus);
        assert_eq!(Grade::from_score(57), Grade::CMinus);
        assert_eq!(Grade::from_score(89), Grade::AMinus);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(1000), Grade::A);
        assert_eq!(Grade::from_score(0).letter(), "F");
    }

    #[test]
    fn test_wave_table() {
        assert!(wave_config(0).is_none());
        assert!(wave_config(5).is_none());

        let first = wave_config(1).expect("wave 1");
        assert_eq!(first.enemies, &[EnemyKind::Quiz, EnemyKind::Assignment]);
        assert_eq!(first.spawn_rate, 2.0);

        let last = wave_config(4).expect("wave 4");
        assert_eq!(last.enemies.len(), 5);
        assert_eq!(last.speed_multiplier, 1.6);
    }

    #[test]
    fn test_attack_patterns() {
        assert!(AttackKind::Melee.bullet_angles().is_empty());
        assert_eq!(AttackKind::SingleShot.bullet_angles(), &[0.0]);
        assert_eq!(AttackKind::DoubleShot.bullet_angles(), &[0.0, PI]);
        assert_eq!(AttackKind::QuadShot.bullet_angles().len(), 4);

        let burst = AttackKind::BurstShot.bullet_angles();
        assert_eq!(burst.len(), 8);
        for (i, angle) in burst.iter().enumerate() {
            assert!((angle - i as f32 * FRAC_PI_4).abs() < 1e-6);
        }
    }

    #[test]
    fn test_only_quiz_is_melee() {
        for kind in EnemyKind::ALL {
            let stats = kind.stats();
            assert_eq!(stats.attack == AttackKind::Melee, kind == EnemyKind::Quiz);
            assert!(stats.hp > 0);
        }
    }

    #[test]
    fn test_effect_kinds_are_distinct_per_powerup() {
        let kinds: std::collections::HashSet<_> = PowerUpKind::ALL
            .iter()
            .map(|p| p.stats().effect.kind())
            .collect();
        assert_eq!(kinds.len(), PowerUpKind::ALL.len());
    }
}
