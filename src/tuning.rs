//! Data-driven game balance
//!
//! Every per-level number lives in one catalog so difficulty is dispatched by
//! lookup, never by level-index branching at the call sites. The catalog is
//! immutable and constructed at compile time.

use serde::Serialize;

/// Number of levels in a full run
pub const LEVEL_COUNT: u32 = 4;

/// Renderer dispatch tag for the boss sprite. The core never draws; this is
/// catalog data handed through the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BossVisual {
    ButterStick,
    SaltShaker,
    Flame,
    Orb,
}

/// A batch hazard pattern emitted when a special move's warning expires.
///
/// Counts, speeds and angular distributions are data; the emission code in
/// `sim::tick` interprets the pattern against the session RNG.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MovePattern {
    /// `count` shots evenly spaced around the full circle
    Radial { count: u32, speed: f32 },
    /// `count` shots fanned around straight-right, `step` radians apart
    Spread { count: u32, step: f32, speed: f32 },
    /// `count` shots falling from the boss row at random x positions,
    /// drifting sideways up to `drift`
    Rain { count: u32, fall_speed: f32, drift: f32 },
    /// `count` shots across `span` radians starting at `offset` (downward fan)
    Fan { count: u32, span: f32, offset: f32, speed: f32 },
    /// Radial spray with up to `jitter` radians of random skew per shot
    Scatter { count: u32, jitter: f32, speed: f32 },
    /// Slow shots converging from the arena edges: `side_count` from the left
    /// and right walls, `band_count` from the top and bottom bands
    EdgeConverge { side_count: u32, band_count: u32, drift: f32 },
}

/// Per-tick Bernoulli emission gated by a cooldown timer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmissionSpec {
    /// Trial probability once the timer has run out
    pub chance: f64,
    /// Ticks until the next trial window after a successful emission
    pub cooldown: i32,
}

/// Mini-hazard emission (slow drifting hazards with their own contact radius)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MiniHazardSpec {
    pub emission: EmissionSpec,
    pub speed: f32,
}

/// Immutable configuration for one level, indexed 1..=LEVEL_COUNT
#[derive(Debug, Clone, Serialize)]
pub struct LevelConfig {
    pub name: &'static str,
    /// Per-tick spawn probability during the survival phase
    pub spawn_chance: f64,
    /// Survival-phase hazard speed, units per tick
    pub projectile_speed: f32,
    /// Hazard color tag handed to the renderer
    pub color: [u8; 3],
    /// Survival phase length in seconds (ticks = secs * TICK_RATE)
    pub time_limit_secs: u32,
    pub boss_max_health: i32,
    /// Reserved balance data; attack damage is currently a flat 1..=999 draw
    pub damage_range: (i32, i32),
    /// Boss self-heal range applied after each completed special move
    pub heal_range: Option<(i32, i32)>,
    /// Ticks between boss normal-attack shots
    pub shoot_interval: i32,
    /// Directional laser emission (levels 3-4)
    pub laser: Option<EmissionSpec>,
    /// Mini-hazard emission (level 3)
    pub mini_hazards: Option<MiniHazardSpec>,
    /// Exactly two special-move variants per boss
    pub specials: [MovePattern; 2],
    /// Display labels for the three level-scoped player attacks
    pub attack_labels: [&'static str; 3],
    pub boss_visual: BossVisual,
}

impl LevelConfig {
    /// Survival phase length in ticks
    #[inline]
    pub fn time_limit_ticks(&self) -> u32 {
        self.time_limit_secs * crate::consts::TICK_RATE
    }
}

/// The full level catalog, outermost difficulty knob of the game
pub static LEVELS: [LevelConfig; LEVEL_COUNT as usize] = [
    LevelConfig {
        name: "BUTTER",
        spawn_chance: 0.05,
        projectile_speed: 2.0,
        color: [255, 200, 100],
        time_limit_secs: 60,
        boss_max_health: 1000,
        damage_range: (1, 3),
        heal_range: None,
        shoot_interval: 300,
        laser: None,
        mini_hazards: None,
        specials: [
            MovePattern::Radial { count: 8, speed: 6.0 },
            MovePattern::Spread { count: 5, step: 0.3, speed: 5.0 },
        ],
        attack_labels: ["Kernel Poke", "Butter Jab", "Spread Strike"],
        boss_visual: BossVisual::ButterStick,
    },
    LevelConfig {
        name: "SALT SHAKER",
        spawn_chance: 0.10,
        projectile_speed: 2.0,
        color: [200, 200, 200],
        time_limit_secs: 60,
        boss_max_health: 5000,
        damage_range: (4, 6),
        heal_range: None,
        shoot_interval: 180,
        laser: None,
        mini_hazards: None,
        specials: [
            MovePattern::Rain { count: 12, fall_speed: 4.0, drift: 2.0 },
            MovePattern::Fan {
                count: 6,
                span: std::f32::consts::PI,
                offset: std::f32::consts::PI / 12.0,
                speed: 5.0,
            },
        ],
        attack_labels: ["Salt Pinch", "Grain Grind", "Shaker Smash"],
        boss_visual: BossVisual::SaltShaker,
    },
    LevelConfig {
        name: "FIRE",
        spawn_chance: 0.50,
        projectile_speed: 2.0,
        color: [255, 100, 0],
        time_limit_secs: 60,
        boss_max_health: 10000,
        damage_range: (7, 9),
        heal_range: Some((10, 15)),
        shoot_interval: 90,
        laser: Some(EmissionSpec { chance: 0.30, cooldown: 30 }),
        mini_hazards: Some(MiniHazardSpec {
            emission: EmissionSpec { chance: 0.40, cooldown: 60 },
            speed: 2.0,
        }),
        specials: [
            MovePattern::Radial { count: 16, speed: 7.0 },
            MovePattern::Scatter { count: 10, jitter: 0.5, speed: 6.0 },
        ],
        attack_labels: ["Cool Splash", "Heat Block", "Flame Extinguish"],
        boss_visual: BossVisual::Flame,
    },
    LevelConfig {
        name: "MAGNETRON",
        spawn_chance: 1.00,
        projectile_speed: 2.0,
        color: [255, 0, 100],
        time_limit_secs: 60,
        boss_max_health: 15000,
        damage_range: (10, 15),
        heal_range: Some((16, 30)),
        shoot_interval: 60,
        laser: Some(EmissionSpec { chance: 0.25, cooldown: 40 }),
        mini_hazards: None,
        specials: [
            MovePattern::Radial { count: 20, speed: 8.0 },
            MovePattern::EdgeConverge { side_count: 8, band_count: 7, drift: 2.0 },
        ],
        attack_labels: ["Magnetic Pulse", "Repel Force", "Overload Burst"],
        boss_visual: BossVisual::Orb,
    },
];

/// Look up the configuration for a 1-based level index.
///
/// Out-of-range indices are normalized to the nearest valid level rather than
/// treated as a fault; the state machine only ever produces 1..=LEVEL_COUNT.
pub fn level(index: u32) -> &'static LevelConfig {
    let idx = index.clamp(1, LEVEL_COUNT) - 1;
    &LEVELS[idx as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_four_levels_in_difficulty_order() {
        assert_eq!(LEVELS.len(), LEVEL_COUNT as usize);
        for pair in LEVELS.windows(2) {
            assert!(pair[0].spawn_chance <= pair[1].spawn_chance);
            assert!(pair[0].boss_max_health < pair[1].boss_max_health);
            assert!(pair[0].shoot_interval >= pair[1].shoot_interval);
        }
    }

    #[test]
    fn catalog_values_are_sane() {
        for cfg in &LEVELS {
            assert!((0.0..=1.0).contains(&cfg.spawn_chance), "{}", cfg.name);
            assert!(cfg.projectile_speed > 0.0);
            assert!(cfg.boss_max_health > 0);
            assert!(cfg.damage_range.0 <= cfg.damage_range.1);
            if let Some((lo, hi)) = cfg.heal_range {
                assert!(0 < lo && lo <= hi);
            }
            if let Some(laser) = cfg.laser {
                assert!((0.0..=1.0).contains(&laser.chance));
                assert!(laser.cooldown > 0);
            }
            assert!(cfg.shoot_interval > 0);
        }
    }

    #[test]
    fn level_lookup_is_one_based_and_clamped() {
        assert_eq!(level(1).name, "BUTTER");
        assert_eq!(level(4).name, "MAGNETRON");
        // Defensive normalization, not a panic
        assert_eq!(level(0).name, "BUTTER");
        assert_eq!(level(99).name, "MAGNETRON");
    }

    #[test]
    fn lasers_and_minis_match_their_levels() {
        assert!(level(1).laser.is_none());
        assert!(level(2).laser.is_none());
        assert!(level(3).laser.is_some());
        assert!(level(4).laser.is_some());
        assert!(level(3).mini_hazards.is_some());
        assert!(level(4).mini_hazards.is_none());
    }
}
