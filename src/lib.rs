//! Popcorn Panic - an arcade boss-fight mini-game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, hazards, collisions, combat)
//! - `tuning`: Data-driven level balance and special-move catalog
//!
//! Rendering, input polling and the frame clock live outside this crate: the
//! driver polls its input source once per tick, calls [`sim::tick`], and hands
//! the returned [`sim::RenderSnapshot`] to whatever draws the game.

pub mod sim;
pub mod tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal fixed tick rate. All speeds in this crate are per-tick deltas;
    /// a variable-timestep host must scale velocities by `tick_rate / 60`.
    pub const TICK_RATE: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Hazards are pruned once they leave the arena by more than this margin
    pub const OFFSCREEN_MARGIN: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const MAX_LIVES: f32 = 2.0;

    /// Boss defaults (position is fixed for every level)
    pub const BOSS_X: f32 = 400.0;
    pub const BOSS_Y: f32 = 100.0;
    pub const BOSS_RADIUS: f32 = 30.0;
    /// Normal-attack shot speed, identical at every level (only the firing
    /// interval scales with difficulty)
    pub const BOSS_SHOT_SPEED: f32 = 2.5;

    /// Hazard contact radii (ambient projectile / boss mini-hazard)
    pub const AMBIENT_HAZARD_RADIUS: f32 = 10.0;
    pub const MINI_HAZARD_RADIUS: f32 = 8.0;

    /// Laser beam geometry
    pub const LASER_LENGTH: f32 = 400.0;
    pub const LASER_HIT_PAD: f32 = 5.0;

    /// Special-move scheduling
    pub const SPECIAL_TRIAL_CHANCE: f64 = 0.02;
    pub const SPECIAL_WARNING_TICKS: i32 = 20;
    pub const SPECIAL_COOLDOWN_TICKS: i32 = 180;

    /// Player combat
    pub const ATTACK_COOLDOWN_TICKS: i32 = 180;
    pub const ATTACK_DAMAGE_MIN: i32 = 1;
    pub const ATTACK_DAMAGE_MAX: i32 = 999;
    pub const BEAM_DISPLAY_TICKS: i32 = 15;

    /// Eating mechanic
    pub const EAT_RANGE_PAD: f32 = 12.0;
    pub const EAT_LIFE_GAIN: f32 = 0.5;
    pub const EAT_COOLDOWN_TICKS: i32 = 15;
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Center of the arena (player spawn/respawn point)
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::PLAYER_START_X, consts::PLAYER_START_Y)
}
