//! Session, boss and entity state
//!
//! Everything the tick driver mutates lives on [`SessionState`]; there are no
//! process-wide singletons. Countdown timers are plain named fields, each
//! decremented exactly once per tick in a single pass (see `tick::run_timers`).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::tuning::{self, LevelConfig};
use crate::unit_from_angle;

/// Current phase of the encounter. Exactly one phase is active per tick;
/// `Victory` is terminal and only a restart leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncounterPhase {
    /// Timed phase where hazards stream in from the arena edges
    Survival,
    /// Boss is up: scheduled attacks, specials, player counter-attacks
    BossEncounter,
    /// All levels cleared; the simulation stops advancing
    Victory,
}

/// Hazard flavor, which decides the contact radius and renderer treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HazardKind {
    /// Edge-spawned or boss-fired projectile
    Ambient,
    /// Slow drifting hazard emitted by the level-3 boss
    Mini,
}

/// A moving threat. Owned exclusively by the session pool; it has no identity
/// beyond pool membership and is removed at most once per tick.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: HazardKind,
}

impl Hazard {
    pub fn ambient(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel, radius: AMBIENT_HAZARD_RADIUS, kind: HazardKind::Ambient }
    }

    pub fn mini(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel, radius: MINI_HAZARD_RADIUS, kind: HazardKind::Mini }
    }

    /// Off-bounds once outside the arena expanded by the pruning margin
    pub fn off_bounds(&self) -> bool {
        self.pos.x < -OFFSCREEN_MARGIN
            || self.pos.x > ARENA_WIDTH + OFFSCREEN_MARGIN
            || self.pos.y < -OFFSCREEN_MARGIN
            || self.pos.y > ARENA_HEIGHT + OFFSCREEN_MARGIN
    }
}

/// An instantaneous directional beam from the boss. Lives for a single tick:
/// drawn and collision-checked once, then discarded at the next tick start.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Laser {
    pub origin: Vec2,
    pub angle: f32,
}

impl Laser {
    pub fn endpoint(&self) -> Vec2 {
        self.origin + unit_from_angle(self.angle) * LASER_LENGTH
    }
}

/// A selected-but-unresolved player attack. At most one exists at a time;
/// it is consumed on the next encounter tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAttack {
    /// Attack identifier, 1-3, scoped to the current level
    pub slot: u8,
    pub label: &'static str,
}

/// Player-to-boss beam display record, armed when an attack resolves
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Beam {
    /// Visual category (matches the attack slot that fired it)
    pub category: u8,
    pub start: Vec2,
    pub end: Vec2,
    pub ticks_left: i32,
}

/// Boss-side state, reset whenever a boss encounter begins
#[derive(Debug, Clone, Serialize)]
pub struct BossState {
    /// Clamped to [0, level.boss_max_health]
    pub health: i32,
    pub pos: Vec2,
    /// Variant index (0 or 1) into the level's special catalog while a move
    /// is telegraphed; cleared when the batch fires
    pub active_special: Option<u8>,
    /// Ticks until a telegraphed special executes
    pub warning_ticks: i32,
    /// Ticks until the next special-move trial window
    pub special_cooldown: i32,
    /// Ticks until the next normal-attack shot
    pub shoot_timer: i32,
    /// Ticks until the next laser trial window
    pub laser_timer: i32,
    /// Ticks until the next mini-hazard trial window
    pub mini_timer: i32,
}

impl BossState {
    fn idle() -> Self {
        Self {
            health: 0,
            pos: Vec2::new(BOSS_X, BOSS_Y),
            active_special: None,
            warning_ticks: 0,
            special_cooldown: 0,
            shoot_timer: 0,
            laser_timer: 0,
            mini_timer: 0,
        }
    }

    /// Arm the boss for a new encounter: full health, every timer at zero
    pub fn arm(&mut self, max_health: i32) {
        *self = Self::idle();
        self.health = max_health;
    }

    /// Heal clamped to the level maximum
    pub fn heal(&mut self, amount: i32, max_health: i32) {
        self.health = (self.health + amount).min(max_health);
    }

    /// Damage clamped at zero; the defeat transition fires on the next tick
    pub fn damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }
}

/// Complete mutable simulation state, passed by reference into [`tick`]
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The session's single RNG stream. Restarts overwrite state but never
    /// reseed; determinism holds only within one process run.
    pub rng: Pcg32,
    /// Simulation tick counter (never reset)
    pub time_ticks: u64,
    /// Current level index, 1-based
    pub level: u32,
    pub phase: EncounterPhase,
    /// Ticks elapsed in the current phase
    pub phase_ticks: u32,
    /// Player lives, 0.0..=MAX_LIVES in 0.5 increments
    pub lives: f32,
    pub player_pos: Vec2,
    /// Hit-flash flag; clears the same tick the player recovers
    pub popped: bool,
    /// Ticks until the eating mechanic may consume another hazard
    pub eat_timer: i32,
    /// Shared cooldown gating all three attack options
    pub attack_cooldown: i32,
    pub pending_attack: Option<PlayerAttack>,
    pub beam: Option<Beam>,
    /// Single pool for ambient and mini hazards, insertion-ordered
    pub hazards: Vec<Hazard>,
    /// Lasers emitted this tick; cleared at the next tick start
    pub lasers: Vec<Laser>,
    pub boss: BossState,
}

impl SessionState {
    /// Fresh session at level 1, survival phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            level: 1,
            phase: EncounterPhase::Survival,
            phase_ticks: 0,
            lives: MAX_LIVES,
            player_pos: crate::arena_center(),
            popped: false,
            eat_timer: 0,
            attack_cooldown: 0,
            pending_attack: None,
            beam: None,
            hazards: Vec::new(),
            lasers: Vec::new(),
            boss: BossState::idle(),
        }
    }

    /// Configuration for the current level
    #[inline]
    pub fn config(&self) -> &'static LevelConfig {
        tuning::level(self.level)
    }

    /// Clear every combat record that must not straddle a phase boundary:
    /// pending attack, beam display, telegraphed special, attack cooldown.
    fn clear_combat_records(&mut self) {
        self.pending_attack = None;
        self.beam = None;
        self.attack_cooldown = 0;
        self.boss.active_special = None;
        self.boss.warning_ticks = 0;
    }

    /// Survival timer expired: switch to the boss encounter
    pub fn enter_boss_phase(&mut self) {
        let cfg = self.config();
        log::info!("level {} ({}): boss encounter begins", self.level, cfg.name);
        self.phase = EncounterPhase::BossEncounter;
        self.phase_ticks = 0;
        self.hazards.clear();
        self.lasers.clear();
        self.boss.arm(cfg.boss_max_health);
        self.clear_combat_records();
    }

    /// Boss defeated: start the next level's survival phase, or finish the run
    pub fn advance_level(&mut self) {
        if self.level >= tuning::LEVEL_COUNT {
            log::info!("level {} boss down - run complete", self.level);
            self.phase = EncounterPhase::Victory;
            self.hazards.clear();
            self.lasers.clear();
            self.clear_combat_records();
            return;
        }
        self.level += 1;
        log::info!("advancing to level {} ({})", self.level, self.config().name);
        self.phase = EncounterPhase::Survival;
        self.phase_ticks = 0;
        self.lives = MAX_LIVES;
        self.hazards.clear();
        self.lasers.clear();
        self.boss = BossState::idle();
        self.clear_combat_records();
    }

    /// Unconditional return to level 1 with full lives. Fired when lives run
    /// out or on an explicit restart event; a synchronous state overwrite, so
    /// nothing stays "in flight" across it.
    pub fn hard_reset(&mut self) {
        log::info!("session reset to level 1");
        self.level = 1;
        self.phase = EncounterPhase::Survival;
        self.phase_ticks = 0;
        self.lives = MAX_LIVES;
        self.player_pos = crate::arena_center();
        self.popped = false;
        self.eat_timer = 0;
        self.hazards.clear();
        self.lasers.clear();
        self.boss = BossState::idle();
        self.clear_combat_records();
    }

    /// Grant lives clamped to the maximum
    pub fn gain_lives(&mut self, amount: f32) {
        self.lives = (self.lives + amount).min(MAX_LIVES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_level_one_survival() {
        let state = SessionState::new(7);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, EncounterPhase::Survival);
        assert_eq!(state.lives, MAX_LIVES);
        assert!(state.hazards.is_empty());
        assert_eq!(state.config().name, "BUTTER");
    }

    #[test]
    fn enter_boss_phase_arms_boss_and_clears_pools() {
        let mut state = SessionState::new(7);
        state.hazards.push(Hazard::ambient(Vec2::new(10.0, 10.0), Vec2::X));
        state.attack_cooldown = 42;
        state.enter_boss_phase();

        assert_eq!(state.phase, EncounterPhase::BossEncounter);
        assert_eq!(state.boss.health, state.config().boss_max_health);
        assert!(state.hazards.is_empty());
        assert_eq!(state.attack_cooldown, 0);
        assert_eq!(state.boss.shoot_timer, 0);
        assert_eq!(state.boss.special_cooldown, 0);
        assert!(state.boss.active_special.is_none());
    }

    #[test]
    fn advance_past_last_level_is_victory() {
        let mut state = SessionState::new(7);
        state.level = tuning::LEVEL_COUNT;
        state.advance_level();
        assert_eq!(state.phase, EncounterPhase::Victory);
        assert_eq!(state.level, tuning::LEVEL_COUNT);
    }

    #[test]
    fn hard_reset_restores_level_one() {
        let mut state = SessionState::new(7);
        state.level = 3;
        state.lives = 0.0;
        state.enter_boss_phase();
        state.hard_reset();

        assert_eq!(state.level, 1);
        assert_eq!(state.phase, EncounterPhase::Survival);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.player_pos, crate::arena_center());
        assert!(state.hazards.is_empty() && state.lasers.is_empty());
    }

    #[test]
    fn boss_heal_and_damage_clamp() {
        let mut boss = BossState::idle();
        boss.arm(1000);
        boss.damage(5000);
        assert_eq!(boss.health, 0);
        boss.heal(99999, 1000);
        assert_eq!(boss.health, 1000);
    }

    #[test]
    fn hazard_off_bounds_uses_margin() {
        let inside = Hazard::ambient(Vec2::new(-19.0, 300.0), Vec2::X);
        assert!(!inside.off_bounds());
        let outside = Hazard::ambient(Vec2::new(-21.0, 300.0), Vec2::X);
        assert!(outside.off_bounds());
        let below = Hazard::ambient(Vec2::new(400.0, ARENA_HEIGHT + 21.0), Vec2::X);
        assert!(below.off_bounds());
    }
}
