//! Fixed timestep simulation tick
//!
//! One pass per tick, in a fixed order: timers decrement first, the state
//! machine evaluates transitions, then the entity stages run (player movement,
//! eating, hazard movement + collision, lasers, the special-move scheduler,
//! boss emissions, player combat). Later stages read state mutated by earlier
//! ones; a special-move batch emitted this tick is therefore collision-eligible
//! on the next tick, not this one.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_overlap, laser_hits_player};
use super::snapshot::RenderSnapshot;
use super::state::{Beam, EncounterPhase, Hazard, HazardKind, Laser, PlayerAttack, SessionState};
use crate::consts::*;
use crate::tuning::MovePattern;
use crate::unit_from_angle;

/// Discrete one-shot input events; at most one arrives per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Select attack 1-3 (boss encounter only, gated by the shared cooldown)
    SelectAttack(u8),
    /// Full session reset, honored in any phase
    Restart,
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Held eat trigger
    pub eat: bool,
    pub event: Option<InputEvent>,
}

/// Outcome of a stage that may tear the whole session down mid-tick
#[derive(PartialEq)]
enum StageFlow {
    Continue,
    /// Lives ran out; the state was hard-reset and the tick ends here
    SessionReset,
}

/// Advance the simulation by one tick and capture the render snapshot.
///
/// The snapshot is fully settled: no stage runs after it is taken.
pub fn tick(state: &mut SessionState, input: &TickInput) -> RenderSnapshot {
    if input.event == Some(InputEvent::Restart) {
        state.hard_reset();
    }

    // Terminal state: nothing advances until a restart
    if state.phase == EncounterPhase::Victory {
        return RenderSnapshot::capture(state);
    }

    state.time_ticks += 1;
    state.phase_ticks += 1;

    run_timers(state);
    let entered_boss_phase = run_transitions(state);
    if state.phase == EncounterPhase::Victory {
        return RenderSnapshot::capture(state);
    }

    move_player(state, input);
    try_eat(state, input);

    if state.phase == EncounterPhase::Survival {
        survival_spawn(state);
    }

    if resolve_hazards(state) == StageFlow::SessionReset {
        return RenderSnapshot::capture(state);
    }
    if resolve_lasers(state) == StageFlow::SessionReset {
        return RenderSnapshot::capture(state);
    }

    // The boss stays quiescent on the tick its encounter begins; all its
    // timers must read zero in that snapshot.
    if state.phase == EncounterPhase::BossEncounter && !entered_boss_phase {
        run_special_moves(state);
        run_boss_emissions(state);
        run_player_combat(state, input);
    }

    RenderSnapshot::capture(state)
}

/// Decrement every countdown once, before any transition is evaluated.
/// Timers rest at zero; gates test `<= 0`.
fn run_timers(state: &mut SessionState) {
    if state.eat_timer > 0 {
        state.eat_timer -= 1;
    }
    if state.attack_cooldown > 0 {
        state.attack_cooldown -= 1;
    }
    if let Some(mut beam) = state.beam.take() {
        beam.ticks_left -= 1;
        if beam.ticks_left > 0 {
            state.beam = Some(beam);
        }
    }
    if state.phase == EncounterPhase::BossEncounter {
        let boss = &mut state.boss;
        if boss.shoot_timer > 0 {
            boss.shoot_timer -= 1;
        }
        if boss.laser_timer > 0 {
            boss.laser_timer -= 1;
        }
        if boss.mini_timer > 0 {
            boss.mini_timer -= 1;
        }
        if boss.special_cooldown > 0 {
            boss.special_cooldown -= 1;
        }
        if boss.active_special.is_some() && boss.warning_ticks > 0 {
            boss.warning_ticks -= 1;
        }
    }
}

/// Phase transitions. Returns true when the survival timer just flipped the
/// session into a boss encounter (the boss skips its stages on that tick).
fn run_transitions(state: &mut SessionState) -> bool {
    match state.phase {
        EncounterPhase::Survival => {
            let limit = state.config().time_limit_ticks();
            if state.phase_ticks > limit && !state.popped {
                state.enter_boss_phase();
                return true;
            }
        }
        EncounterPhase::BossEncounter => {
            if state.boss.health <= 0 {
                state.advance_level();
            }
        }
        EncounterPhase::Victory => {}
    }
    false
}

fn move_player(state: &mut SessionState, input: &TickInput) {
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= PLAYER_SPEED;
    }
    if input.right {
        delta.x += PLAYER_SPEED;
    }
    if input.up {
        delta.y -= PLAYER_SPEED;
    }
    if input.down {
        delta.y += PLAYER_SPEED;
    }
    state.player_pos += delta;
    state.player_pos.x = state.player_pos.x.clamp(PLAYER_RADIUS, ARENA_WIDTH - PLAYER_RADIUS);
    state.player_pos.y = state.player_pos.y.clamp(PLAYER_RADIUS, ARENA_HEIGHT - PLAYER_RADIUS);
}

/// Eating mechanic: convert at most one nearby hazard into +0.5 lives.
/// First pool match wins; removal keeps insertion order for the rest.
fn try_eat(state: &mut SessionState, input: &TickInput) {
    if !input.eat || state.eat_timer > 0 || state.lives <= 0.0 {
        return;
    }
    let reach = PLAYER_RADIUS + EAT_RANGE_PAD;
    let player = state.player_pos;
    if let Some(index) = state
        .hazards
        .iter()
        .position(|h| h.pos.distance_squared(player) <= reach * reach)
    {
        state.hazards.remove(index);
        state.gain_lives(EAT_LIFE_GAIN);
        state.eat_timer = EAT_COOLDOWN_TICKS;
    }
}

/// Survival-phase ambient spawns: one Bernoulli trial per tick, a hazard from
/// a random arena edge moving straight inward
fn survival_spawn(state: &mut SessionState) {
    let cfg = state.config();
    if !state.rng.random_bool(cfg.spawn_chance) {
        return;
    }
    let speed = cfg.projectile_speed;
    let side = state.rng.random_range(0..4);
    let (pos, vel) = match side {
        0 => {
            let x = state.rng.random_range(0.0..=ARENA_WIDTH);
            (Vec2::new(x, 0.0), Vec2::new(0.0, speed))
        }
        1 => {
            let x = state.rng.random_range(0.0..=ARENA_WIDTH);
            (Vec2::new(x, ARENA_HEIGHT), Vec2::new(0.0, -speed))
        }
        2 => {
            let y = state.rng.random_range(0.0..=ARENA_HEIGHT);
            (Vec2::new(0.0, y), Vec2::new(speed, 0.0))
        }
        _ => {
            let y = state.rng.random_range(0.0..=ARENA_HEIGHT);
            (Vec2::new(ARENA_WIDTH, y), Vec2::new(-speed, 0.0))
        }
    };
    state.hazards.push(Hazard::ambient(pos, vel));
}

/// Apply one hazard/laser contact to the player. With lives left the player
/// recovers at the arena center; otherwise the whole session resets on the
/// spot and nothing else runs this tick.
fn apply_player_hit(state: &mut SessionState) -> StageFlow {
    state.lives -= 1.0;
    state.popped = true;
    if state.lives > 0.0 {
        state.player_pos = crate::arena_center();
        state.popped = false;
        StageFlow::Continue
    } else {
        state.hard_reset();
        StageFlow::SessionReset
    }
}

/// Move every hazard, then run one mark-and-compact removal pass. Each hazard
/// is removed at most once per tick, criteria checked in order: consumed by
/// collision (boss during the encounter, player during survival), then
/// off-bounds. Eaten hazards were already removed before this stage.
fn resolve_hazards(state: &mut SessionState) -> StageFlow {
    for hazard in &mut state.hazards {
        hazard.pos += hazard.vel;
    }

    let in_boss_phase = state.phase == EncounterPhase::BossEncounter;
    let pool = std::mem::take(&mut state.hazards);
    let mut survivors = Vec::with_capacity(pool.len());

    for hazard in pool {
        if in_boss_phase {
            // Stray ambient hazards never damage the boss; it just absorbs
            // them. Mini hazards are its own emissions and pass through.
            if hazard.kind == HazardKind::Ambient
                && circles_overlap(hazard.pos, hazard.radius, state.boss.pos, BOSS_RADIUS)
            {
                continue;
            }
        } else if circles_overlap(hazard.pos, hazard.radius, state.player_pos, PLAYER_RADIUS) {
            if apply_player_hit(state) == StageFlow::SessionReset {
                // Pools were cleared by the reset; drop the rest of this pass
                return StageFlow::SessionReset;
            }
            continue;
        }
        if hazard.off_bounds() {
            continue;
        }
        survivors.push(hazard);
    }

    state.hazards = survivors;
    StageFlow::Continue
}

/// Lasers live a single tick: emitted last tick, drawn in that snapshot,
/// collision-checked here once, then discarded.
fn resolve_lasers(state: &mut SessionState) -> StageFlow {
    if state.phase == EncounterPhase::Survival {
        let lasers = std::mem::take(&mut state.lasers);
        for laser in &lasers {
            if laser_hits_player(laser, state.player_pos)
                && apply_player_hit(state) == StageFlow::SessionReset
            {
                return StageFlow::SessionReset;
            }
        }
    } else {
        state.lasers.clear();
    }
    StageFlow::Continue
}

/// Special-move scheduler: execute a telegraphed move whose warning just ran
/// out, otherwise roll for a new one. The cooldown (180) dwarfs the warning
/// window (20), so a new trial can never land while one is telegraphed.
fn run_special_moves(state: &mut SessionState) {
    let cfg = state.config();
    if let Some(variant) = state.boss.active_special {
        if state.boss.warning_ticks <= 0 {
            let pattern = cfg.specials[variant as usize];
            emit_special(state, pattern);
            if let Some((lo, hi)) = cfg.heal_range {
                let amount = state.rng.random_range(lo..=hi);
                state.boss.heal(amount, cfg.boss_max_health);
                log::debug!("{} heals {amount} after special", cfg.name);
            }
            state.boss.active_special = None;
        }
    } else if state.boss.special_cooldown <= 0
        && state.rng.random_bool(SPECIAL_TRIAL_CHANCE)
    {
        let variant = state.rng.random_range(0..2u8);
        state.boss.active_special = Some(variant);
        state.boss.warning_ticks = SPECIAL_WARNING_TICKS;
        state.boss.special_cooldown = SPECIAL_COOLDOWN_TICKS;
        log::debug!("{} telegraphs special variant {variant}", cfg.name);
    }
}

/// Emit one special-move hazard batch in a single tick
fn emit_special(state: &mut SessionState, pattern: MovePattern) {
    use std::f32::consts::TAU;
    let origin = state.boss.pos;
    match pattern {
        MovePattern::Radial { count, speed } => {
            for i in 0..count {
                let angle = i as f32 / count as f32 * TAU;
                state.hazards.push(Hazard::ambient(origin, unit_from_angle(angle) * speed));
            }
        }
        MovePattern::Spread { count, step, speed } => {
            let mid = (count as f32 - 1.0) / 2.0;
            for i in 0..count {
                let angle = (i as f32 - mid) * step;
                state.hazards.push(Hazard::ambient(origin, unit_from_angle(angle) * speed));
            }
        }
        MovePattern::Rain { count, fall_speed, drift } => {
            for _ in 0..count {
                let x = state.rng.random_range(100.0..=ARENA_WIDTH - 100.0);
                let vx = state.rng.random_range(-drift..=drift);
                state
                    .hazards
                    .push(Hazard::ambient(Vec2::new(x, origin.y), Vec2::new(vx, fall_speed)));
            }
        }
        MovePattern::Fan { count, span, offset, speed } => {
            for i in 0..count {
                let angle = i as f32 / count as f32 * span + offset;
                state.hazards.push(Hazard::ambient(origin, unit_from_angle(angle) * speed));
            }
        }
        MovePattern::Scatter { count, jitter, speed } => {
            for i in 0..count {
                let angle = i as f32 / count as f32 * TAU + state.rng.random_range(0.0..jitter);
                state.hazards.push(Hazard::ambient(origin, unit_from_angle(angle) * speed));
            }
        }
        MovePattern::EdgeConverge { side_count, band_count, drift } => {
            for _ in 0..side_count {
                let x = if state.rng.random_bool(0.5) { 50.0 } else { ARENA_WIDTH - 50.0 };
                let y = state.rng.random_range(100.0..=ARENA_HEIGHT - 100.0);
                let vel = Vec2::new(
                    state.rng.random_range(-drift..=drift),
                    state.rng.random_range(-drift..=drift),
                );
                state.hazards.push(Hazard::ambient(Vec2::new(x, y), vel));
            }
            for _ in 0..band_count {
                let y = if state.rng.random_bool(0.5) { 50.0 } else { ARENA_HEIGHT - 50.0 };
                let x = state.rng.random_range(100.0..=ARENA_WIDTH - 100.0);
                let vel = Vec2::new(
                    state.rng.random_range(-drift..=drift),
                    state.rng.random_range(-drift..=drift),
                );
                state.hazards.push(Hazard::ambient(Vec2::new(x, y), vel));
            }
        }
    }
}

/// Timer-gated boss emissions: normal shots every `shoot_interval` ticks, plus
/// per-level laser and mini-hazard Bernoulli windows
fn run_boss_emissions(state: &mut SessionState) {
    let cfg = state.config();
    let origin = state.boss.pos;

    if state.boss.shoot_timer <= 0 {
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        state
            .hazards
            .push(Hazard::ambient(origin, unit_from_angle(angle) * BOSS_SHOT_SPEED));
        state.boss.shoot_timer = cfg.shoot_interval;
    }

    if let Some(spec) = cfg.laser {
        if state.boss.laser_timer <= 0 && state.rng.random_bool(spec.chance) {
            let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
            state.lasers.push(Laser { origin, angle });
            state.boss.laser_timer = spec.cooldown;
        }
    }

    if let Some(mini) = cfg.mini_hazards {
        if state.boss.mini_timer <= 0 && state.rng.random_bool(mini.emission.chance) {
            let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
            state
                .hazards
                .push(Hazard::mini(origin, unit_from_angle(angle) * mini.speed));
            state.boss.mini_timer = mini.emission.cooldown;
        }
    }
}

/// Player combat: resolve last tick's pending attack, then accept a new
/// selection. Out-of-window selections are silently ignored.
fn run_player_combat(state: &mut SessionState, input: &TickInput) {
    if let Some(attack) = state.pending_attack.take() {
        let damage = state.rng.random_range(ATTACK_DAMAGE_MIN..=ATTACK_DAMAGE_MAX);
        state.boss.damage(damage);
        state.beam = Some(Beam {
            category: attack.slot,
            start: state.player_pos,
            end: state.boss.pos,
            ticks_left: BEAM_DISPLAY_TICKS,
        });
        state.attack_cooldown = ATTACK_COOLDOWN_TICKS;
        log::debug!("{} hits for {damage} ({} hp left)", attack.label, state.boss.health);
    }

    if let Some(InputEvent::SelectAttack(slot)) = input.event {
        if (1..=3).contains(&slot)
            && state.attack_cooldown <= 0
            && state.pending_attack.is_none()
        {
            let label = state.config().attack_labels[(slot - 1) as usize];
            state.pending_attack = Some(PlayerAttack { slot, label });
        }
    }
}
