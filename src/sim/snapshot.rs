//! Render-ready state snapshot
//!
//! Built once at the end of every tick and handed to the external renderer,
//! which is a pure consumer: it never mutates core state and the core never
//! queries it back. The snapshot is self-contained so the renderer can be
//! driven from another thread, a recording, or a JSON dump.

use glam::Vec2;
use serde::Serialize;

use crate::sim::state::{Beam, EncounterPhase, Hazard, Laser, SessionState};
use crate::tuning::BossVisual;

/// Immutable post-tick view of the simulation
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub phase: EncounterPhase,
    pub level: u32,
    pub level_name: &'static str,
    /// Hazard color tag from the level catalog
    pub level_color: [u8; 3],
    /// Seconds left in the survival phase (zero during a boss encounter)
    pub survival_secs_left: u32,
    pub boss_visual: BossVisual,
    pub boss_health: i32,
    pub boss_max_health: i32,
    pub boss_pos: Vec2,
    /// True while a special move is telegraphed and its warning is counting
    pub special_warning: bool,
    pub hazards: Vec<Hazard>,
    pub lasers: Vec<Laser>,
    pub player_pos: Vec2,
    pub player_lives: f32,
    /// Hit-flash flag
    pub player_popped: bool,
    /// True when an attack may be selected this tick
    pub attack_ready: bool,
    /// Ticks until the shared attack cooldown expires (zero when ready)
    pub attack_cooldown_left: i32,
    /// Active player-to-boss beam display record, if any
    pub beam: Option<Beam>,
}

impl RenderSnapshot {
    /// Capture the settled post-tick state
    pub fn capture(state: &SessionState) -> Self {
        let cfg = state.config();
        let limit = cfg.time_limit_ticks();
        let survival_secs_left = if state.phase == EncounterPhase::Survival {
            limit.saturating_sub(state.phase_ticks) / crate::consts::TICK_RATE
        } else {
            0
        };
        let in_boss_phase = state.phase == EncounterPhase::BossEncounter;

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            level: state.level,
            level_name: cfg.name,
            level_color: cfg.color,
            survival_secs_left,
            boss_visual: cfg.boss_visual,
            boss_health: state.boss.health,
            boss_max_health: cfg.boss_max_health,
            boss_pos: state.boss.pos,
            special_warning: in_boss_phase
                && state.boss.active_special.is_some()
                && state.boss.warning_ticks > 0,
            hazards: state.hazards.clone(),
            lasers: state.lasers.clone(),
            player_pos: state.player_pos,
            player_lives: state.lives,
            player_popped: state.popped,
            attack_ready: in_boss_phase
                && state.attack_cooldown <= 0
                && state.pending_attack.is_none(),
            attack_cooldown_left: state.attack_cooldown.max(0),
            beam: state.beam,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_LIVES;

    #[test]
    fn fresh_session_snapshot() {
        let state = SessionState::new(3);
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.phase, EncounterPhase::Survival);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.level_name, "BUTTER");
        assert_eq!(snap.survival_secs_left, 60);
        assert_eq!(snap.player_lives, MAX_LIVES);
        assert!(!snap.attack_ready);
        assert!(snap.beam.is_none());
        assert!(!snap.special_warning);
    }

    #[test]
    fn attack_ready_only_during_boss_phase() {
        let mut state = SessionState::new(3);
        assert!(!RenderSnapshot::capture(&state).attack_ready);
        state.enter_boss_phase();
        assert!(RenderSnapshot::capture(&state).attack_ready);
        state.attack_cooldown = 90;
        let snap = RenderSnapshot::capture(&state);
        assert!(!snap.attack_ready);
        assert_eq!(snap.attack_cooldown_left, 90);
    }

    #[test]
    fn snapshot_serializes() {
        let state = SessionState::new(3);
        let snap = RenderSnapshot::capture(&state);
        let json = serde_json::to_string(&snap).expect("snapshot must serialize");
        assert!(json.contains("\"Survival\""));
    }
}
