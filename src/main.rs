//! Headless demo driver
//!
//! Runs the encounter simulation with a small autopilot standing in for a
//! human: it drifts away from the nearest hazard, holds the eat trigger and
//! fires whenever the attack cooldown allows. Lets you watch the state machine
//! through logs without a renderer attached:
//!
//! ```sh
//! RUST_LOG=info popcorn-panic [seed]
//! ```

use popcorn_panic::sim::{
    EncounterPhase, InputEvent, RenderSnapshot, SessionState, TickInput, tick,
};

const DEFAULT_SEED: u64 = 0x5EED_CAFE;
const DEMO_TICKS: u64 = 120_000;

/// Synthesize one tick of input from the last render snapshot
fn autopilot(snap: &RenderSnapshot) -> TickInput {
    let mut input = TickInput { eat: true, ..Default::default() };

    // Drift away from the most dangerous hazard (closest to the player)
    let nearest = snap.hazards.iter().min_by(|a, b| {
        a.pos
            .distance_squared(snap.player_pos)
            .partial_cmp(&b.pos.distance_squared(snap.player_pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(hazard) = nearest {
        let away = snap.player_pos - hazard.pos;
        if away.length() < 120.0 {
            input.left = away.x < 0.0;
            input.right = away.x > 0.0;
            input.up = away.y < 0.0;
            input.down = away.y > 0.0;
        }
    }

    if snap.attack_ready {
        // Rotate through the three options; damage is flat, identity cosmetic
        let slot = (snap.tick % 3 + 1) as u8;
        input.event = Some(InputEvent::SelectAttack(slot));
    }

    input
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    log::info!("popcorn-panic demo starting, seed {seed}");

    let mut state = SessionState::new(seed);
    let mut snap = tick(&mut state, &TickInput::default());
    for _ in 1..DEMO_TICKS {
        let input = autopilot(&snap);
        snap = tick(&mut state, &input);
        if snap.phase == EncounterPhase::Victory {
            log::info!("all {} levels cleared at tick {}", snap.level, snap.tick);
            break;
        }
    }

    match serde_json::to_string_pretty(&snap) {
        Ok(json) => log::debug!("final snapshot:\n{json}"),
        Err(err) => log::warn!("snapshot serialization failed: {err}"),
    }
    log::info!(
        "demo finished at tick {}: level {} ({}), {:?}, {:.1} lives",
        snap.tick,
        snap.level,
        snap.level_name,
        snap.phase,
        snap.player_lives
    );
}
