//! Deterministic encounter simulation
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only (60 Hz nominal, speeds are per-tick deltas)
//! - Seeded RNG only, one stream per session
//! - No rendering, input polling or platform dependencies
//!
//! The single entry point is [`tick`]: one pass per tick reads the input
//! snapshot, advances every timer, mutates the entity pools, resolves
//! collisions and returns a render-ready [`RenderSnapshot`].

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, point_segment_distance};
pub use snapshot::RenderSnapshot;
pub use state::{
    Beam, BossState, EncounterPhase, Hazard, HazardKind, Laser, PlayerAttack, SessionState,
};
pub use tick::{InputEvent, TickInput, tick};
