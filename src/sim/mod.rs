//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick physics only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod crash;
pub mod snapshot;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod vehicle;

pub use clock::FrameClock;
pub use crash::{Landing, check_landing};
pub use snapshot::{FrameSnapshot, TerrainWindow, VehicleSnapshot};
pub use state::{GameEvent, RunState, SimulationState};
pub use terrain::{Terrain, TerrainPoint};
pub use tick::{TickInput, end_run, start_game, tick};
pub use vehicle::{Throttle, Vehicle};
