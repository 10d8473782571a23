//! Simulation state and core run types
//!
//! Everything a tick reads or writes lives in `SimulationState`, owned by a
//! single controller and passed explicitly to each step.

use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use super::vehicle::Vehicle;
use crate::consts::DISTANCE_SCALE;
use crate::records::RunRecords;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Title screen, waiting for a click
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended by a steep landing, waiting for a click to restart
    Crashed,
}

impl RunState {
    /// Whether physics advances in this state
    pub fn is_active(&self) -> bool {
        *self == RunState::Playing
    }
}

/// Things that happened during a tick, for the driver to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began
    RunStarted { seed: u64 },
    /// Track was extended ahead of the vehicle
    TerrainExtended { added: usize },
    /// Vehicle touched down after being airborne
    Landed { x: f32 },
    /// Run ended; `rank` is its place in the session records, if any
    Crashed {
        distance: f32,
        angle: f32,
        rank: Option<usize>,
    },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed of the current run's terrain
    pub seed: u64,
    pub run_state: RunState,
    pub vehicle: Vehicle,
    pub terrain: Terrain,
    /// Distance metric shown to the player (vehicle.x / 50)
    pub distance: f32,
    /// World x of the left edge of the view
    pub camera_offset: f32,
    /// Finished runs of this session, best first
    pub records: RunRecords,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Completed runs this session
    pub runs: u32,
    /// Whether the vehicle was on the ground last tick
    pub grounded: bool,
}

impl SimulationState {
    /// Create a session sitting at the menu
    ///
    /// The vehicle and an initial track are prepared so the menu can draw a
    /// backdrop; nothing moves until a run starts. `tuning` is expected to
    /// have passed `Tuning::validate`, though degenerate values never hang.
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut terrain = Terrain::from_tuning(tuning, seed);
        terrain.generate(tuning.segment_count, tuning);
        Self {
            seed,
            run_state: RunState::Menu,
            vehicle: Vehicle::new(tuning),
            terrain,
            distance: 0.0,
            camera_offset: 0.0,
            records: RunRecords::new(),
            time_ticks: 0,
            runs: 0,
            grounded: false,
        }
    }

    /// Recompute the derived view values from the vehicle position
    pub fn update_view(&mut self, tuning: &Tuning) {
        self.distance = self.vehicle.x / DISTANCE_SCALE;
        self.camera_offset = self.vehicle.x - tuning.viewport_width / 2.0;
    }

    /// Left edge past which terrain is no longer needed
    pub fn eviction_threshold(&self, tuning: &Tuning) -> f32 {
        self.camera_offset - tuning.viewport_width / 2.0
    }

    /// Seed for the run after the current one
    pub fn next_seed(&self) -> u64 {
        self.seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407)
    }
}
