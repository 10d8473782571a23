//! Hill Rider - An endless hill-climb racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, vehicle physics, crash detection)
//! - `tuning`: Data-driven game balance
//! - `records`: Session best-runs table

pub mod records;
pub mod sim;
pub mod tuning;

pub use records::{RunRecord, RunRecords};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (physics constants are per tick at 60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame gap (seconds) the clock will try to catch up on
    pub const MAX_FRAME_GAP: f64 = 0.25;

    /// Viewport dimensions (world units == canvas pixels)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Terrain control points per viewport width (higher = smoother track)
    pub const TERRAIN_SMOOTHNESS: usize = 20;
    /// Vertical variation between consecutive terrain points. At the default
    /// spacing the steepest step banks about 74 degrees, past `CRASH_ANGLE`.
    pub const TERRAIN_AMPLITUDE: f32 = 300.0;
    /// Distance kept between the track and the bottom of the viewport
    pub const TERRAIN_FLOOR_MARGIN: f32 = 50.0;
    /// Points appended each time the vehicle nears the end of the track
    pub const TERRAIN_EXTEND_BATCH: usize = 10;
    /// Half-width of the finite-difference window used for slope
    pub const SLOPE_SAMPLE_DELTA: f32 = 10.0;

    /// Vehicle defaults
    pub const VEHICLE_START_X: f32 = 100.0;
    pub const VEHICLE_START_Y: f32 = 100.0;
    pub const VEHICLE_WIDTH: f32 = 60.0;
    pub const VEHICLE_HEIGHT: f32 = 30.0;
    pub const ENGINE_POWER: f32 = 0.2;
    pub const MAX_SPEED: f32 = 10.0;

    /// Speed multiplier per tick when no thrust is applied
    pub const DRAG: f32 = 0.98;
    /// Speed multiplier per tick while touching the ground
    pub const GROUND_FRICTION: f32 = 0.95;
    /// Constant downward bias added to y each tick
    pub const GRAVITY: f32 = 0.5;
    /// Landing at a steeper bank than this ends the run (~72 degrees)
    pub const CRASH_ANGLE: f32 = std::f32::consts::PI / 2.5;

    /// World units per distance-meter shown to the player
    pub const DISTANCE_SCALE: f32 = 50.0;
}

/// Horizontal spacing between terrain points for a viewport and point count
#[inline]
pub fn segment_spacing(viewport_width: f32, segment_count: usize) -> f32 {
    viewport_width / (segment_count.max(2) - 1) as f32
}
