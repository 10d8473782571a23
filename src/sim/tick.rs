//! Per-tick simulation step
//!
//! Advances the run by one frame-sized step. Physics constants are per tick,
//! so the caller is expected to tick at a fixed rate (see `FrameClock`).

use super::crash::{Landing, check_landing};
use super::state::{GameEvent, RunState, SimulationState};
use super::vehicle::{Throttle, Vehicle};
use crate::records::RunRecord;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Accelerate (right arrow / W)
    pub forward: bool,
    /// Brake and reverse (left arrow / S)
    pub reverse: bool,
    /// Click/tap, starts a run from the menu or after a crash
    pub click: bool,
}

impl TickInput {
    pub fn throttle(&self) -> Throttle {
        Throttle::from_controls(self.forward, self.reverse)
    }
}

/// Reset the vehicle and track and begin a run
pub fn start_game(state: &mut SimulationState, tuning: &Tuning, seed: u64) -> GameEvent {
    state.seed = seed;
    state.vehicle = Vehicle::new(tuning);
    state.terrain.reset(tuning, seed);
    state.terrain.generate(tuning.segment_count, tuning);
    state.distance = 0.0;
    state.camera_offset = 0.0;
    state.time_ticks = 0;
    state.grounded = false;
    state.run_state = RunState::Playing;

    log::info!("Run started with seed {seed}");
    GameEvent::RunStarted { seed }
}

/// Close the current run and file it in the session records
///
/// Leaves the session on the game-over screen, where the next click starts a
/// fresh run. Returns the run's rank in the records if it placed.
pub fn end_run(state: &mut SimulationState) -> Option<usize> {
    state.run_state = RunState::Crashed;
    state.runs += 1;
    let rank = state.records.record(RunRecord {
        distance: state.distance,
        seed: state.seed,
        ticks: state.time_ticks,
    });
    if let Some(rank) = rank {
        log::info!("Session record #{rank}: {:.1}m", state.distance);
    }
    rank
}

/// Advance the session by one tick
pub fn tick(state: &mut SimulationState, input: &TickInput, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.run_state {
        RunState::Menu => {
            if input.click {
                let seed = state.seed;
                events.push(start_game(state, tuning, seed));
            }
            return events;
        }
        RunState::Crashed => {
            if input.click {
                let seed = state.next_seed();
                events.push(start_game(state, tuning, seed));
            }
            return events;
        }
        RunState::Playing => {}
    }

    state.time_ticks += 1;

    // Thrust, clamp, translate
    state.vehicle.apply_throttle(input.throttle(), tuning);
    state.vehicle.translate(tuning);
    state.update_view(tuning);

    // Keep the track ahead of the vehicle before sampling it
    let added = state.terrain.extend_for(state.vehicle.x, tuning);
    if added > 0 {
        log::debug!(
            "Terrain extended by {added} points (now {})",
            state.terrain.len()
        );
        events.push(GameEvent::TerrainExtended { added });
    }
    let threshold = state.eviction_threshold(tuning);
    state.terrain.evict_before(threshold);

    // Ground contact and banking
    let contact = state.vehicle.resolve_ground_contact(&state.terrain, tuning);
    state.vehicle.align_to_terrain(&state.terrain);
    debug_assert!(state.vehicle.is_finite(), "vehicle state went non-finite");
    debug_assert!(state.vehicle.speed.abs() <= tuning.max_speed);

    if contact && !state.grounded {
        events.push(GameEvent::Landed {
            x: state.vehicle.x,
        });
    }
    state.grounded = contact;

    if let Landing::Crash { angle } = check_landing(contact, state.vehicle.angle, tuning.crash_angle)
    {
        log::info!(
            "Crashed at {:.1}m banked {:.1} degrees",
            state.distance,
            angle.to_degrees()
        );
        let rank = end_run(state);
        events.push(GameEvent::Crashed {
            distance: state.distance,
            angle,
            rank,
        });
    }

    events
}
