//! Read-only frame snapshots for rendering
//!
//! Renderers receive copies of what they draw, never the live state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{RunState, SimulationState};
use super::terrain::TerrainPoint;

/// Pose and size of the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub width: f32,
    pub height: f32,
}

/// The retained terrain points, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainWindow {
    pub points: Vec<TerrainPoint>,
}

impl TerrainWindow {
    /// Points translated into view space
    pub fn to_screen(&self, camera_offset: f32) -> Vec<Vec2> {
        self.points
            .iter()
            .map(|p| Vec2::new(p.x - camera_offset, p.y))
            .collect()
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub vehicle: VehicleSnapshot,
    pub terrain: TerrainWindow,
    pub distance: f32,
    pub camera_offset: f32,
    pub run_state: RunState,
    pub best_distance: f32,
}

impl FrameSnapshot {
    pub fn capture(state: &SimulationState) -> Self {
        let v = &state.vehicle;
        Self {
            vehicle: VehicleSnapshot {
                x: v.x,
                y: v.y,
                angle: v.angle,
                width: v.width,
                height: v.height,
            },
            terrain: TerrainWindow {
                points: state.terrain.points().iter().copied().collect(),
            },
            distance: state.distance,
            camera_offset: state.camera_offset,
            run_state: state.run_state,
            best_distance: state.records.best_distance(),
        }
    }

    /// Vehicle center in view space
    pub fn vehicle_screen_pos(&self) -> Vec2 {
        Vec2::new(self.vehicle.x - self.camera_offset, self.vehicle.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_copies_state() {
        let tuning = Tuning::default();
        let mut state = SimulationState::new(3, &tuning);
        state.vehicle.x = 500.0;
        state.update_view(&tuning);

        let snapshot = FrameSnapshot::capture(&state);
        assert_eq!(snapshot.vehicle.x, 500.0);
        assert_eq!(snapshot.terrain.points.len(), state.terrain.len());
        assert_eq!(snapshot.run_state, RunState::Menu);
        assert_eq!(snapshot.vehicle_screen_pos().x, tuning.viewport_width / 2.0);

        // Mutating the snapshot leaves the simulation alone
        let mut copy = snapshot.clone();
        copy.terrain.points.clear();
        assert!(!state.terrain.is_empty());
    }

    #[test]
    fn test_to_screen_applies_camera() {
        let window = TerrainWindow {
            points: vec![TerrainPoint::new(100.0, 300.0), TerrainPoint::new(150.0, 310.0)],
        };
        let screen = window.to_screen(100.0);
        assert_eq!(screen, vec![Vec2::new(0.0, 300.0), Vec2::new(50.0, 310.0)]);
    }

    #[test]
    fn test_snapshot_serializes() {
        let tuning = Tuning::default();
        let state = SimulationState::new(3, &tuning);
        let json = serde_json::to_string(&FrameSnapshot::capture(&state)).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run_state, RunState::Menu);
    }
}
