//! Vehicle dynamics
//!
//! A single body sliding along its heading. Orientation is never integrated:
//! every tick it snaps to the local terrain slope, airborne or not.

use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use crate::tuning::Tuning;

/// Control intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Throttle {
    #[default]
    Coast,
    Forward,
    Reverse,
}

impl Throttle {
    /// Forward wins when both directions are held
    pub fn from_controls(forward: bool, reverse: bool) -> Self {
        if forward {
            Throttle::Forward
        } else if reverse {
            Throttle::Reverse
        } else {
            Throttle::Coast
        }
    }
}

/// The player's vehicle (y grows downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub x: f32,
    pub y: f32,
    /// Signed speed along the heading
    pub speed: f32,
    /// Heading/bank in radians
    pub angle: f32,
    pub width: f32,
    pub height: f32,
    /// Speed gained per tick under thrust
    pub engine_power: f32,
}

impl Vehicle {
    /// Vehicle at its starting pose
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.start_x,
            y: tuning.start_y,
            speed: 0.0,
            angle: 0.0,
            width: tuning.vehicle_width,
            height: tuning.vehicle_height,
            engine_power: tuning.engine_power,
        }
    }

    /// Apply thrust or drag, then clamp to the speed limit
    pub fn apply_throttle(&mut self, throttle: Throttle, tuning: &Tuning) {
        match throttle {
            Throttle::Forward => self.speed += self.engine_power,
            Throttle::Reverse => self.speed -= self.engine_power,
            Throttle::Coast => self.speed *= tuning.drag,
        }
        self.speed = self.speed.clamp(-tuning.max_speed, tuning.max_speed);
    }

    /// Move along the current heading plus the constant gravity bias
    pub fn translate(&mut self, tuning: &Tuning) {
        self.x += self.speed * self.angle.cos();
        self.y += self.speed * self.angle.sin() + tuning.gravity;
    }

    /// y of the lower edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Snap onto the ground if the lower edge sank below it
    ///
    /// Returns true when contact occurred this tick.
    pub fn resolve_ground_contact(&mut self, terrain: &Terrain, tuning: &Tuning) -> bool {
        let ground_y = terrain.height_at(self.x);
        if self.bottom() > ground_y {
            self.y = ground_y - self.height / 2.0;
            self.speed *= tuning.ground_friction;
            true
        } else {
            false
        }
    }

    /// Bank to the terrain slope under the vehicle
    pub fn align_to_terrain(&mut self, terrain: &Terrain) {
        self.angle = terrain.slope_at(self.x);
    }

    /// All kinematic fields are real numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.speed.is_finite() && self.angle.is_finite()
    }
}
