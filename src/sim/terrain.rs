//! Procedural heightfield terrain
//!
//! The track is a random walk of control points at fixed horizontal spacing,
//! sampled by linear interpolation. Points are appended ahead of the vehicle
//! and dropped once they scroll out behind the camera, so memory stays
//! proportional to the viewport rather than to distance travelled.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SLOPE_SAMPLE_DELTA;
use crate::tuning::Tuning;

/// A control vertex of the heightfield (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainPoint {
    pub x: f32,
    pub y: f32,
}

impl TerrainPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Ordered, evictable heightfield with its own seeded generator
#[derive(Debug, Clone)]
pub struct Terrain {
    points: VecDeque<TerrainPoint>,
    /// Horizontal distance between consecutive points
    spacing: f32,
    /// Height the walk starts from when the track is empty
    origin_y: f32,
    rng: Pcg32,
}

impl Terrain {
    /// Create an empty terrain
    pub fn new(spacing: f32, origin_y: f32, seed: u64) -> Self {
        Self {
            points: VecDeque::new(),
            spacing,
            origin_y,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create an empty terrain shaped by `tuning`
    pub fn from_tuning(tuning: &Tuning, seed: u64) -> Self {
        Self::new(tuning.spacing(), tuning.midline(), seed)
    }

    /// Build a terrain from explicit points (fixtures, replays)
    ///
    /// Points must be evenly spaced by `spacing` and ascending in x.
    pub fn from_points(spacing: f32, points: &[(f32, f32)], seed: u64) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
        let origin_y = points.first().map_or(0.0, |p| p.1);
        let mut terrain = Self::new(spacing, origin_y, seed);
        terrain
            .points
            .extend(points.iter().map(|&(x, y)| TerrainPoint::new(x, y)));
        terrain
    }

    /// Drop every point and restart the generator from `seed`
    pub fn reset(&mut self, tuning: &Tuning, seed: u64) {
        self.points.clear();
        self.spacing = tuning.spacing();
        self.origin_y = tuning.midline();
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn points(&self) -> &VecDeque<TerrainPoint> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn first(&self) -> Option<TerrainPoint> {
        self.points.front().copied()
    }

    pub fn last(&self) -> Option<TerrainPoint> {
        self.points.back().copied()
    }

    /// Append `n` points continuing the random walk from the rightmost point
    ///
    /// An empty track continues from a virtual point one spacing left of the
    /// origin at the midline, so the first generated point lands at x = 0.
    pub fn generate(&mut self, n: usize, tuning: &Tuning) {
        let half = tuning.amplitude / 2.0;
        let (lo, hi) = (tuning.min_terrain_y(), tuning.max_terrain_y());

        let mut prev = self
            .last()
            .unwrap_or(TerrainPoint::new(-self.spacing, self.origin_y));

        for _ in 0..n {
            let delta = if half > 0.0 {
                self.rng.random_range(-half..=half)
            } else {
                0.0
            };
            let point = TerrainPoint::new(prev.x + self.spacing, (prev.y + delta).clamp(lo, hi));
            self.points.push_back(point);
            prev = point;
        }
    }

    /// Generate batches until the track reaches a viewport beyond `vehicle_x`
    ///
    /// Returns the number of points added. A track whose points do not
    /// advance (zero spacing) is never extended.
    pub fn extend_for(&mut self, vehicle_x: f32, tuning: &Tuning) -> usize {
        if !vehicle_x.is_finite() || self.spacing.is_nan() || self.spacing <= 0.0 {
            return 0;
        }
        let batch = tuning.extend_batch.max(1);
        let mut added = 0;
        while self
            .last()
            .is_none_or(|last| vehicle_x > last.x - tuning.viewport_width)
        {
            self.generate(batch, tuning);
            added += batch;
        }
        added
    }

    /// Drop points left of `threshold`, always keeping at least two
    ///
    /// Returns the number of points removed.
    pub fn evict_before(&mut self, threshold: f32) -> usize {
        let mut removed = 0;
        while self.points.len() > 2 && self.points.front().is_some_and(|p| p.x < threshold) {
            self.points.pop_front();
            removed += 1;
        }
        removed
    }

    /// Interpolated ground height at `x`
    ///
    /// Total: positions left of the first point read the first height, right
    /// of the last point read the last height, and an empty track reads the
    /// midline.
    pub fn height_at(&self, x: f32) -> f32 {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return self.origin_y;
        };
        debug_assert!(!x.is_nan(), "terrain sampled at NaN");
        if x.is_nan() || x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        let len = self.points.len();
        // Index arithmetic first, then settle against stored positions since
        // accumulated x values drift from exact multiples of the spacing.
        let mut i = (((x - first.x) / self.spacing).floor() as usize).min(len - 2);
        while i > 0 && x < self.points[i].x {
            i -= 1;
        }
        while i + 2 < len && x >= self.points[i + 1].x {
            i += 1;
        }

        let (a, b) = (self.points[i], self.points[i + 1]);
        let t = (x - a.x) / (b.x - a.x);
        a.y * (1.0 - t) + b.y * t
    }

    /// Local slope angle at `x` (radians, positive when the ground drops)
    pub fn slope_at(&self, x: f32) -> f32 {
        let delta = SLOPE_SAMPLE_DELTA;
        (self.height_at(x + delta) - self.height_at(x - delta)).atan2(2.0 * delta)
    }
}
