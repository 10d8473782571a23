//! Game tuning and balance
//!
//! Every physics and terrain constant the simulation reads lives here so a
//! track can be reshaped from JSON without a rebuild.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::segment_spacing;

/// Track roughness presets
///
/// `Gentle` never banks far enough to crash. `Rolling` and `Rugged` can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrackPreset {
    Gentle,
    #[default]
    Rolling,
    Rugged,
}

impl TrackPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackPreset::Gentle => "Gentle",
            TrackPreset::Rolling => "Rolling",
            TrackPreset::Rugged => "Rugged",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gentle" => Some(TrackPreset::Gentle),
            "rolling" => Some(TrackPreset::Rolling),
            "rugged" => Some(TrackPreset::Rugged),
            _ => None,
        }
    }

    /// Vertical variation between consecutive points
    pub fn amplitude(&self) -> f32 {
        match self {
            TrackPreset::Gentle => 40.0,
            TrackPreset::Rolling => TERRAIN_AMPLITUDE,
            TrackPreset::Rugged => 400.0,
        }
    }

    /// Points per viewport width
    pub fn segment_count(&self) -> usize {
        match self {
            TrackPreset::Gentle => 40,
            TrackPreset::Rolling => TERRAIN_SMOOTHNESS,
            TrackPreset::Rugged => 16,
        }
    }
}

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed into a `Tuning`
    Parse(String),
    /// A value was NaN or infinite
    NonFinite { field: &'static str },
    /// A value that must be strictly positive was not
    NotPositive { field: &'static str, value: f32 },
    /// Fewer than two points per viewport cannot form a segment
    TooFewSegments { found: usize },
    /// The extension batch must add at least one point
    EmptyBatch,
    /// A per-tick multiplier fell outside (0, 1]
    FactorOutOfRange { field: &'static str, value: f32 },
    /// Negative terrain amplitude
    NegativeAmplitude { value: f32 },
    /// The vertical clamp band is empty
    EmptyTerrainBand { min: f32, max: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid tuning JSON: {msg}"),
            Self::NonFinite { field } => write!(f, "{field} must be a finite number"),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::TooFewSegments { found } => {
                write!(f, "segment_count must be at least 2, got {found}")
            }
            Self::EmptyBatch => write!(f, "extend_batch must be at least 1"),
            Self::FactorOutOfRange { field, value } => {
                write!(f, "{field} must be in (0, 1], got {value}")
            }
            Self::NegativeAmplitude { value } => {
                write!(f, "amplitude must not be negative, got {value}")
            }
            Self::EmptyTerrainBand { min, max } => {
                write!(f, "terrain band [{min}, {max}] is empty; enlarge viewport_height")
            }
        }
    }
}

impl std::error::Error for TuningError {}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Terrain ===
    /// Points per viewport width
    pub segment_count: usize,
    /// Random walk step range is [-amplitude/2, amplitude/2]
    pub amplitude: f32,
    /// Lowest allowed terrain sits this far above the viewport bottom
    pub floor_margin: f32,
    /// Points generated per extension
    pub extend_batch: usize,

    // === Vehicle ===
    pub start_x: f32,
    pub start_y: f32,
    pub vehicle_width: f32,
    pub vehicle_height: f32,
    pub engine_power: f32,
    pub max_speed: f32,

    // === Physics ===
    pub drag: f32,
    pub ground_friction: f32,
    pub gravity: f32,
    /// Radians
    pub crash_angle: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            segment_count: TERRAIN_SMOOTHNESS,
            amplitude: TERRAIN_AMPLITUDE,
            floor_margin: TERRAIN_FLOOR_MARGIN,
            extend_batch: TERRAIN_EXTEND_BATCH,

            start_x: VEHICLE_START_X,
            start_y: VEHICLE_START_Y,
            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            engine_power: ENGINE_POWER,
            max_speed: MAX_SPEED,

            drag: DRAG,
            ground_friction: GROUND_FRICTION,
            gravity: GRAVITY,
            crash_angle: CRASH_ANGLE,
        }
    }
}

impl Tuning {
    /// Create tuning from a track preset (applies preset defaults)
    pub fn from_preset(preset: TrackPreset) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Apply a track preset (updates terrain shape only)
    pub fn apply_preset(&mut self, preset: TrackPreset) {
        self.amplitude = preset.amplitude();
        self.segment_count = preset.segment_count();
    }

    /// Parse and validate tuning from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain numeric struct, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("amplitude", self.amplitude),
            ("floor_margin", self.floor_margin),
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("engine_power", self.engine_power),
            ("max_speed", self.max_speed),
            ("drag", self.drag),
            ("ground_friction", self.ground_friction),
            ("gravity", self.gravity),
            ("crash_angle", self.crash_angle),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NonFinite { field });
        }

        let positives = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("engine_power", self.engine_power),
            ("max_speed", self.max_speed),
            ("crash_angle", self.crash_angle),
        ];
        if let Some(&(field, value)) = positives.iter().find(|(_, v)| *v <= 0.0) {
            return Err(TuningError::NotPositive { field, value });
        }

        if self.segment_count < 2 {
            return Err(TuningError::TooFewSegments {
                found: self.segment_count,
            });
        }
        if self.extend_batch == 0 {
            return Err(TuningError::EmptyBatch);
        }
        if self.amplitude < 0.0 {
            return Err(TuningError::NegativeAmplitude {
                value: self.amplitude,
            });
        }
        for (field, value) in [("drag", self.drag), ("ground_friction", self.ground_friction)] {
            if value <= 0.0 || value > 1.0 {
                return Err(TuningError::FactorOutOfRange { field, value });
            }
        }
        let (min, max) = (self.min_terrain_y(), self.max_terrain_y());
        if min > max {
            return Err(TuningError::EmptyTerrainBand { min, max });
        }
        Ok(())
    }

    /// Horizontal distance between terrain points
    pub fn spacing(&self) -> f32 {
        segment_spacing(self.viewport_width, self.segment_count)
    }

    /// Highest the track may climb (y grows downward)
    pub fn min_terrain_y(&self) -> f32 {
        self.viewport_height / 3.0
    }

    /// Lowest the track may dip
    pub fn max_terrain_y(&self) -> f32 {
        self.viewport_height - self.floor_margin
    }

    /// Height used when generating from an empty track
    pub fn midline(&self) -> f32 {
        self.viewport_height / 2.0
    }

    /// Bank of the steepest segment a single walk step can produce (radians)
    pub fn steepest_bank(&self) -> f32 {
        (self.amplitude / 2.0).atan2(self.spacing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate(), Ok(()));
        assert!((tuning.spacing() - 800.0 / 19.0).abs() < 1e-4);
        assert_eq!(tuning.min_terrain_y(), 200.0);
        assert_eq!(tuning.max_terrain_y(), 550.0);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in [TrackPreset::Gentle, TrackPreset::Rolling, TrackPreset::Rugged] {
            let tuning = Tuning::from_preset(preset);
            assert_eq!(tuning.validate(), Ok(()), "{}", preset.as_str());
            assert_eq!(TrackPreset::parse(preset.as_str()), Some(preset));
        }
        assert_eq!(TrackPreset::parse("bumpy"), None);
    }

    #[test]
    fn test_preset_steepness() {
        let gentle = Tuning::from_preset(TrackPreset::Gentle);
        assert!(gentle.steepest_bank() < gentle.crash_angle);
        for preset in [TrackPreset::Rolling, TrackPreset::Rugged] {
            let tuning = Tuning::from_preset(preset);
            assert!(
                tuning.steepest_bank() > tuning.crash_angle,
                "{} peaks at {:.1} degrees",
                preset.as_str(),
                tuning.steepest_bank().to_degrees()
            );
        }
        assert_eq!(Tuning::from_preset(TrackPreset::Rolling), Tuning::default());
    }

    #[test]
    fn test_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "amplitude": 30.0, "segment_count": 50 }"#).unwrap();
        assert_eq!(tuning.amplitude, 30.0);
        assert_eq!(tuning.segment_count, 50);
        assert_eq!(tuning.max_speed, MAX_SPEED);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::from_preset(TrackPreset::Rugged);
        assert_eq!(Tuning::from_json(&tuning.to_json()), Ok(tuning));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert_eq!(
            Tuning::from_json(r#"{ "segment_count": 1 }"#),
            Err(TuningError::TooFewSegments { found: 1 })
        );
        assert_eq!(
            Tuning::from_json(r#"{ "drag": 1.5 }"#),
            Err(TuningError::FactorOutOfRange {
                field: "drag",
                value: 1.5
            })
        );
        assert_eq!(
            Tuning::from_json(r#"{ "max_speed": 0.0 }"#),
            Err(TuningError::NotPositive {
                field: "max_speed",
                value: 0.0
            })
        );
        assert_eq!(
            Tuning::from_json(r#"{ "amplitude": -1.0 }"#),
            Err(TuningError::NegativeAmplitude { value: -1.0 })
        );
        assert_eq!(
            Tuning::from_json(r#"{ "extend_batch": 0 }"#),
            Err(TuningError::EmptyBatch)
        );

        let tuning = Tuning {
            gravity: f32::NAN,
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonFinite { field: "gravity" })
        );

        let tuning = Tuning {
            viewport_height: 60.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptyTerrainBand { .. })
        ));
    }
}
