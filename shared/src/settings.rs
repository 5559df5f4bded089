/*!
Pointer tunables.

Defaults mirror the values the pointers were tuned with on device. Hosts that load
their own values should run [`LaserSettings::validate`] / [`ArcSettings::validate`]
(the pointer constructors do) so a bad file fails at startup instead of mid-tick.

Notes
- Distances are in meters, angles in degrees.
*/

use thiserror::Error;

use crate::{
    bitmask_flags::LayerMask,
    constants::{DEFAULT_GRAB_TAG, DEFAULT_LASER_MAX_DISTANCE},
};

/// Default pitch (from straight down) at which the arc reaches its shortest distance.
pub const DEFAULT_MIN_CONTROLLER_ANGLE: f32 = 63.0;
/// Default pitch at which the arc reaches its longest distance.
pub const DEFAULT_MAX_CONTROLLER_ANGLE: f32 = 120.0;
pub const DEFAULT_ARC_MIN_DISTANCE: f32 = 0.5;
pub const DEFAULT_ARC_MAX_DISTANCE: f32 = 12.0;
/// How far above the player the arc cast starts.
pub const DEFAULT_CAST_HEIGHT: f32 = 2.0;
/// How far below the target the fallback point drops, relative to the cast segment.
pub const DEFAULT_DROP_MULTIPLIER: f32 = 1.0;
/// Length added to the arc cast so far-below ground is still reached.
pub const DEFAULT_EXTRA_CAST_LENGTH: f32 = 10.0;
/// Steepest surface (angle from world-up) still accepted as ground.
pub const DEFAULT_SURFACE_ANGLE: f32 = 45.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`{min_field}` ({min}) must not exceed `{max_field}` ({max})")]
    InvertedRange {
        min_field: &'static str,
        min: f32,
        max_field: &'static str,
        max: f32,
    },
}

fn finite(field: &'static str, value: f32) -> Result<f32, SettingsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SettingsError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<f32, SettingsError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<f32, SettingsError> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::Negative { field, value })
    }
}

fn ordered(
    min_field: &'static str,
    min: f32,
    max_field: &'static str,
    max: f32,
) -> Result<(), SettingsError> {
    if min <= max {
        Ok(())
    } else {
        Err(SettingsError::InvertedRange {
            min_field,
            min,
            max_field,
            max,
        })
    }
}

/// Settings shared by both pointer variants.
#[derive(Clone, Debug, PartialEq)]
pub struct GrabSettings {
    /// Category label an entity must carry to be grabbed.
    pub grab_tag: String,
}

impl Default for GrabSettings {
    fn default() -> Self {
        Self {
            grab_tag: DEFAULT_GRAB_TAG.to_string(),
        }
    }
}

/// Straight laser pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct LaserSettings {
    /// Beam reach (meters).
    pub max_distance: f32,
    /// Layers the beam can hit.
    pub layers: LayerMask,
    pub grab: GrabSettings,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_LASER_MAX_DISTANCE,
            layers: LayerMask::all(),
            grab: GrabSettings::default(),
        }
    }
}

impl LaserSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("max_distance", self.max_distance)?;
        Ok(())
    }
}

/// Arc (pitch-driven) pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcSettings {
    pub min_controller_angle: f32,
    pub max_controller_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub cast_height: f32,
    pub drop_multiplier: f32,
    pub extra_cast_length: f32,
    /// Hits whose normal is at least this far from world-up (degrees) are not contact.
    pub surface_angle: f32,
    /// Layers the arc cast ignores.
    pub exclude_layers: LayerMask,
    pub grab: GrabSettings,
}

impl Default for ArcSettings {
    fn default() -> Self {
        Self {
            min_controller_angle: DEFAULT_MIN_CONTROLLER_ANGLE,
            max_controller_angle: DEFAULT_MAX_CONTROLLER_ANGLE,
            min_distance: DEFAULT_ARC_MIN_DISTANCE,
            max_distance: DEFAULT_ARC_MAX_DISTANCE,
            cast_height: DEFAULT_CAST_HEIGHT,
            drop_multiplier: DEFAULT_DROP_MULTIPLIER,
            extra_cast_length: DEFAULT_EXTRA_CAST_LENGTH,
            surface_angle: DEFAULT_SURFACE_ANGLE,
            exclude_layers: LayerMask::none(),
            grab: GrabSettings::default(),
        }
    }
}

impl ArcSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let min_angle = non_negative("min_controller_angle", self.min_controller_angle)?;
        let max_angle = non_negative("max_controller_angle", self.max_controller_angle)?;
        ordered(
            "min_controller_angle",
            min_angle,
            "max_controller_angle",
            max_angle,
        )?;

        let min_distance = non_negative("min_distance", self.min_distance)?;
        let max_distance = positive("max_distance", self.max_distance)?;
        ordered("min_distance", min_distance, "max_distance", max_distance)?;

        non_negative("cast_height", self.cast_height)?;
        non_negative("drop_multiplier", self.drop_multiplier)?;
        non_negative("extra_cast_length", self.extra_cast_length)?;
        finite("surface_angle", self.surface_angle)?;
        Ok(())
    }

    /// Layers the arc cast is allowed to hit.
    pub fn cast_layers(&self) -> LayerMask {
        self.exclude_layers.complement()
    }
}
