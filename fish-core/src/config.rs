use core::f32::consts::{PI, TAU};
use thiserror::Error;

pub const DEFAULT_WIDTH: f32 = 800.0;
pub const DEFAULT_HEIGHT: f32 = 800.0;

/// Rectangular arena `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// What happens to a fish that leaves the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Jump to the opposite edge on the violated axis and mirror the other
    /// axis, leaving velocity alone.
    #[default]
    Teleport,
    /// Clamp onto the edge and reverse the violating velocity component.
    Bounce,
}

/// Per-fish motion and perception parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishConfig {
    pub max_speed: f32,
    pub visible_radius: f32,
    /// Forward field of view in radians.
    pub visible_angle: f32,
    /// Speed a frightened fish flees at.
    pub excited_speed: f32,
    pub scare_distance: f32,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            max_speed: 120.0,
            visible_radius: 150.0,
            visible_angle: 1.5 * PI,
            excited_speed: 240.0,
            scare_distance: 100.0,
        }
    }
}

/// Configuration for the whole school.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchoolConfig {
    pub arena: Arena,
    pub boundary: BoundaryPolicy,
    pub separation_strength: f32,
    pub alignment_enabled: bool,
    pub alignment_strength: f32,
    pub cohesion_enabled: bool,
    pub cohesion_strength: f32,
    /// Weight of the pull toward the next higher-scored fish. Zero disables it.
    pub leader_strength: f32,
    /// Weight of the pull toward the school centroid. Zero disables it.
    pub centroid_strength: f32,
    pub fish: FishConfig,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            boundary: BoundaryPolicy::default(),
            separation_strength: 0.1,
            alignment_enabled: false,
            alignment_strength: 100.0,
            cohesion_enabled: false,
            cohesion_strength: 200.0,
            leader_strength: 0.0,
            centroid_strength: 0.0,
            fish: FishConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("arena must have positive size, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("{name} must be a non-negative number, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("visible angle must be in (0, 2π], got {0}")]
    VisibleAngle(f32),
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl FishConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("max_speed", self.max_speed)?;
        non_negative("visible_radius", self.visible_radius)?;
        non_negative("excited_speed", self.excited_speed)?;
        non_negative("scare_distance", self.scare_distance)?;
        if !(self.visible_angle > 0.0 && self.visible_angle <= TAU) {
            return Err(ConfigError::VisibleAngle(self.visible_angle));
        }
        Ok(())
    }
}

impl SchoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Arena { width, height } = self.arena;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        non_negative("separation_strength", self.separation_strength)?;
        non_negative("alignment_strength", self.alignment_strength)?;
        non_negative("cohesion_strength", self.cohesion_strength)?;
        non_negative("leader_strength", self.leader_strength)?;
        non_negative("centroid_strength", self.centroid_strength)?;
        self.fish.validate()
    }
}
