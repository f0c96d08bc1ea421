//! Engine options
//!
//! Tunables for ranges, radii, damage ceilings and animation pacing. Loaded
//! from JSON when the `std` feature is on; every field has a default.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::path::Path;

use super::EngineError;
use crate::consts::{
    BALL_RADIUS, BREATH_DAMAGE_CAP, GRAVITY_DISPLACEMENT, OBJ_BOLT_RANGE, POLYMORPH_BAND,
};

/// Options consulted by every attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximum steps a bolt or ball travels
    pub bolt_range: u32,
    /// Radius of a player-cast ball
    pub ball_radius: u32,
    /// Ceiling on breath damage against the player
    pub breath_cap: i32,
    /// Pause between bolt frames
    pub bolt_delay_ms: u32,
    /// Pause after drawing a burst
    pub ball_delay_ms: u32,
    /// Draw projectiles at all
    pub animate: bool,
    /// Half-width of the level band polymorph draws from
    pub polymorph_band: u8,
    /// Cells a gravity hit hurls its target
    pub gravity_displacement: u32,
    /// Fixed seed for the shared generator
    pub seed: Option<u64>,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            bolt_range: OBJ_BOLT_RANGE,
            ball_radius: BALL_RADIUS,
            breath_cap: BREATH_DAMAGE_CAP,
            bolt_delay_ms: 23,
            ball_delay_ms: 75,
            animate: false,
            polymorph_band: POLYMORPH_BAND,
            gravity_displacement: GRAVITY_DISPLACEMENT,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl EngineOptions {
    /// Reject settings no attack can run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.bolt_range == 0 {
            return Err(EngineError::Config("bolt_range must be at least 1".into()));
        }
        if self.ball_radius == 0 {
            return Err(EngineError::Config("ball_radius must be at least 1".into()));
        }
        if self.breath_cap < 1 {
            return Err(EngineError::Config("breath_cap must be positive".into()));
        }
        Ok(())
    }

    /// Parse and validate options from JSON
    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let options: EngineOptions =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    #[cfg(feature = "std")]
    /// Load options from a file
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }
}
