//! Hummingbird environment configuration
//!
//! Agent tuning, physics parameters and episode settings, with validation,
//! builder-style setters and JSON persistence.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{
    flower::{EMPTY_FLOWER_COLOR, FULL_FLOWER_COLOR},
    physics::BodyParams,
    types::Color,
};

/// Configuration of a hummingbird environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HummingbirdConfig {
    /// Force to apply when moving
    pub move_force: f32,

    /// Degrees per second to pitch up or down at full action
    pub pitch_speed: f32,

    /// Degrees per second to turn around the y axis at full action
    pub yaw_speed: f32,

    /// Training mode (rewards, flower resets, finite episodes) or
    /// interactive mode
    pub training_mode: bool,

    /// Steps per episode in training mode; 0 means unlimited
    pub max_step: usize,

    /// Duration of one physics tick in seconds
    pub fixed_delta_time: f32,

    /// Beak tip in the agent's local frame
    pub beak_tip_offset: Vec3,

    /// Radius of the agent's body sphere
    pub body_radius: f32,

    /// Radius of the trigger probe at the beak tip
    pub beak_radius: f32,

    /// Mass of the agent
    pub body_mass: f32,

    /// Fraction of velocity removed per second
    pub linear_drag: f32,

    /// Tint of a full flower
    pub full_flower_color: Color,

    /// Tint of an empty flower
    pub empty_flower_color: Color,

    /// RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for HummingbirdConfig {
    fn default() -> Self {
        Self {
            move_force: 2.0,
            pitch_speed: 100.0,
            yaw_speed: 100.0,
            training_mode: true,
            max_step: 5000,
            fixed_delta_time: 0.02,
            beak_tip_offset: Vec3::new(0.0, 0.0, 0.05),
            body_radius: 0.04,
            beak_radius: 0.005,
            body_mass: 1.0,
            linear_drag: 2.0,
            full_flower_color: FULL_FLOWER_COLOR,
            empty_flower_color: EMPTY_FLOWER_COLOR,
            seed: None,
        }
    }
}

impl HummingbirdConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration for interactive play
    pub fn interactive() -> Self {
        Self::default().training_mode(false)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.move_force < 0.0 {
            return Err(anyhow!("move_force must be non-negative"));
        }
        if self.pitch_speed < 0.0 {
            return Err(anyhow!("pitch_speed must be non-negative"));
        }
        if self.yaw_speed < 0.0 {
            return Err(anyhow!("yaw_speed must be non-negative"));
        }
        if self.fixed_delta_time <= 0.0 {
            return Err(anyhow!("fixed_delta_time must be positive"));
        }
        if self.body_radius <= 0.0 {
            return Err(anyhow!("body_radius must be positive"));
        }
        if self.beak_radius <= 0.0 {
            return Err(anyhow!("beak_radius must be positive"));
        }
        if self.body_mass <= 0.0 {
            return Err(anyhow!("body_mass must be positive"));
        }
        if self.linear_drag < 0.0 {
            return Err(anyhow!("linear_drag must be non-negative"));
        }
        Ok(())
    }

    /// Step budget actually in force: unlimited outside training
    pub fn effective_max_step(&self) -> usize {
        if self.training_mode {
            self.max_step
        } else {
            0
        }
    }

    /// Physical parameters of the agent body
    pub fn body_params(&self) -> BodyParams {
        BodyParams {
            mass: self.body_mass,
            linear_drag: self.linear_drag,
            radius: self.body_radius,
            beak_offset: self.beak_tip_offset,
            beak_radius: self.beak_radius,
        }
    }

    /// Load configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json).context("invalid hummingbird config")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Set movement force
    pub fn move_force(mut self, force: f32) -> Self {
        self.move_force = force;
        self
    }

    /// Set pitch speed
    pub fn pitch_speed(mut self, speed: f32) -> Self {
        self.pitch_speed = speed;
        self
    }

    /// Set yaw speed
    pub fn yaw_speed(mut self, speed: f32) -> Self {
        self.yaw_speed = speed;
        self
    }

    /// Set training mode
    pub fn training_mode(mut self, training: bool) -> Self {
        self.training_mode = training;
        self
    }

    /// Set step budget
    pub fn max_step(mut self, steps: usize) -> Self {
        self.max_step = steps;
        self
    }

    /// Set physics tick duration
    pub fn fixed_delta_time(mut self, dt: f32) -> Self {
        self.fixed_delta_time = dt;
        self
    }

    /// Set beak tip offset
    pub fn beak_tip_offset(mut self, offset: Vec3) -> Self {
        self.beak_tip_offset = offset;
        self
    }

    /// Set linear drag
    pub fn linear_drag(mut self, drag: f32) -> Self {
        self.linear_drag = drag;
        self
    }

    /// Set RNG seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = HummingbirdConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.move_force, 2.0);
        assert_eq!(config.pitch_speed, 100.0);
        assert_eq!(config.yaw_speed, 100.0);
        assert!(config.training_mode);
    }

    #[test]
    fn test_config_validation() {
        assert!(HummingbirdConfig::new().move_force(-1.0).validate().is_err());
        assert!(HummingbirdConfig::new().fixed_delta_time(0.0).validate().is_err());
        assert!(HummingbirdConfig::new().linear_drag(-0.5).validate().is_err());

        // Zero force is allowed
        assert!(HummingbirdConfig::new().move_force(0.0).validate().is_ok());
    }

    #[test]
    fn test_max_step_unlimited_outside_training() {
        let config = HummingbirdConfig::new().max_step(1000);
        assert_eq!(config.effective_max_step(), 1000);
        assert_eq!(config.training_mode(false).effective_max_step(), 0);
    }

    #[test]
    fn test_json_roundtrip() -> Result<()> {
        let config = HummingbirdConfig::new().move_force(3.5).seed(42).training_mode(false);
        let temp_file = NamedTempFile::new()?;

        config.save_json(temp_file.path())?;
        let loaded = HummingbirdConfig::load_json(temp_file.path())?;

        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HummingbirdConfig = serde_json::from_str(r#"{ "yaw_speed": 50.0 }"#).unwrap();
        assert_eq!(config.yaw_speed, 50.0);
        assert_eq!(config.move_force, 2.0);
        assert_eq!(config.seed, None);
    }
}
