//! Engine configuration resource.
//!
//! Manages physics and simulation settings loaded from an INI configuration
//! file. Provides defaults for safe startup and methods to load/save
//! configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! cell_size = 4
//! bucket_size = 32
//!
//! [simulation]
//! fixed_dt = 0.016666
//! ticks = 600
//! tank_speed = 40
//! projectile_speed = 120
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::physicsconfig::{DEFAULT_CELL_SIZE, PhysicsConfig};

/// Default safe values for startup
const DEFAULT_BUCKET_SIZE: f32 = 32.0;
const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;
const DEFAULT_TICKS: u32 = 600;
const DEFAULT_TANK_SPEED: f32 = 40.0;
const DEFAULT_PROJECTILE_SPEED: f32 = 120.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration resource.
///
/// The physics systems do not read this directly; they read the
/// [`PhysicsConfig`] derived from it with [`EngineConfig::physics_config`].
#[derive(Resource, Debug, Clone)]
pub struct EngineConfig {
    /// Movement grid cell size in world units.
    pub cell_size: f32,
    /// Side of the square buckets used by the level spatial index.
    pub bucket_size: f32,
    /// Fixed simulation step in seconds.
    pub fixed_dt: f32,
    /// Number of ticks the headless demo runs.
    pub ticks: u32,
    /// Speed given to AI tanks.
    pub tank_speed: f32,
    /// Speed given to fired projectiles.
    pub projectile_speed: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            bucket_size: DEFAULT_BUCKET_SIZE,
            fixed_dt: DEFAULT_FIXED_DT,
            ticks: DEFAULT_TICKS,
            tank_speed: DEFAULT_TANK_SPEED,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Non-positive
    /// or non-finite sizes and steps are rejected with a warning.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [physics] section
        if let Some(v) = positive(config, "physics", "cell_size") {
            self.cell_size = v;
        }
        if let Some(v) = positive(config, "physics", "bucket_size") {
            self.bucket_size = v;
        }

        // [simulation] section
        if let Some(v) = positive(config, "simulation", "fixed_dt") {
            self.fixed_dt = v;
        }
        if let Some(ticks) = config.getuint("simulation", "ticks").ok().flatten() {
            self.ticks = ticks as u32;
        }
        if let Some(v) = positive(config, "simulation", "tank_speed") {
            self.tank_speed = v;
        }
        if let Some(v) = positive(config, "simulation", "projectile_speed") {
            self.projectile_speed = v;
        }

        info!(
            "Loaded config: cell={}, bucket={}, dt={}, ticks={}, tank_speed={}, projectile_speed={}",
            self.cell_size,
            self.bucket_size,
            self.fixed_dt,
            self.ticks,
            self.tank_speed,
            self.projectile_speed
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [physics] section
        config.set("physics", "cell_size", Some(self.cell_size.to_string()));
        config.set("physics", "bucket_size", Some(self.bucket_size.to_string()));

        // [simulation] section
        config.set("simulation", "fixed_dt", Some(self.fixed_dt.to_string()));
        config.set("simulation", "ticks", Some(self.ticks.to_string()));
        config.set("simulation", "tank_speed", Some(self.tank_speed.to_string()));
        config.set(
            "simulation",
            "projectile_speed",
            Some(self.projectile_speed.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn physics_config(&self) -> PhysicsConfig {
        PhysicsConfig {
            cell_size: self.cell_size,
        }
    }
}

fn positive(config: &Ini, section: &str, key: &str) -> Option<f32> {
    let value = config.getfloat(section, key).ok().flatten()?;
    let narrowed = value as f32;
    if narrowed.is_finite() && narrowed > 0.0 {
        Some(narrowed)
    } else {
        warn!("Ignoring non-positive or non-finite [{}] {} = {}", section, key, value);
        None
    }
}
