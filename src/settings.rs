//! Simulation tunables
//!
//! Every gameplay constant the kernel reads at runtime lives here so levels can be
//! rebalanced from a JSON file without recompiling. Durations are in frames, never
//! wall-clock time, so recorded runs replay identically.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunables for pursuing enemies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GruntSettings {
    pub size: f32,
    pub speed: f32,
    pub max_hp: i32,
    pub attack_damage: i32,
    pub attack_cooldown_frames: u64,
    pub detection_radius: f32,
}

impl Default for GruntSettings {
    fn default() -> Self {
        Self {
            size: GRUNT_SIZE,
            speed: GRUNT_SPEED,
            max_hp: GRUNT_MAX_HP,
            attack_damage: GRUNT_ATTACK_DAMAGE,
            attack_cooldown_frames: GRUNT_ATTACK_COOLDOWN_FRAMES,
            detection_radius: GRUNT_DETECTION_RADIUS,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Actor ===
    pub actor_size: f32,
    /// Pixels per frame along one axis
    pub actor_speed: f32,
    pub actor_max_hp: i32,
    pub interact_range: f32,

    // === Interactables ===
    pub button_active_frames: u64,
    /// Keep gates open while something stands in them
    pub gate_hysteresis: bool,
    pub turret_cooldown_frames: u64,
    pub projectile_speed: f32,
    pub projectile_damage: i32,

    // === Enemies ===
    pub grunt: GruntSettings,

    // === Recording ===
    pub location_sample_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            actor_size: ACTOR_SIZE,
            actor_speed: ACTOR_SPEED,
            actor_max_hp: ACTOR_MAX_HP,
            interact_range: INTERACT_RANGE,

            button_active_frames: BUTTON_ACTIVE_FRAMES,
            gate_hysteresis: true,
            turret_cooldown_frames: TURRET_COOLDOWN_FRAMES,
            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,

            grunt: GruntSettings::default(),

            location_sample_interval: LOCATION_SAMPLE_INTERVAL,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamp values that would break the kernel's invariants
    fn sanitize(&mut self) {
        if self.location_sample_interval == 0 {
            log::warn!("location_sample_interval must be >= 1, using 1");
            self.location_sample_interval = 1;
        }
        if self.projectile_damage <= 0 {
            log::warn!("projectile_damage must be positive, using default");
            self.projectile_damage = PROJECTILE_DAMAGE;
        }
        if self.grunt.attack_damage <= 0 {
            log::warn!("grunt.attack_damage must be positive, using default");
            self.grunt.attack_damage = GRUNT_ATTACK_DAMAGE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "actor_speed": 3.0, "grunt": { "speed": 1.5 } }"#)
            .unwrap();
        assert_eq!(settings.actor_speed, 3.0);
        assert_eq!(settings.grunt.speed, 1.5);
        assert_eq!(settings.grunt.max_hp, GRUNT_MAX_HP);
        assert_eq!(settings.interact_range, INTERACT_RANGE);
    }

    #[test]
    fn test_zero_sample_interval_is_clamped() {
        let settings = Settings::from_json(r#"{ "location_sample_interval": 0 }"#).unwrap();
        assert_eq!(settings.location_sample_interval, 1);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load("/definitely/not/here.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("ghostwalk_settings_{}.json", std::process::id()));
        let settings = Settings {
            button_active_frames: 90,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.button_active_frames, 90);
    }
}
