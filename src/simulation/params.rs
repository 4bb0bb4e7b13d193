use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Simulation parameters that control population behavior.
///
/// Every field has a default, so a JSON file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Half the side of an entity's square footprint; also its bite radius.
    pub entity_radius: f32,
    /// Maximum distance at which zombies notice humans.
    pub zombie_vision: f32,
    /// Zombie movement per tick.
    pub zombie_energy: f32,
    /// Upper bound of the dormant countdown; new zombies draw from `[max/2, max]`.
    pub zombie_attack_wait_max: u32,
    /// Ticks between zombie vision refreshes.
    pub zombie_perception_period: u32,
    /// Largest heading change per zombie tick, in degrees.
    pub turn_step_degrees: i32,
    /// Maximum distance at which humans notice zombies.
    pub human_vision: f32,
    /// Nominal full energy of a human; below half of it a human is hungry.
    pub human_max_energy: f32,
    /// Ticks between human vision refreshes.
    pub human_perception_period: u32,
    /// Minimum starting energy of a fresh lifetime.
    pub lifetime_base: f32,
    /// Random extra starting energy, drawn uniformly from `[0, spread)`.
    pub lifetime_spread: f32,
    /// Energy lost per human tick.
    pub lifetime_decay: f32,
    /// Meals contained in a freshly spawned food item.
    pub food_amount: u32,
    /// Zombies at the start of a run.
    pub initial_zombies: usize,
    /// Humans at the start of a run.
    pub initial_humans: usize,
    /// Food items kept on the field.
    pub max_food: usize,
    /// Milliseconds between zombie advances.
    pub zombie_update_ms: u64,
    /// Milliseconds between human advances.
    pub human_update_ms: u64,
    /// Seconds between status log lines.
    pub status_interval_secs: u64,
    /// Screen width the initial populations are tuned for.
    pub reference_width: f32,
    /// Recent events kept for the overlay.
    pub event_log_size: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            entity_radius: 5.0,
            zombie_vision: 100.0,
            zombie_energy: 2.0,
            zombie_attack_wait_max: 25,
            zombie_perception_period: 10,
            turn_step_degrees: 10,
            human_vision: 50.0,
            human_max_energy: 4.0,
            human_perception_period: 5,
            lifetime_base: 2.0,
            lifetime_spread: 2.0,
            lifetime_decay: 0.0005,
            food_amount: 25,
            initial_zombies: 5,
            initial_humans: 250,
            max_food: 5,
            zombie_update_ms: 200,
            human_update_ms: 100,
            status_interval_secs: 300,
            reference_width: 1440.0,
            event_log_size: 20,
        }
    }
}

impl Params {
    /// Loads parameters from a JSON file and validates them.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Params = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Checks ranges that would otherwise cause division by zero or empty sampling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if self.entity_radius <= 0.0 {
            return invalid("entity_radius", "must be positive");
        }
        if self.zombie_perception_period == 0 {
            return invalid("zombie_perception_period", "must be at least 1");
        }
        if self.human_perception_period == 0 {
            return invalid("human_perception_period", "must be at least 1");
        }
        if self.lifetime_decay <= 0.0 {
            return invalid("lifetime_decay", "must be positive");
        }
        if self.lifetime_base <= 0.0 || self.lifetime_spread < 0.0 {
            return invalid("lifetime_base", "base must be positive and spread non-negative");
        }
        if self.human_max_energy <= 0.0 {
            return invalid("human_max_energy", "must be positive");
        }
        if self.turn_step_degrees < 0 {
            return invalid("turn_step_degrees", "must not be negative");
        }
        if self.zombie_update_ms == 0 || self.human_update_ms == 0 {
            return invalid("zombie_update_ms", "update intervals must be positive");
        }
        if self.reference_width <= 0.0 {
            return invalid("reference_width", "must be positive");
        }
        Ok(())
    }

    /// Energy below which a human looks for food.
    pub fn hungry_level(&self) -> f32 {
        self.human_max_energy / 2.0
    }

    /// Scales starting populations to a screen of the given width.
    ///
    /// Food never drops below one item.
    pub fn scaled_for_width(&self, width: f32) -> Self {
        let ratio = width / self.reference_width;
        Self {
            initial_zombies: (ratio * self.initial_zombies as f32) as usize,
            initial_humans: (ratio * self.initial_humans as f32) as usize,
            max_food: ((ratio * self.max_food as f32) as usize).max(1),
            ..self.clone()
        }
    }
}
