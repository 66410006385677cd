mod load;

pub use load::{load_config, load_config_from};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_FILE: &str = "storage.ron";
pub const CONFIG_ENV: &str = "COMPARTMENT_STORE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub compartment_capacity: f32,
    pub total_capacity: f32,
    pub delivery_interval_secs: u64,
    pub delivery_min: f32,
    pub delivery_max: f32,
    pub step: f32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            compartment_capacity: 10.0,
            total_capacity: 40.0,
            delivery_interval_secs: 8,
            delivery_min: 2.0,
            delivery_max: 12.0,
            step: 1.0,
        }
    }
}

impl ConsoleConfig {
    pub fn delivery_interval(&self) -> Duration {
        Duration::from_secs(self.delivery_interval_secs)
    }

    /// Checks the console settings. Capacities are left to
    /// `CompartmentedStorage::new`.
    pub fn validate(&self) -> Result<()> {
        if self.delivery_interval_secs == 0 {
            bail!("delivery_interval_secs must be at least 1");
        }
        for (name, value) in [
            ("delivery_min", self.delivery_min),
            ("delivery_max", self.delivery_max),
            ("step", self.step),
        ] {
            if !value.is_finite() {
                bail!("{name} must be a finite number (got {value})");
            }
        }
        if !(self.delivery_min >= 0.0) {
            bail!("delivery_min cannot be negative (got {})", self.delivery_min);
        }
        if !(self.delivery_max >= self.delivery_min) {
            bail!(
                "delivery_max ({}) cannot be less than delivery_min ({})",
                self.delivery_max,
                self.delivery_min
            );
        }
        if !(self.step > 0.0) {
            bail!("step must be positive (got {})", self.step);
        }
        Ok(())
    }
}
