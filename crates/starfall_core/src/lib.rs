pub mod config;
pub mod constants;
pub mod error;
pub mod sensor_data;

pub use config::{GalaxyConfig, GlowConfig, RespawnVelocity};
pub use constants::*;
pub use error::{ConfigError, SensorError};
pub use sensor_data::{SensorData, SensorMessage};
