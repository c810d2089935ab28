use starfall_core::{SensorError, SensorMessage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed sensor message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Sensor(#[from] SensorError),
    #[error("depth camera: {0}")]
    Device(String),
    #[error("sensor i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("sensor feed is not running")]
    Disconnected,
}

/// Parse one `{ width, height, heightmap }` message and check its shape
pub fn decode(text: &str) -> Result<SensorMessage, FeedError> {
    let message: SensorMessage = serde_json::from_str(text)?;
    if message.heightmap.len() != message.width as usize {
        return Err(SensorError::invalid_input(format!(
            "heightmap has {} samples, width says {}",
            message.heightmap.len(),
            message.width
        ))
        .into());
    }
    Ok(message)
}

pub fn encode(message: &SensorMessage) -> Result<String, FeedError> {
    Ok(serde_json::to_string(message)?)
}
