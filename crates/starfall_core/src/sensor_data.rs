use serde::{Deserialize, Serialize};

use crate::error::SensorError;

/// One heightmap sample per sensor column, as delivered by the sensor feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorMessage {
    pub width: u32,
    pub height: u32,
    pub heightmap: Vec<f32>,
}

/// Most recent heightmap plus where to place it in the world.
/// Owned by the galaxy; stars only ever read it.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorData {
    pub heightmap: Vec<f32>,
    /// Samples per row
    pub width: u32,
    /// Rows of the source depth frame
    pub height: u32,
    pub offset: [f32; 3],
    /// World size of one sample (x: column width, y: height unit)
    pub pixel_size: [f32; 2],
}

impl Default for SensorData {
    fn default() -> Self {
        Self {
            heightmap: Vec::new(),
            width: 0,
            height: 0,
            offset: [0.0; 3],
            pixel_size: [1.0, 1.0],
        }
    }
}

impl SensorData {
    /// Replace the heightmap with the message's samples.
    /// A rejected message leaves the current heightmap untouched.
    pub fn update(&mut self, message: &SensorMessage) -> Result<(), SensorError> {
        if message.width == 0 {
            return Err(SensorError::invalid_input("width must be at least 1"));
        }
        if message.heightmap.len() != message.width as usize {
            return Err(SensorError::invalid_input(format!(
                "heightmap has {} samples, width says {}",
                message.heightmap.len(),
                message.width
            )));
        }
        if let Some(i) = message.heightmap.iter().position(|h| !h.is_finite()) {
            return Err(SensorError::invalid_input(format!("sample {} is not finite", i)));
        }

        self.heightmap.clone_from(&message.heightmap);
        self.width = message.width;
        self.height = message.height;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.heightmap.is_empty()
    }

    /// World-space ground height under `x`; 0 outside the sampled columns
    pub fn ground_height_at(&self, x: f32) -> f32 {
        let local = (x - self.offset[0]) / self.pixel_size[0];
        if !local.is_finite() || local < 0.0 {
            return 0.0;
        }
        self.heightmap
            .get(local as usize)
            .map_or(0.0, |h| self.offset[1] + h * self.pixel_size[1])
    }

    /// (column center x, column top y) for every sample, in world space
    pub fn columns(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        self.heightmap.iter().enumerate().map(|(i, h)| {
            let x = i as f32 * self.pixel_size[0];
            let y = h * self.pixel_size[1];
            [
                self.offset[0] + x + self.pixel_size[0] * 0.5,
                self.offset[1] + y,
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(heightmap: Vec<f32>) -> SensorMessage {
        SensorMessage { width: heightmap.len() as u32, height: 160, heightmap }
    }

    #[test]
    fn test_update_replaces_heightmap() {
        let mut sd = SensorData::default();
        sd.update(&message(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(sd.heightmap, vec![1.0, 2.0, 3.0]);
        assert_eq!(sd.width, 3);
        assert_eq!(sd.height, 160);

        sd.update(&message(vec![5.0])).unwrap();
        assert_eq!(sd.heightmap, vec![5.0]);
    }

    #[test]
    fn test_mismatched_length_keeps_previous() {
        let mut sd = SensorData::default();
        sd.update(&message(vec![4.0, 4.0])).unwrap();

        let bad = SensorMessage { width: 3, height: 160, heightmap: vec![1.0] };
        let err = sd.update(&bad).unwrap_err();
        assert!(matches!(err, SensorError::InvalidInput { .. }));
        assert_eq!(sd.heightmap, vec![4.0, 4.0]);
    }

    #[test]
    fn test_rejects_non_finite_and_empty() {
        let mut sd = SensorData::default();
        assert!(sd.update(&message(vec![1.0, f32::NAN])).is_err());
        assert!(sd.update(&message(Vec::new())).is_err());
        assert!(sd.is_empty());
    }

    #[test]
    fn test_ground_height_maps_columns() {
        let mut sd = SensorData { pixel_size: [2.0, 0.5], ..SensorData::default() };
        sd.update(&message(vec![10.0, 20.0])).unwrap();

        assert_eq!(sd.ground_height_at(0.5), 5.0);
        assert_eq!(sd.ground_height_at(3.9), 10.0);
        assert_eq!(sd.ground_height_at(4.0), 0.0);
        assert_eq!(sd.ground_height_at(-1.0), 0.0);
    }

    #[test]
    fn test_columns_world_positions() {
        let mut sd = SensorData { pixel_size: [2.0, 3.0], ..SensorData::default() };
        sd.update(&message(vec![1.0, 2.0])).unwrap();
        let cols: Vec<_> = sd.columns().collect();
        assert_eq!(cols, vec![[1.0, 3.0], [3.0, 6.0]]);
    }
}
