use starfall_core::SENSOR_DISTANCE_LIMIT;

/// Depth threshold window in meters. Pixels outside it count as empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    pub min: f32,
    pub max: f32,
}

impl Default for DistanceRange {
    fn default() -> Self {
        Self { min: 0.1, max: 4.0 }
    }
}

impl DistanceRange {
    /// Clamp both ends to the hardware limits, rounded to 0.1 m
    pub fn new(min: f32, max: f32) -> Self {
        let mut range = Self::default();
        range.set(min, max);
        range
    }

    pub fn set(&mut self, min: f32, max: f32) {
        self.min = quantize(min);
        self.max = quantize(max);
    }

    /// Move each end by a delta
    pub fn shift(&mut self, dmin: f32, dmax: f32) {
        self.set(self.min + dmin, self.max + dmax);
    }

    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.min && distance <= self.max
    }
}

fn quantize(d: f32) -> f32 {
    let d = if d.is_nan() { 0.0 } else { d.clamp(0.0, SENSOR_DISTANCE_LIMIT) };
    (d * 10.0).round() / 10.0
}
