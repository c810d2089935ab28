pub mod galaxy;
pub mod pipeline;

pub use galaxy::{FrameStats, Galaxy};
pub use pipeline::{SensorLink, SimulationPlugin};
