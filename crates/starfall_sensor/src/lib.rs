pub mod codec;
pub mod depth;
pub mod feed;
pub mod range;
pub mod source;

pub use codec::FeedError;
pub use depth::{DepthCamera, DepthFrame, DepthSource, build_heightmap};
pub use feed::{SensorCommand, SensorFeed};
pub use range::DistanceRange;
pub use source::{HeightmapSource, Profile, ReplaySource, SyntheticSource};
