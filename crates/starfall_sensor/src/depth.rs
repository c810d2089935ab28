use starfall_core::{SensorError, SensorMessage};

use crate::codec::FeedError;
use crate::range::DistanceRange;
use crate::source::HeightmapSource;

/// Raw Z16 depth image, row-major.
/// Only built through `new`/`from_bytes`, so `data` always holds `width * height` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    width: u32,
    height: u32,
    data: Vec<u16>,
}

impl DepthFrame {
    pub fn new(width: u32, height: u32, data: Vec<u16>) -> Result<Self, SensorError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(SensorError::invalid_input(format!(
                "depth frame {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// From a native-endian byte buffer as handed out by the camera driver
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, SensorError> {
        if bytes.len() % 2 != 0 {
            return Err(SensorError::invalid_input("odd byte count for 16-bit depth"));
        }
        let data: Vec<u16> = bytemuck::pod_collect_to_vec(bytes);
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        self.data.get(y * self.width as usize + x).copied()
    }
}

/// Collapse a depth frame to one height per column.
///
/// Scanning each column from the top, the first pixel whose distance is
/// positive and inside `range` gives `height - 1 - row`. Empty columns are 0.
pub fn build_heightmap(frame: &DepthFrame, depth_scale: f32, range: DistanceRange) -> Vec<f32> {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let mut heightmap = vec![0.0; width];

    for (x, sample) in heightmap.iter_mut().enumerate() {
        let top_hit = (0..height).find(|&y| {
            frame.pixel(x, y).is_some_and(|raw| {
                let distance = depth_scale * f32::from(raw);
                distance > 0.0 && range.contains(distance)
            })
        });
        if let Some(y) = top_hit {
            *sample = (height - 1 - y) as f32;
        }
    }
    heightmap
}

/// A depth camera driver. No hardware binding ships with this crate.
pub trait DepthCamera: Send {
    /// Meters per raw depth unit
    fn depth_scale(&self) -> f32;

    /// Block until the next frame arrives
    fn wait_for_frame(&mut self) -> Result<DepthFrame, FeedError>;
}

/// Heightmaps extracted from a live depth camera
pub struct DepthSource<C> {
    camera: C,
    range: DistanceRange,
}

impl<C: DepthCamera> DepthSource<C> {
    pub fn new(camera: C) -> Self {
        Self { camera, range: DistanceRange::default() }
    }
}

impl<C: DepthCamera> HeightmapSource for DepthSource<C> {
    fn next_message(&mut self) -> Result<SensorMessage, FeedError> {
        let frame = self.camera.wait_for_frame()?;
        let heightmap = build_heightmap(&frame, self.camera.depth_scale(), self.range);
        Ok(SensorMessage { width: frame.width(), height: frame.height(), heightmap })
    }

    fn set_distance_range(&mut self, range: DistanceRange) {
        self.range = range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_most_valid_pixel_wins() {
        // 3 columns, 4 rows; column 1 has hits at rows 2 and 3, column 2 at row 1
        #[rustfmt::skip]
        let data = vec![
            0,    0,    0,
            0,    0,    1000,
            0,    1000, 0,
            0,    1000, 0,
        ];
        let frame = DepthFrame::new(3, 4, data).unwrap();
        let hm = build_heightmap(&frame, 0.001, DistanceRange::default());
        assert_eq!(hm, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_out_of_range_pixels_are_empty() {
        let frame = DepthFrame::new(2, 2, vec![9000, 500, 0, 500]).unwrap();
        // 9 m is beyond the default 4 m window
        let hm = build_heightmap(&frame, 0.001, DistanceRange::default());
        assert_eq!(hm, vec![0.0, 1.0]);

        let wide = DistanceRange::new(0.1, 10.0);
        assert_eq!(build_heightmap(&frame, 0.001, wide), vec![1.0, 1.0]);
    }

    #[test]
    fn test_frame_shape_checked() {
        assert!(DepthFrame::new(2, 2, vec![0; 3]).is_err());
        assert!(DepthFrame::from_bytes(1, 1, &[0, 0, 0]).is_err());

        let bytes = 1234u16.to_ne_bytes();
        let frame = DepthFrame::from_bytes(1, 1, &bytes).unwrap();
        assert_eq!(frame.data(), &[1234]);
        assert_eq!((frame.width(), frame.height()), (1, 1));
    }

    #[test]
    fn test_short_frame_reads_as_empty() {
        // Only reachable from inside this module; the public constructors reject it
        let frame = DepthFrame { width: 4, height: 4, data: vec![500; 3] };
        let hm = build_heightmap(&frame, 0.001, DistanceRange::default());
        assert_eq!(hm, vec![3.0, 3.0, 3.0, 0.0]);
        assert!(DepthFrame::new(4, 4, vec![500; 3]).is_err());
    }

    struct ScriptedCamera {
        frames: Vec<DepthFrame>,
    }

    impl DepthCamera for ScriptedCamera {
        fn depth_scale(&self) -> f32 {
            0.001
        }

        fn wait_for_frame(&mut self) -> Result<DepthFrame, FeedError> {
            self.frames.pop().ok_or_else(|| FeedError::Device("no more frames".into()))
        }
    }

    #[test]
    fn test_depth_source_applies_range() {
        let frame = DepthFrame::new(1, 2, vec![3000, 0]).unwrap();
        let mut source = DepthSource::new(ScriptedCamera { frames: vec![frame.clone(), frame] });

        let msg = source.next_message().unwrap();
        assert_eq!(msg.heightmap, vec![1.0]);

        source.set_distance_range(DistanceRange::new(0.1, 2.0));
        let msg = source.next_message().unwrap();
        assert_eq!(msg.heightmap, vec![0.0]);

        assert!(matches!(source.next_message(), Err(FeedError::Device(_))));
    }
}
