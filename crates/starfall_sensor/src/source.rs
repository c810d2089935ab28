use std::f32::consts::{PI, TAU};
use std::io::BufRead;

use starfall_core::SensorMessage;

use crate::codec::{self, FeedError};
use crate::range::DistanceRange;

/// Anything that can produce heightmap messages for the feed worker
pub trait HeightmapSource: Send {
    fn next_message(&mut self) -> Result<SensorMessage, FeedError>;

    /// Sources without a depth threshold ignore this
    fn set_distance_range(&mut self, _range: DistanceRange) {}
}

/// Shape of the synthetic heightmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Constant floor at an eighth of the frame height
    #[default]
    Flat,
    /// Sine ridge scrolling one step per message
    Wave,
}

/// Stand-in sensor producing a fixed-size heightmap without hardware
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    pub width: u32,
    pub height: u32,
    pub profile: Profile,
    phase: f32,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(Profile::Flat)
    }
}

impl SyntheticSource {
    pub fn new(profile: Profile) -> Self {
        Self { width: 320, height: 160, profile, phase: 0.0 }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl HeightmapSource for SyntheticSource {
    fn next_message(&mut self) -> Result<SensorMessage, FeedError> {
        self.phase = (self.phase + TAU / 20.0) % TAU;

        let floor = self.height as f32 / 8.0;
        let heightmap = (0..self.width)
            .map(|i| match self.profile {
                Profile::Flat => floor,
                Profile::Wave => {
                    let x = 10.0 * PI * (i as f32 / self.width as f32) + self.phase;
                    (x.sin() + 1.0) * floor
                }
            })
            .collect();

        Ok(SensorMessage { width: self.width, height: self.height, heightmap })
    }
}

/// Replays recorded messages (one JSON object per line) in a loop
#[derive(Debug, Clone)]
pub struct ReplaySource {
    messages: Vec<SensorMessage>,
    cursor: usize,
}

impl ReplaySource {
    /// Loop over `messages` as given; they are validated where they are applied
    pub fn new(messages: Vec<SensorMessage>) -> Result<Self, FeedError> {
        if messages.is_empty() {
            return Err(starfall_core::SensorError::invalid_input("recording has no messages").into());
        }
        Ok(Self { messages, cursor: 0 })
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, FeedError> {
        let mut messages = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            messages.push(codec::decode(&line)?);
        }
        Self::new(messages)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl HeightmapSource for ReplaySource {
    fn next_message(&mut self) -> Result<SensorMessage, FeedError> {
        let message = self.messages[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.messages.len();
        Ok(message)
    }
}
