use std::time::Duration;

use bevy::prelude::*;
use starfall_sensor::{FeedError, Profile, ReplaySource, SensorFeed, SyntheticSource};

use super::galaxy::{FrameStats, Galaxy};

/// Bevy plugin for the simulation pipeline
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameStats>()
            .init_resource::<SensorLink>()
            .add_systems(Update, (apply_sensor_messages, simulation_tick).chain());
    }
}

/// Where sensor frames come from when the feed is switched on
#[derive(Debug, Clone)]
pub enum SensorSource {
    Synthetic(Profile),
    Replay(ReplaySource),
}

/// Owns the sensor feed worker; start/stop belongs here, not to the galaxy
#[derive(Resource)]
pub struct SensorLink {
    feed: Option<SensorFeed>,
    pub source: SensorSource,
    pub interval: Duration,
}

impl Default for SensorLink {
    fn default() -> Self {
        Self::new(SensorSource::Synthetic(Profile::Flat), Duration::from_millis(33))
    }
}

impl SensorLink {
    pub fn new(source: SensorSource, interval: Duration) -> Self {
        Self { feed: None, source, interval }
    }

    pub fn is_running(&self) -> bool {
        self.feed.as_ref().is_some_and(SensorFeed::is_running)
    }

    pub fn feed(&self) -> Option<&SensorFeed> {
        self.feed.as_ref()
    }

    pub fn start(&mut self) -> Result<(), FeedError> {
        if self.is_running() {
            return Ok(());
        }
        let feed = match &self.source {
            SensorSource::Synthetic(profile) => {
                SensorFeed::start(SyntheticSource::new(*profile), self.interval)?
            }
            SensorSource::Replay(replay) => SensorFeed::start(replay.clone(), self.interval)?,
        };
        self.feed = Some(feed);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut feed) = self.feed.take() {
            feed.stop();
        }
    }

    pub fn toggle(&mut self) -> Result<(), FeedError> {
        if self.is_running() {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    pub fn shift_distance_range(&self, dmin: f32, dmax: f32) -> Result<(), FeedError> {
        self.feed
            .as_ref()
            .ok_or(FeedError::Disconnected)?
            .shift_distance_range(dmin, dmax)
    }
}

/// Apply the newest sensor frame before the stars move
fn apply_sensor_messages(link: Res<SensorLink>, mut galaxy: ResMut<Galaxy>) {
    let Some(message) = link.feed().and_then(SensorFeed::try_recv_latest) else {
        return;
    };
    if let Err(e) = galaxy.apply_sensor_message(&message) {
        warn!("Rejected sensor frame: {}", e);
    }
}

/// Main simulation tick: one galaxy update per rendered frame
fn simulation_tick(mut galaxy: ResMut<Galaxy>, mut stats: ResMut<FrameStats>, time: Res<Time>) {
    let dt = galaxy.config().fixed_dt.unwrap_or_else(|| time.delta_secs());
    *stats = galaxy.update(dt);
}
