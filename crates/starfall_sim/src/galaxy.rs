use bevy::prelude::*;
use starfall_core::{ConfigError, GalaxyConfig, SensorData, SensorError, SensorMessage};
use starfall_physics::{RandomUtil, Star};

/// What one `Galaxy::update` did
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Stars that bounced this frame
    pub bounced: u32,
    /// Stars sent back to the spawn range this frame
    pub recycled: u32,
}

/// Fixed-size pool of stars inside the simulation volume.
/// Stars are never removed: whatever leaves the volume is respawned in place.
#[derive(Resource)]
pub struct Galaxy {
    stars: Vec<Star>,
    sensor_data: SensorData,
    rng: RandomUtil,
    config: GalaxyConfig,
    /// Frames simulated so far
    pub frame: u64,
    /// Recycles since construction
    pub recycled_total: u64,
}

impl Galaxy {
    /// Build the pool with the generator seeded from `config.seed`
    pub fn from_config(config: GalaxyConfig) -> Result<Self, ConfigError> {
        let rng = RandomUtil::seeded(config.seed);
        Self::new(config, rng)
    }

    pub fn new(config: GalaxyConfig, mut rng: RandomUtil) -> Result<Self, ConfigError> {
        config.validate()?;

        let stars = (0..config.star_count)
            .map(|_| {
                let position = spawn_position(&config, &mut rng);
                Star::from_config(position, &config)
            })
            .collect();

        info!(
            "Galaxy created: {} stars in {:?} (seed {})",
            config.star_count, config.size, config.seed
        );

        Ok(Self {
            stars,
            sensor_data: SensorData::default(),
            rng,
            config,
            frame: 0,
            recycled_total: 0,
        })
    }

    /// Integrate every star, then recycle the ones that left the volume
    pub fn update(&mut self, dt: f32) -> FrameStats {
        let mut stats = FrameStats::default();

        for i in 0..self.stars.len() {
            let star = &mut self.stars[i];
            let before = star.collision_count;
            star.update(dt, &self.sensor_data, &mut self.rng);
            if star.collision_count > before {
                stats.bounced += 1;
            }

            if self.check_boundary(i) {
                stats.recycled += 1;
            }
        }

        self.frame += 1;
        self.recycled_total += u64::from(stats.recycled);
        stats
    }

    /// Respawn star `index` if it fell below `min_y`, used up its bounces, or
    /// holds non-finite state. Returns whether it was recycled.
    pub fn check_boundary(&mut self, index: usize) -> bool {
        let Some(star) = self.stars.get(index) else {
            return false;
        };
        let finite = star.is_finite();
        if finite && star.position[1] > self.config.min_y && !star.is_exceeded_collision() {
            return false;
        }

        let position = spawn_position(&self.config, &mut self.rng);
        let star = &mut self.stars[index];
        if !finite {
            warn!("Star {} has non-finite state, respawning", index);
            star.velocity = [0.0; 3];
        }
        star.reset(position);
        true
    }

    /// Replace the environment every star sees from the next frame on
    pub fn update_sensor_data(&mut self, sensor_data: SensorData) {
        self.sensor_data = sensor_data;
    }

    /// Fold a sensor message into the current environment
    pub fn apply_sensor_message(&mut self, message: &SensorMessage) -> Result<(), SensorError> {
        self.sensor_data.update(message)
    }

    pub fn sensor_data(&self) -> &SensorData {
        &self.sensor_data
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Mutable access to individual stars. The pool size cannot change.
    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn size(&self) -> [f32; 3] {
        self.config.size
    }

    pub fn exceeded_count(&self) -> usize {
        self.stars.iter().filter(|s| s.is_exceeded_collision()).count()
    }

    pub fn total_collisions(&self) -> u64 {
        self.stars.iter().map(|s| u64::from(s.collision_count)).sum()
    }
}

fn spawn_position(config: &GalaxyConfig, rng: &mut RandomUtil) -> [f32; 3] {
    let x = rng.random_real(config.spawn_x[0], config.spawn_x[1]);
    let y = rng.random_real(config.spawn_y[0], config.spawn_y[1]);
    [x, y, 0.0]
}
