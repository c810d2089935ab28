use starfall_core::{GalaxyConfig, RespawnVelocity, SensorData, constants::*};

use crate::forces;
use crate::random::RandomUtil;
use crate::sampler;

/// A single falling particle.
///
/// A star is `Active` while `collision_count <= max_collisions` and bounces off
/// the ground. Past that it is `Exceeded`: it falls through the ground until the
/// galaxy recycles it with [`Star::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    /// Air velocity the drag pulls towards
    pub wind: [f32; 3],
    pub gravity: f32,
    pub drag_coefficient: f32,
    /// Simulated time since the last (re)spawn
    pub age: f32,
    pub collision_count: u32,
    pub max_collisions: u32,
    pub lobe_exponent: f32,
    pub bounce_speed: f32,
    /// Collide with the sensor heightmap instead of the y = 0 plane
    pub follows_heightmap: bool,
    pub respawn_velocity: RespawnVelocity,
    /// Bumped on every reset so trail renderers can tell a jump from motion
    pub generation: u32,
}

impl Star {
    /// A star at rest with the default physics constants
    pub fn new(position: [f32; 3]) -> Self {
        Self::from_config(position, &GalaxyConfig::default())
    }

    pub fn from_config(position: [f32; 3], config: &GalaxyConfig) -> Self {
        Self {
            position,
            velocity: [0.0; 3],
            wind: [0.0; 3],
            gravity: config.gravity,
            drag_coefficient: config.drag_coefficient,
            age: 0.0,
            collision_count: 0,
            max_collisions: config.max_collisions,
            lobe_exponent: config.lobe_exponent,
            bounce_speed: config.bounce_speed,
            follows_heightmap: config.heightmap_collision,
            respawn_velocity: config.respawn_velocity,
            generation: 0,
        }
    }

    /// Advance by `dt` with forward Euler, then resolve ground contact.
    /// A zero, negative or NaN step leaves the star untouched.
    pub fn update(&mut self, dt: f32, environment: &SensorData, rng: &mut RandomUtil) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }

        self.age += dt;
        for i in 0..3 {
            self.position[i] += self.velocity[i] * dt;
        }

        let accel = forces::drag_and_gravity(
            self.velocity,
            self.wind,
            self.drag_coefficient,
            self.gravity,
        );
        for i in 0..3 {
            self.velocity[i] += accel[i] * dt;
        }

        self.check_collision(environment, rng);
    }

    /// Advance by the default fixed step
    pub fn step(&mut self, environment: &SensorData, rng: &mut RandomUtil) {
        self.update(DEFAULT_DT, environment, rng);
    }

    fn ground_height(&self, environment: &SensorData) -> f32 {
        if self.follows_heightmap {
            environment.ground_height_at(self.position[0])
        } else {
            0.0
        }
    }

    pub fn is_colliding(&self, environment: &SensorData) -> bool {
        if self.is_exceeded_collision() {
            return false;
        }
        self.position[1] < self.ground_height(environment)
    }

    pub fn is_exceeded_collision(&self) -> bool {
        self.collision_count > self.max_collisions
    }

    /// Bounce off the ground: snap onto it and leave along a fresh lobe sample.
    /// Returns whether a bounce happened.
    pub fn check_collision(&mut self, environment: &SensorData, rng: &mut RandomUtil) -> bool {
        if !self.is_colliding(environment) {
            return false;
        }
        self.collision_count += 1;
        self.position[1] = self.ground_height(environment);

        // The lobe sample replaces the whole velocity, not only the reflected Y
        let dir = sampler::russian_roulette(rng, self.lobe_exponent);
        self.velocity = dir.map(|c| c * self.bounce_speed);
        true
    }

    /// Recycle in place at `position`
    pub fn reset(&mut self, position: [f32; 3]) {
        self.position = position;
        if self.respawn_velocity == RespawnVelocity::Zero {
            self.velocity = [0.0; 3];
        }
        self.age = 0.0;
        self.collision_count = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Position and velocity are both finite
    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }

    pub fn speed(&self) -> f32 {
        self.velocity.iter().map(|c| c * c).sum::<f32>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn env() -> SensorData {
        SensorData::default()
    }

    #[test]
    fn test_free_fall_euler_step() {
        let mut rng = RandomUtil::seeded(0);
        let mut star = Star::new([10.0, 100.0, 0.0]);
        star.update(0.5, &env(), &mut rng);

        // Position uses the velocity from before the step
        assert_eq!(star.position, [10.0, 100.0, 0.0]);
        assert!((star.velocity[1] + 4.9).abs() < 1e-6);
        assert!((star.age - 0.5).abs() < 1e-6);

        star.update(0.5, &env(), &mut rng);
        assert!((star.position[1] - (100.0 - 4.9 * 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_step_uses_default_dt() {
        let mut rng = RandomUtil::seeded(0);
        let mut star = Star::new([0.0, 50.0, 0.0]);
        star.step(&env(), &mut rng);
        assert!((star.age - DEFAULT_DT).abs() < 1e-7);
    }

    #[test]
    fn test_zero_step_is_idempotent() {
        let mut rng = RandomUtil::seeded(0);
        let mut star = Star::new([1.0, -1.0, 0.0]);
        star.velocity = [0.0, -5.0, 0.0];
        let before = star.clone();

        star.update(0.0, &env(), &mut rng);
        star.update(f32::NAN, &env(), &mut rng);
        assert_eq!(star, before);
    }

    #[test]
    fn test_bounce_off_ground() {
        let mut rng = RandomUtil::seeded(3);
        let mut star = Star::new([0.0, -1.0, 0.0]);
        star.velocity = [0.0, -5.0, 0.0];

        star.update(0.03, &env(), &mut rng);

        assert_eq!(star.position[1], 0.0);
        assert_eq!(star.collision_count, 1);
        assert!((star.speed() - 20.0).abs() < 1e-3);
        assert!(star.velocity[1] > 0.0);
    }

    #[test]
    fn test_exceeded_falls_through() {
        let mut rng = RandomUtil::seeded(3);
        let mut star = Star::new([0.0, -1.0, 0.0]);
        star.collision_count = star.max_collisions + 1;
        assert!(star.is_exceeded_collision());
        assert!(!star.is_colliding(&env()));

        star.update(0.03, &env(), &mut rng);
        assert!(star.position[1] < -1.0 + 1e-6);
        assert_eq!(star.collision_count, star.max_collisions + 1);
    }

    #[test]
    fn test_at_limit_still_bounces() {
        let mut rng = RandomUtil::seeded(3);
        let mut star = Star::new([0.0, -1.0, 0.0]);
        star.collision_count = star.max_collisions;
        assert!(star.check_collision(&env(), &mut rng));
        assert!(star.is_exceeded_collision());
    }

    #[test]
    fn test_heightmap_ground() {
        let mut rng = RandomUtil::seeded(9);
        let mut sd = SensorData::default();
        sd.update(&starfall_core::SensorMessage {
            width: 4,
            height: 160,
            heightmap: vec![20.0; 4],
        })
        .unwrap();

        let mut star = Star::new([1.0, 19.0, 0.0]);
        assert!(!star.is_colliding(&sd));

        star.follows_heightmap = true;
        assert!(star.check_collision(&sd, &mut rng));
        assert_eq!(star.position[1], 20.0);

        // Past the sampled columns the ground drops back to y = 0
        let mut outside = Star::new([10.0, 19.0, 0.0]);
        outside.follows_heightmap = true;
        assert!(!outside.is_colliding(&sd));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut star = Star::new([0.0, -10.0, 0.0]);
        star.velocity = [1.0, -30.0, 2.0];
        star.collision_count = 101;
        star.age = 12.0;

        star.reset([50.0, 170.0, 0.0]);
        assert_eq!(star.position, [50.0, 170.0, 0.0]);
        assert_eq!(star.velocity, [0.0; 3]);
        assert_eq!(star.collision_count, 0);
        assert_eq!(star.age, 0.0);
        assert_eq!(star.generation, 1);

        star.respawn_velocity = RespawnVelocity::Keep;
        star.velocity = [1.0, 2.0, 3.0];
        star.reset([0.0, 0.0, 0.0]);
        assert_eq!(star.velocity, [1.0, 2.0, 3.0]);
    }

    proptest! {
        #[test]
        fn prop_collision_count_never_decreases(seed in any::<u64>(), y in -50.0f32..200.0, vy in -80.0f32..80.0) {
            let mut rng = RandomUtil::seeded(seed);
            let mut star = Star::new([0.0, y, 0.0]);
            star.velocity = [0.0, vy, 0.0];
            star.max_collisions = 5;
            let mut last = star.collision_count;
            for _ in 0..400 {
                star.update(0.03, &SensorData::default(), &mut rng);
                prop_assert!(star.collision_count >= last);
                last = star.collision_count;
            }
            prop_assert!(star.collision_count <= star.max_collisions + 1);
        }
    }
}
