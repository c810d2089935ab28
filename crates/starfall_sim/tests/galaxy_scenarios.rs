use starfall_core::{GalaxyConfig, SensorMessage};
use starfall_sim::Galaxy;

fn single_star_galaxy() -> Galaxy {
    Galaxy::from_config(GalaxyConfig { star_count: 1, ..GalaxyConfig::default() })
        .expect("valid config")
}

#[test]
fn grounded_star_bounces_once() {
    let mut galaxy = single_star_galaxy();
    {
        let star = &mut galaxy.stars_mut()[0];
        star.position = [0.0, -1.0, 0.0];
        star.velocity = [0.0, -5.0, 0.0];
        star.collision_count = 0;
    }

    let stats = galaxy.update(0.03);

    let star = &galaxy.stars()[0];
    assert_eq!(stats.bounced, 1);
    assert_eq!(stats.recycled, 0);
    assert_eq!(star.position[1], 0.0);
    assert_eq!(star.collision_count, 1);
    assert!((star.speed() - 20.0).abs() < 1e-3, "speed {}", star.speed());
}

#[test]
fn exceeded_star_is_recycled_to_spawn() {
    let mut galaxy = single_star_galaxy();
    {
        let star = &mut galaxy.stars_mut()[0];
        star.collision_count = 101;
        star.position[1] = -10.0;
    }

    assert!(galaxy.check_boundary(0));

    let size_x = galaxy.size()[0];
    let spawn_y = galaxy.config().spawn_y;
    let star = &galaxy.stars()[0];
    assert!(star.position[0] >= 0.0 && star.position[0] < size_x);
    assert!(star.position[1] >= spawn_y[0] && star.position[1] <= spawn_y[1]);
    assert!(!star.is_exceeded_collision());
}

#[test]
fn exceeded_star_above_floor_is_still_recycled() {
    let mut galaxy = single_star_galaxy();
    galaxy.stars_mut()[0].collision_count = 101;
    galaxy.stars_mut()[0].position = [40.0, 60.0, 0.0];

    let stats = galaxy.update(0.03);
    assert_eq!(stats.recycled, 1);
    assert_eq!(galaxy.stars()[0].collision_count, 0);
}

#[test]
fn zero_step_changes_nothing() {
    let mut galaxy = single_star_galaxy();
    galaxy.stars_mut()[0].position = [5.0, 30.0, 0.0];
    galaxy.stars_mut()[0].velocity = [1.0, -2.0, 0.0];
    let before = galaxy.stars()[0].clone();

    galaxy.update(0.0);
    assert_eq!(galaxy.stars()[0], before);
}

#[test]
fn heightmap_floor_catches_stars() {
    let config = GalaxyConfig {
        star_count: 1,
        heightmap_collision: true,
        ..GalaxyConfig::default()
    };
    let mut galaxy = Galaxy::from_config(config).unwrap();
    galaxy
        .apply_sensor_message(&SensorMessage { width: 320, height: 160, heightmap: vec![20.0; 320] })
        .unwrap();
    galaxy.stars_mut()[0].position = [100.0, 19.5, 0.0];
    galaxy.stars_mut()[0].velocity = [0.0, -1.0, 0.0];

    galaxy.update(0.03);
    let star = &galaxy.stars()[0];
    assert_eq!(star.collision_count, 1);
    assert_eq!(star.position[1], 20.0);
}
