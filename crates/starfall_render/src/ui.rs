use bevy::prelude::*;
use starfall_sim::{FrameStats, Galaxy, SensorLink};

use super::camera::{GLOW_STEP, GlowSettings};
use super::terrain::ViewSettings;

/// Marker for the HUD text
#[derive(Component)]
pub struct HudText;

/// Distance range step for one key press, in meters
const RANGE_STEP: f32 = 0.1;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Starfall"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.7, 0.8, 1.0, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

/// Update HUD text every 10th frame
pub fn update_hud(
    galaxy: Res<Galaxy>,
    stats: Res<FrameStats>,
    link: Res<SensorLink>,
    glow: Res<GlowSettings>,
    mut throttle: ResMut<HudThrottle>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    if throttle.frame % 10 != 0 {
        return;
    }
    let Ok(mut text) = hud_query.get_single_mut() else {
        return;
    };

    let sensor = if link.is_running() { "ON" } else { "off" };
    **text = format!(
        "STARFALL | Frame: {}\n\
         Stars: {} | Exceeded: {} | Recycled: {}\n\
         Collisions: {} | Bounces/frame: {}\n\
         Sensor: {} | Columns: {} | Glow: {:.2}\n\
         \n\
         [S] Sensor  [P] Stats  [H] Heightmap  [B/N] Glow\n\
         [-/=] Min distance  [[/]] Max distance",
        galaxy.frame,
        galaxy.star_count(),
        galaxy.exceeded_count(),
        galaxy.recycled_total,
        galaxy.total_collisions(),
        stats.bounced,
        sensor,
        galaxy.sensor_data().width,
        glow.intensity,
    );
}

pub fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    galaxy: Res<Galaxy>,
    mut link: ResMut<SensorLink>,
    mut view: ResMut<ViewSettings>,
    mut glow: ResMut<GlowSettings>,
) {
    if keys.just_pressed(KeyCode::KeyS) {
        if let Err(e) = link.toggle() {
            warn!("Sensor feed: {}", e);
        }
    }

    if keys.just_pressed(KeyCode::KeyP) {
        info!(
            "Frame {}: {} stars, {} exceeded, {} collisions, {} recycled, heightmap {} columns",
            galaxy.frame,
            galaxy.star_count(),
            galaxy.exceeded_count(),
            galaxy.total_collisions(),
            galaxy.recycled_total,
            galaxy.sensor_data().width,
        );
    }

    if keys.just_pressed(KeyCode::KeyH) {
        view.show_heightmap = !view.show_heightmap;
    }

    let glow_step = if keys.just_pressed(KeyCode::KeyB) {
        Some(-GLOW_STEP)
    } else if keys.just_pressed(KeyCode::KeyN) {
        Some(GLOW_STEP)
    } else {
        None
    };
    if let Some(delta) = glow_step {
        glow.step_intensity(delta);
        info!("Glow intensity: {:.2}", glow.intensity);
    }

    let shift = if keys.just_pressed(KeyCode::Minus) {
        Some((-RANGE_STEP, 0.0))
    } else if keys.just_pressed(KeyCode::Equal) {
        Some((RANGE_STEP, 0.0))
    } else if keys.just_pressed(KeyCode::BracketLeft) {
        Some((0.0, -RANGE_STEP))
    } else if keys.just_pressed(KeyCode::BracketRight) {
        Some((0.0, RANGE_STEP))
    } else {
        None
    };
    if let Some((dmin, dmax)) = shift {
        if let Err(e) = link.shift_distance_range(dmin, dmax) {
            warn!("Distance range not changed: {}", e);
        }
    }
}
