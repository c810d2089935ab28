use bevy::core_pipeline::bloom::{Bloom, BloomPrefilter};
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::window::WindowResized;
use starfall_core::GlowConfig;
use starfall_sim::Galaxy;

use super::trails::TrailGizmos;

/// Marker for the orthographic starfield camera
#[derive(Component)]
pub struct StarfieldCamera;

/// Trail width in pixels at the reference window height
const BASE_LINE_WIDTH: f32 = 1.5;
const REFERENCE_HEIGHT: f32 = 1080.0;

/// Bloom strength step for one key press
pub const GLOW_STEP: f32 = 0.05;

/// Live bloom settings, seeded from the galaxy config and tweakable at runtime
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GlowSettings {
    pub intensity: f32,
    pub threshold: f32,
}

impl From<GlowConfig> for GlowSettings {
    fn from(glow: GlowConfig) -> Self {
        Self { intensity: glow.intensity, threshold: glow.threshold }
    }
}

impl FromWorld for GlowSettings {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<Galaxy>()
            .map(|galaxy| galaxy.config().glow)
            .unwrap_or_default()
            .into()
    }
}

impl GlowSettings {
    pub fn step_intensity(&mut self, delta: f32) {
        self.intensity = (self.intensity + delta).clamp(0.0, 1.0);
    }

    pub fn bloom(&self) -> Bloom {
        Bloom {
            intensity: self.intensity,
            prefilter: BloomPrefilter {
                threshold: self.threshold,
                threshold_softness: 0.0,
            },
            ..Bloom::NATURAL
        }
    }
}

/// Orthographic camera framing the whole volume, origin at the bottom left.
/// HDR + bloom makes the additive trails glow.
pub fn spawn_camera(mut commands: Commands, galaxy: Res<Galaxy>, glow: Res<GlowSettings>) {
    let [width, height, _] = galaxy.size();

    commands.spawn((
        Camera2d,
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::Reinhard,
        glow.bloom(),
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: width,
                min_height: height,
            },
            ..OrthographicProjection::default_2d()
        },
        Transform::from_xyz(width * 0.5, height * 0.5, 0.0),
        StarfieldCamera,
    ));
}

/// Push glow changes onto the camera
pub fn apply_glow(glow: Res<GlowSettings>, mut cameras: Query<&mut Bloom, With<StarfieldCamera>>) {
    if !glow.is_changed() {
        return;
    }
    for mut bloom in &mut cameras {
        *bloom = glow.bloom();
    }
}

/// Keep trail thickness proportional to the window so it reads the same at any size
pub fn fit_line_width(
    mut resized: EventReader<WindowResized>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    let Some(event) = resized.read().last() else {
        return;
    };
    let (config, _) = config_store.config_mut::<TrailGizmos>();
    config.line_width = line_width_for(event.height);
}

fn line_width_for(window_height: f32) -> f32 {
    (BASE_LINE_WIDTH * window_height / REFERENCE_HEIGHT).max(1.0)
}
