use bevy::prelude::*;

use super::camera::{self, GlowSettings};
use super::terrain::{self, ViewSettings};
use super::trails::{self, StarTrails, TrailGizmos};
use super::ui;

/// Main render plugin: camera, trails, heightmap overlay and HUD
pub struct StarfallRenderPlugin;

impl Plugin for StarfallRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<TrailGizmos>()
            .init_resource::<StarTrails>()
            .init_resource::<ViewSettings>()
            .init_resource::<GlowSettings>()
            .init_resource::<ui::HudThrottle>()
            .add_systems(Startup, (camera::spawn_camera, ui::spawn_hud))
            .add_systems(
                Update,
                (
                    trails::sync_trails,
                    trails::draw_trails.after(trails::sync_trails),
                    terrain::draw_heightmap,
                    camera::fit_line_width,
                    camera::apply_glow.after(ui::keyboard_system),
                    ui::keyboard_system,
                    ui::update_hud,
                ),
            );
    }
}
