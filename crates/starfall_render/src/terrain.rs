use bevy::prelude::*;
use starfall_sim::Galaxy;

/// What the overlay shows besides the trails
#[derive(Resource)]
pub struct ViewSettings {
    pub show_heightmap: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { show_heightmap: true }
    }
}

/// Draw the sensor heightmap as one vertical bar per column
pub fn draw_heightmap(galaxy: Res<Galaxy>, view: Res<ViewSettings>, mut gizmos: Gizmos) {
    if !view.show_heightmap {
        return;
    }
    let sensor = galaxy.sensor_data();
    let base = sensor.offset[1];
    let color = Color::srgba(0.15, 0.2, 0.3, 0.6);

    for [x, top] in sensor.columns() {
        if top > base {
            gizmos.line_2d(Vec2::new(x, base), Vec2::new(x, top), color);
        }
    }
}
