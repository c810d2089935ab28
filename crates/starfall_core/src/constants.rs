// Simulation constants (screen-scaled units)
// The volume is measured in the same units the orthographic camera shows:
// 1 unit = 1 sensor column at the default pixel size.

/// Downward acceleration applied on the vertical axis
pub const GRAVITY: f32 = -9.8;

/// Velocity-proportional drag factor
pub const DRAG_COEFFICIENT: f32 = 0.01;

/// Collisions a star may take before it stops bouncing
pub const MAX_COLLISIONS: u32 = 100;

/// Cosine-power exponent of the bounce lobe (higher = tighter around +Y)
pub const LOBE_EXPONENT: f32 = 20.0;

/// Speed a star leaves the ground with after a bounce
pub const BOUNCE_SPEED: f32 = 20.0;

/// Stars below this height are recycled
pub const MIN_Y: f32 = -5.0;

/// Step used when the caller does not supply one
pub const DEFAULT_DT: f32 = 0.03;

/// Stars in the pool at startup
pub const DEFAULT_STAR_COUNT: u32 = 600;

/// Simulation volume (width, height, depth)
pub const VOLUME_SIZE: [f32; 3] = [320.0, 170.0, 100.0];

/// Number of positions kept per trail
pub const TRAIL_LENGTH: usize = 20;

/// Hardware limits of the depth threshold filter, in meters
pub const SENSOR_DISTANCE_LIMIT: f32 = 16.0;

/// Default bloom strength for the trails
pub const GLOW_INTENSITY: f32 = 0.3;
