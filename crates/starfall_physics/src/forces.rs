/// Acceleration from quadratic drag against the wind plus gravity on Y.
/// Drag magnitude is `drag_coefficient * |velocity|`, applied to the
/// velocity relative to the wind.
pub fn drag_and_gravity(
    velocity: [f32; 3],
    wind: [f32; 3],
    drag_coefficient: f32,
    gravity: f32,
) -> [f32; 3] {
    let speed = (velocity[0] * velocity[0]
        + velocity[1] * velocity[1]
        + velocity[2] * velocity[2])
        .sqrt();
    let drag = drag_coefficient * speed;

    [
        -drag * (velocity[0] - wind[0]),
        -drag * (velocity[1] - wind[1]) + gravity,
        -drag * (velocity[2] - wind[2]),
    ]
}
