//! Shared kinematics for bodies that fall and land.
//!
//! Each entity picks the steps it needs; the order used by walkers is
//! gravity, integrate, horizontal clamp, platform landing, world clamp.

use super::body::Body;
use super::platform::Platform;
use crate::consts::{GRAVITY, LANDING_TOLERANCE};

pub fn apply_gravity(body: &mut Body, dt: f32) {
    body.vel_y += GRAVITY * dt;
}

pub fn integrate(body: &mut Body, dt: f32) {
    body.x += body.vel_x * dt;
    body.y += body.vel_y * dt;
}

/// Keeps the body inside `[0, world_width - width]`
pub fn clamp_horizontal(body: &mut Body, world_width: f32) {
    let max_x = world_width - body.width as f32;
    body.x = body.x.max(0.0).min(max_x);
}

/// Like [`clamp_horizontal`] but turns the horizontal velocity away from the wall it hit
pub fn clamp_horizontal_bounce(body: &mut Body, world_width: f32) {
    if body.x < 0.0 {
        body.x = 0.0;
        body.vel_x = body.vel_x.abs();
    }
    if body.x + body.width as f32 > world_width {
        body.x = world_width - body.width as f32;
        body.vel_x = -body.vel_x.abs();
    }
}

/// Snaps the body onto any platform it dropped into this step.
///
/// A landing needs overlap, downward (or zero) vertical velocity and a previous
/// bottom edge at or just above the platform top, so walking into a platform's
/// side or jumping up through it never counts. Must run after [`integrate`]
/// with the same `dt`. Returns true when the body ended up standing on one.
pub fn land_on_platforms(body: &mut Body, dt: f32, platforms: &[Platform]) -> bool {
    let mut grounded = false;
    for platform in platforms {
        let previous_bottom = body.bottom() - body.vel_y * dt;
        if body.bounds().intersects(&platform.bounds())
            && previous_bottom <= platform.top() + LANDING_TOLERANCE
            && body.vel_y >= 0.0
        {
            body.y = platform.top() - body.height as f32;
            body.vel_y = 0.0;
            grounded = true;
        }
    }
    grounded
}

/// Clamps against the world floor and, when `ceiling` is set, the top edge.
/// Returns true when the body rests on the floor.
pub fn clamp_vertical(body: &mut Body, world_height: f32, ceiling: bool) -> bool {
    let mut on_floor = false;
    if body.bottom() >= world_height {
        body.y = world_height - body.height as f32;
        body.vel_y = 0.0;
        on_floor = true;
    }
    if ceiling && body.y < 0.0 {
        body.y = 0.0;
        body.vel_y = 0.0;
    }
    on_floor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf() -> Vec<Platform> {
        vec![Platform::new(100, 400, 200, 18)]
    }

    #[test]
    fn test_gravity_accelerates_downward() {
        let mut body = Body::new(0.0, 0.0, 10, 10);
        apply_gravity(&mut body, 0.5);
        assert_eq!(body.vel_y, 450.0);
    }

    #[test]
    fn test_falling_body_lands_on_top() {
        // Bottom at 398 before the step, 403 after
        let mut body = Body::new(150.0, 328.0, 20, 70).with_velocity(0.0, 100.0);
        integrate(&mut body, 0.05);
        let grounded = land_on_platforms(&mut body, 0.05, &shelf());
        assert!(grounded);
        assert_eq!(body.y, 330.0);
        assert_eq!(body.vel_y, 0.0);
    }

    #[test]
    fn test_rising_body_passes_through() {
        let mut body = Body::new(150.0, 405.0, 20, 20).with_velocity(0.0, -200.0);
        integrate(&mut body, 0.05);
        assert!(!land_on_platforms(&mut body, 0.05, &shelf()));
        assert_eq!(body.y, 395.0);
    }

    #[test]
    fn test_side_entry_is_not_a_landing() {
        // Overlapping the shelf from the side with its bottom well below the top
        let mut body = Body::new(95.0, 390.0, 20, 40).with_velocity(100.0, 10.0);
        integrate(&mut body, 0.05);
        assert!(!land_on_platforms(&mut body, 0.05, &shelf()));
    }

    #[test]
    fn test_floor_and_ceiling_clamp() {
        let mut body = Body::new(0.0, 690.0, 10, 20).with_velocity(0.0, 50.0);
        assert!(clamp_vertical(&mut body, 700.0, true));
        assert_eq!(body.y, 680.0);

        let mut body = Body::new(0.0, -30.0, 10, 20).with_velocity(0.0, -50.0);
        assert!(!clamp_vertical(&mut body, 700.0, true));
        assert_eq!(body.y, 0.0);
        assert_eq!(body.vel_y, 0.0);

        let mut body = Body::new(0.0, -30.0, 10, 20);
        clamp_vertical(&mut body, 700.0, false);
        assert_eq!(body.y, -30.0);
    }

    #[test]
    fn test_bounce_reverses_velocity() {
        let mut body = Body::new(-5.0, 0.0, 10, 10).with_velocity(-40.0, 0.0);
        clamp_horizontal_bounce(&mut body, 100.0);
        assert_eq!(body.x, 0.0);
        assert_eq!(body.vel_x, 40.0);

        let mut body = Body::new(95.0, 0.0, 10, 10).with_velocity(40.0, 0.0);
        clamp_horizontal_bounce(&mut body, 100.0);
        assert_eq!(body.x, 90.0);
        assert_eq!(body.vel_x, -40.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_horizontal_clamp_keeps_body_visible(x in -2000.0f32..2000.0, width in 1i32..200) {
                let mut body = Body::new(x, 0.0, width, 10);
                clamp_horizontal(&mut body, 900.0);
                prop_assert!(body.x >= 0.0);
                prop_assert!(body.x + width as f32 <= 900.0);
            }
        }
    }
}
