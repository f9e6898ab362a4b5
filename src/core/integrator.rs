//! Position Verlet stepping.
//!
//! Velocity lives in `position - position_previous`. Corrections that move
//! `position` alone therefore carry into the next step as momentum, which
//! is why collisions and containment run before [`integrate`].

use crate::types::{Body, Vec2};

/// Advance `body` by `dt` and reset its accumulated acceleration.
pub fn integrate(body: &mut Body, dt: f32) {
    let velocity = body.position - body.position_previous;
    body.position_previous = body.position;
    body.position += velocity + body.acceleration * (dt * dt);
    body.acceleration = Vec2::ZERO;
}

pub fn accumulate(body: &mut Body, acceleration: Vec2) {
    body.acceleration += acceleration;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    mod integrate_fn {
        use super::*;

        #[test]
        fn body_at_rest_without_acceleration_stays_put() {
            let mut body = Body::new(Vec2::new(3.0, 4.0), 1.0);
            integrate(&mut body, 0.1);
            assert_eq!(body.position, Vec2::new(3.0, 4.0));
            assert_eq!(body.position_previous, Vec2::new(3.0, 4.0));
        }

        #[test]
        fn carries_implicit_velocity() {
            let mut body = Body::with_displacement(Vec2::new(10.0, 10.0), Vec2::new(1.0, -2.0), 1.0);
            integrate(&mut body, 0.1);
            assert_eq!(body.position, Vec2::new(11.0, 8.0));
            assert_eq!(body.position_previous, Vec2::new(10.0, 10.0));
        }

        #[test]
        fn applies_acceleration_scaled_by_dt_squared() {
            let mut body = Body::new(Vec2::ZERO, 1.0);
            body.acceleration = Vec2::new(0.0, 100.0);
            integrate(&mut body, 0.1);
            assert_abs_diff_eq!(body.position.y, 1.0, epsilon = 1e-5);
            assert_eq!(body.position.x, 0.0);
        }

        #[test]
        fn resets_accumulator() {
            let mut body = Body::new(Vec2::ZERO, 1.0);
            body.acceleration = Vec2::new(5.0, 5.0);
            integrate(&mut body, 0.5);
            assert_eq!(body.acceleration, Vec2::ZERO);
        }

        #[test]
        fn position_only_correction_becomes_velocity() {
            let mut body = Body::new(Vec2::new(5.0, 5.0), 1.0);
            body.position += Vec2::new(0.5, 0.0);
            integrate(&mut body, 0.1);
            assert_eq!(body.position, Vec2::new(6.0, 5.0));
        }
    }

    mod accumulate_fn {
        use super::*;

        #[test]
        fn sums_successive_contributions() {
            let mut body = Body::new(Vec2::ZERO, 1.0);
            accumulate(&mut body, Vec2::new(1.0, 2.0));
            accumulate(&mut body, Vec2::new(0.5, -1.0));
            assert_eq!(body.acceleration, Vec2::new(1.5, 1.0));
        }
    }
}
