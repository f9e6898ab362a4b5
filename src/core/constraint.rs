use crate::types::{Body, Vec2};

/// Pull `body` back inside the circle if any part of it sticks out.
///
/// A body centred exactly on `center` can only breach when its radius
/// exceeds the boundary, which configuration rejects; `+x` is taken as its
/// direction in that case.
pub fn contain_in_circle(body: &mut Body, center: Vec2, boundary_radius: f32) {
    let limit = boundary_radius - body.radius;
    let delta = body.position - center;
    let distance = delta.length();
    if distance > limit {
        let dir = if distance > 0.0 {
            delta / distance
        } else {
            Vec2::new(1.0, 0.0)
        };
        body.position = center + dir * limit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn inside_body_is_untouched() {
        let mut body = Body::new(Vec2::new(10.0, 0.0), 5.0);
        contain_in_circle(&mut body, Vec2::ZERO, 50.0);
        assert_eq!(body.position, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn body_touching_boundary_is_untouched() {
        let mut body = Body::new(Vec2::new(0.0, 45.0), 5.0);
        contain_in_circle(&mut body, Vec2::ZERO, 50.0);
        assert_eq!(body.position, Vec2::new(0.0, 45.0));
    }

    #[test]
    fn breaching_body_is_moved_onto_limit_circle() {
        let mut body = Body::new(Vec2::new(30.0, 40.0), 5.0);
        contain_in_circle(&mut body, Vec2::ZERO, 50.0);
        assert_abs_diff_eq!(body.position.x, 27.0, epsilon = 1e-4);
        assert_abs_diff_eq!(body.position.y, 36.0, epsilon = 1e-4);
    }

    #[test]
    fn respects_offset_center() {
        let center = Vec2::new(100.0, 100.0);
        let mut body = Body::new(Vec2::new(100.0, 200.0), 2.0);
        contain_in_circle(&mut body, center, 20.0);
        assert_abs_diff_eq!(body.position.x, 100.0, epsilon = 1e-4);
        assert_abs_diff_eq!(body.position.y, 118.0, epsilon = 1e-4);
    }

    #[test]
    fn leaves_previous_position_alone() {
        let mut body = Body::new(Vec2::new(60.0, 0.0), 5.0);
        body.position_previous = Vec2::new(58.0, 0.0);
        contain_in_circle(&mut body, Vec2::ZERO, 50.0);
        assert_eq!(body.position_previous, Vec2::new(58.0, 0.0));
    }

    #[test]
    fn oversized_body_at_center_uses_fallback_normal() {
        let mut body = Body::new(Vec2::ZERO, 10.0);
        contain_in_circle(&mut body, Vec2::ZERO, 5.0);
        assert_eq!(body.position, Vec2::new(-5.0, 0.0));
    }
}
