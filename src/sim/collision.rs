//! Collision detection and response for axis-aligned bodies
//!
//! Movement is resolved one axis at a time: X is moved and corrected against the
//! whole obstacle list, then Y is moved from the already-corrected position. This
//! is what lets a body slide along a wall instead of sticking on corners.
//!
//! Obstacles are scanned in list order and every overlap is clamped in turn. When
//! two obstacles overlap after the same pass, the earlier one wins, regardless of
//! penetration depth.

use glam::Vec2;

use super::body::Body;

/// Turn a directional intent into a per-frame displacement
///
/// Diagonal intent is scaled by 1/√2 on each axis so the step length always
/// equals `speed`.
pub fn movement_step(dir: Vec2, speed: f32) -> Vec2 {
    let mut dir = dir;
    if dir.x != 0.0 && dir.y != 0.0 {
        dir *= std::f32::consts::FRAC_1_SQRT_2;
    }
    dir * speed
}

/// Displace `body` by (dx, dy) and push it out of any overlapped obstacle
pub fn resolve(body: Body, dx: f32, dy: f32, obstacles: &[Body]) -> Body {
    let mut body = body;

    body.pos.x += dx;
    for wall in obstacles {
        if body.overlaps(wall) {
            if dx > 0.0 {
                body.set_right(wall.left());
            }
            if dx < 0.0 {
                body.set_left(wall.right());
            }
        }
    }

    body.pos.y += dy;
    for wall in obstacles {
        if body.overlaps(wall) {
            if dy > 0.0 {
                body.set_bottom(wall.top());
            }
            if dy < 0.0 {
                body.set_top(wall.bottom());
            }
        }
    }

    body
}

/// First obstacle (in list order) that `body` overlaps
pub fn first_overlap<'a>(body: &Body, obstacles: &'a [Body]) -> Option<&'a Body> {
    obstacles.iter().find(|o| body.overlaps(o))
}
