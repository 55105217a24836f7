//! Collision response between balls and against the viewport walls
//!
//! Both passes only touch velocities. Positions are corrected indirectly, by
//! the next integration step.

use glam::Vec2;

use super::balls::BallCollection;
use super::viewport::Viewport;

/// Velocity push from ball `a` onto ball `b` when they overlap.
///
/// `delta` is `b.pos - a.pos`. The push is scaled by the penetration depth;
/// the caller subtracts `push / r_a` from `a` and adds `push / r_b` to `b`.
/// Returns `None` when the balls don't overlap, and when the centers
/// coincide (no direction to push along).
#[inline]
pub fn overlap_push(delta: Vec2, r_a: f32, r_b: f32) -> Option<Vec2> {
    let distance = delta.length();
    if distance >= r_a + r_b {
        return None;
    }
    if distance == 0.0 {
        return None;
    }
    Some(push_along(delta, distance, r_a, r_b))
}

/// Same as [`overlap_push`] but divides by a zero distance, producing
/// non-finite velocities for coincident centers.
#[inline]
fn overlap_push_unguarded(delta: Vec2, r_a: f32, r_b: f32) -> Option<Vec2> {
    let distance = delta.length();
    (distance < r_a + r_b).then(|| push_along(delta, distance, r_a, r_b))
}

#[inline]
fn push_along(delta: Vec2, distance: f32, r_a: f32, r_b: f32) -> Vec2 {
    let power = r_a + r_b - distance;
    let mid = delta / 2.0;
    let dir = delta / distance;
    (mid + dir * r_a) * power
}

/// Pass 1: push overlapping balls apart.
///
/// Every ordered pair (i, j), i != j, is visited in ascending index order and
/// applied immediately, so each unordered pair contributes twice and later
/// pairs see earlier velocity changes. Changing the visiting order changes the
/// trajectories.
pub fn resolve_ball_collisions(balls: &mut BallCollection, skip_coincident: bool) {
    let cols = balls.columns_mut();
    let count = cols.x.len();

    for i in 0..count {
        let pos_i = Vec2::new(cols.x[i], cols.y[i]);
        let r_i = cols.radius[i];

        for j in 0..count {
            if j == i {
                continue;
            }
            let delta = Vec2::new(cols.x[j], cols.y[j]) - pos_i;
            let r_j = cols.radius[j];

            let push = if skip_coincident {
                overlap_push(delta, r_i, r_j)
            } else {
                overlap_push_unguarded(delta, r_i, r_j)
            };

            match push {
                Some(push) => {
                    cols.vx[i] -= push.x / r_i;
                    cols.vy[i] -= push.y / r_i;
                    cols.vx[j] += push.x / r_j;
                    cols.vy[j] += push.y / r_j;
                }
                None if delta == Vec2::ZERO => {
                    log::trace!("skipping coincident balls {} and {}", i, j);
                }
                None => {}
            }
        }
    }
}

/// Should a velocity component be flipped against the `[0, extent]` walls?
#[inline]
pub fn hits_wall(pos: f32, vel: f32, radius: f32, extent: f32) -> bool {
    (pos - radius < 0.0 && vel < 0.0) || (pos + radius > extent && vel > 0.0)
}

/// Pass 3: invert velocity components heading out of the viewport.
///
/// Positions are left alone, so a ball can overshoot the wall for a tick
/// before the flipped velocity brings it back.
pub fn reflect_off_walls(balls: &mut BallCollection, viewport: &Viewport) {
    let cols = balls.columns_mut();
    let (width, height) = (viewport.right(), viewport.bottom());

    for i in 0..cols.x.len() {
        let radius = cols.radius[i];
        if hits_wall(cols.x[i], cols.vx[i], radius, width) {
            cols.vx[i] = -cols.vx[i];
        }
        if hits_wall(cols.y[i], cols.vy[i], radius, height) {
            cols.vy[i] = -cols.vy[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::balls::Ball;

    fn resting(x: f32, y: f32, radius: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::ZERO, radius)
    }

    #[test]
    fn test_overlap_push_separated() {
        assert!(overlap_push(Vec2::new(50.0, 0.0), 20.0, 20.0).is_none());
        // Touching exactly is not an overlap
        assert!(overlap_push(Vec2::new(40.0, 0.0), 20.0, 20.0).is_none());
    }

    #[test]
    fn test_overlap_push_magnitude() {
        // distance 30, radii 20+20: power 10, (15 + 20) * 10
        let push = overlap_push(Vec2::new(30.0, 0.0), 20.0, 20.0).unwrap();
        assert!((push.x - 350.0).abs() < 1e-3);
        assert_eq!(push.y, 0.0);
    }

    #[test]
    fn test_equal_balls_pushed_apart() {
        let mut balls =
            BallCollection::from_balls(&[resting(100.0, 100.0, 20.0), resting(130.0, 100.0, 20.0)])
                .unwrap();
        resolve_ball_collisions(&mut balls, true);

        let a = balls.get(0).unwrap();
        let b = balls.get(1).unwrap();
        // Each ordered pair contributes -17.5 / +17.5
        assert!((a.vel.x - -35.0).abs() < 1e-3);
        assert!((b.vel.x - 35.0).abs() < 1e-3);
        assert_eq!(a.vel.y, 0.0);
        assert_eq!(b.vel.y, 0.0);
        // Positions untouched
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_unequal_balls_smaller_moves_faster() {
        let mut balls =
            BallCollection::from_balls(&[resting(0.0, 0.0, 40.0), resting(0.0, 40.0, 10.0)])
                .unwrap();
        resolve_ball_collisions(&mut balls, true);

        let big = balls.get(0).unwrap();
        let small = balls.get(1).unwrap();
        assert!(big.vel.y < 0.0);
        assert!(small.vel.y > 0.0);
        assert!(small.vel.y.abs() > big.vel.y.abs());
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let mut balls =
            BallCollection::from_balls(&[resting(10.0, 10.0, 15.0), resting(10.0, 10.0, 15.0)])
                .unwrap();
        resolve_ball_collisions(&mut balls, true);
        for ball in balls.iter() {
            assert_eq!(ball.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn test_coincident_centers_unguarded_goes_non_finite() {
        let mut balls =
            BallCollection::from_balls(&[resting(10.0, 10.0, 15.0), resting(10.0, 10.0, 15.0)])
                .unwrap();
        resolve_ball_collisions(&mut balls, false);
        assert!(!balls.get(0).unwrap().vel.is_finite());
    }

    #[test]
    fn test_hits_wall() {
        // Past the left wall and moving left
        assert!(hits_wall(-40.0, -50.0, 20.0, 800.0));
        // Past the left wall but already moving back
        assert!(!hits_wall(10.0, 50.0, 20.0, 800.0));
        // Past the right wall and moving right
        assert!(hits_wall(790.0, 10.0, 20.0, 800.0));
        assert!(!hits_wall(400.0, -10.0, 20.0, 800.0));
    }

    #[test]
    fn test_reflect_off_walls_per_axis() {
        let mut balls = BallCollection::from_balls(&[Ball::new(
            Vec2::new(795.0, 5.0),
            Vec2::new(30.0, -20.0),
            10.0,
        )])
        .unwrap();
        let viewport = Viewport::new(800, 600).unwrap();
        reflect_off_walls(&mut balls, &viewport);

        let ball = balls.get(0).unwrap();
        assert_eq!(ball.vel, Vec2::new(-30.0, 20.0));
        // No position correction
        assert_eq!(ball.pos, Vec2::new(795.0, 5.0));
    }
}
