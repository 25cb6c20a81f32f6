//! Collision predicates
//!
//! Two shapes matter here: circles (player, boss, hazards) and instantaneous
//! line segments (lasers). Overlap comparisons are strictly `<`: two circles
//! exactly at the sum of their radii do not collide.

use glam::Vec2;

use crate::consts::{LASER_HIT_PAD, PLAYER_RADIUS};
use crate::sim::state::Laser;

/// Circle-circle overlap, strict inequality at the boundary
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let radius_sum = radius_a + radius_b;
    a.distance_squared(b) < radius_sum * radius_sum
}

/// Distance from a point to the closest point on segment `a..b`
///
/// Projects the point onto the segment, clamps the projection parameter to
/// [0, 1], and measures to the clamped point.
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq < f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Laser-player contact: player center within `PLAYER_RADIUS + LASER_HIT_PAD`
/// of the beam segment
pub fn laser_hits_player(laser: &Laser, player_pos: Vec2) -> bool {
    point_segment_distance(player_pos, laser.origin, laser.endpoint()) < PLAYER_RADIUS + LASER_HIT_PAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_radius_sum_does_not_collide() {
        // Spec boundary: strict `<` comparison
        let a = Vec2::ZERO;
        let b = Vec2::new(25.0, 0.0);
        assert!(!circles_overlap(a, 15.0, b, 10.0));
    }

    #[test]
    fn just_inside_radius_sum_collides() {
        let a = Vec2::ZERO;
        let b = Vec2::new(24.999, 0.0);
        assert!(circles_overlap(a, 15.0, b, 10.0));
    }

    #[test]
    fn point_segment_distance_projects_and_clamps() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        // Perpendicular drop onto the interior
        assert!((point_segment_distance(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-5);
        // Beyond the far endpoint: clamped to b
        assert!((point_segment_distance(Vec2::new(14.0, 3.0), a, b) - 5.0).abs() < 1e-5);
        // Before the near endpoint: clamped to a
        assert!((point_segment_distance(Vec2::new(-3.0, 4.0), a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_segment_is_point_distance() {
        let p = Vec2::new(3.0, 4.0);
        assert!((point_segment_distance(p, Vec2::ZERO, Vec2::ZERO) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn laser_hit_respects_pad() {
        let laser = Laser { origin: Vec2::new(400.0, 100.0), angle: 0.0 };
        // Beam runs toward +x; player sitting just under the pad distance
        let near = Vec2::new(500.0, 100.0 + PLAYER_RADIUS + LASER_HIT_PAD - 0.5);
        assert!(laser_hits_player(&laser, near));
        let far = Vec2::new(500.0, 100.0 + PLAYER_RADIUS + LASER_HIT_PAD + 0.5);
        assert!(!laser_hits_player(&laser, far));
        // Behind the origin is out of reach
        assert!(!laser_hits_player(&laser, Vec2::new(300.0, 100.0)));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
            ra in 0.1f32..100.0, rb in 0.1f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ra, b, rb), circles_overlap(b, rb, a, ra));
        }

        #[test]
        fn segment_distance_never_exceeds_endpoint_distance(
            px in -1000.0f32..1000.0, py in -1000.0f32..1000.0,
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
        ) {
            let p = Vec2::new(px, py);
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            let d = point_segment_distance(p, a, b);
            prop_assert!(d <= p.distance(a) + 1e-3);
            prop_assert!(d <= p.distance(b) + 1e-3);
        }
    }
}
