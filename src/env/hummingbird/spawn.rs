//! Spawn placement search
//!
//! At the start of an episode the agent is moved either just in front of a
//! random flower or to a random point above the island. Candidates are
//! rejected while a small probe sphere overlaps anything; the search gives up
//! after a fixed number of attempts and keeps the last candidate.

use anyhow::{bail, Result};
use glam::Vec3;
use rand::Rng;

use super::{
    area::FlowerArea,
    physics::PhysicsQuery,
    types::{euler_degrees, look_angles, FlowerId},
};

/// Maximum number of candidates tried per spawn
pub const MAX_SPAWN_ATTEMPTS: usize = 100;

/// Radius of the overlap probe at a candidate position
pub const SPAWN_PROBE_RADIUS: f32 = 0.05;

/// Where the agent ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlacement {
    /// World position
    pub position: Vec3,
    /// Pitch in degrees (positive noses down)
    pub pitch: f32,
    /// Yaw in degrees
    pub yaw: f32,
    /// Candidates generated, including the accepted one
    pub attempts: usize,
    /// Whether the final candidate was collision-free
    pub safe: bool,
    /// Flower the agent was placed in front of, if any
    pub flower: Option<FlowerId>,
}

/// Search for a collision-free spawn point
///
/// Fails only when asked to spawn in front of a flower in an area that has
/// none. Running out of attempts is not an error: the last candidate is
/// returned with `safe == false` and a warning is logged.
pub fn find_spawn_placement<Q, R>(
    area: &FlowerArea,
    physics: &Q,
    rng: &mut R,
    in_front_of_flower: bool,
) -> Result<SpawnPlacement>
where
    Q: PhysicsQuery + ?Sized,
    R: Rng,
{
    if in_front_of_flower && area.num_flowers() == 0 {
        bail!("cannot spawn in front of a flower: the area has no flowers");
    }

    let mut placement = SpawnPlacement {
        position: Vec3::ZERO,
        pitch: 0.0,
        yaw: 0.0,
        attempts: 0,
        safe: false,
        flower: None,
    };

    while !placement.safe && placement.attempts < MAX_SPAWN_ATTEMPTS {
        placement.attempts += 1;

        if in_front_of_flower {
            let id = FlowerId(rng.gen_range(0..area.num_flowers()));
            let flower = area.flower(id);

            // 10 to 20 cm in front of the flower
            let distance_from_flower: f32 = rng.gen_range(0.1..=0.2);
            placement.position = flower.position() + flower.up_vector() * distance_from_flower;

            // Point the beak at the flower
            let to_flower = flower.center_position() - placement.position;
            let (pitch, yaw) = look_angles(to_flower);
            placement.pitch = pitch;
            placement.yaw = yaw;
            placement.flower = Some(id);
        } else {
            let height: f32 = rng.gen_range(1.2..=2.5);
            let radius: f32 = rng.gen_range(2.0..=7.0);
            let direction = euler_degrees(0.0, rng.gen_range(-180.0..=180.0), 0.0);

            placement.position = area.origin() + Vec3::Y * height + direction * Vec3::Z * radius;
            placement.pitch = rng.gen_range(-60.0..=60.0);
            placement.yaw = rng.gen_range(-180.0..=180.0);
            placement.flower = None;
        }

        placement.safe = physics.overlap_sphere(placement.position, SPAWN_PROBE_RADIUS).is_empty();
    }

    if placement.safe {
        tracing::debug!(
            attempts = placement.attempts,
            position = ?placement.position,
            "spawn position found"
        );
    } else {
        tracing::warn!(
            attempts = placement.attempts,
            position = ?placement.position,
            "could not find a safe position to spawn"
        );
    }

    Ok(placement)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::env::hummingbird::{
        physics::KinematicWorld,
        scene::{Scene, SceneNode},
        types::{ColliderId, ColliderTag, Transform},
    };

    /// Reports an overlap for the first `blocked` queries
    struct BlockedQueries {
        blocked: usize,
        calls: Cell<usize>,
    }

    impl PhysicsQuery for BlockedQueries {
        fn overlap_sphere(&self, _center: Vec3, _radius: f32) -> Vec<ColliderId> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if call < self.blocked {
                vec![ColliderId(0)]
            } else {
                Vec::new()
            }
        }

        fn closest_point(&self, _collider: ColliderId, point: Vec3) -> Vec3 {
            point
        }

        fn collider_tag(&self, _collider: ColliderId) -> ColliderTag {
            ColliderTag::Untagged
        }
    }

    fn island() -> (FlowerArea, KinematicWorld) {
        let mut world = KinematicWorld::default();
        let area = FlowerArea::from_scene(&Scene::island(), &mut world);
        (area, world)
    }

    #[test]
    fn test_free_spawn_is_in_shell() {
        let (area, world) = island();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let placement = find_spawn_placement(&area, &world, &mut rng, false).unwrap();
            assert!(placement.safe);
            assert!(placement.flower.is_none());

            let p = placement.position;
            assert!((1.2..=2.5).contains(&p.y), "height {}", p.y);
            let radius = (p.x * p.x + p.z * p.z).sqrt();
            assert!((2.0 - 1e-4..=7.0 + 1e-4).contains(&radius), "radius {}", radius);
            assert!((-60.0..=60.0).contains(&placement.pitch));
            assert!(world.overlap_sphere(p, SPAWN_PROBE_RADIUS).is_empty());
        }
    }

    #[test]
    fn test_flower_spawn_faces_flower() {
        let (area, world) = island();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            let placement = find_spawn_placement(&area, &world, &mut rng, true).unwrap();
            let flower = area.flower(placement.flower.unwrap());

            let distance = placement.position.distance(flower.position());
            assert!((0.1 - 1e-4..=0.2 + 1e-4).contains(&distance), "distance {}", distance);

            let forward = euler_degrees(placement.pitch, placement.yaw, 0.0) * Vec3::Z;
            let to_center = (flower.center_position() - placement.position).normalize();
            assert!(forward.dot(to_center) > 0.999, "beak does not point at the flower");
        }
    }

    #[test]
    fn test_spawn_retries_until_free() {
        let (area, _) = island();
        let mut rng = StdRng::seed_from_u64(3);
        let query = BlockedQueries { blocked: 37, calls: Cell::new(0) };

        let placement = find_spawn_placement(&area, &query, &mut rng, false).unwrap();

        assert!(placement.safe);
        assert_eq!(placement.attempts, 38);
    }

    #[test]
    fn test_spawn_gives_up_after_budget() {
        let (area, _) = island();
        let mut rng = StdRng::seed_from_u64(4);
        let query = BlockedQueries { blocked: usize::MAX, calls: Cell::new(0) };

        let placement = find_spawn_placement(&area, &query, &mut rng, true).unwrap();

        assert!(!placement.safe);
        assert_eq!(placement.attempts, MAX_SPAWN_ATTEMPTS);
        assert_eq!(query.calls.get(), MAX_SPAWN_ATTEMPTS);
        assert!(placement.flower.is_some(), "last candidate is kept");
    }

    #[test]
    fn test_flower_spawn_without_flowers_fails() {
        let mut world = KinematicWorld::default();
        let scene = Scene {
            origin: Transform::IDENTITY,
            nodes: vec![SceneNode::container("empty", Transform::IDENTITY)],
            colliders: Vec::new(),
        };
        let area = FlowerArea::from_scene(&scene, &mut world);
        let mut rng = StdRng::seed_from_u64(5);

        assert!(find_spawn_placement(&area, &world, &mut rng, true).is_err());
        assert!(find_spawn_placement(&area, &world, &mut rng, false).unwrap().safe);
    }
}
