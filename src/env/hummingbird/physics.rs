//! Physics capabilities used by the hummingbird
//!
//! The agent logic never integrates motion itself. It talks to the physics
//! engine through three narrow traits:
//!
//! - [`PhysicsQuery`]: overlap tests, closest points and collider tags
//! - [`ColliderSet`]: registering colliders and toggling them
//! - [`AgentBody`]: the agent's own rigid body
//!
//! [`KinematicWorld`] is a small built-in engine implementing all three: a
//! single sphere body with linear drag, static sphere/box colliders, push-out
//! collision response and trigger enter/stay events.

use std::collections::HashSet;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::types::{ColliderId, ColliderTag, Transform};

/// Collision shape in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Sphere
    Sphere {
        /// Center
        center: Vec3,
        /// Radius
        radius: f32,
    },
    /// Axis-aligned box
    Cuboid {
        /// Center
        center: Vec3,
        /// Half size along each axis
        half_extents: Vec3,
    },
}

impl Shape {
    /// Closest point on or inside the shape to `point`
    ///
    /// Points inside the shape are returned unchanged.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        match *self {
            Shape::Sphere { center, radius } => {
                let delta = point - center;
                if delta.length() <= radius {
                    point
                } else {
                    center + delta.normalize() * radius
                }
            }
            Shape::Cuboid { center, half_extents } => {
                point.clamp(center - half_extents, center + half_extents)
            }
        }
    }

    /// Distance from `point` to the shape (zero inside)
    pub fn distance(&self, point: Vec3) -> f32 {
        point.distance(self.closest_point(point))
    }

    /// Whether a sphere touches the shape
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.distance(center) <= radius
    }

    /// Contact between a sphere and this shape
    ///
    /// Returns the normal pointing from the shape towards the sphere and the
    /// penetration depth, or `None` when they do not overlap.
    pub fn sphere_contact(&self, center: Vec3, radius: f32) -> Option<(Vec3, f32)> {
        match *self {
            Shape::Sphere { center: c, radius: r } => {
                let delta = center - c;
                let dist = delta.length();
                if dist >= r + radius {
                    return None;
                }
                let normal = if dist > f32::EPSILON { delta / dist } else { Vec3::Y };
                Some((normal, r + radius - dist))
            }
            Shape::Cuboid { center: c, half_extents } => {
                let local = center - c;
                let inside = local.abs().cmple(half_extents).all();
                if inside {
                    // Leave through the nearest face
                    let gap = half_extents - local.abs();
                    let (axis, depth) = if gap.x <= gap.y && gap.x <= gap.z {
                        (Vec3::X * local.x.signum(), gap.x)
                    } else if gap.y <= gap.z {
                        (Vec3::Y * local.y.signum(), gap.y)
                    } else {
                        (Vec3::Z * local.z.signum(), gap.z)
                    };
                    return Some((axis, depth + radius));
                }
                let closest = self.closest_point(center);
                let delta = center - closest;
                let dist = delta.length();
                if dist >= radius {
                    return None;
                }
                Some((delta / dist, radius - dist))
            }
        }
    }
}

/// Description of a collider to register
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Geometry
    pub shape: Shape,
    /// Scene tag
    #[serde(default)]
    pub tag: ColliderTag,
    /// Trigger volumes report overlaps but do not block
    #[serde(default)]
    pub is_trigger: bool,
}

impl ColliderDesc {
    /// Solid collider
    pub fn solid(shape: Shape, tag: ColliderTag) -> Self {
        Self { shape, tag, is_trigger: false }
    }

    /// Trigger collider
    pub fn trigger(shape: Shape, tag: ColliderTag) -> Self {
        Self { shape, tag, is_trigger: true }
    }
}

/// Read-only physics queries
pub trait PhysicsQuery {
    /// Enabled colliders (triggers included) overlapping a sphere
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderId>;

    /// Closest point on a collider to `point`
    fn closest_point(&self, collider: ColliderId, point: Vec3) -> Vec3;

    /// Tag of a collider
    fn collider_tag(&self, collider: ColliderId) -> ColliderTag;
}

/// Mutable access to the static colliders of a world
pub trait ColliderSet {
    /// Register a collider, enabled
    fn insert_collider(&mut self, desc: ColliderDesc) -> ColliderId;

    /// Move or resize a collider
    fn set_collider_shape(&mut self, collider: ColliderId, shape: Shape);

    /// Activate or deactivate a collider
    fn set_collider_enabled(&mut self, collider: ColliderId, enabled: bool);
}

/// The agent's rigid body
pub trait AgentBody {
    /// Current pose
    fn body_transform(&self) -> Transform;

    /// Teleport the body
    fn set_body_position(&mut self, position: Vec3);

    /// Set the body orientation
    fn set_body_rotation(&mut self, rotation: Quat);

    /// Accumulate a force for the next physics step
    fn add_force(&mut self, force: Vec3);

    /// Stop all linear and angular motion
    fn zero_velocity(&mut self);

    /// Stop simulating the body
    fn sleep(&mut self);

    /// Resume simulating the body
    fn wake_up(&mut self);
}

/// Everything the hummingbird needs from a physics engine
pub trait PhysicsWorld: PhysicsQuery + ColliderSet + AgentBody {}

impl<T: PhysicsQuery + ColliderSet + AgentBody> PhysicsWorld for T {}

/// Contact callback produced by a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// Body started overlapping a trigger
    TriggerEnter(ColliderId),
    /// Body still overlaps a trigger
    TriggerStay(ColliderId),
    /// Body started touching a solid collider
    CollisionEnter(ColliderId),
}

/// Physical parameters of the agent body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    /// Mass in kg
    pub mass: f32,
    /// Fraction of velocity removed per second
    pub linear_drag: f32,
    /// Radius of the body sphere
    pub radius: f32,
    /// Beak tip in the body's local frame
    pub beak_offset: Vec3,
    /// Radius of the trigger probe at the beak tip
    pub beak_radius: f32,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            linear_drag: 2.0,
            radius: 0.04,
            beak_offset: Vec3::new(0.0, 0.0, 0.05),
            beak_radius: 0.005,
        }
    }
}

#[derive(Debug, Clone)]
struct ColliderEntry {
    desc: ColliderDesc,
    enabled: bool,
}

/// Minimal physics engine for a single flying body
#[derive(Debug, Clone)]
pub struct KinematicWorld {
    colliders: Vec<ColliderEntry>,
    params: BodyParams,

    transform: Transform,
    velocity: Vec3,
    angular_velocity: Vec3,
    force: Vec3,
    sleeping: bool,

    /// Colliders the body touched at the end of the last step
    touching: HashSet<ColliderId>,
}

impl KinematicWorld {
    /// Create an empty world with the body at the origin
    pub fn new(params: BodyParams) -> Self {
        Self {
            colliders: Vec::new(),
            params,
            transform: Transform::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            sleeping: false,
            touching: HashSet::new(),
        }
    }

    /// Body parameters
    pub fn params(&self) -> &BodyParams {
        &self.params
    }

    /// Current linear velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Current angular velocity
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Whether the body is asleep
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Number of registered colliders
    pub fn num_colliders(&self) -> usize {
        self.colliders.len()
    }

    /// Whether a collider is active
    pub fn is_collider_enabled(&self, collider: ColliderId) -> bool {
        self.colliders[collider.0].enabled
    }

    /// Current shape of a collider
    pub fn collider_shape(&self, collider: ColliderId) -> Shape {
        self.colliders[collider.0].desc.shape
    }

    /// World position of the beak tip
    pub fn beak_tip(&self) -> Vec3 {
        self.transform.transform_point(self.params.beak_offset)
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Integrates the accumulated force with semi-implicit Euler and linear
    /// drag, pushes the body out of solid colliders and reports contacts.
    pub fn step(&mut self, dt: f32) -> Vec<ContactEvent> {
        let force = std::mem::take(&mut self.force);
        if self.sleeping {
            return Vec::new();
        }

        self.velocity += force / self.params.mass * dt;
        self.velocity *= (1.0 - self.params.linear_drag * dt).clamp(0.0, 1.0);
        self.transform.translation += self.velocity * dt;

        let mut events = Vec::new();
        let mut touching = HashSet::new();

        for (index, entry) in self.colliders.iter().enumerate() {
            if !entry.enabled {
                continue;
            }
            let id = ColliderId(index);
            let position = self.transform.translation;

            if entry.desc.is_trigger {
                let beak_tip = self.transform.transform_point(self.params.beak_offset);
                let overlaps = entry.desc.shape.intersects_sphere(position, self.params.radius)
                    || entry.desc.shape.intersects_sphere(beak_tip, self.params.beak_radius);
                if overlaps {
                    touching.insert(id);
                    if self.touching.contains(&id) {
                        events.push(ContactEvent::TriggerStay(id));
                    } else {
                        events.push(ContactEvent::TriggerEnter(id));
                    }
                }
            } else if let Some((normal, depth)) =
                entry.desc.shape.sphere_contact(position, self.params.radius)
            {
                self.transform.translation += normal * depth;
                let into_surface = self.velocity.dot(normal);
                if into_surface < 0.0 {
                    self.velocity -= normal * into_surface;
                }
                touching.insert(id);
                if !self.touching.contains(&id) {
                    events.push(ContactEvent::CollisionEnter(id));
                }
            }
        }

        self.touching = touching;
        events
    }
}

impl Default for KinematicWorld {
    fn default() -> Self {
        Self::new(BodyParams::default())
    }
}

impl PhysicsQuery for KinematicWorld {
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderId> {
        self.colliders
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.enabled && entry.desc.shape.intersects_sphere(center, radius))
            .map(|(index, _)| ColliderId(index))
            .collect()
    }

    fn closest_point(&self, collider: ColliderId, point: Vec3) -> Vec3 {
        self.colliders[collider.0].desc.shape.closest_point(point)
    }

    fn collider_tag(&self, collider: ColliderId) -> ColliderTag {
        self.colliders[collider.0].desc.tag
    }
}

impl ColliderSet for KinematicWorld {
    fn insert_collider(&mut self, desc: ColliderDesc) -> ColliderId {
        self.colliders.push(ColliderEntry { desc, enabled: true });
        ColliderId(self.colliders.len() - 1)
    }

    fn set_collider_shape(&mut self, collider: ColliderId, shape: Shape) {
        self.colliders[collider.0].desc.shape = shape;
    }

    fn set_collider_enabled(&mut self, collider: ColliderId, enabled: bool) {
        self.colliders[collider.0].enabled = enabled;
        if !enabled {
            self.touching.remove(&collider);
        }
    }
}

impl AgentBody for KinematicWorld {
    fn body_transform(&self) -> Transform {
        self.transform
    }

    fn set_body_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn set_body_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    fn zero_velocity(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    fn sleep(&mut self) {
        self.sleeping = true;
        self.zero_velocity();
    }

    fn wake_up(&mut self) {
        self.sleeping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(center: Vec3, radius: f32) -> Shape {
        Shape::Sphere { center, radius }
    }

    #[test]
    fn test_sphere_closest_point() {
        let shape = sphere(Vec3::ZERO, 1.0);
        assert_eq!(shape.closest_point(Vec3::new(0.5, 0.0, 0.0)), Vec3::new(0.5, 0.0, 0.0));
        let outside = shape.closest_point(Vec3::new(3.0, 0.0, 0.0));
        assert!((outside - Vec3::X).length() < 1e-6);
        assert!((shape.distance(Vec3::new(0.0, 3.0, 0.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cuboid_contact_from_inside_uses_nearest_face() {
        let shape = Shape::Cuboid { center: Vec3::ZERO, half_extents: Vec3::new(1.0, 1.0, 1.0) };
        let (normal, depth) = shape.sphere_contact(Vec3::new(0.0, 0.9, 0.0), 0.1).unwrap();
        assert_eq!(normal, Vec3::Y);
        assert!((depth - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_skips_disabled() {
        let mut world = KinematicWorld::default();
        let a = world.insert_collider(ColliderDesc::solid(sphere(Vec3::ZERO, 0.5), ColliderTag::Untagged));
        let b = world.insert_collider(ColliderDesc::trigger(sphere(Vec3::ZERO, 0.2), ColliderTag::Nectar));

        assert_eq!(world.overlap_sphere(Vec3::ZERO, 0.05), vec![a, b]);

        world.set_collider_enabled(a, false);
        assert_eq!(world.overlap_sphere(Vec3::ZERO, 0.05), vec![b]);
        assert!(world.overlap_sphere(Vec3::new(5.0, 0.0, 0.0), 0.05).is_empty());
    }

    #[test]
    fn test_force_moves_body() {
        let mut world = KinematicWorld::default();
        world.add_force(Vec3::new(0.0, 0.0, 2.0));
        world.step(0.02);

        assert!(world.velocity().z > 0.0);
        assert!(world.body_transform().translation.z > 0.0);

        // Force is consumed by the step; drag slows the body down afterwards
        let speed = world.velocity().z;
        world.step(0.02);
        assert!(world.velocity().z < speed);
    }

    #[test]
    fn test_sleeping_body_does_not_move() {
        let mut world = KinematicWorld::default();
        world.add_force(Vec3::X * 10.0);
        world.step(0.02);
        world.sleep();
        world.add_force(Vec3::X * 10.0);
        let before = world.body_transform().translation;
        world.step(0.02);
        assert_eq!(world.body_transform().translation, before);
        assert_eq!(world.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_collision_enter_fires_once_per_contact() {
        let mut world = KinematicWorld::default();
        let wall = world.insert_collider(ColliderDesc::solid(
            Shape::Cuboid { center: Vec3::new(0.0, 0.0, 1.0), half_extents: Vec3::new(5.0, 5.0, 0.5) },
            ColliderTag::Boundary,
        ));
        world.set_body_position(Vec3::new(0.0, 0.0, 0.47));

        let events = world.step(0.02);
        assert_eq!(events, vec![ContactEvent::CollisionEnter(wall)]);
        assert!(world.body_transform().translation.z <= 0.46 + 1e-5, "body is pushed out");

        // Pressing into the wall keeps the contact without a new enter
        world.add_force(Vec3::Z * 5.0);
        let events = world.step(0.02);
        assert!(events.is_empty(), "got {:?}", events);
    }

    #[test]
    fn test_trigger_enter_then_stay() {
        let mut world = KinematicWorld::default();
        let nectar = world.insert_collider(ColliderDesc::trigger(
            sphere(Vec3::new(0.0, 0.0, 0.06), 0.01),
            ColliderTag::Nectar,
        ));

        let events = world.step(0.02);
        assert_eq!(events, vec![ContactEvent::TriggerEnter(nectar)]);
        let events = world.step(0.02);
        assert_eq!(events, vec![ContactEvent::TriggerStay(nectar)]);

        world.set_collider_enabled(nectar, false);
        assert!(world.step(0.02).is_empty());
    }
}
