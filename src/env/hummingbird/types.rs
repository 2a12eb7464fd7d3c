//! Basic types for the hummingbird environment
//!
//! Identifiers, rigid transforms, tints, collider tags and the fixed-size
//! action/observation vectors exchanged with the ML backend.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Number of continuous actions: move x/y/z, pitch, yaw
pub const ACTION_SIZE: usize = 5;

/// Number of observation scalars
pub const OBSERVATION_SIZE: usize = 10;

/// Continuous action vector
///
/// - Index 0: move x (+1 = right, -1 = left)
/// - Index 1: move y (+1 = up, -1 = down)
/// - Index 2: move z (+1 = forward, -1 = backward)
/// - Index 3: pitch (+1 = pitch up, -1 = pitch down)
/// - Index 4: yaw (+1 = turn right, -1 = turn left)
pub type Action = [f32; ACTION_SIZE];

/// Observation vector
pub type Observation = [f32; OBSERVATION_SIZE];

/// Index of a flower in its area's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowerId(pub usize);

/// Index of a plant group in its area's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlantId(pub usize);

/// Handle of a collider registered with the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub usize);

/// Scene tag carried by a collider
///
/// These strings are the contract between scene authoring and the
/// environment logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderTag {
    /// Feedable nectar volume of a flower
    Nectar,
    /// Walls, ground and ceiling of the area
    Boundary,
    /// Anything else: petals, rocks, branches
    #[default]
    Untagged,
}

/// Tag string marking a flower-plant group in a scene description
pub const FLOWER_PLANT_TAG: &str = "flower_plant";

/// Tag string of nectar colliders
pub const NECTAR_TAG: &str = "nectar";

/// Tag string of boundary colliders
pub const BOUNDARY_TAG: &str = "boundary";

/// RGB tint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Create new color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Rigid transform (no scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position
    pub translation: Vec3,
    /// Orientation
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY };

    /// Create from translation and rotation
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    /// Pure translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, rotation: Quat::IDENTITY }
    }

    /// Compose `self` (parent) with a child-local transform
    pub fn mul_transform(&self, local: &Transform) -> Transform {
        Transform {
            translation: self.translation + self.rotation * local.translation,
            rotation: self.rotation * local.rotation,
        }
    }

    /// Map a point from local space to the space `self` lives in
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }

    /// Map a point from the space `self` lives in to local space
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.translation)
    }

    /// Local +Z axis
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Local +Y axis
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Local +X axis
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

/// Rotation from Euler angles in degrees: roll about Z, then pitch about X,
/// then yaw about Y
pub fn euler_degrees(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw.to_radians(), pitch.to_radians(), roll.to_radians())
}

/// Pitch and yaw (degrees) of a rotation that looks along `direction` with
/// no roll
///
/// Returns `(0, 0)` for a zero direction.
pub fn look_angles(direction: Vec3) -> (f32, f32) {
    if direction.length_squared() <= f32::EPSILON {
        return (0.0, 0.0);
    }
    let horizontal = (direction.x * direction.x + direction.z * direction.z).sqrt();
    let pitch = (-direction.y).atan2(horizontal).to_degrees();
    let yaw = direction.x.atan2(direction.z).to_degrees();
    (pitch, yaw)
}

/// Move `current` towards `target` by at most `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
