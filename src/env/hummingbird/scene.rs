//! Scene descriptions and the import step
//!
//! A scene is authored as a tree of named nodes with string tags, the way it
//! would be laid out in an editor. Import resolves every node once into a
//! [`SceneNodeKind`] so the rest of the environment never looks at tags.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{
    physics::{ColliderDesc, Shape},
    types::{euler_degrees, ColliderTag, Transform, FLOWER_PLANT_TAG},
};

/// Geometry of a flower's two colliders, relative to the flower node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowerSpec {
    /// Nectar collider center in the flower's frame
    pub nectar_offset: Vec3,
    /// Radius of the nectar trigger
    pub nectar_radius: f32,
    /// Radius of the solid petal collider around the flower origin
    pub petal_radius: f32,
}

impl Default for FlowerSpec {
    fn default() -> Self {
        Self { nectar_offset: Vec3::new(0.0, 0.02, 0.0), nectar_radius: 0.015, petal_radius: 0.03 }
    }
}

/// A node of an authored scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Display name
    pub name: String,

    /// Editor tag, e.g. `"flower_plant"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Transform relative to the parent node
    #[serde(default)]
    pub transform: Transform,

    /// Present when the node is a flower
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flower: Option<FlowerSpec>,

    /// Child nodes, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

/// What a scene node is, resolved from its tag and components
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneNodeKind {
    /// Rotatable group of flowers; searched further
    PlantGroup,
    /// A flower; its subtree is not searched
    Flower(FlowerSpec),
    /// Anything else; searched further
    Container,
}

impl SceneNode {
    /// Plain container node
    pub fn container(name: impl Into<String>, transform: Transform) -> Self {
        Self { name: name.into(), tag: None, transform, flower: None, children: Vec::new() }
    }

    /// Node tagged as a flower-plant group
    pub fn plant(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            tag: Some(FLOWER_PLANT_TAG.to_string()),
            transform,
            flower: None,
            children: Vec::new(),
        }
    }

    /// Flower node with default collider geometry
    pub fn flower(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            tag: None,
            transform,
            flower: Some(FlowerSpec::default()),
            children: Vec::new(),
        }
    }

    /// Append a child
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Resolve the node kind
    ///
    /// The plant tag wins over a flower component.
    pub fn kind(&self) -> SceneNodeKind {
        if self.tag.as_deref() == Some(FLOWER_PLANT_TAG) {
            SceneNodeKind::PlantGroup
        } else if let Some(spec) = self.flower {
            SceneNodeKind::Flower(spec)
        } else {
            SceneNodeKind::Container
        }
    }
}

/// Static collider that is not part of a flower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticCollider {
    /// Display name
    pub name: String,
    /// Collider geometry and tag
    #[serde(flatten)]
    pub desc: ColliderDesc,
}

/// A complete flower area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Area transform; agent positions are observed relative to it
    #[serde(default)]
    pub origin: Transform,

    /// Children of the area
    #[serde(default)]
    pub nodes: Vec<SceneNode>,

    /// Boundaries and obstacles, in world space
    #[serde(default)]
    pub colliders: Vec<StaticCollider>,
}

impl Scene {
    /// Parse a scene from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid scene description")
    }

    /// Load a scene from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Save the scene as pretty JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Add the six walls of a box-shaped boundary around the area origin
    ///
    /// `half_extents` is the inner half size; the floor sits at the origin.
    pub fn with_boundary_box(mut self, half_extents: Vec3, thickness: f32) -> Self {
        let center = self.origin.translation + Vec3::Y * half_extents.y;
        let t = thickness * 0.5;
        let outer = half_extents + Vec3::splat(thickness);
        let walls = [
            ("ground", Vec3::NEG_Y, Vec3::new(outer.x, t, outer.z)),
            ("ceiling", Vec3::Y, Vec3::new(outer.x, t, outer.z)),
            ("wall_west", Vec3::NEG_X, Vec3::new(t, outer.y, outer.z)),
            ("wall_east", Vec3::X, Vec3::new(t, outer.y, outer.z)),
            ("wall_south", Vec3::NEG_Z, Vec3::new(outer.x, outer.y, t)),
            ("wall_north", Vec3::Z, Vec3::new(outer.x, outer.y, t)),
        ];
        for (name, axis, wall_half) in walls {
            let offset = axis * (half_extents + Vec3::splat(t));
            self.colliders.push(StaticCollider {
                name: name.to_string(),
                desc: ColliderDesc::solid(
                    Shape::Cuboid { center: center + offset, half_extents: wall_half },
                    ColliderTag::Boundary,
                ),
            });
        }
        self
    }

    /// Island used by the demos and tests
    ///
    /// Six plants on a ring of radius 4 around the origin, three flowers
    /// each, inside a 20 × 6 × 20 boundary box.
    pub fn island() -> Self {
        let blossoms = [
            (Vec3::new(0.3, 1.0, 0.0), 10.0_f32),
            (Vec3::new(-0.2, 1.3, 0.2), -15.0),
            (Vec3::new(0.0, 1.6, -0.3), 5.0),
        ];

        let nodes = (0..6)
            .map(|i| {
                let angle = (i as f32 * 60.0).to_radians();
                let base = Vec3::new(angle.sin() * 4.0, 0.0, angle.cos() * 4.0);
                let stem = blossoms.iter().enumerate().fold(
                    SceneNode::container("stem", Transform::IDENTITY),
                    |stem, (j, &(offset, tilt))| {
                        stem.with_child(SceneNode::flower(
                            format!("flower_{}_{}", i, j),
                            Transform::new(offset, euler_degrees(tilt, 0.0, tilt * 0.5)),
                        ))
                    },
                );
                SceneNode::plant(format!("plant_{}", i), Transform::from_translation(base))
                    .with_child(stem)
            })
            .collect();

        Scene { origin: Transform::IDENTITY, nodes, colliders: Vec::new() }
            .with_boundary_box(Vec3::new(10.0, 3.0, 10.0), 0.5)
    }
}
