//! Flower area: the plants and flowers of one island
//!
//! The area owns an arena of flowers and plant groups built once from a
//! [`Scene`], plus the lookup from nectar collider to flower. Plant groups
//! are re-rotated at every training episode; flower poses follow their
//! ancestors through the scene hierarchy.

use std::collections::HashMap;

use glam::Vec3;
use rand::Rng;

use super::{
    flower::Flower,
    physics::{ColliderDesc, ColliderSet, Shape},
    scene::{FlowerSpec, Scene, SceneNode, SceneNodeKind},
    types::{euler_degrees, ColliderId, ColliderTag, Color, FlowerId, PlantId, Transform},
};

/// Diameter of the area, used to normalise distance observations
pub const AREA_DIAMETER: f32 = 20.0;

/// Node of the flattened scene hierarchy
#[derive(Debug, Clone)]
struct NodeRecord {
    parent: Option<usize>,
    local: Transform,
}

/// Group of flowers rotated together
#[derive(Debug, Clone)]
pub struct PlantGroup {
    name: String,
    node: usize,
}

impl PlantGroup {
    /// Scene name of the plant
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
struct FlowerSlot {
    flower: Flower,
    node: usize,
    spec: FlowerSpec,
}

/// All plants and flowers of one area
#[derive(Debug, Clone)]
pub struct FlowerArea {
    nodes: Vec<NodeRecord>,
    plants: Vec<PlantGroup>,
    flowers: Vec<FlowerSlot>,
    nectar_lookup: HashMap<ColliderId, FlowerId>,
}

impl FlowerArea {
    /// Import a scene, registering its colliders with `colliders`
    pub fn from_scene<C: ColliderSet>(scene: &Scene, colliders: &mut C) -> Self {
        Self::from_scene_with_colors(
            scene,
            colliders,
            super::flower::FULL_FLOWER_COLOR,
            super::flower::EMPTY_FLOWER_COLOR,
        )
    }

    /// Import a scene with custom flower tints
    pub fn from_scene_with_colors<C: ColliderSet>(
        scene: &Scene,
        colliders: &mut C,
        full_color: Color,
        empty_color: Color,
    ) -> Self {
        let mut area = Self {
            nodes: vec![NodeRecord { parent: None, local: scene.origin }],
            plants: Vec::new(),
            flowers: Vec::new(),
            nectar_lookup: HashMap::new(),
        };

        for collider in &scene.colliders {
            colliders.insert_collider(collider.desc);
        }

        area.find_child_flowers(0, &scene.nodes, colliders, full_color, empty_color);

        tracing::debug!(
            plants = area.plants.len(),
            flowers = area.flowers.len(),
            "flower area imported"
        );
        area
    }

    fn find_child_flowers<C: ColliderSet>(
        &mut self,
        parent: usize,
        children: &[SceneNode],
        colliders: &mut C,
        full_color: Color,
        empty_color: Color,
    ) {
        for child in children {
            let node = self.nodes.len();
            self.nodes.push(NodeRecord { parent: Some(parent), local: child.transform });

            match child.kind() {
                SceneNodeKind::PlantGroup => {
                    self.plants.push(PlantGroup { name: child.name.clone(), node });
                    self.find_child_flowers(node, &child.children, colliders, full_color, empty_color);
                }
                SceneNodeKind::Flower(spec) => {
                    let transform = self.world_transform(node);
                    let nectar_local = Transform::from_translation(spec.nectar_offset);

                    let flower_collider = colliders.insert_collider(ColliderDesc::solid(
                        petal_shape(&transform, &spec),
                        ColliderTag::Untagged,
                    ));
                    let nectar_collider = colliders.insert_collider(ColliderDesc::trigger(
                        nectar_shape(&transform, &spec),
                        ColliderTag::Nectar,
                    ));

                    let id = FlowerId(self.flowers.len());
                    let flower = Flower::new(flower_collider, nectar_collider, transform, nectar_local)
                        .with_colors(full_color, empty_color);
                    self.flowers.push(FlowerSlot { flower, node, spec });
                    self.nectar_lookup.insert(nectar_collider, id);
                }
                SceneNodeKind::Container => {
                    self.find_child_flowers(node, &child.children, colliders, full_color, empty_color);
                }
            }
        }
    }

    /// World transform of a hierarchy node
    fn world_transform(&self, node: usize) -> Transform {
        let record = &self.nodes[node];
        match record.parent {
            Some(parent) => self.world_transform(parent).mul_transform(&record.local),
            None => record.local,
        }
    }

    /// Transform of the area itself
    pub fn transform(&self) -> Transform {
        self.nodes[0].local
    }

    /// Area origin in world space
    pub fn origin(&self) -> Vec3 {
        self.nodes[0].local.translation
    }

    /// Number of flowers
    pub fn num_flowers(&self) -> usize {
        self.flowers.len()
    }

    /// Flower by id
    pub fn flower(&self, id: FlowerId) -> &Flower {
        &self.flowers[id.0].flower
    }

    /// Mutable flower by id
    pub fn flower_mut(&mut self, id: FlowerId) -> &mut Flower {
        &mut self.flowers[id.0].flower
    }

    /// Flowers in discovery order
    pub fn flowers(&self) -> impl Iterator<Item = (FlowerId, &Flower)> + '_ {
        self.flowers.iter().enumerate().map(|(i, slot)| (FlowerId(i), &slot.flower))
    }

    /// Plant groups in discovery order
    pub fn plants(&self) -> &[PlantGroup] {
        &self.plants
    }

    /// Local rotation of a plant group
    pub fn plant_transform(&self, id: PlantId) -> Transform {
        self.nodes[self.plants[id.0].node].local
    }

    /// Flower owning a nectar collider
    ///
    /// # Panics
    ///
    /// Panics if `collider` is not the nectar collider of a flower in this
    /// area. Callers pass handles that came from nectar-tagged contacts.
    pub fn flower_from_nectar(&self, collider: ColliderId) -> FlowerId {
        match self.nectar_lookup.get(&collider) {
            Some(&id) => id,
            None => panic!("collider {:?} is not a nectar collider of this area", collider),
        }
    }

    /// Flower owning a nectar collider, if any
    pub fn try_flower_from_nectar(&self, collider: ColliderId) -> Option<FlowerId> {
        self.nectar_lookup.get(&collider).copied()
    }

    /// Randomly rotate every plant group and refill every flower
    ///
    /// Each plant gets its own small tilt (±5° about x and z) and a
    /// full-range yaw (±180°).
    pub fn reset_flowers<R: Rng>(&mut self, rng: &mut R) {
        for plant in &self.plants {
            let x_rotation = rng.gen_range(-5.0..=5.0);
            let y_rotation = rng.gen_range(-180.0..=180.0);
            let z_rotation = rng.gen_range(-5.0..=5.0);

            self.nodes[plant.node].local.rotation = euler_degrees(x_rotation, y_rotation, z_rotation);
        }

        for index in 0..self.flowers.len() {
            let transform = self.world_transform(self.flowers[index].node);
            let slot = &mut self.flowers[index];
            slot.flower.set_transform(transform);
            slot.flower.reset_flower();
        }
    }

    /// Push flower collider poses and enabled flags into the physics world
    pub fn sync_physics<C: ColliderSet + ?Sized>(&self, colliders: &mut C) {
        for slot in &self.flowers {
            let flower = &slot.flower;
            colliders.set_collider_shape(flower.flower_collider(), petal_shape(flower.transform(), &slot.spec));
            colliders.set_collider_shape(flower.nectar_collider(), nectar_shape(flower.transform(), &slot.spec));
            colliders.set_collider_enabled(flower.flower_collider(), flower.flower_collider_enabled());
            colliders.set_collider_enabled(flower.nectar_collider(), flower.nectar_collider_enabled());
        }
    }
}

fn petal_shape(transform: &Transform, spec: &FlowerSpec) -> Shape {
    Shape::Sphere { center: transform.translation, radius: spec.petal_radius }
}

fn nectar_shape(transform: &Transform, spec: &FlowerSpec) -> Shape {
    Shape::Sphere { center: transform.transform_point(spec.nectar_offset), radius: spec.nectar_radius }
}
