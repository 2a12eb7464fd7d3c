//! Hummingbird agent: perception, action and reward shaping
//!
//! The agent never owns physics state. Every operation receives the area
//! and the physics capabilities it needs; the agent keeps only its own
//! bookkeeping: orientation, smoothing state, nearest flower, nectar and
//! reward accumulators.

use anyhow::Result;
use glam::Vec3;
use rand::Rng;

use super::{
    area::{FlowerArea, AREA_DIAMETER},
    config::HummingbirdConfig,
    input::HumanInput,
    physics::{AgentBody, PhysicsQuery, PhysicsWorld},
    spawn::{find_spawn_placement, SpawnPlacement},
    types::{euler_degrees, move_towards, Action, ColliderId, ColliderTag, FlowerId, Observation, OBSERVATION_SIZE},
};

/// Maximum angle the bird can pitch up or down
pub const MAX_PITCH_ANGLE: f32 = 80.0;

/// Maximum distance from the beak tip to accept a nectar contact
pub const BEAK_TIP_RADIUS: f32 = 0.008;

/// Nectar requested per qualifying contact
pub const NECTAR_PER_SIP: f32 = 0.01;

/// Base reward for a sip of nectar
pub const NECTAR_REWARD: f32 = 0.01;

/// Extra reward for a perfectly aligned sip
pub const ALIGNMENT_BONUS: f32 = 0.02;

/// Reward for hitting the area boundary
pub const BOUNDARY_PENALTY: f32 = -0.5;

/// Outcome of a nectar contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NectarSip {
    /// Flower that was fed on
    pub flower: FlowerId,
    /// Nectar actually taken
    pub nectar_taken: f32,
    /// Reward granted (zero outside training)
    pub reward: f32,
    /// Whether the flower is now empty
    pub emptied: bool,
}

/// The hummingbird agent
#[derive(Debug, Clone)]
pub struct HummingbirdAgent {
    move_force: f32,
    pitch_speed: f32,
    yaw_speed: f32,
    fixed_delta_time: f32,
    beak_tip_offset: Vec3,
    training_mode: bool,
    max_step: usize,

    /// Orientation in degrees; pitch stays within ±MAX_PITCH_ANGLE once
    /// the agent has acted
    pitch: f32,
    yaw: f32,

    smooth_pitch_change: f32,
    smooth_yaw_change: f32,

    nearest_flower: Option<FlowerId>,
    frozen: bool,

    nectar_obtained: f32,
    pending_reward: f32,
    cumulative_reward: f32,
}

impl HummingbirdAgent {
    /// Create an agent from configuration
    pub fn new(config: &HummingbirdConfig) -> Self {
        Self {
            move_force: config.move_force,
            pitch_speed: config.pitch_speed,
            yaw_speed: config.yaw_speed,
            fixed_delta_time: config.fixed_delta_time,
            beak_tip_offset: config.beak_tip_offset,
            training_mode: config.training_mode,
            max_step: config.effective_max_step(),
            pitch: 0.0,
            yaw: 0.0,
            smooth_pitch_change: 0.0,
            smooth_yaw_change: 0.0,
            nearest_flower: None,
            frozen: false,
            nectar_obtained: 0.0,
            pending_reward: 0.0,
            cumulative_reward: 0.0,
        }
    }

    /// Whether the agent is in training mode
    pub fn training_mode(&self) -> bool {
        self.training_mode
    }

    /// Step budget per episode; 0 means unlimited
    pub fn max_step(&self) -> usize {
        self.max_step
    }

    /// Nectar obtained this episode
    pub fn nectar_obtained(&self) -> f32 {
        self.nectar_obtained
    }

    /// Flower the agent is currently heading for
    pub fn nearest_flower(&self) -> Option<FlowerId> {
        self.nearest_flower
    }

    /// Whether actions are being ignored
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Current pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current yaw in degrees, in `[0, 360)`
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Reward summed over the current episode
    pub fn cumulative_reward(&self) -> f32 {
        self.cumulative_reward
    }

    /// Add to the reward of the current step
    pub fn add_reward(&mut self, reward: f32) {
        self.pending_reward += reward;
        self.cumulative_reward += reward;
    }

    /// Take the reward accumulated since the last call
    pub fn take_reward(&mut self) -> f32 {
        std::mem::take(&mut self.pending_reward)
    }

    /// World position of the beak tip
    pub fn beak_tip<B: AgentBody + ?Sized>(&self, body: &B) -> Vec3 {
        body.body_transform().transform_point(self.beak_tip_offset)
    }

    /// Reset the agent for a new episode
    ///
    /// In training mode the flowers are reset first. The agent spawns in
    /// front of a flower outside training and half the time during training.
    pub fn on_episode_begin<W, R>(
        &mut self,
        area: &mut FlowerArea,
        world: &mut W,
        rng: &mut R,
    ) -> Result<SpawnPlacement>
    where
        W: PhysicsWorld,
        R: Rng,
    {
        if self.training_mode {
            area.reset_flowers(rng);
            area.sync_physics(world);
        }

        self.nectar_obtained = 0.0;
        self.pending_reward = 0.0;
        self.cumulative_reward = 0.0;

        world.zero_velocity();

        let in_front_of_flower = if self.training_mode { rng.gen::<f32>() > 0.5 } else { true };

        let placement = self.move_to_safe_random_position(area, world, rng, in_front_of_flower)?;

        self.update_nearest_flower(area, &*world);

        tracing::debug!(
            in_front_of_flower,
            attempts = placement.attempts,
            nearest = ?self.nearest_flower,
            "episode begin"
        );
        Ok(placement)
    }

    fn move_to_safe_random_position<W, R>(
        &mut self,
        area: &FlowerArea,
        world: &mut W,
        rng: &mut R,
        in_front_of_flower: bool,
    ) -> Result<SpawnPlacement>
    where
        W: PhysicsWorld,
        R: Rng,
    {
        let placement = find_spawn_placement(area, &*world, rng, in_front_of_flower)?;
        self.teleport(placement.position, placement.pitch, placement.yaw, world);
        Ok(placement)
    }

    /// Move the body and set its orientation in degrees
    pub fn teleport<B: AgentBody + ?Sized>(&mut self, position: Vec3, pitch: f32, yaw: f32, body: &mut B) {
        self.pitch = pitch;
        self.yaw = yaw.rem_euclid(360.0);
        body.set_body_position(position);
        body.set_body_rotation(euler_degrees(self.pitch, self.yaw, 0.0));
    }

    /// Apply one action from the player or the policy
    ///
    /// Does nothing while frozen.
    pub fn on_action_received<B: AgentBody + ?Sized>(&mut self, action: &Action, body: &mut B) {
        if self.frozen {
            return;
        }

        let movement = Vec3::new(action[0], action[1], action[2]);
        body.add_force(movement * self.move_force);

        let pitch_change = action[3];
        let yaw_change = action[4];

        let dt = self.fixed_delta_time;
        self.smooth_pitch_change = move_towards(self.smooth_pitch_change, pitch_change, 2.0 * dt);
        self.smooth_yaw_change = move_towards(self.smooth_yaw_change, yaw_change, 2.0 * dt);

        // Work from the [0, 360) pitch an Euler decomposition would report,
        // then bring it back into [-180, 180] before clamping
        let mut pitch = self.pitch.rem_euclid(360.0) + self.smooth_pitch_change * dt * self.pitch_speed;
        if pitch > 180.0 {
            pitch -= 360.0;
        }
        self.pitch = pitch.clamp(-MAX_PITCH_ANGLE, MAX_PITCH_ANGLE);

        self.yaw = (self.yaw + self.smooth_yaw_change * dt * self.yaw_speed).rem_euclid(360.0);

        body.set_body_rotation(euler_degrees(self.pitch, self.yaw, 0.0));
    }

    /// Action from held keys, for interactive play
    pub fn heuristic<B: AgentBody + ?Sized>(&self, input: &HumanInput, body: &B) -> Action {
        input.to_action(&body.body_transform())
    }

    /// Build the observation vector
    ///
    /// Layout: local position direction (3), beak-to-flower direction (3),
    /// alignment of that direction with the flower opening (1), alignment
    /// of the beak with the flower opening (1), beak-to-flower distance over
    /// the area diameter (1), one zero of padding. All zeros when there is
    /// no nearest flower.
    pub fn collect_observations<B: AgentBody + ?Sized>(&self, area: &FlowerArea, body: &B) -> Observation {
        let mut observation = [0.0; OBSERVATION_SIZE];

        let Some(nearest) = self.nearest_flower else {
            return observation;
        };
        let flower = area.flower(nearest);

        let transform = body.body_transform();
        let beak_tip = transform.transform_point(self.beak_tip_offset);
        let local_position = area.transform().inverse_transform_point(transform.translation).normalize_or_zero();

        let to_flower = flower.center_position() - beak_tip;
        let to_flower_direction = to_flower.normalize_or_zero();
        let flower_inward = -flower.up_vector().normalize_or_zero();
        let beak_forward = transform.forward().normalize_or_zero();

        observation[0..3].copy_from_slice(&local_position.to_array());
        observation[3..6].copy_from_slice(&to_flower_direction.to_array());
        observation[6] = to_flower_direction.dot(flower_inward);
        observation[7] = beak_forward.dot(flower_inward);
        observation[8] = to_flower.length() / AREA_DIAMETER;

        observation
    }

    /// Re-pick the flower the agent should head for
    ///
    /// Linear scan in discovery order starting from the current choice: an
    /// empty current choice is always replaced, otherwise only a strictly
    /// closer flower with nectar replaces it.
    pub fn update_nearest_flower<B: AgentBody + ?Sized>(&mut self, area: &FlowerArea, body: &B) {
        let beak_tip = self.beak_tip(body);

        for (id, flower) in area.flowers() {
            if !flower.has_nectar() {
                continue;
            }
            match self.nearest_flower {
                None => self.nearest_flower = Some(id),
                Some(current) => {
                    let current = area.flower(current);
                    let distance_to_flower = flower.position().distance(beak_tip);
                    let distance_to_current_flower = current.position().distance(beak_tip);

                    if !current.has_nectar() || distance_to_flower < distance_to_current_flower {
                        self.nearest_flower = Some(id);
                    }
                }
            }
        }
    }

    /// Trigger enter/stay callback
    ///
    /// Returns the sip when the contact was a qualifying nectar contact.
    pub fn on_trigger_enter_or_stay<W>(
        &mut self,
        collider: ColliderId,
        area: &mut FlowerArea,
        world: &W,
    ) -> Option<NectarSip>
    where
        W: PhysicsQuery + AgentBody + ?Sized,
    {
        if world.collider_tag(collider) != ColliderTag::Nectar {
            return None;
        }

        let beak_tip = self.beak_tip(world);
        let closest_point_to_beak_tip = world.closest_point(collider, beak_tip);
        if beak_tip.distance(closest_point_to_beak_tip) >= BEAK_TIP_RADIUS {
            return None;
        }

        let id = area.flower_from_nectar(collider);
        let nectar_taken = area.flower_mut(id).feed(NECTAR_PER_SIP);
        self.nectar_obtained += nectar_taken;

        let emptied = !area.flower(id).has_nectar();
        let mut reward = 0.0;

        if self.training_mode {
            let alignment = match self.nearest_flower {
                Some(nearest) => {
                    let forward = world.body_transform().forward().normalize_or_zero();
                    forward.dot(area.flower(nearest).up_vector().normalize_or_zero()).clamp(0.0, 1.0)
                }
                None => 0.0,
            };
            reward = NECTAR_REWARD + ALIGNMENT_BONUS * alignment;
            self.add_reward(reward);

            if emptied {
                self.update_nearest_flower(area, world);
            }
        }

        Some(NectarSip { flower: id, nectar_taken, reward, emptied })
    }

    /// Collision enter callback
    ///
    /// Returns the reward granted, if any.
    pub fn on_collision_enter<Q: PhysicsQuery + ?Sized>(&mut self, collider: ColliderId, world: &Q) -> Option<f32> {
        if self.training_mode && world.collider_tag(collider) == ColliderTag::Boundary {
            self.add_reward(BOUNDARY_PENALTY);
            Some(BOUNDARY_PENALTY)
        } else {
            None
        }
    }

    /// Stop the agent from acting (interactive mode only)
    pub fn freeze<B: AgentBody + ?Sized>(&mut self, body: &mut B) {
        if self.training_mode {
            tracing::warn!("freeze/unfreeze not supported in training");
        }
        self.frozen = true;
        body.sleep();
    }

    /// Let the agent act again (interactive mode only)
    pub fn unfreeze<B: AgentBody + ?Sized>(&mut self, body: &mut B) {
        if self.training_mode {
            tracing::warn!("freeze/unfreeze not supported in training");
        }
        self.frozen = false;
        body.wake_up();
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::env::hummingbird::{
        physics::{ColliderDesc, ColliderSet, KinematicWorld, Shape},
        scene::{Scene, SceneNode},
        types::Transform,
    };

    const EPS: f32 = 1e-5;

    /// Flowers on the +z axis facing -z, beak tip at the origin
    fn line_of_flowers(distances: &[f32]) -> (FlowerArea, KinematicWorld, HummingbirdAgent) {
        let facing_agent = euler_degrees(-90.0, 0.0, 0.0);
        let nodes = distances
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                SceneNode::flower(format!("f{}", i), Transform::new(Vec3::new(0.0, 0.0, d), facing_agent))
            })
            .collect();
        let scene = Scene { origin: Transform::IDENTITY, nodes, colliders: Vec::new() };

        let config = HummingbirdConfig::default();
        let mut world = KinematicWorld::new(config.body_params());
        let area = FlowerArea::from_scene(&scene, &mut world);
        world.set_body_position(-config.beak_tip_offset);
        (area, world, HummingbirdAgent::new(&config))
    }

    #[test]
    fn test_nearest_flower_picks_closest() {
        let (area, world, mut agent) = line_of_flowers(&[5.0, 3.0, 8.0]);
        assert!((agent.beak_tip(&world)).length() < EPS);

        agent.update_nearest_flower(&area, &world);
        assert_eq!(agent.nearest_flower(), Some(FlowerId(1)));

        // Deterministic on repeat
        agent.update_nearest_flower(&area, &world);
        assert_eq!(agent.nearest_flower(), Some(FlowerId(1)));
    }

    #[test]
    fn test_nearest_flower_ties_keep_first() {
        let (area, world, mut agent) = line_of_flowers(&[4.0, 4.0]);
        agent.update_nearest_flower(&area, &world);
        assert_eq!(agent.nearest_flower(), Some(FlowerId(0)));
    }

    #[test]
    fn test_nearest_flower_skips_empty() {
        let (mut area, world, mut agent) = line_of_flowers(&[5.0, 3.0, 8.0]);
        agent.update_nearest_flower(&area, &world);

        area.flower_mut(FlowerId(1)).feed(1.0);
        agent.update_nearest_flower(&area, &world);
        assert_eq!(agent.nearest_flower(), Some(FlowerId(0)));
    }

    #[test]
    fn test_nearest_flower_none_with_all_empty() {
        let (mut area, world, mut agent) = line_of_flowers(&[5.0, 3.0]);
        area.flower_mut(FlowerId(0)).feed(1.0);
        area.flower_mut(FlowerId(1)).feed(1.0);
        agent.update_nearest_flower(&area, &world);
        assert_eq!(agent.nearest_flower(), None);
        assert_eq!(agent.collect_observations(&area, &world), [0.0; OBSERVATION_SIZE]);
    }

    #[test]
    fn test_observation_layout() {
        let (area, mut world, mut agent) = line_of_flowers(&[3.0]);
        world.set_body_position(Vec3::new(0.0, 0.0, -0.05));
        agent.update_nearest_flower(&area, &world);

        let obs = agent.collect_observations(&area, &world);
        assert_eq!(obs.len(), OBSERVATION_SIZE);

        // Local position direction: straight back along -z
        assert!((obs[2] + 1.0).abs() < EPS);
        // Beak to flower points along +z
        let center = area.flower(FlowerId(0)).center_position();
        let expected = center.normalize();
        assert!((obs[3] - expected.x).abs() < EPS);
        assert!((obs[5] - expected.z).abs() < EPS);
        // Flower faces the bird and the bird faces the flower
        assert!(obs[6] > 0.99);
        assert!((obs[7] - 1.0).abs() < EPS);
        assert!((obs[8] - center.length() / AREA_DIAMETER).abs() < EPS);
        assert_eq!(obs[9], 0.0);
    }

    #[test]
    fn test_observation_zero_without_flower() {
        let (area, world, agent) = line_of_flowers(&[3.0]);
        assert_eq!(agent.collect_observations(&area, &world), [0.0; OBSERVATION_SIZE]);
    }

    #[test]
    fn test_rotation_is_rate_limited_and_clamped() {
        let config = HummingbirdConfig::default();
        let mut world = KinematicWorld::new(config.body_params());
        let mut agent = HummingbirdAgent::new(&config);

        agent.on_action_received(&[0.0, 0.0, 0.0, 1.0, 1.0], &mut world);
        // smooth change is 2 * dt = 0.04 after one tick
        let step = 0.04 * config.fixed_delta_time * config.pitch_speed;
        assert!((agent.pitch() - step).abs() < EPS);
        assert!((agent.yaw() - step).abs() < EPS);

        for _ in 0..2000 {
            agent.on_action_received(&[0.0, 0.0, 0.0, 1.0, 0.0], &mut world);
        }
        assert_eq!(agent.pitch(), MAX_PITCH_ANGLE);

        for _ in 0..2000 {
            agent.on_action_received(&[0.0, 0.0, 0.0, -1.0, 0.0], &mut world);
        }
        assert_eq!(agent.pitch(), -MAX_PITCH_ANGLE);

        let expected = euler_degrees(agent.pitch(), agent.yaw(), 0.0);
        assert!(world.body_transform().rotation.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_yaw_wraps() {
        let config = HummingbirdConfig::default();
        let mut world = KinematicWorld::new(config.body_params());
        let mut agent = HummingbirdAgent::new(&config);

        for _ in 0..500 {
            agent.on_action_received(&[0.0, 0.0, 0.0, 0.0, -1.0], &mut world);
        }
        assert!((0.0..360.0).contains(&agent.yaw()));
    }

    #[test]
    fn test_frozen_agent_ignores_actions() {
        let config = HummingbirdConfig::interactive();
        let mut world = KinematicWorld::new(config.body_params());
        let mut agent = HummingbirdAgent::new(&config);

        agent.freeze(&mut world);
        assert!(agent.is_frozen());
        assert!(world.is_sleeping());

        agent.on_action_received(&[1.0, 0.0, 0.0, 1.0, 1.0], &mut world);
        world.step(config.fixed_delta_time);
        assert_eq!(agent.pitch(), 0.0);
        assert_eq!(world.body_transform().translation, Vec3::ZERO);

        agent.unfreeze(&mut world);
        assert!(!agent.is_frozen());
        assert!(!world.is_sleeping());
    }

    #[test]
    fn test_boundary_penalty_in_training_only() {
        let config = HummingbirdConfig::default();
        let mut world = KinematicWorld::new(config.body_params());
        let wall = world.insert_collider(ColliderDesc::solid(
            Shape::Cuboid { center: Vec3::ZERO, half_extents: Vec3::ONE },
            ColliderTag::Boundary,
        ));
        let rock = world.insert_collider(ColliderDesc::solid(
            Shape::Sphere { center: Vec3::ZERO, radius: 1.0 },
            ColliderTag::Untagged,
        ));

        let mut agent = HummingbirdAgent::new(&config);
        agent.add_reward(0.25);
        agent.take_reward();

        for _ in 0..3 {
            assert_eq!(agent.on_collision_enter(wall, &world), Some(-0.5));
            assert_eq!(agent.take_reward(), -0.5);
        }
        assert_eq!(agent.on_collision_enter(rock, &world), None);
        assert_eq!(agent.take_reward(), 0.0);

        let mut player = HummingbirdAgent::new(&HummingbirdConfig::interactive());
        assert_eq!(player.on_collision_enter(wall, &world), None);
        assert_eq!(player.take_reward(), 0.0);
    }

    #[test]
    fn test_nectar_contact_requires_beak_proximity() {
        let (mut area, mut world, mut agent) = line_of_flowers(&[1.0]);
        agent.update_nearest_flower(&area, &world);
        let nectar = area.flower(FlowerId(0)).nectar_collider();

        // Beak far from the nectar
        assert_eq!(agent.on_trigger_enter_or_stay(nectar, &mut area, &world), None);
        assert_eq!(agent.nectar_obtained(), 0.0);

        // Beak inside the nectar volume
        let center = area.flower(FlowerId(0)).center_position();
        world.set_body_position(center - agent.beak_tip_offset);
        let sip = agent.on_trigger_enter_or_stay(nectar, &mut area, &world).unwrap();

        assert!((sip.nectar_taken - NECTAR_PER_SIP).abs() < EPS);
        assert!((agent.nectar_obtained() - NECTAR_PER_SIP).abs() < EPS);
        // Bird faces +z, flower up is -z: no alignment bonus
        assert!((sip.reward - NECTAR_REWARD).abs() < EPS);
        assert!((agent.take_reward() - NECTAR_REWARD).abs() < EPS);
        assert!(!sip.emptied);
    }

    #[test]
    fn test_non_nectar_trigger_is_ignored() {
        let (mut area, mut world, mut agent) = line_of_flowers(&[1.0]);
        let petal = area.flower(FlowerId(0)).flower_collider();
        world.set_body_position(area.flower(FlowerId(0)).position());
        assert_eq!(agent.on_trigger_enter_or_stay(petal, &mut area, &world), None);
    }

    #[test]
    fn test_alignment_bonus() {
        let (mut area, mut world, mut agent) = line_of_flowers(&[1.0]);
        agent.update_nearest_flower(&area, &world);
        let center = area.flower(FlowerId(0)).center_position();

        // Face the same way as the flower opening (-z)
        world.set_body_rotation(euler_degrees(0.0, 180.0, 0.0));
        let beak = world.body_transform().rotation * agent.beak_tip_offset;
        world.set_body_position(center - beak);

        let nectar = area.flower(FlowerId(0)).nectar_collider();
        let sip = agent.on_trigger_enter_or_stay(nectar, &mut area, &world).unwrap();
        assert!((sip.reward - (NECTAR_REWARD + ALIGNMENT_BONUS)).abs() < 1e-4);
    }

    #[test]
    fn test_emptying_flower_moves_target_in_training() {
        let (mut area, mut world, mut agent) = line_of_flowers(&[1.0, 2.0]);
        agent.update_nearest_flower(&area, &world);
        assert_eq!(agent.nearest_flower(), Some(FlowerId(0)));

        area.flower_mut(FlowerId(0)).feed(0.995);
        let center = area.flower(FlowerId(0)).center_position();
        world.set_body_position(center - agent.beak_tip_offset);

        let nectar = area.flower(FlowerId(0)).nectar_collider();
        let sip = agent.on_trigger_enter_or_stay(nectar, &mut area, &world).unwrap();

        assert!(sip.emptied);
        assert!(sip.nectar_taken <= 0.0051);
        assert_eq!(agent.nearest_flower(), Some(FlowerId(1)));
    }

    #[test]
    fn test_no_reward_outside_training() {
        let (mut area, mut world, _) = line_of_flowers(&[1.0]);
        let mut agent = HummingbirdAgent::new(&HummingbirdConfig::interactive());
        agent.update_nearest_flower(&area, &world);

        let center = area.flower(FlowerId(0)).center_position();
        world.set_body_position(center - agent.beak_tip_offset);
        let nectar = area.flower(FlowerId(0)).nectar_collider();
        let sip = agent.on_trigger_enter_or_stay(nectar, &mut area, &world).unwrap();

        assert_eq!(sip.reward, 0.0);
        assert_eq!(agent.take_reward(), 0.0);
        assert!(agent.nectar_obtained() > 0.0);
        assert_eq!(agent.max_step(), 0);
    }

    #[test]
    fn test_episode_begin_resets_counters() {
        let mut world = KinematicWorld::default();
        let mut area = FlowerArea::from_scene(&Scene::island(), &mut world);
        let mut agent = HummingbirdAgent::new(&HummingbirdConfig::default());
        let mut rng = StdRng::seed_from_u64(11);

        agent.add_reward(1.0);
        agent.nectar_obtained = 0.4;
        area.flower_mut(FlowerId(3)).feed(1.0);

        let placement = agent.on_episode_begin(&mut area, &mut world, &mut rng).unwrap();

        assert_eq!(agent.nectar_obtained(), 0.0);
        assert_eq!(agent.cumulative_reward(), 0.0);
        assert_eq!(agent.take_reward(), 0.0);
        assert!(area.flower(FlowerId(3)).has_nectar(), "training resets flowers");
        assert_eq!(world.body_transform().translation, placement.position);
        assert_eq!(world.velocity(), Vec3::ZERO);
        assert!(agent.nearest_flower().is_some());
    }

    #[test]
    fn test_interactive_episode_spawns_at_flower_without_reset() {
        let mut world = KinematicWorld::default();
        let mut area = FlowerArea::from_scene(&Scene::island(), &mut world);
        let mut agent = HummingbirdAgent::new(&HummingbirdConfig::interactive());
        let mut rng = StdRng::seed_from_u64(12);

        area.flower_mut(FlowerId(3)).feed(1.0);
        for _ in 0..10 {
            let placement = agent.on_episode_begin(&mut area, &mut world, &mut rng).unwrap();
            assert!(placement.flower.is_some());
        }
        assert!(!area.flower(FlowerId(3)).has_nectar(), "flowers are only reset in training");
    }
}
