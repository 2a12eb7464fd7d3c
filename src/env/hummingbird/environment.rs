//! Hummingbird environment scheduler
//!
//! [`HummingbirdEnv`] owns one flower area, its physics world, the agent and
//! an RNG, and drives them in the order a game engine would:
//! `on_episode_begin`, then `on_physics_tick` once per fixed step, with
//! `on_frame` available for visual debugging in between.

use anyhow::Result;
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};

use super::{
    agent::{HummingbirdAgent, NectarSip},
    area::FlowerArea,
    config::HummingbirdConfig,
    input::HumanInput,
    physics::{ContactEvent, KinematicWorld},
    scene::Scene,
    spawn::SpawnPlacement,
    types::{Action, Color, Observation, ACTION_SIZE, OBSERVATION_SIZE},
};
use crate::env::{Environment, SpaceInfo, SpaceType, StepInfo, StepResult};

/// Everything that happened during one physics tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// Observation after the tick
    pub observation: Observation,
    /// Reward accumulated during the tick
    pub reward: f32,
    /// Contacts reported by the physics step
    pub events: Vec<ContactEvent>,
    /// Nectar contacts that fed the agent
    pub sips: Vec<NectarSip>,
    /// Whether the step budget ran out
    pub truncated: bool,
}

/// Line to draw for visual debugging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    /// Start point
    pub start: Vec3,
    /// End point
    pub end: Vec3,
    /// Line color
    pub color: Color,
}

/// Color of the beak-to-flower debug line
pub const DEBUG_LINE_COLOR: Color = Color::rgb(0.0, 1.0, 0.0);

/// One hummingbird in one flower area
#[derive(Debug, Clone)]
pub struct HummingbirdEnv {
    config: HummingbirdConfig,
    area: FlowerArea,
    world: KinematicWorld,
    agent: HummingbirdAgent,
    rng: StdRng,
    episode: usize,
    steps: usize,
}

impl HummingbirdEnv {
    /// Build an environment from a scene
    pub fn new(config: HummingbirdConfig, scene: &Scene) -> Result<Self> {
        config.validate()?;

        let mut world = KinematicWorld::new(config.body_params());
        let area = FlowerArea::from_scene_with_colors(
            scene,
            &mut world,
            config.full_flower_color,
            config.empty_flower_color,
        );
        let agent = HummingbirdAgent::new(&config);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { config, area, world, agent, rng, episode: 0, steps: 0 })
    }

    /// Build an environment on the default island
    pub fn island(config: HummingbirdConfig) -> Result<Self> {
        Self::new(config, &Scene::island())
    }

    /// Configuration in force
    pub fn config(&self) -> &HummingbirdConfig {
        &self.config
    }

    /// The flower area
    pub fn area(&self) -> &FlowerArea {
        &self.area
    }

    /// The physics world
    pub fn world(&self) -> &KinematicWorld {
        &self.world
    }

    /// The agent
    pub fn agent(&self) -> &HummingbirdAgent {
        &self.agent
    }

    /// Episodes begun so far
    pub fn episode(&self) -> usize {
        self.episode
    }

    /// Ticks in the current episode
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Start a new episode
    pub fn on_episode_begin(&mut self) -> Result<SpawnPlacement> {
        self.episode += 1;
        self.steps = 0;
        self.agent.on_episode_begin(&mut self.area, &mut self.world, &mut self.rng)
    }

    /// Advance one fixed physics step with the given action
    ///
    /// The action is applied, the world is stepped, contacts are dispatched
    /// to the agent, and emptied flowers are synced back to the world.
    pub fn on_physics_tick(&mut self, action: &Action) -> TickOutcome {
        self.agent.on_action_received(action, &mut self.world);

        let events = self.world.step(self.config.fixed_delta_time);
        let mut sips = Vec::new();

        for &event in &events {
            match event {
                ContactEvent::TriggerEnter(collider) | ContactEvent::TriggerStay(collider) => {
                    if let Some(sip) = self.agent.on_trigger_enter_or_stay(collider, &mut self.area, &self.world) {
                        sips.push(sip);
                    }
                }
                ContactEvent::CollisionEnter(collider) => {
                    self.agent.on_collision_enter(collider, &self.world);
                }
            }
        }

        if sips.iter().any(|sip| sip.emptied) {
            self.area.sync_physics(&mut self.world);
        }

        self.steps += 1;
        let max_step = self.agent.max_step();
        let truncated = max_step > 0 && self.steps >= max_step;

        if truncated {
            tracing::debug!(
                episode = self.episode,
                steps = self.steps,
                nectar = self.agent.nectar_obtained(),
                reward = self.agent.cumulative_reward(),
                "episode step budget reached"
            );
        }

        TickOutcome {
            observation: self.observe(),
            reward: self.agent.take_reward(),
            events,
            sips,
            truncated,
        }
    }

    /// Per-frame debug output: a line from the beak tip to the nearest flower
    pub fn on_frame(&self) -> Option<DebugLine> {
        let nearest = self.agent.nearest_flower()?;
        Some(DebugLine {
            start: self.agent.beak_tip(&self.world),
            end: self.area.flower(nearest).center_position(),
            color: DEBUG_LINE_COLOR,
        })
    }

    /// Current observation
    pub fn observe(&self) -> Observation {
        self.agent.collect_observations(&self.area, &self.world)
    }

    /// Action a human would produce with the given keys held
    pub fn heuristic(&self, input: &HumanInput) -> Action {
        self.agent.heuristic(input, &self.world)
    }

    /// Put the agent at a pose, in degrees
    pub fn place_agent(&mut self, position: Vec3, pitch: f32, yaw: f32) {
        self.agent.teleport(position, pitch, yaw, &mut self.world);
        self.agent.update_nearest_flower(&self.area, &self.world);
    }

    /// Stop the agent from acting
    pub fn freeze(&mut self) {
        self.agent.freeze(&mut self.world);
    }

    /// Let the agent act again
    pub fn unfreeze(&mut self) {
        self.agent.unfreeze(&mut self.world);
    }

    fn step_info(&self) -> StepInfo {
        StepInfo { episode: self.episode, steps: self.steps, nectar_obtained: self.agent.nectar_obtained() }
    }
}

impl Environment for HummingbirdEnv {
    type Observation = Observation;
    type Action = Action;

    fn reset(&mut self) -> Result<Observation> {
        self.on_episode_begin()?;
        Ok(self.observe())
    }

    /// Actions are clipped to `[-1, 1]` before they are applied
    fn step(&mut self, action: Action) -> Result<StepResult<Observation>> {
        let action = action.map(|a| a.clamp(-1.0, 1.0));
        let outcome = self.on_physics_tick(&action);

        Ok(StepResult {
            observation: outcome.observation,
            reward: outcome.reward,
            terminated: false,
            truncated: outcome.truncated,
            info: self.step_info(),
        })
    }

    fn observation_space(&self) -> SpaceInfo {
        SpaceInfo { shape: vec![OBSERVATION_SIZE], dtype: SpaceType::Continuous { low: -1.0, high: 1.0 } }
    }

    fn action_space(&self) -> SpaceInfo {
        SpaceInfo { shape: vec![ACTION_SIZE], dtype: SpaceType::Continuous { low: -1.0, high: 1.0 } }
    }
}
