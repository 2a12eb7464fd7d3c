//! Decision backends and the episode runner
//!
//! An [`AgentBackend`] is whatever decides the hummingbird's actions: a
//! trained network, a scripted sequence, or an external trainer. It sees the
//! same stream an ML-Agents style backend would: an observation, then a
//! request for an action, then the reward that action earned.

use anyhow::{bail, Result};

use crate::env::{
    hummingbird::types::{Action, Observation, ACTION_SIZE, OBSERVATION_SIZE},
    Environment,
};

pub mod inference;

pub use inference::InferenceModel;

/// Source of actions for one agent
pub trait AgentBackend {
    /// Receive the latest observation
    fn put_observation(&mut self, observation: &Observation);

    /// Receive the reward earned by the previous action
    fn put_reward(&mut self, reward: f32);

    /// Decide the next action
    fn get_action(&mut self) -> Action;

    /// Called once when an episode ends
    fn end_episode(&mut self) {}
}

/// Backend that runs an [`InferenceModel`]
#[derive(Debug, Clone)]
pub struct PolicyBackend {
    model: InferenceModel,
    observation: Observation,
}

impl PolicyBackend {
    /// Wrap a model, checking it fits the hummingbird's observation and
    /// action sizes
    pub fn new(model: InferenceModel) -> Result<Self> {
        model.validate()?;
        if model.obs_dim != OBSERVATION_SIZE || model.action_dim != ACTION_SIZE {
            bail!(
                "policy maps {} observations to {} actions, expected {} to {}",
                model.obs_dim,
                model.action_dim,
                OBSERVATION_SIZE,
                ACTION_SIZE
            );
        }
        Ok(Self { model, observation: [0.0; OBSERVATION_SIZE] })
    }

    /// The wrapped model
    pub fn model(&self) -> &InferenceModel {
        &self.model
    }
}

impl AgentBackend for PolicyBackend {
    fn put_observation(&mut self, observation: &Observation) {
        self.observation = *observation;
    }

    fn put_reward(&mut self, _reward: f32) {}

    fn get_action(&mut self) -> Action {
        let mut action = [0.0; ACTION_SIZE];
        action.copy_from_slice(&self.model.get_action(&self.observation));
        action
    }
}

/// Backend that replays a fixed list of actions, cycling when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    actions: Vec<Action>,
    cursor: usize,
    observations: usize,
    total_reward: f32,
}

impl ScriptedBackend {
    /// Replay `actions` in order; an empty list always yields idle actions
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions, cursor: 0, observations: 0, total_reward: 0.0 }
    }

    /// Repeat a single action forever
    pub fn constant(action: Action) -> Self {
        Self::new(vec![action])
    }

    /// Observations received so far
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Sum of rewards received so far
    pub fn total_reward(&self) -> f32 {
        self.total_reward
    }
}

impl AgentBackend for ScriptedBackend {
    fn put_observation(&mut self, _observation: &Observation) {
        self.observations += 1;
    }

    fn put_reward(&mut self, reward: f32) {
        self.total_reward += reward;
    }

    fn get_action(&mut self) -> Action {
        if self.actions.is_empty() {
            return [0.0; ACTION_SIZE];
        }
        let action = self.actions[self.cursor % self.actions.len()];
        self.cursor += 1;
        action
    }
}

/// Summary of one finished episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeStats {
    /// Episode counter reported by the environment
    pub episode: usize,
    /// Steps taken
    pub steps: usize,
    /// Sum of rewards
    pub total_reward: f32,
    /// Nectar collected
    pub nectar_obtained: f32,
    /// Whether the environment's step budget ended the episode
    pub truncated: bool,
}

/// Drives an environment with a backend, one episode at a time
#[derive(Debug, Clone)]
pub struct EpisodeRunner {
    step_limit: usize,
}

impl Default for EpisodeRunner {
    fn default() -> Self {
        Self { step_limit: 5000 }
    }
}

impl EpisodeRunner {
    /// Create a runner with the default step limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap on steps per episode, for environments with unlimited episodes
    pub fn step_limit(mut self, steps: usize) -> Self {
        self.step_limit = steps;
        self
    }

    /// Run one episode from reset until the environment ends it or the step
    /// limit is hit
    pub fn run_episode<E, B>(&self, env: &mut E, backend: &mut B) -> Result<EpisodeStats>
    where
        E: Environment<Observation = Observation, Action = Action>,
        B: AgentBackend + ?Sized,
    {
        let observation = env.reset()?;
        backend.put_observation(&observation);

        let mut stats = EpisodeStats { episode: 0, steps: 0, total_reward: 0.0, nectar_obtained: 0.0, truncated: false };

        while stats.steps < self.step_limit {
            let action = backend.get_action();
            let result = env.step(action)?;

            backend.put_reward(result.reward);
            backend.put_observation(&result.observation);

            stats.steps += 1;
            stats.total_reward += result.reward;
            stats.episode = result.info.episode;
            stats.nectar_obtained = result.info.nectar_obtained;

            if result.is_done() {
                stats.truncated = result.truncated;
                break;
            }
        }
        backend.end_episode();

        tracing::info!(
            episode = stats.episode,
            steps = stats.steps,
            reward = stats.total_reward,
            nectar = stats.nectar_obtained,
            "episode finished"
        );
        Ok(stats)
    }

    /// Run several episodes back to back
    pub fn run<E, B>(&self, env: &mut E, backend: &mut B, episodes: usize) -> Result<Vec<EpisodeStats>>
    where
        E: Environment<Observation = Observation, Action = Action>,
        B: AgentBackend + ?Sized,
    {
        (0..episodes).map(|_| self.run_episode(env, backend)).collect()
    }
}
