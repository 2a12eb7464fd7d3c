//! Environment traits and implementations
//!
//! This module defines the core environment interface and the hummingbird
//! foraging environment built on top of it.

use anyhow::Result;

/// Core trait for RL environments
pub trait Environment {
    /// Observation type
    type Observation;

    /// Action type
    type Action;

    /// Reset the environment and return initial observation
    fn reset(&mut self) -> Result<Self::Observation>;

    /// Step the environment with an action
    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>>;

    /// Get the observation space dimensions
    fn observation_space(&self) -> SpaceInfo;

    /// Get the action space dimensions
    fn action_space(&self) -> SpaceInfo;
}

/// Result of an environment step
#[derive(Debug, Clone)]
pub struct StepResult<O> {
    /// Next observation
    pub observation: O,

    /// Reward received
    pub reward: f32,

    /// Whether the episode terminated
    pub terminated: bool,

    /// Whether the episode was truncated
    pub truncated: bool,

    /// Additional info
    pub info: StepInfo,
}

impl<O> StepResult<O> {
    /// Whether the episode ended, for either reason
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Space information for observations and actions
#[derive(Debug, Clone)]
pub struct SpaceInfo {
    /// Shape of the space
    pub shape: Vec<usize>,

    /// Data type
    pub dtype: SpaceType,
}

/// Space data types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceType {
    /// Discrete space with n options
    Discrete(usize),

    /// Continuous space bounded to `[low, high]` in every dimension
    Continuous {
        /// Lower bound
        low: f32,
        /// Upper bound
        high: f32,
    },
}

/// Additional step information
#[derive(Debug, Clone, Default)]
pub struct StepInfo {
    /// Episode counter (1-based once the first episode has begun)
    pub episode: usize,

    /// Steps taken in the current episode
    pub steps: usize,

    /// Nectar collected so far this episode
    pub nectar_obtained: f32,
}

pub mod hummingbird;
pub mod pool;
