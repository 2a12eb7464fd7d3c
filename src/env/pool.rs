//! Vectorized environment pool for parallel execution
//!
//! Runs many independent environments side by side on Rayon's thread pool,
//! the way several flower areas are trained in one scene. Each environment
//! owns its own area, physics world and RNG, so there is nothing to lock.
//!
//! # Example
//!
//! ```rust
//! use hummingbird_rl::env::{hummingbird::make_hummingbird_env, pool::EnvPool};
//!
//! // Four islands with distinct seeds
//! let mut pool = EnvPool::from_indexed(|i| make_hummingbird_env(i as u64).unwrap(), 4);
//!
//! let observations = pool.reset().unwrap();
//! assert_eq!(observations.len(), 4);
//!
//! let actions = vec![[0.0, 0.0, 1.0, 0.0, 0.0]; 4];
//! let results = pool.step(&actions).unwrap();
//! assert_eq!(results.len(), 4);
//! ```

use anyhow::Result;
use rayon::prelude::*;

use crate::env::{Environment, SpaceInfo, StepResult};

/// A pool of environments for parallel execution
///
/// For N environments with average step time T, a sequential loop costs
/// O(N * T) while the pool costs roughly O(T) when N ≤ num_cores.
pub struct EnvPool<E: Environment> {
    /// Vector of environment instances
    envs: Vec<E>,

    /// Number of environments
    num_envs: usize,
}

impl<E> EnvPool<E>
where
    E: Environment + Send,
    E::Observation: Send,
    E::Action: Clone + Sync,
{
    /// Create a new environment pool
    ///
    /// # Arguments
    ///
    /// * `env_fn` - Factory function to create environment instances
    /// * `num_envs` - Number of parallel environments
    pub fn new<F>(env_fn: F, num_envs: usize) -> Self
    where
        F: Fn() -> E,
    {
        Self::from_indexed(|_| env_fn(), num_envs)
    }

    /// Create a pool whose factory receives the environment index
    ///
    /// Use the index to give every environment its own seed.
    pub fn from_indexed<F>(env_fn: F, num_envs: usize) -> Self
    where
        F: Fn(usize) -> E,
    {
        Self::from_envs((0..num_envs).map(env_fn).collect())
    }

    /// Create a pool from already built environments
    pub fn from_envs(envs: Vec<E>) -> Self {
        let num_envs = envs.len();
        Self { envs, num_envs }
    }

    /// Reset all environments in parallel
    ///
    /// Returns one initial observation per environment.
    pub fn reset(&mut self) -> Result<Vec<E::Observation>> {
        self.envs.par_iter_mut().map(|env| env.reset()).collect()
    }

    /// Step all environments in parallel with given actions
    ///
    /// # Panics
    ///
    /// Panics if the number of actions doesn't match the number of
    /// environments.
    pub fn step(&mut self, actions: &[E::Action]) -> Result<Vec<StepResult<E::Observation>>> {
        assert_eq!(
            actions.len(),
            self.num_envs,
            "Number of actions must match number of environments"
        );

        self.envs
            .par_iter_mut()
            .zip(actions.par_iter())
            .map(|(env, action)| env.step(action.clone()))
            .collect()
    }

    /// Get the number of environments in the pool
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Environments in the pool
    pub fn envs(&self) -> &[E] {
        &self.envs
    }

    /// Get observation space information from first environment
    pub fn observation_space(&self) -> SpaceInfo {
        self.envs[0].observation_space()
    }

    /// Get action space information from first environment
    pub fn action_space(&self) -> SpaceInfo {
        self.envs[0].action_space()
    }

    /// Reset a specific environment by index
    pub fn reset_env(&mut self, env_id: usize) -> Result<E::Observation> {
        self.envs[env_id].reset()
    }
}

/// Result of stepping an environment pool
///
/// Contains observations, rewards, and done flags for all environments.
#[derive(Debug, Clone)]
pub struct PoolStepResult<O> {
    /// Observations for each environment
    pub observations: Vec<O>,

    /// Rewards for each environment
    pub rewards: Vec<f32>,

    /// Termination flags for each environment
    pub terminated: Vec<bool>,

    /// Truncation flags for each environment
    pub truncated: Vec<bool>,
}

impl<E> EnvPool<E>
where
    E: Environment + Send,
    E::Observation: Send,
    E::Action: Clone + Sync,
{
    /// Step all environments and return structured result
    ///
    /// Environments whose episode ended are reset straight away; their
    /// entry in `observations` is the first observation of the new episode
    /// while the done flags still describe the episode that ended.
    pub fn step_structured(&mut self, actions: &[E::Action]) -> Result<PoolStepResult<E::Observation>> {
        let results = self.step(actions)?;

        let mut observations = Vec::with_capacity(self.num_envs);
        let mut rewards = Vec::with_capacity(self.num_envs);
        let mut terminated = Vec::with_capacity(self.num_envs);
        let mut truncated = Vec::with_capacity(self.num_envs);

        for (env_id, result) in results.into_iter().enumerate() {
            let observation = if result.is_done() { self.reset_env(env_id)? } else { result.observation };
            observations.push(observation);
            rewards.push(result.reward);
            terminated.push(result.terminated);
            truncated.push(result.truncated);
        }

        Ok(PoolStepResult { observations, rewards, terminated, truncated })
    }
}
