//! # Hummingbird RL
//!
//! A headless reinforcement-learning environment in which a hummingbird
//! learns to find flowers and drink their nectar.
//!
//! The environment runs on its own: a small built-in physics world stands in
//! for a game engine, scenes are plain JSON, and trained policies run through
//! a pure Rust MLP. The agent logic only talks to physics through traits, so
//! another engine can be plugged in behind them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hummingbird_rl::prelude::*;
//!
//! let mut env = HummingbirdEnv::island(HummingbirdConfig::new().max_step(500))?;
//! let mut backend = ScriptedBackend::constant([0.0, 0.1, 0.5, 0.0, 0.2]);
//! let stats = EpisodeRunner::new().run_episode(&mut env, &mut backend)?;
//! println!("collected {:.2} nectar", stats.nectar_obtained);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Environment traits and implementations
pub mod env;

/// Decision backends, inference and the episode runner
pub mod policy;

/// Prelude module for convenient imports
///
/// This module re-exports commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::env::{
        hummingbird::{
            make_hummingbird_env, Action, FlowerArea, FlowerId, HumanInput, HummingbirdAgent, HummingbirdConfig,
            HummingbirdEnv, Key, KinematicWorld, Observation, Scene,
        },
        pool::EnvPool,
        Environment, StepResult,
    };
    pub use crate::policy::{AgentBackend, EpisodeRunner, EpisodeStats, InferenceModel, PolicyBackend, ScriptedBackend};
}

/// Current version of hummingbird-rl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
