//! Hummingbird nectar-foraging environment
//!
//! A hummingbird flies around an island of flowering plants and learns to
//! drink nectar from flowers. The pieces, bottom-up:
//!
//! - [`types`]: ids, transforms, tags and the action/observation layout
//! - [`flower`]: a single flower's nectar state machine
//! - [`scene`]: serialisable scene description and the default island
//! - [`area`]: flowers and plant groups imported from a scene
//! - [`physics`]: capability traits and the built-in [`KinematicWorld`]
//! - [`spawn`]: collision-free spawn placement
//! - [`agent`]: perception, action and reward shaping
//! - [`input`]: keyboard mapping for interactive play
//! - [`environment`]: the per-tick scheduler and [`Environment`] impl
//!
//! # Example
//!
//! ```rust
//! use hummingbird_rl::env::{hummingbird::HummingbirdEnv, Environment};
//! use hummingbird_rl::env::hummingbird::HummingbirdConfig;
//!
//! let mut env = HummingbirdEnv::island(HummingbirdConfig::new().seed(7)).unwrap();
//! let observation = env.reset().unwrap();
//! assert_eq!(observation.len(), 10);
//!
//! let result = env.step([0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
//! assert!(!result.terminated);
//! ```
//!
//! [`Environment`]: crate::env::Environment

pub mod agent;
pub mod area;
pub mod config;
pub mod environment;
pub mod flower;
pub mod input;
pub mod physics;
pub mod scene;
pub mod spawn;
pub mod types;

pub use agent::{HummingbirdAgent, NectarSip};
pub use area::{FlowerArea, AREA_DIAMETER};
pub use config::HummingbirdConfig;
pub use environment::{DebugLine, HummingbirdEnv, TickOutcome};
pub use flower::Flower;
pub use input::{HumanInput, Key};
pub use physics::{AgentBody, ColliderSet, ContactEvent, KinematicWorld, PhysicsQuery, PhysicsWorld};
pub use scene::Scene;
pub use spawn::SpawnPlacement;
pub use types::{Action, ColliderId, ColliderTag, FlowerId, Observation, Transform};

/// Build a training environment on the default island
///
/// Each seed gives an independent, reproducible environment; use distinct
/// seeds for environments that run side by side.
pub fn make_hummingbird_env(seed: u64) -> anyhow::Result<HummingbirdEnv> {
    HummingbirdEnv::island(HummingbirdConfig::new().seed(seed))
}
