//! Run a policy exported as JSON
//!
//! Loads an MLP with 10 inputs and 5 outputs and runs a few training-mode
//! episodes with it. Without a model path a randomly initialised policy is
//! used and saved next to the working directory so the format can be
//! inspected.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example run_policy -- hummingbird_policy.json
//! cargo run --example run_policy -- hummingbird_policy.json --config config.json
//! ```

use anyhow::Result;
use hummingbird_rl::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let args: Vec<String> = std::env::args().collect();

    let config = match args.iter().position(|a| a == "--config") {
        Some(i) if i + 1 < args.len() => HummingbirdConfig::load_json(&args[i + 1])?,
        _ => HummingbirdConfig::new().max_step(1000),
    };

    let model = match args.get(1).filter(|a| !a.starts_with("--")) {
        Some(path) => {
            tracing::info!("Loading policy from {}", path);
            InferenceModel::load_json(path)?
        }
        None => {
            let mut rng = StdRng::seed_from_u64(0);
            let model = InferenceModel::random(10, 5, 64, &mut rng);
            model.save_json("random_policy.json")?;
            tracing::info!("No policy given; saved a random one to random_policy.json");
            model
        }
    };

    let mut backend = PolicyBackend::new(model)?;
    let mut env = HummingbirdEnv::island(config)?;

    let stats = EpisodeRunner::new().run(&mut env, &mut backend, 5)?;

    let mean_nectar = stats.iter().map(|s| s.nectar_obtained).sum::<f32>() / stats.len() as f32;
    let mean_reward = stats.iter().map(|s| s.total_reward).sum::<f32>() / stats.len() as f32;
    tracing::info!("Mean nectar: {:.3}, mean reward: {:.3}", mean_nectar, mean_reward);
    Ok(())
}
