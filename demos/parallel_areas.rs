//! Step many flower areas in parallel
//!
//! Builds a pool of islands with distinct seeds and drives them with a fixed
//! action pattern, reporting throughput and rewards.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --example parallel_areas -- 16
//! ```

use std::time::Instant;

use anyhow::Result;
use hummingbird_rl::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let num_envs: usize = std::env::args().nth(1).and_then(|a| a.parse().ok()).unwrap_or(8);
    let num_steps = 2000;

    let envs = (0..num_envs)
        .map(|i| HummingbirdEnv::island(HummingbirdConfig::new().max_step(500).seed(i as u64)))
        .collect::<Result<Vec<_>>>()?;
    let mut pool = EnvPool::from_envs(envs);

    pool.reset()?;
    let start = Instant::now();
    let mut total_reward = 0.0;
    let mut episodes = 0;

    for step in 0..num_steps {
        let t = step as f32 * 0.05;
        let actions: Vec<Action> = (0..num_envs)
            .map(|i| {
                let phase = t + i as f32;
                [phase.sin() * 0.5, phase.cos() * 0.2, 0.6, (phase * 0.3).sin(), 0.4]
            })
            .collect();

        let result = pool.step_structured(&actions)?;
        total_reward += result.rewards.iter().sum::<f32>();
        episodes += result.truncated.iter().filter(|&&t| t).count();
    }

    let elapsed = start.elapsed().as_secs_f64();
    tracing::info!(
        "{} areas, {} steps each: {:.0} steps/s, {} episodes, mean reward per area {:.3}",
        num_envs,
        num_steps,
        (num_envs * num_steps) as f64 / elapsed,
        episodes,
        total_reward / num_envs as f32
    );
    Ok(())
}
