//! Fly the hummingbird with a scripted key sequence
//!
//! Plays in interactive mode: the bird spawns in front of a flower, holds W
//! and the arrow keys for a while, and the beak-to-flower debug line is
//! printed every few frames.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example fly_heuristic
//! cargo run --example fly_heuristic -- scene.json
//! ```

use anyhow::Result;
use hummingbird_rl::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let config = HummingbirdConfig::interactive().seed(7);
    let mut env = match std::env::args().nth(1) {
        Some(path) => HummingbirdEnv::new(config, &Scene::load_json(path)?)?,
        None => HummingbirdEnv::island(config)?,
    };

    let placement = env.on_episode_begin()?;
    tracing::info!(position = ?placement.position, "spawned in front of a flower");

    let script: [(&[Key], usize); 4] = [
        (&[Key::W], 10),
        (&[Key::W, Key::Up], 15),
        (&[Key::Left, Key::J], 15),
        (&[], 10),
    ];

    let mut frame = 0;
    for (keys, ticks) in script {
        let input = HumanInput::with_keys(keys);
        for _ in 0..ticks {
            let action = env.heuristic(&input);
            let outcome = env.on_physics_tick(&action);
            for sip in &outcome.sips {
                tracing::info!(flower = sip.flower.0, nectar = sip.nectar_taken, "sip");
            }

            if frame % 10 == 0 {
                if let Some(line) = env.on_frame() {
                    tracing::info!(
                        from = ?line.start,
                        to = ?line.end,
                        distance = line.start.distance(line.end),
                        "beak to nearest flower"
                    );
                }
            }
            frame += 1;
        }
    }

    tracing::info!(
        nectar = env.agent().nectar_obtained(),
        pitch = env.agent().pitch(),
        yaw = env.agent().yaw(),
        "done"
    );
    Ok(())
}
