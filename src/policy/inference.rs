//! Inference-only policy model
//!
//! A pure Rust MLP that maps an observation to a continuous action. Weights
//! come from an external trainer as JSON, so running a trained hummingbird
//! needs no ML runtime.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A serializable MLP policy for continuous actions
///
/// Two shared ReLU layers feed a policy head, squashed with `tanh` into
/// `[-1, 1]`, and a scalar value head. Weight matrices are stored row-major
/// as `[out_dim][in_dim]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceModel {
    /// Input dimension
    pub obs_dim: usize,
    /// Output dimension (action vector length)
    pub action_dim: usize,
    /// Hidden layer dimension
    pub hidden_dim: usize,

    /// Shared layer 1: weights [hidden_dim, obs_dim]
    pub shared_fc1_weight: Vec<Vec<f32>>,
    /// Shared layer 1: bias [hidden_dim]
    pub shared_fc1_bias: Vec<f32>,

    /// Shared layer 2: weights [hidden_dim, hidden_dim]
    pub shared_fc2_weight: Vec<Vec<f32>>,
    /// Shared layer 2: bias [hidden_dim]
    pub shared_fc2_bias: Vec<f32>,

    /// Policy head: weights [action_dim, hidden_dim]
    pub policy_weight: Vec<Vec<f32>>,
    /// Policy head: bias [action_dim]
    pub policy_bias: Vec<f32>,

    /// Value head: weights [1, hidden_dim]
    pub value_weight: Vec<Vec<f32>>,
    /// Value head: bias [1]
    pub value_bias: Vec<f32>,
}

impl InferenceModel {
    /// Model with every weight and bias set to zero
    pub fn zeros(obs_dim: usize, action_dim: usize, hidden_dim: usize) -> Self {
        Self {
            obs_dim,
            action_dim,
            hidden_dim,
            shared_fc1_weight: vec![vec![0.0; obs_dim]; hidden_dim],
            shared_fc1_bias: vec![0.0; hidden_dim],
            shared_fc2_weight: vec![vec![0.0; hidden_dim]; hidden_dim],
            shared_fc2_bias: vec![0.0; hidden_dim],
            policy_weight: vec![vec![0.0; hidden_dim]; action_dim],
            policy_bias: vec![0.0; action_dim],
            value_weight: vec![vec![0.0; hidden_dim]],
            value_bias: vec![0.0],
        }
    }

    /// Model with uniform random weights scaled by fan-in and zero biases
    pub fn random<R: Rng>(obs_dim: usize, action_dim: usize, hidden_dim: usize, rng: &mut R) -> Self {
        let mut model = Self::zeros(obs_dim, action_dim, hidden_dim);
        for layer in [
            &mut model.shared_fc1_weight,
            &mut model.shared_fc2_weight,
            &mut model.policy_weight,
            &mut model.value_weight,
        ] {
            for row in layer.iter_mut() {
                let bound = 1.0 / (row.len().max(1) as f32).sqrt();
                for w in row.iter_mut() {
                    *w = rng.gen_range(-bound..=bound);
                }
            }
        }
        model
    }

    /// Check that every matrix and bias matches the declared dimensions
    pub fn validate(&self) -> Result<()> {
        check_layer("shared_fc1", &self.shared_fc1_weight, &self.shared_fc1_bias, self.hidden_dim, self.obs_dim)?;
        check_layer("shared_fc2", &self.shared_fc2_weight, &self.shared_fc2_bias, self.hidden_dim, self.hidden_dim)?;
        check_layer("policy", &self.policy_weight, &self.policy_bias, self.action_dim, self.hidden_dim)?;
        check_layer("value", &self.value_weight, &self.value_bias, 1, self.hidden_dim)?;
        Ok(())
    }

    /// Save model to JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load model from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read policy {}", path.display()))?;
        let model: Self = serde_json::from_str(&json).context("invalid policy model")?;
        model.validate()?;
        Ok(model)
    }

    /// Forward pass: compute the action mean and value
    ///
    /// # Arguments
    /// * `obs` - Observation vector [obs_dim]
    ///
    /// # Returns
    /// * `(mean, value)` - Pre-squash action mean [action_dim] and state value
    pub fn forward(&self, obs: &[f32]) -> (Vec<f32>, f32) {
        assert_eq!(obs.len(), self.obs_dim, "Observation dimension mismatch");

        let hidden1 = relu(dense(&self.shared_fc1_weight, &self.shared_fc1_bias, obs));
        let hidden2 = relu(dense(&self.shared_fc2_weight, &self.shared_fc2_bias, &hidden1));

        let mean = dense(&self.policy_weight, &self.policy_bias, &hidden2);
        let value = dense(&self.value_weight, &self.value_bias, &hidden2)[0];

        (mean, value)
    }

    /// Deterministic action in `[-1, 1]` for an observation
    pub fn get_action(&self, obs: &[f32]) -> Vec<f32> {
        let (mean, _value) = self.forward(obs);
        mean.into_iter().map(f32::tanh).collect()
    }
}

fn dense(weight: &[Vec<f32>], bias: &[f32], input: &[f32]) -> Vec<f32> {
    weight
        .iter()
        .zip(bias)
        .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b)
        .collect()
}

fn relu(mut values: Vec<f32>) -> Vec<f32> {
    for v in values.iter_mut() {
        *v = v.max(0.0);
    }
    values
}

fn check_layer(name: &str, weight: &[Vec<f32>], bias: &[f32], out_dim: usize, in_dim: usize) -> Result<()> {
    if weight.len() != out_dim || bias.len() != out_dim {
        bail!(
            "{} layer has {} rows and {} biases, expected {}",
            name,
            weight.len(),
            bias.len(),
            out_dim
        );
    }
    if let Some(row) = weight.iter().find(|row| row.len() != in_dim) {
        bail!("{} layer row has {} inputs, expected {}", name, row.len(), in_dim);
    }
    Ok(())
}
