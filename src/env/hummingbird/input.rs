//! Human input mapping for interactive play
//!
//! Converts held keys into the same five-element action vector a policy
//! would produce, so a person can fly the bird through the same code path.

use glam::Vec3;

use super::types::{Action, Transform};

/// Keys the heuristic listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move forward
    W,
    /// Move backward
    S,
    /// Move left
    A,
    /// Move right
    D,
    /// Move up
    J,
    /// Move down
    K,
    /// Pitch up
    Up,
    /// Pitch down
    Down,
    /// Turn left
    Left,
    /// Turn right
    Right,
}

/// Snapshot of which keys are held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HumanInput {
    held: u16,
}

impl HumanInput {
    /// No keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with the given keys held
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut input = Self::new();
        for &key in keys {
            input.press(key);
        }
        input
    }

    /// Mark a key as held
    pub fn press(&mut self, key: Key) {
        self.held |= 1 << key as u16;
    }

    /// Mark a key as released
    pub fn release(&mut self, key: Key) {
        self.held &= !(1 << key as u16);
    }

    /// Whether a key is held
    pub fn is_held(&self, key: Key) -> bool {
        self.held & (1 << key as u16) != 0
    }

    /// Map held keys to an action for a body with the given pose
    ///
    /// Movement keys are combined in the body's frame and normalised; the
    /// first key of each opposing pair wins.
    pub fn to_action(&self, transform: &Transform) -> Action {
        let mut forward = Vec3::ZERO;
        let mut left = Vec3::ZERO;
        let mut up = Vec3::ZERO;
        let mut pitch = 0.0;
        let mut yaw = 0.0;

        if self.is_held(Key::W) {
            forward = transform.forward();
        } else if self.is_held(Key::S) {
            forward = -transform.forward();
        }

        if self.is_held(Key::A) {
            left = -transform.right();
        } else if self.is_held(Key::D) {
            left = transform.right();
        }

        if self.is_held(Key::J) {
            up = transform.up();
        } else if self.is_held(Key::K) {
            up = -transform.up();
        }

        if self.is_held(Key::Up) {
            pitch = 1.0;
        } else if self.is_held(Key::Down) {
            pitch = -1.0;
        }

        if self.is_held(Key::Left) {
            yaw = -1.0;
        } else if self.is_held(Key::Right) {
            yaw = 1.0;
        }

        let combined = (forward + left + up).normalize_or_zero();

        [combined.x, combined.y, combined.z, pitch, yaw]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::hummingbird::types::euler_degrees;

    #[test]
    fn test_no_keys_is_idle() {
        let action = HumanInput::new().to_action(&Transform::IDENTITY);
        assert_eq!(action, [0.0; 5]);
    }

    #[test]
    fn test_movement_is_normalised() {
        let input = HumanInput::with_keys(&[Key::W, Key::D, Key::J]);
        let action = input.to_action(&Transform::IDENTITY);
        let length = (action[0] * action[0] + action[1] * action[1] + action[2] * action[2]).sqrt();
        assert!((length - 1.0).abs() < 1e-6);
        assert!(action[0] > 0.0 && action[1] > 0.0 && action[2] > 0.0);
    }

    #[test]
    fn test_movement_follows_body_frame() {
        let transform = Transform::new(Vec3::ZERO, euler_degrees(0.0, 90.0, 0.0));
        let action = HumanInput::with_keys(&[Key::W]).to_action(&transform);
        assert!((action[0] - 1.0).abs() < 1e-6, "forward is +x after turning right");
        assert!(action[2].abs() < 1e-6);
    }

    #[test]
    fn test_first_key_of_pair_wins() {
        let input = HumanInput::with_keys(&[Key::W, Key::S, Key::Up, Key::Down, Key::Left, Key::Right]);
        let action = input.to_action(&Transform::IDENTITY);
        assert_eq!(action[2], 1.0);
        assert_eq!(action[3], 1.0);
        assert_eq!(action[4], -1.0);
    }

    #[test]
    fn test_release() {
        let mut input = HumanInput::with_keys(&[Key::Right, Key::K]);
        input.release(Key::Right);
        assert!(!input.is_held(Key::Right));
        assert!(input.is_held(Key::K));
        let action = input.to_action(&Transform::IDENTITY);
        assert_eq!(action[4], 0.0);
        assert_eq!(action[1], -1.0);
    }
}
