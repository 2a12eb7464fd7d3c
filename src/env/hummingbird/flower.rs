//! Single flower with a nectar supply
//!
//! A flower is either full-or-partial (both colliders enabled) or depleted
//! (both colliders disabled). It only becomes full again through
//! [`Flower::reset_flower`].

use glam::Vec3;

use super::types::{ColliderId, Color, Transform};

/// Default tint of a flower full of nectar
pub const FULL_FLOWER_COLOR: Color = Color::rgb(1.0, 0.0, 0.3);

/// Default tint of an empty flower
pub const EMPTY_FLOWER_COLOR: Color = Color::rgb(0.5, 0.0, 1.0);

/// A flower with nectar
#[derive(Debug, Clone)]
pub struct Flower {
    nectar_amount: f32,

    /// Solid collider representing the petals
    flower_collider: ColliderId,
    flower_collider_enabled: bool,

    /// Trigger collider representing the nectar
    nectar_collider: ColliderId,
    nectar_collider_enabled: bool,

    full_color: Color,
    empty_color: Color,
    tint: Color,

    /// World transform of the flower itself
    transform: Transform,
    /// Nectar collider relative to the flower
    nectar_local: Transform,
}

impl Flower {
    /// Create a flower owning the given colliders
    ///
    /// The flower starts full.
    pub fn new(
        flower_collider: ColliderId,
        nectar_collider: ColliderId,
        transform: Transform,
        nectar_local: Transform,
    ) -> Self {
        let mut flower = Self {
            nectar_amount: 0.0,
            flower_collider,
            flower_collider_enabled: false,
            nectar_collider,
            nectar_collider_enabled: false,
            full_color: FULL_FLOWER_COLOR,
            empty_color: EMPTY_FLOWER_COLOR,
            tint: EMPTY_FLOWER_COLOR,
            transform,
            nectar_local,
        };
        flower.reset_flower();
        flower
    }

    /// Override the full/empty tints
    pub fn with_colors(mut self, full: Color, empty: Color) -> Self {
        self.full_color = full;
        self.empty_color = empty;
        self.tint = if self.has_nectar() { full } else { empty };
        self
    }

    /// Remaining nectar in `[0, 1]`
    pub fn nectar_amount(&self) -> f32 {
        self.nectar_amount
    }

    /// Whether any nectar is left
    pub fn has_nectar(&self) -> bool {
        self.nectar_amount > 0.0
    }

    /// Attempt to drink `amount` of nectar
    ///
    /// Returns the requested amount clamped to what was available. The full
    /// requested amount is subtracted from the store before flooring at zero,
    /// so an over-ask empties the flower.
    pub fn feed(&mut self, amount: f32) -> f32 {
        let nectar_taken = amount.clamp(0.0, self.nectar_amount);

        self.nectar_amount -= amount;

        if self.nectar_amount <= 0.0 {
            self.nectar_amount = 0.0;

            self.flower_collider_enabled = false;
            self.nectar_collider_enabled = false;

            self.tint = self.empty_color;
        }

        nectar_taken
    }

    /// Refill the flower and re-enable its colliders
    pub fn reset_flower(&mut self) {
        self.tint = self.full_color;

        self.flower_collider_enabled = true;
        self.nectar_collider_enabled = true;

        self.nectar_amount = 1.0;
    }

    /// Solid petal collider
    pub fn flower_collider(&self) -> ColliderId {
        self.flower_collider
    }

    /// Nectar trigger collider
    pub fn nectar_collider(&self) -> ColliderId {
        self.nectar_collider
    }

    /// Whether the petal collider is active
    pub fn flower_collider_enabled(&self) -> bool {
        self.flower_collider_enabled
    }

    /// Whether the nectar trigger is active
    pub fn nectar_collider_enabled(&self) -> bool {
        self.nectar_collider_enabled
    }

    /// Current tint
    pub fn tint(&self) -> Color {
        self.tint
    }

    /// World transform of the flower
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Flower origin in world space
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// World transform of the nectar collider
    pub fn nectar_transform(&self) -> Transform {
        self.transform.mul_transform(&self.nectar_local)
    }

    /// Vector pointing straight out of the flower
    pub fn up_vector(&self) -> Vec3 {
        self.nectar_transform().up()
    }

    /// Center of the nectar collider
    pub fn center_position(&self) -> Vec3 {
        self.nectar_transform().translation
    }

    pub(crate) fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}
