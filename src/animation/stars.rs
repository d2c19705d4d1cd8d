//! Ambient star field with pointer parallax.

use std::f32::consts::TAU;

use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::options::StarOptions;

/// Seeded point cloud in a spherical shell around the scene.
///
/// The field turns slowly about the vertical axis and tilts toward a
/// parallax target derived from the pointer position.
#[derive(Debug, Clone)]
pub struct StarField {
    positions: Vec<Vec3>,
    rotation: f32,
    offset: Vec2,
    options: StarOptions,
}

impl StarField {
    /// Generate the field described by `options`. The same seed always
    /// yields the same stars.
    #[must_use]
    pub fn new(options: &StarOptions) -> Self {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let inner = options.inner_radius.min(options.outer_radius);
        let outer = options.inner_radius.max(options.outer_radius);
        let positions = (0..options.count)
            .map(|_| {
                let z: f32 = rng.random_range(-1.0..=1.0);
                let phi: f32 = rng.random_range(0.0..TAU);
                let ring = (1.0 - z * z).max(0.0).sqrt();
                let radius = inner + (outer - inner) * rng.random::<f32>();
                Vec3::new(ring * phi.cos(), ring * phi.sin(), z) * radius
            })
            .collect();
        log::debug!("star field: {} stars", options.count);
        Self {
            positions,
            rotation: 0.0,
            offset: Vec2::ZERO,
            options: options.clone(),
        }
    }

    /// Star positions in the field's local frame.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Accumulated rotation about the vertical axis, radians.
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Current smoothed parallax offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Parallax target for a pointer at `pointer_ndc`.
    #[must_use]
    pub fn parallax_target(&self, pointer_ndc: Vec2) -> Vec2 {
        (Vec2::ONE - pointer_ndc) * self.options.parallax_factor
    }

    /// Advance one frame: rotate by `rotation_speed * dt` and move the
    /// offset a `smoothing` fraction of the way to the parallax target.
    pub fn update(&mut self, dt: f32, pointer_ndc: Vec2) {
        self.rotation += self.options.rotation_speed * dt;
        let target = self.parallax_target(pointer_ndc);
        self.offset += (target - self.offset) * self.options.smoothing;
    }

    /// World transform: spin about Y, then tilt by the parallax offset
    /// (radians about Y and X).
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.offset.y)
            * Mat4::from_rotation_y(self.rotation + self.offset.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> StarOptions {
        StarOptions {
            enabled: true,
            count: 200,
            ..StarOptions::default()
        }
    }

    #[test]
    fn stars_lie_in_the_shell_and_are_reproducible() {
        let opts = options();
        let a = StarField::new(&opts);
        let b = StarField::new(&opts);
        assert_eq!(a.positions().len(), 200);
        assert_eq!(a.positions(), b.positions());
        for p in a.positions() {
            let r = p.length();
            assert!(r >= opts.inner_radius - 1e-2 && r <= opts.outer_radius + 1e-2);
        }
    }

    #[test]
    fn rotation_is_continuous() {
        let mut field = StarField::new(&options());
        for _ in 0..60 {
            field.update(1.0 / 60.0, Vec2::ZERO);
        }
        assert!((field.rotation() - 0.02).abs() < 1e-5);
    }

    #[test]
    fn offset_converges_on_parallax_target() {
        let mut field = StarField::new(&options());
        let pointer = Vec2::new(0.5, -0.5);
        let target = field.parallax_target(pointer);
        assert!((target - Vec2::new(0.25, 0.75)).length() < 1e-6);

        field.update(0.0, pointer);
        assert!((field.offset() - target * 0.05).length() < 1e-6);
        for _ in 0..500 {
            field.update(0.0, pointer);
        }
        assert!((field.offset() - target).length() < 1e-3);
    }
}
