use glam::Vec3;

use crate::camera::core::{Camera, CameraUniform};
use crate::options::CameraOptions;

/// Fixed camera looking down the -Z axis at the grid.
///
/// The landing page never orbits; the controller only tracks the viewport
/// aspect and the configured projection.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Current camera.
    pub camera: Camera,
    /// Uniform mirror of `camera`, refreshed by [`Self::update_uniform`].
    pub uniform: CameraUniform,
}

impl CameraController {
    /// Camera placed `options.distance` in front of the origin.
    #[must_use]
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, options.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect(width, height),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };
        let mut uniform = CameraUniform::new();
        uniform.sync(&camera);
        Self { camera, uniform }
    }

    /// Track a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = aspect(width, height);
        self.update_uniform();
    }

    /// Apply changed projection options.
    pub fn set_options(&mut self, options: &CameraOptions) {
        self.camera.eye = Vec3::new(0.0, 0.0, options.distance);
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.update_uniform();
    }

    /// Refresh the uniform from the camera.
    pub fn update_uniform(&mut self) {
        self.uniform.sync(&self.camera);
    }

    /// Upload the uniform.
    pub fn update_gpu(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_aspect_and_zero_height_is_safe() {
        let mut controller =
            CameraController::new(&CameraOptions::default(), 800, 600);
        assert!((controller.camera.aspect - 4.0 / 3.0).abs() < 1e-6);
        controller.resize(1000, 0);
        assert_eq!(controller.camera.aspect, 1000.0);
    }

    #[test]
    fn options_move_the_eye() {
        let mut controller =
            CameraController::new(&CameraOptions::default(), 800, 600);
        assert_eq!(controller.camera.eye.z, 20.0);
        let opts = CameraOptions {
            distance: 30.0,
            ..CameraOptions::default()
        };
        controller.set_options(&opts);
        assert_eq!(controller.camera.eye.z, 30.0);
        assert_eq!(controller.uniform.position[2], 30.0);
    }
}
