//! GPU drawing of the showcase: lit tile bodies over a point star field.
//!
//! [`SceneRenderer`] reads everything it draws from a
//! [`ShowcaseEngine`]; it holds no scene state of its own beyond GPU
//! buffers mirroring the engine's tiles.

pub(crate) mod pipeline_util;
pub mod star_pass;
pub mod tile_pass;

use wgpu::util::DeviceExt;

use self::star_pass::StarPass;
use self::tile_pass::TilePass;
use crate::camera::core::CameraUniform;
use crate::engine::ShowcaseEngine;
use crate::gpu::render_context::RenderContext;
use crate::options::LightingOptions;

/// Directional plus ambient light, bind group 0 binding 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// Light position; it shines toward the origin.
    pub position: [f32; 3],
    /// Directional intensity.
    pub intensity: f32,
    /// Ambient intensity.
    pub ambient: f32,
    pub(crate) _pad: [f32; 3],
}

impl LightUniform {
    /// Uniform for the given lighting options.
    #[must_use]
    pub fn from_options(lighting: &LightingOptions) -> Self {
        Self {
            position: lighting.directional_position,
            intensity: lighting.directional_intensity,
            ambient: lighting.ambient,
            _pad: [0.0; 3],
        }
    }
}

/// Owns every pipeline and buffer needed to draw one frame.
pub struct SceneRenderer {
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    tiles: TilePass,
    stars: StarPass,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
    lighting: LightingOptions,
}

impl SceneRenderer {
    /// Build pipelines for the context's surface format.
    #[must_use]
    pub fn new(context: &RenderContext, lighting: &LightingOptions) -> Self {
        let device = &context.device;

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(&CameraUniform::new()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::bytes_of(&LightUniform::from_options(lighting)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Layout"),
            entries: &[
                pipeline_util::uniform_layout_entry(0),
                pipeline_util::uniform_layout_entry(1),
            ],
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        let tiles = TilePass::new(context, &frame_layout);
        let stars = StarPass::new(context, &frame_layout);
        let (_, depth_view) = pipeline_util::create_depth_texture(context);

        Self {
            camera_buffer,
            light_buffer,
            frame_bind_group,
            tiles,
            stars,
            depth_view,
            depth_size: context.size(),
            lighting: lighting.clone(),
        }
    }

    /// Recreate the depth buffer for the context's current size.
    pub fn resize(&mut self, context: &RenderContext) {
        let (_, view) = pipeline_util::create_depth_texture(context);
        self.depth_view = view;
        self.depth_size = context.size();
    }

    /// Apply new lighting options.
    pub fn set_lighting(&mut self, context: &RenderContext, lighting: &LightingOptions) {
        if *lighting == self.lighting {
            return;
        }
        self.lighting = lighting.clone();
        context.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::bytes_of(&LightUniform::from_options(lighting)),
        );
    }

    /// Draw one frame of `engine` and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain texture could be
    /// acquired. Hosts reconfigure the surface on `Lost` or `Outdated`.
    pub fn render(
        &mut self,
        context: &RenderContext,
        engine: &ShowcaseEngine,
    ) -> Result<(), wgpu::SurfaceError> {
        if self.depth_size != context.size() {
            self.resize(context);
        }
        self.set_lighting(context, &engine.options().lighting);

        context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(engine.camera_uniform()),
        );
        self.tiles.prepare(context, engine.tiles());
        self.stars.prepare(context, engine.stars());

        let frame = context.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b] = self.lighting.clear_color;

        let mut encoder = context.create_encoder();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            self.stars.draw(&mut render_pass);
            self.tiles.draw(&mut render_pass);
        }

        context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Number of tile meshes uploaded so far.
    #[must_use]
    pub fn tile_mesh_count(&self) -> usize {
        self.tiles.mesh_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_uniform_matches_shader_layout() {
        assert_eq!(size_of::<LightUniform>(), 32);
        let light = LightUniform::from_options(&LightingOptions::default());
        assert_eq!(light.position, [0.0, 10.0, 10.0]);
        assert_eq!(light.ambient, 0.5);
    }
}
