//! Point-list pass for the background star field.

use wgpu::util::DeviceExt;

use super::pipeline_util;
use crate::animation::StarField;
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::render_context::RenderContext;

const STAR_BRIGHTNESS: f32 = 0.9;

/// Star transform and brightness, bind group 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarUniform {
    /// Field rotation and parallax tilt.
    pub model: [[f32; 4]; 4],
    /// Point color multiplier.
    pub brightness: f32,
    pub(crate) _pad: [f32; 3],
}

impl StarUniform {
    /// Uniform for the field's current frame.
    #[must_use]
    pub fn from_field(field: &StarField) -> Self {
        Self {
            model: field.model_matrix().to_cols_array_2d(),
            brightness: STAR_BRIGHTNESS,
            _pad: [0.0; 3],
        }
    }

    fn hidden() -> Self {
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            brightness: 0.0,
            _pad: [0.0; 3],
        }
    }
}

/// Draws the star field as unlit points.
pub struct StarPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    points: DynamicBuffer<[f32; 3]>,
    /// First star of the uploaded field, to detect regeneration.
    uploaded: Option<(usize, [f32; 3])>,
}

impl StarPass {
    /// Build the pipeline. Group 0 is the shared frame layout.
    #[must_use]
    pub fn new(context: &RenderContext, frame_layout: &wgpu::BindGroupLayout) -> Self {
        let device = &context.device;
        let shader =
            device.create_shader_module(wgpu::include_wgsl!("../../assets/shaders/stars.wgsl"));

        let star_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Star Layout"),
            entries: &[pipeline_util::uniform_layout_entry(0)],
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Star Uniform"),
            contents: bytemuck::bytes_of(&StarUniform::hidden()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Star Bind Group"),
            layout: &star_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Star Pipeline Layout"),
            bind_group_layouts: &[frame_layout, &star_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Star Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::surface_fragment_targets(context.format()),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let points = DynamicBuffer::with_capacity(
            device,
            "Star Points",
            1024,
            wgpu::BufferUsages::VERTEX,
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            points,
            uploaded: None,
        }
    }

    /// Upload positions when the field was regenerated and refresh the
    /// transform. `None` hides the field.
    pub fn prepare(&mut self, context: &RenderContext, field: Option<&StarField>) {
        let Some(field) = field else {
            if self.uploaded.take().is_some() {
                let _ = self.points.write(&context.device, &context.queue, &[]);
            }
            return;
        };

        let signature = (
            field.positions().len(),
            field.positions().first().map_or([0.0; 3], |p| p.to_array()),
        );
        if self.uploaded != Some(signature) {
            let points: Vec<[f32; 3]> = field.positions().iter().map(|p| p.to_array()).collect();
            let _ = self.points.write(&context.device, &context.queue, &points);
            self.uploaded = Some(signature);
            log::debug!("uploaded {} stars", points.len());
        }

        context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&StarUniform::from_field(field)),
        );
    }

    /// Record the star draw. Caller must set bind group 0.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.points.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.points.buffer().slice(..));
        render_pass.draw(0..self.points.count() as u32, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StarOptions;

    #[test]
    fn uniform_matches_shader_layout() {
        assert_eq!(size_of::<StarUniform>(), 80);
    }

    #[test]
    fn uniform_tracks_field_transform() {
        let field = StarField::new(&StarOptions {
            enabled: true,
            count: 10,
            ..StarOptions::default()
        });
        let uniform = StarUniform::from_field(&field);
        assert_eq!(uniform.model, field.model_matrix().to_cols_array_2d());
        assert!(uniform.brightness > 0.0);
    }
}
