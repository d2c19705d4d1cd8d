//! Instanced draw pass for tile bodies.
//!
//! Each tile's mesh is uploaded once, when it first appears. Per-tile
//! instance data (model matrix, color, hover highlight) is rewritten every
//! frame from the tiles' display transforms.

use rustc_hash::{FxHashMap, FxHashSet};
use wgpu::util::DeviceExt;

use super::pipeline_util;
use crate::assets::MeshVertex;
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::render_context::RenderContext;
use crate::scene::{NodeId, Tile, TileId};

/// Per-tile instance data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileInstance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Base color.
    pub color: [f32; 3],
    /// 1.0 while hovered, else 0.0.
    pub highlight: f32,
}

impl TileInstance {
    /// Instance data for a tile's current frame.
    #[must_use]
    pub fn from_tile(tile: &Tile) -> Self {
        Self {
            model: tile.model_matrix().to_cols_array_2d(),
            color: tile.color,
            highlight: if tile.is_hovered { 1.0 } else { 0.0 },
        }
    }
}

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    }
}

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x3,
        7 => Float32,
    ];
    wgpu::VertexBufferLayout {
        array_stride: size_of::<TileInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRIBUTES,
    }
}

struct TileMesh {
    /// Body node the buffers were built from; a rejoined tile has a new one.
    body: NodeId,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

/// Draws every tile in the scene.
pub struct TilePass {
    pipeline: wgpu::RenderPipeline,
    meshes: FxHashMap<TileId, TileMesh>,
    instances: DynamicBuffer<TileInstance>,
    order: Vec<TileId>,
}

impl TilePass {
    /// Build the pipeline. `frame_layout` is bind group 0 (camera and
    /// light).
    #[must_use]
    pub fn new(context: &RenderContext, frame_layout: &wgpu::BindGroupLayout) -> Self {
        let shader = context
            .device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/tile.wgsl"));

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Tile Pipeline Layout"),
                    bind_group_layouts: &[frame_layout],
                    push_constant_ranges: &[],
                });

        let pipeline =
            context
                .device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("Tile Pipeline"),
                    layout: Some(&pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_main"),
                        buffers: &[vertex_layout(), instance_layout()],
                        compilation_options: Default::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: Some("fs_main"),
                        targets: &pipeline_util::surface_fragment_targets(
                            context.format(),
                        ),
                        compilation_options: Default::default(),
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        cull_mode: Some(wgpu::Face::Back),
                        ..Default::default()
                    },
                    depth_stencil: Some(pipeline_util::depth_stencil_state()),
                    multisample: wgpu::MultisampleState::default(),
                    multiview: None,
                    cache: None,
                });

        let instances = DynamicBuffer::with_capacity(
            &context.device,
            "Tile Instances",
            16,
            wgpu::BufferUsages::VERTEX,
        );

        Self {
            pipeline,
            meshes: FxHashMap::default(),
            instances,
            order: Vec::new(),
        }
    }

    /// Upload meshes for newly joined or replaced tiles, release meshes of
    /// tiles that are gone, and rewrite instance data.
    pub fn prepare(&mut self, context: &RenderContext, tiles: &[Tile]) {
        let present: FxHashSet<TileId> = tiles.iter().map(|t| t.id).collect();
        self.meshes.retain(|id, _| present.contains(id));

        for tile in tiles {
            if self.meshes.get(&tile.id).is_some_and(|m| m.body == tile.body_node()) {
                continue;
            }
            let mesh = tile.mesh();
            let label = format!("Tile {} Mesh", tile.id.0);
            let vertices =
                context
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&label),
                        contents: bytemuck::cast_slice(&mesh.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
            let indices =
                context
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&label),
                        contents: bytemuck::cast_slice(&mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    });
            let _ = self.meshes.insert(
                tile.id,
                TileMesh {
                    body: tile.body_node(),
                    vertices,
                    indices,
                    index_count: mesh.indices.len() as u32,
                },
            );
        }

        let instances: Vec<TileInstance> = tiles.iter().map(TileInstance::from_tile).collect();
        let _ = self
            .instances
            .write(&context.device, &context.queue, &instances);
        self.order = tiles.iter().map(|t| t.id).collect();
    }

    /// Record draws for every prepared tile.
    ///
    /// Caller must set bind group 0 before calling this.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.instances.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        for (i, id) in self.order.iter().enumerate() {
            let Some(mesh) = self.meshes.get(id) else {
                continue;
            };
            let instance = i as u32;
            render_pass.set_vertex_buffer(0, mesh.vertices.slice(..));
            render_pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.index_count, 0, instance..instance + 1);
        }
    }

    /// Number of tile meshes resident on the GPU.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::assets::primitive::box_asset;
    use crate::scene::{NodeId, Project};

    #[test]
    fn instance_layout_matches_struct() {
        assert_eq!(size_of::<TileInstance>(), 80);
        assert_eq!(size_of::<MeshVertex>(), 24);
    }

    #[test]
    fn instance_carries_transform_and_highlight() {
        let project = Project::new("T", "#", 0x00_ff00);
        let mut tile =
            Tile::new(TileId(0), &project, box_asset(3.0), NodeId(0), NodeId(1), 2.2);
        tile.display_position = Vec3::new(1.0, 2.0, 3.0);
        tile.is_hovered = true;
        let inst = TileInstance::from_tile(&tile);
        assert_eq!(inst.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(inst.color, [0.0, 1.0, 0.0]);
        assert_eq!(inst.highlight, 1.0);
    }
}
