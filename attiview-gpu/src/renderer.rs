//! Frame renderer: resolved draws in, one presented frame out

use crate::{
    expand_line_strip, gl_depth_to_wgpu, DrawUniform, GlobalsUniform, GpuContext, GpuTextures,
    LineVertex, SceneVertex,
};
use attiview_core::{Disk, Error, Primitive, ResolvedDraw, Result, Sphere, Tessellate};
use log::{debug, info, warn};
use std::collections::HashMap;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Frame rendering configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub background_color: [f64; 4],
    /// Direction towards the light
    pub light_direction: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            light_direction: [0.0, 0.0, 1.0],
            ambient: 0.1,
            diffuse: 0.75,
        }
    }
}

impl RenderConfig {
    fn globals(&self) -> GlobalsUniform {
        let [x, y, z] = self.light_direction;
        GlobalsUniform {
            view_proj: gl_depth_to_wgpu().into(),
            light_dir: [x, y, z, 0.0],
            lighting: [self.ambient, self.diffuse, 0.0, 0.0],
        }
    }
}

/// Cache key for a tessellated quadric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Sphere {
        radius: u32,
        slices: u32,
        stacks: u32,
    },
    Disk {
        inner: u32,
        outer: u32,
        slices: u32,
        loops: u32,
    },
}

impl From<&Sphere> for MeshKey {
    fn from(s: &Sphere) -> Self {
        MeshKey::Sphere {
            radius: s.radius.to_bits(),
            slices: s.slices,
            stacks: s.stacks,
        }
    }
}

impl From<&Disk> for MeshKey {
    fn from(d: &Disk) -> Self {
        MeshKey::Disk {
            inner: d.inner_radius.to_bits(),
            outer: d.outer_radius.to_bits(),
            slices: d.slices,
            loops: d.loops,
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// GPU resources for one draw, built before the render pass opens
enum PreparedDraw {
    Mesh {
        key: MeshKey,
        uniforms: wgpu::BindGroup,
        texture: attiview_core::TextureState,
    },
    Lines {
        vertex_buffer: wgpu::Buffer,
        vertex_count: u32,
        uniforms: wgpu::BindGroup,
    },
}

/// Renders resolved draw lists to a window surface
pub struct FrameRenderer {
    pub gpu_context: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    config: RenderConfig,
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_layout: wgpu::BindGroupLayout,
    globals_buffer: wgpu::Buffer,
    depth_view: wgpu::TextureView,
    meshes: HashMap<MeshKey, GpuMesh>,
}

impl FrameRenderer {
    /// Configure `surface` and build both pipelines
    ///
    /// `texture_layout` is the group 1 layout of the texture store the frames
    /// will be drawn with.
    pub fn new(
        gpu_context: GpuContext,
        surface: wgpu::Surface<'static>,
        size: (u32, u32),
        texture_layout: &wgpu::BindGroupLayout,
        config: RenderConfig,
    ) -> Result<Self> {
        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);
        info!(
            "surface configured {}x{} as {:?}",
            surface_config.width, surface_config.height, surface_format
        );

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let uniform_layout =
            gpu_context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("uniform_bind_group_layout"),
                    entries: &[uniform_entry(0), uniform_entry(1)],
                });

        let globals_buffer = gpu_context.create_buffer_init(
            "Globals Buffer",
            &[config.globals()],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let shader =
            gpu_context.create_shader_module("Scene Shader", include_str!("shaders/scene.wgsl"));

        let mesh_pipeline = Self::create_pipeline(
            &gpu_context.device,
            &[&uniform_layout, texture_layout],
            &shader,
            ("vs_main", "fs_main"),
            SceneVertex::desc(),
            surface_format,
            "Mesh",
        );
        let line_pipeline = Self::create_pipeline(
            &gpu_context.device,
            &[&uniform_layout],
            &shader,
            ("vs_line", "fs_line"),
            LineVertex::desc(),
            surface_format,
            "Line",
        );

        let depth_view = Self::create_depth_view(&gpu_context.device, &surface_config);

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            config,
            mesh_pipeline,
            line_pipeline,
            uniform_layout,
            globals_buffer,
            depth_view,
            meshes: HashMap::new(),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        shader: &wgpu::ShaderModule,
        (vertex_entry, fragment_entry): (&str, &str),
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        surface_format: wgpu::TextureFormat,
        label: &str,
    ) -> wgpu::RenderPipeline {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", label)),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Render Pipeline", label)),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: vertex_entry,
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: fragment_entry,
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // quadrics are lit from both sides
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }

    fn create_depth_view(
        device: &wgpu::Device,
        surface_config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width: surface_config.width,
                    height: surface_config.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Current surface size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Resize the surface; zero-sized (minimized) windows are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface
            .configure(&self.gpu_context.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.gpu_context.device, &self.surface_config);
    }

    fn ensure_mesh(&mut self, key: MeshKey, tessellate: &dyn Tessellate) -> Result<()> {
        if self.meshes.contains_key(&key) {
            return Ok(());
        }
        let mesh = tessellate.tessellate()?;
        let vertices: Vec<SceneVertex> = mesh.vertices.iter().map(SceneVertex::from).collect();
        let index_count = u32::try_from(mesh.indices.len())
            .map_err(|_| Error::Gpu("quadric index count overflows u32".to_string()))?;
        debug!(
            "cached {:?}: {} vertices, {} triangles",
            key,
            vertices.len(),
            mesh.triangle_count()
        );

        let gpu_mesh = GpuMesh {
            vertex_buffer: self.gpu_context.create_buffer_init(
                "Quadric Vertex Buffer",
                &vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: self.gpu_context.create_buffer_init(
                "Quadric Index Buffer",
                &mesh.indices,
                wgpu::BufferUsages::INDEX,
            ),
            index_count,
        };
        self.meshes.insert(key, gpu_mesh);
        Ok(())
    }

    fn create_uniforms(&self, draw: &ResolvedDraw) -> wgpu::BindGroup {
        let buffer = self
            .gpu_context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Draw Uniform Buffer"),
                contents: bytemuck::bytes_of(&DrawUniform::new(&draw.model, draw.color)),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        self.gpu_context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("draw_bind_group"),
                layout: &self.uniform_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: self.globals_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: buffer.as_entire_binding(),
                    },
                ],
            })
    }

    fn prepare(&mut self, draws: &[ResolvedDraw]) -> Result<Vec<PreparedDraw>> {
        let viewport = self.size();
        let mut prepared = Vec::with_capacity(draws.len());

        for draw in draws {
            match &draw.primitive {
                Primitive::Sphere(sphere) => {
                    let key = MeshKey::from(sphere);
                    self.ensure_mesh(key, sphere)?;
                    prepared.push(PreparedDraw::Mesh {
                        key,
                        uniforms: self.create_uniforms(draw),
                        texture: draw.texture,
                    });
                }
                Primitive::Disk(disk) => {
                    let key = MeshKey::from(disk);
                    self.ensure_mesh(key, disk)?;
                    prepared.push(PreparedDraw::Mesh {
                        key,
                        uniforms: self.create_uniforms(draw),
                        texture: draw.texture,
                    });
                }
                Primitive::LineStrip(points) => {
                    let vertices = expand_line_strip(points, &draw.model, draw.line_width, viewport);
                    if vertices.is_empty() {
                        continue;
                    }
                    prepared.push(PreparedDraw::Lines {
                        vertex_count: vertices.len() as u32,
                        vertex_buffer: self.gpu_context.create_buffer_init(
                            "Line Vertex Buffer",
                            &vertices,
                            wgpu::BufferUsages::VERTEX,
                        ),
                        uniforms: self.create_uniforms(draw),
                    });
                }
            }
        }
        Ok(prepared)
    }

    /// Clear, draw `draws` in order and present
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, draws: &[ResolvedDraw], textures: &GpuTextures) -> Result<()> {
        let prepared = self.prepare(draws)?;

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.surface
                    .configure(&self.gpu_context.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to get surface texture: {}", e))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.gpu_context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });

        {
            let [r, g, b, a] = self.config.background_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for draw in &prepared {
                match draw {
                    PreparedDraw::Mesh {
                        key,
                        uniforms,
                        texture,
                    } => {
                        let Some(mesh) = self.meshes.get(key) else {
                            continue;
                        };
                        render_pass.set_pipeline(&self.mesh_pipeline);
                        render_pass.set_bind_group(0, uniforms, &[]);
                        render_pass.set_bind_group(1, textures.bind_group(*texture), &[]);
                        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        render_pass
                            .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                    PreparedDraw::Lines {
                        vertex_buffer,
                        vertex_count,
                        uniforms,
                    } => {
                        render_pass.set_pipeline(&self.line_pipeline);
                        render_pass.set_bind_group(0, uniforms, &[]);
                        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                        render_pass.draw(0..*vertex_count, 0..1);
                    }
                }
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attiview_core::{RING, SPHERE};

    #[test]
    fn test_mesh_keys_distinguish_shapes() {
        let sphere = MeshKey::from(&SPHERE);
        assert_eq!(sphere, MeshKey::from(&SPHERE));
        assert_ne!(sphere, MeshKey::from(&RING));

        let finer = Sphere {
            slices: 72,
            ..SPHERE
        };
        assert_ne!(sphere, MeshKey::from(&finer));
    }

    #[test]
    fn test_default_lighting_is_dim_ambient_over_diffuse() {
        let globals = RenderConfig::default().globals();
        assert_eq!(globals.light_dir, [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(globals.lighting[..2], [0.1, 0.75]);
        assert_eq!(globals.view_proj[3][2], 0.5);
    }
}
