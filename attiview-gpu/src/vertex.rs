//! Vertex and uniform layouts shared with `shaders/scene.wgsl`

use attiview_core::{QuadricVertex, Transform3D};
use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;

/// Vertex of a tessellated quadric
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl SceneVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // UV
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

impl From<&QuadricVertex> for SceneVertex {
    fn from(vertex: &QuadricVertex) -> Self {
        Self {
            position: vertex.position.coords.into(),
            normal: vertex.normal.into(),
            uv: vertex.uv,
        }
    }
}

/// Corner of a line quad, already in view space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

impl LineVertex {
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Per-frame constants, group 0 binding 0
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlobalsUniform {
    pub view_proj: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
    pub lighting: [f32; 4],
}

/// Per-draw parameters, group 0 binding 1
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl DrawUniform {
    pub fn new(model: &Transform3D, color: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array(),
            color: [color[0], color[1], color[2], 1.0],
        }
    }
}

/// Maps OpenGL clip depth [-1, 1] onto wgpu's [0, 1]
///
/// With an otherwise identity projection, model-space Z becomes depth and
/// smaller Z is nearer.
#[rustfmt::skip]
pub fn gl_depth_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector4};

    #[test]
    fn test_depth_remap_keeps_near_in_front() {
        let remap = gl_depth_to_wgpu();
        let near = remap * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = remap * Vector4::new(0.0, 0.0, 1.0, 1.0);
        let decorations = remap * Vector4::new(0.3, -0.2, -0.9, 1.0);

        assert_relative_eq!(near.z, 0.0);
        assert_relative_eq!(far.z, 1.0);
        assert_relative_eq!(decorations.x, 0.3);
        assert_relative_eq!(decorations.z, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_uniform_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 96);
        assert_eq!(std::mem::size_of::<DrawUniform>(), 80);
        assert_eq!(std::mem::size_of::<SceneVertex>(), 32);
    }

    #[test]
    fn test_scene_vertex_from_quadric() {
        let quadric = QuadricVertex {
            position: Point3::new(0.0, 0.9, 0.0),
            normal: nalgebra::Vector3::y(),
            uv: [0.25, 0.5],
        };
        let vertex = SceneVertex::from(&quadric);
        assert_eq!(vertex.position, [0.0, 0.9, 0.0]);
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertex.uv, [0.25, 0.5]);
    }
}
