//! Parametric quadric tessellation: spheres and flat annuli
//!
//! Both shapes are emitted as a regular grid of vertices with smooth
//! normals and texture coordinates, indexed as triangle lists:
//! - Sphere: axis along Z, `s` runs across the slices, `t` from 1 at +Z to 0 at -Z
//! - Disk: lies in the Z=0 plane facing +Z, texture coordinates map the
//!   outer radius onto the unit square

use crate::{Error, Result};
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// A tessellated vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadricVertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: [f32; 2],
}

/// Indexed triangle list produced by tessellation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadricMesh {
    pub vertices: Vec<QuadricVertex>,
    pub indices: Vec<u32>,
}

impl QuadricMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_grid_indices(&mut self, rows: u32, columns: u32) {
        let stride = columns + 1;
        for row in 0..rows {
            for column in 0..columns {
                let a = row * stride + column;
                let b = a + stride;
                self.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
    }
}

/// Shapes that can be turned into a [`QuadricMesh`]
pub trait Tessellate {
    fn tessellate(&self) -> Result<QuadricMesh>;
}

/// Sphere centered at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
    pub slices: u32,
    pub stacks: u32,
}

/// Annulus centered at the origin in the Z=0 plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub slices: u32,
    pub loops: u32,
}

impl Tessellate for Sphere {
    fn tessellate(&self) -> Result<QuadricMesh> {
        if !(self.radius > 0.0) || self.slices < 3 || self.stacks < 2 {
            return Err(Error::InvalidData(format!(
                "sphere needs a positive radius, 3+ slices and 2+ stacks: {:?}",
                self
            )));
        }

        let mut mesh = QuadricMesh::default();
        mesh.vertices.reserve(((self.stacks + 1) * (self.slices + 1)) as usize);

        for stack in 0..=self.stacks {
            let rho = stack as f32 * PI / self.stacks as f32;
            let t = 1.0 - stack as f32 / self.stacks as f32;
            for slice in 0..=self.slices {
                // close the seam on the exact starting angle
                let theta = if slice == self.slices {
                    0.0
                } else {
                    slice as f32 * 2.0 * PI / self.slices as f32
                };
                let normal = Vector3::new(
                    -theta.sin() * rho.sin(),
                    theta.cos() * rho.sin(),
                    rho.cos(),
                );
                mesh.vertices.push(QuadricVertex {
                    position: Point3::from(normal * self.radius),
                    normal,
                    uv: [slice as f32 / self.slices as f32, t],
                });
            }
        }

        mesh.push_grid_indices(self.stacks, self.slices);
        Ok(mesh)
    }
}

impl Tessellate for Disk {
    fn tessellate(&self) -> Result<QuadricMesh> {
        if !(self.inner_radius >= 0.0)
            || !(self.outer_radius > self.inner_radius)
            || self.slices < 3
            || self.loops < 1
        {
            return Err(Error::InvalidData(format!(
                "disk needs 0 <= inner < outer, 3+ slices and 1+ loops: {:?}",
                self
            )));
        }

        let mut mesh = QuadricMesh::default();
        mesh.vertices.reserve(((self.loops + 1) * (self.slices + 1)) as usize);

        let normal = Vector3::z();
        let ring_step = (self.outer_radius - self.inner_radius) / self.loops as f32;
        let uv_scale = 2.0 * self.outer_radius;

        for ring in 0..=self.loops {
            let radius = self.inner_radius + ring as f32 * ring_step;
            for slice in 0..=self.slices {
                let angle = if slice == self.slices {
                    0.0
                } else {
                    slice as f32 * 2.0 * PI / self.slices as f32
                };
                let x = radius * angle.sin();
                let y = radius * angle.cos();
                mesh.vertices.push(QuadricVertex {
                    position: Point3::new(x, y, 0.0),
                    normal,
                    uv: [x / uv_scale + 0.5, y / uv_scale + 0.5],
                });
            }
        }

        mesh.push_grid_indices(self.loops, self.slices);
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_grid() {
        let sphere = Sphere { radius: 0.9, slices: 36, stacks: 36 };
        let mesh = sphere.tessellate().unwrap();

        assert_eq!(mesh.vertices.len(), 37 * 37);
        assert_eq!(mesh.triangle_count(), 36 * 36 * 2);
        for vertex in &mesh.vertices {
            assert_relative_eq!(vertex.position.coords.norm(), 0.9, epsilon = 1e-5);
            assert_relative_eq!(vertex.normal.norm(), 1.0, epsilon = 1e-5);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_sphere_poles_and_texture_rows() {
        let mesh = Sphere { radius: 1.0, slices: 4, stacks: 2 }.tessellate().unwrap();
        let north = mesh.vertices[0];
        let south = mesh.vertices[mesh.vertices.len() - 1];

        assert_relative_eq!(north.position.z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(north.uv[1], 1.0);
        assert_relative_eq!(south.position.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(south.uv[1], 0.0);
    }

    #[test]
    fn test_disk_radii_and_uvs() {
        let disk = Disk { inner_radius: 0.8, outer_radius: 1.0, slices: 72, loops: 10 };
        let mesh = disk.tessellate().unwrap();

        assert_eq!(mesh.vertices.len(), 11 * 73);
        assert_eq!(mesh.triangle_count(), 72 * 10 * 2);
        for vertex in &mesh.vertices {
            let r = vertex.position.coords.norm();
            assert!(r >= 0.8 - 1e-5 && r <= 1.0 + 1e-5);
            assert_eq!(vertex.position.z, 0.0);
            assert!(vertex.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_degenerate_shapes_are_rejected() {
        assert!(Sphere { radius: 0.0, slices: 8, stacks: 8 }.tessellate().is_err());
        assert!(Sphere { radius: 1.0, slices: 2, stacks: 8 }.tessellate().is_err());
        assert!(Disk { inner_radius: 1.0, outer_radius: 0.5, slices: 8, loops: 1 }
            .tessellate()
            .is_err());
    }
}
