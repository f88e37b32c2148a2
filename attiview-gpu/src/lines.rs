//! Wide line strips as screen-space quads
//!
//! wgpu has no line width, so every segment becomes two triangles whose
//! half-thickness is half the requested width in pixels.

use crate::LineVertex;
use attiview_core::Transform3D;
use nalgebra::{Point2, Point3, Vector2};

/// Expand a line strip into a triangle list of [`LineVertex`]
///
/// `points` lie in the Z=0 plane of `model`. Zero-length segments are
/// skipped; a viewport with a zero dimension yields nothing.
pub fn expand_line_strip(
    points: &[Point2<f32>],
    model: &Transform3D,
    line_width: f32,
    viewport: (u32, u32),
) -> Vec<LineVertex> {
    let (width, height) = (viewport.0 as f32, viewport.1 as f32);
    if width <= 0.0 || height <= 0.0 || points.len() < 2 {
        return Vec::new();
    }

    let transformed: Vec<Point3<f32>> = points
        .iter()
        .map(|p| model.transform_point(&Point3::new(p.x, p.y, 0.0)))
        .collect();

    let mut vertices = Vec::with_capacity((transformed.len() - 1) * 6);
    for segment in transformed.windows(2) {
        let (a, b) = (segment[0], segment[1]);

        // direction in pixels so the thickness is isotropic on screen
        let pixels = Vector2::new((b.x - a.x) * width * 0.5, (b.y - a.y) * height * 0.5);
        let length = pixels.norm();
        if length <= f32::EPSILON {
            continue;
        }
        let normal = Vector2::new(-pixels.y, pixels.x) / length;
        let offset = Vector2::new(normal.x * line_width / width, normal.y * line_width / height);

        let corner = |p: Point3<f32>, sign: f32| LineVertex {
            position: [p.x + sign * offset.x, p.y + sign * offset.y, p.z],
        };
        let (a0, a1, b0, b1) = (corner(a, 1.0), corner(a, -1.0), corner(b, 1.0), corner(b, -1.0));
        vertices.extend_from_slice(&[a0, a1, b0, b0, a1, b1]);
    }
    vertices
}
