//! Fixed 2D line geometry for the wireframe decorations

use nalgebra::Point2;
use std::f64::consts::PI;

/// Number of points in the arc
pub const ARC_POINTS: usize = 37;
/// Radius of the arc
pub const ARC_RADIUS: f64 = 0.25;

/// Horizontal "wings" with a raised center section
pub const NEEDLE: [[f32; 2]; 6] = [
    [-0.8, 0.0],
    [-0.15, 0.0],
    [-0.1, 0.1],
    [0.1, 0.1],
    [0.15, 0.0],
    [0.8, 0.0],
];

/// Vertical pointer with a flag to the right
pub const ARROW: [[f32; 2]; 4] = [[0.0, 0.1], [0.0, 0.8], [0.3, 0.2], [0.0, 0.2]];

/// Lower half-circle from (-r, 0) through (0, -r) to (r, 0)
///
/// Computed once and reused for every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGeometry {
    points: Vec<Point2<f32>>,
}

impl ArcGeometry {
    pub fn new() -> Self {
        let last = (ARC_POINTS - 1) as f64;
        let points = (0..ARC_POINTS)
            .map(|i| {
                let angle = i as f64 / last * PI;
                Point2::new(
                    (angle.cos() * -ARC_RADIUS) as f32,
                    (angle.sin() * -ARC_RADIUS) as f32,
                )
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Point2<f32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for ArcGeometry {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a constant shape into points
pub fn shape_points(shape: &[[f32; 2]]) -> Vec<Point2<f32>> {
    shape.iter().map(|&[x, y]| Point2::new(x, y)).collect()
}
