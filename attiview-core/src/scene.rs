//! Scene composition: orientation and textures in, ordered draw list out

use crate::{
    shape_points, ArcGeometry, Disk, DrawList, DrawOp, ImageDecoder, OrientationState, Primitive,
    Sphere, TextureHandle, TextureRegistry, TextureState, TextureUploader, ARROW, NEEDLE,
};
use log::warn;
use nalgebra::{Point2, Vector3};
use std::path::Path;

/// Attitude ball
pub const SPHERE: Sphere = Sphere {
    radius: 0.9,
    slices: 36,
    stacks: 36,
};

/// Bank ring in front of the ball
pub const RING: Disk = Disk {
    inner_radius: 0.8,
    outer_radius: 1.0,
    slices: 72,
    loops: 10,
};

/// Depth of the ring plane
pub const RING_DEPTH: f32 = -0.7;
/// Depth of the wireframe decorations, nearest to the viewer
pub const DECORATION_DEPTH: f32 = -0.9;
/// Pixel width of the decoration lines
pub const DECORATION_LINE_WIDTH: f32 = 4.0;
pub const DECORATION_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Texture handles for the two textured objects
///
/// A `None` handle draws that object untextured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneTextures {
    pub sphere: Option<TextureHandle>,
    pub ring: Option<TextureHandle>,
}

impl SceneTextures {
    /// Load both textures, keeping going when one of them fails
    pub fn load<D, U>(
        registry: &mut TextureRegistry<D, U>,
        sphere: impl AsRef<Path>,
        ring: impl AsRef<Path>,
    ) -> Self
    where
        D: ImageDecoder,
        U: TextureUploader,
    {
        Self {
            sphere: load_or_warn(registry, sphere.as_ref()),
            ring: load_or_warn(registry, ring.as_ref()),
        }
    }
}

fn load_or_warn<D: ImageDecoder, U: TextureUploader>(
    registry: &mut TextureRegistry<D, U>,
    path: &Path,
) -> Option<TextureHandle> {
    match registry.load(path) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("{}; drawing without it", e);
            None
        }
    }
}

/// Builds the fixed three-object draw list
///
/// Geometry that never changes (the arc and the two constant shapes) is
/// computed once here and cloned into every list.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    needle: Vec<Point2<f32>>,
    arc: ArcGeometry,
    arrow: Vec<Point2<f32>>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            needle: shape_points(&NEEDLE),
            arc: ArcGeometry::new(),
            arrow: shape_points(&ARROW),
        }
    }

    pub fn arc(&self) -> &ArcGeometry {
        &self.arc
    }

    /// Compose the draw list for one frame
    pub fn compose(&self, orientation: &OrientationState, textures: &SceneTextures) -> DrawList {
        let roll = orientation.roll() as f32;
        let pitch = orientation.pitch() as f32;
        let mut list = DrawList::new();

        list.scoped(|list| {
            list.push(DrawOp::Texture(textures.sphere.into()));
            list.push(DrawOp::Rotate { degrees: roll + 90.0, axis: Vector3::z() });
            list.push(DrawOp::Rotate { degrees: pitch, axis: Vector3::y() });
            list.push(DrawOp::Rotate { degrees: 90.0, axis: Vector3::x() });
            list.push(DrawOp::Draw(Primitive::Sphere(SPHERE)));
        });

        list.scoped(|list| {
            list.push(DrawOp::Texture(textures.ring.into()));
            list.push(DrawOp::Translate(Vector3::new(0.0, 0.0, RING_DEPTH)));
            list.push(DrawOp::Rotate { degrees: roll, axis: Vector3::z() });
            list.push(DrawOp::Draw(Primitive::Disk(RING)));
        });

        list.scoped(|list| {
            list.push(DrawOp::Texture(TextureState::Disabled));
            list.push(DrawOp::Translate(Vector3::new(0.0, 0.0, DECORATION_DEPTH)));
            list.push(DrawOp::LineWidth(DECORATION_LINE_WIDTH));
            list.push(DrawOp::Color(DECORATION_COLOR));
            list.push(DrawOp::Draw(Primitive::LineStrip(self.needle.clone())));
            list.push(DrawOp::Draw(Primitive::LineStrip(self.arc.points().to_vec())));
            list.push(DrawOp::Draw(Primitive::LineStrip(self.arrow.clone())));
        });

        list
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TextureState, Transform3D};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn textured() -> SceneTextures {
        SceneTextures {
            sphere: Some(TextureHandle::new(1)),
            ring: Some(TextureHandle::new(2)),
        }
    }

    #[test]
    fn test_draw_order_is_sphere_ring_decorations() {
        let draws = SceneRenderer::new()
            .compose(&OrientationState::default(), &textured())
            .resolve()
            .unwrap();

        assert_eq!(draws.len(), 5);
        assert!(matches!(draws[0].primitive, Primitive::Sphere(_)));
        assert!(matches!(draws[1].primitive, Primitive::Disk(_)));
        for line in &draws[2..] {
            assert!(matches!(line.primitive, Primitive::LineStrip(_)));
            assert_eq!(line.texture, TextureState::Disabled);
            assert_eq!(line.line_width, DECORATION_LINE_WIDTH);
        }
    }

    #[test]
    fn test_sphere_pole_faces_right_at_rest() {
        let draws = SceneRenderer::new()
            .compose(&OrientationState::default(), &textured())
            .resolve()
            .unwrap();

        let pole = draws[0].model.transform_point(&Point3::new(0.0, 0.0, 0.9));
        assert_relative_eq!(pole, Point3::new(0.9, 0.0, 0.0), epsilon = 1e-5);
        assert_eq!(draws[0].texture, TextureState::Bound(TextureHandle::new(1)));
    }

    #[test]
    fn test_ring_follows_roll_behind_decorations() {
        let orientation = OrientationState::new(90, 45);
        let draws = SceneRenderer::new()
            .compose(&orientation, &textured())
            .resolve()
            .unwrap();

        let edge = draws[1].model.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(edge, Point3::new(0.0, 1.0, RING_DEPTH), epsilon = 1e-5);

        let expected = Transform3D::translation(Vector3::new(0.0, 0.0, DECORATION_DEPTH));
        assert_relative_eq!(draws[2].model.matrix, expected.matrix, epsilon = 1e-6);
    }

    #[test]
    fn test_missing_textures_draw_untextured() {
        let draws = SceneRenderer::new()
            .compose(&OrientationState::default(), &SceneTextures::default())
            .resolve()
            .unwrap();
        assert!(draws.iter().all(|d| d.texture == TextureState::Disabled));
    }
}
