//! Ordered draw operations and their flattening into positioned primitives

use crate::{Disk, Error, Result, Sphere, TextureHandle, Transform3D};
use nalgebra::{Point2, Vector3};

/// Something that ends up as geometry on screen
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Disk(Disk),
    /// Connected segments in the Z=0 plane of the current transform
    LineStrip(Vec<Point2<f32>>),
}

/// Texturing for subsequent primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureState {
    #[default]
    Disabled,
    Bound(TextureHandle),
}

impl From<Option<TextureHandle>> for TextureState {
    fn from(handle: Option<TextureHandle>) -> Self {
        handle.map_or(TextureState::Disabled, TextureState::Bound)
    }
}

/// One step of a draw sequence
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Push the transform, texture, color and line width
    Save,
    /// Pop back to the last saved state
    Restore,
    Texture(TextureState),
    Translate(Vector3<f32>),
    Rotate { degrees: f32, axis: Vector3<f32> },
    LineWidth(f32),
    Color([f32; 3]),
    Draw(Primitive),
}

/// A primitive with the state that was current when it was drawn
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDraw {
    pub model: Transform3D,
    pub texture: TextureState,
    pub color: [f32; 3],
    pub line_width: f32,
    pub primitive: Primitive,
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Transform3D,
    texture: TextureState,
    color: [f32; 3],
    line_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform3D::identity(),
            texture: TextureState::Disabled,
            color: [1.0, 1.0, 1.0],
            line_width: 1.0,
        }
    }
}

/// An ordered sequence of [`DrawOp`]s
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Run `build` between a `Save` and its matching `Restore`
    pub fn scoped<F: FnOnce(&mut Self)>(&mut self, build: F) {
        self.push(DrawOp::Save);
        build(self);
        self.push(DrawOp::Restore);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Interpret the state stack and return one entry per primitive
    pub fn resolve(&self) -> Result<Vec<ResolvedDraw>> {
        let mut state = DrawState::default();
        let mut saved: Vec<DrawState> = Vec::new();
        let mut draws = Vec::new();

        for (index, op) in self.ops.iter().enumerate() {
            match op {
                DrawOp::Save => saved.push(state),
                DrawOp::Restore => {
                    state = saved.pop().ok_or_else(|| {
                        Error::InvalidData(format!("restore without save at op {}", index))
                    })?;
                }
                DrawOp::Texture(texture) => state.texture = *texture,
                DrawOp::Translate(offset) => {
                    state.transform = state.transform * Transform3D::translation(*offset);
                }
                DrawOp::Rotate { degrees, axis } => {
                    state.transform =
                        state.transform * Transform3D::rotation_degrees(*degrees, *axis);
                }
                DrawOp::LineWidth(width) => state.line_width = *width,
                DrawOp::Color(color) => state.color = *color,
                DrawOp::Draw(primitive) => draws.push(ResolvedDraw {
                    model: state.transform,
                    texture: state.texture,
                    color: state.color,
                    line_width: state.line_width,
                    primitive: primitive.clone(),
                }),
            }
        }

        if !saved.is_empty() {
            return Err(Error::InvalidData(format!(
                "{} save(s) left unrestored",
                saved.len()
            )));
        }
        Ok(draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_restore_isolates_scopes() {
        let mut list = DrawList::new();
        list.scoped(|list| {
            list.push(DrawOp::Texture(TextureState::Bound(TextureHandle::new(7))));
            list.push(DrawOp::Translate(Vector3::new(0.0, 0.0, -0.5)));
            list.push(DrawOp::Draw(Primitive::LineStrip(vec![Point2::origin()])));
        });
        list.push(DrawOp::Draw(Primitive::LineStrip(vec![Point2::origin()])));

        let draws = list.resolve().unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].texture, TextureState::Bound(TextureHandle::new(7)));
        let moved = draws[0].model.transform_point(&Point3::origin());
        assert_relative_eq!(moved.z, -0.5);
        assert_eq!(draws[1].texture, TextureState::Disabled);
        assert!(draws[1].model.is_identity(1e-6));
    }

    #[test]
    fn test_unbalanced_lists_are_rejected() {
        let mut list = DrawList::new();
        list.push(DrawOp::Restore);
        assert!(matches!(list.resolve(), Err(Error::InvalidData(_))));

        let mut list = DrawList::new();
        list.push(DrawOp::Save);
        assert!(list.resolve().is_err());
    }

    #[test]
    fn test_missing_handle_disables_texturing() {
        assert_eq!(TextureState::from(None), TextureState::Disabled);
        assert_eq!(
            TextureState::from(Some(TextureHandle::new(1))),
            TextureState::Bound(TextureHandle::new(1))
        );
    }
}
