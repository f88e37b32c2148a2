//! Core state and scene composition for attiview
//!
//! This crate holds everything the viewer does that is independent of a
//! window or a GPU:
//! - Orientation, drag and animation state machines
//! - Decoded image buffers and the path-keyed texture registry
//! - Fixed decoration geometry and quadric tessellation
//! - Composition of the scene into an ordered draw list

pub mod animation;
pub mod drag;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod image;
pub mod orientation;
pub mod quadric;
pub mod scene;
pub mod texture;
pub mod transform;

pub use animation::*;
pub use drag::*;
pub use draw::*;
pub use error::*;
pub use geometry::*;
pub use image::*;
pub use orientation::*;
pub use quadric::*;
pub use scene::*;
pub use texture::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point2, Point3, Vector3};
