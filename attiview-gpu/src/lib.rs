//! # attiview GPU
//!
//! wgpu realization of the attiview scene: a texture store that plugs into
//! the core texture registry and a renderer for resolved draw lists.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use attiview_core::{FilterMode, RawImage, TextureUploader};
//! use attiview_gpu::{GpuContext, GpuTextures};
//!
//! async fn example() -> attiview_core::Result<()> {
//!     let gpu = GpuContext::new().await?;
//!     let mut textures = GpuTextures::new(gpu.device.clone(), gpu.queue.clone());
//!
//!     let image = RawImage::from_rgb(1, 1, vec![255, 0, 0])?;
//!     let handle = textures.upload(image, FilterMode::Linear)?;
//!     assert!(textures.get(handle).is_some());
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod lines;
pub mod renderer;
pub mod texture;
pub mod vertex;

// Re-export commonly used items
pub use device::GpuContext;
pub use lines::expand_line_strip;
pub use renderer::{FrameRenderer, RenderConfig};
pub use texture::{GpuTexture, GpuTextures, TEXTURE_FORMAT};
pub use vertex::*;
