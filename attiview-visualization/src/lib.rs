//! Interactive viewing for attiview
//!
//! This crate connects the core state machines to a window:
//! - Viewer configuration loaded from JSON
//! - A window-system independent event controller
//! - The winit shell that drives rendering and the animation timer

pub mod config;
pub mod controller;
pub mod input;
pub mod interactive_viewer;

pub use config::*;
pub use controller::*;
pub use interactive_viewer::InteractiveViewer;

use attiview_core::Result;

/// Open a viewer with `config` and block until it is closed
pub fn show(config: ViewerConfig) -> Result<()> {
    InteractiveViewer::new(config).run()
}
