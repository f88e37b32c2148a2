//! Attitude Viewer
//!
//! Opens a window with a textured attitude ball, a textured bank ring and
//! a white needle, arc and arrow in front of them.

use anyhow::Context;
use attiview_visualization::{InteractiveViewer, ViewerConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "attitude_viewer", about = "Interactive attitude ball viewer")]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Texture wrapped around the ball
    #[arg(long)]
    sphere: Option<PathBuf>,

    /// Texture on the bank ring
    #[arg(long)]
    ring: Option<PathBuf>,

    /// Start the frame timer immediately
    #[arg(long)]
    animate: bool,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Milliseconds between animation frames
    #[arg(long)]
    interval_ms: Option<u64>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(sphere) = self.sphere {
            config.sphere_texture = sphere;
        }
        if let Some(ring) = self.ring {
            config.ring_texture = ring;
        }
        if self.animate {
            config.start_animated = true;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(interval) = self.interval_ms {
            config.frame_interval_ms = interval;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let default = "info,wgpu_hal=warn,wgpu_core=warn,naga=warn";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let config = Cli::parse().into_config()?;
    log::info!(
        "textures: sphere {}, ring {}",
        config.sphere_texture.display(),
        config.ring_texture.display()
    );

    println!("Controls:");
    println!("  Left/Right arrows - roll");
    println!("  Up/Down arrows    - pitch");
    println!("  S                 - start animation");
    println!("  Esc               - pause animation");
    println!("  Close window      - quit");

    InteractiveViewer::new(config).run()?;
    Ok(())
}
