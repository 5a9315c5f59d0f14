//! Texgen Render
//!
//! Generates the demo graph's texture without a browser and writes it as PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use image::RgbaImage;
use texgen_core::{EditorConfig, NodeGraph, SurfaceSize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Editor config JSON; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output width, overriding the configured scene width
    #[arg(long)]
    width: Option<u32>,

    /// Output height, overriding the configured scene height
    #[arg(long)]
    height: Option<u32>,

    /// PNG file to write
    #[arg(short, long, default_value = "texture.png")]
    output: PathBuf,
}

impl Args {
    fn load_config(&self) -> Result<EditorConfig> {
        let Some(path) = &self.config else {
            return Ok(EditorConfig::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        EditorConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
    }

    fn size(&self, config: &EditorConfig) -> SurfaceSize {
        SurfaceSize::new(
            self.width.unwrap_or(config.scene.width),
            self.height.unwrap_or(config.scene.height),
        )
    }
}

fn render(config: &EditorConfig, size: SurfaceSize) -> Result<RgbaImage> {
    let graph = NodeGraph::demo(config).context("Failed to build demo graph")?;
    graph
        .generate(size)
        .with_context(|| format!("Failed to generate {}x{} texture", size.width, size.height))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.load_config()?;
    let size = args.size(&config);

    tracing::info!("Rendering {}x{} texture", size.width, size.height);
    let texture = render(&config, size)?;
    texture
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    tracing::info!("Wrote {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_defaults_to_scene() {
        let args = Args::try_parse_from(["texgen-render"]).unwrap();
        let config = EditorConfig::default();

        assert_eq!(args.size(&config), config.scene);
        assert_eq!(args.output, PathBuf::from("texture.png"));
    }

    #[test]
    fn test_size_overrides() {
        let args = Args::try_parse_from(["texgen-render", "--width", "64"]).unwrap();
        let config = EditorConfig::default();

        assert_eq!(args.size(&config), SurfaceSize::new(64, config.scene.height));
    }

    #[test]
    fn test_missing_config_file() {
        let args =
            Args::try_parse_from(["texgen-render", "--config", "/nonexistent/texgen.json"]).unwrap();
        assert!(args.load_config().is_err());
    }

    #[test]
    fn test_render_demo() {
        let texture = render(&EditorConfig::default(), SurfaceSize::new(16, 8)).unwrap();
        assert_eq!(texture.dimensions(), (16, 8));
        assert!(texture.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_render_empty_size_fails() {
        assert!(render(&EditorConfig::default(), SurfaceSize::new(0, 8)).is_err());
    }
}
