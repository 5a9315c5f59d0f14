//! Editor configuration, loaded from JSON.
//!
//! Every field has a default, so partial documents are accepted.

use serde::{Deserialize, Serialize};

use crate::engine::SurfaceSize;
use crate::interaction::{LeavePolicy, OriginConvention};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0} must be larger than zero")]
    ZeroSize(&'static str),
    #[error("{name} of {value} exceeds the limit of {limit}")]
    TooLarge {
        name: &'static str,
        value: u32,
        limit: u32,
    },
}

/// Largest accepted canvas or scene side, in pixels.
pub const MAX_SURFACE_SIDE: u32 = 8192;

/// Pointer handling settings for one interaction controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub origin: OriginConvention,
    pub leave: LeavePolicy,
}

/// Perlin noise parameters for the demo graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    pub seed: u32,
    pub scale: f64,
    /// Sampling offset, added before scaling
    pub offset: [f64; 3],
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 1,
            scale: 10.0,
            offset: [0.0; 3],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub interaction: InteractionSettings,
    /// Node canvas size
    pub canvas: SurfaceSize,
    /// Scene canvas size
    pub scene: SurfaceSize,
    /// Side length of the texture preview drawn inside the output node
    pub preview_size: u32,
    pub noise: NoiseSettings,
    /// `tracing` filter directive used by the browser client
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            interaction: InteractionSettings::default(),
            canvas: SurfaceSize::new(800, 600),
            scene: SurfaceSize::new(400, 400),
            preview_size: 200,
            noise: NoiseSettings::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.is_empty() {
            return Err(ConfigError::ZeroSize("canvas"));
        }
        if self.scene.is_empty() {
            return Err(ConfigError::ZeroSize("scene"));
        }
        if self.preview_size == 0 {
            return Err(ConfigError::ZeroSize("preview_size"));
        }
        for (name, value) in [
            ("canvas width", self.canvas.width),
            ("canvas height", self.canvas.height),
            ("scene width", self.scene.width),
            ("scene height", self.scene.height),
        ] {
            if value > MAX_SURFACE_SIDE {
                return Err(ConfigError::TooLarge {
                    name,
                    value,
                    limit: MAX_SURFACE_SIDE,
                });
            }
        }
        // The output node, preview included, has to fit on the node canvas.
        let limit = self.canvas.width.min(self.canvas.height);
        if self.preview_size > limit {
            return Err(ConfigError::TooLarge {
                name: "preview_size",
                value: self.preview_size,
                limit,
            });
        }
        Ok(())
    }
}
