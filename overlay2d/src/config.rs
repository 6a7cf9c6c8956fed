use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::graphics::gltexture::ImageAntialiasing;

/// Which renderer draws the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Shaders when the context supports them, the platform driver otherwise.
    #[default]
    Auto,
    Shaders,
    Legacy,
}

impl PipelineMode {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(PipelineMode::Auto),
            "shaders" => Some(PipelineMode::Shaders),
            "legacy" => Some(PipelineMode::Legacy),
            _ => None,
        }
    }
}

impl ImageAntialiasing {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "nearest" => Some(ImageAntialiasing::Nearest),
            "linear" => Some(ImageAntialiasing::Linear),
            "linear_with_mipmaps" => Some(ImageAntialiasing::LinearWithMipmaps),
            _ => None,
        }
    }
}

/// The `#version` line prepended to every 2D shader.
/// macOS has no OpenGL ES, so it gets the matching desktop profile.
pub fn get_shader_version() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "#version 330 core"
    }
    #[cfg(not(target_os = "macos"))]
    {
        "#version 300 es"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Overlay2dConfig {
    pub pipeline: PipelineMode,
    pub shader_version: String,
    pub sampler_filter: ImageAntialiasing,
}

impl Default for Overlay2dConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineMode::Auto,
            shader_version: get_shader_version().to_string(),
            sampler_filter: ImageAntialiasing::Linear,
        }
    }
}

impl Overlay2dConfig {
    /// Reads the overlay settings from a TOML document.
    ///
    /// A complete table is parsed as is. Otherwise every key that is missing or has an
    /// unexpected value falls back to its default. Only malformed TOML is an error.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let r = toml::from_str::<Overlay2dConfig>(content);
        if let Ok(r) = r {
            return Ok(r);
        }
        let table = content.parse::<toml::Table>()?;
        let defaults = Overlay2dConfig::default();

        let get_str = |key: &str| table.get(key).and_then(|v| v.as_str());

        Ok(Overlay2dConfig {
            pipeline: get_str("pipeline")
                .and_then(PipelineMode::from_name)
                .unwrap_or(defaults.pipeline),
            shader_version: get_str("shader_version")
                .map(|s| s.to_string())
                .unwrap_or(defaults.shader_version),
            sampler_filter: get_str("sampler_filter")
                .and_then(ImageAntialiasing::from_name)
                .unwrap_or(defaults.sampler_filter),
        })
    }
}
