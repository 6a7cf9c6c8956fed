pub mod config;
pub mod graphics;

// Re-export the crates that appear in the public API
pub use anyhow;
pub use glow;
pub use toml;

pub use config::{Overlay2dConfig, PipelineMode, get_shader_version};
pub use graphics::{
    color::{Color, CornerColors},
    coords::{DestRect, Rect, ScreenSize},
    draw2d::{Draw2d, Overlay2d, PrimitiveList},
    glcontext::{RasterContext, TextureId},
    glowcontext::GlowContext,
    gltexture::{GpuTexture, ImageAntialiasing, RenderTargetTexture, Texture},
    gltypes::{IndexWidth, PrimitiveTopology, VertexLayout},
    legacydraw::{LegacyDraw2d, LegacyDriver},
    shaderdraw::ShaderDraw2d,
};
