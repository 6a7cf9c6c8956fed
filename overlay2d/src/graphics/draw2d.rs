//! The drawing interface used by HUD and menu code.
//!
//! `Overlay2d` picks once, at construction, between the shader renderer (`ShaderDraw2d`)
//! and the platform driver's fixed-function path (`LegacyDraw2d`).

use crate::{
    config::{Overlay2dConfig, PipelineMode},
    graphics::{
        color::{Color, CornerColors},
        coords::{DestRect, Rect},
        glcontext::{RasterContext, TextureId},
        gltexture::{GpuTexture, RenderTargetTexture},
        gltypes::{IndexWidth, PrimitiveTopology, VertexLayout},
        legacydraw::{LegacyDraw2d, LegacyDriver},
        shaderdraw::ShaderDraw2d,
    },
};

/// Raw vertex and index data of a caller-built primitive list.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveList<'a> {
    /// Packed vertex structs, as described by `vertex_layout`.
    pub vertices: &'a [u8],
    pub vertex_count: u32,
    /// Packed indices, `index_width` bytes each.
    pub indices: &'a [u8],
    pub primitive_count: u32,
    pub vertex_layout: VertexLayout,
    pub topology: PrimitiveTopology,
    pub index_width: IndexWidth,
}

/// Operations every 2D renderer provides.
///
/// All drawing happens immediately, in call order, on the rendering thread.
pub trait Draw2d {
    /// Draws `source` (texture pixels) of `texture` into `dest` (screen pixels), multiplied by `color`.
    /// Single-color draws never blend additively; use `draw_image_with_colors` for that.
    fn draw_image(
        &self,
        texture: &dyn GpuTexture,
        dest: DestRect,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        color: Color,
        use_alpha_channel_of_texture: bool,
    );

    /// Draws `source` of `texture` into `dest`, with one color per corner when `colors` is given.
    /// Translucent drawing blends additively.
    #[allow(clippy::too_many_arguments)]
    fn draw_image_with_colors(
        &self,
        texture: &dyn GpuTexture,
        dest: DestRect,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        colors: Option<&CornerColors>,
        use_alpha_channel_of_texture: bool,
        draw_translucently: bool,
    );

    /// Draws from a texture known only by its handle, such as a framebuffer's color
    /// attachment. The source is always treated as a render target.
    #[allow(clippy::too_many_arguments)]
    fn draw_image_from_render_target(
        &self,
        texture: TextureId,
        width: u32,
        height: u32,
        dest: Rect<i32>,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        color: Color,
        use_alpha_channel_of_texture: bool,
    ) {
        let texture = RenderTargetTexture::new(texture, width, height);
        self.draw_image(
            &texture,
            dest.into(),
            source,
            clip,
            color,
            use_alpha_channel_of_texture,
        );
    }

    fn draw_primitive_list(&self, texture: &dyn GpuTexture, list: &PrimitiveList<'_>);

    fn draw_solid_rect(&self, color: Color, dest: Rect<i32>, clip: Option<&Rect<i32>>);

    /// Builds any lazily created GPU state now. A failure here is fatal for the renderer.
    fn preload(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn uses_shaders(&self) -> bool;
}

/// The 2D overlay renderer of a window.
pub struct Overlay2d {
    renderer: Box<dyn Draw2d>,
}

impl Overlay2d {
    /// Chooses the shader renderer when the config allows it and the context supports it,
    /// the platform driver otherwise.
    pub fn new<C, D>(ctx: C, driver: D, config: &Overlay2dConfig) -> Self
    where
        C: RasterContext + 'static,
        D: LegacyDriver + 'static,
    {
        let use_shaders = match config.pipeline {
            PipelineMode::Auto => ctx.supports_shaders(),
            PipelineMode::Shaders => {
                if !ctx.supports_shaders() {
                    log::warn!("Shaders were requested for the 2D overlay but the context does not support them");
                }
                true
            }
            PipelineMode::Legacy => false,
        };

        let renderer: Box<dyn Draw2d> = if use_shaders {
            log::info!("2D overlay uses the shader pipeline ({})", config.shader_version);
            Box::new(ShaderDraw2d::new(
                ctx,
                &config.shader_version,
                config.sampler_filter,
            ))
        } else {
            log::info!("2D overlay uses the fixed-function driver path");
            Box::new(LegacyDraw2d::new(driver))
        };
        Self { renderer }
    }

    pub fn from_renderer(renderer: Box<dyn Draw2d>) -> Self {
        Self { renderer }
    }

    pub fn uses_shaders(&self) -> bool {
        self.renderer.uses_shaders()
    }

    pub fn preload(&self) -> anyhow::Result<()> {
        self.renderer.preload()
    }

    pub fn draw_image(
        &self,
        texture: &dyn GpuTexture,
        dest: impl Into<DestRect>,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        color: Color,
        use_alpha_channel_of_texture: bool,
    ) {
        self.renderer.draw_image(
            texture,
            dest.into(),
            source,
            clip,
            color,
            use_alpha_channel_of_texture,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_image_with_colors(
        &self,
        texture: &dyn GpuTexture,
        dest: impl Into<DestRect>,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        colors: Option<&CornerColors>,
        use_alpha_channel_of_texture: bool,
        draw_translucently: bool,
    ) {
        self.renderer.draw_image_with_colors(
            texture,
            dest.into(),
            source,
            clip,
            colors,
            use_alpha_channel_of_texture,
            draw_translucently,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_image_from_render_target(
        &self,
        texture: TextureId,
        width: u32,
        height: u32,
        dest: Rect<i32>,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        color: Color,
        use_alpha_channel_of_texture: bool,
    ) {
        self.renderer.draw_image_from_render_target(
            texture,
            width,
            height,
            dest,
            source,
            clip,
            color,
            use_alpha_channel_of_texture,
        );
    }

    pub fn draw_primitive_list(&self, texture: &dyn GpuTexture, list: &PrimitiveList<'_>) {
        self.renderer.draw_primitive_list(texture, list);
    }

    pub fn draw_solid_rect(&self, color: Color, dest: Rect<i32>, clip: Option<&Rect<i32>>) {
        self.renderer.draw_solid_rect(color, dest, clip);
    }
}
