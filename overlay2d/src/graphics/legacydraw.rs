//! The fixed-function path, for contexts without programmable shaders.

use crate::graphics::{
    color::{Color, CornerColors},
    coords::{DestRect, Rect},
    draw2d::{Draw2d, PrimitiveList},
    gltexture::GpuTexture,
};

/// The platform video driver's own 2D drawing entry points.
pub trait LegacyDriver {
    /// `colors` is the per-corner modulation; `None` draws the texture unmodified.
    fn draw_2d_image(
        &self,
        texture: &dyn GpuTexture,
        dest: Rect<i32>,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        colors: Option<&CornerColors>,
        use_alpha_channel_of_texture: bool,
    );

    /// Draws with whatever material the driver has current; no texture is passed.
    fn draw_2d_vertex_primitive_list(&self, list: &PrimitiveList<'_>);

    fn draw_2d_rectangle(&self, color: Color, dest: Rect<i32>, clip: Option<&Rect<i32>>);
}

/// Forwards every operation to a `LegacyDriver`.
///
/// The driver works in whole pixels, so sub-pixel destinations are truncated, and it has
/// no additive blending, so translucent draws are plain draws here.
#[derive(Debug)]
pub struct LegacyDraw2d<D: LegacyDriver> {
    driver: D,
}

impl<D: LegacyDriver> LegacyDraw2d<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: LegacyDriver> Draw2d for LegacyDraw2d<D> {
    fn draw_image(
        &self,
        texture: &dyn GpuTexture,
        dest: DestRect,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        color: Color,
        use_alpha_channel_of_texture: bool,
    ) {
        let colors = CornerColors::uniform(color);
        self.driver.draw_2d_image(
            texture,
            dest.to_pixels(),
            source,
            clip,
            Some(&colors),
            use_alpha_channel_of_texture,
        );
    }

    fn draw_image_with_colors(
        &self,
        texture: &dyn GpuTexture,
        dest: DestRect,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        colors: Option<&CornerColors>,
        use_alpha_channel_of_texture: bool,
        _draw_translucently: bool,
    ) {
        self.driver.draw_2d_image(
            texture,
            dest.to_pixels(),
            source,
            clip,
            colors,
            use_alpha_channel_of_texture,
        );
    }

    fn draw_primitive_list(&self, _texture: &dyn GpuTexture, list: &PrimitiveList<'_>) {
        self.driver.draw_2d_vertex_primitive_list(list);
    }

    fn draw_solid_rect(&self, color: Color, dest: Rect<i32>, clip: Option<&Rect<i32>>) {
        self.driver.draw_2d_rectangle(color, dest, clip);
    }

    fn uses_shaders(&self) -> bool {
        false
    }
}
