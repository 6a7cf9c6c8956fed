use std::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};

use crate::graphics::glcontext::{RasterContext, TextureId};

/// Texture filtering applied when a program samples a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageAntialiasing {
    Nearest,
    #[default]
    Linear,
    LinearWithMipmaps,
}

impl ImageAntialiasing {
    pub fn min_filter(&self) -> i32 {
        match self {
            ImageAntialiasing::Nearest => glow::NEAREST as i32,
            ImageAntialiasing::Linear => glow::LINEAR as i32,
            ImageAntialiasing::LinearWithMipmaps => glow::LINEAR_MIPMAP_LINEAR as i32,
        }
    }

    pub fn mag_filter(&self) -> i32 {
        match self {
            ImageAntialiasing::Nearest => glow::NEAREST as i32,
            ImageAntialiasing::Linear | ImageAntialiasing::LinearWithMipmaps => glow::LINEAR as i32,
        }
    }

    /// The filter to use on a texture. Sampling a mipmap filter on a texture without a
    /// mipmap chain reads black, so those fall back to `Linear`.
    pub fn for_texture(self, has_mipmaps: bool) -> Self {
        match self {
            ImageAntialiasing::LinearWithMipmaps if !has_mipmaps => ImageAntialiasing::Linear,
            filter => filter,
        }
    }
}

/// Anything the 2D overlay can sample from.
pub trait GpuTexture {
    /// The GPU handle, or `None` while the pixels have not reached the GPU yet.
    fn native_handle(&self) -> Option<TextureId>;
    /// Size in pixels.
    fn size(&self) -> (u32, u32);
    /// Render targets were drawn into by the GPU and are stored bottom-up.
    fn is_render_target(&self) -> bool;
    /// Only textures uploaded through `Texture` get a mipmap chain.
    fn has_mipmaps(&self) -> bool {
        !self.is_render_target()
    }
    /// Makes sure the texture is resident before it gets bound.
    fn prepare(&self, _ctx: &dyn RasterContext) {}
}

/// Represents an RGBA texture on the GPU.
///
/// A texture built with `Texture::deferred` keeps its pixels on the CPU until the first
/// time it is drawn.
#[derive(Debug)]
pub struct Texture {
    tex: Cell<Option<TextureId>>,
    pending_pixels: RefCell<Option<Vec<u8>>>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Create a new RGBA texture and upload it right away.
    pub fn new_rgba(
        ctx: &dyn RasterContext,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let tex = ctx.create_texture_rgba(data, width, height)?;
        Ok(Self {
            tex: Cell::new(Some(tex)),
            pending_pixels: RefCell::new(None),
            width,
            height,
        })
    }

    /// Create an RGBA texture whose upload waits for the first draw.
    pub fn deferred(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            tex: Cell::new(None),
            pending_pixels: RefCell::new(Some(data)),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_uploaded(&self) -> bool {
        self.tex.get().is_some()
    }

    /// Frees the GPU side. The texture can't be drawn afterwards.
    pub fn destroy(&self, ctx: &dyn RasterContext) {
        if let Some(tex) = self.tex.take() {
            ctx.delete_texture(tex);
        }
        self.pending_pixels.borrow_mut().take();
    }
}

impl GpuTexture for Texture {
    fn native_handle(&self) -> Option<TextureId> {
        self.tex.get()
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn is_render_target(&self) -> bool {
        false
    }

    fn prepare(&self, ctx: &dyn RasterContext) {
        if self.tex.get().is_some() {
            return;
        }
        let Some(pixels) = self.pending_pixels.borrow_mut().take() else {
            return;
        };
        match ctx.create_texture_rgba(&pixels, self.width, self.height) {
            Ok(tex) => self.tex.set(Some(tex)),
            Err(e) => {
                log::debug!("Deferred texture upload failed: {e}");
                *self.pending_pixels.borrow_mut() = Some(pixels);
            }
        }
    }
}

/// A texture owned elsewhere (usually the color attachment of a framebuffer), known only
/// by its handle and size. Always treated as a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetTexture {
    handle: TextureId,
    width: u32,
    height: u32,
}

impl RenderTargetTexture {
    pub fn new(handle: TextureId, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }
}

impl GpuTexture for RenderTargetTexture {
    fn native_handle(&self) -> Option<TextureId> {
        Some(self.handle)
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn is_render_target(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::mockgl::{GlCall, RecordingContext};

    #[test]
    fn deferred_texture_uploads_once() {
        let ctx = RecordingContext::new(800, 600);
        let texture = Texture::deferred(vec![255; 4 * 4], 2, 2);
        assert!(texture.native_handle().is_none());

        texture.prepare(&ctx);
        texture.prepare(&ctx);

        let uploads = ctx
            .calls()
            .iter()
            .filter(|c| matches!(c, GlCall::CreateTexture { .. }))
            .count();
        assert_eq!(uploads, 1);
        assert!(texture.is_uploaded());
        assert_eq!(texture.size(), (2, 2));
    }

    #[test]
    fn destroy_releases_the_gpu_texture() {
        let ctx = RecordingContext::new(800, 600);
        let texture = Texture::new_rgba(&ctx, &[0; 16], 2, 2).expect("upload");
        let handle = texture.native_handle().expect("handle");
        texture.destroy(&ctx);
        assert!(ctx.calls().contains(&GlCall::DeleteTexture(handle)));
        assert!(texture.native_handle().is_none());
    }

    #[test]
    fn render_target_wrapper_is_flipped() {
        let rt = RenderTargetTexture::new(TextureId(7), 320, 240);
        assert!(rt.is_render_target());
        assert_eq!(rt.native_handle(), Some(TextureId(7)));
        assert_eq!(rt.size(), (320, 240));
    }

    #[test]
    fn mipmap_filter_needs_a_mipmap_chain() {
        let mipmapped = ImageAntialiasing::LinearWithMipmaps;
        assert_eq!(mipmapped.for_texture(true), ImageAntialiasing::LinearWithMipmaps);
        assert_eq!(mipmapped.for_texture(false), ImageAntialiasing::Linear);
        assert_eq!(ImageAntialiasing::Nearest.for_texture(false), ImageAntialiasing::Nearest);
        assert!(!RenderTargetTexture::new(TextureId(1), 4, 4).has_mipmaps());
    }

    #[test]
    fn mag_filter_never_uses_mipmaps() {
        assert_eq!(
            ImageAntialiasing::LinearWithMipmaps.mag_filter(),
            glow::LINEAR as i32
        );
        assert_eq!(ImageAntialiasing::Nearest.min_filter(), glow::NEAREST as i32);
    }
}
