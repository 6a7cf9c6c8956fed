use std::cell::Cell;

use crate::graphics::{
    color::Color,
    coords::{Rect, ScissorBox, ScreenSize},
    glbuffer::QUAD_VERTEX_COUNT,
    glcontext::{BlendFunc, BufferTarget, RasterContext},
    gltypes::{IndexWidth, PrimitiveTopology},
};

/// Blending for textured quads. Translucent (additive) wins over alpha compositing.
pub fn image_blend(use_alpha_channel_of_texture: bool, draw_translucently: bool) -> Option<BlendFunc> {
    if draw_translucently {
        Some(BlendFunc::ADDITIVE)
    } else if use_alpha_channel_of_texture {
        Some(BlendFunc::ALPHA)
    } else {
        None
    }
}

/// Blending for flat rectangles: only when the color is not fully opaque.
pub fn solid_blend(color: Color) -> Option<BlendFunc> {
    if color.is_opaque() {
        None
    } else {
        Some(BlendFunc::ALPHA)
    }
}

/// Represents a thing that can be drawn to.
pub struct DrawingTarget<C: RasterContext> {
    ctx: C,
    draw_call_counter: Cell<usize>,
}

impl<C: RasterContext> DrawingTarget<C> {
    pub fn new(ctx: C) -> Self {
        Self {
            ctx,
            draw_call_counter: Cell::new(0),
        }
    }

    pub fn ctx(&self) -> &C {
        &self.ctx
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.ctx.screen_size()
    }

    /// Sets the blend state, applies `clip` as a scissor box, runs `f`, then turns the
    /// scissor test back off, unbinds the program and clears the GL error flag.
    ///
    /// An invalid `clip` skips `f` entirely and returns false. The blend state is left as
    /// set here in every case.
    pub fn with_quad_state(
        &self,
        blend: Option<BlendFunc>,
        clip: Option<&Rect<i32>>,
        f: impl FnOnce(),
    ) -> bool {
        self.ctx.set_blend(blend);

        let scissor = match clip {
            None => None,
            Some(clip) => match ScissorBox::from_clip(clip, self.ctx.screen_size()) {
                Some(scissor) => Some(scissor),
                None => return false,
            },
        };
        if scissor.is_some() {
            self.ctx.set_scissor(scissor);
        }

        f();

        if scissor.is_some() {
            self.ctx.set_scissor(None);
        }
        self.ctx.use_program(None);
        self.ctx.clear_error();
        true
    }

    /// Draws the bound quad vertex array as a 4 vertex triangle strip, then unbinds it.
    pub fn draw_quad(&self) {
        self.count_draw_call();
        self.ctx
            .draw_arrays(PrimitiveTopology::TriangleStrip, 0, QUAD_VERTEX_COUNT);
        self.ctx.bind_vertex_array(None);
        self.ctx.bind_buffer(BufferTarget::Array, None);
    }

    pub fn draw_indexed(&self, mode: PrimitiveTopology, count: i32, index_width: IndexWidth) {
        self.count_draw_call();
        self.ctx.draw_elements(mode, count, index_width);
    }

    fn count_draw_call(&self) {
        self.draw_call_counter.set(self.draw_call_counter.get() + 1);
    }

    pub fn get_draw_call_counter(&self) -> usize {
        self.draw_call_counter.get()
    }

    pub fn reset_draw_call_counter(&self) {
        self.draw_call_counter.set(0);
    }
}
