use crate::graphics::{
    color::{Color, CornerColors},
    coords::{DestRect, QuadPlacement, Rect},
    draw2d::{Draw2d, PrimitiveList},
    glbuffer::ScratchGeometry,
    glcontext::RasterContext,
    gldraw::{DrawingTarget, image_blend, solid_blend},
    glprogram::SampledTexture,
    gltexture::{GpuTexture, ImageAntialiasing},
    gltypes::PrimitiveTopology,
    quadshaders::ShaderPrograms,
};

/// Indices drawn on top of `primitive_count` for a primitive list. Callers pass the number
/// of fan triangles, and a fan of n triangles needs n + 2 indices.
pub const PRIMITIVE_LIST_EXTRA_INDICES: u32 = 2;

/// A 2D program that can't be built leaves the overlay unable to draw anything.
fn built<T>(program: anyhow::Result<T>) -> T {
    match program {
        Ok(program) => program,
        Err(e) => panic!("The 2D overlay cannot run without its shaders: {e:#}"),
    }
}

/// Draws the overlay with the GLSL quad programs.
pub struct ShaderDraw2d<C: RasterContext> {
    target: DrawingTarget<C>,
    programs: ShaderPrograms,
}

impl<C: RasterContext> ShaderDraw2d<C> {
    pub fn new(ctx: C, shader_version: &str, filter: ImageAntialiasing) -> Self {
        Self {
            target: DrawingTarget::new(ctx),
            programs: ShaderPrograms::new(shader_version, filter),
        }
    }

    pub fn context(&self) -> &C {
        self.target.ctx()
    }

    pub fn programs(&self) -> &ShaderPrograms {
        &self.programs
    }

    pub fn draw_call_count(&self) -> usize {
        self.target.get_draw_call_counter()
    }

    pub fn reset_draw_call_count(&self) {
        self.target.reset_draw_call_counter();
    }

    fn placement(&self, texture: &dyn GpuTexture, dest: DestRect, source: &Rect<i32>) -> QuadPlacement {
        QuadPlacement::compute(
            self.target.screen_size(),
            texture.size(),
            texture.is_render_target(),
            dest,
            source,
        )
    }

    /// Uploads the texture if needed and returns what the sampler needs to bind it.
    fn resident_handle(&self, texture: &dyn GpuTexture) -> Option<SampledTexture> {
        texture.prepare(self.target.ctx());
        let Some(id) = texture.native_handle() else {
            log::debug!("Skipping a 2D draw: texture is not on the GPU");
            return None;
        };
        Some(SampledTexture {
            id,
            has_mipmaps: texture.has_mipmaps(),
        })
    }

    fn draw_uniform_colored_quad(&self, handle: SampledTexture, placement: &QuadPlacement, color: Color) {
        let ctx = self.target.ctx();
        let quad = built(self.programs.quad(ctx));
        let shader = built(self.programs.uniform_colored_texture_rect(ctx));
        shader.activate(ctx);
        quad.bind_for_drawing(ctx);
        shader.set_texture_units(ctx, handle);
        shader.set_uniforms(ctx, placement, color);
        self.target.draw_quad();
    }

    fn draw_corner_colored_quad(
        &self,
        handle: SampledTexture,
        placement: &QuadPlacement,
        colors: &CornerColors,
    ) {
        let ctx = self.target.ctx();
        let shader = built(self.programs.colored_texture_rect(ctx));
        shader.upload_colors(ctx, colors);
        shader.activate(ctx);
        shader.set_texture_units(ctx, handle);
        shader.set_uniforms(ctx, placement);
        self.target.draw_quad();
    }

    fn draw_textured_quad(&self, handle: SampledTexture, placement: &QuadPlacement) {
        let ctx = self.target.ctx();
        let quad = built(self.programs.quad(ctx));
        let shader = built(self.programs.texture_rect(ctx));
        shader.activate(ctx);
        quad.bind_for_drawing(ctx);
        shader.set_texture_units(ctx, handle);
        shader.set_uniforms(ctx, placement);
        self.target.draw_quad();
    }
}

impl<C: RasterContext> Draw2d for ShaderDraw2d<C> {
    fn draw_image(
        &self,
        texture: &dyn GpuTexture,
        dest: DestRect,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        color: Color,
        use_alpha_channel_of_texture: bool,
    ) {
        let placement = self.placement(texture, dest, &source);
        let blend = image_blend(use_alpha_channel_of_texture, false);
        self.target.with_quad_state(blend, clip, || {
            if let Some(handle) = self.resident_handle(texture) {
                self.draw_uniform_colored_quad(handle, &placement, color);
            }
        });
    }

    fn draw_image_with_colors(
        &self,
        texture: &dyn GpuTexture,
        dest: DestRect,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        colors: Option<&CornerColors>,
        use_alpha_channel_of_texture: bool,
        draw_translucently: bool,
    ) {
        let placement = self.placement(texture, dest, &source);
        let blend = image_blend(use_alpha_channel_of_texture, draw_translucently);
        self.target.with_quad_state(blend, clip, || {
            let Some(handle) = self.resident_handle(texture) else {
                return;
            };
            match colors {
                Some(colors) => self.draw_corner_colored_quad(handle, &placement, colors),
                None => self.draw_textured_quad(handle, &placement),
            }
        });
    }

    fn draw_primitive_list(&self, texture: &dyn GpuTexture, list: &PrimitiveList<'_>) {
        let ctx = self.target.ctx();
        let Some(element_count) = list
            .primitive_count
            .checked_add(PRIMITIVE_LIST_EXTRA_INDICES)
            .and_then(|n| i32::try_from(n).ok())
        else {
            log::debug!(
                "Skipping a 2D primitive list: {} primitives is more than one draw can index",
                list.primitive_count
            );
            return;
        };
        let vertex_bytes = list.vertex_count as usize * list.vertex_layout.stride();
        let index_bytes = element_count as usize * list.index_width.size_in_bytes();
        let (Some(vertices), Some(indices)) = (
            list.vertices.get(..vertex_bytes),
            list.indices.get(..index_bytes),
        ) else {
            log::debug!(
                "Skipping a 2D primitive list: need {vertex_bytes} vertex bytes and {index_bytes} index bytes, got {} and {}",
                list.vertices.len(),
                list.indices.len()
            );
            return;
        };

        let scratch = match ScratchGeometry::upload(
            ctx,
            &list.vertex_layout.data_layout(),
            vertices,
            indices,
        ) {
            Ok(scratch) => scratch,
            Err(e) => {
                log::debug!("Skipping a 2D primitive list: {e}");
                return;
            }
        };

        let shader = built(self.programs.primitive_list(ctx));
        shader.activate(ctx);
        shader.set_uniforms(ctx, 1.0, self.target.screen_size());
        if let Some(handle) = self.resident_handle(texture) {
            shader.set_texture_units(ctx, handle);
            self.target.draw_indexed(
                PrimitiveTopology::TriangleFan,
                element_count,
                list.index_width,
            );
        }
        drop(scratch);
    }

    fn draw_solid_rect(&self, color: Color, dest: Rect<i32>, clip: Option<&Rect<i32>>) {
        let placement = QuadPlacement::screen_only(self.target.screen_size(), dest.into());
        self.target.with_quad_state(solid_blend(color), clip, || {
            let ctx = self.target.ctx();
            let quad = built(self.programs.quad(ctx));
            let shader = built(self.programs.colored_rect(ctx));
            shader.activate(ctx);
            quad.bind_for_drawing(ctx);
            shader.set_uniforms(ctx, &placement, color);
            self.target.draw_quad();
        });
    }

    fn preload(&self) -> anyhow::Result<()> {
        self.programs.preload(self.target.ctx())
    }

    fn uses_shaders(&self) -> bool {
        true
    }
}

impl<C: RasterContext> std::fmt::Debug for ShaderDraw2d<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderDraw2d")
            .field("programs", &self.programs)
            .field("draw_calls", &self.draw_call_count())
            .finish()
    }
}
