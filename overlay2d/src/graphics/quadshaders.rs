use std::cell::OnceCell;

use anyhow::anyhow;

use crate::graphics::{
    color::{Color, CornerColors},
    coords::{QuadPlacement, ScreenSize},
    glbuffer::{BufferUsageHint, QuadGeometry},
    glcontext::{BufferId, BufferTarget, RasterContext, VertexArrayId},
    glprogram::{GLProgram, SampledTexture, SamplerBinding},
    gltexture::ImageAntialiasing,
    gltypes::{DataLayout, GLTypes, UsageHint},
    gluniforms::{UniformValue, Uniforms},
    shadersources::{
        COLOR_TEXTURED_QUAD_FRAG_SHADER_SOURCE, COLOR_TEXTURED_QUAD_VERTEX_SHADER_SOURCE,
        COLORED_QUAD_FRAG_SHADER_SOURCE, COLORED_QUAD_VERTEX_SHADER_SOURCE,
        PRIMITIVE_LIST_VERTEX_SHADER_SOURCE, TEXTURED_QUAD_FRAG_SHADER_SOURCE,
        TEXTURED_QUAD_VERTEX_SHADER_SOURCE, TRANSPARENT_FRAG_SHADER_SOURCE,
        UNIFORM_COLOR_TEXTURED_QUAD_FRAG_SHADER_SOURCE,
    },
};

const QUAD_UNIFORMS: &[&str] = &["center", "size", "texcenter", "texsize"];
const UNIFORM_COLOR_QUAD_UNIFORMS: &[&str] = &["center", "size", "texcenter", "texsize", "color"];
const COLORED_RECT_UNIFORMS: &[&str] = &["center", "size", "color"];
const PRIMITIVE_LIST_UNIFORMS: &[&str] = &["custom_alpha", "screen_size"];

/// Colors the per-corner buffer holds before the first colored draw.
const DEFAULT_CORNER_COLORS: CornerColors = CornerColors([
    Color::rgba(0, 0, 0, 255),
    Color::rgba(255, 0, 0, 255),
    Color::rgba(0, 255, 0, 255),
    Color::rgba(0, 0, 255, 255),
]);

fn tex_sampler(filter: ImageAntialiasing) -> Option<SamplerBinding> {
    Some(SamplerBinding {
        name: "tex",
        slot: 0,
        filter,
    })
}

fn placement_uniforms(placement: &QuadPlacement) -> Uniforms {
    let mut uniforms = Uniforms::new();
    uniforms
        .add("center", UniformValue::Vec2(placement.center))
        .add("size", UniformValue::Vec2(placement.size))
        .add("texcenter", UniformValue::Vec2(placement.tex_center))
        .add("texsize", UniformValue::Vec2(placement.tex_size));
    uniforms
}

/// Arbitrary textured primitive lists, with a global alpha multiplier.
#[derive(Debug)]
pub struct Primitive2dListShader {
    program: GLProgram,
}

impl Primitive2dListShader {
    fn new(ctx: &dyn RasterContext, version: &str, filter: ImageAntialiasing) -> anyhow::Result<Self> {
        let program = GLProgram::from_source(
            ctx,
            version,
            PRIMITIVE_LIST_VERTEX_SHADER_SOURCE,
            TRANSPARENT_FRAG_SHADER_SOURCE,
            PRIMITIVE_LIST_UNIFORMS,
            tex_sampler(filter),
        )?;
        Ok(Self { program })
    }

    pub fn activate(&self, ctx: &dyn RasterContext) {
        self.program.use_program(ctx);
    }

    pub fn set_uniforms(&self, ctx: &dyn RasterContext, custom_alpha: f32, screen: ScreenSize) {
        let mut uniforms = Uniforms::new();
        uniforms
            .add("custom_alpha", UniformValue::Float(custom_alpha))
            .add(
                "screen_size",
                UniformValue::Vec2([screen.width as f32, screen.height as f32]),
            );
        self.program.set_uniforms(ctx, &uniforms);
    }

    pub fn set_texture_units(&self, ctx: &dyn RasterContext, texture: SampledTexture) {
        self.program.set_texture_units(ctx, texture);
    }
}

/// Textured quad modulated by one color per corner.
///
/// Owns its vertex array: the shared quad buffer at locations 0 and 3, plus a small
/// dynamic buffer of four `uvec4` colors at location 2.
#[derive(Debug)]
pub struct ColoredTextureRectShader {
    program: GLProgram,
    pub color_vbo: BufferId,
    pub vao: VertexArrayId,
}

impl ColoredTextureRectShader {
    fn new(
        ctx: &dyn RasterContext,
        version: &str,
        filter: ImageAntialiasing,
        quad: &QuadGeometry,
    ) -> anyhow::Result<Self> {
        let program = GLProgram::from_source(
            ctx,
            version,
            COLOR_TEXTURED_QUAD_VERTEX_SHADER_SOURCE,
            COLOR_TEXTURED_QUAD_FRAG_SHADER_SOURCE,
            QUAD_UNIFORMS,
            tex_sampler(filter),
        )?;

        let vao = ctx.create_vertex_array().map_err(|e| anyhow!(e))?;
        ctx.bind_vertex_array(Some(vao));
        QuadGeometry::bind_attribs(ctx, quad.vbo);

        let color_vbo = match ctx.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                ctx.bind_vertex_array(None);
                ctx.delete_vertex_array(vao);
                return Err(anyhow!(e));
            }
        };
        ctx.bind_buffer(BufferTarget::Array, Some(color_vbo));
        ctx.buffer_data(
            BufferTarget::Array,
            bytemuck::cast_slice(&DEFAULT_CORNER_COLORS.to_attrib_rows()[..]),
            BufferUsageHint::DynamicDraw,
        );
        let mut color_layout = DataLayout::new();
        color_layout.add_field_at(2, "Color", GLTypes::UVec4, Some(UsageHint::Color));
        for attrib in color_layout.attribs() {
            ctx.vertex_attrib(&attrib);
        }
        ctx.bind_vertex_array(None);
        ctx.bind_buffer(BufferTarget::Array, None);

        Ok(Self {
            program,
            color_vbo,
            vao,
        })
    }

    /// Replaces the four corner colors used by the next draw.
    pub fn upload_colors(&self, ctx: &dyn RasterContext, colors: &CornerColors) {
        ctx.bind_buffer(BufferTarget::Array, Some(self.color_vbo));
        ctx.buffer_sub_data(
            BufferTarget::Array,
            0,
            bytemuck::cast_slice(&colors.to_attrib_rows()[..]),
        );
    }

    /// Uses the program and binds its vertex array.
    pub fn activate(&self, ctx: &dyn RasterContext) {
        self.program.use_program(ctx);
        ctx.bind_vertex_array(Some(self.vao));
    }

    pub fn set_texture_units(&self, ctx: &dyn RasterContext, texture: SampledTexture) {
        self.program.set_texture_units(ctx, texture);
    }

    pub fn set_uniforms(&self, ctx: &dyn RasterContext, placement: &QuadPlacement) {
        self.program.set_uniforms(ctx, &placement_uniforms(placement));
    }
}

/// Textured quad multiplied by a single color.
#[derive(Debug)]
pub struct UniformColoredTextureRectShader {
    program: GLProgram,
}

impl UniformColoredTextureRectShader {
    fn new(ctx: &dyn RasterContext, version: &str, filter: ImageAntialiasing) -> anyhow::Result<Self> {
        let program = GLProgram::from_source(
            ctx,
            version,
            TEXTURED_QUAD_VERTEX_SHADER_SOURCE,
            UNIFORM_COLOR_TEXTURED_QUAD_FRAG_SHADER_SOURCE,
            UNIFORM_COLOR_QUAD_UNIFORMS,
            tex_sampler(filter),
        )?;
        Ok(Self { program })
    }

    pub fn activate(&self, ctx: &dyn RasterContext) {
        self.program.use_program(ctx);
    }

    pub fn set_texture_units(&self, ctx: &dyn RasterContext, texture: SampledTexture) {
        self.program.set_texture_units(ctx, texture);
    }

    pub fn set_uniforms(&self, ctx: &dyn RasterContext, placement: &QuadPlacement, color: Color) {
        let mut uniforms = placement_uniforms(placement);
        uniforms.add("color", UniformValue::Vec4(color.to_vec4()));
        self.program.set_uniforms(ctx, &uniforms);
    }
}

/// Textured quad, no color modulation.
#[derive(Debug)]
pub struct TextureRectShader {
    program: GLProgram,
}

impl TextureRectShader {
    fn new(ctx: &dyn RasterContext, version: &str, filter: ImageAntialiasing) -> anyhow::Result<Self> {
        let program = GLProgram::from_source(
            ctx,
            version,
            TEXTURED_QUAD_VERTEX_SHADER_SOURCE,
            TEXTURED_QUAD_FRAG_SHADER_SOURCE,
            QUAD_UNIFORMS,
            tex_sampler(filter),
        )?;
        Ok(Self { program })
    }

    pub fn activate(&self, ctx: &dyn RasterContext) {
        self.program.use_program(ctx);
    }

    pub fn set_texture_units(&self, ctx: &dyn RasterContext, texture: SampledTexture) {
        self.program.set_texture_units(ctx, texture);
    }

    pub fn set_uniforms(&self, ctx: &dyn RasterContext, placement: &QuadPlacement) {
        self.program.set_uniforms(ctx, &placement_uniforms(placement));
    }
}

/// Flat colored quad, no texture.
#[derive(Debug)]
pub struct ColoredRectShader {
    program: GLProgram,
}

impl ColoredRectShader {
    fn new(ctx: &dyn RasterContext, version: &str) -> anyhow::Result<Self> {
        let program = GLProgram::from_source(
            ctx,
            version,
            COLORED_QUAD_VERTEX_SHADER_SOURCE,
            COLORED_QUAD_FRAG_SHADER_SOURCE,
            COLORED_RECT_UNIFORMS,
            None,
        )?;
        Ok(Self { program })
    }

    pub fn activate(&self, ctx: &dyn RasterContext) {
        self.program.use_program(ctx);
    }

    pub fn set_uniforms(&self, ctx: &dyn RasterContext, placement: &QuadPlacement, color: Color) {
        let mut uniforms = Uniforms::new();
        uniforms
            .add("center", UniformValue::Vec2(placement.center))
            .add("size", UniformValue::Vec2(placement.size))
            .add("color", UniformValue::Vec4(color.to_vec4()));
        self.program.set_uniforms(ctx, &uniforms);
    }
}

fn get_or_try_init<'a, T>(
    cell: &'a OnceCell<T>,
    init: impl FnOnce() -> anyhow::Result<T>,
) -> anyhow::Result<&'a T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}

/// The 2D programs and the shared quad, each built on first use and then kept.
pub struct ShaderPrograms {
    shader_version: String,
    filter: ImageAntialiasing,

    quad: OnceCell<QuadGeometry>,
    primitive_list: OnceCell<Primitive2dListShader>,
    colored_texture_rect: OnceCell<ColoredTextureRectShader>,
    uniform_colored_texture_rect: OnceCell<UniformColoredTextureRectShader>,
    texture_rect: OnceCell<TextureRectShader>,
    colored_rect: OnceCell<ColoredRectShader>,
}

impl ShaderPrograms {
    pub fn new(shader_version: &str, filter: ImageAntialiasing) -> Self {
        Self {
            shader_version: shader_version.to_string(),
            filter,
            quad: OnceCell::new(),
            primitive_list: OnceCell::new(),
            colored_texture_rect: OnceCell::new(),
            uniform_colored_texture_rect: OnceCell::new(),
            texture_rect: OnceCell::new(),
            colored_rect: OnceCell::new(),
        }
    }

    pub fn quad(&self, ctx: &dyn RasterContext) -> anyhow::Result<&QuadGeometry> {
        get_or_try_init(&self.quad, || {
            QuadGeometry::new(ctx).map_err(|e| anyhow!("Cannot upload the UI quad: {e}"))
        })
    }

    pub fn primitive_list(&self, ctx: &dyn RasterContext) -> anyhow::Result<&Primitive2dListShader> {
        get_or_try_init(&self.primitive_list, || {
            Primitive2dListShader::new(ctx, &self.shader_version, self.filter)
        })
    }

    pub fn colored_texture_rect(
        &self,
        ctx: &dyn RasterContext,
    ) -> anyhow::Result<&ColoredTextureRectShader> {
        let quad = self.quad(ctx)?;
        get_or_try_init(&self.colored_texture_rect, || {
            ColoredTextureRectShader::new(ctx, &self.shader_version, self.filter, quad)
        })
    }

    pub fn uniform_colored_texture_rect(
        &self,
        ctx: &dyn RasterContext,
    ) -> anyhow::Result<&UniformColoredTextureRectShader> {
        get_or_try_init(&self.uniform_colored_texture_rect, || {
            UniformColoredTextureRectShader::new(ctx, &self.shader_version, self.filter)
        })
    }

    pub fn texture_rect(&self, ctx: &dyn RasterContext) -> anyhow::Result<&TextureRectShader> {
        get_or_try_init(&self.texture_rect, || {
            TextureRectShader::new(ctx, &self.shader_version, self.filter)
        })
    }

    pub fn colored_rect(&self, ctx: &dyn RasterContext) -> anyhow::Result<&ColoredRectShader> {
        get_or_try_init(&self.colored_rect, || {
            ColoredRectShader::new(ctx, &self.shader_version)
        })
    }

    /// Builds everything now, so that a broken shader aborts startup instead of the first frame.
    pub fn preload(&self, ctx: &dyn RasterContext) -> anyhow::Result<()> {
        self.quad(ctx)?;
        self.primitive_list(ctx)?;
        self.colored_texture_rect(ctx)?;
        self.uniform_colored_texture_rect(ctx)?;
        self.texture_rect(ctx)?;
        self.colored_rect(ctx)?;
        Ok(())
    }

    pub fn shader_version(&self) -> &str {
        &self.shader_version
    }
}

impl std::fmt::Debug for ShaderPrograms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderPrograms")
            .field("shader_version", &self.shader_version)
            .field("filter", &self.filter)
            .field("quad", &self.quad.get().is_some())
            .finish_non_exhaustive()
    }
}
