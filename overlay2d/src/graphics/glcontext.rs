use crate::graphics::{
    coords::{ScissorBox, ScreenSize},
    glbuffer::BufferUsageHint,
    gltexture::ImageAntialiasing,
    gltypes::{IndexWidth, PrimitiveTopology, VertexAttrib},
    gluniforms::UniformValue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFunc {
    /// Standard "over" compositing using the source alpha.
    pub const ALPHA: BlendFunc = BlendFunc {
        src: BlendFactor::SrcAlpha,
        dst: BlendFactor::OneMinusSrcAlpha,
    };
    /// Light-like accumulation, used for translucent glows.
    pub const ADDITIVE: BlendFunc = BlendFunc {
        src: BlendFactor::SrcAlpha,
        dst: BlendFactor::One,
    };
}

/// The slice of a GL context the 2D overlay needs.
///
/// Every call goes to the single context current on the rendering thread, in issue order.
/// `GlowContext` is the real implementation; the drawing code never sees backend types.
pub trait RasterContext {
    /// Size of the screen the overlay draws on, in pixels.
    fn screen_size(&self) -> ScreenSize;
    /// Whether programmable shaders are available. When they are not, drawing goes
    /// through the platform driver's fixed-function path instead.
    fn supports_shaders(&self) -> bool;

    /// Compiles and links a program from complete sources (version line included).
    fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<ProgramId, String>;
    fn use_program(&self, program: Option<ProgramId>);
    /// Sets a uniform of the program currently in use.
    /// Returns false when the program has no active uniform of that name.
    fn set_uniform(&self, program: ProgramId, name: &str, value: &UniformValue) -> bool;

    fn create_texture_rgba(&self, pixels: &[u8], width: u32, height: u32) -> Result<TextureId, String>;
    fn bind_texture(&self, slot: u32, texture: TextureId, filter: ImageAntialiasing);
    fn delete_texture(&self, texture: TextureId);

    fn create_vertex_array(&self) -> Result<VertexArrayId, String>;
    fn bind_vertex_array(&self, vao: Option<VertexArrayId>);
    fn delete_vertex_array(&self, vao: VertexArrayId);

    fn create_buffer(&self) -> Result<BufferId, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>);
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsageHint);
    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]);
    fn delete_buffer(&self, buffer: BufferId);
    /// Enables and points a vertex attribute at the buffer bound to `BufferTarget::Array`.
    fn vertex_attrib(&self, attrib: &VertexAttrib);

    /// `None` disables blending.
    fn set_blend(&self, blend: Option<BlendFunc>);
    /// `None` disables the scissor test.
    fn set_scissor(&self, scissor: Option<ScissorBox>);

    fn draw_arrays(&self, mode: PrimitiveTopology, first: i32, count: i32);
    /// Draws from the bound element buffer, starting at offset 0.
    fn draw_elements(&self, mode: PrimitiveTopology, count: i32, index_width: IndexWidth);

    /// Fetches and discards the pending error flag.
    fn clear_error(&self);
}
