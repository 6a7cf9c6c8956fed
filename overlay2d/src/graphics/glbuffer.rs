use crate::graphics::{
    glcontext::{BufferId, BufferTarget, RasterContext, VertexArrayId},
    gltypes::{DataLayout, GLTypes, UsageHint},
};

/// Give a hint to the driver on how you intent to use the data.
/// See https://docs.gl/es3/glBufferData
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsageHint {
    StaticDraw,
    StreamDraw,
    DynamicDraw,
}

impl BufferUsageHint {
    pub fn to_gl_enum(&self) -> u32 {
        match self {
            BufferUsageHint::StaticDraw => glow::STATIC_DRAW,
            BufferUsageHint::StreamDraw => glow::STREAM_DRAW,
            BufferUsageHint::DynamicDraw => glow::DYNAMIC_DRAW,
        }
    }
}

/// Corners of the unit quad, as `[x, y, u, v]` rows in triangle strip order.
/// Positions and texcoords both span `[-1, 1]`; the quad shaders scale them by the
/// half extents of a `QuadPlacement`.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 16] = [
    -1.0, -1.0, -1.0,  1.0,
    -1.0,  1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,  1.0,
     1.0,  1.0,  1.0, -1.0,
];

pub const QUAD_VERTEX_COUNT: i32 = 4;

/// Position at location 0, texcoord at location 3.
pub fn quad_layout() -> DataLayout {
    let mut layout = DataLayout::new();
    layout
        .add_field_at(0, "Position", GLTypes::Vec2, Some(UsageHint::Position))
        .add_field_at(3, "Texcoord", GLTypes::Vec2, Some(UsageHint::TexCoord));
    layout
}

/// The quad every UI draw call reuses: one static vertex buffer and the vertex array
/// reading it. Uploaded once and kept for the lifetime of the renderer.
#[derive(Debug)]
pub struct QuadGeometry {
    pub vbo: BufferId,
    pub vao: VertexArrayId,
}

impl QuadGeometry {
    pub fn new(ctx: &dyn RasterContext) -> Result<Self, String> {
        let vbo = ctx.create_buffer()?;
        ctx.bind_buffer(BufferTarget::Array, Some(vbo));
        ctx.buffer_data(
            BufferTarget::Array,
            bytemuck::cast_slice(&QUAD_VERTICES[..]),
            BufferUsageHint::StaticDraw,
        );

        let vao = match ctx.create_vertex_array() {
            Ok(vao) => vao,
            Err(e) => {
                ctx.bind_buffer(BufferTarget::Array, None);
                ctx.delete_buffer(vbo);
                return Err(e);
            }
        };
        ctx.bind_vertex_array(Some(vao));
        Self::bind_attribs(ctx, vbo);
        ctx.bind_vertex_array(None);
        ctx.bind_buffer(BufferTarget::Array, None);

        Ok(Self { vbo, vao })
    }

    /// Points the quad attributes of the currently bound vertex array at `vbo`.
    pub fn bind_attribs(ctx: &dyn RasterContext, vbo: BufferId) {
        ctx.bind_buffer(BufferTarget::Array, Some(vbo));
        for attrib in quad_layout().attribs() {
            ctx.vertex_attrib(&attrib);
        }
    }

    pub fn bind_for_drawing(&self, ctx: &dyn RasterContext) {
        ctx.bind_vertex_array(Some(self.vao));
    }
}

/// Vertex array, vertex buffer and index buffer that only live for one draw call.
/// Everything that was created is deleted on drop, including when construction fails halfway.
pub struct ScratchGeometry<'a> {
    ctx: &'a dyn RasterContext,
    vao: Option<VertexArrayId>,
    vbo: Option<BufferId>,
    ibo: Option<BufferId>,
}

impl<'a> ScratchGeometry<'a> {
    /// Streams `vertices` and `indices` to fresh GPU buffers and binds `layout` on a fresh
    /// vertex array. The vertex array stays bound when this returns.
    pub fn upload(
        ctx: &'a dyn RasterContext,
        layout: &DataLayout,
        vertices: &[u8],
        indices: &[u8],
    ) -> Result<Self, String> {
        if let Some(e) = layout.is_sound(vertices) {
            return Err(format!(
                "The provided data is not sound for the current layout: {e}"
            ));
        }

        let mut scratch = Self {
            ctx,
            vao: None,
            vbo: None,
            ibo: None,
        };

        let vao = ctx.create_vertex_array()?;
        scratch.vao = Some(vao);
        ctx.bind_vertex_array(Some(vao));

        let vbo = ctx.create_buffer()?;
        scratch.vbo = Some(vbo);
        ctx.bind_buffer(BufferTarget::Array, Some(vbo));
        ctx.buffer_data(BufferTarget::Array, vertices, BufferUsageHint::StreamDraw);

        let ibo = ctx.create_buffer()?;
        scratch.ibo = Some(ibo);
        ctx.bind_buffer(BufferTarget::ElementArray, Some(ibo));
        ctx.buffer_data(BufferTarget::ElementArray, indices, BufferUsageHint::StreamDraw);

        for attrib in layout.attribs() {
            ctx.vertex_attrib(&attrib);
        }
        Ok(scratch)
    }
}

impl Drop for ScratchGeometry<'_> {
    fn drop(&mut self) {
        if let Some(vao) = self.vao.take() {
            self.ctx.delete_vertex_array(vao);
        }
        if let Some(vbo) = self.vbo.take() {
            self.ctx.delete_buffer(vbo);
        }
        if let Some(ibo) = self.ibo.take() {
            self.ctx.delete_buffer(ibo);
        }
    }
}

impl std::fmt::Debug for ScratchGeometry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchGeometry")
            .field("vao", &self.vao)
            .field("vbo", &self.vbo)
            .field("ibo", &self.ibo)
            .finish()
    }
}
