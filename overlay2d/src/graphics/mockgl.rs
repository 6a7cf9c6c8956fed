//! Recording stand-ins for the GL context and the platform driver, used by the tests.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::graphics::{
    color::{Color, CornerColors},
    coords::{Rect, ScissorBox, ScreenSize},
    draw2d::PrimitiveList,
    glbuffer::BufferUsageHint,
    glcontext::{
        BlendFunc, BufferId, BufferTarget, ProgramId, RasterContext, TextureId, VertexArrayId,
    },
    gltexture::{GpuTexture, ImageAntialiasing},
    gltypes::{IndexWidth, PrimitiveTopology, VertexAttrib, VertexLayout},
    gluniforms::UniformValue,
    legacydraw::LegacyDriver,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateProgram(ProgramId),
    UseProgram(Option<ProgramId>),
    SetUniform(ProgramId, String, UniformValue),
    CreateTexture {
        id: TextureId,
        width: u32,
        height: u32,
    },
    BindTexture {
        slot: u32,
        texture: TextureId,
        filter: ImageAntialiasing,
    },
    DeleteTexture(TextureId),
    CreateVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    DeleteVertexArray(VertexArrayId),
    CreateBuffer(BufferId),
    BindBuffer(BufferTarget, Option<BufferId>),
    BufferData {
        target: BufferTarget,
        data: Vec<u8>,
        usage: BufferUsageHint,
    },
    BufferSubData {
        target: BufferTarget,
        offset: usize,
        data: Vec<u8>,
    },
    DeleteBuffer(BufferId),
    VertexAttrib(VertexAttrib),
    SetBlend(Option<BlendFunc>),
    SetScissor(Option<ScissorBox>),
    DrawArrays {
        mode: PrimitiveTopology,
        first: i32,
        count: i32,
    },
    DrawElements {
        mode: PrimitiveTopology,
        count: i32,
        index_width: IndexWidth,
    },
    ClearError,
}

#[derive(Debug, Default)]
struct State {
    screen: Option<ScreenSize>,
    no_shaders: bool,
    calls: Vec<GlCall>,
    next_id: u32,
    programs: HashMap<ProgramId, (String, String)>,
    live_buffers: Vec<BufferId>,
    live_vertex_arrays: Vec<VertexArrayId>,
    compile_error: Option<String>,
    buffers_left: Option<usize>,
}

impl State {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// A `RasterContext` that records every call. Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    state: Rc<RefCell<State>>,
}

impl RecordingContext {
    pub fn new(width: u32, height: u32) -> Self {
        let ctx = Self::default();
        ctx.state.borrow_mut().screen = Some(ScreenSize::new(width, height));
        ctx
    }

    /// A context reporting no shader support, as an old fixed-function driver would.
    pub fn without_shaders(width: u32, height: u32) -> Self {
        let ctx = Self::new(width, height);
        ctx.state.borrow_mut().no_shaders = true;
        ctx
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Number of draw calls (array or indexed) issued so far.
    pub fn draw_calls(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, GlCall::DrawArrays { .. } | GlCall::DrawElements { .. }))
            .count()
    }

    /// Uniforms set since the last `clear_calls`, latest value per name.
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.state.borrow().calls.iter().rev().find_map(|c| match c {
            GlCall::SetUniform(_, n, value) if n == name => Some(*value),
            _ => None,
        })
    }

    /// Buffers created and not deleted yet, in creation order.
    pub fn live_buffers(&self) -> Vec<BufferId> {
        self.state.borrow().live_buffers.clone()
    }

    /// Vertex arrays created and not deleted yet, in creation order.
    pub fn live_vertex_arrays(&self) -> Vec<VertexArrayId> {
        self.state.borrow().live_vertex_arrays.clone()
    }

    /// Lets `count` more buffer creations succeed, then fails every following one.
    pub fn fail_buffer_creation_after(&self, count: usize) {
        self.state.borrow_mut().buffers_left = Some(count);
    }

    /// Makes every following program compilation fail with `log`.
    pub fn fail_compilation(&self, log: &str) {
        self.state.borrow_mut().compile_error = Some(log.to_string());
    }

    /// The sources a program was compiled from, as `(vertex, fragment)`.
    pub fn program_sources(&self, program: ProgramId) -> Option<(String, String)> {
        self.state.borrow().programs.get(&program).cloned()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl RasterContext for RecordingContext {
    fn screen_size(&self) -> ScreenSize {
        self.state
            .borrow()
            .screen
            .unwrap_or(ScreenSize::new(800, 600))
    }

    fn supports_shaders(&self) -> bool {
        !self.state.borrow().no_shaders
    }

    fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<ProgramId, String> {
        let mut state = self.state.borrow_mut();
        if let Some(log) = &state.compile_error {
            return Err(log.clone());
        }
        let id = ProgramId(state.next_id());
        state
            .programs
            .insert(id, (vert_src.to_string(), frag_src.to_string()));
        state.calls.push(GlCall::CreateProgram(id));
        Ok(id)
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.record(GlCall::UseProgram(program));
    }

    fn set_uniform(&self, program: ProgramId, name: &str, value: &UniformValue) -> bool {
        self.record(GlCall::SetUniform(program, name.to_string(), *value));
        true
    }

    fn create_texture_rgba(&self, _pixels: &[u8], width: u32, height: u32) -> Result<TextureId, String> {
        let mut state = self.state.borrow_mut();
        let id = TextureId(state.next_id());
        state.calls.push(GlCall::CreateTexture { id, width, height });
        Ok(id)
    }

    fn bind_texture(&self, slot: u32, texture: TextureId, filter: ImageAntialiasing) {
        self.record(GlCall::BindTexture {
            slot,
            texture,
            filter,
        });
    }

    fn delete_texture(&self, texture: TextureId) {
        self.record(GlCall::DeleteTexture(texture));
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        let mut state = self.state.borrow_mut();
        let id = VertexArrayId(state.next_id());
        state.live_vertex_arrays.push(id);
        state.calls.push(GlCall::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayId>) {
        self.record(GlCall::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: VertexArrayId) {
        self.state.borrow_mut().live_vertex_arrays.retain(|v| *v != vao);
        self.record(GlCall::DeleteVertexArray(vao));
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        let mut state = self.state.borrow_mut();
        match state.buffers_left {
            Some(0) => return Err("out of buffer names".to_string()),
            Some(left) => state.buffers_left = Some(left - 1),
            None => {}
        }
        let id = BufferId(state.next_id());
        state.live_buffers.push(id);
        state.calls.push(GlCall::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        self.record(GlCall::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsageHint) {
        self.record(GlCall::BufferData {
            target,
            data: data.to_vec(),
            usage,
        });
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        self.record(GlCall::BufferSubData {
            target,
            offset,
            data: data.to_vec(),
        });
    }

    fn delete_buffer(&self, buffer: BufferId) {
        self.state.borrow_mut().live_buffers.retain(|b| *b != buffer);
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn vertex_attrib(&self, attrib: &VertexAttrib) {
        self.record(GlCall::VertexAttrib(*attrib));
    }

    fn set_blend(&self, blend: Option<BlendFunc>) {
        self.record(GlCall::SetBlend(blend));
    }

    fn set_scissor(&self, scissor: Option<ScissorBox>) {
        self.record(GlCall::SetScissor(scissor));
    }

    fn draw_arrays(&self, mode: PrimitiveTopology, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }

    fn draw_elements(&self, mode: PrimitiveTopology, count: i32, index_width: IndexWidth) {
        self.record(GlCall::DrawElements {
            mode,
            count,
            index_width,
        });
    }

    fn clear_error(&self) {
        self.record(GlCall::ClearError);
    }
}

/// What the driver was handed as a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSnapshot {
    pub handle: Option<TextureId>,
    pub size: (u32, u32),
    pub is_render_target: bool,
}

impl TextureSnapshot {
    fn of(texture: &dyn GpuTexture) -> Self {
        Self {
            handle: texture.native_handle(),
            size: texture.size(),
            is_render_target: texture.is_render_target(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LegacyCall {
    Image {
        texture: TextureSnapshot,
        dest: Rect<i32>,
        source: Rect<i32>,
        clip: Option<Rect<i32>>,
        colors: Option<CornerColors>,
        use_alpha_channel_of_texture: bool,
    },
    PrimitiveList {
        vertex_bytes: usize,
        vertex_count: u32,
        index_bytes: usize,
        primitive_count: u32,
        vertex_layout: VertexLayout,
        topology: PrimitiveTopology,
        index_width: IndexWidth,
    },
    Rectangle {
        color: Color,
        dest: Rect<i32>,
        clip: Option<Rect<i32>>,
    },
}

/// A `LegacyDriver` that records every call. Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    calls: Rc<RefCell<Vec<LegacyCall>>>,
}

impl RecordingDriver {
    pub fn calls(&self) -> Vec<LegacyCall> {
        self.calls.borrow().clone()
    }
}

impl LegacyDriver for RecordingDriver {
    fn draw_2d_image(
        &self,
        texture: &dyn GpuTexture,
        dest: Rect<i32>,
        source: Rect<i32>,
        clip: Option<&Rect<i32>>,
        colors: Option<&CornerColors>,
        use_alpha_channel_of_texture: bool,
    ) {
        self.calls.borrow_mut().push(LegacyCall::Image {
            texture: TextureSnapshot::of(texture),
            dest,
            source,
            clip: clip.copied(),
            colors: colors.copied(),
            use_alpha_channel_of_texture,
        });
    }

    fn draw_2d_vertex_primitive_list(&self, list: &PrimitiveList<'_>) {
        self.calls.borrow_mut().push(LegacyCall::PrimitiveList {
            vertex_bytes: list.vertices.len(),
            vertex_count: list.vertex_count,
            index_bytes: list.indices.len(),
            primitive_count: list.primitive_count,
            vertex_layout: list.vertex_layout,
            topology: list.topology,
            index_width: list.index_width,
        });
    }

    fn draw_2d_rectangle(&self, color: Color, dest: Rect<i32>, clip: Option<&Rect<i32>>) {
        self.calls.borrow_mut().push(LegacyCall::Rectangle {
            color,
            dest,
            clip: clip.copied(),
        });
    }
}
