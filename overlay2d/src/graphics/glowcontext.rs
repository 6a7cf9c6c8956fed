use std::{cell::Cell, num::NonZeroU32, sync::Arc};

use glow::{HasContext, PixelUnpackData};

use crate::graphics::{
    coords::{ScissorBox, ScreenSize},
    glbuffer::BufferUsageHint,
    glcontext::{
        BlendFactor, BlendFunc, BufferId, BufferTarget, ProgramId, RasterContext, TextureId,
        VertexArrayId,
    },
    gltexture::ImageAntialiasing,
    gltypes::{AttribKind, IndexWidth, PrimitiveTopology, VertexAttrib},
    gluniforms::UniformValue,
};

fn native_id(id: u32) -> Option<NonZeroU32> {
    NonZeroU32::new(id)
}

fn program(id: ProgramId) -> Option<glow::NativeProgram> {
    native_id(id.0).map(glow::NativeProgram)
}

fn texture(id: TextureId) -> Option<glow::NativeTexture> {
    native_id(id.0).map(glow::NativeTexture)
}

fn buffer(id: BufferId) -> Option<glow::NativeBuffer> {
    native_id(id.0).map(glow::NativeBuffer)
}

fn vertex_array(id: VertexArrayId) -> Option<glow::NativeVertexArray> {
    native_id(id.0).map(glow::NativeVertexArray)
}

impl BufferTarget {
    pub fn to_gl_enum(&self) -> u32 {
        match self {
            BufferTarget::Array => glow::ARRAY_BUFFER,
            BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl BlendFactor {
    pub fn to_gl_enum(&self) -> u32 {
        match self {
            BlendFactor::One => glow::ONE,
            BlendFactor::SrcAlpha => glow::SRC_ALPHA,
            BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
        }
    }
}

/// `RasterContext` over a glow OpenGL (ES) context.
pub struct GlowContext {
    gl: Arc<glow::Context>,
    screen_size: Cell<ScreenSize>,
    shaders: bool,
}

impl GlowContext {
    /// Shaders are considered available from GL (ES) 3.0 on, which is the first version
    /// with integer vertex attributes.
    pub fn new(gl: &Arc<glow::Context>, screen_size: ScreenSize) -> Self {
        let version = gl.version();
        let shaders = version.major >= 3;
        log::debug!(
            "GL {}.{} (es: {}), shaders available: {shaders}",
            version.major,
            version.minor,
            version.is_embedded
        );
        Self {
            gl: gl.clone(),
            screen_size: Cell::new(screen_size),
            shaders,
        }
    }

    /// Call this when the window is resized.
    pub fn set_screen_size(&self, screen_size: ScreenSize) {
        self.screen_size.set(screen_size);
    }

    pub fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }
}

impl RasterContext for GlowContext {
    fn screen_size(&self) -> ScreenSize {
        self.screen_size.get()
    }

    fn supports_shaders(&self) -> bool {
        self.shaders
    }

    fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<ProgramId, String> {
        let gl = self.gl.as_ref();
        unsafe {
            let program = gl.create_program()?;

            let shaders = [
                (glow::VERTEX_SHADER, vert_src),
                (glow::FRAGMENT_SHADER, frag_src),
            ];
            let mut shader_ids = Vec::with_capacity(shaders.len());

            for (shader_type, shader_source) in shaders.iter() {
                let shader = gl.create_shader(*shader_type)?;
                gl.shader_source(shader, shader_source);
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    let info = gl.get_shader_info_log(shader);
                    gl.delete_shader(shader);
                    for shader in shader_ids {
                        gl.delete_shader(shader);
                    }
                    gl.delete_program(program);
                    return Err(format!("Failed to compile shader: {info}"));
                }
                gl.attach_shader(program, shader);
                shader_ids.push(shader);
            }

            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            for shader in shader_ids {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }
            if !linked {
                let info = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(format!("Failed to link program: {info}"));
            }

            Ok(ProgramId(program.0.get()))
        }
    }

    fn use_program(&self, id: Option<ProgramId>) {
        unsafe { self.gl.use_program(id.and_then(program)) };
    }

    fn set_uniform(&self, id: ProgramId, name: &str, value: &UniformValue) -> bool {
        let gl = self.gl.as_ref();
        let Some(p) = program(id) else {
            return false;
        };
        unsafe {
            let Some(location) = gl.get_uniform_location(p, name) else {
                return false;
            };
            match value {
                UniformValue::Float(v) => {
                    gl.uniform_1_f32(Some(&location), *v);
                }
                UniformValue::Vec2(v) => {
                    gl.uniform_2_f32(Some(&location), v[0], v[1]);
                }
                UniformValue::Vec4(v) => {
                    gl.uniform_4_f32(Some(&location), v[0], v[1], v[2], v[3]);
                }
                UniformValue::Int(v) => {
                    gl.uniform_1_i32(Some(&location), *v);
                }
            }
        }
        true
    }

    fn create_texture_rgba(&self, pixels: &[u8], width: u32, height: u32) -> Result<TextureId, String> {
        let gl = self.gl.as_ref();
        let expected = width as usize * height as usize * 4;
        if pixels.len() < expected {
            return Err(format!(
                "Expected {expected} bytes for a {width}x{height} RGBA texture, got {}",
                pixels.len()
            ));
        }
        unsafe {
            let tex = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(tex));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(&pixels[..expected])),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(TextureId(tex.0.get()))
        }
    }

    fn bind_texture(&self, slot: u32, id: TextureId, filter: ImageAntialiasing) {
        let gl = self.gl.as_ref();
        unsafe {
            gl.active_texture(glow::TEXTURE0 + slot);
            gl.bind_texture(glow::TEXTURE_2D, texture(id));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter.min_filter());
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter.mag_filter());
        }
    }

    fn delete_texture(&self, id: TextureId) {
        if let Some(t) = texture(id) {
            unsafe { self.gl.delete_texture(t) };
        }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        let vao = unsafe { self.gl.create_vertex_array()? };
        Ok(VertexArrayId(vao.0.get()))
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayId>) {
        unsafe { self.gl.bind_vertex_array(vao.and_then(vertex_array)) };
    }

    fn delete_vertex_array(&self, vao: VertexArrayId) {
        if let Some(v) = vertex_array(vao) {
            unsafe { self.gl.delete_vertex_array(v) };
        }
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        let vbo = unsafe { self.gl.create_buffer()? };
        Ok(BufferId(vbo.0.get()))
    }

    fn bind_buffer(&self, target: BufferTarget, id: Option<BufferId>) {
        unsafe {
            self.gl
                .bind_buffer(target.to_gl_enum(), id.and_then(buffer))
        };
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsageHint) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(target.to_gl_enum(), data, usage.to_gl_enum())
        };
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_sub_data_u8_slice(target.to_gl_enum(), offset as i32, data)
        };
    }

    fn delete_buffer(&self, id: BufferId) {
        if let Some(b) = buffer(id) {
            unsafe { self.gl.delete_buffer(b) };
        }
    }

    fn vertex_attrib(&self, attrib: &VertexAttrib) {
        let gl = self.gl.as_ref();
        unsafe {
            match attrib.kind {
                AttribKind::Float => gl.vertex_attrib_pointer_f32(
                    attrib.location,
                    attrib.components,
                    glow::FLOAT,
                    false,
                    attrib.stride,
                    attrib.offset,
                ),
                AttribKind::NormalizedU8 => gl.vertex_attrib_pointer_f32(
                    attrib.location,
                    attrib.components,
                    glow::UNSIGNED_BYTE,
                    true,
                    attrib.stride,
                    attrib.offset,
                ),
                AttribKind::UnsignedInt => gl.vertex_attrib_pointer_i32(
                    attrib.location,
                    attrib.components,
                    glow::UNSIGNED_INT,
                    attrib.stride,
                    attrib.offset,
                ),
            }
            gl.enable_vertex_attrib_array(attrib.location);
        }
    }

    fn set_blend(&self, blend: Option<BlendFunc>) {
        let gl = self.gl.as_ref();
        unsafe {
            match blend {
                Some(func) => {
                    gl.enable(glow::BLEND);
                    gl.blend_func(func.src.to_gl_enum(), func.dst.to_gl_enum());
                }
                None => gl.disable(glow::BLEND),
            }
        }
    }

    fn set_scissor(&self, scissor: Option<ScissorBox>) {
        let gl = self.gl.as_ref();
        unsafe {
            match scissor {
                Some(s) => {
                    gl.enable(glow::SCISSOR_TEST);
                    gl.scissor(s.x, s.y, s.width, s.height);
                }
                None => gl.disable(glow::SCISSOR_TEST),
            }
        }
    }

    fn draw_arrays(&self, mode: PrimitiveTopology, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode.to_gl_enum(), first, count) };
    }

    fn draw_elements(&self, mode: PrimitiveTopology, count: i32, index_width: IndexWidth) {
        unsafe {
            self.gl
                .draw_elements(mode.to_gl_enum(), count, index_width.to_gl_enum(), 0)
        };
    }

    fn clear_error(&self) {
        unsafe {
            self.gl.get_error();
        }
    }
}

impl std::fmt::Debug for GlowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowContext")
            .field("screen_size", &self.screen_size.get())
            .field("shaders", &self.shaders)
            .finish_non_exhaustive()
    }
}
