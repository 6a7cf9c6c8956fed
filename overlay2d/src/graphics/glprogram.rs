use anyhow::anyhow;

use crate::graphics::{
    glcontext::{ProgramId, RasterContext, TextureId},
    gltexture::ImageAntialiasing,
    gluniforms::{UniformValue, Uniforms},
};

/// Which texture unit a program samples from, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerBinding {
    pub name: &'static str,
    pub slot: u32,
    pub filter: ImageAntialiasing,
}

/// A resident texture about to be sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledTexture {
    pub id: TextureId,
    pub has_mipmaps: bool,
}

pub struct GLProgram {
    program: ProgramId,
    /// Uniforms the program declares, in the order `set_uniforms` expects them.
    pub uniform_names: &'static [&'static str],
    pub sampler: Option<SamplerBinding>,
}

impl GLProgram {
    pub fn use_program(&self, ctx: &dyn RasterContext) {
        ctx.use_program(Some(self.program));
    }

    pub fn id(&self) -> ProgramId {
        self.program
    }

    /// Compiles `vert_src` and `frag_src` with `shader_version` as their first line.
    pub fn from_source(
        ctx: &dyn RasterContext,
        shader_version: &str,
        vert_src: &str,
        frag_src: &str,
        uniform_names: &'static [&'static str],
        sampler: Option<SamplerBinding>,
    ) -> anyhow::Result<Self> {
        let vert = format!("{shader_version}\n{vert_src}");
        let frag = format!("{shader_version}\n{frag_src}");
        let program = ctx
            .create_program(&vert, &frag)
            .map_err(|e| anyhow!("Cannot build 2D program: {e}"))?;
        log::debug!(
            "Compiled 2D program {program:?} with uniforms {uniform_names:?}"
        );

        Ok(Self {
            program,
            uniform_names,
            sampler,
        })
    }

    /// Assumes that the program is already in use.
    pub fn set_uniforms(&self, ctx: &dyn RasterContext, uniforms: &Uniforms) {
        debug_assert!(
            uniforms.names().all(|n| self.uniform_names.contains(&n)),
            "uniforms {:?} are not all declared by this program ({:?})",
            uniforms.names().collect::<Vec<_>>(),
            self.uniform_names
        );
        for (uniform_name, uniform_value) in &uniforms.data {
            if !ctx.set_uniform(self.program, uniform_name, uniform_value) {
                log::debug!("The uniform {uniform_name} is not active in {:?}", self.program);
            }
        }
    }

    /// Binds `texture` to the program's sampler unit. Assumes that the program is already in use.
    pub fn set_texture_units(&self, ctx: &dyn RasterContext, texture: SampledTexture) {
        let Some(sampler) = self.sampler else {
            return;
        };
        let filter = sampler.filter.for_texture(texture.has_mipmaps);
        ctx.bind_texture(sampler.slot, texture.id, filter);
        ctx.set_uniform(self.program, sampler.name, &UniformValue::Int(sampler.slot as i32));
    }
}

impl std::fmt::Debug for GLProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GLProgram")
            .field("program", &self.program)
            .field("uniform_names", &self.uniform_names)
            .field("sampler", &self.sampler)
            .finish()
    }
}
