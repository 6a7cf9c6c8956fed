pub mod color;
pub mod coords;

pub mod glbuffer;
pub mod glcontext;
pub mod gldraw;
pub mod glowcontext;
pub mod glprogram;
pub mod gltexture;
pub mod gltypes;
pub mod gluniforms;

pub mod draw2d;
pub mod legacydraw;
pub mod quadshaders;
pub mod shaderdraw;
pub mod shadersources;

#[cfg(test)]
pub(crate) mod mockgl;
