//! Mesh collaborators consumed by [`crate::scene::Object`].

use std::path::Path;
use anyhow::Result;

use crate::shader::Shader;

/// A drawable piece of geometry owned by an object.
pub trait Mesh {
    /// One-time upload of geometry to the rendering backend.
    fn init(&mut self);

    /// Issues the draw calls for this mesh using state already configured on `shader`.
    fn draw<S: Shader + ?Sized>(&self, shader: &S);
}

/// Produces the meshes stored in a model file, in file order.
pub trait MeshLoader<M> {
    fn load(&self, path: &Path, gamma_correction: bool) -> Result<Vec<M>>;
}

impl<M, F> MeshLoader<M> for F
where
    F: Fn(&Path, bool) -> Result<Vec<M>>,
{
    fn load(&self, path: &Path, gamma_correction: bool) -> Result<Vec<M>> {
        self(path, gamma_correction)
    }
}
