use std::path::{Path, PathBuf};
use glam::{Mat4, Vec3};

use super::camera::Camera;
use super::transform::{self, EulerPath};
use crate::model::{Mesh, MeshLoader};
use crate::shader::Shader;

/// Per-frame behavior run by [`Object::frame`] before drawing.
///
/// Any `FnMut(&mut Mat4)` closure is a behavior.
pub trait Behavior {
    fn update(&mut self, transform: &mut Mat4);
}

impl<F> Behavior for F
where
    F: FnMut(&mut Mat4),
{
    fn update(&mut self, transform: &mut Mat4) {
        self(transform)
    }
}

/// Behavior that leaves the object untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Idle;

impl Behavior for Idle {
    fn update(&mut self, _transform: &mut Mat4) {}
}

/// What a shader sees of an object when pulling per-object uniforms.
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'v> {
    pub transform: Mat4,
    pub camera: &'v Camera,
    pub path: &'v Path,
}

impl ObjectView<'_> {
    pub fn model_view_projection(&self) -> Mat4 {
        self.camera.build_view_projection_matrix() * self.transform
    }
}

/// A drawable entity: a model transform plus the meshes loaded from one file.
///
/// The shader and camera are borrowed and outlive the object.
pub struct Object<'a, S: Shader + ?Sized, M: Mesh> {
    pub transform: Mat4,
    gamma_correction: bool,
    camera: &'a Camera,
    shader: &'a S,
    meshes: Vec<M>,
    path: PathBuf,
    loaded: bool,
    behavior: Box<dyn Behavior + 'a>,
}

impl<'a, S: Shader + ?Sized, M: Mesh> Object<'a, S, M> {
    pub fn new(
        path: impl Into<PathBuf>,
        shader: &'a S,
        camera: &'a Camera,
        gamma_correction: bool,
    ) -> Self {
        Self {
            transform: Mat4::IDENTITY,
            gamma_correction,
            camera,
            shader,
            meshes: Vec::new(),
            path: path.into(),
            loaded: false,
            behavior: Box::new(Idle),
        }
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'a) -> Self {
        self.set_behavior(behavior);
        self
    }

    pub fn set_behavior(&mut self, behavior: impl Behavior + 'a) {
        self.behavior = Box::new(behavior);
    }

    /// Loads meshes from the source path and uploads each one.
    ///
    /// A failed load is logged and leaves the object drawing nothing. Meshes
    /// are loaded at most once; later calls keep the existing set.
    pub fn init<L>(&mut self, loader: &L) -> bool
    where
        L: MeshLoader<M> + ?Sized,
    {
        if self.loaded {
            log::warn!("{}: meshes already loaded, skipping init", self.path.display());
            return true;
        }

        let mut meshes = match loader.load(&self.path, self.gamma_correction) {
            Ok(meshes) => meshes,
            Err(e) => {
                log::error!("failed to load meshes from {}: {:#}", self.path.display(), e);
                return false;
            }
        };

        for mesh in meshes.iter_mut() {
            mesh.init();
        }
        log::debug!("{}: loaded {} meshes", self.path.display(), meshes.len());

        self.meshes = meshes;
        self.loaded = true;
        true
    }

    /// Runs the behavior hook. Called at the start of every frame.
    pub fn update(&mut self) {
        self.behavior.update(&mut self.transform);
    }

    /// Updates, configures the shader, then draws every mesh in load order.
    pub fn frame(&mut self) {
        self.update();

        self.shader.update(&self.view());
        self.shader.use_program();
        self.shader.apply_profile();

        for mesh in &self.meshes {
            mesh.draw(self.shader);
        }
    }

    pub fn view(&self) -> ObjectView<'_> {
        ObjectView {
            transform: self.transform,
            camera: self.camera,
            path: &self.path,
        }
    }

    // Producers: these return the composed matrix and leave `transform` alone.

    pub fn translate(&self, offset: Vec3) -> Mat4 {
        transform::translate(offset, self.transform)
    }

    pub fn scale(&self, factors: Vec3) -> Mat4 {
        transform::scale(factors, self.transform)
    }

    /// `angle` is in radians.
    pub fn rotate_around(&self, angle: f32, axis: Vec3) -> Mat4 {
        transform::rotate_around(angle, axis, self.transform)
    }

    pub fn rotate(&self, eulers: Vec3, path: EulerPath) -> Mat4 {
        transform::rotate(eulers, path, self.transform)
    }

    // Mutators: same operations, stored back into `transform`.

    pub fn apply_translation(&mut self, offset: Vec3) -> &mut Self {
        self.transform = self.translate(offset);
        self
    }

    pub fn apply_scale(&mut self, factors: Vec3) -> &mut Self {
        self.transform = self.scale(factors);
        self
    }

    pub fn apply_rotation_around(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        self.transform = self.rotate_around(angle, axis);
        self
    }

    pub fn apply_rotation(&mut self, eulers: Vec3, path: EulerPath) -> &mut Self {
        self.transform = self.rotate(eulers, path);
        self
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    pub fn meshes(&self) -> &[M] {
        &self.meshes
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gamma_correction(&self) -> bool {
        self.gamma_correction
    }

    pub fn camera(&self) -> &Camera {
        self.camera
    }

    pub fn shader(&self) -> &S {
        self.shader
    }
}
