//! A recording backend that stands in for a GPU.
//!
//! Shader and mesh calls are logged and appended to a shared [`Trace`], which
//! the headless driver and the tests inspect afterwards.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use anyhow::{bail, Context, Result};
use glam::Mat4;

use crate::model::{Mesh, MeshLoader};
use crate::scene::ObjectView;
use crate::shader::Shader;

#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    ShaderUpdate { shader: String, mvp: Mat4 },
    UseProgram(String),
    ApplyProfile(String),
    MeshInit(String),
    Draw { mesh: String },
}

/// Shared, append-only event log.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    events: Rc<RefCell<Vec<TraceEvent>>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: TraceEvent) {
        log::trace!("{:?}", event);
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    pub fn draw_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, TraceEvent::Draw { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

pub struct TraceShader {
    name: String,
    trace: Trace,
}

impl TraceShader {
    pub fn new(name: impl Into<String>, trace: &Trace) -> Self {
        Self {
            name: name.into(),
            trace: trace.clone(),
        }
    }
}

impl Shader for TraceShader {
    fn update(&self, object: &ObjectView<'_>) {
        self.trace.record(TraceEvent::ShaderUpdate {
            shader: self.name.clone(),
            mvp: object.model_view_projection(),
        });
    }

    fn use_program(&self) {
        self.trace.record(TraceEvent::UseProgram(self.name.clone()));
    }

    fn apply_profile(&self) {
        self.trace.record(TraceEvent::ApplyProfile(self.name.clone()));
    }
}

#[derive(Debug)]
pub struct TraceMesh {
    pub name: String,
    initialized: bool,
    trace: Trace,
}

impl TraceMesh {
    pub fn new(name: impl Into<String>, trace: &Trace) -> Self {
        Self {
            name: name.into(),
            initialized: false,
            trace: trace.clone(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Mesh for TraceMesh {
    fn init(&mut self) {
        self.initialized = true;
        self.trace.record(TraceEvent::MeshInit(self.name.clone()));
    }

    fn draw<S: Shader + ?Sized>(&self, _shader: &S) {
        if !self.initialized {
            log::warn!("drawing mesh {} before init", self.name);
        }
        self.trace.record(TraceEvent::Draw {
            mesh: self.name.clone(),
        });
    }
}

/// Accepts any existing regular file and yields `mesh_count` meshes named
/// after it. Contents are not parsed.
pub struct TraceLoader {
    pub mesh_count: usize,
    trace: Trace,
}

impl TraceLoader {
    pub fn new(mesh_count: usize, trace: &Trace) -> Self {
        Self {
            mesh_count,
            trace: trace.clone(),
        }
    }
}

impl MeshLoader<TraceMesh> for TraceLoader {
    fn load(&self, path: &Path, gamma_correction: bool) -> Result<Vec<TraceMesh>> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("cannot stat {}", path.display()))?;
        if !metadata.is_file() {
            bail!("{} is not a file", path.display());
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string());
        log::debug!(
            "trace loader: {} meshes from {} (gamma correction: {})",
            self.mesh_count,
            path.display(),
            gamma_correction
        );

        Ok((0..self.mesh_count)
            .map(|i| TraceMesh::new(format!("{}#{}", stem, i), &self.trace))
            .collect())
    }
}
