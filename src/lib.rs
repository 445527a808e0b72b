pub mod model;
pub mod scene;
pub mod shader;
pub mod trace;
pub mod ui;

pub use model::{Mesh, MeshLoader};
pub use scene::{Behavior, Camera, EulerPath, Idle, Object, ObjectView};
pub use shader::Shader;
