pub mod camera;
pub mod object;
pub mod transform;
#[cfg(test)]
mod tests;

pub use camera::Camera;
pub use object::{Behavior, Idle, Object, ObjectView};
pub use transform::EulerPath;
