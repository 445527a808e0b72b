use crate::scene::ObjectView;

/// GPU pipeline configuration driven once per object per frame.
///
/// `Object::frame` calls `update`, `use_program` and `apply_profile` in that
/// order before any of its meshes are drawn.
pub trait Shader {
    /// Pulls per-object data such as the model transform and camera matrices.
    fn update(&self, object: &ObjectView<'_>);

    /// Makes this program the active one.
    fn use_program(&self);

    /// Applies the material/lighting profile bound to this shader.
    fn apply_profile(&self);
}
