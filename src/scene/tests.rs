use super::*;
use crate::trace::{Trace, TraceEvent, TraceLoader, TraceMesh, TraceShader};
use anyhow::{bail, Result};
use approx::assert_abs_diff_eq;
use glam::{Mat4, Vec3};
use std::cell::Cell;
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

type TraceObject<'a> = Object<'a, TraceShader, TraceMesh>;

fn test_camera() -> Camera {
    Camera::new(Vec3::new(0.0, 2.0, 8.0), 16.0 / 9.0)
}

fn succeeding(trace: &Trace, count: usize) -> impl Fn(&Path, bool) -> Result<Vec<TraceMesh>> + '_ {
    move |_: &Path, _: bool| {
        Ok((0..count)
            .map(|i| TraceMesh::new(format!("mesh{i}"), trace))
            .collect())
    }
}

fn failing(_: &Path, _: bool) -> Result<Vec<TraceMesh>> {
    bail!("no such model")
}

#[test]
fn test_object_new() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let object: TraceObject = Object::new("assets/cube.glb", &shader, &camera, true);

    assert_eq!(object.transform, Mat4::IDENTITY);
    assert!(object.meshes().is_empty());
    assert!(!object.is_loaded());
    assert!(object.gamma_correction());
    assert_eq!(object.path(), Path::new("assets/cube.glb"));
    assert!(trace.events().is_empty());
}

#[test_log::test]
fn test_failed_load_draws_nothing() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("missing.glb", &shader, &camera, false);

    assert!(!object.init(&failing));
    assert!(object.meshes().is_empty());
    assert!(!object.is_loaded());

    object.frame();
    object.frame();
    assert_eq!(trace.draw_count(), 0);

    // The object stays usable after a failed load.
    object.apply_translation(Vec3::X);
    assert_eq!(object.transform.w_axis.truncate(), Vec3::X);
}

#[test]
fn test_empty_model_configures_shader_without_drawing() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("empty.glb", &shader, &camera, false);

    assert!(object.init(&succeeding(&trace, 0)));
    assert!(object.is_loaded());
    assert!(object.meshes().is_empty());

    object.frame();
    let events = trace.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], TraceEvent::ShaderUpdate { .. }));
    assert_eq!(events[1], TraceEvent::UseProgram("basic".to_string()));
    assert_eq!(events[2], TraceEvent::ApplyProfile("basic".to_string()));
    assert_eq!(trace.draw_count(), 0);
}

#[test]
fn test_transform_accessors() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);
    assert_eq!(object.transform(), Mat4::IDENTITY);

    let moved = object.translate(Vec3::new(2.0, 0.0, -1.0));
    object.set_transform(moved);
    assert_eq!(object.transform(), moved);
    assert_eq!(object.transform, moved);
    assert_eq!(object.view().transform, moved);
}

#[test_log::test]
fn test_frame_draws_each_mesh_after_shader_setup() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);

    assert!(object.init(&succeeding(&trace, 3)));
    assert_eq!(object.meshes().len(), 3);
    assert!(object.meshes().iter().all(TraceMesh::is_initialized));

    trace.clear();
    object.frame();

    let events = trace.events();
    assert_eq!(events.len(), 6);
    assert!(matches!(events[0], TraceEvent::ShaderUpdate { .. }));
    assert_eq!(events[1], TraceEvent::UseProgram("basic".to_string()));
    assert_eq!(events[2], TraceEvent::ApplyProfile("basic".to_string()));
    let drawn: Vec<_> = events[3..]
        .iter()
        .map(|e| match e {
            TraceEvent::Draw { mesh } => mesh.as_str(),
            other => panic!("unexpected event {:?}", other),
        })
        .collect();
    assert_eq!(drawn, vec!["mesh0", "mesh1", "mesh2"]);
}

#[test]
fn test_init_uploads_meshes_in_load_order() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);

    object.init(&succeeding(&trace, 2));
    assert_eq!(
        trace.events(),
        vec![
            TraceEvent::MeshInit("mesh0".to_string()),
            TraceEvent::MeshInit("mesh1".to_string()),
        ]
    );
}

#[test]
fn test_init_passes_path_and_gamma_flag() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("textured.glb", &shader, &camera, true);

    let seen = Cell::new(None);
    let loader = |path: &Path, gamma: bool| -> Result<Vec<TraceMesh>> {
        seen.set(Some((path == Path::new("textured.glb"), gamma)));
        Ok(Vec::new())
    };
    assert!(object.init(&loader));
    assert_eq!(seen.get(), Some((true, true)));
}

#[test]
fn test_init_loads_once() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);

    let calls = Cell::new(0);
    let loader = |_: &Path, _: bool| -> Result<Vec<TraceMesh>> {
        calls.set(calls.get() + 1);
        Ok(vec![TraceMesh::new("only", &trace)])
    };
    assert!(object.init(&loader));
    assert!(object.init(&loader));
    assert_eq!(calls.get(), 1);
    assert_eq!(object.meshes().len(), 1);
}

#[test]
fn test_init_retries_after_failure() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);

    assert!(!object.init(&failing));
    assert!(object.init(&succeeding(&trace, 1)));
    assert_eq!(object.meshes().len(), 1);
}

#[test]
fn test_init_with_file_loader() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut object: TraceObject = Object::new(file.path(), &shader, &camera, false);

    assert!(object.init(&TraceLoader::new(4, &trace)));
    trace.clear();
    object.frame();
    assert_eq!(trace.draw_count(), 4);
}

#[test]
fn test_behavior_runs_before_shader_update() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false)
        .with_behavior(|m: &mut Mat4| {
            *m = transform::translate(Vec3::new(0.0, 1.0, 0.0), *m);
        });

    object.frame();
    object.frame();
    assert_eq!(object.transform.w_axis.truncate(), Vec3::new(0.0, 2.0, 0.0));

    let expected = camera.build_view_projection_matrix() * object.transform;
    let last_update = trace
        .events()
        .into_iter()
        .filter_map(|e| match e {
            TraceEvent::ShaderUpdate { mvp, .. } => Some(mvp),
            _ => None,
        })
        .last()
        .unwrap();
    assert_eq!(last_update, expected);
}

#[test]
fn test_default_behavior_is_idle() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);
    object.transform = object.scale(Vec3::splat(3.0));
    let before = object.transform;

    object.update();
    assert_eq!(object.transform, before);

    object.set_behavior(Idle);
    object.frame();
    assert_eq!(object.transform, before);
}

#[test]
fn test_producers_leave_transform_untouched() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);

    let moved = object.translate(Vec3::new(1.0, 2.0, 3.0));
    let _ = object.scale(Vec3::splat(2.0));
    let _ = object.rotate_around(FRAC_PI_2, Vec3::Y);
    let _ = object.rotate(Vec3::new(0.1, 0.2, 0.3), EulerPath::Quaternion);
    assert_eq!(object.transform, Mat4::IDENTITY);

    object.transform = moved;
    assert_eq!(object.transform.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_mutators_match_producers() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);

    let offset = Vec3::new(-1.0, 0.5, 4.0);
    let eulers = Vec3::new(0.3, -0.4, 1.2);

    let expected = transform::rotate(
        eulers,
        EulerPath::Matrix,
        transform::rotate_around(
            0.7,
            Vec3::X,
            transform::scale(Vec3::splat(2.0), transform::translate(offset, Mat4::IDENTITY)),
        ),
    );

    object
        .apply_translation(offset)
        .apply_scale(Vec3::splat(2.0))
        .apply_rotation_around(0.7, Vec3::X)
        .apply_rotation(eulers, EulerPath::Matrix);

    for (a, b) in object
        .transform
        .to_cols_array()
        .iter()
        .zip(expected.to_cols_array().iter())
    {
        assert_abs_diff_eq!(a, b, epsilon = 1e-5);
    }
}

#[test]
fn test_view_exposes_camera_and_transform() {
    let trace = Trace::new();
    let shader = TraceShader::new("basic", &trace);
    let camera = test_camera();
    let mut object: TraceObject = Object::new("cube.glb", &shader, &camera, false);
    object.apply_translation(Vec3::Z);

    let view = object.view();
    assert_eq!(view.transform, object.transform);
    assert_eq!(view.camera, &camera);
    assert_eq!(view.path, Path::new("cube.glb"));
    assert_eq!(
        view.model_view_projection(),
        camera.build_view_projection_matrix() * object.transform
    );
}
