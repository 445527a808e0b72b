use std::path::PathBuf;
use clap::Parser;
use glam::{Mat4, Vec3};
use object_core::scene::transform;
use object_core::trace::{Trace, TraceLoader, TraceMesh, TraceShader};
use object_core::ui::DemoPanel;
use object_core::{Camera, EulerPath, Object};

/// Drives objects through the trace backend without opening a window.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model file to load meshes from
    path: PathBuf,

    /// Number of frames to run
    #[arg(long, default_value_t = 3)]
    frames: usize,

    /// Load textures with gamma correction
    #[arg(long)]
    gamma: bool,

    /// Spin the object through the quaternion path instead of matrices
    #[arg(long)]
    quaternion: bool,

    /// Meshes the trace loader produces for the model file
    #[arg(long, default_value_t = 1)]
    meshes: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let euler_path = if args.quaternion {
        EulerPath::Quaternion
    } else {
        EulerPath::Matrix
    };

    let trace = Trace::new();
    let shader = TraceShader::new("trace", &trace);
    let camera = Camera::new(Vec3::new(0.0, 8.0, 16.0), 16.0 / 9.0);
    let loader = TraceLoader::new(args.meshes, &trace);

    let mut object: Object<TraceShader, TraceMesh> =
        Object::new(&args.path, &shader, &camera, args.gamma).with_behavior(
            move |m: &mut Mat4| {
                *m = transform::rotate(Vec3::new(0.05, 0.0, 0.0), euler_path, *m);
            },
        );
    object.apply_scale(Vec3::splat(0.5));

    if !object.init(&loader) {
        log::warn!("{} will not draw anything", args.path.display());
    }

    let ctx = egui::Context::default();
    let mut panel = DemoPanel::new();

    for frame in 0..args.frames {
        let before = trace.draw_count();
        object.frame();
        let output = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx));
        log::debug!(
            "frame {}: {} draw calls, {} ui shapes",
            frame,
            trace.draw_count() - before,
            output.shapes.len()
        );
    }

    log::info!(
        "{} frames, {} meshes, {} draw calls",
        args.frames,
        object.meshes().len(),
        trace.draw_count()
    );
    log::info!("final transform: {:?}", object.transform);

    Ok(())
}
