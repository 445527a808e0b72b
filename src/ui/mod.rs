mod demo;

pub use demo::{frame_stats, DemoPanel};
