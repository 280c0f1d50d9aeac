mod args;
mod preview_app;
mod producer;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use pixview_engine::device::GpuInit;
use pixview_engine::frame::{FrameSlot, OrientationConfig};
use pixview_engine::logging::init_logging;
use pixview_engine::render::PreviewConfig;
use pixview_engine::window::{Runtime, RuntimeConfig};

use args::Args;
use preview_app::PreviewApp;
use producer::{Producer, ProducerConfig};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.logging());

    let slot = Arc::new(FrameSlot::new(OrientationConfig {
        device_orientation: args.device_orientation,
        facing: args.facing.into(),
    }));

    let producer = Producer::spawn(
        ProducerConfig {
            width: args.width,
            height: args.height,
            fps: args.fps,
            sensor: args.sensor_orientation,
            pre_rotate: args.pre_rotate,
        },
        Arc::clone(&slot),
    )?;

    let app = PreviewApp::new(
        Arc::clone(&slot),
        PreviewConfig {
            clear_color: args.clear_color,
            ..PreviewConfig::default()
        },
    );

    let run = Runtime::run(
        RuntimeConfig {
            title: "pixview".to_string(),
            initial_size: LogicalSize::new(960.0, 720.0),
        },
        GpuInit::default(),
        app,
    );

    // Join the producer even when the runtime failed, then report the first error.
    let produced = producer.stop();
    run?;
    let produced = produced?;

    let stats = slot.stats();
    log::info!(
        "done: {produced} frames produced, {} uploaded, {} dropped",
        stats.uploaded,
        stats.dropped
    );
    Ok(())
}
