use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use anyhow::{Context, Result};

use pixview_engine::frame::{FrameDescriptor, FrameSlot};
use pixview_engine::orient::Rotation;
use pixview_engine::rotate::rotate_rgba;
use pixview_engine::time::FramePacer;

/// Stand-in for a camera: paints a test pattern into the slot at a fixed rate.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub sensor: Rotation,
    pub pre_rotate: bool,
}

pub struct Producer {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Result<u64>>,
}

impl Producer {
    pub fn spawn(config: ProducerConfig, slot: Arc<FrameSlot>) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = std::thread::Builder::new()
            .name("pixview-producer".into())
            .spawn(move || run(config, &slot, &flag))
            .context("failed to spawn producer thread")?;

        Ok(Self { stop, handle })
    }

    /// Signals the thread and waits for it; returns the number of frames produced.
    pub fn stop(self) -> Result<u64> {
        self.stop.store(true, Ordering::Relaxed);
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?
    }
}

fn run(config: ProducerConfig, slot: &FrameSlot, stop: &AtomicBool) -> Result<u64> {
    log::info!(
        "producer: {}x{} @ {} fps, sensor {}{}",
        config.width,
        config.height,
        config.fps,
        config.sensor,
        if config.pre_rotate { ", rotated on cpu" } else { "" },
    );

    let mut pacer = FramePacer::new(config.fps);
    let mut buffer = Vec::new();
    let mut index = 0u64;

    while !stop.load(Ordering::Relaxed) {
        paint_test_pattern(&mut buffer, config.width, config.height, index);

        let frame = if config.pre_rotate {
            let rotated = rotate_rgba(&buffer, config.width, config.height, config.sensor)?;
            FrameDescriptor::new(rotated.width, rotated.height, Rotation::Deg0, rotated.pixels)?
        } else {
            FrameDescriptor::new(
                config.width,
                config.height,
                config.sensor,
                std::mem::take(&mut buffer),
            )?
        };

        let recycled = slot.submit(frame);
        if !config.pre_rotate {
            buffer = recycled;
        }

        index += 1;
        pacer.wait();
    }

    log::info!("producer stopped after {index} frames");
    Ok(index)
}

/// Paints an orientation test card into `buf`, resizing it as needed.
///
/// The sensor-space top-left quadrant is red and the top edge carries a white bar, so
/// an upright preview shows red at its top-left corner. A vertical stripe sweeps
/// left to right to make dropped frames visible.
pub fn paint_test_pattern(buf: &mut Vec<u8>, width: u32, height: u32, index: u64) {
    let (w, h) = (width as usize, height as usize);
    buf.resize(w * h * 4, 0);

    let bar = (h / 16).max(1);
    let stripe_x = (index as usize * 4) % w.max(1);

    for (i, px) in buf.chunks_exact_mut(4).enumerate() {
        let (x, y) = (i % w, i / w);

        let rgba = if y < bar {
            [255, 255, 255, 255]
        } else if x.abs_diff(stripe_x) < 3 {
            [255, 255, 0, 255]
        } else {
            match (x < w / 2, y < h / 2) {
                (true, true) => [220, 40, 40, 255],
                (false, true) => [40, 180, 60, 255],
                (true, false) => [40, 80, 220, 255],
                (false, false) => [60, 60, 60, 255],
            }
        };
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn test_pattern_marks_the_top_left_quadrant() {
        let mut buf = Vec::new();
        paint_test_pattern(&mut buf, 64, 32, 10);

        assert_eq!(buf.len(), 64 * 32 * 4);
        assert_eq!(pixel(&buf, 64, 0, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&buf, 64, 10, 10), [220, 40, 40, 255]);
        assert_eq!(pixel(&buf, 64, 60, 30), [60, 60, 60, 255]);
    }

    #[test]
    fn producer_fills_the_slot_until_stopped() {
        let slot = Arc::new(FrameSlot::default());
        let producer = Producer::spawn(
            ProducerConfig {
                width: 8,
                height: 4,
                fps: 240,
                sensor: Rotation::Deg90,
                pre_rotate: true,
            },
            Arc::clone(&slot),
        )
        .unwrap();

        while slot.stats().submitted == 0 {
            std::thread::yield_now();
        }
        let produced = producer.stop().unwrap();

        assert!(produced >= 1);
        assert_eq!(slot.stats().submitted, produced);
        assert!(slot.take_pending(|frame| {
            assert_eq!((frame.width, frame.height), (4, 8));
        }));
        assert_eq!(slot.display().rotation(), Rotation::Deg0);
    }
}
