use parking_lot::Mutex;

use crate::error::{check_rgba_len, Result};
use crate::orient::{CameraFacing, Rotation};

use super::descriptor::FrameDescriptor;
use super::display::{DisplayState, OrientationConfig, QuadGeometry};

/// Upload state of a [`FrameSlot`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SlotPhase {
    /// Nothing new since the last upload.
    Idle,
    /// A frame is stored and waiting for the render step.
    PendingUpload,
}

/// Pixels handed to the upload callback.
#[derive(Debug, Copy, Clone)]
pub struct PendingFrame<'a> {
    pub pixels: &'a [u8],
    pub width: u32,
    pub height: u32,
}

/// Result of [`FrameSlot::latch`]: whether a frame was uploaded, plus the geometry
/// that belongs to the frame the texture now holds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Latched {
    pub uploaded: bool,
    pub geometry: QuadGeometry,
}

/// Handoff counters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SlotStats {
    pub submitted: u64,
    pub uploaded: u64,
    /// Frames overwritten before the render step consumed them.
    pub dropped: u64,
}

#[derive(Debug)]
struct SlotInner {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    dirty: bool,
    display: DisplayState,
    stats: SlotStats,
}

/// Single-frame, latest-wins handoff between a capture thread and the render thread.
///
/// The producer stores pixels, recomputes orientation/geometry and sets the dirty
/// flag inside one critical section, so the consumer never sees a partially copied
/// buffer. The consumer holds the lock only to test-and-clear the flag and upload;
/// drawing happens after release. A frame submitted while another is still pending
/// replaces it.
#[derive(Debug)]
pub struct FrameSlot {
    inner: Mutex<SlotInner>,
}

impl FrameSlot {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            inner: Mutex::new(SlotInner {
                pixels: Vec::new(),
                width: 0,
                height: 0,
                dirty: false,
                display: DisplayState::new(config),
                stats: SlotStats::default(),
            }),
        }
    }

    /// Stores an owned frame, returning the displaced buffer so the producer can
    /// recycle its allocation.
    ///
    /// The descriptor was size-checked on construction, so this cannot fail.
    pub fn submit(&self, frame: FrameDescriptor) -> Vec<u8> {
        let (width, height, sensor) = (frame.width(), frame.height(), frame.sensor_orientation());
        let mut pixels = frame.into_pixels();

        let mut inner = self.inner.lock();
        std::mem::swap(&mut inner.pixels, &mut pixels);
        inner.store(width, height, sensor);
        pixels
    }

    /// Copies `pixels` into the slot.
    ///
    /// The existing buffer is reused when the frame size is unchanged. Payloads
    /// whose length is not `width * height * 4` are rejected before any copy.
    pub fn submit_bytes(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        sensor: Rotation,
    ) -> Result<()> {
        let len = check_rgba_len(width, height, pixels.len())?;

        let mut inner = self.inner.lock();
        if inner.pixels.len() == len {
            inner.pixels.copy_from_slice(pixels);
        } else {
            inner.pixels = pixels.to_vec();
        }
        inner.store(width, height, sensor);
        Ok(())
    }

    /// Runs `upload` on the pending frame, if any, and returns to `Idle`.
    ///
    /// `upload` executes while the lock is held; keep it to the buffer copy.
    /// Returns whether an upload happened.
    pub fn take_pending<F>(&self, upload: F) -> bool
    where
        F: FnOnce(PendingFrame<'_>),
    {
        let mut inner = self.inner.lock();
        if !inner.dirty {
            return false;
        }

        upload(PendingFrame {
            pixels: &inner.pixels,
            width: inner.width,
            height: inner.height,
        });

        inner.dirty = false;
        inner.stats.uploaded += 1;
        true
    }

    /// Like [`take_pending`](Self::take_pending), but also snapshots the quad
    /// geometry under the same guard.
    ///
    /// A producer can't slip a new frame in between the upload and the geometry
    /// read, so the texture and the vertices always describe the same frame.
    pub fn latch<F>(&self, upload: F) -> Latched
    where
        F: FnOnce(PendingFrame<'_>),
    {
        let mut inner = self.inner.lock();
        let uploaded = inner.dirty;
        if uploaded {
            upload(PendingFrame {
                pixels: &inner.pixels,
                width: inner.width,
                height: inner.height,
            });
            inner.dirty = false;
            inner.stats.uploaded += 1;
        }

        Latched {
            uploaded,
            geometry: inner.display.geometry(),
        }
    }

    pub fn phase(&self) -> SlotPhase {
        if self.inner.lock().dirty {
            SlotPhase::PendingUpload
        } else {
            SlotPhase::Idle
        }
    }

    /// Viewport resize from the render side (physical pixels).
    pub fn resize_viewport(&self, width: u32, height: u32) -> bool {
        self.inner.lock().display.resize_viewport(width, height)
    }

    pub fn set_device_orientation(&self, device: Rotation) -> bool {
        self.inner.lock().display.set_device_orientation(device)
    }

    pub fn set_facing(&self, facing: CameraFacing) -> bool {
        self.inner.lock().display.set_facing(facing)
    }

    /// Snapshot of the current draw geometry.
    pub fn geometry(&self) -> QuadGeometry {
        self.inner.lock().display.geometry()
    }

    /// Copy of the display state.
    pub fn display(&self) -> DisplayState {
        self.inner.lock().display.clone()
    }

    pub fn stats(&self) -> SlotStats {
        self.inner.lock().stats
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new(OrientationConfig::default())
    }
}

impl SlotInner {
    // Pixels are already in place; the flag is set last.
    fn store(&mut self, width: u32, height: u32, sensor: Rotation) {
        if self.dirty {
            self.stats.dropped += 1;
            log::trace!("frame overwritten before upload ({} dropped)", self.stats.dropped);
        }

        self.width = width;
        self.height = height;
        self.display.apply_frame(width, height, sensor);

        self.stats.submitted += 1;
        self.dirty = true;
    }
}
