//! Frame timing.
//!
//! - [`FrameClock`]: one per window, ticked once per presented frame
//! - [`FramePacer`]: fixed-rate pacing for frame producers

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
