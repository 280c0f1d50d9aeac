//! Frame handoff between capture and rendering.
//!
//! - [`FrameDescriptor`]: one validated RGBA8 frame
//! - [`DisplayState`]: viewport, orientation and quad geometry
//! - [`FrameSlot`]: latest-wins, single-buffer handoff guarded by one lock

mod descriptor;
mod display;
mod slot;

pub use descriptor::FrameDescriptor;
pub use display::{DisplayState, OrientationConfig, QuadGeometry};
pub use slot::{FrameSlot, Latched, PendingFrame, SlotPhase, SlotStats};
