//! Pixview engine crate.
//!
//! Camera-style preview pipeline: orientation resolution, aspect fitting, the
//! producer/render frame hand-off and the wgpu renderer that draws it.

pub mod error;
pub mod orient;
pub mod fit;
pub mod frame;
pub mod rotate;
pub mod sink;

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;

pub use error::{PreviewError, Result};
