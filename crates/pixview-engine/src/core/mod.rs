//! Contracts between the runtime loop and the application.
//!
//! The runtime owns windows and GPU state; applications only see the per-frame
//! context defined here.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
