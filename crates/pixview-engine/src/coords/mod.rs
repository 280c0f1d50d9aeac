//! Small value types shared by the renderer and the runtime.
//!
//! Preview geometry lives in NDC (see `fit`); the types here describe the surface
//! it is drawn into.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
