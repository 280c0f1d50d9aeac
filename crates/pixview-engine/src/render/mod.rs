//! GPU rendering.
//!
//! The preview draws one textured triangle-strip quad. Geometry arrives already in
//! NDC from the `frame` module, so no viewport uniform is involved.

mod ctx;
mod preview;
mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use preview::{PreviewConfig, PreviewRenderer};
pub use shader::validate_wgsl;
