//! Orientation resolution.
//!
//! Maps a camera frame's sensor mounting angle, the device's current UI rotation
//! and the lens facing to:
//! - a canonical display rotation (0/90/180/270)
//! - the texture-coordinate quad that shows the frame upright
//!
//! Front-facing frames additionally get mirrored so the preview behaves like a mirror.
//! All angles are carried as [`Rotation`]; raw integers only enter through
//! [`Rotation::from_degrees`], which rejects anything that is not quantized.

mod resolve;
mod rotation;
mod tex_coords;

pub use resolve::{resolve, resolve_degrees, select_tex_coords, Orientation};
pub use rotation::{CameraFacing, Rotation};
pub use tex_coords::{
    TexCoordSet, TexQuad, COORDS_0, COORDS_180, COORDS_270, COORDS_90, COORDS_MIRROR_0,
};
