/// Four `(u, v)` pairs ordered bottom-left, bottom-right, top-left, top-right.
///
/// The order matches a triangle-strip draw of the unit quad. `v = 0` is the first
/// row of the uploaded image.
pub type TexQuad = [[f32; 2]; 4];

pub const COORDS_0: TexQuad = [[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]];

pub const COORDS_90: TexQuad = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

pub const COORDS_180: TexQuad = [[1.0, 0.0], [0.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

pub const COORDS_270: TexQuad = [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]];

/// Horizontally mirrored `COORDS_0`, used for front-facing frames.
pub const COORDS_MIRROR_0: TexQuad = [[1.0, 1.0], [0.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Immutable selection of one of the texture quads.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum TexCoordSet {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
    Mirror0,
}

impl TexCoordSet {
    #[inline]
    pub const fn coords(self) -> TexQuad {
        match self {
            Self::Rotate0 => COORDS_0,
            Self::Rotate90 => COORDS_90,
            Self::Rotate180 => COORDS_180,
            Self::Rotate270 => COORDS_270,
            Self::Mirror0 => COORDS_MIRROR_0,
        }
    }
}
