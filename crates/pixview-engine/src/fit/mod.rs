//! Aspect-preserving fit of a frame into the viewport.
//!
//! Produces the NDC vertex quad the preview draws. One axis always spans the full
//! `[-1, 1]` range; the other is scaled down so the frame keeps its aspect ratio
//! (letterbox bands top/bottom, pillarbox bands left/right).

use crate::orient::Rotation;

/// Four `(x, y)` NDC positions ordered bottom-left, bottom-right, top-left, top-right.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexQuad(pub [[f32; 2]; 4]);

impl VertexQuad {
    /// Unscaled quad covering the whole viewport.
    pub const FULL: VertexQuad = VertexQuad::scaled(1.0, 1.0);

    /// Quad centered at the origin with half-extents `sx`, `sy`.
    #[inline]
    pub const fn scaled(sx: f32, sy: f32) -> Self {
        Self([[-sx, -sy], [sx, -sy], [-sx, sy], [sx, sy]])
    }

    /// Half-extents `(x, y)` of the quad.
    #[inline]
    pub fn scale(&self) -> (f32, f32) {
        let [_, _, _, top_right] = self.0;
        (top_right[0], top_right[1])
    }
}

impl Default for VertexQuad {
    fn default() -> Self {
        Self::FULL
    }
}

/// Which axis was shrunk.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FitMode {
    /// Frame wider than the viewport: full width, reduced height.
    Letterbox,
    /// Frame narrower than (or as wide as) the viewport: full height, reduced width.
    Pillarbox,
}

/// Result of a successful fit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fit {
    pub quad: VertexQuad,
    pub mode: FitMode,
    pub view_aspect: f32,
    pub frame_aspect: f32,
}

/// Visual aspect ratio of a frame once rotated for display.
#[inline]
pub fn frame_aspect(frame_width: i32, frame_height: i32, rotation: Rotation) -> f32 {
    if rotation.swaps_axes() {
        frame_height as f32 / frame_width as f32
    } else {
        frame_width as f32 / frame_height as f32
    }
}

/// Fits a `frame_width x frame_height` frame shown at `rotation` into the viewport.
///
/// Returns `None` if any dimension is zero or negative.
/// Equal aspect ratios take the pillarbox branch with a width ratio of exactly 1.
pub fn fit(
    view_width: i32,
    view_height: i32,
    frame_width: i32,
    frame_height: i32,
    rotation: Rotation,
) -> Option<Fit> {
    if view_width <= 0 || view_height <= 0 || frame_width <= 0 || frame_height <= 0 {
        return None;
    }

    let view_aspect = view_width as f32 / view_height as f32;
    let frame_aspect = frame_aspect(frame_width, frame_height, rotation);

    let (quad, mode) = if frame_aspect > view_aspect {
        let height_ratio = view_aspect / frame_aspect;
        (VertexQuad::scaled(1.0, height_ratio), FitMode::Letterbox)
    } else {
        let width_ratio = frame_aspect / view_aspect;
        (VertexQuad::scaled(width_ratio, 1.0), FitMode::Pillarbox)
    };

    Some(Fit {
        quad,
        mode,
        view_aspect,
        frame_aspect,
    })
}

/// [`fit`], falling back to `previous` when the inputs are degenerate.
pub fn fit_or_keep(
    previous: VertexQuad,
    view_width: i32,
    view_height: i32,
    frame_width: i32,
    frame_height: i32,
    rotation: Rotation,
) -> VertexQuad {
    fit(view_width, view_height, frame_width, frame_height, rotation)
        .map_or(previous, |f| f.quad)
}
