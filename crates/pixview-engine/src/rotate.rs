//! CPU rotation of RGBA8 frames.
//!
//! Used when a consumer needs upright pixels (e.g. for analysis) rather than a
//! rotated texture lookup. Rotation is clockwise; 90/270 swap the dimensions.

use crate::error::{check_rgba_len, Result};
use crate::orient::Rotation;

/// Rotated pixels plus their (possibly swapped) dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatedFrame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Output dimensions after rotating a `width x height` frame.
#[inline]
pub const fn rotated_dimensions(width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    if rotation.swaps_axes() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotates a tightly packed RGBA8 frame clockwise by `rotation`.
pub fn rotate_rgba(src: &[u8], width: u32, height: u32, rotation: Rotation) -> Result<RotatedFrame> {
    let len = check_rgba_len(width, height, src.len())?;
    let (out_w, out_h) = rotated_dimensions(width, height, rotation);

    if rotation == Rotation::Deg0 {
        return Ok(RotatedFrame {
            pixels: src.to_vec(),
            width: out_w,
            height: out_h,
        });
    }

    let (w, h) = (width as usize, height as usize);
    let ow = out_w as usize;
    let mut dst = vec![0u8; len];

    for (i, px) in src.chunks_exact(4).enumerate() {
        let (x, y) = (i % w, i / w);
        let (dx, dy) = match rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (h - 1 - y, x),
            Rotation::Deg180 => (w - 1 - x, h - 1 - y),
            Rotation::Deg270 => (y, w - 1 - x),
        };
        let o = (dy * ow + dx) * 4;
        dst[o..o + 4].copy_from_slice(px);
    }

    Ok(RotatedFrame {
        pixels: dst,
        width: out_w,
        height: out_h,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreviewError;

    // 3x2 frame, each pixel tagged with its index in the red channel:
    // 0 1 2
    // 3 4 5
    fn tagged_3x2() -> Vec<u8> {
        (0u8..6).flat_map(|i| [i, 0, 0, 255]).collect()
    }

    fn tags(frame: &RotatedFrame) -> Vec<u8> {
        frame.pixels.chunks_exact(4).map(|p| p[0]).collect()
    }

    #[test]
    fn zero_is_a_copy() {
        let r = rotate_rgba(&tagged_3x2(), 3, 2, Rotation::Deg0).unwrap();
        assert_eq!((r.width, r.height), (3, 2));
        assert_eq!(tags(&r), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn quarter_turn_clockwise() {
        // 3 0
        // 4 1
        // 5 2
        let r = rotate_rgba(&tagged_3x2(), 3, 2, Rotation::Deg90).unwrap();
        assert_eq!((r.width, r.height), (2, 3));
        assert_eq!(tags(&r), vec![3, 0, 4, 1, 5, 2]);
    }

    #[test]
    fn half_turn() {
        let r = rotate_rgba(&tagged_3x2(), 3, 2, Rotation::Deg180).unwrap();
        assert_eq!((r.width, r.height), (3, 2));
        assert_eq!(tags(&r), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn three_quarter_turn() {
        // 2 5
        // 1 4
        // 0 3
        let r = rotate_rgba(&tagged_3x2(), 3, 2, Rotation::Deg270).unwrap();
        assert_eq!((r.width, r.height), (2, 3));
        assert_eq!(tags(&r), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn four_quarter_turns_restore_the_frame() {
        let src = tagged_3x2();
        let mut cur = RotatedFrame { pixels: src.clone(), width: 3, height: 2 };
        for _ in 0..4 {
            cur = rotate_rgba(&cur.pixels, cur.width, cur.height, Rotation::Deg90).unwrap();
        }
        assert_eq!((cur.width, cur.height), (3, 2));
        assert_eq!(cur.pixels, src);
    }

    #[test]
    fn rejects_mismatched_payload() {
        assert_eq!(
            rotate_rgba(&[0u8; 8], 3, 2, Rotation::Deg90),
            Err(PreviewError::BufferSizeMismatch { expected: 24, actual: 8 })
        );
    }

    #[test]
    fn rotated_dimensions_swap_for_quarter_turns() {
        assert_eq!(rotated_dimensions(640, 480, Rotation::Deg90), (480, 640));
        assert_eq!(rotated_dimensions(640, 480, Rotation::Deg180), (640, 480));
    }
}
