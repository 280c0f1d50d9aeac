use crate::error::{check_rgba_len, Result};
use crate::orient::Rotation;

/// One captured RGBA8 frame.
///
/// Pixels are tightly packed, row-major, `width * height * 4` bytes. The length is
/// checked on construction so a descriptor can never overrun a destination texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDescriptor {
    width: u32,
    height: u32,
    sensor_orientation: Rotation,
    pixels: Vec<u8>,
}

impl FrameDescriptor {
    pub fn new(
        width: u32,
        height: u32,
        sensor_orientation: Rotation,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        check_rgba_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            sensor_orientation,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn sensor_orientation(&self) -> Rotation {
        self.sensor_orientation
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}
