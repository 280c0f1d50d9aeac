use thiserror::Error;

/// Errors produced by the preview core and renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    /// The pass-through shader failed to compile.
    ///
    /// Returned from renderer construction; no renderer exists afterwards, so the
    /// draw phase cannot be reached with a broken pipeline.
    #[error("shader `{label}` failed to compile: {message}")]
    ShaderCompile { label: String, message: String },

    /// An angle that is not a multiple of 90 degrees.
    #[error("orientation {0} is not one of 0, 90, 180, 270 degrees")]
    InvalidOrientation(i32),

    /// Pixel payload length disagrees with `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Frame larger than the device's 2D texture limit on either side.
    #[error("frame {width}x{height} exceeds the {max}px texture limit")]
    FrameTooLarge { width: u32, height: u32, max: u32 },

    /// Frame with a zero (or overflowing) dimension.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, PreviewError>;

/// Byte length of a tightly packed RGBA8 frame, or `InvalidDimensions`.
pub(crate) fn rgba_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(PreviewError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or(PreviewError::InvalidDimensions { width, height })
}

/// Checks a payload against the RGBA8 size implied by its dimensions.
pub(crate) fn check_rgba_len(width: u32, height: u32, actual: usize) -> Result<usize> {
    let expected = rgba_len(width, height)?;
    if actual != expected {
        return Err(PreviewError::BufferSizeMismatch { expected, actual });
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_len_rejects_zero_dimensions() {
        assert_eq!(
            rgba_len(0, 10),
            Err(PreviewError::InvalidDimensions { width: 0, height: 10 })
        );
        assert_eq!(
            rgba_len(10, 0),
            Err(PreviewError::InvalidDimensions { width: 10, height: 0 })
        );
    }

    #[test]
    fn check_rgba_len_reports_both_sizes() {
        assert_eq!(check_rgba_len(2, 2, 16), Ok(16));
        assert_eq!(
            check_rgba_len(2, 2, 15),
            Err(PreviewError::BufferSizeMismatch { expected: 16, actual: 15 })
        );
    }

    #[test]
    fn display_messages_are_lowercase_and_specific() {
        let e = PreviewError::InvalidOrientation(45);
        assert_eq!(e.to_string(), "orientation 45 is not one of 0, 90, 180, 270 degrees");
    }
}
