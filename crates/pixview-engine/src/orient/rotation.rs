use std::fmt;

use crate::error::{PreviewError, Result};

/// Clockwise rotation quantized to quarter turns.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Parses an angle in degrees.
    ///
    /// Any multiple of 90 is accepted and normalized into `[0, 360)`, so `-90`
    /// yields `Deg270` and `450` yields `Deg90`. Other values are rejected.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(PreviewError::InvalidOrientation(degrees));
        }
        Ok(Self::from_quarter_turns((degrees.rem_euclid(360) / 90) as u32))
    }

    /// Maps a quarter-turn count (e.g. a display rotation index) to a rotation.
    #[inline]
    pub const fn from_quarter_turns(turns: u32) -> Self {
        match turns % 4 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    #[inline]
    pub const fn quarter_turns(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    #[inline]
    pub const fn degrees(self) -> u32 {
        self.quarter_turns() * 90
    }

    /// `(self + other) mod 360`.
    #[inline]
    pub const fn plus(self, other: Rotation) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    /// `(self - other + 360) mod 360`.
    #[inline]
    pub const fn minus(self, other: Rotation) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + 4 - other.quarter_turns())
    }

    #[inline]
    pub const fn rotate_cw(self) -> Self {
        self.plus(Self::Deg90)
    }

    #[inline]
    pub const fn rotate_ccw(self) -> Self {
        self.minus(Self::Deg90)
    }

    /// True when the rotation exchanges the visual width and height (90/270).
    #[inline]
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = PreviewError;

    fn try_from(degrees: i32) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Which way the capturing lens faces.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    #[inline]
    pub const fn is_front(self) -> bool {
        matches!(self, Self::Front)
    }

    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }
}

impl fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Back => "back",
            Self::Front => "front",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_degrees_accepts_canonical_angles() {
        assert_eq!(Rotation::from_degrees(0), Ok(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(90), Ok(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(180), Ok(Rotation::Deg180));
        assert_eq!(Rotation::from_degrees(270), Ok(Rotation::Deg270));
    }

    #[test]
    fn from_degrees_normalizes_out_of_range_multiples() {
        assert_eq!(Rotation::from_degrees(360), Ok(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(450), Ok(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(-90), Ok(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(-180), Ok(Rotation::Deg180));
    }

    #[test]
    fn from_degrees_rejects_unquantized_angles() {
        assert_eq!(Rotation::from_degrees(45), Err(PreviewError::InvalidOrientation(45)));
        assert_eq!(Rotation::from_degrees(-1), Err(PreviewError::InvalidOrientation(-1)));
        assert_eq!(Rotation::try_from(91), Err(PreviewError::InvalidOrientation(91)));
    }

    #[test]
    fn plus_and_minus_wrap() {
        assert_eq!(Rotation::Deg270.plus(Rotation::Deg180), Rotation::Deg90);
        assert_eq!(Rotation::Deg0.minus(Rotation::Deg90), Rotation::Deg270);
        assert_eq!(Rotation::Deg90.minus(Rotation::Deg90), Rotation::Deg0);
    }

    #[test]
    fn rotate_cw_cycles_through_all() {
        let mut r = Rotation::Deg0;
        for expected in [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270, Rotation::Deg0] {
            r = r.rotate_cw();
            assert_eq!(r, expected);
        }
        assert_eq!(Rotation::Deg0.rotate_ccw(), Rotation::Deg270);
    }

    #[test]
    fn swaps_axes_only_for_quarter_turns() {
        assert!(!Rotation::Deg0.swaps_axes());
        assert!(Rotation::Deg90.swaps_axes());
        assert!(!Rotation::Deg180.swaps_axes());
        assert!(Rotation::Deg270.swaps_axes());
    }

    #[test]
    fn facing_toggles() {
        assert_eq!(CameraFacing::Back.toggled(), CameraFacing::Front);
        assert!(CameraFacing::Back.toggled().is_front());
    }
}
