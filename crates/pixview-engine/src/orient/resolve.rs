use crate::error::Result;

use super::rotation::{CameraFacing, Rotation};
use super::tex_coords::{TexCoordSet, TexQuad};

/// Resolved display orientation for a frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Orientation {
    pub rotation: Rotation,
    pub tex_coords: TexCoordSet,
}

impl Orientation {
    #[inline]
    pub const fn tex_quad(self) -> TexQuad {
        self.tex_coords.coords()
    }
}

/// Combines sensor mounting, device rotation and facing into a display orientation.
///
/// Front lenses add the device rotation, back lenses subtract it.
pub fn resolve(sensor: Rotation, device: Rotation, facing: CameraFacing) -> Orientation {
    let rotation = match facing {
        CameraFacing::Front => sensor.plus(device),
        CameraFacing::Back => sensor.minus(device),
    };

    Orientation {
        rotation,
        tex_coords: select_tex_coords(rotation, facing),
    }
}

/// Like [`resolve`] for raw degree values; fails on unquantized input.
pub fn resolve_degrees(sensor: i32, device: i32, facing: CameraFacing) -> Result<Orientation> {
    Ok(resolve(
        Rotation::from_degrees(sensor)?,
        Rotation::from_degrees(device)?,
        facing,
    ))
}

/// Texture quad lookup keyed by rotation and facing.
///
/// Front sensors are mirrored relative to back ones: 90 and 270 swap, 0 gets its own
/// mirrored quad, 180 is symmetric.
pub const fn select_tex_coords(rotation: Rotation, facing: CameraFacing) -> TexCoordSet {
    match (rotation, facing) {
        (Rotation::Deg0, CameraFacing::Back) => TexCoordSet::Rotate0,
        (Rotation::Deg0, CameraFacing::Front) => TexCoordSet::Mirror0,
        (Rotation::Deg90, CameraFacing::Back) => TexCoordSet::Rotate90,
        (Rotation::Deg90, CameraFacing::Front) => TexCoordSet::Rotate270,
        (Rotation::Deg180, _) => TexCoordSet::Rotate180,
        (Rotation::Deg270, CameraFacing::Back) => TexCoordSet::Rotate270,
        (Rotation::Deg270, CameraFacing::Front) => TexCoordSet::Rotate90,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreviewError;
    use crate::orient::{COORDS_0, COORDS_270, COORDS_90, COORDS_MIRROR_0};

    #[test]
    fn back_sensor_90_device_0() {
        let o = resolve(Rotation::Deg90, Rotation::Deg0, CameraFacing::Back);
        assert_eq!(o.rotation, Rotation::Deg90);
        assert_eq!(o.tex_quad(), COORDS_90);
    }

    #[test]
    fn front_sensor_90_device_0_swaps_table_entry() {
        let o = resolve(Rotation::Deg90, Rotation::Deg0, CameraFacing::Front);
        assert_eq!(o.rotation, Rotation::Deg90);
        assert_eq!(o.tex_quad(), COORDS_270);
    }

    #[test]
    fn front_zero_uses_mirrored_quad() {
        let front = resolve(Rotation::Deg0, Rotation::Deg0, CameraFacing::Front);
        let back = resolve(Rotation::Deg0, Rotation::Deg0, CameraFacing::Back);
        assert_eq!(front.rotation, Rotation::Deg0);
        assert_eq!(front.tex_quad(), COORDS_MIRROR_0);
        assert_eq!(back.tex_quad(), COORDS_0);
        assert_ne!(front.tex_quad(), back.tex_quad());
    }

    #[test]
    fn device_rotation_direction_depends_on_facing() {
        // Typical phone: sensor 270 front / 90 back, device turned to landscape (90).
        let back = resolve(Rotation::Deg90, Rotation::Deg90, CameraFacing::Back);
        assert_eq!(back.rotation, Rotation::Deg0);

        let front = resolve(Rotation::Deg270, Rotation::Deg90, CameraFacing::Front);
        assert_eq!(front.rotation, Rotation::Deg0);
        assert_eq!(front.tex_coords, TexCoordSet::Mirror0);

        let back_wrap = resolve(Rotation::Deg0, Rotation::Deg90, CameraFacing::Back);
        assert_eq!(back_wrap.rotation, Rotation::Deg270);
    }

    #[test]
    fn half_turn_is_shared_by_both_facings() {
        assert_eq!(
            select_tex_coords(Rotation::Deg180, CameraFacing::Front),
            select_tex_coords(Rotation::Deg180, CameraFacing::Back),
        );
    }

    #[test]
    fn resolve_degrees_rejects_unquantized_input() {
        assert_eq!(
            resolve_degrees(90, 30, CameraFacing::Back),
            Err(PreviewError::InvalidOrientation(30))
        );
        assert_eq!(
            resolve_degrees(100, 0, CameraFacing::Front),
            Err(PreviewError::InvalidOrientation(100))
        );
        assert_eq!(
            resolve_degrees(270, 180, CameraFacing::Back).map(|o| o.rotation),
            Ok(Rotation::Deg90)
        );
    }

    #[test]
    fn exhaustive_grid_matches_modular_arithmetic() {
        for sensor in Rotation::ALL {
            for device in Rotation::ALL {
                let s = sensor.degrees();
                let d = device.degrees();

                let back = resolve(sensor, device, CameraFacing::Back);
                assert_eq!(back.rotation.degrees(), (s + 360 - d) % 360);

                let front = resolve(sensor, device, CameraFacing::Front);
                assert_eq!(front.rotation.degrees(), (s + d) % 360);
            }
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn quantized() -> impl Strategy<Value = i32> {
            (-8i32..=8).prop_map(|n| n * 90)
        }

        fn facing() -> impl Strategy<Value = CameraFacing> {
            prop_oneof![Just(CameraFacing::Back), Just(CameraFacing::Front)]
        }

        proptest! {
            #[test]
            fn rotation_is_always_canonical(s in quantized(), d in quantized(), f in facing()) {
                let o = resolve_degrees(s, d, f).unwrap();
                prop_assert!([0, 90, 180, 270].contains(&o.rotation.degrees()));
            }

            #[test]
            fn resolve_is_idempotent(s in quantized(), d in quantized(), f in facing()) {
                prop_assert_eq!(resolve_degrees(s, d, f), resolve_degrees(s, d, f));
            }

            #[test]
            fn unquantized_input_is_an_error(s in any::<i32>(), f in facing()) {
                prop_assume!(s % 90 != 0);
                prop_assert_eq!(
                    resolve_degrees(s, 0, f),
                    Err(PreviewError::InvalidOrientation(s))
                );
            }
        }
    }
}
