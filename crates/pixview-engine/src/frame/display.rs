use crate::fit::{self, VertexQuad};
use crate::orient::{self, CameraFacing, Orientation, Rotation, TexQuad};

/// Device-side orientation inputs.
///
/// Both values are read once at construction and can later be changed through
/// [`DisplayState::set_device_orientation`] / [`DisplayState::set_facing`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct OrientationConfig {
    /// Current UI rotation relative to the device's natural orientation.
    pub device_orientation: Rotation,
    pub facing: CameraFacing,
}

/// Geometry snapshot consumed by the draw phase.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadGeometry {
    pub tex_coords: TexQuad,
    pub vertices: VertexQuad,
    pub rotation: Rotation,
    /// Incremented whenever `tex_coords` or `vertices` change.
    pub revision: u64,
}

/// Viewport, orientation and quad geometry of one preview surface.
#[derive(Debug, Clone)]
pub struct DisplayState {
    view_width: u32,
    view_height: u32,

    // Zero until the first frame arrives.
    frame_width: u32,
    frame_height: u32,
    sensor: Rotation,

    device: Rotation,
    facing: CameraFacing,

    orientation: Orientation,
    vertices: VertexQuad,
    revision: u64,
}

impl DisplayState {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            view_width: 0,
            view_height: 0,
            frame_width: 0,
            frame_height: 0,
            sensor: Rotation::Deg0,
            device: config.device_orientation,
            facing: config.facing,
            orientation: Orientation {
                rotation: Rotation::Deg0,
                tex_coords: orient::select_tex_coords(Rotation::Deg0, config.facing),
            },
            vertices: VertexQuad::FULL,
            revision: 0,
        }
    }

    /// Records a new frame's size and sensor orientation.
    ///
    /// Texture coordinates are replaced when the resolved rotation changes; vertices
    /// are refit when the size or the rotation changes. Returns whether the geometry
    /// changed.
    pub fn apply_frame(&mut self, width: u32, height: u32, sensor: Rotation) -> bool {
        let size_changed = self.frame_width != width || self.frame_height != height;
        self.frame_width = width;
        self.frame_height = height;
        self.sensor = sensor;

        let resolved = orient::resolve(sensor, self.device, self.facing);
        let rotation_changed = resolved.rotation != self.orientation.rotation;
        if rotation_changed {
            self.set_orientation(resolved);
        }

        if size_changed || rotation_changed {
            self.refit();
        }

        size_changed || rotation_changed
    }

    /// Stores the viewport size (physical pixels) and refits if a frame is known.
    pub fn resize_viewport(&mut self, width: u32, height: u32) -> bool {
        if self.view_width == width && self.view_height == height {
            return false;
        }
        self.view_width = width;
        self.view_height = height;

        if self.has_frame() {
            self.refit()
        } else {
            false
        }
    }

    /// Live device-rotation update.
    pub fn set_device_orientation(&mut self, device: Rotation) -> bool {
        if self.device == device {
            return false;
        }
        self.device = device;
        log::debug!("device orientation -> {device}");

        if !self.has_frame() {
            return false;
        }

        let resolved = orient::resolve(self.sensor, self.device, self.facing);
        if resolved.rotation == self.orientation.rotation {
            return false;
        }
        self.set_orientation(resolved);
        self.refit();
        true
    }

    /// Switches the lens facing. Texture coordinates are always reselected since the
    /// mirrored table differs even at unchanged rotation.
    pub fn set_facing(&mut self, facing: CameraFacing) -> bool {
        if self.facing == facing {
            return false;
        }
        self.facing = facing;
        log::debug!("camera facing -> {facing}");

        let resolved = if self.has_frame() {
            orient::resolve(self.sensor, self.device, self.facing)
        } else {
            Orientation {
                rotation: self.orientation.rotation,
                tex_coords: orient::select_tex_coords(self.orientation.rotation, facing),
            }
        };

        let rotation_changed = resolved.rotation != self.orientation.rotation;
        self.set_orientation(resolved);
        if rotation_changed {
            self.refit();
        }
        true
    }

    pub fn geometry(&self) -> QuadGeometry {
        QuadGeometry {
            tex_coords: self.orientation.tex_quad(),
            vertices: self.vertices,
            rotation: self.orientation.rotation,
            revision: self.revision,
        }
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.orientation.rotation
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    #[inline]
    pub fn device_orientation(&self) -> Rotation {
        self.device
    }

    #[inline]
    pub fn viewport(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }

    #[inline]
    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    #[inline]
    fn has_frame(&self) -> bool {
        self.frame_width > 0 && self.frame_height > 0
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.revision = self.revision.wrapping_add(1);
        }
    }

    fn refit(&mut self) -> bool {
        let Some(f) = fit::fit(
            to_i32(self.view_width),
            to_i32(self.view_height),
            to_i32(self.frame_width),
            to_i32(self.frame_height),
            self.orientation.rotation,
        ) else {
            return false;
        };

        log::debug!(
            "aspect updated: view={:.3}, frame={:.3}, rotation={}, mode={:?}",
            f.view_aspect,
            f.frame_aspect,
            self.orientation.rotation,
            f.mode,
        );

        if f.quad == self.vertices {
            return false;
        }
        self.vertices = f.quad;
        self.revision = self.revision.wrapping_add(1);
        true
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(OrientationConfig::default())
    }
}

#[inline]
fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orient::{COORDS_0, COORDS_270, COORDS_90, COORDS_MIRROR_0};
    use approx::assert_relative_eq;

    fn front() -> OrientationConfig {
        OrientationConfig {
            device_orientation: Rotation::Deg0,
            facing: CameraFacing::Front,
        }
    }

    #[test]
    fn initial_geometry_is_full_quad_at_zero() {
        let back = DisplayState::default().geometry();
        assert_eq!(back.tex_coords, COORDS_0);
        assert_eq!(back.vertices, VertexQuad::FULL);

        let front = DisplayState::new(front()).geometry();
        assert_eq!(front.tex_coords, COORDS_MIRROR_0);
    }

    #[test]
    fn viewport_before_frame_keeps_full_quad() {
        let mut s = DisplayState::default();
        assert!(!s.resize_viewport(1000, 500));
        assert_eq!(s.viewport(), (1000, 500));
        assert_eq!(s.geometry().vertices, VertexQuad::FULL);
    }

    #[test]
    fn first_frame_fits_to_viewport() {
        let mut s = DisplayState::default();
        s.resize_viewport(1000, 500);
        assert!(s.apply_frame(800, 600, Rotation::Deg0));

        let (sx, sy) = s.geometry().vertices.scale();
        assert_relative_eq!(sx, 2.0 / 3.0, epsilon = 1e-6);
        assert_eq!(sy, 1.0);
    }

    #[test]
    fn same_frame_again_changes_nothing() {
        let mut s = DisplayState::default();
        s.resize_viewport(1000, 500);
        s.apply_frame(800, 600, Rotation::Deg90);
        let before = s.geometry();

        assert!(!s.apply_frame(800, 600, Rotation::Deg90));
        assert_eq!(s.geometry(), before);
    }

    #[test]
    fn rotation_change_updates_tex_coords_and_vertices() {
        let mut s = DisplayState::default();
        s.resize_viewport(1000, 500);
        s.apply_frame(800, 600, Rotation::Deg0);
        let r0 = s.geometry();

        assert!(s.apply_frame(800, 600, Rotation::Deg90));
        let r90 = s.geometry();
        assert_eq!(r90.rotation, Rotation::Deg90);
        assert_eq!(r90.tex_coords, COORDS_90);
        assert_ne!(r90.vertices, r0.vertices);
        assert!(r90.revision > r0.revision);
    }

    #[test]
    fn resize_refits_known_frame() {
        let mut s = DisplayState::default();
        s.resize_viewport(1000, 500);
        s.apply_frame(800, 600, Rotation::Deg0);

        assert!(s.resize_viewport(500, 1000));
        let (sx, sy) = s.geometry().vertices.scale();
        assert_eq!(sx, 1.0);
        assert_relative_eq!(sy, 0.375, epsilon = 1e-6);
    }

    #[test]
    fn zero_viewport_keeps_previous_vertices() {
        let mut s = DisplayState::default();
        s.resize_viewport(1000, 500);
        s.apply_frame(800, 600, Rotation::Deg0);
        let before = s.geometry().vertices;

        s.resize_viewport(0, 0);
        assert_eq!(s.geometry().vertices, before);
    }

    #[test]
    fn device_orientation_update_re_resolves_last_frame() {
        let mut s = DisplayState::default();
        s.resize_viewport(1000, 500);
        s.apply_frame(640, 480, Rotation::Deg90);
        assert_eq!(s.rotation(), Rotation::Deg90);

        assert!(s.set_device_orientation(Rotation::Deg90));
        assert_eq!(s.rotation(), Rotation::Deg0);
        assert_eq!(s.geometry().tex_coords, COORDS_0);

        assert!(!s.set_device_orientation(Rotation::Deg90));
    }

    #[test]
    fn default_device_orientation_is_preserved_without_updates() {
        let config = OrientationConfig {
            device_orientation: Rotation::Deg270,
            facing: CameraFacing::Back,
        };
        let mut s = DisplayState::new(config);
        s.apply_frame(640, 480, Rotation::Deg90);
        // 90 - 270 + 360
        assert_eq!(s.rotation(), Rotation::Deg180);
        assert_eq!(s.device_orientation(), Rotation::Deg270);
    }

    #[test]
    fn facing_switch_reselects_table() {
        let mut s = DisplayState::default();
        s.resize_viewport(1000, 500);
        s.apply_frame(640, 480, Rotation::Deg90);
        assert_eq!(s.geometry().tex_coords, COORDS_90);

        assert!(s.set_facing(CameraFacing::Front));
        assert_eq!(s.rotation(), Rotation::Deg90);
        assert_eq!(s.geometry().tex_coords, COORDS_270);

        assert!(s.set_facing(CameraFacing::Back));
        assert_eq!(s.geometry().tex_coords, COORDS_90);
    }

    #[test]
    fn facing_switch_before_first_frame_mirrors_zero() {
        let mut s = DisplayState::default();
        assert!(s.set_facing(CameraFacing::Front));
        assert_eq!(s.geometry().tex_coords, COORDS_MIRROR_0);
    }
}
