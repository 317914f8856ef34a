//! First-person camera.
//!
//! Receives framing from the locomotion controller through [`CameraSink`]
//! and follows the body it is attached to. Angles are in degrees; yaw 0
//! looks down -Z and positive pitch looks down.

use glam::{Mat4, Quat, Vec3};
use stride_physics::CameraSink;

/// First-person camera state.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonCamera {
    /// Eye position in world space.
    pub position: Vec3,

    /// Offset from the body origin, in body space.
    pub local_offset: Vec3,

    /// Pitch relative to the body (degrees).
    pub pitch: f32,

    /// Yaw inherited from the body (degrees).
    pub yaw: f32,

    /// Vertical field of view (degrees).
    pub fov: f32,

    pub near: f32,
    pub far: f32,

    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            local_offset: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            fov: 65.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl FirstPersonCamera {
    /// Place the eye on a body at `origin` facing `yaw` degrees.
    pub fn follow(&mut self, origin: Vec3, yaw: f32) {
        self.yaw = yaw;
        self.position = origin + Quat::from_rotation_y(-yaw.to_radians()) * self.local_offset;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Look direction.
    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(sin_yaw * cos_pitch, -sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Horizontal right direction.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw)
    }
}

impl CameraSink for FirstPersonCamera {
    fn set_local_offset(&mut self, offset: Vec3) {
        self.local_offset = offset;
    }

    fn set_local_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    fn set_field_of_view(&mut self, fov: f32) {
        self.fov = fov;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_matrix_invertible() {
        let camera = FirstPersonCamera::default();
        assert!(camera.view_matrix().determinant().abs() > 0.0001);
        assert!(camera.view_projection_matrix().determinant().abs() > 0.0);
    }

    #[test]
    fn test_forward_direction() {
        let mut camera = FirstPersonCamera::default();
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);

        camera.yaw = 90.0;
        assert!((camera.forward() - Vec3::X).length() < 1e-5);
        assert!((camera.right() - Vec3::Z).length() < 1e-5);

        camera.pitch = 90.0;
        assert!((camera.forward() - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_follow_rotates_offset() {
        let mut camera = FirstPersonCamera::default();
        camera.set_local_offset(Vec3::new(0.0, 0.9, -0.2));

        camera.follow(Vec3::new(1.0, 1.0, 1.0), 90.0);

        // -Z in body space is +X in world space at yaw 90
        assert!((camera.position - Vec3::new(1.2, 1.9, 1.0)).length() < 1e-5, "got {:?}", camera.position);
        assert_eq!(camera.yaw, 90.0);
    }

    #[test]
    fn test_sink_updates() {
        let mut camera = FirstPersonCamera::default();
        camera.set_local_pitch(-30.0);
        camera.set_field_of_view(75.0);

        assert_eq!(camera.pitch, -30.0);
        let expected = Mat4::perspective_rh(75f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
        assert!(camera.projection_matrix().abs_diff_eq(expected, 1e-6));
    }
}
