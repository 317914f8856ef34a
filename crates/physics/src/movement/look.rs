//! Look input to body yaw and camera pitch.

use glam::Vec2;

/// Look parameters that do not change per frame.
#[derive(Debug, Clone, Copy)]
pub struct LookParams {
    pub sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

/// Apply one frame of look input.
///
/// Returns `(new_pitch, yaw_delta)` in degrees. Yaw is a body rotation and is
/// unbounded; pitch stays on the camera and is clamped after subtracting.
pub fn apply_look(look_input: Vec2, delta_time: f32, pitch: f32, params: LookParams) -> (f32, f32) {
    let yaw_delta = look_input.x * params.sensitivity * delta_time;
    let pitch_delta = look_input.y * params.sensitivity * delta_time;

    let new_pitch = (pitch - pitch_delta).clamp(params.min_pitch, params.max_pitch);

    (new_pitch, yaw_delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: LookParams = LookParams {
        sensitivity: 25.0,
        min_pitch: -90.0,
        max_pitch: 90.0,
    };

    #[test]
    fn test_yaw_delta() {
        let (pitch, yaw_delta) = apply_look(Vec2::new(2.0, 0.0), 0.1, 10.0, PARAMS);
        assert!((yaw_delta - 5.0).abs() < 1e-5);
        assert_eq!(pitch, 10.0);
    }

    #[test]
    fn test_look_up_decreases_pitch() {
        let (pitch, _) = apply_look(Vec2::new(0.0, 1.0), 0.2, 0.0, PARAMS);
        assert!((pitch + 5.0).abs() < 1e-5, "got {}", pitch);
    }

    #[test]
    fn test_pitch_clamped() {
        let (pitch, _) = apply_look(Vec2::new(0.0, -100.0), 1.0, 80.0, PARAMS);
        assert_eq!(pitch, 90.0);

        let (pitch, _) = apply_look(Vec2::new(0.0, 100.0), 1.0, -80.0, PARAMS);
        assert_eq!(pitch, -90.0);
    }

    #[test]
    fn test_pitch_stays_in_range_for_any_sequence() {
        let params = LookParams {
            sensitivity: 40.0,
            min_pitch: -60.0,
            max_pitch: 75.0,
        };

        // Deterministic pseudo-random input sequence
        let mut seed: u32 = 0x2545_f491;
        let mut pitch = 0.0;
        let mut yaw = 0.0;
        for _ in 0..5000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let y = (seed % 2001) as f32 / 100.0 - 10.0;
            let x = ((seed >> 11) % 2001) as f32 / 100.0 - 10.0;
            let dt = ((seed >> 3) % 100) as f32 / 1000.0;

            let (next_pitch, yaw_delta) = apply_look(Vec2::new(x, y), dt, pitch, params);
            pitch = next_pitch;
            yaw += yaw_delta;

            assert!(
                (params.min_pitch..=params.max_pitch).contains(&pitch),
                "pitch {} escaped its range",
                pitch
            );
        }
        assert!(yaw.is_finite());
    }
}
