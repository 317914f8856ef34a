//! Scripted collaborators shared by the movement tests.

use glam::Vec3;

use super::collaborators::{CameraSink, CollisionEngine, MoveOutcome, RayHit};

type GroundFn = Box<dyn Fn(Vec3, f32) -> Option<RayHit>>;

/// Unit normal of a slope tilted `angle` degrees from flat, facing +Z.
pub fn slope_normal(angle: f32) -> Vec3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Vec3::new(0.0, cos, sin)
}

/// A collision engine driven by a script instead of geometry.
///
/// - Downward rays are answered by the `ground` closure.
/// - Upward rays hit a ceiling `ceiling` meters above the origin, if set.
/// - Moves are recorded; with a floor set, the capsule cannot sink below it
///   and is grounded while resting on it.
pub struct ScriptedEngine {
    pub position: Vec3,
    pub height: f32,
    pub yaw: f32,
    pub ceiling: Option<f32>,
    pub floor: Option<f32>,
    pub grounded: bool,
    pub moves: Vec<Vec3>,
    ground: GroundFn,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.9, 0.0),
            height: 1.8,
            yaw: 0.0,
            ceiling: None,
            floor: None,
            grounded: false,
            moves: Vec::new(),
            ground: Box::new(|_, _| None),
        }
    }

    pub fn with_ground(mut self, ground: impl Fn(Vec3, f32) -> Option<RayHit> + 'static) -> Self {
        self.ground = Box::new(ground);
        self
    }

    pub fn with_ceiling(mut self, distance: f32) -> Self {
        self.ceiling = Some(distance);
        self
    }

    /// Rest the capsule on a floor at `y` and report grounded.
    pub fn on_floor(mut self, y: f32) -> Self {
        self.floor = Some(y);
        self.position.y = y + self.height / 2.0;
        self.grounded = true;
        self
    }

    fn feet(&self) -> f32 {
        self.position.y - self.height / 2.0
    }
}

impl CollisionEngine for ScriptedEngine {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, displacement: Vec3) -> MoveOutcome {
        self.moves.push(displacement);
        let start = self.position;
        self.position += displacement;

        if let Some(floor) = self.floor {
            if self.feet() <= floor + 1e-4 {
                self.position.y = floor + self.height / 2.0;
                self.grounded = true;
            } else {
                self.grounded = false;
            }
        }

        MoveOutcome {
            displacement: self.position - start,
            grounded: self.grounded,
        }
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        if direction.y > 0.0 {
            return self
                .ceiling
                .filter(|distance| *distance <= max_distance)
                .map(|distance| RayHit {
                    distance,
                    normal: Vec3::NEG_Y,
                });
        }
        (self.ground)(origin, max_distance).filter(|hit| hit.distance <= max_distance)
    }

    fn capsule_height(&self) -> f32 {
        self.height
    }

    fn set_capsule_height(&mut self, height: f32) {
        self.height = height;
    }

    fn rotate_body(&mut self, yaw_delta: f32) {
        self.yaw += yaw_delta;
    }
}

/// A camera sink that remembers the last values it received.
#[derive(Debug, Default)]
pub struct RecordingCamera {
    pub offset: Vec3,
    pub pitch: f32,
    pub fov: f32,
    pub updates: usize,
}

impl CameraSink for RecordingCamera {
    fn set_local_offset(&mut self, offset: Vec3) {
        self.offset = offset;
        self.updates += 1;
    }

    fn set_local_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    fn set_field_of_view(&mut self, fov: f32) {
        self.fov = fov;
    }
}
