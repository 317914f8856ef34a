//! Player input handling.
//!
//! Converts raw held-key and mouse state into the per-frame
//! [`FrameInput`] the locomotion controller consumes. Jump and crouch are
//! edge-triggered: holding the key fires once.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use stride_physics::FrameInput;

/// Raw player input for a single tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Movement keys held.
    pub movement: MovementInput,

    /// Mouse delta this tick (pixels, +Y down).
    pub mouse_delta: (f32, f32),

    /// Action buttons held.
    pub actions: ActionInput,
}

/// Movement key states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Action button states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInput {
    pub jump: bool,
    pub crouch: bool,
    pub sprint: bool,
}

impl PlayerInput {
    /// Movement axes: x strafes right, y moves forward.
    ///
    /// Diagonals are normalized so they are not faster than straight moves.
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.movement.forward {
            axis.y += 1.0;
        }
        if self.movement.backward {
            axis.y -= 1.0;
        }
        if self.movement.right {
            axis.x += 1.0;
        }
        if self.movement.left {
            axis.x -= 1.0;
        }

        if axis.length_squared() > 1.0 {
            axis.normalize()
        } else {
            axis
        }
    }

    /// Look axes for a mouse delta. Moving the mouse up gives positive y.
    pub fn look_axis(&self, mouse_scale: f32) -> Vec2 {
        Vec2::new(self.mouse_delta.0, -self.mouse_delta.1) * mouse_scale
    }

    pub fn has_movement(&self) -> bool {
        self.movement.forward || self.movement.backward || self.movement.left || self.movement.right
    }
}

/// Turns a held button into a one-tick press edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonLatch {
    held: bool,
}

impl ButtonLatch {
    /// Feed the current button state. Returns true only on the tick the
    /// button goes down.
    pub fn update(&mut self, held: bool) -> bool {
        let pressed = held && !self.held;
        self.held = held;
        pressed
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Edge state for one player's buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLatches {
    pub jump: ButtonLatch,
    pub crouch: ButtonLatch,
}

impl InputLatches {
    /// Build this tick's controller input.
    pub fn frame_input(&mut self, input: &PlayerInput, mouse_scale: f32) -> FrameInput {
        FrameInput {
            move_axis: input.move_axis(),
            look_axis: input.look_axis(mouse_scale),
            jump_triggered: self.jump.update(input.actions.jump),
            sprint_held: input.actions.sprint,
            crouch_triggered: self.crouch.update(input.actions.crouch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_normalized() {
        let mut input = PlayerInput::default();
        input.movement.forward = true;
        input.movement.right = true;

        let axis = input.move_axis();
        assert!((axis.length() - 1.0).abs() < 1e-6);
        assert!(axis.x > 0.0 && axis.y > 0.0);
    }

    #[test]
    fn test_straight_movement_not_normalized() {
        let mut input = PlayerInput::default();
        input.movement.backward = true;

        assert_eq!(input.move_axis(), Vec2::new(0.0, -1.0));
        assert!(input.has_movement());
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut input = PlayerInput::default();
        input.movement.left = true;
        input.movement.right = true;
        assert_eq!(input.move_axis(), Vec2::ZERO);
    }

    #[test]
    fn test_mouse_up_is_positive_look() {
        let input = PlayerInput {
            mouse_delta: (10.0, -20.0),
            ..Default::default()
        };
        let look = input.look_axis(0.1);
        assert!((look - Vec2::new(1.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn test_button_latch_edges() {
        let mut latch = ButtonLatch::default();
        assert!(!latch.update(false));
        assert!(latch.update(true));
        assert!(!latch.update(true), "holding must not re-fire");
        assert!(latch.is_held());
        assert!(!latch.update(false));
        assert!(latch.update(true));
    }

    #[test]
    fn test_frame_input_edges() {
        let mut latches = InputLatches::default();
        let mut input = PlayerInput::default();
        input.actions.crouch = true;
        input.actions.sprint = true;

        let first = latches.frame_input(&input, 0.1);
        assert!(first.crouch_triggered);
        assert!(first.sprint_held);
        assert!(!first.jump_triggered);

        let second = latches.frame_input(&input, 0.1);
        assert!(!second.crouch_triggered);
        assert!(second.sprint_held, "sprint is a held input");
    }
}
