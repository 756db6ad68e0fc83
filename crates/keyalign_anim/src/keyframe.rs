// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions for the animation data model.

use serde::{Deserialize, Serialize};

/// Interpolation mode between keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InterpolationMode {
    /// Constant (step)
    Constant,
    /// Linear interpolation
    Linear,
    /// Cubic bezier interpolation
    #[default]
    Bezier,
}

/// A keyframe on an f-curve.
///
/// All coordinates are `[time, value]` pairs. The handle coordinates are
/// expressed in the same time unit as `co`, so translating all three x
/// components by the same delta shifts the curve in time without changing
/// its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Control point coordinate
    pub co: [f32; 2],
    /// Left (incoming) Bezier handle coordinate
    pub handle_left: [f32; 2],
    /// Right (outgoing) Bezier handle coordinate
    pub handle_right: [f32; 2],
    /// Interpolation mode to the next keyframe
    pub interpolation: InterpolationMode,
    /// Whether the control point is selected
    pub selected: bool,
}

impl Keyframe {
    /// Create a new keyframe with handles one frame to either side
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            co: [time, value],
            handle_left: [time - 1.0, value],
            handle_right: [time + 1.0, value],
            interpolation: InterpolationMode::Bezier,
            selected: false,
        }
    }

    /// Set explicit handle coordinates
    pub fn with_handles(mut self, handle_left: [f32; 2], handle_right: [f32; 2]) -> Self {
        self.handle_left = handle_left;
        self.handle_right = handle_right;
        self
    }

    /// Set the interpolation mode
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Set the selection flag
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Time coordinate of the control point
    pub fn time(&self) -> f32 {
        self.co[0]
    }

    /// Value coordinate of the control point
    pub fn value(&self) -> f32 {
        self.co[1]
    }

    /// Translate the control point and both handles in time.
    ///
    /// Value coordinates are left untouched.
    pub fn offset_time(&mut self, delta: f32) {
        self.co[0] += delta;
        self.handle_left[0] += delta;
        self.handle_right[0] += delta;
    }
}
