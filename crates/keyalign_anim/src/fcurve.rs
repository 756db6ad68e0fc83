// SPDX-License-Identifier: MIT OR Apache-2.0
//! F-curve definitions for the animation data model.

use crate::keyframe::Keyframe;
use serde::{Deserialize, Serialize};

/// A single animation curve targeting one property channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FCurve {
    /// Property path this curve animates (e.g. `"location"`)
    pub data_path: String,
    /// Index into the property for vector channels
    pub array_index: usize,
    /// Keyframes, kept sorted by time
    keyframes: Vec<Keyframe>,
}

impl FCurve {
    /// Create a new empty curve
    pub fn new(data_path: impl Into<String>, array_index: usize) -> Self {
        Self {
            data_path: data_path.into(),
            array_index,
            keyframes: Vec::new(),
        }
    }

    /// Add a keyframe
    pub fn add_keyframe(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
        self.sort_keyframes();
    }

    /// Sort keyframes by time
    fn sort_keyframes(&mut self) {
        self.keyframes
            .sort_by(|a, b| a.time().partial_cmp(&b.time()).unwrap());
    }

    /// Get all keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Get all keyframes mutably
    pub fn keyframes_mut(&mut self) -> &mut [Keyframe] {
        &mut self.keyframes
    }

    /// Get keyframe count
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Iterate over selected keyframes
    pub fn selected_keyframes(&self) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.iter().filter(|k| k.selected)
    }

    /// Iterate over selected keyframes mutably
    pub fn selected_keyframes_mut(&mut self) -> impl Iterator<Item = &mut Keyframe> {
        self.keyframes.iter_mut().filter(|k| k.selected)
    }

    /// Earliest time among selected keyframes, if any are selected
    pub fn min_selected_time(&self) -> Option<f32> {
        self.selected_keyframes().fold(None, |min, kf| match min {
            None => Some(kf.time()),
            Some(t) if kf.time() < t => Some(kf.time()),
            Some(t) => Some(t),
        })
    }

    /// Translate every selected keyframe (and its handles) in time.
    ///
    /// Returns the number of keyframes moved.
    pub fn offset_selected(&mut self, delta: f32) -> usize {
        let mut moved = 0;
        for kf in self.keyframes.iter_mut().filter(|k| k.selected) {
            kf.offset_time(delta);
            moved += 1;
        }
        if moved > 0 {
            self.sort_keyframes();
        }
        moved
    }

    /// Select or deselect every keyframe on this curve
    pub fn select_all(&mut self, selected: bool) {
        for kf in &mut self.keyframes {
            kf.selected = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_with_times(times: &[f32]) -> FCurve {
        let mut curve = FCurve::new("location", 0);
        for &t in times {
            curve.add_keyframe(Keyframe::new(t, t * 0.5).with_selected(true));
        }
        curve
    }

    #[test]
    fn test_keyframes_stay_sorted() {
        let mut curve = FCurve::new("rotation_euler", 2);
        curve.add_keyframe(Keyframe::new(30.0, 1.0));
        curve.add_keyframe(Keyframe::new(10.0, 2.0));
        curve.add_keyframe(Keyframe::new(20.0, 3.0));

        let times: Vec<f32> = curve.keyframes().iter().map(Keyframe::time).collect();
        assert_eq!(times, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_min_selected_time_ignores_unselected() {
        let mut curve = curve_with_times(&[5.0, 10.0]);
        curve.add_keyframe(Keyframe::new(1.0, 0.0));

        assert_eq!(curve.min_selected_time(), Some(5.0));
    }

    #[test]
    fn test_min_selected_time_empty_selection() {
        let mut curve = curve_with_times(&[5.0, 10.0]);
        curve.select_all(false);

        assert_eq!(curve.min_selected_time(), None);
    }

    #[test]
    fn test_offset_selected_skips_unselected() {
        let mut curve = curve_with_times(&[5.0, 10.0]);
        curve.add_keyframe(Keyframe::new(7.0, 0.0));
        let moved = curve.offset_selected(100.0);

        assert_eq!(moved, 2);
        let times: Vec<f32> = curve.keyframes().iter().map(Keyframe::time).collect();
        assert_eq!(times, vec![7.0, 105.0, 110.0]);
    }
}
