// SPDX-License-Identifier: MIT OR Apache-2.0
//! The align-first-keyframe operator.
//!
//! Shifts the earliest selected keyframe of each selected object to the
//! current frame, translating that object's remaining selected keyframes and
//! their handles by the same delta so relative timing is preserved. Each
//! object gets its own delta; there is no global earliest frame across
//! objects.

use crate::operator::{Operator, OperatorFlags, OperatorOutcome, Report};
use keyalign_anim::{Action, FCurve, Scene};

/// Earliest time among an action's selected keyframes, if any.
fn min_selected_time(action: &Action) -> Option<f32> {
    action
        .fcurves()
        .filter_map(FCurve::min_selected_time)
        .fold(None, |min, t| match min {
            None => Some(t),
            Some(m) if t < m => Some(t),
            Some(m) => Some(m),
        })
}

/// Shift each selected object's selected keyframes so the earliest lands on
/// the current frame.
///
/// Objects without animation data, without an action, or without selected
/// keyframes are skipped. The two failure cases leave the scene untouched:
/// an error report when nothing is selected, a warning report when the
/// selection has no movable keyframes.
pub fn align_selected_keyframes(scene: &mut Scene) -> OperatorOutcome {
    if !scene.has_selection() {
        return OperatorOutcome::cancelled(Report::error("No objects selected"));
    }

    let current_frame = scene.current_frame as f32;
    let mut moved_objects = 0usize;
    let mut moved_keyframes = 0usize;

    for object in scene.selected_objects_mut() {
        let Some(action) = object.action_mut() else {
            continue;
        };

        let Some(earliest) = min_selected_time(action) else {
            continue;
        };

        let delta = current_frame - earliest;
        let mut moved = 0usize;
        for curve in action.fcurves_mut() {
            moved += curve.offset_selected(delta);
        }

        tracing::debug!(
            object = %object.name,
            delta,
            keyframes = moved,
            "aligned earliest selected keyframe"
        );
        moved_objects += 1;
        moved_keyframes += moved;
    }

    if moved_keyframes == 0 {
        return OperatorOutcome::cancelled(Report::warning(
            "Selected objects have no movable keyframes",
        ));
    }

    tracing::info!(
        objects = moved_objects,
        keyframes = moved_keyframes,
        frame = scene.current_frame,
        "aligned selected keyframes to current frame"
    );
    OperatorOutcome::finished()
}

/// Operator wrapper around [`align_selected_keyframes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignFirstKeyframe;

impl AlignFirstKeyframe {
    /// Stable operator identifier
    pub const ID: &'static str = "anim.align_first_keyframe";
}

impl Operator for AlignFirstKeyframe {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn label(&self) -> &'static str {
        "Align First Keyframe To Current Frame"
    }

    fn description(&self) -> &'static str {
        "Align the earliest selected keyframe of each selected object to the current frame"
    }

    fn flags(&self) -> OperatorFlags {
        OperatorFlags::REGISTER_UNDO
    }

    fn execute(&self, scene: &mut Scene) -> OperatorOutcome {
        align_selected_keyframes(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{OperatorStatus, ReportLevel};
    use keyalign_anim::{
        Action, AnimData, ChannelBag, FCurve, Keyframe, Layer, ObjectId, SceneObject, Strip,
    };

    fn keyed_action(name: &str, times: &[f32]) -> Action {
        let mut curve = FCurve::new("location", 0);
        for &t in times {
            curve.add_keyframe(Keyframe::new(t, t * 2.0).with_selected(true));
        }
        let mut action = Action::single_layer(name);
        action.primary_channel_bag_mut().unwrap().add_curve(curve);
        action
    }

    fn animated_object(name: &str, times: &[f32]) -> SceneObject {
        SceneObject::new(name)
            .with_selected(true)
            .with_action(keyed_action(name, times))
    }

    fn selected_times(scene: &Scene, id: ObjectId) -> Vec<f32> {
        scene
            .object(id)
            .unwrap()
            .action()
            .unwrap()
            .selected_keyframes()
            .map(Keyframe::time)
            .collect()
    }

    #[test]
    fn test_earliest_lands_on_current_frame() {
        let mut scene = Scene::new();
        let id = scene.add_object(animated_object("Cube", &[5.0, 10.0, 15.0]));
        scene.current_frame = 50;

        let outcome = align_selected_keyframes(&mut scene);

        assert_eq!(outcome.status, OperatorStatus::Finished);
        assert_eq!(selected_times(&scene, id), vec![50.0, 55.0, 60.0]);
    }

    #[test]
    fn test_handles_move_by_same_delta() {
        let mut curve = FCurve::new("location", 1);
        curve.add_keyframe(
            Keyframe::new(10.0, 2.0)
                .with_handles([8.5, 1.5], [11.5, 2.5])
                .with_selected(true),
        );
        let mut action = Action::single_layer("Sway");
        action.primary_channel_bag_mut().unwrap().add_curve(curve);

        let mut scene = Scene::new();
        let id = scene.add_object(
            SceneObject::new("Lamp")
                .with_selected(true)
                .with_action(action),
        );
        scene.current_frame = 30;

        align_selected_keyframes(&mut scene);

        let object = scene.object(id).unwrap();
        let kf = object.action().unwrap().selected_keyframes().next().unwrap();
        assert_eq!(kf.co, [30.0, 2.0]);
        assert_eq!(kf.handle_left, [28.5, 1.5]);
        assert_eq!(kf.handle_right, [31.5, 2.5]);
    }

    #[test]
    fn test_values_unchanged_bit_for_bit() {
        let mut scene = Scene::new();
        let id = scene.add_object(animated_object("Cube", &[3.25, 7.75]));
        scene.current_frame = 12;

        let before: Vec<u32> = scene
            .object(id)
            .unwrap()
            .action()
            .unwrap()
            .selected_keyframes()
            .map(|kf| kf.value().to_bits())
            .collect();

        align_selected_keyframes(&mut scene);

        let after: Vec<u32> = scene
            .object(id)
            .unwrap()
            .action()
            .unwrap()
            .selected_keyframes()
            .map(|kf| kf.value().to_bits())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_per_object_deltas_are_independent() {
        let mut scene = Scene::new();
        let a = scene.add_object(animated_object("A", &[5.0, 10.0, 15.0]));
        let b = scene.add_object(animated_object("B", &[100.0, 120.0]));
        scene.current_frame = 50;

        let outcome = align_selected_keyframes(&mut scene);

        assert!(outcome.is_finished());
        assert_eq!(selected_times(&scene, a), vec![50.0, 55.0, 60.0]);
        assert_eq!(selected_times(&scene, b), vec![50.0, 70.0]);
    }

    #[test]
    fn test_no_selected_objects_is_error() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new("Unselected").with_action(keyed_action("Idle", &[1.0])));
        scene.current_frame = 10;

        let outcome = align_selected_keyframes(&mut scene);

        assert_eq!(outcome.status, OperatorStatus::Cancelled);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].level, ReportLevel::Error);
    }

    #[test]
    fn test_selection_without_keyframes_is_warning() {
        let mut scene = Scene::new();
        // One selected object with no animation data at all, one with an
        // action whose keyframes are unselected.
        scene.add_object(SceneObject::new("Plain").with_selected(true));
        let mut action = keyed_action("Idle", &[2.0, 4.0]);
        for curve in action.fcurves_mut() {
            curve.select_all(false);
        }
        let id = scene.add_object(
            SceneObject::new("Animated")
                .with_selected(true)
                .with_action(action),
        );
        scene.current_frame = 99;

        let outcome = align_selected_keyframes(&mut scene);

        assert_eq!(outcome.status, OperatorStatus::Cancelled);
        assert_eq!(outcome.reports[0].level, ReportLevel::Warning);
        let times: Vec<f32> = scene
            .object(id)
            .unwrap()
            .action()
            .unwrap()
            .fcurves()
            .flat_map(|c| c.keyframes().iter().map(Keyframe::time))
            .collect();
        assert_eq!(times, vec![2.0, 4.0]);
    }

    #[test]
    fn test_object_with_anim_data_but_no_action_is_skipped() {
        let mut scene = Scene::new();
        let mut bare = SceneObject::new("Bare").with_selected(true);
        bare.anim = Some(AnimData::default());
        scene.add_object(bare);
        let id = scene.add_object(animated_object("Moving", &[8.0]));
        scene.current_frame = 20;

        let outcome = align_selected_keyframes(&mut scene);

        assert!(outcome.is_finished());
        assert_eq!(selected_times(&scene, id), vec![20.0]);
    }

    #[test]
    fn test_second_run_at_same_frame_is_noop() {
        let mut scene = Scene::new();
        let id = scene.add_object(animated_object("Cube", &[5.0, 9.0]));
        scene.current_frame = 40;

        assert!(align_selected_keyframes(&mut scene).is_finished());
        let first = selected_times(&scene, id);

        // Delta is zero on the rerun, so times stay put; the second run still
        // counts as finished because keyframes were (vacuously) moved by 0.
        assert!(align_selected_keyframes(&mut scene).is_finished());
        assert_eq!(selected_times(&scene, id), first);
        assert_eq!(first, vec![40.0, 44.0]);
    }

    #[test]
    fn test_negative_delta_moves_backwards() {
        let mut scene = Scene::new();
        let id = scene.add_object(animated_object("Late", &[100.0, 120.0]));
        scene.current_frame = 50;

        align_selected_keyframes(&mut scene);

        assert_eq!(selected_times(&scene, id), vec![50.0, 70.0]);
    }

    #[test]
    fn test_fractional_times_keep_offsets_exact() {
        let mut scene = Scene::new();
        let id = scene.add_object(animated_object("Frac", &[2.5, 4.5, 8.5]));
        scene.current_frame = 10;

        align_selected_keyframes(&mut scene);

        assert_eq!(selected_times(&scene, id), vec![10.0, 12.0, 16.0]);
    }

    #[test]
    fn test_minimum_spans_curves_and_layers() {
        // The earliest selected keyframe sits on a second layer; the delta
        // must still be computed across the whole hierarchy.
        let mut action = keyed_action("Base", &[20.0, 30.0]);
        let mut overlay_curve = FCurve::new("scale", 0);
        overlay_curve.add_keyframe(Keyframe::new(10.0, 1.0).with_selected(true));
        let mut bag = ChannelBag::new();
        bag.add_curve(overlay_curve);
        let mut strip = Strip::new();
        strip.add_channel_bag(bag);
        let mut layer = Layer::new("Overlay");
        layer.add_strip(strip);
        action.add_layer(layer);

        let mut scene = Scene::new();
        let id = scene.add_object(
            SceneObject::new("Layered")
                .with_selected(true)
                .with_action(action),
        );
        scene.current_frame = 100;

        align_selected_keyframes(&mut scene);

        let mut times = selected_times(&scene, id);
        times.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(times, vec![100.0, 110.0, 120.0]);
    }

    #[test]
    fn test_unselected_keyframes_on_moved_curve_stay_put() {
        let mut curve = FCurve::new("location", 0);
        curve.add_keyframe(Keyframe::new(5.0, 0.0).with_selected(true));
        curve.add_keyframe(Keyframe::new(7.0, 0.0));
        curve.add_keyframe(Keyframe::new(9.0, 0.0).with_selected(true));
        let mut action = Action::single_layer("Partial");
        action.primary_channel_bag_mut().unwrap().add_curve(curve);

        let mut scene = Scene::new();
        let id = scene.add_object(
            SceneObject::new("Mixed")
                .with_selected(true)
                .with_action(action),
        );
        scene.current_frame = 20;

        align_selected_keyframes(&mut scene);

        let object = scene.object(id).unwrap();
        let curve = object.action().unwrap().fcurves().next().unwrap();
        let times: Vec<f32> = curve.keyframes().iter().map(Keyframe::time).collect();
        assert_eq!(times, vec![7.0, 20.0, 24.0]);
    }

    #[test]
    fn test_operator_wrapper_metadata() {
        let op = AlignFirstKeyframe;
        assert_eq!(op.id(), AlignFirstKeyframe::ID);
        assert!(op.flags().undo);
        assert!(op.flags().register);
        assert!(op.poll(&Scene::new()));
    }
}
