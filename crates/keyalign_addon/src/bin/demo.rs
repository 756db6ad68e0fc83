// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless KeyAlign demo.
//!
//! Builds a small scene with two animated objects, registers the add-on,
//! invokes the operator, and logs the resulting keyframe times. Exercises
//! the registration path end-to-end without an egui host.

use keyalign_addon::{AlignFirstKeyframe, EditorServices, KeyAlignAddon, RegistryError};
use keyalign_anim::{Action, FCurve, Keyframe, Scene, SceneObject};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("keyalign_addon=debug".parse().unwrap())
        .add_directive("keyalign_demo=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("KeyAlign demo v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        tracing::error!("demo failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RegistryError> {
    let mut scene = demo_scene();
    let mut services = EditorServices::new();
    let handle = KeyAlignAddon::register(&mut services)?;

    log_times(&scene, "before");

    let outcome = services.invoke(AlignFirstKeyframe::ID, &mut scene)?;
    for report in &outcome.reports {
        tracing::warn!(level = report.level.name(), "{}", report.message);
    }
    tracing::info!(finished = outcome.is_finished(), "operator returned");

    log_times(&scene, "after");

    KeyAlignAddon::unregister(&mut services, handle);
    Ok(())
}

/// Two selected objects with different earliest keyframes, playhead at 50.
fn demo_scene() -> Scene {
    let mut scene = Scene::new();
    scene.current_frame = 50;
    scene.add_object(object_with_keys("Walker", &[5.0, 10.0, 15.0]));
    scene.add_object(object_with_keys("Door", &[100.0, 120.0]));
    scene.add_object(SceneObject::new("Camera"));
    scene
}

fn object_with_keys(name: &str, times: &[f32]) -> SceneObject {
    let mut curve = FCurve::new("location", 0);
    for &t in times {
        curve.add_keyframe(Keyframe::new(t, t * 0.1).with_selected(true));
    }
    let mut action = Action::single_layer(format!("{name}Action"));
    action
        .primary_channel_bag_mut()
        .expect("single_layer action always has a channel bag")
        .add_curve(curve);
    SceneObject::new(name).with_selected(true).with_action(action)
}

fn log_times(scene: &Scene, stage: &str) {
    for object in scene.selected_objects() {
        let Some(action) = object.action() else {
            continue;
        };
        let times: Vec<f32> = action.selected_keyframes().map(Keyframe::time).collect();
        tracing::info!(object = %object.name, ?times, "{stage}");
    }
}
