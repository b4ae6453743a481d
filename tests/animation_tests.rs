//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step/cubic interpolation
//! - KeyframeCursor sequential access and jump fallback
//! - AnimationAction loop modes (Once, Loop, PingPong)
//! - AnimationClip duration and normalized frames
//! - AnimationMixer posing scene nodes

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Quat, Vec3};

use myth_player::animation::{
    AnimationAction, AnimationClip, AnimationMixer, Binder, Interpolatable, InterpolationMode,
    KeyframeCursor, KeyframeTrack, LoopMode, TargetPath, Track, TrackData, TrackMeta,
};
use myth_player::scene::{Node, Scene};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeTrack: Linear Interpolation
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_exact_keyframe() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor).unwrap(), 10.0));
    assert!(approx(track.sample_with_cursor(2.0, &mut cursor).unwrap(), 20.0));
}

#[test]
fn track_linear_clamps_outside_range() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![5.0_f32, 10.0], InterpolationMode::Linear);

    assert!(approx(track.sample(0.0).unwrap(), 5.0));
    assert!(approx(track.sample(99.0).unwrap(), 10.0));
}

#[test]
fn track_linear_vec3() {
    let track = KeyframeTrack::new(
        vec![0.0, 2.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    );

    let v = track.sample(0.5).unwrap();
    assert!(v.abs_diff_eq(Vec3::new(2.5, 5.0, 7.5), EPSILON));
}

#[test]
fn track_linear_quat_slerp() {
    let end = Quat::from_rotation_y(FRAC_PI_2);
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![Quat::IDENTITY, end], InterpolationMode::Linear);

    let q = track.sample(0.5).unwrap();
    let expected = Quat::from_rotation_y(FRAC_PI_2 / 2.0);
    assert!(q.abs_diff_eq(expected, 1e-4), "{q:?} vs {expected:?}");
    assert!(approx(q.length(), 1.0));
}

// ============================================================================
// KeyframeTrack: Step and Cubic Interpolation
// ============================================================================

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![1.0_f32, 2.0, 3.0],
        InterpolationMode::Step,
    );

    assert!(approx(track.sample(0.99).unwrap(), 1.0));
    assert!(approx(track.sample(1.0).unwrap(), 2.0));
    assert!(approx(track.sample(1.5).unwrap(), 2.0));
}

#[test]
fn track_cubic_f32_endpoints() {
    // (in_tangent, value, out_tangent) per keyframe
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 0.0, 0.0, 0.0, 10.0, 0.0],
        InterpolationMode::CubicSpline,
    );

    assert!(approx(track.sample(0.0).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 10.0));
}

#[test]
fn track_cubic_zero_tangents_is_smoothstep() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 0.0, 0.0, 0.0, 10.0, 0.0],
        InterpolationMode::CubicSpline,
    );

    assert!(approx(track.sample(0.5).unwrap(), 5.0));
    // smoothstep(0.25) = 0.15625
    assert!(approx(track.sample(0.25).unwrap(), 1.5625));
}

#[test]
fn track_empty_samples_none() {
    let track: KeyframeTrack<f32> = KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear);
    let mut cursor = KeyframeCursor::default();

    assert!(track.sample(0.5).is_none());
    assert!(track.sample_with_cursor(0.5, &mut cursor).is_none());
    assert!(approx(track.end_time(), 0.0));
}

// ============================================================================
// KeyframeCursor
// ============================================================================

fn ramp_track() -> KeyframeTrack<f32> {
    let times: Vec<f32> = (0..=10).map(|i| i as f32).collect();
    let values: Vec<f32> = times.iter().map(|t| t * 2.0).collect();
    KeyframeTrack::new(times, values, InterpolationMode::Linear)
}

#[test]
fn cursor_sequential_forward() {
    let track = ramp_track();
    let mut cursor = KeyframeCursor::default();

    for step in 0..100 {
        let t = step as f32 * 0.1;
        let v = track.sample_with_cursor(t, &mut cursor).unwrap();
        assert!((v - t * 2.0).abs() < 1e-4, "t={t}: {v}");
    }
    assert_eq!(cursor.last_index, 9);
}

#[test]
fn cursor_jump_back_falls_back_to_search() {
    let track = ramp_track();
    let mut cursor = KeyframeCursor::default();

    track.sample_with_cursor(9.5, &mut cursor);
    let v = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(v, 1.0));
    assert_eq!(cursor.last_index, 0);
}

#[test]
fn sample_matches_cursor_across_all_times() {
    let track = ramp_track();
    let mut cursor = KeyframeCursor::default();

    for step in (0..=120).rev() {
        let t = step as f32 * 0.1 - 1.0;
        let a = track.sample(t).unwrap();
        let b = track.sample_with_cursor(t, &mut cursor).unwrap();
        assert!(approx(a, b), "t={t}: {a} vs {b}");
    }
}

#[test]
fn cursor_single_keyframe() {
    let track = KeyframeTrack::new(vec![0.5], vec![42.0_f32], InterpolationMode::Linear);
    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(3.0, &mut cursor).unwrap(), 42.0));
}

// ============================================================================
// Interpolatable Implementations
// ============================================================================

#[test]
fn interpolatable_linear_impls() {
    assert!(approx(f32::interpolate_linear(2.0, 4.0, 0.25), 2.5));

    let v = Vec3::interpolate_linear(Vec3::ZERO, Vec3::ONE, 0.5);
    assert!(v.abs_diff_eq(Vec3::splat(0.5), EPSILON));

    let q = Quat::interpolate_linear(Quat::IDENTITY, Quat::from_rotation_x(1.0), 1.0);
    assert!(q.abs_diff_eq(Quat::from_rotation_x(1.0), 1e-4));
}

// ============================================================================
// AnimationClip
// ============================================================================

fn translation_track(node: &str, times: Vec<f32>, values: Vec<Vec3>) -> Track {
    Track {
        meta: TrackMeta {
            node_name: node.to_string(),
            target: TargetPath::Translation,
        },
        data: TrackData::Vector3(KeyframeTrack::new(times, values, InterpolationMode::Linear)),
    }
}

fn make_simple_clip(duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "simple".to_string(),
        vec![translation_track(
            "Body",
            vec![0.0, duration],
            vec![Vec3::ZERO, Vec3::new(duration, 0.0, 0.0)],
        )],
    ))
}

#[test]
fn clip_auto_duration() {
    let clip = AnimationClip::new(
        "multi".to_string(),
        vec![
            translation_track("A", vec![0.0, 2.0], vec![Vec3::ZERO, Vec3::ONE]),
            translation_track("B", vec![0.0, 3.5], vec![Vec3::ZERO, Vec3::ONE]),
        ],
    );
    assert!(approx(clip.duration, 3.5));
}

#[test]
fn clip_empty_tracks_zero_duration() {
    let clip = AnimationClip::new("nothing".to_string(), vec![]);
    assert!(approx(clip.duration, 0.0));
    assert!(approx(clip.frame_at(1.0), 0.0));
}

#[test]
fn clip_frames_are_normalized_to_one_thousand() {
    let clip = AnimationClip::empty("timeline", 10.0);
    assert!(approx(clip.frame_at(0.0), 0.0));
    assert!(approx(clip.frame_at(5.0), 500.0));
    assert!((clip.frame_at(0.7) - 70.0).abs() < 1e-3);
    assert!(approx(clip.progress_at(2.5), 0.25));
}

// ============================================================================
// AnimationAction Loop Modes
// ============================================================================

#[test]
fn action_loop_mode_once() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Once;

    action.update(1.5);
    assert!(approx(action.time, 1.5));
    action.update(1.5);
    assert!(approx(action.time, 2.0));
    assert!(action.paused, "Once clips pause at the end");
}

#[test]
fn action_loop_mode_loop() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.update(2.5);
    assert!(approx(action.time, 0.5));
}

#[test]
fn action_loop_mode_ping_pong() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::PingPong;

    action.update(2.5);
    assert!(approx(action.time, 1.5));
    action.update(2.0);
    assert!(approx(action.time, 0.5));
}

#[test]
fn action_paused_no_update() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.paused = true;
    action.update(1.0);
    assert!(approx(action.time, 0.0));
}

#[test]
fn action_disabled_no_update() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.enabled = false;
    action.update(1.0);
    assert!(approx(action.time, 0.0));
}

#[test]
fn action_time_scale() {
    let mut action = AnimationAction::new(make_simple_clip(10.0));
    action.time_scale = 2.0;
    action.update(1.5);
    assert!(approx(action.time, 3.0));
}

#[test]
fn action_set_time_works_while_paused() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.paused = true;
    action.set_time(1.25);
    assert!(approx(action.time, 1.25));
    action.set_time(5.0);
    assert!(approx(action.time, 1.0));
}

// ============================================================================
// AnimationMixer
// ============================================================================

fn scene_with_body() -> (Scene, myth_player::scene::NodeHandle, myth_player::scene::NodeHandle) {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("Root");
    let body = scene.add_to_parent(Node::new("Body"), root);
    (scene, root, body)
}

fn mixer_for(scene: &Scene, root: myth_player::scene::NodeHandle, duration: f32) -> AnimationMixer {
    let clip = make_simple_clip(duration);
    let bindings = Binder::bind(scene, root, &clip);
    let mut mixer = AnimationMixer::new();
    mixer.add_action(AnimationAction::new(clip).with_bindings(bindings));
    mixer
}

#[test]
fn mixer_advance_poses_bound_node() {
    let (mut scene, root, body) = scene_with_body();
    let mut mixer = mixer_for(&scene, root, 4.0);

    mixer.advance(1.0, &mut scene);
    assert!(approx(scene.get_node(body).unwrap().transform.position.x, 1.0));
    assert!(approx(mixer.time(), 1.0));
}

#[test]
fn mixer_global_time_is_unbounded() {
    let (mut scene, root, body) = scene_with_body();
    let mut mixer = mixer_for(&scene, root, 4.0);

    mixer.advance(5.0, &mut scene);
    assert!(approx(mixer.time(), 5.0));
    assert!(approx(mixer.action(0).unwrap().time, 1.0));
    assert!(approx(scene.get_node(body).unwrap().transform.position.x, 1.0));
}

#[test]
fn mixer_set_time_moves_paused_action() {
    let (mut scene, root, body) = scene_with_body();
    let mut mixer = mixer_for(&scene, root, 4.0);

    mixer.set_paused(true);
    mixer.advance(1.0, &mut scene);
    assert!(approx(mixer.action(0).unwrap().time, 0.0));

    mixer.set_time(3.0, &mut scene);
    assert!(approx(mixer.time(), 3.0));
    assert!(approx(scene.get_node(body).unwrap().transform.position.x, 3.0));
    assert!(mixer.action(0).unwrap().paused);
}

#[test]
fn binder_skips_missing_nodes() {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("Root");
    let clip = make_simple_clip(1.0);

    assert!(Binder::bind(&scene, root, &clip).is_empty());
}
