//! Opacity Keyframing Tests
//!
//! Tests for:
//! - The three-segment fade curve and its boundaries
//! - Zero-length clips
//! - Writing opacity into tagged materials only

use myth_player::fade::{FadeCurve, OpacityKeyframer, opacity};
use myth_player::scene::{PhysicalMaterial, Scene};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Fade Curve
// ============================================================================

#[test]
fn opaque_before_fade_window() {
    assert!(approx(opacity(0.0, 10.0), 1.0));
    // frame 50
    assert!(approx(opacity(0.5, 10.0), 1.0));
    // frame 59.9
    assert!(approx(opacity(0.599, 10.0), 1.0));
}

#[test]
fn linear_ramp_inside_fade_window() {
    // frame 70
    assert!(approx(opacity(0.7, 10.0), 0.75));
    // frame 65
    assert!(approx(opacity(0.65, 10.0), 0.875));
}

#[test]
fn half_transparent_after_fade_window() {
    // frame 900
    assert!(approx(opacity(9.0, 10.0), 0.5));
    // frame 80.1
    assert!(approx(opacity(0.801, 10.0), 0.5));
}

#[test]
fn boundaries_are_continuous() {
    let curve = FadeCurve::default();
    assert!(approx(curve.opacity_at_frame(60.0), 1.0));
    assert!(approx(curve.opacity_at_frame(80.0), 0.5));
    assert!(approx(curve.opacity_at_frame(59.999), 1.0));
    assert!(approx(curve.opacity_at_frame(80.001), 0.5));
}

#[test]
fn fade_depends_on_normalized_frame_not_seconds() {
    // frame 70 of a 2 s clip and of a 100 s clip
    assert!(approx(opacity(0.14, 2.0), 0.75));
    assert!(approx(opacity(7.0, 100.0), 0.75));
}

#[test]
fn zero_duration_stays_opaque() {
    assert!(approx(opacity(0.0, 0.0), 1.0));
    assert!(approx(opacity(5.0, 0.0), 1.0));
    assert!(approx(opacity(1.0, -1.0), 1.0));
}

#[test]
fn opacity_stays_in_range() {
    for i in 0..=2000 {
        let t = i as f32 * 0.005;
        let value = opacity(t, 10.0);
        assert!((0.5..=1.0).contains(&value), "t={t}: {value}");
    }
}

#[test]
fn custom_curve() {
    let curve = FadeCurve {
        start_frame: 100.0,
        end_frame: 200.0,
        opaque: 0.8,
        faded: 0.2,
    };
    assert!(approx(curve.opacity_at_frame(50.0), 0.8));
    assert!(approx(curve.opacity_at_frame(150.0), 0.5));
    assert!(approx(curve.opacity_at_frame(500.0), 0.2));
}

// ============================================================================
// Applying to Materials
// ============================================================================

fn scene_with_materials() -> (Scene, myth_player::scene::MaterialKey, myth_player::scene::MaterialKey) {
    let mut scene = Scene::new();
    let fade = scene.add_material(PhysicalMaterial::fade_replacement());
    let plain = scene.add_material(PhysicalMaterial::default());
    (scene, fade, plain)
}

#[test]
fn update_writes_only_tagged_materials() {
    let (mut scene, fade, plain) = scene_with_materials();
    let keyframer = OpacityKeyframer::default();

    let value = keyframer.update(&mut scene, 0.7, 10.0);

    assert!(approx(value, 0.75));
    assert!(approx(scene.get_material(fade).unwrap().opacity(), 0.75));
    assert!(approx(scene.get_material(plain).unwrap().opacity(), 1.0));
}

#[test]
fn apply_counts_changed_materials() {
    let (mut scene, _, _) = scene_with_materials();
    scene.add_material(PhysicalMaterial::fade_replacement());

    assert_eq!(OpacityKeyframer::apply(&mut scene, 0.5), 2);
    assert_eq!(OpacityKeyframer::apply(&mut scene, 0.5), 0, "unchanged value");
}

#[test]
fn fade_replays_after_loop() {
    let (mut scene, fade, _) = scene_with_materials();
    let keyframer = OpacityKeyframer::default();

    keyframer.update(&mut scene, 9.0, 10.0);
    assert!(approx(scene.get_material(fade).unwrap().opacity(), 0.5));

    // wrapped back to the start of the clip
    keyframer.update(&mut scene, 0.1, 10.0);
    assert!(approx(scene.get_material(fade).unwrap().opacity(), 1.0));
}
