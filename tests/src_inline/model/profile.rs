use super::*;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("depth_eval_profile_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_default_sweep_points() {
    let profile = EvalProfile::default_v1();
    assert_eq!(profile.sweep_points_for("kde"), 20);
    assert_eq!(profile.sweep_points_for("microsoft"), 1);
    assert_eq!(profile.sweep_points_for("libfreenect2"), 1);
    assert_eq!(profile.inlier_threshold, 300.0);
    assert_eq!(profile.confidence_cutoff, 0.4);
}

#[test]
fn test_curve_style_is_per_pipeline() {
    let profile = EvalProfile::default_v1();
    let order_a = ["microsoft", "kde", "libfreenect2"]
        .map(|name| profile.curve_style_for(name));
    let order_b = ["kde", "libfreenect2", "microsoft"]
        .map(|name| profile.curve_style_for(name));
    assert_eq!(
        order_a,
        [CurveStyle::StarMarkers, CurveStyle::Line, CurveStyle::Line]
    );
    assert_eq!(
        order_b,
        [CurveStyle::Line, CurveStyle::Line, CurveStyle::StarMarkers]
    );
}

#[test]
fn test_load_partial_profile_keeps_defaults() {
    let dir = make_temp_dir();
    let path = dir.join("profile.json");
    fs::write(&path, r#"{"inlier_threshold": 150.0, "sweep_points": {"tof": 5}}"#).unwrap();

    let profile = EvalProfile::load(&path).unwrap();
    assert_eq!(profile.inlier_threshold, 150.0);
    assert_eq!(profile.confidence_cutoff, 0.4);
    assert_eq!(profile.sweep_points_for("tof"), 5);
    assert_eq!(profile.sweep_points_for("kde"), 20);
    assert_eq!(profile.curve_style_for("microsoft"), CurveStyle::StarMarkers);
}

#[test]
fn test_load_sweep_points_override_builtin_entry() {
    let dir = make_temp_dir();
    let path = dir.join("profile.json");
    fs::write(&path, r#"{"sweep_points": {"kde": 5, "tof": 3}}"#).unwrap();

    let profile = EvalProfile::load(&path).unwrap();
    assert_eq!(profile.sweep_points_for("kde"), 5);
    assert_eq!(profile.sweep_points_for("tof"), 3);
    assert_eq!(profile.sweep_points_for("microsoft"), 1);
    assert_eq!(profile.sweep_points.len(), 2);
}

#[test]
fn test_load_invalid_profile() {
    let dir = make_temp_dir();
    let path = dir.join("profile.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(EvalProfile::load(&path), Err(InputError::Parse(_))));
}
