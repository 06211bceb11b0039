use super::*;
use crate::model::dims::{
    FRAME_PIXELS, FRAME_WIDTH, GT_PIXELS, gt_offset, stack_offset,
};

fn stack_with(frames: usize, value: impl Fn(usize, usize, usize) -> f32) -> FrameStack {
    let mut data = vec![0.0f32; frames * FRAME_PIXELS];
    for f in 0..frames {
        for b in 0..EVAL_COLS {
            for a in 0..FRAME_WIDTH {
                data[stack_offset(a, b, f)] = value(a, b, f);
            }
        }
    }
    FrameStack::from_raw(data).unwrap()
}

fn gt_with(value: impl Fn(usize, usize) -> f32) -> GroundTruth {
    let mut data = vec![0.0f32; GT_PIXELS];
    for r in 0..EVAL_ROWS {
        for c in 0..EVAL_COLS {
            data[gt_offset(r, c)] = value(r, c);
        }
    }
    GroundTruth::from_raw(data).unwrap()
}

#[test]
fn test_masks_cover_positive_depth_and_are_disjoint() {
    let gt = gt_with(|_, _| 1000.0);
    let depth = stack_with(2, |a, b, f| match (a + b + f) % 4 {
        0 => 1000.0,
        1 => 1500.0,
        2 => 0.0,
        _ => -5.0,
    });

    let masks = classify_depth_points(&depth, &gt, 300.0, 2).unwrap();
    assert_eq!(masks.frames(), 2);
    for f in 0..2 {
        let inliers = masks.inliers(f);
        let outliers = masks.outliers(f);
        for r in 0..EVAL_ROWS {
            for c in 0..EVAL_COLS {
                let idx = r * EVAL_COLS + c;
                let d = depth.get(EVAL_ROW_START + r, c, f);
                assert!(!(inliers[idx] && outliers[idx]));
                assert_eq!(inliers[idx] || outliers[idx], d > 0.0);
            }
        }
    }
}

#[test]
fn test_zero_ground_truth_has_no_labels() {
    let gt = gt_with(|_, _| 0.0);
    let depth = stack_with(1, |_, _, _| 500.0);
    let masks = classify_depth_points(&depth, &gt, 300.0, 1).unwrap();
    assert!(masks.inliers(0).iter().all(|&v| !v));
    assert!(masks.outliers(0).iter().all(|&v| !v));
}

#[test]
fn test_crop_skips_first_row() {
    let gt = gt_with(|_, _| 800.0);
    // Row 0 of the 512-long axis is garbage; row 1 matches ground truth.
    let depth = stack_with(1, |a, _, _| if a == 0 { 99_999.0 } else { 800.0 });
    let masks = classify_depth_points(&depth, &gt, 300.0, 1).unwrap();
    assert!(masks.inliers(0).iter().all(|&v| v));
    assert!(masks.outliers(0).iter().all(|&v| !v));
}

#[test]
fn test_threshold_is_strict() {
    let gt = gt_with(|_, _| 1000.0);
    let depth = stack_with(1, |_, _, _| 1300.0);
    let masks = classify_depth_points(&depth, &gt, 300.0, 1).unwrap();
    assert!(masks.inliers(0).iter().all(|&v| !v));
    assert!(masks.outliers(0).iter().all(|&v| v));
}

#[test]
fn test_partial_frame_range() {
    let gt = gt_with(|_, _| 1000.0);
    let depth = stack_with(3, |_, _, _| 1000.0);
    let masks = classify_depth_points(&depth, &gt, 300.0, 2).unwrap();
    assert_eq!(masks.frames(), 2);
}

#[test]
fn test_too_many_frames_is_error() {
    let gt = gt_with(|_, _| 1000.0);
    let depth = stack_with(1, |_, _, _| 1000.0);
    assert!(matches!(
        classify_depth_points(&depth, &gt, 300.0, 2),
        Err(EvalError::FrameOutOfRange { frame: 1, frames: 1 })
    ));
}
