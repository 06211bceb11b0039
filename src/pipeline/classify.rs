use crate::input::{FrameStack, GroundTruth};
use crate::model::dims::{EVAL_COLS, EVAL_PIXELS, EVAL_ROW_START, EVAL_ROWS};
use crate::pipeline::EvalError;

/// Per-frame inlier/outlier labels over the `510 x 424` evaluation region,
/// stored frame-major then row-major (`[frame][r][c]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointMasks {
    frames: usize,
    inliers: Vec<bool>,
    outliers: Vec<bool>,
}

impl PointMasks {
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn inliers(&self, frame: usize) -> &[bool] {
        &self.inliers[frame * EVAL_PIXELS..(frame + 1) * EVAL_PIXELS]
    }

    pub fn outliers(&self, frame: usize) -> &[bool] {
        &self.outliers[frame * EVAL_PIXELS..(frame + 1) * EVAL_PIXELS]
    }
}

#[inline]
fn mask_offset(frame: usize, r: usize, c: usize) -> usize {
    frame * EVAL_PIXELS + r * EVAL_COLS + c
}

/// Labels every evaluation-region pixel of the first `num_frames` frames.
///
/// A pixel is an inlier when ground truth is positive and the depth estimate
/// lies strictly within `inlier_threshold` of it; an outlier when ground
/// truth and depth are both positive but the pixel is not an inlier.
pub fn classify_depth_points(
    depth: &FrameStack,
    ground_truth: &GroundTruth,
    inlier_threshold: f32,
    num_frames: usize,
) -> Result<PointMasks, EvalError> {
    if num_frames > depth.frames() {
        return Err(EvalError::FrameOutOfRange {
            frame: num_frames - 1,
            frames: depth.frames(),
        });
    }

    let mut inliers = vec![false; num_frames * EVAL_PIXELS];
    let mut outliers = vec![false; num_frames * EVAL_PIXELS];

    for frame in 0..num_frames {
        for r in 0..EVAL_ROWS {
            for c in 0..EVAL_COLS {
                let g = ground_truth.transposed(r, c);
                let d = depth.get(EVAL_ROW_START + r, c, frame);
                let idx = mask_offset(frame, r, c);
                let inlier = (g - d).abs() < inlier_threshold && g > 0.0;
                inliers[idx] = inlier;
                outliers[idx] = !inlier && g > 0.0 && d > 0.0;
            }
        }
    }

    Ok(PointMasks {
        frames: num_frames,
        inliers,
        outliers,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/classify.rs"]
mod tests;
