use serde::Serialize;
use tracing::debug;

use crate::input::{FrameStack, GroundTruth};
use crate::model::dims::{EVAL_COLS, EVAL_ROW_START, EVAL_ROWS};
use crate::pipeline::EvalError;
use crate::pipeline::classify::classify_depth_points;

/// Frame whose quality scores define the cut points.
pub const QUALITY_SAMPLE_FRAME: usize = 1;
/// Leading cut point, below any real score, so the first point keeps every pixel.
pub const SENTINEL_CUT: f32 = -0.0001;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateCurve {
    pub inlier_rate: Vec<f64>,
    pub outlier_rate: Vec<f64>,
    pub thresholds: Vec<f32>,
    pub frames: usize,
    pub valid_pixels: usize,
}

/// Sentinel followed by every `stride`-th value of `sorted`, where
/// `stride = floor(len / num_points)` (at least 1).
pub fn cut_points_from_sorted(sorted: &[f32], num_points: usize) -> Vec<f32> {
    let stride = (sorted.len() / num_points.max(1)).max(1);
    let mut out = Vec::with_capacity(sorted.len() / stride + 2);
    out.push(SENTINEL_CUT);
    out.extend(sorted.iter().step_by(stride).copied());
    out
}

pub fn sweep_cut_points(quality: &FrameStack, num_points: usize) -> Result<Vec<f32>, EvalError> {
    if num_points == 0 {
        return Err(EvalError::InvalidSweep(
            "number of sweep points must be at least 1".to_string(),
        ));
    }
    let frame = quality
        .frame(QUALITY_SAMPLE_FRAME)
        .ok_or(EvalError::FrameOutOfRange {
            frame: QUALITY_SAMPLE_FRAME,
            frames: quality.frames(),
        })?;
    let mut sorted = frame.to_vec();
    sorted.sort_by(f32::total_cmp);
    Ok(cut_points_from_sorted(&sorted, num_points))
}

/// Sweeps the quality cut points and reports, per cut point, the mean over
/// frames of the fraction of valid ground-truth pixels that are inliers
/// (resp. outliers) with quality above the cut.
///
/// With no valid ground-truth pixels or no frames every rate is 0.
pub fn generate_inlier_outlier_rates(
    quality: &FrameStack,
    depth: &FrameStack,
    ground_truth: &GroundTruth,
    inlier_threshold: f32,
    num_points: usize,
    num_frames: usize,
) -> Result<RateCurve, EvalError> {
    if num_frames > quality.frames() {
        return Err(EvalError::FrameOutOfRange {
            frame: num_frames - 1,
            frames: quality.frames(),
        });
    }
    let thresholds = sweep_cut_points(quality, num_points)?;
    let masks = classify_depth_points(depth, ground_truth, inlier_threshold, num_frames)?;

    let num_thresh = thresholds.len();
    let mut inlier_counts = vec![vec![0usize; num_thresh]; num_frames];
    let mut outlier_counts = vec![vec![0usize; num_thresh]; num_frames];

    let mut inlier_scores = Vec::new();
    let mut outlier_scores = Vec::new();
    for frame in 0..masks.frames() {
        inlier_scores.clear();
        outlier_scores.clear();
        let inliers = masks.inliers(frame);
        let outliers = masks.outliers(frame);
        for r in 0..EVAL_ROWS {
            for c in 0..EVAL_COLS {
                let idx = r * EVAL_COLS + c;
                if inliers[idx] {
                    inlier_scores.push(quality.get(EVAL_ROW_START + r, c, frame));
                } else if outliers[idx] {
                    outlier_scores.push(quality.get(EVAL_ROW_START + r, c, frame));
                }
            }
        }
        for (t, &cut) in thresholds.iter().enumerate() {
            inlier_counts[frame][t] = inlier_scores.iter().filter(|&&q| q > cut).count();
            outlier_counts[frame][t] = outlier_scores.iter().filter(|&&q| q > cut).count();
        }
    }

    let valid_pixels = ground_truth.positive_count();
    let inlier_rate = mean_rates(&inlier_counts, valid_pixels, num_thresh);
    let outlier_rate = mean_rates(&outlier_counts, valid_pixels, num_thresh);
    debug!(
        cut_points = num_thresh,
        frames = num_frames,
        valid_pixels,
        "computed inlier/outlier rates"
    );

    Ok(RateCurve {
        inlier_rate,
        outlier_rate,
        thresholds,
        frames: num_frames,
        valid_pixels,
    })
}

fn mean_rates(counts: &[Vec<usize>], valid_pixels: usize, num_thresh: usize) -> Vec<f64> {
    if valid_pixels == 0 || counts.is_empty() {
        return vec![0.0; num_thresh];
    }
    let denom = valid_pixels as f64;
    let n_frames = counts.len() as f64;
    (0..num_thresh)
        .map(|t| {
            let sum: f64 = counts.iter().map(|row| row[t] as f64 / denom).sum();
            sum / n_frames
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/rates.rs"]
mod tests;
