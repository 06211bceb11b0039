use std::path::PathBuf;

use tracing::{info, warn};

use crate::input::{
    FrameStack, GroundTruth, ground_truth_path, load_frame_stack, load_ground_truth,
    parse_manifest,
};
use crate::model::dims::{FRAME_HEIGHT, FRAME_WIDTH, GT_COLS, GT_ROWS};
use crate::pipeline::{EvalContext, EvalError};
use crate::plot::frames::{frame_figure_path, render_frame_panels};
use crate::report::{FrameFigure, FramesReport, write_frames_report};

/// One grayscale panel of a frame figure, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePanel {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
}

impl FramePanel {
    /// `(min, max)` over finite values, `(0, 0)` when there are none.
    pub fn value_range(&self) -> (f32, f32) {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for &v in self.values.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo > hi { (0.0, 0.0) } else { (lo, hi) }
    }
}

/// Raw depth, confidence, confidence-filtered depth and ground truth for
/// frame `frame` of one pipeline.
pub fn frame_panels(
    depth: &FrameStack,
    conf: &FrameStack,
    ground_truth: &GroundTruth,
    pipeline: &str,
    dataset: &str,
    frame: usize,
    confidence_cutoff: f32,
) -> Result<[FramePanel; 4], EvalError> {
    let depth_frame = depth.frame(frame).ok_or(EvalError::FrameOutOfRange {
        frame,
        frames: depth.frames(),
    })?;
    let conf_frame = conf.frame(frame).ok_or(EvalError::FrameOutOfRange {
        frame,
        frames: conf.frames(),
    })?;

    let filtered = depth_frame
        .iter()
        .zip(conf_frame)
        .map(|(&d, &q)| if q < confidence_cutoff { 0.0 } else { d })
        .collect();

    let mut gt_values = Vec::with_capacity(GT_COLS * GT_ROWS);
    for c in 0..GT_COLS {
        for r in 0..GT_ROWS {
            gt_values.push(ground_truth.get(c, r));
        }
    }

    Ok([
        FramePanel {
            title: format!("Depth image without outlier rejection, {pipeline}"),
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
            values: depth_frame.to_vec(),
        },
        FramePanel {
            title: format!("Confidence image, {pipeline}"),
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
            values: conf_frame.to_vec(),
        },
        FramePanel {
            title: format!("Depth image with outlier rejection, {pipeline}"),
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
            values: filtered,
        },
        FramePanel {
            title: format!("Ground truth {dataset}"),
            width: GT_ROWS,
            height: GT_COLS,
            values: gt_values,
        },
    ])
}

/// Frame-inspection mode: one 2x2 figure per pipeline plus an index file.
pub fn visualize_frame(ctx: &EvalContext, frame: usize) -> Result<Vec<PathBuf>, EvalError> {
    let gt = load_ground_truth(&ground_truth_path(&ctx.gt_dir, &ctx.dataset))?;
    let pipelines = parse_manifest(&ctx.xml_path, &ctx.dataset, &ctx.data_dir)?;
    if pipelines.is_empty() {
        warn!(dataset = %ctx.dataset, "no files to be found");
    }

    let mut written = Vec::with_capacity(pipelines.len());
    let mut figures = Vec::with_capacity(pipelines.len());
    let sequences = pipelines
        .names()
        .into_iter()
        .zip(pipelines.depth_paths())
        .zip(pipelines.conf_paths());
    for ((name, depth_path), conf_path) in sequences {
        let depth = load_frame_stack(depth_path)?;
        let conf = load_frame_stack(conf_path)?;
        let panels = frame_panels(
            &depth,
            &conf,
            &gt,
            name,
            &ctx.dataset,
            frame,
            ctx.profile.confidence_cutoff,
        )?;

        let path = frame_figure_path(&ctx.out_dir, &ctx.dataset, name, frame);
        render_frame_panels(&path, &panels)?;
        info!(pipeline = %name, path = %path.display(), "wrote frame figure");

        figures.push(FrameFigure::new(name, &path, &panels));
        written.push(path);
    }

    let report = FramesReport {
        tool: env!("CARGO_PKG_NAME").to_string(),
        dataset: ctx.dataset.clone(),
        frame,
        figures,
    };
    write_frames_report(&ctx.out_dir, &report)?;

    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/visualize.rs"]
mod tests;
