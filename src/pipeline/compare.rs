use tracing::{info, warn};

use crate::input::{
    GroundTruth, PipelineFiles, ground_truth_path, load_frame_stack, load_ground_truth,
    parse_manifest,
};
use crate::model::profile::{CurveStyle, EvalProfile};
use crate::pipeline::rates::{RateCurve, generate_inlier_outlier_rates};
use crate::pipeline::{EvalContext, EvalError};
use crate::plot::curves::{rate_chart_path, render_rate_curves};
use crate::report::{build_rate_report, write_rate_reports};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineCurve {
    pub name: String,
    pub style: CurveStyle,
    pub sweep_points: usize,
    pub curve: RateCurve,
}

pub fn evaluate_pipeline(
    files: &PipelineFiles,
    ground_truth: &GroundTruth,
    profile: &EvalProfile,
) -> Result<PipelineCurve, EvalError> {
    let conf = load_frame_stack(&files.conf_path)?;
    let depth = load_frame_stack(&files.depth_path)?;
    if conf.frames() != depth.frames() {
        return Err(EvalError::FrameCountMismatch {
            pipeline: files.name.clone(),
            depth: depth.frames(),
            conf: conf.frames(),
        });
    }

    let sweep_points = profile.sweep_points_for(&files.name);
    let curve = generate_inlier_outlier_rates(
        &conf,
        &depth,
        ground_truth,
        profile.inlier_threshold,
        sweep_points,
        depth.frames(),
    )?;
    info!(
        pipeline = %files.name,
        setup = %files.setup_name,
        frames = depth.frames(),
        cut_points = curve.thresholds.len(),
        "evaluated pipeline"
    );

    Ok(PipelineCurve {
        name: files.name.clone(),
        style: profile.curve_style_for(&files.name),
        sweep_points,
        curve,
    })
}

/// Rate-curve mode: evaluates every pipeline in the manifest against the
/// dataset's ground truth, then writes one overlay chart and the reports.
pub fn compare_pipelines(ctx: &EvalContext) -> Result<Vec<PipelineCurve>, EvalError> {
    let gt = load_ground_truth(&ground_truth_path(&ctx.gt_dir, &ctx.dataset))?;
    let pipelines = parse_manifest(&ctx.xml_path, &ctx.dataset, &ctx.data_dir)?;
    if pipelines.is_empty() {
        warn!(dataset = %ctx.dataset, "no files to be found");
        return Ok(Vec::new());
    }
    info!(pipelines = ?pipelines.names(), "evaluating pipelines");

    let mut curves = Vec::with_capacity(pipelines.len());
    for files in pipelines.iter() {
        curves.push(evaluate_pipeline(files, &gt, &ctx.profile)?);
    }

    let chart = rate_chart_path(&ctx.out_dir, &ctx.dataset);
    render_rate_curves(&chart, &ctx.dataset, &curves)?;
    info!(path = %chart.display(), "wrote rate chart");

    let report = build_rate_report(&ctx.dataset, &ctx.profile, &curves);
    write_rate_reports(&ctx.out_dir, &report)?;

    Ok(curves)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/compare.rs"]
mod tests;
