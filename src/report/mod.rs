use std::path::Path;

use serde::Serialize;

use crate::model::profile::{CurveStyle, EvalProfile};
use crate::pipeline::EvalError;
use crate::pipeline::compare::PipelineCurve;
use crate::pipeline::visualize::FramePanel;

pub mod json;
pub mod text;

pub const RATES_JSON: &str = "rates.json";
pub const RATES_TSV: &str = "rates.tsv";
pub const FRAMES_JSON: &str = "frames.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutPointRow {
    pub threshold: f32,
    pub inlier_rate: f64,
    pub outlier_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineRates {
    pub name: String,
    pub style: CurveStyle,
    pub sweep_points: usize,
    pub frames: usize,
    pub valid_pixels: usize,
    pub cut_points: Vec<CutPointRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateReport {
    pub tool: String,
    pub tool_version: String,
    pub dataset: String,
    pub inlier_threshold: f32,
    pub pipelines: Vec<PipelineRates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSummary {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameFigure {
    pub pipeline: String,
    pub file: String,
    pub panels: Vec<PanelSummary>,
}

impl FrameFigure {
    pub fn new(pipeline: &str, file: &Path, panels: &[FramePanel]) -> Self {
        Self {
            pipeline: pipeline.to_string(),
            file: file.display().to_string(),
            panels: panels
                .iter()
                .map(|p| {
                    let (min, max) = p.value_range();
                    PanelSummary {
                        title: p.title.clone(),
                        width: p.width,
                        height: p.height,
                        min,
                        max,
                    }
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramesReport {
    pub tool: String,
    pub dataset: String,
    pub frame: usize,
    pub figures: Vec<FrameFigure>,
}

pub fn build_rate_report(
    dataset: &str,
    profile: &EvalProfile,
    curves: &[PipelineCurve],
) -> RateReport {
    let pipelines = curves
        .iter()
        .map(|pc| PipelineRates {
            name: pc.name.clone(),
            style: pc.style,
            sweep_points: pc.sweep_points,
            frames: pc.curve.frames,
            valid_pixels: pc.curve.valid_pixels,
            cut_points: pc
                .curve
                .thresholds
                .iter()
                .zip(&pc.curve.inlier_rate)
                .zip(&pc.curve.outlier_rate)
                .map(|((&threshold, &inlier_rate), &outlier_rate)| CutPointRow {
                    threshold,
                    inlier_rate,
                    outlier_rate,
                })
                .collect(),
        })
        .collect();

    RateReport {
        tool: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        dataset: dataset.to_string(),
        inlier_threshold: profile.inlier_threshold,
        pipelines,
    }
}

pub fn write_rate_reports(out_dir: &Path, report: &RateReport) -> Result<(), EvalError> {
    json::write_json_file(&out_dir.join(RATES_JSON), report)?;
    text::write_text(&out_dir.join(RATES_TSV), &text::render_rates_tsv(report))?;
    Ok(())
}

pub fn write_frames_report(out_dir: &Path, report: &FramesReport) -> Result<(), EvalError> {
    json::write_json_file(&out_dir.join(FRAMES_JSON), report)
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
