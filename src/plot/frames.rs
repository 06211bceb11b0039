//! 2x2 grayscale mosaics of the four frame panels.
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};

use crate::pipeline::EvalError;
use crate::pipeline::visualize::FramePanel;

const PANEL_GAP: usize = 4;
const GRID_COLS: usize = 2;

pub fn frame_figure_path(out_dir: &Path, dataset: &str, pipeline: &str, frame: usize) -> PathBuf {
    out_dir.join(format!("{dataset}_{pipeline}_frame{frame}.png"))
}

/// Maps `v` from `[lo, hi]` onto `0..=255`; non-finite values map to 0.
pub fn to_gray(v: f32, lo: f32, hi: f32) -> u8 {
    if !v.is_finite() || hi <= lo {
        return 0;
    }
    let t = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    (t * 255.0).round() as u8
}

/// Lays panels out row by row, two per row, each scaled to its own range.
pub fn compose_mosaic(panels: &[FramePanel]) -> GrayImage {
    let cell_w = panels.iter().map(|p| p.width).max().unwrap_or(0);
    let cell_h = panels.iter().map(|p| p.height).max().unwrap_or(0);
    let grid_rows = panels.len().div_ceil(GRID_COLS);
    let width = GRID_COLS * cell_w + (GRID_COLS - 1) * PANEL_GAP;
    let height = grid_rows * cell_h + grid_rows.saturating_sub(1) * PANEL_GAP;

    let mut out = GrayImage::from_pixel(width as u32, height as u32, Luma([255]));
    for (idx, panel) in panels.iter().enumerate() {
        let x0 = (idx % GRID_COLS) * (cell_w + PANEL_GAP);
        let y0 = (idx / GRID_COLS) * (cell_h + PANEL_GAP);
        let (lo, hi) = panel.value_range();
        for y in 0..panel.height {
            let row = &panel.values[y * panel.width..(y + 1) * panel.width];
            for (x, &v) in row.iter().enumerate() {
                out.put_pixel((x0 + x) as u32, (y0 + y) as u32, Luma([to_gray(v, lo, hi)]));
            }
        }
    }
    out
}

pub fn render_frame_panels(out_path: &Path, panels: &[FramePanel]) -> Result<(), EvalError> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| EvalError::Plot(format!("{}: {e}", parent.display())))?;
    }
    compose_mosaic(panels)
        .save(out_path)
        .map_err(|e| EvalError::Plot(format!("{}: {e}", out_path.display())))
}
