//! Rate-curve chart: inlier rate against outlier rate on a log-scaled x axis.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::model::profile::CurveStyle;
use crate::pipeline::EvalError;
use crate::pipeline::compare::PipelineCurve;
use crate::pipeline::rates::RateCurve;

const CHART_SIZE: (u32, u32) = (1000, 700);
const LINE_COLORS: [RGBColor; 6] = [
    BLUE,
    RED,
    GREEN,
    MAGENTA,
    CYAN,
    RGBColor(255, 140, 0),
];
const STAR_SIZE: i32 = 6;

pub fn rate_chart_path(out_dir: &Path, dataset: &str) -> PathBuf {
    out_dir.join(format!("{dataset}_rates.svg"))
}

/// `(outlier_rate, inlier_rate)` pairs that can be placed on a log axis.
pub fn log_axis_points(curve: &RateCurve) -> Vec<(f64, f64)> {
    curve
        .outlier_rate
        .iter()
        .zip(&curve.inlier_rate)
        .filter(|(o, i)| **o > 0.0 && o.is_finite() && i.is_finite())
        .map(|(&o, &i)| (o, i))
        .collect()
}

pub fn render_rate_curves(
    out_path: &Path,
    title: &str,
    curves: &[PipelineCurve],
) -> Result<(), EvalError> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| EvalError::Plot(format!("{}: {e}", parent.display())))?;
    }
    draw_rate_curves(out_path, title, curves)
        .map_err(|e| EvalError::Plot(format!("{}: {e}", out_path.display())))
}

fn draw_rate_curves(
    out_path: &Path,
    title: &str,
    curves: &[PipelineCurve],
) -> Result<(), Box<dyn Error>> {
    let points: Vec<Vec<(f64, f64)>> = curves.iter().map(|c| log_axis_points(&c.curve)).collect();
    let (x_lo, x_hi) = x_bounds(&points);

    let root = SVGBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), 0.0f64..1.05f64)?;

    chart
        .configure_mesh()
        .x_desc("outlier rate")
        .y_desc("inlier rate")
        .draw()?;

    for (idx, (pipeline, pts)) in curves.iter().zip(&points).enumerate() {
        match pipeline.style {
            CurveStyle::Line => {
                let color = LINE_COLORS[idx % LINE_COLORS.len()];
                chart
                    .draw_series(LineSeries::new(pts.iter().copied(), color.stroke_width(2)))?
                    .label(pipeline.name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
            CurveStyle::StarMarkers => {
                let style = BLACK.stroke_width(2);
                let [h, v, d1, d2] = star_strokes(STAR_SIZE);
                chart
                    .draw_series(pts.iter().map(|&p| {
                        EmptyElement::at(p)
                            + PathElement::new(h, style)
                            + PathElement::new(v, style)
                            + PathElement::new(d1, style)
                            + PathElement::new(d2, style)
                    }))?
                    .label(pipeline.name.as_str())
                    .legend(move |(x, y)| {
                        EmptyElement::at((x + 10, y))
                            + PathElement::new(h, style)
                            + PathElement::new(v, style)
                            + PathElement::new(d1, style)
                            + PathElement::new(d2, style)
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Pixel strokes of an eight-pointed star centred on the origin.
fn star_strokes(size: i32) -> [[(i32, i32); 2]; 4] {
    let d = size * 7 / 10;
    [
        [(-size, 0), (size, 0)],
        [(0, -size), (0, size)],
        [(-d, -d), (d, d)],
        [(-d, d), (d, -d)],
    ]
}

fn x_bounds(points: &[Vec<(f64, f64)>]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &(x, _) in points.iter().flatten() {
        lo = lo.min(x);
        hi = hi.max(x);
    }
    if lo > hi {
        return (1e-4, 1.0);
    }
    (lo / 2.0, hi * 2.0)
}
