use std::fs;
use std::path::Path;

use crate::pipeline::EvalError;
use crate::report::{RateReport, format_f64_6};

pub const RATES_TSV_HEADER: &str = "pipeline\tcut_index\tthreshold\tinlier_rate\toutlier_rate";

/// One row per pipeline and cut point, in evaluation order.
pub fn render_rates_tsv(report: &RateReport) -> String {
    let mut out = String::new();
    out.push_str(RATES_TSV_HEADER);
    out.push('\n');
    for pipeline in &report.pipelines {
        for (idx, row) in pipeline.cut_points.iter().enumerate() {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                pipeline.name,
                idx,
                row.threshold,
                format_f64_6(row.inlier_rate),
                format_f64_6(row.outlier_rate)
            ));
        }
    }
    out
}

pub fn write_text(path: &Path, contents: &str) -> Result<(), EvalError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| EvalError::Report(format!("{}: {e}", parent.display())))?;
        }
    }
    fs::write(path, contents).map_err(|e| EvalError::Report(format!("{}: {e}", path.display())))
}
