use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::input::InputError;

/// How a pipeline's rate curve is drawn on the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveStyle {
    Line,
    StarMarkers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalProfile {
    /// Absolute depth error below which a pixel counts as an inlier.
    pub inlier_threshold: f32,
    /// Confidence below which the visualizer blanks a depth pixel.
    pub confidence_cutoff: f32,
    pub default_sweep_points: usize,
    /// Per-pipeline sweep sizes; loaded entries are merged over the built-in map.
    #[serde(deserialize_with = "merge_sweep_points")]
    pub sweep_points: BTreeMap<String, usize>,
    pub marker_pipelines: Vec<String>,
}

impl EvalProfile {
    pub fn default_v1() -> Self {
        let mut sweep_points = BTreeMap::new();
        sweep_points.insert("kde".to_string(), 20);
        Self {
            inlier_threshold: 300.0,
            confidence_cutoff: 0.4,
            default_sweep_points: 1,
            sweep_points,
            marker_pipelines: vec!["microsoft".to_string()],
        }
    }

    /// Reads a JSON profile; absent fields keep their built-in values.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let raw = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
        serde_json::from_str(&raw)
            .map_err(|e| InputError::Parse(format!("profile {}: {e}", path.display())))
    }

    pub fn sweep_points_for(&self, pipeline: &str) -> usize {
        self.sweep_points
            .get(pipeline)
            .copied()
            .unwrap_or(self.default_sweep_points)
    }

    pub fn curve_style_for(&self, pipeline: &str) -> CurveStyle {
        if self.marker_pipelines.iter().any(|p| p == pipeline) {
            CurveStyle::StarMarkers
        } else {
            CurveStyle::Line
        }
    }
}

fn merge_sweep_points<'de, D>(deserializer: D) -> Result<BTreeMap<String, usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, usize>::deserialize(deserializer)?;
    let mut merged = EvalProfile::default_v1().sweep_points;
    merged.extend(overrides);
    Ok(merged)
}

impl Default for EvalProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/profile.rs"]
mod tests;
