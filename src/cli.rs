use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::input::{DEFAULT_DATA_DIR, DEFAULT_GT_DIR};
use crate::model::profile::EvalProfile;
use crate::pipeline::EvalContext;

#[derive(Debug, Parser)]
#[command(name = "depth-eval")]
#[command(about = "Compare depth pipelines against ground truth via inlier/outlier rate curves")]
#[command(version)]
pub struct Cli {
    /// Directory holding `<pipeline>_{depth,conf}_<setup>_<dataset>.bin`
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory holding `<dataset>_gt.bin`
    #[arg(long, global = true, default_value = DEFAULT_GT_DIR)]
    pub gt_dir: PathBuf,

    /// Output directory for charts, figures and reports
    #[arg(long, global = true, default_value = ".")]
    pub out: PathBuf,

    /// JSON file overriding evaluation thresholds
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Plot inlier/outlier rate curves for every pipeline in the manifest
    Test { xml_file: PathBuf, dataset: String },
    /// Render raw, confidence, filtered and ground-truth panels for one frame
    Vis {
        xml_file: PathBuf,
        dataset: String,
        frame_num: usize,
    },
    #[command(external_subcommand)]
    Other(Vec<String>),
}

impl Cli {
    pub fn context(&self, xml_file: &Path, dataset: &str, profile: EvalProfile) -> EvalContext {
        EvalContext {
            xml_path: xml_file.to_path_buf(),
            dataset: dataset.to_string(),
            data_dir: self.data_dir.clone(),
            gt_dir: self.gt_dir.clone(),
            out_dir: self.out.clone(),
            profile,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
