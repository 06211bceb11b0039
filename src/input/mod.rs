use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod manifest;
pub mod stack;

pub use manifest::{PipelineFiles, parse_manifest};
pub use stack::{FrameStack, GroundTruth, load_frame_stack, load_ground_truth, resolve_bin_path};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("shape error: {0}")]
    Shape(String),
}

impl InputError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub const DEFAULT_DATA_DIR: &str = "dataset/data";
pub const DEFAULT_GT_DIR: &str = "data";

/// `<gt_dir>/<dataset>_gt.bin`
pub fn ground_truth_path(gt_dir: &Path, dataset: &str) -> PathBuf {
    gt_dir.join(format!("{dataset}_gt.bin"))
}
