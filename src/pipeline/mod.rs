use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputError;
use crate::model::profile::EvalProfile;

pub mod classify;
pub mod compare;
pub mod rates;
pub mod visualize;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("frame {frame} out of range for a stack of {frames} frames")]
    FrameOutOfRange { frame: usize, frames: usize },
    #[error("pipeline {pipeline}: depth stack has {depth} frames but confidence stack has {conf}")]
    FrameCountMismatch {
        pipeline: String,
        depth: usize,
        conf: usize,
    },
    #[error("invalid sweep: {0}")]
    InvalidSweep(String),
    #[error("plot error: {0}")]
    Plot(String),
    #[error("report error: {0}")]
    Report(String),
}

/// Everything a run needs to locate its inputs and place its outputs.
#[derive(Debug, Clone)]
pub struct EvalContext {
    pub xml_path: PathBuf,
    pub dataset: String,
    pub data_dir: PathBuf,
    pub gt_dir: PathBuf,
    pub out_dir: PathBuf,
    pub profile: EvalProfile,
}
