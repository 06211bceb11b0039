//! Flat little-endian `f32` binaries: depth/confidence stacks and ground truth.
//!
//! Files carry no header; shapes follow from the fixed frame geometry in
//! [`crate::model::dims`]. Every accessor indexes the flat storage explicitly
//! so the axis ordering cannot drift.

use std::ffi::OsString;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use memmap2::Mmap;
use tracing::debug;

use crate::input::InputError;
use crate::model::dims::{
    FRAME_HEIGHT, FRAME_PIXELS, FRAME_WIDTH, GT_COLS, GT_PIXELS, GT_ROWS, gt_offset, stack_offset,
};

/// A stack of `424 x 512` frames, addressed as `[a, b, frame]` with
/// `a < 512` and `b < 424`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStack {
    data: Vec<f32>,
    frames: usize,
}

impl FrameStack {
    pub fn from_raw(data: Vec<f32>) -> Result<Self, InputError> {
        if data.is_empty() || data.len() % FRAME_PIXELS != 0 {
            return Err(InputError::Shape(format!(
                "{} values cannot be reshaped into frames of {}x{}",
                data.len(),
                FRAME_HEIGHT,
                FRAME_WIDTH
            )));
        }
        let frames = data.len() / FRAME_PIXELS;
        Ok(Self { data, frames })
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Logical shape `(512, 424, frames)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (FRAME_WIDTH, FRAME_HEIGHT, self.frames)
    }

    #[inline]
    pub fn get(&self, a: usize, b: usize, frame: usize) -> f32 {
        self.data[stack_offset(a, b, frame)]
    }

    /// Frame `frame` in display orientation: `424` rows of `512` values.
    pub fn frame(&self, frame: usize) -> Option<&[f32]> {
        if frame >= self.frames {
            return None;
        }
        let start = frame * FRAME_PIXELS;
        Some(&self.data[start..start + FRAME_PIXELS])
    }
}

/// Ground truth for one dataset, addressed as `[c, r]` with `c < 424` and
/// `r < 510`. Non-positive values mark pixels without ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    data: Vec<f32>,
}

impl GroundTruth {
    pub fn from_raw(data: Vec<f32>) -> Result<Self, InputError> {
        if data.len() != GT_PIXELS {
            return Err(InputError::Shape(format!(
                "ground truth has {} values, expected {}x{}",
                data.len(),
                GT_ROWS,
                GT_COLS
            )));
        }
        Ok(Self { data })
    }

    /// Logical shape `(424, 510)`.
    pub fn shape(&self) -> (usize, usize) {
        (GT_COLS, GT_ROWS)
    }

    #[inline]
    pub fn get(&self, c: usize, r: usize) -> f32 {
        self.data[gt_offset(r, c)]
    }

    /// Element `[r, c]` of the transposed `(510, 424)` view used for
    /// classification.
    #[inline]
    pub fn transposed(&self, r: usize, c: usize) -> f32 {
        self.data[gt_offset(r, c)]
    }

    pub fn positive_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0.0).count()
    }
}

pub fn load_frame_stack(path: &Path) -> Result<FrameStack, InputError> {
    let data = read_f32_file(path)?;
    let stack = FrameStack::from_raw(data).map_err(|e| with_path(e, path))?;
    debug!(path = %path.display(), shape = ?stack.shape(), "loaded frame stack");
    Ok(stack)
}

pub fn load_ground_truth(path: &Path) -> Result<GroundTruth, InputError> {
    let data = read_f32_file(path)?;
    let gt = GroundTruth::from_raw(data).map_err(|e| with_path(e, path))?;
    debug!(
        path = %path.display(),
        shape = ?gt.shape(),
        valid_pixels = gt.positive_count(),
        "loaded ground truth"
    );
    Ok(gt)
}

/// Returns `path` when it exists, otherwise `path.gz` when that exists.
pub fn resolve_bin_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    let mut gz = OsString::from(path.as_os_str());
    gz.push(".gz");
    let gz = PathBuf::from(gz);
    if gz.is_file() { Some(gz) } else { None }
}

fn read_f32_file(path: &Path) -> Result<Vec<f32>, InputError> {
    let resolved = resolve_bin_path(path).unwrap_or_else(|| path.to_path_buf());
    let file = File::open(&resolved).map_err(|e| InputError::io(&resolved, e))?;

    if resolved.extension().is_some_and(|ext| ext == "gz") {
        let mut bytes = Vec::new();
        GzDecoder::new(file)
            .read_to_end(&mut bytes)
            .map_err(|e| InputError::io(&resolved, e))?;
        return decode_f32_le(&bytes, &resolved);
    }

    let len = file
        .metadata()
        .map_err(|e| InputError::io(&resolved, e))?
        .len();
    if len == 0 {
        return Ok(Vec::new());
    }
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| InputError::io(&resolved, e))?;
    decode_f32_le(&mmap, &resolved)
}

fn with_path(err: InputError, path: &Path) -> InputError {
    match err {
        InputError::Shape(msg) => InputError::Shape(format!("{}: {msg}", path.display())),
        other => other,
    }
}

fn decode_f32_le(bytes: &[u8], path: &Path) -> Result<Vec<f32>, InputError> {
    if bytes.len() % 4 != 0 {
        return Err(InputError::Shape(format!(
            "{}: {} bytes is not a whole number of f32 values",
            path.display(),
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/stack.rs"]
mod tests;
