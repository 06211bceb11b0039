//! Fixed sensor geometry shared by every loader and evaluation stage.
//!
//! Depth and confidence stacks are recorded as `424 x 512` frames; ground
//! truth covers `510 x 424` pixels. The evaluation region is the slice
//! `[EVAL_ROW_START, EVAL_ROW_END)` of the 512-long axis of a loaded stack.

pub const FRAME_HEIGHT: usize = 424;
pub const FRAME_WIDTH: usize = 512;
pub const FRAME_PIXELS: usize = FRAME_HEIGHT * FRAME_WIDTH;

pub const GT_ROWS: usize = 510;
pub const GT_COLS: usize = 424;
pub const GT_PIXELS: usize = GT_ROWS * GT_COLS;

pub const EVAL_ROW_START: usize = 1;
pub const EVAL_ROW_END: usize = 511;
pub const EVAL_ROWS: usize = EVAL_ROW_END - EVAL_ROW_START;
pub const EVAL_COLS: usize = FRAME_HEIGHT;
pub const EVAL_PIXELS: usize = EVAL_ROWS * EVAL_COLS;

// The crop must line up with the ground-truth grid.
const _: () = assert!(EVAL_ROWS == GT_ROWS && EVAL_COLS == GT_COLS);

/// Offset into a stack's flat storage for logical element `[a, b, frame]`,
/// where `a` runs along the 512-long axis and `b` along the 424-long axis.
#[inline]
pub fn stack_offset(a: usize, b: usize, frame: usize) -> usize {
    frame * FRAME_PIXELS + b * FRAME_WIDTH + a
}

/// Offset into ground-truth flat storage for transposed element `[r, c]`.
#[inline]
pub fn gt_offset(r: usize, c: usize) -> usize {
    r * GT_COLS + c
}
