use super::*;
use std::fs;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::model::dims::{GT_PIXELS, gt_offset};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("depth_eval_stack_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn ramp(len: usize) -> Vec<f32> {
    (0..len).map(|i| i as f32).collect()
}

#[test]
fn test_stack_round_trip_axis_order() {
    let dir = make_temp_dir();
    let path = dir.join("pipe_depth_lab_set.bin");
    let data = ramp(2 * FRAME_PIXELS);
    fs::write(&path, f32_bytes(&data)).unwrap();

    let stack = load_frame_stack(&path).unwrap();
    assert_eq!(stack.frames(), 2);
    assert_eq!(stack.shape(), (FRAME_WIDTH, FRAME_HEIGHT, 2));

    // [a, b, f] == flat[f*512*424 + b*512 + a]
    assert_eq!(stack.get(3, 5, 1), (FRAME_PIXELS + 5 * 512 + 3) as f32);
    assert_eq!(stack.get(511, 0, 0), 511.0);
    assert_eq!(stack.get(0, 423, 0), (423 * 512) as f32);
    assert_eq!(stack.get(511, 423, 1), (2 * FRAME_PIXELS - 1) as f32);

    let frame = stack.frame(1).unwrap();
    assert_eq!(frame.len(), FRAME_PIXELS);
    assert_eq!(frame[7 * FRAME_WIDTH + 9], stack.get(9, 7, 1));
    assert!(stack.frame(2).is_none());
}

#[test]
fn test_stack_rejects_partial_frame() {
    let dir = make_temp_dir();
    let path = dir.join("partial.bin");
    fs::write(&path, f32_bytes(&ramp(FRAME_PIXELS + 10))).unwrap();
    assert!(matches!(load_frame_stack(&path), Err(InputError::Shape(_))));
}

#[test]
fn test_stack_rejects_empty_file() {
    let dir = make_temp_dir();
    let path = dir.join("empty.bin");
    fs::write(&path, b"").unwrap();
    assert!(matches!(load_frame_stack(&path), Err(InputError::Shape(_))));
}

#[test]
fn test_stack_rejects_trailing_bytes() {
    let dir = make_temp_dir();
    let path = dir.join("odd.bin");
    let mut bytes = f32_bytes(&ramp(FRAME_PIXELS));
    bytes.push(0);
    fs::write(&path, bytes).unwrap();
    assert!(matches!(load_frame_stack(&path), Err(InputError::Shape(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let path = dir.join("absent.bin");
    match load_frame_stack(&path) {
        Err(InputError::Io { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected IO error, got {other:?}"),
    }
}

#[test]
fn test_gz_stack_matches_plain() {
    let dir = make_temp_dir();
    let data = ramp(FRAME_PIXELS);
    let plain = dir.join("plain.bin");
    fs::write(&plain, f32_bytes(&data)).unwrap();

    let gz = dir.join("packed.bin.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::fast());
    enc.write_all(&f32_bytes(&data)).unwrap();
    fs::write(&gz, enc.finish().unwrap()).unwrap();

    let a = load_frame_stack(&plain).unwrap();
    // The `.bin` name resolves to its `.gz` sibling.
    let b = load_frame_stack(&dir.join("packed.bin")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_resolve_bin_path_prefers_plain() {
    let dir = make_temp_dir();
    let plain = dir.join("a.bin");
    let gz = dir.join("a.bin.gz");
    assert_eq!(resolve_bin_path(&plain), None);

    fs::write(&gz, b"").unwrap();
    assert_eq!(resolve_bin_path(&plain), Some(gz.clone()));

    fs::write(&plain, b"").unwrap();
    assert_eq!(resolve_bin_path(&plain), Some(plain.clone()));
}

#[test]
fn test_ground_truth_axis_order() {
    let dir = make_temp_dir();
    let path = dir.join("set_gt.bin");
    fs::write(&path, f32_bytes(&ramp(GT_PIXELS))).unwrap();

    let gt = load_ground_truth(&path).unwrap();
    assert_eq!(gt.shape(), (GT_COLS, GT_ROWS));
    // [c, r] == flat[r*424 + c]
    assert_eq!(gt.get(5, 2), (2 * 424 + 5) as f32);
    assert_eq!(gt.transposed(2, 5), gt.get(5, 2));
    assert_eq!(gt.get(423, 509), gt_offset(509, 423) as f32);
    // Only index 0 is not positive.
    assert_eq!(gt.positive_count(), GT_PIXELS - 1);
}

#[test]
fn test_ground_truth_rejects_wrong_length() {
    let dir = make_temp_dir();
    let path = dir.join("short_gt.bin");
    fs::write(&path, f32_bytes(&ramp(GT_PIXELS - 1))).unwrap();
    assert!(matches!(load_ground_truth(&path), Err(InputError::Shape(_))));
}
