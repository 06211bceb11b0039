use std::path::Path;

use serde::Serialize;

use crate::pipeline::EvalError;

/// Pretty-prints `value` to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), EvalError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| EvalError::Report(format!("serialize {}: {e}", path.display())))?;
    super::text::write_text(path, &json)
}
