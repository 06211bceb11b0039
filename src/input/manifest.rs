//! XML manifest listing the pipelines to evaluate.
//!
//! ```xml
//! <setup>
//!   <pipeline name="kde" setup_name="lab"/>
//!   <pipeline name="microsoft" setup_name="lab"/>
//! </setup>
//! ```

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{info, warn};

use crate::input::{InputError, resolve_bin_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub setup_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineFiles {
    pub name: String,
    pub setup_name: String,
    pub depth_path: PathBuf,
    pub conf_path: PathBuf,
}

/// Pipelines whose binaries exist, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSet {
    pipelines: Vec<PipelineFiles>,
}

impl PipelineSet {
    pub fn depth_paths(&self) -> Vec<&Path> {
        self.pipelines.iter().map(|p| p.depth_path.as_path()).collect()
    }

    pub fn conf_paths(&self) -> Vec<&Path> {
        self.pipelines.iter().map(|p| p.conf_path.as_path()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.pipelines.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipelineFiles> {
        self.pipelines.iter()
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

pub fn depth_file_name(name: &str, setup_name: &str, dataset: &str) -> String {
    format!("{name}_depth_{setup_name}_{dataset}.bin")
}

pub fn conf_file_name(name: &str, setup_name: &str, dataset: &str) -> String {
    format!("{name}_conf_{setup_name}_{dataset}.bin")
}

pub fn parse_manifest(
    xml_path: &Path,
    dataset: &str,
    data_dir: &Path,
) -> Result<PipelineSet, InputError> {
    let xml = std::fs::read_to_string(xml_path).map_err(|e| InputError::io(xml_path, e))?;
    let entries = parse_manifest_entries(&xml)?;
    info!(
        manifest = %xml_path.display(),
        entries = entries.len(),
        "parsed pipeline manifest"
    );

    let mut pipelines = Vec::with_capacity(entries.len());
    for entry in entries {
        let depth = data_dir.join(depth_file_name(&entry.name, &entry.setup_name, dataset));
        let conf = data_dir.join(conf_file_name(&entry.name, &entry.setup_name, dataset));

        let Some(depth_path) = resolve_bin_path(&depth) else {
            warn!(pipeline = %entry.name, path = %depth.display(), "depth file missing; skipping");
            continue;
        };
        let Some(conf_path) = resolve_bin_path(&conf) else {
            warn!(pipeline = %entry.name, path = %conf.display(), "confidence file missing; skipping");
            continue;
        };

        pipelines.push(PipelineFiles {
            name: entry.name,
            setup_name: entry.setup_name,
            depth_path,
            conf_path,
        });
    }

    Ok(PipelineSet { pipelines })
}

pub fn parse_manifest_entries(xml: &str) -> Result<Vec<ManifestEntry>, InputError> {
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"pipeline" => {
                out.push(ManifestEntry {
                    name: required_attr(&e, "name")?,
                    setup_name: required_attr(&e, "setup_name")?,
                });
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(InputError::Parse(format!(
                    "manifest XML at byte {}: {e}",
                    reader.error_position()
                )));
            }
        }
    }
    Ok(out)
}

fn required_attr(element: &BytesStart<'_>, key: &str) -> Result<String, InputError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| InputError::Parse(format!("pipeline attribute: {e}")))?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|e| InputError::Parse(format!("pipeline attribute `{key}`: {e}")))?;
            return Ok(value.into_owned());
        }
    }
    Err(InputError::Parse(format!(
        "pipeline element missing `{key}` attribute"
    )))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/manifest.rs"]
mod tests;
