//! Command line subcommands
//!
//! Every converter takes authoring files from the work root and writes one resource per input,
//! stopping at the first failure.

use crate::{
    config::PipelineConfig,
    exporter::load_source,
    output::{output_path, write_resource, FileWriter},
};
use anyhow::Context;
use lightn_res::writer::WriteResult;
use lightn_utils::{AnyResult, AnyhowResultExt};
use log::*;
use serde::de::DeserializeOwned;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub mod inspect;
pub mod level;
pub mod material;
pub mod mesh;
pub mod notify;

/// Loads the specification in `input`, exports it, and writes the result to the resource root
/// with the given extension. Returns the output path.
fn convert_file<S, R>(
    input: &Path,
    config: &PipelineConfig,
    extension: &str,
    export: impl FnOnce(S) -> AnyResult<R>,
    write: impl FnOnce(&R, &mut FileWriter<'_>) -> WriteResult,
) -> AnyResult<PathBuf>
where
    S: DeserializeOwned,
{
    let output = output_path(input, config, extension);
    info!("Converting `{}` to `{}`", input.display(), output.display());

    let specification: S = load_source(input)?;
    let resource = export(specification)
        .with_context(|| format!("couldn't convert `{}`", input.display()))?;

    let size = write_resource(&output, |w| write(&resource, w))
        .otherwise_with(|| format!("couldn't write `{}`", output.display()))?;
    debug!("Wrote {size} bytes");

    Ok(output)
}

/// Recursively collects every file under `root` whose name ends with `extension`, in a stable
/// order.
fn find_sources(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for dir_entry_result in fs::read_dir(&dir)? {
            let dir_entry = dir_entry_result?;
            let file_type = dir_entry.file_type()?;
            let path = dir_entry.path();

            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file()
                && dir_entry.file_name().to_string_lossy().ends_with(extension)
            {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}
