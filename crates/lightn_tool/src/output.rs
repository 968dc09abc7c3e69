//! Output placement and writing
//!
//! Resources are written to a temporary file next to their final location and renamed over it
//! once complete, so a failed or interrupted conversion never leaves a truncated resource behind.

use crate::config::PipelineConfig;
use lightn_res::{writer::WriteResult, ResourceWriter, WriteError};
use log::*;
use std::{
    fs::{self, File, Permissions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

pub type FileWriter<'a> = ResourceWriter<BufWriter<&'a mut File>>;

/// Computes where the resource converted from `input` goes.
///
/// The input's directory has every occurrence of the work root replaced with the resource root.
/// This is plain text replacement, not path-aware. The file keeps its stem and gets `extension`.
pub fn output_path(input: &Path, config: &PipelineConfig, extension: &str) -> PathBuf {
    let directory = input
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let directory = if config.work_root.is_empty() {
        directory
    } else {
        directory.replace(&config.work_root, &config.resource_root)
    };

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(directory).join(format!("{stem}{extension}"))
}

/// Writes a resource file through `f`, creating missing directories. An existing file at `path`
/// is replaced. Returns the amount of bytes written.
pub fn write_resource<F>(path: &Path, f: F) -> Result<u64, WriteError>
where
    F: FnOnce(&mut FileWriter<'_>) -> WriteResult,
{
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !directory.is_dir() {
        debug!("Creating directory `{}`", directory.display());
        fs::create_dir_all(directory).map_err(|source| WriteError::DirectoryCreateFailure {
            path: directory.to_path_buf(),
            source,
        })?;
    }

    // Dropping the temporary file deletes it, which takes care of every error path below
    let mut temp = NamedTempFile::new_in(directory)?;
    trace!("Writing `{}` through `{}`", path.display(), temp.path().display());

    let written = {
        let mut writer = ResourceWriter::new(BufWriter::new(temp.as_file_mut()));
        f(&mut writer)?;
        let written = writer.bytes_written();
        writer.into_inner().flush()?;
        written
    };

    let permissions = output_permissions(path, temp.as_file())?;
    temp.as_file().set_permissions(permissions)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| WriteError::IoFailure(e.error))?;

    Ok(written)
}

/// Temporary files are private to their owner. Replaced resources keep the permissions of what
/// they replace, new ones get the usual `rw-r--r--`.
fn output_permissions(path: &Path, temp: &File) -> io::Result<Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            #[allow(unused_mut)]
            let mut permissions = temp.metadata()?.permissions();
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                permissions.set_mode(0o644);
            }
            Ok(permissions)
        }
        Err(e) => Err(e),
    }
}
