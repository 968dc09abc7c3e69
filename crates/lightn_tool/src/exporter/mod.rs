//! Authoring file formats, and their conversion into runtime resource types
//!
//! Every authoring file is TOML. Specifications are deserialized with serde and then exported
//! into the plain data types of [`lightn_res`], which know how to write themselves.

use serde::de::DeserializeOwned;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub mod material;
pub mod mesh;
pub mod scene;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("`{}` doesn't exist", path.display())]
    NotFound { path: PathBuf },
    #[error("couldn't read `{}`", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{}` is malformed", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("`{}` is missing the required `{field}` field", path.display())]
    MissingField { path: PathBuf, field: &'static str },
    #[error("mesh instance #{index} in `{}` doesn't name a mesh", path.display())]
    EmptyMeshReference { path: PathBuf, index: usize },
    #[error(
        "mesh instance #{index} in `{}` uses `{mesh}`, which isn't listed in `Mesh`",
        path.display()
    )]
    DanglingReference {
        path: PathBuf,
        index: usize,
        mesh: String,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Unreadable { path, .. }
            | LoadError::Malformed { path, .. }
            | LoadError::MissingField { path, .. }
            | LoadError::EmptyMeshReference { path, .. }
            | LoadError::DanglingReference { path, .. } => path,
        }
    }
}

/// Reads an authoring file as text.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Parses a TOML document, attributing errors to `path`.
pub fn parse_source<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T, LoadError> {
    toml::from_str(text).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses an authoring file in one go.
pub fn load_source<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = read_source(path)?;
    parse_source(path, &text)
}
