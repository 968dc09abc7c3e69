//! Pipeline configuration
//!
//! Tells the converters where authoring files live, where runtime resources go, and how to name
//! them. Every key is optional:
//! ```toml
//! work_root = "D:/Project/Work"
//! resource_root = "D:/Project/Resource"
//! level_extension = ".level"
//! instance_order = "FirstSeen"
//! validate_references = true
//!
//! [runtime]
//! host = "localhost"
//! port = 12345
//! ```

use lightn_res::level::InstanceOrder;
use lightn_utils::{AnyResult, AnyhowResultExt};
use log::*;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Looked up in the working directory when no configuration file is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "lightn.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Authoring root. Replaced with [`Self::resource_root`] in output directories. If empty,
    /// outputs are written next to their inputs.
    pub work_root: String,
    pub resource_root: String,

    pub level_extension: String,
    pub material_extension: String,
    pub material_instance_extension: String,
    pub mesh_extension: String,
    pub static_mesh_extension: String,
    /// Source extension picked up by the mesh converter when scanning the work root.
    pub mesh_source_extension: String,

    pub instance_order: InstanceOrder,
    /// Reject scenes with instances of meshes missing from the scene's mesh list.
    pub validate_references: bool,

    pub runtime: RuntimeEndpoint,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_root: String::from("Work"),
            resource_root: String::from("Resource"),
            level_extension: String::from(".level"),
            material_extension: String::from(".mto"),
            material_instance_extension: String::from(".mti"),
            mesh_extension: String::from(".mesh"),
            static_mesh_extension: String::from(".smesh"),
            mesh_source_extension: String::from(".meshi"),
            instance_order: InstanceOrder::FirstSeen,
            validate_references: true,
            runtime: RuntimeEndpoint::default(),
        }
    }
}

/// Address of a running engine instance, listening for tool messages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeEndpoint {
    pub host: String,
    pub port: u16,
}

impl Default for RuntimeEndpoint {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 12345,
        }
    }
}

impl PipelineConfig {
    /// Loads the configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if there's one in
    /// the working directory. Falls back to built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> AnyResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default_path.is_file() {
                    debug!("No `{DEFAULT_CONFIG_FILE}` found, using default configuration");
                    return Ok(Self::default());
                }
                default_path
            }
        };

        debug!("Loading configuration from `{}`", path.display());
        let text = fs::read_to_string(&path)
            .otherwise_with(|| format!("couldn't read configuration `{}`", path.display()))?;
        Self::parse(&text).otherwise_with(|| format!("invalid configuration `{}`", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
