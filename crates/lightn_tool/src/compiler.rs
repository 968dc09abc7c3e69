//! The level compiler
//!
//! Loads a scene description, validates it, groups its instances, and writes the `.level` file.
//! Nothing touches the file system before the whole description is loaded and validated.

use crate::{
    config::PipelineConfig,
    exporter::{scene::SceneDocument, LoadError},
    output::{output_path, write_resource},
};
use lightn_res::WriteError;
use log::*;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("couldn't load scene")]
    Load(#[from] LoadError),
    #[error("couldn't write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: WriteError,
    },
}

/// Summary of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledLevel {
    pub output: PathBuf,
    pub instance_groups: usize,
    pub instances: usize,
    pub size: u64,
}

pub fn compile_level(input: &Path, config: &PipelineConfig) -> Result<CompiledLevel, CompileError> {
    let document = SceneDocument::load(input)?;
    document.validate(input, config.validate_references)?;
    let scene = document.export(config.instance_order);

    let output = output_path(input, config, &config.level_extension);
    info!("Converting `{}` to `{}`", input.display(), output.display());
    debug!("  mesh geometries : {}", scene.mesh_geometries.len());
    debug!("  meshes          : {}", scene.meshes.len());
    debug!("  textures        : {}", scene.textures.len());
    debug!("  pipeline sets   : {}", scene.pipeline_sets.len());
    debug!("  materials       : {}", scene.materials.len());
    debug!(
        "  mesh instances  : {} in {} groups",
        scene.instance_count(),
        scene.instance_groups.len()
    );

    let size = write_resource(&output, |w| scene.write(w)).map_err(|source| {
        CompileError::Write {
            path: output.clone(),
            source,
        }
    })?;
    info!("Wrote {size} bytes");

    Ok(CompiledLevel {
        output,
        instance_groups: scene.instance_groups.len(),
        instances: scene.instance_count(),
        size,
    })
}
