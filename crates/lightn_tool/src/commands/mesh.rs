use super::{convert_file, find_sources};
use crate::{config::PipelineConfig, exporter::mesh::MeshSpecification};
use clap::Args;
use lightn_res::mesh::Mesh;
use lightn_utils::{ok, AnyResult, AnyhowResultExt};
use log::*;
use std::path::{Path, PathBuf};

fn convert_meshes(files: &[PathBuf], config: &PipelineConfig, extension: &str) -> AnyResult {
    for file in files {
        convert_file(
            file,
            config,
            extension,
            |spec: MeshSpecification| Ok(spec.export()),
            |mesh: &Mesh, w| mesh.write(w),
        )?;
    }
    ok()
}

#[derive(Args)]
pub struct MeshCommand {
    /// Mesh specifications to convert. If none are given, every mesh source under the work root
    /// is converted.
    pub files: Vec<PathBuf>,
}

impl MeshCommand {
    fn sources(self, config: &PipelineConfig) -> AnyResult<Vec<PathBuf>> {
        if !self.files.is_empty() {
            return Ok(self.files);
        }

        let root = Path::new(&config.work_root);
        let files = find_sources(root, &config.mesh_source_extension)
            .otherwise_with(|| format!("couldn't scan `{}` for meshes", root.display()))?;
        if files.is_empty() {
            warn!(
                "No `{}` files found under `{}`",
                config.mesh_source_extension,
                root.display()
            );
        }
        Ok(files)
    }
}

impl crate::Command for MeshCommand {
    fn run(self, config: &PipelineConfig) -> AnyResult {
        let files = self.sources(config)?;
        convert_meshes(&files, config, &config.mesh_extension)
    }
}

#[derive(Args)]
pub struct StaticMeshCommand {
    /// Static mesh specifications to convert.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl crate::Command for StaticMeshCommand {
    fn run(self, config: &PipelineConfig) -> AnyResult {
        convert_meshes(&self.files, config, &config.static_mesh_extension)
    }
}
