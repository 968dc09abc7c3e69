use super::convert_file;
use crate::{
    config::PipelineConfig,
    exporter::material::{MaterialInstanceSpecification, MaterialSpecification},
};
use clap::Args;
use lightn_res::material::{Material, MaterialInstance};
use lightn_utils::{ok, AnyResult};
use std::path::PathBuf;

#[derive(Args)]
pub struct MaterialCommand {
    /// Material specifications to convert.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl crate::Command for MaterialCommand {
    fn run(self, config: &PipelineConfig) -> AnyResult {
        for file in &self.files {
            convert_file(
                file,
                config,
                &config.material_extension,
                MaterialSpecification::export,
                |material: &Material, w| material.write(w),
            )?;
        }
        ok()
    }
}

#[derive(Args)]
pub struct MaterialInstanceCommand {
    /// Material instance specifications to convert.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl crate::Command for MaterialInstanceCommand {
    fn run(self, config: &PipelineConfig) -> AnyResult {
        for file in &self.files {
            convert_file(
                file,
                config,
                &config.material_instance_extension,
                MaterialInstanceSpecification::export,
                |instance: &MaterialInstance, w| instance.write(w),
            )?;
        }
        ok()
    }
}
