use crate::{compiler::compile_level, config::PipelineConfig};
use clap::Args;
use lightn_res::level::InstanceOrder;
use lightn_utils::{ok, AnyResult};
use std::path::PathBuf;

#[derive(Args)]
pub struct LevelCommand {
    /// Scene description to compile.
    pub file: PathBuf,
    /// Order of instance groups in the output. Overrides the configuration.
    #[arg(long, value_enum)]
    pub instance_order: Option<InstanceOrder>,
    /// Accept instances of meshes that aren't listed in the scene's `Mesh` list.
    #[arg(long)]
    pub no_reference_check: bool,
}

impl LevelCommand {
    fn apply_overrides(&self, config: &PipelineConfig) -> PipelineConfig {
        let mut config = config.clone();
        if let Some(order) = self.instance_order {
            config.instance_order = order;
        }
        if self.no_reference_check {
            config.validate_references = false;
        }
        config
    }
}

impl crate::Command for LevelCommand {
    fn run(self, config: &PipelineConfig) -> AnyResult {
        let config = self.apply_overrides(config);
        compile_level(&self.file, &config)?;
        ok()
    }
}
