use crate::config::PipelineConfig;
use clap::Args;
use lightn_res::level::{read_level, LevelImage};
use lightn_utils::{ok, AnyResult, AnyhowResultExt};
use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

#[derive(Args)]
pub struct InspectCommand {
    /// Compiled level file.
    pub file: PathBuf,
    /// Also print every world matrix.
    #[arg(long, short = 'm')]
    pub matrices: bool,
}

impl crate::Command for InspectCommand {
    fn run(self, _config: &PipelineConfig) -> AnyResult {
        let file = File::open(&self.file)
            .otherwise_with(|| format!("couldn't open `{}`", self.file.display()))?;
        let image = read_level(&mut BufReader::new(file))
            .map_err(|e| e.context(format!("`{}` isn't a valid level", self.file.display())))?;

        print_level(&image, self.matrices, &mut io::stdout().lock())?;
        ok()
    }
}

fn print_string_list(out: &mut impl Write, name: &str, list: &[String]) -> io::Result<()> {
    writeln!(out, "{name} ({}):", list.len())?;
    for entry in list {
        writeln!(out, "  {entry}")?;
    }
    Ok(())
}

fn print_level(image: &LevelImage, matrices: bool, out: &mut impl Write) -> io::Result<()> {
    print_string_list(out, "Mesh geometries", &image.mesh_geometries)?;
    print_string_list(out, "Meshes", &image.meshes)?;
    print_string_list(out, "Textures", &image.textures)?;
    print_string_list(out, "Materials", &image.materials)?;
    writeln!(out, "Pipeline sets: {}", image.pipeline_set_count)?;

    writeln!(out, "Instance groups ({}):", image.instance_groups.len())?;
    for (hash, instances) in &image.instance_groups {
        let mesh = image.mesh_for_hash(*hash).unwrap_or("<unknown mesh>");
        writeln!(out, "  {mesh} [{hash:016x}]: {} instances", instances.len())?;
        if matrices {
            for matrix in instances {
                writeln!(out, "    {matrix:?}")?;
            }
        }
    }

    Ok(())
}
