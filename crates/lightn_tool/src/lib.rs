//! The Lightn asset tools
//!
//! Converts authoring files (scenes, materials, material instances, meshes) living under the
//! work root into binary runtime resources under the resource root. Every converter is a
//! subcommand of a single command line utility.

use clap::{Parser, Subcommand};
use commands::{
    inspect::InspectCommand,
    level::LevelCommand,
    material::{MaterialCommand, MaterialInstanceCommand},
    mesh::{MeshCommand, StaticMeshCommand},
    notify::NotifyCommand,
};
use config::PipelineConfig;
use lightn_utils::{ok, AnyResult};
use log::LevelFilter;
use std::path::PathBuf;

pub mod commands;
pub mod compiler;
pub mod config;
pub mod exporter;
pub mod notify;
pub mod output;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pipeline configuration file. Defaults to `lightn.toml` in the working directory, if present.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    /// More logging. Can be repeated.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log warnings and errors.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Compiles a scene description into a `.level` file
    Level(LevelCommand),
    /// Converts materials into `.mto` files
    Material(MaterialCommand),
    /// Converts material instances into `.mti` files
    MaterialInstance(MaterialInstanceCommand),
    /// Converts meshes into `.mesh` files
    Mesh(MeshCommand),
    /// Converts static meshes into `.smesh` files
    StaticMesh(StaticMeshCommand),
    /// Prints the contents of a compiled `.level` file
    Inspect(InspectCommand),
    /// Sends a message to a running engine instance
    Notify(NotifyCommand),
}

pub trait Command {
    fn run(self, config: &PipelineConfig) -> AnyResult;
}

/// Sets up `log` output for the command line tool.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };

    pretty_env_logger::formatted_builder()
        .format_indent(None)
        .format_timestamp(None)
        .filter_level(level)
        .init();
}

/// Runs `lightn_tool` as if it was ran from the command line.
///
/// This function is provided to allow invocation of the converters from other tools and build
/// scripts.
pub fn run(cli: Cli) -> AnyResult {
    let config = PipelineConfig::load(cli.config.as_deref())?;
    match cli.command {
        CliCommand::Level(c) => c.run(&config)?,
        CliCommand::Material(c) => c.run(&config)?,
        CliCommand::MaterialInstance(c) => c.run(&config)?,
        CliCommand::Mesh(c) => c.run(&config)?,
        CliCommand::StaticMesh(c) => c.run(&config)?,
        CliCommand::Inspect(c) => c.run(&config)?,
        CliCommand::Notify(c) => c.run(&config)?,
    }
    ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_takes_a_single_input() {
        let cli = Cli::try_parse_from(["lightn_tool", "level", "Work/Level/Test.toml"]).unwrap();
        assert!(matches!(cli.command, CliCommand::Level(_)));
        assert!(Cli::try_parse_from(["lightn_tool", "level"]).is_err());
        assert!(Cli::try_parse_from(["lightn_tool", "level", "a.toml", "b.toml"]).is_err());
    }

    #[test]
    fn global_flags_go_anywhere() {
        let cli = Cli::try_parse_from([
            "lightn_tool",
            "-vv",
            "inspect",
            "a.level",
            "--config",
            "x.toml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
