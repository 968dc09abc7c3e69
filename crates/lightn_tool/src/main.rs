use clap::Parser;
use lightn_utils::{ok, AnyResult};

fn main() -> AnyResult {
    let cli = lightn_tool::Cli::parse_from(wild::args());
    lightn_tool::init_logging(cli.verbose, cli.quiet);
    lightn_tool::run(cli)?;
    ok()
}
