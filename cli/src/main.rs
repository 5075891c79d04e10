mod commands;
mod sink;
mod terminal;

use arpsweep_common::config::Config;
use commands::{CommandLine, discover};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.into_config();

    logging::init_logging(&cfg);
    print::banner(cfg.quiet);

    discover::discover(&cfg)
}
