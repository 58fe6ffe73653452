mod commands;
mod terminal;

use commands::{CommandLine, scan};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = commands.config()?;
    let range = commands.range()?;
    let ports = commands.port_list()?;

    scan::scan(range, ports, &cfg).await
}
