mod cli;
mod logging;
mod run;
mod transport;
mod ui;

use std::io;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::transport::UreqTransport;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = cli.config();
    tracing::debug!(?config, "starting");
    let mut transport = UreqTransport::new(config.timeout);

    let ok = run::run(
        &cli,
        &mut transport,
        io::stdin().lock(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(run::exit_code(ok))
}
