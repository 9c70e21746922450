use clap::Parser;
use herald_hosting::{Cli, handle, telemetry};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::install_tracing(cli.log_filter.as_deref())?;

    let body = handle(&cli)?;
    println!("{body}");
    Ok(())
}
