use clap::Parser;
use pdfgrab_cli::cli::Cli;
use pdfgrab_cli::logging;
use pdfgrab_cli::output;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;

	if let Err(err) = run(cli).await {
		output::print_error(&err, format);
		std::process::exit(1);
	}
}

async fn run(cli: Cli) -> anyhow::Result<()> {
	let format = cli.format;
	let config = cli.into_config()?;

	let report = pdfgrab::run_once(&config).await?;
	output::print_report(&report, format);
	Ok(())
}
