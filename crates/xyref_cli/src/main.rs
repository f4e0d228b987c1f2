use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xyref_cli::{Cli, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let report = run(&cli)?;
    for msg in &report.report_extract.warnings {
        eprintln!("[INFO] {msg}");
    }
    println!("{}", report.report_extract);
    println!(
        "Wrote {} ({} records: REF/COMMENT, DESCRIPTION header only)",
        report.path_written.display(),
        report.n_records
    );
    Ok(())
}
