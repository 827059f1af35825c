use clap::Parser;
use supports::cli::{self, Cli};
use supports::Directory;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli::load_config(&cli)?;

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(cli::DEBUG_LOG_PATH)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("{}", cli::debug_log_banner());
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
            )
            .init();
    }

    let directory = Directory::global();
    cli::load_manifests(&cli, &config, directory)?;
    let output = cli::execute(&cli, &config, directory)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
