use clap::Parser;
use std::path::PathBuf;
use vacancy_core::config::Config;

#[derive(Parser)]
#[command(name = "vacancy-search", about = "Natural-language vacancy search service")]
struct Cli {
    /// TOML config file layered over the built-in defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    vacancy_search::app::run(config).await
}
