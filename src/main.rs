use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reflora_traits::export::{normalize, DatabaseWriter};
use reflora_traits::resources::{WikibaseClient, WikibaseQueryConfig, DEFAULT_ENDPOINT};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reflora-traits", version, about = "Reflora trait database exporter", long_about = None)]
struct Cli {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    #[arg(long, default_value = "pt")]
    language: String,
    #[arg(long, default_value = "database.json")]
    output: PathBuf,
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = WikibaseQueryConfig::new()
        .with_endpoint(cli.endpoint)
        .with_language(cli.language)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let client = WikibaseClient::new(config)?;

    let rows = client.fetch_trait_rows()?;
    let items = normalize(rows);
    DatabaseWriter::save_to_path(&cli.output, &items)?;

    info!(
        items = items.len(),
        "output" = %cli.output.display(),
        "base de traços salva"
    );
    Ok(())
}
