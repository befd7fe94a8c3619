//! CLI binary for gleaner.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gleaner::{Collector, CollectorConfig};
use tracing_subscriber::EnvFilter;

/// Printed when no source produced any text.
const EMPTY_RESULT: &str = "(no text retrieved)";

/// Gleaner: collect short descriptive text about a named entity.
#[derive(Parser)]
#[command(name = "gleaner", version, about)]
struct Cli {
    /// Entity to look up, e.g. "Acme University".
    entity: String,

    /// Source preset. Ignored when --sources is given. Without either flag
    /// the config file's sources are used, or the default preset.
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Comma-separated source list, e.g. "wikipedia,news,search".
    #[arg(short, long, value_delimiter = ',')]
    sources: Option<Vec<String>>,

    /// Path to TOML configuration file. Defaults to
    /// `$XDG_CONFIG_HOME/gleaner/config.toml` when that file exists.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output budget in characters.
    #[arg(short, long)]
    max_chars: Option<usize>,
}

/// Predefined source selections.
#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Wikipedia, homepage and news.
    Default,
    /// Wikipedia only.
    Wikipedia,
}

impl Preset {
    fn sources(self) -> Vec<String> {
        let names: &[&str] = match self {
            Self::Default => &["wikipedia", "homepage", "news"],
            Self::Wikipedia => &["wikipedia"],
        };
        names.iter().map(|s| (*s).to_owned()).collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the collected text.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gleaner=info,gleaner_web=info")),
        )
        .init();

    let cli = Cli::parse();

    let entity = cli.entity.trim();
    anyhow::ensure!(!entity.is_empty(), "entity name must not be empty");

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(CollectorConfig::default_config_path);
    let file_config = CollectorConfig::load(cli.config.as_deref())
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let from_file = file_config.is_some();
    let mut config = file_config.unwrap_or_default();

    match (cli.sources, cli.preset) {
        (Some(list), _) => {
            config.sources = list
                .into_iter()
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
        }
        (None, Some(preset)) => config.sources = preset.sources(),
        (None, None) if !from_file => config.sources = Preset::Default.sources(),
        (None, None) => {}
    }
    if let Some(max_chars) = cli.max_chars {
        config.max_chars = max_chars;
    }

    let collector = Collector::new(config).context("invalid configuration")?;
    let text = collector.collect(entity).await;

    if text.is_empty() {
        println!("{EMPTY_RESULT}");
    } else {
        println!("{text}");
    }
    Ok(())
}
