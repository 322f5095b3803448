//! CLI entry point for `mailtable`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};

use mailtable::codec::CountByteOrder;
use mailtable::config::{self, Config};
use mailtable::convert::{self, ConversionMode};

#[derive(Parser)]
#[command(
    name = "mailtable",
    version,
    about = "Convert mail table files between the binary and text forms"
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["converttext", "convertbin"])
))]
struct Cli {
    /// Source file
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Destination file (replaced atomically)
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Convert a binary table to text
    #[arg(long)]
    converttext: bool,

    /// Convert a text table to binary
    #[arg(long)]
    convertbin: bool,

    /// Byte order of the entry count (overrides the config file)
    #[arg(long, value_enum, value_name = "ORDER")]
    byte_order: Option<CountByteOrder>,

    /// Configuration file
    #[arg(long, value_name = "PATH", env = "MAILTABLE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn mode(&self) -> ConversionMode {
        if self.converttext {
            ConversionMode::BinToText
        } else {
            ConversionMode::TextToBin
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = config::load_config(cli.config.as_deref())?;
    let config = loaded.config;

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    if let Some(path) = &loaded.path {
        tracing::info!(path = %path.display(), "Loaded config");
    }
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let mut options = config.codec.decode_options();
    if let Some(order) = cli.byte_order {
        options.byte_order = order;
    }

    let summary = convert::convert(&cli.input, &cli.output, cli.mode(), &options)
        .with_context(|| {
            format!(
                "Failed to convert '{}' to '{}'",
                cli.input.display(),
                cli.output.display()
            )
        })?;

    use humansize::{format_size, BINARY};
    println!(
        "  Wrote {} entr{} to {} ({})",
        summary.entries,
        if summary.entries == 1 { "y" } else { "ies" },
        cli.output.display(),
        format_size(summary.bytes_written, BINARY)
    );

    Ok(())
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_target = config.general.log_file.as_ref().and_then(|path| {
        let name = path.file_name()?.to_owned();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        std::fs::create_dir_all(&dir).ok()?;
        Some((dir, name))
    });

    if let Some((dir, name)) = log_target {
        let file_appender = tracing_appender::rolling::never(dir, name);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}
