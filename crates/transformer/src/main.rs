use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mangle_transformer::{transform, TransformOption};

#[derive(Debug, Parser)]
#[command(name = "mangle")]
#[command(about = "Rename identifiers with names chosen for compressibility")]
struct Args {
    input: PathBuf,

    /// JSON file with transform options
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// write the `original -> replacement` map as JSON
    #[arg(long)]
    map: Option<PathBuf>,

    /// rename identifiers starting with this prefix
    #[arg(long)]
    prefix: Option<String>,

    /// report raw and gzip sizes
    #[arg(long)]
    stats: bool,
}

fn init_log() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("LOG"))
        .init();
}

fn load_options(args: &Args) -> Result<TransformOption> {
    let mut options = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<TransformOption>(&content)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => TransformOption::default(),
    };

    if args.prefix.is_some() {
        options.mangle_prefix = args.prefix.clone();
    }
    options.stats |= args.stats;
    options.filename = Some(args.input.to_string_lossy().to_string());

    Ok(options)
}

fn main() -> Result<()> {
    init_log();

    let args = Args::parse();
    let options = load_options(&args)?;

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let result = transform(content, options)?;

    if let Some(stats) = &result.stats {
        info!(
            original = stats.original_size,
            output = stats.output_size,
            original_gzip = stats.original_gzip_size,
            output_gzip = stats.output_gzip_size,
            "sizes"
        );
    }

    if let Some(path) = &args.map {
        fs::write(path, serde_json::to_string_pretty(&result.ident_map)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match &args.output {
        Some(path) => fs::write(path, &result.content)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", result.content),
    }

    Ok(())
}
