use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use mart_reader::utils::logging::{create_spinner, finish_progress_bar};
use mart_reader::{LoaderOptions, PipelineConfig, Record, RecordSelection, load_data};

#[derive(Parser)]
#[command(name = "mart-reader")]
#[command(about = "Load, geo-join and average market analysis exports")]
#[command(version)]
struct Cli {
    /// Market analysis file (semicolon-delimited)
    #[arg(long, default_value = "market_analysis_2019.csv")]
    primary: PathBuf,

    /// Geolocation file (semicolon-delimited)
    #[arg(long, default_value = "geolocation.csv")]
    geo: PathBuf,

    /// Join coordinates and drop rows without them
    #[arg(long)]
    with_geo: bool,

    /// Write JSON here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Rows per decoded batch
    #[arg(long, default_value_t = mart_reader::DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Keep only records for this month label, e.g. "Jan"
    #[arg(long)]
    month: Option<String>,

    /// Keep only records for this host type
    #[arg(long)]
    host_type: Option<String>,
}

fn write_json(records: &[&Record], output: Option<&PathBuf>) -> anyhow::Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, records).context("Failed to write JSON output")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = PipelineConfig::new(&cli.primary, &cli.geo)
        .with_geo(cli.with_geo)
        .with_loader(LoaderOptions::default().with_batch_size(cli.batch_size));

    let spinner = create_spinner(Some("Loading market data..."));
    let result = load_data(&config).await;
    finish_progress_bar(&spinner, None);
    let records = result.with_context(|| {
        format!(
            "Pipeline failed for {} (geo: {})",
            cli.primary.display(),
            cli.with_geo
        )
    })?;

    let mut selection = RecordSelection::new();
    if let Some(month) = cli.month {
        selection = selection.with_month(month);
    }
    if let Some(host_type) = cli.host_type {
        selection = selection.with_host_type(host_type);
    }
    let selected = selection.select(&records, &config.schema);
    info!("Writing {} of {} records", selected.len(), records.len());

    write_json(&selected, cli.output.as_ref())
}
