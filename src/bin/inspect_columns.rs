use anyhow::Context;
use jobs_pipeline::inspect::{find_series_columns, inspect_batch};
use jobs_pipeline::utils::io::read_parquet_table;
use jobs_pipeline::utils::logging::init_logging;
use jobs_pipeline::{InspectConfig, PipelineConfig};
use log::warn;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = InspectConfig::default();
    if config.sample_file.is_file() {
        let batch = read_parquet_table(&config.sample_file)
            .with_context(|| format!("failed to read {}", config.sample_file.display()))?;
        print!("{}", inspect_batch(&batch)?);
    } else {
        warn!("File not found: {}", config.sample_file.display());
    }

    for path in PipelineConfig::default().source_paths {
        if !path.is_file() {
            continue;
        }
        let batch = read_parquet_table(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        println!();
        println!("{}", "=".repeat(60));
        println!("Checking: {}", path.display());
        println!("{}", "=".repeat(60));
        print!("{}", find_series_columns(&batch));
    }
    Ok(())
}
