use anyhow::Context;
use jobs_pipeline::PipelineConfig;
use jobs_pipeline::utils::logging::console::print_pipeline_summary;
use jobs_pipeline::utils::logging::init_logging;
use log::info;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = PipelineConfig::default();
    info!(
        "Combining {} source files into {}",
        config.source_paths.len(),
        config.output_dir.display()
    );

    let report = jobs_pipeline::run_pipeline(&config).context("job-posting pipeline failed")?;

    info!("Saved combined data to {}", report.paths.parquet.display());
    info!("Saved summary to {}", report.paths.summary.display());
    info!("Saved sample data to {}", report.paths.sample.display());
    if !report.load.skipped.is_empty() {
        info!("{} configured source files were missing", report.load.skipped.len());
    }

    print_pipeline_summary(&report.table, &report.summary);
    Ok(())
}
