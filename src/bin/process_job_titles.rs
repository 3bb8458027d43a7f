use anyhow::Context;
use jobs_pipeline::TitleAggregationConfig;
use jobs_pipeline::classify::title_color;
use jobs_pipeline::utils::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = TitleAggregationConfig::default();
    let summaries = jobs_pipeline::run_title_aggregation(&config).with_context(|| {
        format!("failed to aggregate titles from {}", config.input_path.display())
    })?;

    println!();
    println!("Saved {} titles to {}", summaries.len(), config.output_path.display());
    println!("Top 10 job titles:");
    for summary in summaries.iter().take(10) {
        println!(
            "  {:>5}  {:<50} {}",
            summary.announcement_count,
            summary.job_title,
            title_color(&summary.job_title)
        );
    }
    Ok(())
}
