//! The combine, deduplicate, enrich and export pipeline.

pub mod dedup;
pub mod enrich;
pub mod export;

use std::time::Instant;

use arrow::record_batch::RecordBatch;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::loader::{LoadReport, load_sources};
use crate::lookup::SeriesLookup;
use crate::schema::DateFormatConfig;

pub use dedup::{DedupStats, deduplicate};
pub use enrich::enrich;
pub use export::{DatasetSummary, ExportPaths, export};

/// Everything a pipeline run produced
#[derive(Debug)]
pub struct PipelineReport {
    pub load: LoadReport,
    pub dedup: DedupStats,
    pub paths: ExportPaths,
    pub summary: DatasetSummary,
    /// The enriched table that was exported
    pub table: RecordBatch,
}

/// Run loader, deduplicator, enricher and exporter in order
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    let start = Instant::now();

    let (combined, load) = load_sources(&config.source_paths)?;
    log::info!("Total records before deduplication: {}", combined.num_rows());

    let (deduped, dedup) = deduplicate(&combined, &DateFormatConfig::default())?;

    let lookup = SeriesLookup::from_path(&config.lookup_path)?;
    let table = enrich(&deduped, &lookup)?;

    let (paths, summary) = export(&table, config)?;

    log::info!("Processing complete in {:?}", start.elapsed());
    Ok(PipelineReport {
        load,
        dedup,
        paths,
        summary,
        table,
    })
}
