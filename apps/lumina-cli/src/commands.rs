//! Subcommand implementations, each producing a JSON document

use std::path::Path;

use lumina_core::{
    analysis, read_workspace, validation, Dataset, InMemoryRepository, LiveFeed, LuminaConfig,
    LuminaResult, RowView, TokioScheduler, ToggleOutcome, Workspace,
};
use lumina_io::read_grid;
use serde_json::{json, Value as Json};

fn load(path: &Path) -> LuminaResult<Dataset> {
    let named = read_grid(path)?;
    Ok(Dataset::from_grid(named.name, named.grid))
}

pub fn summary(path: &Path, filter: Option<(&str, &str)>) -> LuminaResult<Json> {
    let ds = load(path)?;
    let mut view = RowView::new(&ds);
    if let Some((column, needle)) = filter {
        validation::validate_field_exists(column, &ds.columns)?;
        view = view.filter(column, needle);
    }
    Ok(json!({
        "dataset": ds.name,
        "rows": view.len(),
        "summaries": view.summarize(),
    }))
}

pub fn correlations(path: &Path, config: &LuminaConfig) -> LuminaResult<Json> {
    let ds = load(path)?;
    let results = analysis::correlate_with(&ds, &config.analysis);
    Ok(serde_json::to_value(results)?)
}

pub fn histogram(
    path: &Path,
    column: &str,
    bins: Option<usize>,
    config: &LuminaConfig,
) -> LuminaResult<Json> {
    let ds = load(path)?;
    validation::validate_field_exists(column, &ds.columns)?;
    let bins = bins.unwrap_or(config.analysis.histogram_bins);
    Ok(serde_json::to_value(analysis::histogram(&ds, column, bins))?)
}

pub fn filter(
    path: &Path,
    column: &str,
    needle: &str,
    limit: Option<usize>,
    config: &LuminaConfig,
) -> LuminaResult<Json> {
    let ds = load(path)?;
    validation::validate_field_exists(column, &ds.columns)?;
    let view = RowView::new(&ds).filter(column, needle);
    let limit = limit.unwrap_or(config.analysis.preview_rows);
    Ok(json!({
        "matched": view.len(),
        "truncated": view.is_truncated(limit),
        "rows": view.preview(limit),
    }))
}

/// Run the feed on the tokio scheduler for `ticks` periods
pub async fn live(path: &Path, ticks: u32, config: &LuminaConfig) -> LuminaResult<Json> {
    let named = read_grid(path)?;
    let mut workspace = Workspace::new(InMemoryRepository::new());
    workspace.ingest(named.name, named.grid);
    let workspace = workspace.shared();

    let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
    let mut feed = LiveFeed::new(workspace.clone(), scheduler, config.stream.clone());

    if feed.start() == ToggleOutcome::Unavailable {
        tracing::warn!("Dataset has no numeric columns or no rows, nothing to stream");
    } else {
        // half a period of slack so the last tick lands before stopping
        let period = config.stream.tick_interval();
        tokio::time::sleep(period * ticks + period / 2).await;
        feed.stop();
    }

    let ws = read_workspace(&workspace);
    Ok(serde_json::to_value(ws.active().map(|d| &d.rows))?)
}
