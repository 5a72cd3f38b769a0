//! Run driver: walk the input tree, process report documents, emit the
//! aggregate outputs.
//!
//! One synchronous pass. Each document is processed to completion
//! (including its JSON file) before the next; category aggregation runs
//! once at the end over the complete in-memory collection.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use jwalk::WalkDir;
use rustc_hash::FxHashSet;

use crate::category::build_categories;
use crate::config::RunConfig;
use crate::report::JsonMap;
use crate::report::assemble::{DocumentError, process_document, write_report};
use crate::scan::FileKind;
use crate::{debug, log};

/// State for a single run, threaded through explicitly.
#[derive(Default)]
struct RunState {
    /// Full-fidelity Report entities, in document-processing order.
    reports: Vec<JsonMap>,
    /// Distinct category names seen across all documents.
    categories: FxHashSet<String>,
    /// Documents skipped with their reasons, for the final summary.
    failures: Vec<(PathBuf, DocumentError)>,
}

/// Execute one conversion run.
pub fn run(config: &RunConfig) -> Result<()> {
    debug!("run"; "base url {} root {} output {}",
        config.base_url, config.root_dir.display(), config.output_dir.display());

    fs::create_dir_all(&config.output_dir)?;

    log!("run"; "started parsing files");
    let mut state = RunState::default();

    // Sorted walk for deterministic document order; the output directory
    // lives under the root and is skipped.
    for entry in WalkDir::new(&config.root_dir).sort(true) {
        let entry = entry?;
        let path = entry.path();
        if path.starts_with(&config.output_dir) {
            continue;
        }
        let rel = path.strip_prefix(&config.root_dir)?.to_path_buf();

        // Mirror the input tree's directory structure
        if entry.file_type().is_dir() {
            fs::create_dir_all(config.output_dir.join(&rel))?;
            continue;
        }

        match FileKind::classify(&rel) {
            FileKind::ImageAsset => {
                let dest = config.output_dir.join(&rel);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&path, &dest)?;
                debug!("assets"; "{}", rel.display());
            }
            FileKind::ReportDocument => match process_document(&path, config) {
                Ok(output) => {
                    write_report(&output.report, &config.reports_dir())?;
                    state.categories.extend(output.categories);
                    state.reports.push(output.report);
                    debug!("reports"; "{}", rel.display());
                }
                Err(err) => {
                    debug!("reports"; "skipping {}", rel.display());
                    state.failures.push((path, err));
                }
            },
            FileKind::Ignored => {}
        }
    }

    write_aggregates(config, &state)?;
    summarize(config, &state);
    Ok(())
}

/// Write `reports.json` and `categories.json` under `<output>/reports/`.
fn write_aggregates(config: &RunConfig, state: &RunState) -> Result<()> {
    let reports_dir = config.reports_dir();
    fs::create_dir_all(&reports_dir)?;

    fs::write(
        reports_dir.join("reports.json"),
        serde_json::to_string(&state.reports)?,
    )?;
    debug!("run"; "generated reports.json");

    let categories = build_categories(&state.categories, &state.reports);
    fs::write(
        reports_dir.join("categories.json"),
        serde_json::to_string(&categories)?,
    )?;
    debug!("run"; "generated categories.json");
    Ok(())
}

/// Final summary: counts plus every skipped document with its reason.
fn summarize(config: &RunConfig, state: &RunState) {
    log!("run"; "done parsing files, {} report(s) stored at {}",
        state.reports.len(), config.output_dir.display());

    if !state.failures.is_empty() {
        log!("error"; "{} document(s) skipped:", state.failures.len());
        for (path, err) in &state.failures {
            log!("error"; "  {}: {err}", path.display());
        }
    }
}
