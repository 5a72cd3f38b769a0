//! Report assembly and persistence.
//!
//! Composes the pipeline for one document: metadata extraction, rendering,
//! image URL rewriting, segmentation, payload encoding, and the final
//! Report entity written as an individual JSON file.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::config::RunConfig;
use crate::debug;
use crate::markdown::{MarkdownOptions, from_markdown};
use crate::report::JsonMap;
use crate::report::encode::encode_fragment;
use crate::report::meta::extract_metadata;
use crate::report::rewrite::rewrite_image_urls;
use crate::report::segment::{Fragments, segment};

/// Per-document errors. Each one is fatal for its document only; the run
/// continues with the remaining documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("`report-categories` is missing or empty in `{0}`")]
    MissingCategories(PathBuf),
}

/// One processed document: the Report entity plus the category names it
/// contributes to the run-wide distinct-category set.
#[derive(Debug)]
pub struct DocumentOutput {
    pub report: JsonMap,
    pub categories: Vec<String>,
}

/// Read and assemble one report document.
pub fn process_document(path: &Path, config: &RunConfig) -> Result<DocumentOutput, DocumentError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| DocumentError::Read(path.to_path_buf(), err))?;
    assemble(path, &raw, config)
}

/// Assemble the Report entity from raw document text.
pub fn assemble(
    path: &Path,
    raw: &str,
    config: &RunConfig,
) -> Result<DocumentOutput, DocumentError> {
    // Seed the report from the header; a missing header behaves like an
    // empty one and fails the category requirement below.
    let mut report = extract_metadata(raw).unwrap_or_default();
    let categories = category_names(&report)
        .ok_or_else(|| DocumentError::MissingCategories(path.to_path_buf()))?;
    debug!("meta"; "{}: {} header keys", path.display(), report.len());

    // Render the entire document; the header degrades to noise nodes that
    // segmentation drops.
    let mut nodes = from_markdown(raw, &MarkdownOptions::all());
    rewrite_image_urls(&mut nodes, &config.base_url);

    let title = normalize_title(&report, path);
    report.insert("title".to_string(), Value::String(title));

    match segment(&nodes, config.mode) {
        Fragments::Full(content) => {
            insert_payload(&mut report, "content", content);
        }
        Fragments::Sections {
            overview,
            configuration,
            use_cases,
        } => {
            insert_payload(&mut report, "overview", overview);
            insert_payload(&mut report, "configuration", configuration);
            insert_payload(&mut report, "use_cases", use_cases);
        }
    }

    // The `image` header field becomes an absolute `image-url` and is
    // dropped from the record. Prefix is `/reports/images/`, distinct from
    // the embedded-image rule.
    let image = report
        .get("image")
        .and_then(Value::as_str)
        .map(str::to_string);
    if let Some(name) = image {
        let url = format!("{}/reports/images/{}", config.base_url, name);
        report.insert("image-url".to_string(), Value::String(url));
        report.shift_remove("image");
    }

    Ok(DocumentOutput { report, categories })
}

/// Category names from the required `report-categories` header field.
fn category_names(report: &JsonMap) -> Option<Vec<String>> {
    let list = report.get("report-categories")?.as_array()?;
    let names: Vec<String> = list
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    (!names.is_empty()).then_some(names)
}

/// Title from metadata or the file stem, with slashes replaced by spaces.
fn normalize_title(report: &JsonMap, path: &Path) -> String {
    let title = report
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string()
        });
    title.replace('/', " ")
}

fn insert_payload(report: &mut JsonMap, field: &str, fragment: Option<String>) {
    if let Some(fragment) = fragment {
        report.insert(field.to_string(), Value::String(encode_fragment(&fragment)));
    }
}

/// File name slug: title with spaces replaced by hyphens.
pub fn slug(title: &str) -> String {
    title.replace(' ', "-")
}

/// Persist one Report as `<slug>.json` in the reports directory.
pub fn write_report(report: &JsonMap, reports_dir: &Path) -> anyhow::Result<()> {
    let title = report
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let file_name = format!("{}.json", slug(title));

    std::fs::create_dir_all(reports_dir)?;
    std::fs::write(
        reports_dir.join(&file_name),
        serde_json::to_string(report)?,
    )?;
    debug!("reports"; "wrote {file_name}");
    Ok(())
}
