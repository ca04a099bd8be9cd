pub mod literal;
pub mod record;

use crate::error::CoreResult;
use crate::issues::IssueLog;
use record::QuestionRecord;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const JSON_SUBDIR: &str = "json";

/// JSON catalogs in `json/` win; legacy files are only scanned when none exist.
pub fn load_catalogs(
    catalogs_dir: &Path,
    legacy_extensions: &[String],
    issues: &mut IssueLog,
) -> Vec<QuestionRecord> {
    let json_files = list_files(&catalogs_dir.join(JSON_SUBDIR), &["json".to_string()]);
    if !json_files.is_empty() {
        tracing::debug!(count = json_files.len(), "loading JSON catalogs");
        let mut out = Vec::new();
        for path in &json_files {
            out.extend(load_json_catalog(path, issues));
        }
        return out;
    }

    let legacy_files = list_files(catalogs_dir, legacy_extensions);
    tracing::debug!(count = legacy_files.len(), "no JSON catalogs, scanning legacy files");
    let mut out = Vec::new();
    for path in &legacy_files {
        out.extend(load_legacy_catalog(path, issues));
    }
    out
}

fn load_json_catalog(path: &Path, issues: &mut IssueLog) -> Vec<QuestionRecord> {
    let source = format!("{}/{}", JSON_SUBDIR, file_name(path));
    match read_json(path) {
        Ok(Value::Array(items)) => records_from(&items, &source),
        Ok(_) => {
            issues.warning(format!("skipped non-array JSON catalog {}", source));
            Vec::new()
        }
        Err(e) => {
            issues.error(format!("failed to parse JSON catalog {}: {}", source, e));
            Vec::new()
        }
    }
}

fn load_legacy_catalog(path: &Path, issues: &mut IssueLog) -> Vec<QuestionRecord> {
    let source = file_name(path);
    match read_legacy(path) {
        Ok(Value::Array(items)) => records_from(&items, &source),
        other => {
            if let Err(e) = other {
                tracing::debug!(file = %source, error = %e, "legacy extraction failed");
            }
            issues.warning(format!(
                "skipped validation for non-JSON question file {}",
                source
            ));
            Vec::new()
        }
    }
}

fn read_json(path: &Path) -> CoreResult<Value> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn read_legacy(path: &Path) -> CoreResult<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(literal::extract_array_literal(&content)?)
}

fn records_from(items: &[Value], source: &str) -> Vec<QuestionRecord> {
    items
        .iter()
        .map(|v| QuestionRecord::from_value(v, source))
        .collect()
}

fn list_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .map(|x| extensions.iter().any(|want| want == x))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
