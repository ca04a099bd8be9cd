use crate::error::CoreResult;
use crate::issues::IssueLog;
use serde::{Deserialize, Serialize};
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub checked: usize,
    pub warnings: usize,
    pub errors: usize,
    pub timestamp: String,
}

impl Summary {
    pub fn from_issues(checked: usize, issues: &IssueLog, timestamp: String) -> Self {
        Self {
            checked,
            warnings: issues.warning_count(),
            errors: issues.error_count(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Pass,
    Fail,
}

impl GateVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            GateVerdict::Pass => "PASS",
            GateVerdict::Fail => "FAIL",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            GateVerdict::Pass => 0,
            GateVerdict::Fail => 1,
        }
    }
}

pub fn gate(issues: &IssueLog) -> GateVerdict {
    if issues.has_errors() {
        GateVerdict::Fail
    } else {
        GateVerdict::Pass
    }
}

pub fn timestamp_now() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

pub fn write_summary(path: &Path, summary: &Summary) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = serde_json::to_string_pretty(summary)?;
    out.push('\n');
    std::fs::write(path, out)?;
    Ok(())
}

pub fn render_lines(summary: &Summary, issues: &IssueLog) -> Vec<String> {
    let mut lines = Vec::with_capacity(issues.warning_count() + issues.error_count() + 1);
    for w in issues.warnings() {
        lines.push(format!("{} {}", w.severity, w.message));
    }
    for e in issues.errors() {
        lines.push(format!("{} {}", e.severity, e.message));
    }
    lines.push(format!(
        "CONTENT_VALIDATION {} checked={} warnings={} errors={}",
        gate(issues).as_str(),
        summary.checked,
        summary.warnings,
        summary.errors
    ));
    lines
}
