use crate::catalog::load_catalogs;
use crate::config::PipelineConfig;
use crate::dedup::detect_duplicates;
use crate::issues::IssueLog;
use crate::report::{gate, timestamp_now, write_summary, GateVerdict, Summary};
use crate::safety::defaults::SafetyDefaults;
use crate::safety::resolve_safety_lists;
use crate::validator::ValidationEngine;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub checked: usize,
    pub issues: IssueLog,
    pub summary: Summary,
    pub summary_written: bool,
}

impl RunOutcome {
    pub fn verdict(&self) -> GateVerdict {
        gate(&self.issues)
    }

    pub fn passed(&self) -> bool {
        self.verdict() == GateVerdict::Pass
    }
}

pub fn run(cfg: &PipelineConfig) -> RunOutcome {
    run_with_defaults(cfg, &SafetyDefaults::builtin())
}

pub fn run_with_defaults(cfg: &PipelineConfig, defaults: &SafetyDefaults) -> RunOutcome {
    let mut issues = IssueLog::new();

    let lists = resolve_safety_lists(defaults, &cfg.whitelist_path, &mut issues);
    let records = load_catalogs(&cfg.catalogs_dir, &cfg.legacy_extensions, &mut issues);
    tracing::info!(records = records.len(), "catalogs loaded");

    ValidationEngine::new(&lists, cfg.require_family_safe).validate_all(&records, &mut issues);
    detect_duplicates(&records, &mut issues);

    let checked = records.len();
    if checked == 0 {
        issues.warning("no catalogs found");
    }

    let summary = Summary::from_issues(checked, &issues, timestamp_now());
    let summary_written = match write_summary(&cfg.summary_path, &summary) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(path = %cfg.summary_path.display(), error = %e, "failed to write validation summary");
            false
        }
    };

    RunOutcome {
        checked,
        issues,
        summary,
        summary_written,
    }
}
