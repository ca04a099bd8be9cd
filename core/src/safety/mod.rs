pub mod defaults;
pub mod whitelist;

use crate::error::CoreError;
use crate::issues::IssueLog;
use defaults::SafetyDefaults;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafetyLists {
    pub hard_banned: BTreeSet<String>,
    pub soft_banned: BTreeSet<String>,
    pub whitelist: BTreeSet<String>,
}

impl SafetyLists {
    pub fn from_defaults(defaults: &SafetyDefaults) -> Self {
        Self {
            hard_banned: term_set(&defaults.hard_banned),
            soft_banned: term_set(&defaults.soft_banned),
            whitelist: term_set(&defaults.whitelist),
        }
    }

    pub fn with_whitelist_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.whitelist
            .extend(terms.into_iter().filter_map(|t| normalize_term(t.as_ref())));
        self
    }

    pub fn is_whitelisted(&self, term: &str) -> bool {
        normalize_term(term)
            .map(|t| self.whitelist.contains(&t))
            .unwrap_or(false)
    }
}

pub fn normalize_term(term: &str) -> Option<String> {
    let t = term.trim().to_lowercase();
    if t.is_empty() {
        None
    } else {
        Some(t)
    }
}

fn term_set(terms: &[String]) -> BTreeSet<String> {
    terms.iter().filter_map(|t| normalize_term(t)).collect()
}

/// Never fails: a missing or malformed override file degrades to defaults.
pub fn resolve_safety_lists(
    defaults: &SafetyDefaults,
    whitelist_path: &Path,
    issues: &mut IssueLog,
) -> SafetyLists {
    let lists = SafetyLists::from_defaults(defaults);
    match whitelist::read_whitelist_terms(whitelist_path) {
        Ok(Some(terms)) => {
            tracing::debug!(path = %whitelist_path.display(), count = terms.len(), "loaded whitelist overrides");
            lists.with_whitelist_terms(terms)
        }
        Ok(None) => lists,
        Err(CoreError::InvalidInput(msg)) => {
            tracing::warn!(path = %whitelist_path.display(), "whitelist is not an array");
            issues.warning(format!("{}; using default whitelist", msg));
            lists
        }
        Err(e) => {
            tracing::warn!(path = %whitelist_path.display(), error = %e, "whitelist unreadable");
            issues.warning(format!(
                "failed to load whitelist {}: {}; using default whitelist",
                whitelist_path.display(),
                e
            ));
            lists
        }
    }
}
