use super::defaults::SafetyDefaults;
use super::{normalize_term, SafetyLists};
use crate::error::{CoreError, CoreResult};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub fn read_whitelist_terms(path: &Path) -> CoreResult<Option<Vec<String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path)?;
    let v: Value = serde_json::from_slice(&bytes)?;
    match v {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|t| match t {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )),
        _ => Err(CoreError::InvalidInput(format!(
            "whitelist file {} is not a JSON array",
            path.display()
        ))),
    }
}

pub struct WhitelistStore {
    path: PathBuf,
}

impl WhitelistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn terms(&self) -> CoreResult<BTreeSet<String>> {
        Ok(read_whitelist_terms(&self.path)?
            .unwrap_or_default()
            .iter()
            .filter_map(|t| normalize_term(t))
            .collect())
    }

    pub fn effective_lists(&self, defaults: &SafetyDefaults) -> CoreResult<SafetyLists> {
        Ok(SafetyLists::from_defaults(defaults).with_whitelist_terms(self.terms()?))
    }

    pub fn add_term(&self, term: &str) -> CoreResult<bool> {
        let t = normalize_term(term)
            .ok_or_else(|| CoreError::InvalidInput("whitelist term must not be blank".to_string()))?;
        let mut terms = self.terms()?;
        if !terms.insert(t) {
            return Ok(false);
        }
        self.write(&terms)?;
        Ok(true)
    }

    pub fn remove_term(&self, term: &str, defaults: &SafetyDefaults) -> CoreResult<bool> {
        let t = normalize_term(term)
            .ok_or_else(|| CoreError::InvalidInput("whitelist term must not be blank".to_string()))?;
        if defaults
            .whitelist
            .iter()
            .any(|d| normalize_term(d).as_deref() == Some(t.as_str()))
        {
            return Err(CoreError::InvalidInput(format!(
                "\"{}\" is a default whitelist term and cannot be removed",
                t
            )));
        }
        let mut terms = self.terms()?;
        if !terms.remove(&t) {
            return Ok(false);
        }
        self.write(&terms)?;
        Ok(true)
    }

    pub fn seed_defaults(&self, defaults: &SafetyDefaults) -> CoreResult<usize> {
        let mut terms = self.terms()?;
        let before = terms.len();
        terms.extend(defaults.whitelist.iter().filter_map(|t| normalize_term(t)));
        let added = terms.len() - before;
        if added > 0 || !self.path.exists() {
            self.write(&terms)?;
        }
        Ok(added)
    }

    fn write(&self, terms: &BTreeSet<String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = serde_json::to_string_pretty(terms)?;
        out.push('\n');
        std::fs::write(&self.path, out)?;
        Ok(())
    }
}
