use crate::safety::SafetyLists;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannedScan {
    pub hard_hits: Vec<String>,
    pub soft_hits: Vec<String>,
}

impl BannedScan {
    pub fn has_hard_hit(&self) -> bool {
        !self.hard_hits.is_empty()
    }
}

pub fn scan_banned(prompt: &str, lists: &SafetyLists) -> BannedScan {
    let text = prompt.to_lowercase();
    let hits = |terms: &std::collections::BTreeSet<String>| -> Vec<String> {
        terms
            .iter()
            .filter(|t| text.contains(t.as_str()) && !lists.whitelist.contains(*t))
            .cloned()
            .collect()
    };
    BannedScan {
        hard_hits: hits(&lists.hard_banned),
        soft_hits: hits(&lists.soft_banned),
    }
}
