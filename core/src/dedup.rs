use crate::catalog::record::{value_text, QuestionRecord};
use crate::issues::IssueLog;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// `None` for a blank prompt, which never takes part in duplicate detection.
pub fn canonical_key(r: &QuestionRecord) -> Option<String> {
    let prompt = r.prompt.as_deref().unwrap_or("").trim().to_lowercase();
    if prompt.is_empty() {
        return None;
    }
    let kind = r.kind.as_ref().map(|k| k.as_str()).unwrap_or("unknown");
    let options = r
        .options
        .as_ref()
        .map(|opts| {
            opts.iter()
                .map(|o| value_text(o).to_lowercase().trim().to_string())
                .collect::<Vec<_>>()
                .join("|")
        })
        .unwrap_or_default();
    Some(format!("{}::{}::{}", prompt, kind, options))
}

fn owner_label(r: &QuestionRecord) -> String {
    format!(
        "{} (game: {})",
        r.source,
        r.game_id.as_deref().unwrap_or("none")
    )
}

pub fn detect_duplicates(records: &[QuestionRecord], issues: &mut IssueLog) {
    let mut owners: HashMap<String, String> = HashMap::new();
    for r in records {
        let Some(key) = canonical_key(r) else {
            continue;
        };
        match owners.entry(key) {
            Entry::Occupied(first) => issues.error(format!(
                "duplicate question: {} duplicates {}",
                owner_label(r),
                first.get()
            )),
            Entry::Vacant(slot) => {
                slot.insert(owner_label(r));
            }
        }
    }
}
