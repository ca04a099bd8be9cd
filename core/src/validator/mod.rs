pub mod banned;

use crate::catalog::record::{
    QuestionRecord, QuestionType, MAX_DIFFICULTY, MAX_PROMPT_CHARS, MIN_DIFFICULTY,
};
use crate::issues::IssueLog;
use crate::safety::SafetyLists;
use banned::scan_banned;

pub struct ValidationEngine<'a> {
    lists: &'a SafetyLists,
    require_family_safe: bool,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(lists: &'a SafetyLists, require_family_safe: bool) -> Self {
        Self {
            lists,
            require_family_safe,
        }
    }

    pub fn validate_all(&self, records: &[QuestionRecord], issues: &mut IssueLog) {
        for r in records {
            self.check_record(r, issues);
        }
        if self.require_family_safe {
            check_family_safe(records, issues);
        }
    }

    pub fn check_record(&self, r: &QuestionRecord, issues: &mut IssueLog) {
        let loc = r.location();

        if r.id.is_none() {
            issues.warning(format!("{}: missing id (will be auto-assigned)", loc));
        }
        if r.game_id.is_none() {
            issues.error(format!("{}: missing game_id", loc));
        }
        if r.category.is_none() {
            issues.warning(format!("{}: missing category", loc));
        }
        if r.kind.is_none() {
            issues.error(format!("{}: missing type", loc));
        }

        match r.difficulty_value() {
            Some(d) if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&d) => {}
            _ => issues.error(format!(
                "{}: invalid difficulty {}",
                loc,
                r.difficulty_display()
            )),
        }

        match r.prompt.as_deref() {
            None => issues.error(format!("{}: missing prompt", loc)),
            Some(p) => {
                // UTF-16 code units, so astral-plane characters count twice.
                let len = p.encode_utf16().count();
                if len > MAX_PROMPT_CHARS {
                    issues.error(format!(
                        "{}: prompt too long ({} > {} chars)",
                        loc, len, MAX_PROMPT_CHARS
                    ));
                }
                let scan = scan_banned(p, self.lists);
                for term in &scan.hard_hits {
                    issues.error(format!("{}: contains banned term \"{}\"", loc, term));
                }
                for term in &scan.soft_hits {
                    issues.warning(format!("{}: contains soft-banned term \"{}\"", loc, term));
                }
            }
        }

        if let Some(kind) = &r.kind {
            if let Some(expected) = kind.expected_option_count() {
                let actual = r.options.as_ref().map(|o| o.len());
                if actual != Some(expected) {
                    issues.error(format!(
                        "{}: expected {} options for type {}",
                        loc,
                        expected,
                        kind.as_str()
                    ));
                }
            }
            if *kind == QuestionType::Mcq && r.correct_index.is_none() {
                issues.error(format!("{}: mcq missing numeric correct_index", loc));
            }
        }
    }
}

pub fn check_family_safe(records: &[QuestionRecord], issues: &mut IssueLog) {
    for r in records.iter().filter(|r| r.family_safe.is_none()) {
        issues.warning(format!(
            "{}: family_safe not set, will default to true",
            r.location()
        ));
    }
}
