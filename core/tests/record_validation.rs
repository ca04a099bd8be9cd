use content_core::catalog::record::QuestionRecord;
use content_core::issues::IssueLog;
use content_core::safety::defaults::SafetyDefaults;
use content_core::safety::SafetyLists;
use content_core::validator::ValidationEngine;
use serde_json::{json, Value};

fn lists() -> SafetyLists {
    SafetyLists::from_defaults(&SafetyDefaults {
        hard_banned: vec!["sex".to_string()],
        soft_banned: vec!["beer".to_string()],
        whitelist: vec![],
    })
}

fn check(v: Value) -> IssueLog {
    let l = lists();
    let mut issues = IssueLog::new();
    let r = QuestionRecord::from_value(&v, "json/test.json");
    ValidationEngine::new(&l, false).check_record(&r, &mut issues);
    issues
}

fn valid_mcq() -> Value {
    json!({
        "id": "q1",
        "game_id": "g1",
        "category": "science",
        "type": "mcq",
        "difficulty": 5,
        "prompt": "Which planet is largest?",
        "options": ["Jupiter", "Mars", "Venus", "Earth"],
        "correct_index": 0,
        "family_safe": true
    })
}

fn error_messages(issues: &IssueLog) -> Vec<String> {
    issues.errors().iter().map(|e| e.message.clone()).collect()
}

#[test]
fn well_formed_mcq_is_clean() {
    let issues = check(valid_mcq());
    assert_eq!(issues, IssueLog::new());
}

#[test]
fn mcq_with_three_options_has_one_error() {
    let issues = check(json!({
        "game_id": "g1", "type": "mcq", "difficulty": 5, "prompt": "Pick one",
        "options": ["a", "b", "c"], "correct_index": 0
    }));
    assert_eq!(
        error_messages(&issues),
        vec!["json/test.json:no-id: expected 4 options for type mcq".to_string()]
    );
    let warnings: Vec<_> = issues.warnings().iter().map(|w| w.message.as_str()).collect();
    assert_eq!(
        warnings,
        vec![
            "json/test.json:no-id: missing id (will be auto-assigned)",
            "json/test.json:no-id: missing category",
        ]
    );
}

#[test]
fn difficulty_must_be_a_number_in_range() {
    for (d, ok) in [
        (json!(1), true),
        (json!(20), true),
        (json!(5.5), true),
        (json!(0), false),
        (json!(21), false),
        (json!(-3), false),
        (json!("5"), false),
        (Value::Null, false),
    ] {
        let mut q = valid_mcq();
        q["difficulty"] = d.clone();
        let issues = check(q);
        let has_difficulty_error = issues
            .errors()
            .iter()
            .any(|e| e.message.contains("invalid difficulty"));
        assert_eq!(has_difficulty_error, !ok, "difficulty {}", d);
    }

    let mut q = valid_mcq();
    q["difficulty"] = json!(25);
    let issues = check(q);
    assert!(error_messages(&issues)[0].contains("invalid difficulty 25"));
}

#[test]
fn option_count_matters_only_for_fixed_types() {
    for n in 0..7 {
        let options: Vec<String> = (0..n).map(|i| format!("opt{}", i)).collect();
        for kind in ["mcq", "emoji-decode", "ordering", "scenario", "opinion", "connection"] {
            let mut q = valid_mcq();
            q["type"] = json!(kind);
            q["options"] = json!(options);
            let issues = check(q);
            let count_error = issues
                .errors()
                .iter()
                .any(|e| e.message.contains("options for type"));
            let fixed = kind == "mcq" || kind == "emoji-decode";
            assert_eq!(count_error, fixed && n != 4, "type {} with {} options", kind, n);
        }
    }
}

#[test]
fn non_array_options_fail_fixed_count_types() {
    let mut q = valid_mcq();
    q["options"] = json!("a|b|c|d");
    assert_eq!(check(q).error_count(), 1);
}

#[test]
fn mcq_requires_numeric_correct_index() {
    let mut q = valid_mcq();
    q.as_object_mut().unwrap().remove("correct_index");
    assert_eq!(
        error_messages(&check(q)),
        vec!["json/test.json:q1: mcq missing numeric correct_index".to_string()]
    );

    let mut q = valid_mcq();
    q["type"] = json!("opinion");
    q.as_object_mut().unwrap().remove("correct_index");
    assert_eq!(check(q).error_count(), 0);
}

#[test]
fn prompt_length_limit_is_inclusive() {
    let mut q = valid_mcq();
    q["prompt"] = json!("é".repeat(500));
    assert_eq!(check(q).error_count(), 0);

    let mut q = valid_mcq();
    q["prompt"] = json!("a".repeat(501));
    let errs = error_messages(&check(q));
    assert_eq!(errs.len(), 1);
    assert!(errs[0].contains("prompt too long (501 > 500 chars)"));
}

#[test]
fn prompt_length_counts_utf16_units() {
    let mut q = valid_mcq();
    q["prompt"] = json!("😀".repeat(250));
    assert_eq!(check(q).error_count(), 0);

    let mut q = valid_mcq();
    q["prompt"] = json!("😀".repeat(300));
    let errs = error_messages(&check(q));
    assert_eq!(errs.len(), 1);
    assert!(errs[0].contains("prompt too long (600 > 500 chars)"), "{}", errs[0]);
}

#[test]
fn question_alias_counts_as_prompt() {
    let mut q = valid_mcq();
    let prompt = q.as_object_mut().unwrap().remove("prompt").unwrap();
    q["question"] = prompt;
    assert_eq!(check(q).error_count(), 0);
}

#[test]
fn every_failure_is_reported_separately() {
    let issues = check(json!({"difficulty": 99, "options": []}));
    let errs = error_messages(&issues);
    assert_eq!(
        errs,
        vec![
            "json/test.json:no-id: missing game_id".to_string(),
            "json/test.json:no-id: missing type".to_string(),
            "json/test.json:no-id: invalid difficulty 99".to_string(),
            "json/test.json:no-id: missing prompt".to_string(),
        ]
    );
    assert_eq!(issues.warning_count(), 2);
}

#[test]
fn banned_terms_split_into_errors_and_warnings() {
    let mut q = valid_mcq();
    q["prompt"] = json!("Sex, beer and trivia");
    let issues = check(q);
    assert_eq!(
        error_messages(&issues),
        vec!["json/test.json:q1: contains banned term \"sex\"".to_string()]
    );
    assert_eq!(
        issues.warnings()[0].message,
        "json/test.json:q1: contains soft-banned term \"beer\""
    );
}

#[test]
fn family_safe_pass_warns_after_record_checks() {
    let l = lists();
    let mut no_flag = valid_mcq();
    no_flag.as_object_mut().unwrap().remove("family_safe");
    let mut string_flag = valid_mcq();
    string_flag["id"] = json!("q2");
    string_flag["prompt"] = json!("Another?");
    string_flag["family_safe"] = json!("true");
    let records = vec![
        QuestionRecord::from_value(&no_flag, "json/a.json"),
        QuestionRecord::from_value(&string_flag, "json/a.json"),
        QuestionRecord::from_value(&valid_mcq(), "json/b.json"),
    ];

    let mut strict = IssueLog::new();
    ValidationEngine::new(&l, true).validate_all(&records, &mut strict);
    let warnings: Vec<_> = strict.warnings().iter().map(|w| w.message.as_str()).collect();
    assert_eq!(
        warnings,
        vec![
            "json/a.json:q1: family_safe not set, will default to true",
            "json/a.json:q2: family_safe not set, will default to true",
        ]
    );
    assert_eq!(strict.error_count(), 0);

    let mut relaxed = IssueLog::new();
    ValidationEngine::new(&l, false).validate_all(&records, &mut relaxed);
    assert_eq!(relaxed.warning_count(), 0);
}
