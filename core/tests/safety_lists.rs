use content_core::issues::IssueLog;
use content_core::safety::defaults::SafetyDefaults;
use content_core::safety::resolve_safety_lists;
use content_core::validator::banned::scan_banned;

fn defaults() -> SafetyDefaults {
    SafetyDefaults {
        hard_banned: vec!["sex".to_string(), "porn".to_string()],
        soft_banned: vec![],
        whitelist: vec!["Essex".to_string()],
    }
}

#[test]
fn missing_whitelist_file_uses_defaults_silently() {
    let tmp = tempfile::tempdir().unwrap();
    let mut issues = IssueLog::new();
    let lists = resolve_safety_lists(
        &defaults(),
        &tmp.path().join("config/bannedWhitelist.json"),
        &mut issues,
    );
    assert_eq!(issues, IssueLog::new());
    assert!(lists.whitelist.contains("essex"));
    assert_eq!(lists.whitelist.len(), 1);
}

#[test]
fn whitelist_file_extends_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bannedWhitelist.json");
    std::fs::write(&path, r#"["SEX", "  ", 42]"#).unwrap();
    let mut issues = IssueLog::new();
    let lists = resolve_safety_lists(&defaults(), &path, &mut issues);
    assert_eq!(issues.warning_count(), 0);
    assert!(lists.whitelist.contains("sex"));
    assert!(lists.whitelist.contains("essex"));
    assert_eq!(lists.whitelist.len(), 2);
}

#[test]
fn malformed_whitelist_degrades_to_defaults_with_warning() {
    let tmp = tempfile::tempdir().unwrap();
    for body in [r#"{"terms": ["sex"]}"#, "[\"sex\", oops"] {
        let path = tmp.path().join("bannedWhitelist.json");
        std::fs::write(&path, body).unwrap();
        let mut issues = IssueLog::new();
        let lists = resolve_safety_lists(&defaults(), &path, &mut issues);
        assert_eq!(issues.error_count(), 0, "{}", body);
        assert_eq!(issues.warning_count(), 1, "{}", body);
        assert!(issues.warnings()[0].message.ends_with("using default whitelist"));
        assert!(!lists.whitelist.contains("sex"));
        assert!(lists.whitelist.contains("essex"));
    }
}

#[test]
fn whitelisted_hard_term_never_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bannedWhitelist.json");
    let prompt = "This is about sex education";

    let mut issues = IssueLog::new();
    let without = resolve_safety_lists(&defaults(), &path, &mut issues);
    assert_eq!(scan_banned(prompt, &without).hard_hits, vec!["sex".to_string()]);

    std::fs::write(&path, r#"["Sex"]"#).unwrap();
    let with = resolve_safety_lists(&defaults(), &path, &mut issues);
    assert!(!scan_banned(prompt, &with).has_hard_hit());
}

#[test]
fn default_whitelist_survives_any_override_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bannedWhitelist.json");
    std::fs::write(&path, "[]").unwrap();
    let mut issues = IssueLog::new();
    let lists = resolve_safety_lists(&defaults(), &path, &mut issues);
    assert!(lists.is_whitelisted("ESSEX"));
    // Exemption is per banned term, not per word containing it.
    assert_eq!(
        scan_banned("Which county is Essex in?", &lists).hard_hits,
        vec!["sex".to_string()]
    );
}

#[test]
fn padded_whitelist_entries_are_trimmed() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bannedWhitelist.json");
    std::fs::write(&path, r#"[" Sex "]"#).unwrap();
    let mut issues = IssueLog::new();
    let lists = resolve_safety_lists(&defaults(), &path, &mut issues);
    assert!(lists.whitelist.contains("sex"));
    assert!(!scan_banned("This is about sex education", &lists).has_hard_hit());
}
