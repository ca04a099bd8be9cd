use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetyDefaults {
    pub hard_banned: Vec<String>,
    #[serde(default)]
    pub soft_banned: Vec<String>,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl SafetyDefaults {
    pub fn builtin() -> Self {
        let json = include_str!("safety_defaults.json");
        serde_json::from_str(json).expect("embedded safety defaults JSON must parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults_parse() {
        let d = SafetyDefaults::builtin();
        assert!(d.hard_banned.iter().any(|t| t == "sex"));
        assert!(d.soft_banned.is_empty());
        assert!(d.whitelist.is_empty());
    }
}
