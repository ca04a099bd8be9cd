use serde_json::Value;

pub const MAX_PROMPT_CHARS: usize = 500;
pub const MIN_DIFFICULTY: f64 = 1.0;
pub const MAX_DIFFICULTY: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Mcq,
    Scenario,
    Opinion,
    Ordering,
    Connection,
    EmojiDecode,
    Other(String),
}

impl QuestionType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "mcq" => QuestionType::Mcq,
            "scenario" => QuestionType::Scenario,
            "opinion" => QuestionType::Opinion,
            "ordering" => QuestionType::Ordering,
            "connection" => QuestionType::Connection,
            "emoji-decode" => QuestionType::EmojiDecode,
            other => QuestionType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::Scenario => "scenario",
            QuestionType::Opinion => "opinion",
            QuestionType::Ordering => "ordering",
            QuestionType::Connection => "connection",
            QuestionType::EmojiDecode => "emoji-decode",
            QuestionType::Other(s) => s,
        }
    }

    /// Fixed option cardinality, or `None` when the type leaves it open.
    pub fn expected_option_count(&self) -> Option<usize> {
        match self {
            QuestionType::Mcq | QuestionType::EmojiDecode => Some(4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    pub id: Option<String>,
    pub game_id: Option<String>,
    pub category: Option<String>,
    pub kind: Option<QuestionType>,
    pub difficulty: Option<Value>,
    pub prompt: Option<String>,
    pub options: Option<Vec<Value>>,
    pub correct_index: Option<f64>,
    pub family_safe: Option<bool>,
    pub source: String,
}

impl QuestionRecord {
    pub fn from_value(value: &Value, source: &str) -> Self {
        let prompt = non_empty_text(value.get("prompt"))
            .or_else(|| non_empty_text(value.get("question")));
        Self {
            id: non_empty_text(value.get("id")),
            game_id: non_empty_text(value.get("game_id")),
            category: non_empty_text(value.get("category")),
            kind: value
                .get("type")
                .and_then(|t| t.as_str())
                .filter(|t| !t.is_empty())
                .map(QuestionType::parse),
            difficulty: value.get("difficulty").filter(|d| !d.is_null()).cloned(),
            prompt,
            options: value.get("options").and_then(|o| o.as_array()).cloned(),
            correct_index: value.get("correct_index").and_then(|c| c.as_f64()),
            family_safe: value.get("family_safe").and_then(|f| f.as_bool()),
            source: source.to_string(),
        }
    }

    pub fn location(&self) -> String {
        format!("{}:{}", self.source, self.id.as_deref().unwrap_or("no-id"))
    }

    pub fn difficulty_value(&self) -> Option<f64> {
        self.difficulty.as_ref().and_then(|d| d.as_f64())
    }

    pub fn difficulty_display(&self) -> String {
        match &self.difficulty {
            Some(v) => value_text(v),
            None => "missing".to_string(),
        }
    }
}

pub fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn non_empty_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
