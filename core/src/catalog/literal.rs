use crate::error::CoreError;
use serde_json::{Map, Number, Value};
use std::fmt;

const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl From<LiteralError> for CoreError {
    fn from(e: LiteralError) -> Self {
        CoreError::LiteralParse {
            offset: e.offset,
            message: e.message,
        }
    }
}

type LiteralResult<T> = Result<T, LiteralError>;

// Only literals are accepted; identifiers, calls and interpolation are rejected.
pub fn extract_array_literal(content: &str) -> LiteralResult<Value> {
    let start = content.find('[');
    let end = content.rfind(']');
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if e > s => (s, e),
        _ => {
            return Err(LiteralError {
                offset: 0,
                message: "no array literal found".to_string(),
            })
        }
    };
    parse_literal(&content[start..=end])
}

pub fn parse_literal(src: &str) -> LiteralResult<Value> {
    let mut p = LiteralParser { src, pos: 0 };
    p.skip_trivia()?;
    let v = p.parse_value(0)?;
    p.skip_trivia()?;
    // `[...];` followed by a comment is how most legacy files end.
    if p.peek() == Some(';') {
        p.bump();
        p.skip_trivia()?;
    }
    if p.pos != src.len() {
        return Err(p.error("unexpected trailing content"));
    }
    Ok(v)
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect(&mut self, want: char) -> LiteralResult<()> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", want, c))),
            None => Err(self.error(format!("expected '{}', found end of input", want))),
        }
    }

    fn skip_trivia(&mut self) -> LiteralResult<()> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let open = self.pos;
                    match self.src[self.pos + 2..].find("*/") {
                        Some(rel) => self.pos += 2 + rel + 2,
                        None => {
                            return Err(LiteralError {
                                offset: open,
                                message: "unterminated block comment".to_string(),
                            })
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self, depth: usize) -> LiteralResult<Value> {
        if depth > MAX_DEPTH {
            return Err(self.error("literal nested too deeply"));
        }
        match self.peek() {
            Some('[') => self.parse_array(depth),
            Some('{') => self.parse_object(depth),
            Some(q @ ('"' | '\'' | '`')) => Ok(Value::String(self.parse_string(q)?)),
            Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => {
                self.parse_number()
            }
            Some(c) if is_ident_start(c) => {
                let start = self.pos;
                let word = self.parse_identifier();
                match word {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    other => Err(LiteralError {
                        offset: start,
                        message: format!("identifier '{}' is not a literal", other),
                    }),
                }
            }
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self, depth: usize) -> LiteralResult<Value> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Value::Array(items));
            }
            if self.peek() == Some(',') {
                return Err(self.error("array holes are not allowed"));
            }
            items.push(self.parse_value(depth + 1)?);
            self.skip_trivia()?;
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Value::Array(items)),
                Some(c) => return Err(self.error(format!("unexpected '{}' in array", c))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> LiteralResult<Value> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            let key = match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                Some(q @ ('"' | '\'')) => self.parse_string(q)?,
                Some(c) if c.is_ascii_digit() => match self.parse_number()? {
                    Value::Number(n) => n.to_string(),
                    _ => return Err(self.error("invalid numeric key")),
                },
                Some(c) if is_ident_start(c) => self.parse_identifier().to_string(),
                Some(c) => return Err(self.error(format!("unexpected '{}' in object key", c))),
                None => return Err(self.error("unterminated object")),
            };
            self.skip_trivia()?;
            // Shorthand properties and methods reference bindings; only `key: literal` is allowed.
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.parse_value(depth + 1)?;
            map.insert(key, value);
            self.skip_trivia()?;
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(c) => return Err(self.error(format!("unexpected '{}' in object", c))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_identifier(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        &src[start..self.pos]
    }

    fn parse_number(&mut self) -> LiteralResult<Value> {
        let src = self.src;
        let start = self.pos;
        let negative = self.peek() == Some('-');
        if negative {
            self.bump();
        }

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.bump();
            }
            let n = i64::from_str_radix(&src[digits_start..self.pos], 16).map_err(|_| {
                LiteralError {
                    offset: start,
                    message: format!("invalid hex literal '{}'", &src[start..self.pos]),
                }
            })?;
            return Ok(Value::from(if negative { -n } else { n }));
        }

        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' => is_float = true,
                'e' | 'E' => {
                    is_float = true;
                    if matches!(self.peek_at(1), Some('+' | '-')) {
                        self.bump();
                    }
                }
                _ => break,
            }
            self.bump();
        }
        let text = &src[start..self.pos];
        let invalid = || LiteralError {
            offset: start,
            message: format!("invalid number '{}'", text),
        };
        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::from(n));
            }
        }
        let f: f64 = text.parse().map_err(|_| invalid())?;
        Number::from_f64(f).map(Value::Number).ok_or_else(invalid)
    }

    fn parse_string(&mut self, quote: char) -> LiteralResult<String> {
        let open = self.pos;
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            let c = match self.bump() {
                Some(c) => c,
                None => {
                    return Err(LiteralError {
                        offset: open,
                        message: "unterminated string".to_string(),
                    })
                }
            };
            match c {
                c if c == quote => return Ok(out),
                '\n' if quote != '`' => return Err(self.error("newline in string literal")),
                '$' if quote == '`' && self.peek() == Some('{') => {
                    return Err(self.error("template interpolation is not a literal"))
                }
                '\\' => self.parse_escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> LiteralResult<()> {
        let c = self
            .bump()
            .ok_or_else(|| self.error("unterminated escape sequence"))?;
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            'x' => {
                let code = self.read_hex(2)?;
                out.push(char::from_u32(code).ok_or_else(|| self.error("invalid \\x escape"))?);
            }
            'u' => {
                let code = self.read_unicode_escape()?;
                if (0xD800..0xDC00).contains(&code)
                    && self.peek() == Some('\\')
                    && self.peek_at(1) == Some('u')
                {
                    let save = self.pos;
                    self.pos += 2;
                    let low = self.read_unicode_escape()?;
                    if (0xDC00..0xE000).contains(&low) {
                        let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                        return Ok(());
                    }
                    self.pos = save;
                }
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn read_unicode_escape(&mut self) -> LiteralResult<u32> {
        if self.peek() == Some('{') {
            self.bump();
            let start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.bump();
            }
            let code = u32::from_str_radix(&self.src[start..self.pos], 16)
                .map_err(|_| self.error("invalid \\u{} escape"))?;
            self.expect('}')?;
            return Ok(code);
        }
        self.read_hex(4)
    }

    fn read_hex(&mut self, len: usize) -> LiteralResult<u32> {
        let start = self.pos;
        for _ in 0..len {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.bump();
                }
                _ => return Err(self.error("invalid hex escape")),
            }
        }
        u32::from_str_radix(&self.src[start..self.pos], 16)
            .map_err(|_| self.error("invalid hex escape"))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}
