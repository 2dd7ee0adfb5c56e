//! Data model for a documented directive, format-agnostic.

/// Documentation for a single configuration directive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Declaration name minus the directive prefix
    pub name: String,
    pub description: String,
    pub syntax: String,
    pub default: String,
    /// Exposed to templates; the generator never fills it
    pub date: String,
    /// RFC 3339 timestamp taken when the record is built
    pub last_modification: String,
    /// Trailing free-form body, one `\n` per source line
    pub content: String,
}

impl Directive {
    pub fn new(name: impl Into<String>, last_modification: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_modification: last_modification.into(),
            ..Default::default()
        }
    }

    /// Append `value` verbatim to the given field.
    pub fn append(&mut self, field: Field, value: &str) {
        let target = match field {
            Field::Description => &mut self.description,
            Field::Syntax => &mut self.syntax,
            Field::Default => &mut self.default,
        };
        target.push_str(value);
    }
}

/// Structured keys recognized in a directive doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Syntax,
    Default,
}

impl Field {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Description" => Some(Field::Description),
            "Syntax" => Some(Field::Syntax),
            "Default" => Some(Field::Default),
            _ => None,
        }
    }
}
