//! Directive page template.
//!
//! A small subset of Go template syntax, enough for directive pages:
//!
//! - `{{ .Name }}` substitutes a directive field (HTML-escaped)
//! - `{{-` and `-}}` trim whitespace before or after the action
//! - `{{/* ... */}}` is a comment

use crate::error::{Error, Result};
use crate::model::Directive;
use crate::render::entities;
use regex::Regex;
use std::sync::LazyLock;

static RE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.([A-Za-z_][A-Za-z0-9_]*)$").unwrap());

/// Values a template can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Name,
    Description,
    Syntax,
    Default,
    Date,
    LastModification,
    Content,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Name" => Some(Placeholder::Name),
            "Description" => Some(Placeholder::Description),
            "Syntax" => Some(Placeholder::Syntax),
            "Default" => Some(Placeholder::Default),
            "Date" => Some(Placeholder::Date),
            "LastModification" => Some(Placeholder::LastModification),
            "Content" => Some(Placeholder::Content),
            _ => None,
        }
    }

    fn value(self, d: &Directive) -> &str {
        match self {
            Placeholder::Name => &d.name,
            Placeholder::Description => &d.description,
            Placeholder::Syntax => &d.syntax,
            Placeholder::Default => &d.default,
            Placeholder::Date => &d.date,
            Placeholder::LastModification => &d.last_modification,
            Placeholder::Content => &d.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field(Placeholder),
}

/// A parsed template, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(src: &str) -> Result<Self> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut rest = src;
        let mut offset = 0;
        let mut trim_next = false;

        while let Some(open) = rest.find("{{") {
            let line = line_at(src, offset + open);
            let mut text = &rest[..open];
            if trim_next {
                text = text.trim_start();
            }

            let after = &rest[open + 2..];
            let close = after.find("}}").ok_or_else(|| Error::Template {
                line,
                message: "unclosed action".to_string(),
            })?;
            let mut inner = &after[..close];

            if let Some(stripped) = inner.strip_prefix("- ") {
                text = text.trim_end();
                inner = stripped;
            }
            trim_next = false;
            if let Some(stripped) = inner.strip_suffix(" -") {
                trim_next = true;
                inner = stripped;
            }

            if !text.is_empty() {
                nodes.push(Node::Text(text.to_string()));
            }
            if let Some(field) = action(inner.trim(), line)? {
                nodes.push(Node::Field(field));
            }

            let consumed = open + 2 + close + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }

        let tail = if trim_next { rest.trim_start() } else { rest };
        if !tail.is_empty() {
            nodes.push(Node::Text(tail.to_string()));
        }
        Ok(Self { nodes })
    }

    /// Substitute directive fields. Values are HTML-escaped; template text
    /// is copied as written.
    pub fn execute(&self, d: &Directive) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Field(p) => out.push_str(&entities::escape(p.value(d))),
            }
        }
        out
    }

    /// Placeholders referenced by the template, in order.
    #[cfg(test)]
    fn placeholders(&self) -> Vec<Placeholder> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Field(p) => Some(*p),
                Node::Text(_) => None,
            })
            .collect()
    }
}

/// Interpret the inside of an action. Comments yield `None`.
fn action(inner: &str, line: usize) -> Result<Option<Placeholder>> {
    if inner.starts_with("/*") && inner.ends_with("*/") && inner.len() >= 4 {
        return Ok(None);
    }
    if inner.is_empty() {
        return Err(Error::Template {
            line,
            message: "missing value for command".to_string(),
        });
    }
    let Some(caps) = RE_FIELD.captures(inner) else {
        return Err(Error::Template {
            line,
            message: format!("unsupported action {{{{{inner}}}}}"),
        });
    };
    Placeholder::from_name(&caps[1])
        .map(Some)
        .ok_or_else(|| Error::Template {
            line,
            message: format!("can't evaluate field {}", &caps[1]),
        })
}

fn line_at(src: &str, byte: usize) -> usize {
    src[..byte].matches('\n').count() + 1
}
