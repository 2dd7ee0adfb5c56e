//! Directive doc comment parser: line-by-line state machine.
//!
//! ```text
//! directiveSecRuleEngine          ignored echo of the declaration
//! Description: Configures the     starts the Description field
//!  rules engine.                  continuation, joined with one space
//! Syntax: SecRuleEngine On|Off
//! Default: Off
//! ---                             everything below is the body
//! Note: applies to all phases.
//! ```

use crate::error::{Error, Result};
use crate::model::{Directive, Field};
use crate::parser::ast::{Decl, FuncDecl, SourceFile};

/// A function declaration selected for documentation.
#[derive(Debug)]
pub struct Candidate<'a> {
    /// Declaration name with the prefix removed
    pub name: &'a str,
    pub decl: &'a FuncDecl,
    /// Doc comment text
    pub doc: String,
}

/// Select documented functions whose name starts with `prefix`.
///
/// Methods count as functions. Declarations named exactly `prefix` have no
/// directive name and are skipped like any other non-match.
pub fn select<'a>(file: &'a SourceFile, prefix: &str) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();
    for decl in &file.decls {
        let func = match decl {
            Decl::Func(f) => f,
            Decl::Gen(_) => continue,
        };
        let Some(name) = func.name.strip_prefix(prefix).filter(|n| !n.is_empty()) else {
            continue;
        };
        let Some(doc) = func.doc.as_ref() else {
            tracing::debug!(function = %func.name, line = func.line, "skipping undocumented directive");
            continue;
        };
        tracing::debug!(function = %func.name, receiver = ?func.receiver, "selected directive");
        out.push(Candidate {
            name,
            decl: func,
            doc: doc.text(),
        });
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fields,
    Body,
}

/// Parse a directive doc comment into a [`Directive`].
///
/// Lines starting with `prefix` and blank lines are ignored until the `---`
/// marker. `Key: value` lines start a field, other lines continue the current
/// one. A key outside the known fields is an error unless a field is already
/// open, in which case its value is appended to that field as is.
pub fn parse(name: &str, doc: &str, prefix: &str, last_modification: &str) -> Result<Directive> {
    let mut directive = Directive::new(name, last_modification);
    let mut state = State::Fields;
    let mut current: Option<Field> = None;

    for line in doc.lines() {
        if state == State::Body {
            directive.content.push_str(&decorate_note(line));
            directive.content.push('\n');
            continue;
        }

        if line.starts_with(prefix) || line.trim().is_empty() {
            continue;
        }
        if line.starts_with("---") {
            state = State::Body;
            continue;
        }

        let split = line.split_once(": ");
        let known = split.and_then(|(key, value)| Field::from_key(key).map(|f| (f, value)));
        match (known, split, current) {
            (Some((field, value)), _, _) => {
                directive.append(field, value);
                current = Some(field);
            }
            // An unrecognized key only contributes its value to the open field.
            (None, Some((_, value)), Some(field)) => directive.append(field, value),
            (None, None, Some(field)) => {
                directive.append(field, " ");
                directive.append(field, line);
            }
            (None, _, None) => {
                let key = split.map_or(line, |(k, _)| k);
                return Err(Error::UnknownField {
                    directive: name.to_string(),
                    key: key.to_string(),
                });
            }
        }
    }

    Ok(directive)
}

/// Bold every `Note:` marker on a body line.
pub fn decorate_note(line: &str) -> String {
    line.replace("Note:", "**Note:**")
}
