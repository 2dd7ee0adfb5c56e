//! Top-level syntax tree of a Go source file.
//!
//! Only what the generator needs is modelled: the package name and each
//! top-level declaration with its lead comment group. Signatures and
//! declaration bodies are validated by the parser but not kept.

use regex::Regex;
use std::sync::LazyLock;

/// Tool directives (`//go:embed`, `//line x.go:1`, cgo's `//export f`) are
/// not documentation and are dropped from comment text.
static RE_TOOL_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:line |extern |export |[a-z0-9]+:[a-z0-9])").unwrap());

#[derive(Debug, Default)]
pub struct SourceFile {
    pub package: String,
    pub decls: Vec<Decl>,
}

/// A top-level declaration.
#[derive(Debug)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

impl Decl {
    pub fn doc(&self) -> Option<&CommentGroup> {
        match self {
            Decl::Func(f) => f.doc.as_ref(),
            Decl::Gen(g) => g.doc.as_ref(),
        }
    }
}

/// `func name(...)` or `func (recv T) name(...)`.
#[derive(Debug)]
pub struct FuncDecl {
    pub name: String,
    /// Receiver type as written, e.g. `*Parser`
    pub receiver: Option<String>,
    pub doc: Option<CommentGroup>,
    pub line: usize,
}

/// `import`, `const`, `var` or `type` declaration.
#[derive(Debug)]
#[allow(dead_code)]
pub struct GenDecl {
    pub keyword: GenKeyword,
    pub doc: Option<CommentGroup>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKeyword {
    Import,
    Const,
    Var,
    Type,
}

impl GenKeyword {
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "import" => Some(GenKeyword::Import),
            "const" => Some(GenKeyword::Const),
            "var" => Some(GenKeyword::Var),
            "type" => Some(GenKeyword::Type),
            _ => None,
        }
    }
}

/// A single `//` or `/* */` comment, markers included.
#[derive(Debug, Clone)]
pub struct Comment {
    pub raw: String,
    pub line: usize,
    pub end_line: usize,
}

/// Comments on adjacent lines with no token in between.
#[derive(Debug, Clone, Default)]
pub struct CommentGroup {
    pub comments: Vec<Comment>,
}

impl CommentGroup {
    pub fn end_line(&self) -> usize {
        self.comments.last().map(|c| c.end_line).unwrap_or(0)
    }

    /// Documentation text of the group.
    ///
    /// Comment markers are removed (plus one space after `//`), tool
    /// directives are dropped, trailing whitespace is stripped, leading
    /// blank lines are removed and runs of blank lines collapse to one.
    /// A non-empty result always ends with exactly one newline.
    pub fn text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for comment in &self.comments {
            let body = if let Some(rest) = comment.raw.strip_prefix("//") {
                if let Some(rest) = rest.strip_prefix(' ') {
                    rest
                } else if RE_TOOL_DIRECTIVE.is_match(rest) {
                    continue;
                } else {
                    rest
                }
            } else {
                comment
                    .raw
                    .strip_prefix("/*")
                    .and_then(|r| r.strip_suffix("*/"))
                    .unwrap_or(&comment.raw)
            };
            lines.extend(
                body.split('\n')
                    .map(|l| l.trim_end_matches([' ', '\t', '\n', '\r']).to_string()),
            );
        }

        let mut kept: Vec<String> = Vec::with_capacity(lines.len());
        for line in lines {
            let prev_blank = kept.last().map(|l| l.is_empty()).unwrap_or(true);
            if !line.is_empty() || !prev_blank {
                kept.push(line);
            }
        }
        if kept.last().is_some_and(|l| !l.is_empty()) {
            kept.push(String::new());
        }
        kept.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(raws: &[&str]) -> CommentGroup {
        CommentGroup {
            comments: raws
                .iter()
                .enumerate()
                .map(|(i, r)| Comment {
                    raw: r.to_string(),
                    line: i + 1,
                    end_line: i + 1 + r.matches('\n').count(),
                })
                .collect(),
        }
    }

    #[test]
    fn text_strips_markers_and_one_space() {
        let g = group(&["// Description: x", "//  indented", "//tight"]);
        assert_eq!(g.text(), "Description: x\n indented\ntight\n");
    }

    #[test]
    fn text_keeps_trailing_non_ascii_space() {
        let g = group(&["// value\u{A0} \t", "// next"]);
        assert_eq!(g.text(), "value\u{A0}\nnext\n");
    }

    #[test]
    fn text_drops_tool_directives() {
        let g = group(&["// Doc line.", "//go:noinline", "//export foo"]);
        assert_eq!(g.text(), "Doc line.\n");
    }

    #[test]
    fn text_collapses_blank_runs() {
        let g = group(&["//", "// a", "//", "//", "// b", "//"]);
        assert_eq!(g.text(), "a\n\nb\n");
    }

    #[test]
    fn text_of_block_comment() {
        let g = group(&["/*\nDescription: x   \n\nbody\n*/"]);
        assert_eq!(g.text(), "Description: x\n\nbody\n");
    }

    #[test]
    fn empty_group_has_empty_text() {
        assert_eq!(group(&["//"]).text(), "");
        assert_eq!(CommentGroup::default().text(), "");
    }
}
