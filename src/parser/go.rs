//! Go declaration scanner.
//!
//! Walks the token stream of a Go file, checks its structural validity
//! (package clause, balanced delimiters, declarations only at top level) and
//! collects every top-level declaration in source order together with its
//! lead comment group.

use super::ast::*;
use super::lexer::{self, Token, TokenKind};
use crate::error::{Error, Result};
use std::path::Path;

struct Scanner<'a> {
    path: &'a Path,
    tokens: Vec<Token>,
    pos: usize,
    /// Open delimiters with the line they were opened on
    stack: Vec<(char, usize)>,
    /// Group currently being accumulated
    group: Option<CommentGroup>,
    /// Group ending on the line above the token just returned by `next`
    lead: Option<CommentGroup>,
    /// End line of the last non-comment token
    last_line: Option<usize>,
}

/// Parse Go source text into its top-level declarations.
pub fn parse(path: &Path, src: &str) -> Result<SourceFile> {
    let tokens = lexer::tokenize(src).map_err(|e| Error::SourceParse {
        path: path.to_path_buf(),
        line: e.line,
        message: e.message,
    })?;
    let mut scanner = Scanner {
        path,
        tokens,
        pos: 0,
        stack: Vec::new(),
        group: None,
        lead: None,
        last_line: None,
    };
    scanner.file()
}

impl<'a> Scanner<'a> {
    fn error(&self, line: usize, message: impl Into<String>) -> Error {
        Error::SourceParse {
            path: self.path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    fn eof_line(&self) -> usize {
        self.tokens.last().map(|t| t.end_line).unwrap_or(1)
    }

    /// Next non-comment token. Comments passed over are grouped.
    fn next(&mut self) -> Option<Token> {
        while let Some(tok) = self.tokens.get(self.pos).cloned() {
            self.pos += 1;
            match tok.kind {
                TokenKind::Comment(raw) => self.add_comment(Comment {
                    raw,
                    line: tok.line,
                    end_line: tok.end_line,
                }),
                TokenKind::Semi => return Some(tok),
                _ => {
                    self.lead = self.group.take().filter(|g| g.end_line() + 1 == tok.line);
                    self.last_line = Some(tok.end_line);
                    return Some(tok);
                }
            }
        }
        None
    }

    fn add_comment(&mut self, comment: Comment) {
        // Trailing comment on the line of the previous token: never doc.
        if self.group.is_none() && self.last_line == Some(comment.line) {
            return;
        }
        match self.group.as_mut() {
            Some(g) if comment.line <= g.end_line() + 1 => g.comments.push(comment),
            _ => {
                self.group = Some(CommentGroup {
                    comments: vec![comment],
                })
            }
        }
    }

    fn take_doc(&mut self) -> Option<CommentGroup> {
        self.lead.take()
    }

    fn file(&mut self) -> Result<SourceFile> {
        let package = match self.next().map(|t| (t.kind, t.line)) {
            Some((TokenKind::Ident(kw), line)) if kw == "package" => match self.next() {
                Some(Token {
                    kind: TokenKind::Ident(name),
                    ..
                }) if !lexer::is_keyword(&name) => name,
                _ => return Err(self.error(line, "expected package name")),
            },
            Some((_, line)) => return Err(self.error(line, "expected 'package' clause")),
            None => return Err(self.error(1, "expected 'package' clause")),
        };
        self.lead = None;
        self.finish_decl()?;

        let mut decls = Vec::new();
        while let Some(tok) = self.next() {
            let line = tok.line;
            match tok.kind {
                TokenKind::Semi => continue,
                TokenKind::Ident(word) if word == "func" => {
                    let doc = self.take_doc();
                    decls.push(Decl::Func(self.func(doc, line)?));
                }
                TokenKind::Ident(word) => match GenKeyword::from_ident(&word) {
                    Some(keyword) => {
                        let doc = self.take_doc();
                        self.finish_decl()?;
                        decls.push(Decl::Gen(GenDecl { keyword, doc, line }));
                    }
                    None => {
                        return Err(
                            self.error(line, "non-declaration statement outside function body")
                        )
                    }
                },
                _ => return Err(self.error(line, "expected declaration")),
            }
        }
        Ok(SourceFile { package, decls })
    }

    fn func(&mut self, doc: Option<CommentGroup>, line: usize) -> Result<FuncDecl> {
        let mut tok = self.next();
        let mut receiver = None;
        if let Some(Token {
            kind: TokenKind::Open('('),
            line: open_line,
            ..
        }) = tok
        {
            self.stack.push(('(', open_line));
            receiver = Some(self.receiver()?);
            tok = self.next();
        }
        let name = match tok {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) if !lexer::is_keyword(&name) => name,
            Some(t) => return Err(self.error(t.line, "expected function name")),
            None => return Err(self.error(self.eof_line(), "expected function name")),
        };
        self.finish_decl()?;
        Ok(FuncDecl {
            name,
            receiver,
            doc,
            line,
        })
    }

    /// Consume a receiver list up to its closing parenthesis and return the
    /// text between the parentheses.
    fn receiver(&mut self) -> Result<String> {
        let base = self.stack.len() - 1;
        let mut parts: Vec<String> = Vec::new();
        while self.stack.len() > base {
            let tok = self.next().ok_or_else(|| self.unclosed())?;
            let text = match &tok.kind {
                TokenKind::Ident(s) => s.clone(),
                TokenKind::Op(op) => op.to_string(),
                TokenKind::Open(c) | TokenKind::Close(c) => c.to_string(),
                _ => String::new(),
            };
            self.track(&tok)?;
            if self.stack.len() > base {
                parts.push(text);
            }
        }
        let is_word = |s: &str| s.starts_with(|c: char| c.is_alphanumeric() || c == '_');
        let mut out = String::new();
        let mut prev = "";
        for part in parts.iter().map(String::as_str) {
            if (is_word(prev) && (is_word(part) || part == "*")) || prev == "," {
                out.push(' ');
            }
            out.push_str(part);
            prev = part;
        }
        Ok(out)
    }

    /// Skip to the semicolon ending the current top-level declaration.
    fn finish_decl(&mut self) -> Result<()> {
        loop {
            let Some(tok) = self.next() else {
                return match self.stack.last() {
                    Some(_) => Err(self.unclosed()),
                    None => Ok(()),
                };
            };
            if tok.kind == TokenKind::Semi && self.stack.is_empty() {
                // Comments between declarations belong to the next one.
                return Ok(());
            }
            self.track(&tok)?;
        }
    }

    fn track(&mut self, tok: &Token) -> Result<()> {
        match tok.kind {
            TokenKind::Open(c) => self.stack.push((c, tok.line)),
            TokenKind::Close(c) => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match self.stack.pop() {
                    Some((open, _)) if open == expected => {}
                    Some((open, open_line)) => {
                        return Err(self.error(
                            tok.line,
                            format!("unexpected '{c}', '{open}' opened on line {open_line} is still open"),
                        ))
                    }
                    None => return Err(self.error(tok.line, format!("unexpected '{c}'"))),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn unclosed(&self) -> Error {
        match self.stack.last() {
            Some((open, line)) => self.error(
                self.eof_line(),
                format!("unexpected end of file, '{open}' opened on line {line} is not closed"),
            ),
            None => self.error(self.eof_line(), "unexpected end of file"),
        }
    }
}
