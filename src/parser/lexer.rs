//! Go tokenizer.
//!
//! Produces just enough structure for the declaration scanner: identifiers,
//! delimiters, operators, opaque literals and comments, with automatic
//! semicolon insertion at line ends as the Go grammar defines it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    /// Number, string, raw string or rune; the text is not needed.
    Literal,
    Op(&'static str),
    Open(char),
    Close(char),
    /// `;`, written or inserted at a line end
    Semi,
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub end_line: usize,
}

/// Lexical error with the line it was detected on.
#[derive(Debug, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

const OPS_3: &[&str] = &["<<=", ">>=", "&^=", "..."];

const OPS_2: &[&str] = &[
    "<<", ">>", "&^", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "&&", "||", "<-", "++",
    "--", "==", "!=", "<=", ">=", ":=",
];

const OPS_1: &[&str] = &[
    "+", "-", "*", "/", "%", "&", "|", "^", "<", ">", "=", "!", ".", ",", ":", "~",
];

pub fn is_keyword(ident: &str) -> bool {
    KEYWORDS.contains(&ident)
}

const BOM: char = '\u{FEFF}';

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
    /// Whether a newline here terminates a statement
    insert_semi: bool,
}

/// Tokenize Go source text.
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    let mut lx = Lexer {
        chars: src.chars().collect(),
        pos: 0,
        line: 1,
        tokens: Vec::new(),
        insert_semi: false,
    };
    lx.run()?;
    Ok(lx.tokens)
}

impl Lexer {
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, line: usize) {
        self.tokens.push(Token {
            kind,
            line,
            end_line: self.line,
        });
    }

    fn error(&self, line: usize, message: impl Into<String>) -> LexError {
        LexError {
            line,
            message: message.into(),
        }
    }

    fn run(&mut self) -> Result<(), LexError> {
        // Byte order mark is only allowed as the very first character
        if self.peek(0) == Some(BOM) {
            self.pos += 1;
        }
        while let Some(c) = self.peek(0) {
            let start = self.line;
            match c {
                '\n' => {
                    if self.insert_semi {
                        self.push(TokenKind::Semi, start);
                        self.insert_semi = false;
                    }
                    self.pos += 1;
                    self.line += 1;
                }
                ' ' | '\t' | '\r' => self.pos += 1,
                '/' if self.peek(1) == Some('/') => self.line_comment(),
                '/' if self.peek(1) == Some('*') => self.block_comment()?,
                '"' => {
                    self.quoted('"', "string literal not terminated")?;
                    self.push(TokenKind::Literal, start);
                    self.insert_semi = true;
                }
                '\'' => {
                    if self.peek(1) == Some('\'') {
                        return Err(self.error(start, "empty rune literal or unescaped ' in rune literal"));
                    }
                    self.quoted('\'', "rune literal not terminated")?;
                    self.push(TokenKind::Literal, start);
                    self.insert_semi = true;
                }
                '`' => {
                    self.raw_string()?;
                    self.push(TokenKind::Literal, start);
                    self.insert_semi = true;
                }
                '0'..='9' => self.number(),
                '.' if self.peek(1).is_some_and(|n| n.is_ascii_digit()) => self.number(),
                c if c == '_' || c.is_alphabetic() => self.ident(),
                '(' | '[' | '{' => {
                    self.pos += 1;
                    self.push(TokenKind::Open(c), start);
                    self.insert_semi = false;
                }
                ')' | ']' | '}' => {
                    self.pos += 1;
                    self.push(TokenKind::Close(c), start);
                    self.insert_semi = true;
                }
                ';' => {
                    self.pos += 1;
                    self.push(TokenKind::Semi, start);
                    self.insert_semi = false;
                }
                _ => self.operator()?,
            }
        }
        if self.insert_semi {
            self.push(TokenKind::Semi, self.line);
        }
        Ok(())
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        while self.peek(0).is_some_and(|c| c != '\n') {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().filter(|&&c| c != '\r').collect();
        let line = self.line;
        self.push(TokenKind::Comment(text), line);
    }

    fn block_comment(&mut self) -> Result<(), LexError> {
        let start_line = self.line;
        let start = self.pos;
        self.pos += 2;
        loop {
            match self.peek(0) {
                None => return Err(self.error(start_line, "comment not terminated")),
                Some('*') if self.peek(1) == Some('/') => {
                    self.pos += 2;
                    break;
                }
                Some('\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        // A comment spanning lines ends the statement like a newline would.
        if self.line > start_line && self.insert_semi {
            self.tokens.push(Token {
                kind: TokenKind::Semi,
                line: start_line,
                end_line: start_line,
            });
            self.insert_semi = false;
        }
        let text: String = self.chars[start..self.pos].iter().filter(|&&c| c != '\r').collect();
        self.push(TokenKind::Comment(text), start_line);
        Ok(())
    }

    fn quoted(&mut self, quote: char, unterminated: &str) -> Result<(), LexError> {
        let start_line = self.line;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None | Some('\n') => return Err(self.error(start_line, unterminated)),
                Some('\\') => {
                    if self.peek(1) == Some('\n') {
                        return Err(self.error(start_line, unterminated));
                    }
                    self.pos += 2;
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn raw_string(&mut self) -> Result<(), LexError> {
        let start_line = self.line;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None => return Err(self.error(start_line, "raw string literal not terminated")),
                Some('`') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some('\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn number(&mut self) {
        let line = self.line;
        while let Some(c) = self.peek(0) {
            let exponent_sign = (c == '+' || c == '-')
                && self.pos > 0
                && matches!(self.chars[self.pos - 1], 'e' | 'E' | 'p' | 'P');
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.push(TokenKind::Literal, line);
        self.insert_semi = true;
    }

    fn ident(&mut self) {
        let line = self.line;
        let start = self.pos;
        while self.peek(0).is_some_and(|c| c == '_' || c.is_alphanumeric()) {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        self.insert_semi = !is_keyword(&word)
            || matches!(word.as_str(), "break" | "continue" | "fallthrough" | "return");
        self.push(TokenKind::Ident(word), line);
    }

    fn operator(&mut self) -> Result<(), LexError> {
        let line = self.line;
        for table in [OPS_3, OPS_2, OPS_1] {
            for &op in table {
                let len = op.chars().count();
                let matches = op
                    .chars()
                    .enumerate()
                    .all(|(i, c)| self.peek(i) == Some(c));
                if matches {
                    self.pos += len;
                    self.insert_semi = op == "++" || op == "--";
                    self.push(TokenKind::Op(op), line);
                    return Ok(());
                }
            }
        }
        let c = self.peek(0).unwrap_or('\0');
        Err(self.error(line, format!("invalid character {c:?}")))
    }
}
