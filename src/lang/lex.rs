use super::token::*;

/// Tokenizes one line body (line number already removed).
///
/// String and remark state starts fresh for every line.
pub fn lex(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for lexeme in BasicLexer::new(s) {
        match lexeme {
            Lexeme::Char(ch) => out.push(ch),
            Lexeme::Token(token) => token.write_to(&mut out),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    Char(u8),
    Token(Token),
}

fn is_basic_whitespace(c: u8) -> bool {
    c.is_ascii_whitespace()
}

pub struct BasicLexer<'a> {
    src: &'a [u8],
    pos: usize,
    string: bool,
    remark: bool,
}

impl<'a> BasicLexer<'a> {
    pub fn new(s: &'a [u8]) -> BasicLexer<'a> {
        BasicLexer {
            src: s,
            pos: 0,
            string: false,
            remark: false,
        }
    }

    fn matches(&self, keyword: &str) -> bool {
        match self.src.get(self.pos..self.pos + keyword.len()) {
            Some(s) => s.eq_ignore_ascii_case(keyword.as_bytes()),
            None => false,
        }
    }

    fn function(&mut self) -> Option<Lexeme> {
        let (keyword, byte) = TokenTable::functions()
            .keywords()
            .find(|(k, _)| self.matches(k))?;
        self.pos += keyword.len();
        Some(Lexeme::Token(Token::Function(*byte)))
    }

    fn command(&mut self) -> Option<Lexeme> {
        let (keyword, byte) = TokenTable::commands().keywords().find(|(k, _)| {
            self.matches(k) && (is_operator(k) || self.at_word_boundary(self.pos + k.len()))
        })?;
        self.pos += keyword.len();
        let token = Token::Command(*byte);
        if token.starts_remark() {
            self.remark = true;
        }
        Some(Lexeme::Token(token))
    }

    /// A keyword running straight into `UPPER UPPER` is taken for the
    /// start of a longer name; lower case or a lone capital ends the word.
    fn at_word_boundary(&self, end: usize) -> bool {
        let next = match self.src.get(end) {
            Some(&c) => c,
            None => return true,
        };
        if !next.is_ascii_alphabetic() || next.is_ascii_lowercase() {
            return true;
        }
        match self.src.get(end + 1) {
            Some(&c) => !c.is_ascii_alphabetic() || c.is_ascii_lowercase(),
            None => true,
        }
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Self::Item> {
        let ch = *self.src.get(self.pos)?;
        if ch == b'"' {
            self.string = !self.string;
        } else if !self.string && !self.remark && !is_basic_whitespace(ch) {
            if let Some(lexeme) = self.function() {
                return Some(lexeme);
            }
            if let Some(lexeme) = self.command() {
                return Some(lexeme);
            }
        }
        self.pos += 1;
        Some(Lexeme::Char(ch))
    }
}
