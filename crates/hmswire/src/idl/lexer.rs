// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tokenizer for interface-definition documents.

use super::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Identifier or keyword; dotted names (`fb303.Service`) stay whole.
    Ident(String),
    Int(i64),
    Double(f64),
    Str(String),
    Punct(char),
    Eof,
}

/// Token with the position of its first character (1-based).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Skip whitespace and `//`, `#`, `/* */` comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match (self.peek_char(), self.peek_second()) {
                (Some(ch), _) if ch.is_whitespace() => {
                    self.next_char();
                }
                (Some('#'), _) | (Some('/'), Some('/')) => {
                    while let Some(ch) = self.next_char() {
                        if ch == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.next_char();
                    self.next_char();
                    loop {
                        match self.next_char() {
                            Some('*') if self.peek_char() == Some('/') => {
                                self.next_char();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(self.error(line, column, "unterminated comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                self.next_char();
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn read_number(&mut self, line: usize, column: usize) -> Result<Token, ParseError> {
        let start = self.pos;
        if matches!(self.peek_char(), Some('-' | '+')) {
            self.next_char();
        }

        if self.peek_char() == Some('0') && matches!(self.peek_second(), Some('x' | 'X')) {
            self.next_char();
            self.next_char();
            let digits_start = self.pos;
            while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.next_char();
            }
            let negative = self.input[start..].starts_with('-');
            let magnitude = i64::from_str_radix(&self.input[digits_start..self.pos], 16)
                .map_err(|_| self.error(line, column, "invalid hex literal"))?;
            return Ok(Token::Int(if negative { -magnitude } else { magnitude }));
        }

        let mut is_double = false;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.next_char();
            } else if (ch == '.' || ch == 'e' || ch == 'E') && !is_double {
                is_double = true;
                self.next_char();
                if matches!(self.peek_char(), Some('-' | '+')) {
                    self.next_char();
                }
            } else if (ch == 'e' || ch == 'E') && is_double {
                self.next_char();
                if matches!(self.peek_char(), Some('-' | '+')) {
                    self.next_char();
                }
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        if is_double {
            text.parse()
                .map(Token::Double)
                .map_err(|_| self.error(line, column, format!("invalid number `{text}`")))
        } else {
            text.parse()
                .map(Token::Int)
                .map_err(|_| self.error(line, column, format!("invalid integer `{text}`")))
        }
    }

    fn read_string(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
        let quote = self.next_char();
        let mut out = String::new();
        loop {
            match self.next_char() {
                Some('\\') => match self.next_char() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(other) => out.push(other),
                    None => break,
                },
                Some(ch) if Some(ch) == quote => return Ok(out),
                Some(ch) => out.push(ch),
                None => break,
            }
        }
        Err(self.error(line, column, "unterminated string"))
    }

    pub fn next_token(&mut self) -> Result<Spanned, ParseError> {
        self.skip_trivia()?;
        let (line, column) = (self.line, self.column);
        let spanned = |token| Spanned {
            token,
            line,
            column,
        };

        let ch = match self.peek_char() {
            Some(c) => c,
            None => return Ok(spanned(Token::Eof)),
        };

        if matches!(ch, '{' | '}' | '(' | ')' | '<' | '>' | '[' | ']' | ',' | ';' | ':' | '=' | '*') {
            self.next_char();
            return Ok(spanned(Token::Punct(ch)));
        }

        if ch == '"' || ch == '\'' {
            let s = self.read_string(line, column)?;
            return Ok(spanned(Token::Str(s)));
        }

        if ch.is_ascii_digit()
            || (matches!(ch, '-' | '+') && self.peek_second().is_some_and(|c| c.is_ascii_digit()))
        {
            let token = self.read_number(line, column)?;
            return Ok(spanned(token));
        }

        if ch.is_alphabetic() || ch == '_' {
            return Ok(spanned(Token::Ident(self.read_identifier())));
        }

        Err(self.error(line, column, format!("unexpected character '{ch}'")))
    }
}
