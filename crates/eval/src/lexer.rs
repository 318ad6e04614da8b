// SPDX-License-Identifier: MIT

//! Hand-rolled tokenizer for the expression grammar. No external
//! parser-generator crate — the grammar is small and fixed, and a
//! dependency would buy nothing a 200-line lexer doesn't already give us.

use crate::error::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Null,
    And,
    Or,
    Not,
    If,
    Else,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Dot,
    Comma,
    Colon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Assign,
    Eof,
}

pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer {
            chars: src.char_indices().peekable(),
            src,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, EvalError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok == Token::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, EvalError> {
        self.skip_whitespace();
        let (start, c) = match self.chars.peek().copied() {
            Some(pair) => pair,
            None => return Ok(Token::Eof),
        };

        if c.is_ascii_digit() {
            return self.read_number();
        }
        if c == '"' || c == '\'' {
            return self.read_string(c);
        }
        if c.is_alphabetic() || c == '_' {
            return self.read_ident_or_keyword();
        }

        self.chars.next();
        match c {
            '=' if self.eat('=') => Ok(Token::Eq),
            '!' if self.eat('=') => Ok(Token::NotEq),
            '<' if self.eat('=') => Ok(Token::LtEq),
            '<' => Ok(Token::Lt),
            '>' if self.eat('=') => Ok(Token::GtEq),
            '>' => Ok(Token::Gt),
            '+' => Ok(Token::Plus),
            '-' => Ok(Token::Minus),
            '*' => Ok(Token::Star),
            '.' => Ok(Token::Dot),
            ',' => Ok(Token::Comma),
            ':' => Ok(Token::Colon),
            '(' => Ok(Token::LParen),
            ')' => Ok(Token::RParen),
            '[' => Ok(Token::LBracket),
            ']' => Ok(Token::RBracket),
            '=' => Ok(Token::Assign),
            other => Err(EvalError::Parse(format!(
                "unexpected character '{other}' at byte {start}"
            ))),
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek().map(|(_, c)| *c) == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, EvalError> {
        let start = self.chars.peek().map(|(i, _)| *i).unwrap_or(0);
        let mut end = start;
        let mut is_float = false;
        while let Some((i, c)) = self.chars.peek().copied() {
            if c.is_ascii_digit() {
                end = i + c.len_utf8();
                self.chars.next();
            } else if c == '.' && !is_float {
                is_float = true;
                end = i + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        let text = &self.src[start..end];
        if is_float {
            text.parse::<f64>()
                .map(Token::Float)
                .map_err(|_| EvalError::Parse(format!("invalid float literal: {text}")))
        } else {
            text.parse::<i64>()
                .map(Token::Int)
                .map_err(|_| EvalError::Parse(format!("invalid int literal: {text}")))
        }
    }

    fn read_string(&mut self, quote: char) -> Result<Token, EvalError> {
        self.chars.next(); // opening quote
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, c)) => out.push(c),
                    None => return Err(EvalError::Parse("unterminated string escape".into())),
                },
                Some((_, c)) if c == quote => return Ok(Token::Str(out)),
                Some((_, c)) => out.push(c),
                None => return Err(EvalError::Parse("unterminated string literal".into())),
            }
        }
    }

    fn read_ident_or_keyword(&mut self) -> Result<Token, EvalError> {
        let start = self.chars.peek().map(|(i, _)| *i).unwrap_or(0);
        let mut end = start;
        while let Some((i, c)) = self.chars.peek().copied() {
            if c.is_alphanumeric() || c == '_' {
                end = i + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        let text = &self.src[start..end];
        Ok(match text {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "if" => Token::If,
            "else" => Token::Else,
            "true" | "True" => Token::True,
            "false" | "False" => Token::False,
            "null" | "None" => Token::Null,
            other => Token::Ident(other.to_string()),
        })
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
