//! Quote-aware splitter for command lines and VALUES lists
//!
//! Quoted substrings are kept whole, quotes included, so a later
//! `parse_value` still sees them and treats the content as a string.

use std::{iter::Peekable, str::Chars};

use crate::error::{Error, Result};

/// Splits text into tokens on a separator character, ignoring separators inside quotes
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    separator: fn(char) -> bool,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan().transpose()
    }
}

impl<'a> Lexer<'a> {
    /// Whitespace-separated words of a command line
    pub fn words(text: &'a str) -> Self {
        Self {
            iter: text.chars().peekable(),
            separator: char::is_whitespace,
        }
    }

    /// Comma-separated items of a VALUES list interior; empty items are skipped
    pub fn values(text: &'a str) -> Self {
        Self {
            iter: text.chars().peekable(),
            separator: |c| c == ',',
        }
    }

    /// Consumes the next character if it satisfies the predicate
    fn next_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<char> {
        self.iter.peek().filter(|&c| predicate(*c))?;
        self.iter.next()
    }

    /// Consumes consecutive characters while they satisfy the predicate
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    fn erase_separators(&mut self) {
        let separator = self.separator;
        self.next_while(|c| c.is_whitespace() || separator(c));
    }

    /// Scans the next token, or None at end of input
    fn scan(&mut self) -> Result<Option<String>> {
        self.erase_separators();
        if self.iter.peek().is_none() {
            return Ok(None);
        }

        let separator = self.separator;
        let mut token = String::new();
        while let Some(c) = self.next_if(|c| !separator(c)) {
            token.push(c);
            if c == '\'' || c == '"' {
                self.scan_quoted(c, &mut token)?;
            }
        }
        Ok(Some(token.trim_end().to_string()))
    }

    /// Copies everything up to and including the closing `quote`
    fn scan_quoted(&mut self, quote: char, token: &mut String) -> Result<()> {
        loop {
            match self.iter.next() {
                Some(c) if c == quote => {
                    token.push(c);
                    return Ok(());
                }
                Some(c) => token.push(c),
                None => {
                    return Err(Error::MalformedClause(format!(
                        "unterminated quote in {}",
                        token
                    )))
                }
            }
        }
    }
}
