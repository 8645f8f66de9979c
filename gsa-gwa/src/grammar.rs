//! The line grammar shared by every record type.
//!
//! ```text
//! [SET|]KEYWORD.VERSION[:{stream_id:application_id}]|index|field|field|...
//! ```
//!
//! [`TokenReader`] walks the positional payload of one line and turns each
//! token into a typed field, reporting the failing token's index on error.
//! [`TokenWriter`] is its inverse. Both are also handed to embedded
//! sub-records, which read and write their items inline in the parent line.

use crate::error::{DecodeError, EncodeError};
use crate::fields::{self, Colour, PercentOrAbsolute};
use crate::Keyword;
use gsa_types::SidTag;
use std::fmt::Display;
use std::str::FromStr;

pub const DELIMITER: char = '|';
pub const SET_TOKEN: &str = "SET";

/// The decoded first token of a line.
///
/// The SID tag is kept raw until [`Header::sid`] is called, so a line whose
/// keyword is unknown is classified before its tag can fail it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub keyword: String,
    pub version: u32,
    pub sid_token: Option<String>,
}

impl Header {
    /// Parses the SID tag, if any.
    pub fn sid(&self) -> Result<Option<SidTag>, DecodeError> {
        match &self.sid_token {
            Some(token) => SidTag::parse(token)
                .map_err(|e| DecodeError::new(self.keyword.as_str(), 0, token.as_str(), e.to_string())),
            None => Ok(None),
        }
    }
}

/// Parses `KEYWORD.VERSION[:SID]`; the SID is validated by [`Header::sid`].
pub fn parse_header(token: &str) -> Result<Header, DecodeError> {
    let token = token.trim();
    let (head, sid) = match token.split_once(':') {
        Some((head, sid)) => (head, Some(sid)),
        None => (token, None),
    };
    let split = head.rsplit_once('.');
    let reported = split.map_or(head, |(keyword, _)| keyword);

    let fail = |reason: String| DecodeError::new(reported, 0, token, reason);

    let (keyword, version) = split.ok_or_else(|| fail("header has no '.VERSION' suffix".to_string()))?;
    if keyword.is_empty() {
        return Err(fail("header has an empty keyword".to_string()));
    }
    let version = version
        .parse::<u32>()
        .map_err(|_| fail(format!("'{version}' is not a version number")))?;

    Ok(Header {
        keyword: keyword.to_string(),
        version,
        sid_token: sid.map(str::to_string),
    })
}

/// Formats a header token.
pub fn format_header(keyword: Keyword, version: u32, sid: Option<&SidTag>) -> String {
    match sid.filter(|s| !s.is_empty()) {
        Some(sid) => format!("{keyword}.{version}:{sid}"),
        None => format!("{keyword}.{version}"),
    }
}

/// Sequential typed access to the tokens of one line.
///
/// Positions past the end of the line read as empty tokens, so trailing
/// nullable fields may be omitted from the source.
pub struct TokenReader<'a> {
    keyword: Keyword,
    tokens: &'a [&'a str],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    /// `tokens[0]` must be the header token; reading starts at index 1.
    pub fn new(keyword: Keyword, tokens: &'a [&'a str]) -> Self {
        Self {
            keyword,
            tokens,
            pos: 1,
        }
    }

    pub fn keyword(&self) -> Keyword {
        self.keyword
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Switches the keyword reported in errors while an embedded record is read.
    pub fn enter(&mut self, keyword: Keyword) -> Keyword {
        std::mem::replace(&mut self.keyword, keyword)
    }

    pub fn leave(&mut self, previous: Keyword) {
        self.keyword = previous;
    }

    /// Tokens not yet read.
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn take(&mut self) -> (usize, &'a str) {
        let index = self.pos;
        let token = self.tokens.get(index).copied().unwrap_or("");
        self.pos += 1;
        (index, token)
    }

    fn error(&self, index: usize, token: &str, reason: impl Into<String>) -> DecodeError {
        DecodeError::new(self.keyword.as_str(), index, token, reason)
    }

    /// Reads one token through a custom parser.
    pub fn parse_with<T>(
        &mut self,
        field: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Result<T, DecodeError> {
        let (index, token) = self.take();
        parse(token).map_err(|reason| self.error(index, token, format!("{field}: {reason}")))
    }

    /// Free text; any token, including an empty one.
    pub fn text(&mut self) -> String {
        self.take().1.to_string()
    }

    pub fn number(&mut self, field: &str) -> Result<f64, DecodeError> {
        self.parse_with(field, fields::parse_number)
    }

    pub fn nullable_number(&mut self, field: &str) -> Result<Option<f64>, DecodeError> {
        self.parse_with(field, |t| {
            if fields::is_unset(t) {
                Ok(None)
            } else {
                fields::parse_number(t).map(Some)
            }
        })
    }

    pub fn unsigned(&mut self, field: &str) -> Result<u32, DecodeError> {
        self.parse_with(field, |t| {
            t.trim()
                .parse::<u32>()
                .map_err(|_| format!("'{t}' is not a non-negative integer"))
        })
    }

    pub fn integer(&mut self, field: &str) -> Result<i32, DecodeError> {
        self.parse_with(field, |t| {
            t.trim()
                .parse::<i32>()
                .map_err(|_| format!("'{t}' is not an integer"))
        })
    }

    /// A positive record index.
    pub fn index(&mut self, field: &str) -> Result<u32, DecodeError> {
        self.parse_with(field, |t| match t.trim().parse::<u32>() {
            Ok(0) => Err("record indices start at 1".to_string()),
            Ok(n) => Ok(n),
            Err(_) => Err(format!("'{t}' is not a record index")),
        })
    }

    /// A reference to another record's index; empty or `0` means none.
    pub fn index_ref(&mut self, field: &str) -> Result<Option<u32>, DecodeError> {
        self.parse_with(field, |t| {
            let t = t.trim();
            if t.is_empty() {
                return Ok(None);
            }
            t.parse::<u32>()
                .map(|n| (n > 0).then_some(n))
                .map_err(|_| format!("'{t}' is not a record index"))
        })
    }

    /// An enum-like tag matched case-insensitively against a closed set.
    pub fn tag<T: FromStr>(&mut self, field: &str) -> Result<T, DecodeError> {
        self.parse_with(field, |t| {
            t.trim()
                .parse::<T>()
                .map_err(|_| format!("unknown tag '{t}'"))
        })
    }

    pub fn percent_or_absolute(&mut self, field: &str) -> Result<PercentOrAbsolute, DecodeError> {
        self.parse_with(field, |t| t.parse())
    }

    pub fn nullable_percent_or_absolute(
        &mut self,
        field: &str,
    ) -> Result<Option<PercentOrAbsolute>, DecodeError> {
        self.parse_with(field, |t| {
            if fields::is_unset(t) {
                Ok(None)
            } else {
                t.parse().map(Some)
            }
        })
    }

    pub fn colour(&mut self) -> Result<Colour, DecodeError> {
        self.parse_with("colour", |t| t.parse())
    }

    pub fn vector3(&mut self, field: &str) -> Result<[f64; 3], DecodeError> {
        Ok([self.number(field)?, self.number(field)?, self.number(field)?])
    }

    /// Consumes the `KEYWORD.VERSION` token that introduces an embedded record.
    pub fn embedded_header(&mut self, keyword: Keyword, version: u32) -> Result<(), DecodeError> {
        let expected = format_header(keyword, version, None);
        let (index, token) = self.take();
        if token.trim() == expected {
            Ok(())
        } else {
            Err(self.error(index, token, format!("expected embedded '{expected}'")))
        }
    }

    /// True if the next token introduces the given embedded keyword.
    pub fn at_embedded(&self, keyword: Keyword) -> bool {
        self.peek()
            .and_then(|t| t.trim().split_once('.'))
            .is_some_and(|(kw, _)| kw == keyword.as_str())
    }

    /// Fails if any tokens remain unread.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.tokens.get(self.pos) {
            Some(token) => Err(self.error(self.pos, token, "unexpected trailing token")),
            None => Ok(()),
        }
    }
}

/// Accumulates the tokens of one line.
pub struct TokenWriter {
    keyword: Keyword,
    tokens: Vec<String>,
}

impl TokenWriter {
    pub fn new(keyword: Keyword) -> Self {
        Self {
            keyword,
            tokens: Vec::new(),
        }
    }

    pub fn enter(&mut self, keyword: Keyword) -> Keyword {
        std::mem::replace(&mut self.keyword, keyword)
    }

    pub fn leave(&mut self, previous: Keyword) {
        self.keyword = previous;
    }

    fn error(&self, field: &str, reason: impl Into<String>) -> EncodeError {
        EncodeError::new(self.keyword.as_str(), field, reason)
    }

    fn push(&mut self, token: String) {
        self.tokens.push(token);
    }

    /// Writes a token verbatim after checking it cannot break the line.
    pub fn text(&mut self, field: &str, value: &str) -> Result<(), EncodeError> {
        if value.contains([DELIMITER, '\r', '\n']) {
            return Err(self.error(field, "contains a delimiter or line break"));
        }
        self.push(value.to_string());
        Ok(())
    }

    pub fn number(&mut self, field: &str, value: f64) -> Result<(), EncodeError> {
        if !value.is_finite() {
            return Err(self.error(field, "required number is not set"));
        }
        self.push(value.to_string());
        Ok(())
    }

    pub fn nullable_number(&mut self, field: &str, value: Option<f64>) -> Result<(), EncodeError> {
        match value {
            Some(v) => self.number(field, v),
            None => {
                self.push(String::new());
                Ok(())
            }
        }
    }

    pub fn unsigned(&mut self, value: u32) {
        self.push(value.to_string());
    }

    pub fn integer(&mut self, value: i32) {
        self.push(value.to_string());
    }

    /// A positive record index; `0` is the unset default and is rejected.
    pub fn index(&mut self, field: &str, value: u32) -> Result<(), EncodeError> {
        if value == 0 {
            return Err(self.error(field, "required record index is not set"));
        }
        self.unsigned(value);
        Ok(())
    }

    pub fn index_ref(&mut self, value: Option<u32>) {
        self.unsigned(value.unwrap_or(0));
    }

    pub fn tag<T: Display>(&mut self, value: &T) {
        self.push(value.to_string());
    }

    pub fn percent_or_absolute(
        &mut self,
        field: &str,
        value: PercentOrAbsolute,
    ) -> Result<(), EncodeError> {
        if !value.value().is_finite() {
            return Err(self.error(field, "required modifier is not set"));
        }
        self.push(value.to_string());
        Ok(())
    }

    pub fn nullable_percent_or_absolute(
        &mut self,
        field: &str,
        value: Option<PercentOrAbsolute>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(v) => self.percent_or_absolute(field, v),
            None => {
                self.push(String::new());
                Ok(())
            }
        }
    }

    pub fn colour(&mut self, value: &Colour) -> Result<(), EncodeError> {
        self.text("colour", &value.to_string())
    }

    pub fn vector3(&mut self, field: &str, value: [f64; 3]) -> Result<(), EncodeError> {
        for v in value {
            self.number(field, v)?;
        }
        Ok(())
    }

    /// Writes the `KEYWORD.VERSION` token that introduces an embedded record.
    pub fn embedded_header(&mut self, keyword: Keyword, version: u32) {
        self.push(format_header(keyword, version, None));
    }

    pub(crate) fn header(&mut self, include_set: bool, header: String) {
        if include_set {
            self.push(SET_TOKEN.to_string());
        }
        self.push(header);
    }

    /// Joins the tokens, dropping trailing empty tokens.
    pub fn finish(mut self) -> String {
        while self.tokens.last().is_some_and(String::is_empty) {
            self.tokens.pop();
        }
        self.tokens.join(&DELIMITER.to_string())
    }
}
