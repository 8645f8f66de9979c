//! The SID tag appended to a GWA header token.
//!
//! A header such as `PROP_MASS.3:{s-01:mass/a}` carries the stream the
//! record was sent on and the application id correlating it with the
//! generic side. The tag content is split on the first `:` so application
//! ids may contain colons of their own.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const OPEN: char = '{';
const CLOSE: char = '}';
const SEPARATOR: char = ':';

/// Stream and application identifiers carried by one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SidTag {
    stream_id: Option<String>,
    application_id: Option<String>,
}

impl SidTag {
    /// Creates a tag; empty strings are stored as absent.
    pub fn new(stream_id: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            stream_id: non_empty(stream_id.into()),
            application_id: non_empty(application_id.into()),
        }
    }

    /// Creates a tag that only carries an application id.
    pub fn with_application_id(application_id: impl Into<String>) -> Self {
        Self::new(String::new(), application_id)
    }

    pub fn stream_id(&self) -> Option<&str> {
        self.stream_id.as_deref()
    }

    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    pub fn set_stream_id(&mut self, stream_id: Option<String>) {
        self.stream_id = stream_id.and_then(non_empty);
    }

    pub fn set_application_id(&mut self, application_id: Option<String>) {
        self.application_id = application_id.and_then(non_empty);
    }

    /// True when neither half is present.
    pub fn is_empty(&self) -> bool {
        self.stream_id.is_none() && self.application_id.is_none()
    }

    /// Parses a braced tag (`{stream:app}`).
    ///
    /// A tag without a separator (`{stream}`) carries only a stream id.
    /// Returns `Ok(None)` for the empty forms `{}` and `{:}`.
    pub fn parse(tag: &str) -> Result<Option<Self>> {
        let inner = tag
            .strip_prefix(OPEN)
            .and_then(|rest| rest.strip_suffix(CLOSE))
            .ok_or_else(|| Error::InvalidSid(format!("expected {{...}} around '{tag}'")))?;

        if inner.contains([OPEN, CLOSE]) {
            return Err(Error::InvalidSid(format!("nested braces in '{tag}'")));
        }
        if inner.is_empty() {
            return Ok(None);
        }

        let (stream_id, application_id) = inner.split_once(SEPARATOR).unwrap_or((inner, ""));

        let sid = Self::new(stream_id, application_id);
        Ok((!sid.is_empty()).then_some(sid))
    }
}

impl fmt::Display for SidTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{OPEN}{}{SEPARATOR}{}{CLOSE}",
            self.stream_id.as_deref().unwrap_or_default(),
            self.application_id.as_deref().unwrap_or_default()
        )
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}
