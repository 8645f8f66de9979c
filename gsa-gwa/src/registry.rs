//! Keyword → codec dispatch.
//!
//! The registry is the only place a line's keyword is looked up. Every record
//! type is registered once at construction; there is no runtime type scanning.

use crate::error::{DecodeError, EncodeError, GwaError, GwaResult};
use crate::grammar::{format_header, parse_header, split_line, strip_set, TokenReader, TokenWriter};
use crate::record::{GwaRecord, NativeRecord, RecordBody};
use crate::records::{
    AnalysisMaterial, Axis, LoadGravity, LoadTitle, Prop2d, PropMass, PropSpring, Section,
    SectionComponent, SectionSteel,
};
use crate::Keyword;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::debug;

/// Items-only codec for one keyword, erased over the record type.
pub trait RecordCodec: Send + Sync {
    fn decode_items(&self, reader: &mut TokenReader<'_>) -> Result<RecordBody, DecodeError>;

    fn encode_items(&self, body: &RecordBody, writer: &mut TokenWriter) -> Result<(), EncodeError>;
}

/// [`RecordCodec`] backed by a [`GwaRecord`] implementation.
pub struct TypedCodec<T>(PhantomData<fn() -> T>);

impl<T> TypedCodec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TypedCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GwaRecord> RecordCodec for TypedCodec<T> {
    fn decode_items(&self, reader: &mut TokenReader<'_>) -> Result<RecordBody, DecodeError> {
        T::decode_items(reader).map(Into::into)
    }

    fn encode_items(&self, body: &RecordBody, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        let record = T::from_body(body).ok_or_else(|| {
            EncodeError::new(
                T::KEYWORD.as_str(),
                "keyword",
                format!("record body is {}", body.keyword()),
            )
        })?;
        record.encode_items(writer)
    }
}

/// Everything the registry knows about one keyword.
pub struct Registration {
    pub keyword: Keyword,
    pub version: u32,
    pub self_contained: bool,
    /// Dependency-ordering hints; never used for decoding.
    pub related_keywords: Vec<Keyword>,
    codec: Box<dyn RecordCodec>,
}

impl Registration {
    pub fn codec(&self) -> &dyn RecordCodec {
        self.codec.as_ref()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("keyword", &self.keyword)
            .field("version", &self.version)
            .field("self_contained", &self.self_contained)
            .field("related_keywords", &self.related_keywords)
            .finish_non_exhaustive()
    }
}

/// The outcome of decoding one line of a batch.
#[derive(Debug)]
pub struct DecodedLine {
    /// 1-based line number in the source.
    pub line_number: usize,
    pub outcome: GwaResult<NativeRecord>,
}

/// Maps keywords to their codecs and metadata.
#[derive(Debug, Default)]
pub struct GwaRegistry {
    registrations: HashMap<Keyword, Registration>,
}

impl GwaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in record type.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<Axis>();
        registry.register::<AnalysisMaterial>();
        registry.register::<PropMass>();
        registry.register::<PropSpring>();
        registry.register::<Prop2d>();
        registry.register::<Section>();
        registry.register::<SectionComponent>();
        registry.register::<SectionSteel>();
        registry.register::<LoadTitle>();
        registry.register::<LoadGravity>();
        registry
    }

    /// Registers a record type using its declared metadata.
    pub fn register<T: GwaRecord + 'static>(&mut self) {
        self.register_codec(
            T::KEYWORD,
            T::VERSION,
            Box::new(TypedCodec::<T>::new()),
            T::SELF_CONTAINED,
            T::RELATED,
        );
    }

    /// Registers a codec, replacing any existing registration for the keyword.
    pub fn register_codec(
        &mut self,
        keyword: Keyword,
        version: u32,
        codec: Box<dyn RecordCodec>,
        self_contained: bool,
        related_keywords: &[Keyword],
    ) {
        let registration = Registration {
            keyword,
            version,
            self_contained,
            related_keywords: related_keywords.to_vec(),
            codec,
        };
        if let Some(previous) = self.registrations.insert(keyword, registration) {
            debug!(
                "Replaced registration {}.{} with version {}",
                keyword, previous.version, version
            );
        }
    }

    pub fn has(&self, keyword: Keyword) -> bool {
        self.registrations.contains_key(&keyword)
    }

    pub fn get(&self, keyword: Keyword) -> Option<&Registration> {
        self.registrations.get(&keyword)
    }

    /// Registered keywords in sorted order.
    pub fn list_keywords(&self) -> Vec<Keyword> {
        let mut keywords: Vec<Keyword> = self.registrations.keys().copied().collect();
        keywords.sort();
        keywords
    }

    /// Related keywords of a registered keyword that are themselves registered.
    pub fn related(&self, keyword: Keyword) -> Vec<Keyword> {
        self.registrations
            .get(&keyword)
            .map(|r| {
                r.related_keywords
                    .iter()
                    .copied()
                    .filter(|k| *k != keyword && self.has(*k))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Decodes one self-contained line.
    ///
    /// Unknown keywords and version mismatches come back as skippable
    /// [`GwaError`]s; see [`GwaError::is_skippable`].
    pub fn decode(&self, line: &str) -> GwaResult<NativeRecord> {
        let tokens = split_line(line);
        let (set, tokens) = strip_set(&tokens);
        let header_token = tokens.first().copied().unwrap_or("");
        let header = parse_header(header_token)?;

        let keyword = Keyword::from_str(&header.keyword).map_err(|_| GwaError::UnknownKeyword {
            keyword: header.keyword.clone(),
        })?;
        let registration = self
            .registrations
            .get(&keyword)
            .ok_or_else(|| GwaError::UnknownKeyword {
                keyword: header.keyword.clone(),
            })?;
        if header.version != registration.version {
            return Err(GwaError::UnsupportedVersion {
                keyword: header.keyword,
                version: header.version,
                registered: registration.version,
            });
        }
        if !registration.self_contained {
            return Err(DecodeError::new(
                keyword.as_str(),
                0,
                header_token,
                "embedded-only record cannot appear as a top-level line",
            )
            .into());
        }

        let sid = header.sid()?.unwrap_or_default();

        let mut reader = TokenReader::new(keyword, tokens);
        let index = reader.index("index")?;
        let body = registration.codec.decode_items(&mut reader)?;
        reader.finish()?;

        Ok(NativeRecord {
            index: Some(index),
            sid,
            set,
            body,
        })
    }

    /// Decodes a line that must carry the given keyword.
    pub fn decode_keyword(&self, keyword: Keyword, line: &str) -> GwaResult<NativeRecord> {
        let record = self.decode(line)?;
        if record.keyword() != keyword {
            let tokens = split_line(line);
            let (_, tokens) = strip_set(&tokens);
            return Err(DecodeError::new(
                keyword.as_str(),
                0,
                tokens.first().copied().unwrap_or(""),
                format!("expected a {keyword} line"),
            )
            .into());
        }
        Ok(record)
    }

    /// Decodes a batch of lines, skipping blank ones.
    pub fn decode_lines<'l, I>(&self, lines: I) -> Vec<DecodedLine>
    where
        I: IntoIterator<Item = &'l str>,
    {
        lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| DecodedLine {
                line_number: i + 1,
                outcome: self.decode(line),
            })
            .collect()
    }

    /// Encodes a self-contained record, optionally as a `SET` line.
    pub fn encode(&self, record: &NativeRecord, include_set: bool) -> GwaResult<Vec<String>> {
        let keyword = record.keyword();
        let registration = self
            .registrations
            .get(&keyword)
            .ok_or_else(|| GwaError::UnknownKeyword {
                keyword: keyword.to_string(),
            })?;
        if !registration.self_contained {
            return Err(EncodeError::new(
                keyword.as_str(),
                "keyword",
                "embedded-only record cannot be written as a top-level line",
            )
            .into());
        }
        let index = record.index.ok_or_else(|| {
            EncodeError::new(keyword.as_str(), "index", "required record index is not set")
        })?;

        let mut writer = TokenWriter::new(keyword);
        writer.header(
            include_set,
            format_header(keyword, registration.version, Some(&record.sid)),
        );
        writer.index("index", index)?;
        registration.codec.encode_items(&record.body, &mut writer)?;
        Ok(vec![writer.finish()])
    }

    /// Encodes every record, stopping at the first failure.
    pub fn encode_all<'r, I>(&self, records: I, include_set: bool) -> GwaResult<Vec<String>>
    where
        I: IntoIterator<Item = &'r NativeRecord>,
    {
        let mut lines = Vec::new();
        for record in records {
            lines.extend(self.encode(record, include_set)?);
        }
        Ok(lines)
    }
}
