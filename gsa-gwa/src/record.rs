//! Native records: one decoded GWA entity plus its line-level identity.

use crate::error::{DecodeError, EncodeError};
use crate::grammar::{TokenReader, TokenWriter};
use crate::records::{
    AnalysisMaterial, Axis, LoadGravity, LoadTitle, Prop2d, PropMass, PropSpring, Section,
    SectionComponent, SectionSteel,
};
use crate::Keyword;
use gsa_types::SidTag;
use serde::{Deserialize, Serialize};

/// A strongly-typed record grammar.
///
/// `decode_items` / `encode_items` cover the positional payload only: the
/// keyword, version, `SET` token and index are handled by the registry, and
/// embedded records are read inline by their parent.
pub trait GwaRecord: Sized + Clone + Into<RecordBody> + BodyVariant {
    const KEYWORD: Keyword;
    const VERSION: u32;
    /// Whether the record appears as a stand-alone line with its own index.
    const SELF_CONTAINED: bool = true;
    /// Keywords this record refers to, used as dependency-ordering hints.
    const RELATED: &'static [Keyword] = &[];

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError>;

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError>;

    /// The record's user-facing name, for records that carry one.
    fn display_name(&self) -> Option<&str> {
        None
    }
}

/// Typed projection out of [`RecordBody`]; implemented for every payload type.
pub trait BodyVariant: Sized {
    fn from_body(body: &RecordBody) -> Option<&Self>;

    fn from_body_mut(body: &mut RecordBody) -> Option<&mut Self>;
}

macro_rules! record_bodies {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// The closed set of record payloads.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "keyword", content = "fields")]
        pub enum RecordBody {
            $($variant($ty),)*
        }

        impl RecordBody {
            pub fn keyword(&self) -> Keyword {
                match self {
                    $(Self::$variant(_) => <$ty as GwaRecord>::KEYWORD,)*
                }
            }

            pub fn version(&self) -> u32 {
                match self {
                    $(Self::$variant(_) => <$ty as GwaRecord>::VERSION,)*
                }
            }

            pub fn is_self_contained(&self) -> bool {
                match self {
                    $(Self::$variant(_) => <$ty as GwaRecord>::SELF_CONTAINED,)*
                }
            }

            /// The name carried in the payload, for records that have one.
            pub fn name(&self) -> Option<&str> {
                match self {
                    $(Self::$variant(r) => r.display_name(),)*
                }
            }
        }

        $(
            impl From<$ty> for RecordBody {
                fn from(record: $ty) -> Self {
                    Self::$variant(record)
                }
            }

            impl BodyVariant for $ty {
                fn from_body(body: &RecordBody) -> Option<&Self> {
                    match body {
                        RecordBody::$variant(r) => Some(r),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_body_mut(body: &mut RecordBody) -> Option<&mut Self> {
                    match body {
                        RecordBody::$variant(r) => Some(r),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*
    };
}

record_bodies! {
    Axis(Axis),
    AnalysisMaterial(AnalysisMaterial),
    PropMass(PropMass),
    PropSpring(PropSpring),
    Prop2d(Prop2d),
    Section(Section),
    SectionComponent(SectionComponent),
    SectionSteel(SectionSteel),
    LoadTitle(LoadTitle),
    LoadGravity(LoadGravity),
}

/// One native entity as stored by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeRecord {
    /// Identity within the keyword's namespace; `None` while unassigned.
    pub index: Option<u32>,
    #[serde(default)]
    pub sid: SidTag,
    /// Whether the source line was a full replace (`SET`).
    #[serde(default)]
    pub set: bool,
    pub body: RecordBody,
}

impl NativeRecord {
    pub fn new(body: impl Into<RecordBody>) -> Self {
        Self {
            index: None,
            sid: SidTag::default(),
            set: false,
            body: body.into(),
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.sid.set_application_id(Some(application_id.into()));
        self
    }

    pub fn with_stream_id(mut self, stream_id: impl Into<String>) -> Self {
        self.sid.set_stream_id(Some(stream_id.into()));
        self
    }

    pub fn keyword(&self) -> Keyword {
        self.body.keyword()
    }

    pub fn version(&self) -> u32 {
        self.body.version()
    }

    pub fn is_self_contained(&self) -> bool {
        self.body.is_self_contained()
    }

    pub fn application_id(&self) -> Option<&str> {
        self.sid.application_id()
    }

    pub fn stream_id(&self) -> Option<&str> {
        self.sid.stream_id()
    }

    /// Typed view of the payload.
    pub fn as_record<T: GwaRecord>(&self) -> Option<&T> {
        T::from_body(&self.body)
    }

    pub fn as_record_mut<T: GwaRecord>(&mut self) -> Option<&mut T> {
        T::from_body_mut(&mut self.body)
    }
}
