use crate::error::{DecodeError, EncodeError};
use crate::grammar::{TokenReader, TokenWriter};
use crate::list::EntityList;
use crate::record::GwaRecord;
use crate::Keyword;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `LOAD_TITLE.2`: a load case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTitle {
    pub title: String,
    pub kind: LoadType,
    /// Source case index; `0` when the case has no source.
    pub source: u32,
    pub category: String,
    pub direction: LoadDirection,
    pub include: IncludeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum LoadType {
    #[strum(serialize = "UNDEF")]
    Undefined,
    #[strum(serialize = "DEAD")]
    Dead,
    #[strum(serialize = "LC_PERM_SOIL")]
    Soil,
    #[strum(serialize = "LC_VAR_IMP")]
    Live,
    #[strum(serialize = "WIND")]
    Wind,
    #[strum(serialize = "SNOW")]
    Snow,
    #[strum(serialize = "SEISMIC")]
    Seismic,
    #[strum(serialize = "LC_ACCIDENTAL")]
    Accidental,
    #[strum(serialize = "LC_PRESTRESS")]
    Prestress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum LoadDirection {
    #[strum(serialize = "NONE")]
    None,
    #[strum(serialize = "X")]
    X,
    #[strum(serialize = "Y")]
    Y,
    #[strum(serialize = "Z")]
    Z,
    #[strum(serialize = "XX")]
    Xx,
    #[strum(serialize = "YY")]
    Yy,
    #[strum(serialize = "ZZ")]
    Zz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum IncludeType {
    #[strum(serialize = "UNDEF")]
    Undefined,
    #[strum(serialize = "INC_SUP")]
    Superior,
    #[strum(serialize = "INC_INF")]
    Inferior,
    #[strum(serialize = "INC_BOTH")]
    Both,
}

impl LoadTitle {
    pub fn new(title: impl Into<String>, kind: LoadType) -> Self {
        Self {
            title: title.into(),
            kind,
            source: 0,
            category: String::new(),
            direction: LoadDirection::None,
            include: IncludeType::Undefined,
        }
    }
}

impl GwaRecord for LoadTitle {
    const KEYWORD: Keyword = Keyword::LoadTitle;
    const VERSION: u32 = 2;

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            title: reader.text(),
            kind: reader.tag("type")?,
            source: reader.unsigned("source")?,
            category: reader.text(),
            direction: reader.tag("dir")?,
            include: reader.tag("include")?,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.text("title", &self.title)?;
        writer.tag(&self.kind);
        writer.unsigned(self.source);
        writer.text("category", &self.category)?;
        writer.tag(&self.direction);
        writer.tag(&self.include);
        Ok(())
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.title)
    }
}

/// `LOAD_GRAVITY.3`: gravity applied to a case, as multiples of g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadGravity {
    pub name: String,
    pub elements: EntityList,
    pub nodes: EntityList,
    /// `LOAD_TITLE` index; required.
    pub load_case: u32,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
}

impl LoadGravity {
    /// Downward self-weight on every element of a case.
    pub fn self_weight(name: impl Into<String>, load_case: u32) -> Self {
        Self {
            name: name.into(),
            elements: EntityList::All,
            nodes: EntityList::Empty,
            load_case,
            gx: 0.0,
            gy: 0.0,
            gz: -1.0,
        }
    }
}

impl GwaRecord for LoadGravity {
    const KEYWORD: Keyword = Keyword::LoadGravity;
    const VERSION: u32 = 3;
    const RELATED: &'static [Keyword] = &[Keyword::LoadTitle];

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: reader.text(),
            elements: reader.parse_with("elements", |t| t.parse())?,
            nodes: reader.parse_with("nodes", |t| t.parse())?,
            load_case: reader.index("case")?,
            gx: reader.number("x")?,
            gy: reader.number("y")?,
            gz: reader.number("z")?,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.text("name", &self.name)?;
        writer.text("elements", &self.elements.to_string())?;
        writer.text("nodes", &self.nodes.to_string())?;
        writer.index("case", self.load_case)?;
        writer.number("x", self.gx)?;
        writer.number("y", self.gy)?;
        writer.number("z", self.gz)
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
