use crate::error::{DecodeError, EncodeError};
use crate::grammar::{TokenReader, TokenWriter};
use crate::record::GwaRecord;
use crate::Keyword;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `SECTION_STEEL.2`: steel design data embedded in a `SECTION`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSteel {
    pub grade: Option<u32>,
    pub plastic_elastic: f64,
    pub net_gross: f64,
    pub exposed: f64,
    pub beta: f64,
    pub kind: SteelSectionType,
    pub plate: PlateType,
    pub lock: LockType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum SteelSectionType {
    #[strum(serialize = "UNDEF")]
    Undefined,
    #[strum(serialize = "ROLLED")]
    Rolled,
    #[strum(serialize = "WELDED")]
    Welded,
    #[strum(serialize = "HOT_FINISHED")]
    HotFinished,
    #[strum(serialize = "COLD_FORMED")]
    ColdFormed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum PlateType {
    #[strum(serialize = "UNDEF")]
    Undefined,
    #[strum(serialize = "CURVED")]
    Curved,
    #[strum(serialize = "FLAT")]
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum LockType {
    #[strum(serialize = "LOCKED")]
    Locked,
    #[strum(serialize = "NOT_LOCKED")]
    NotLocked,
}

impl Default for SectionSteel {
    fn default() -> Self {
        Self {
            grade: None,
            plastic_elastic: 1.0,
            net_gross: 1.0,
            exposed: 1.0,
            beta: 0.4,
            kind: SteelSectionType::Undefined,
            plate: PlateType::Undefined,
            lock: LockType::NotLocked,
        }
    }
}

impl GwaRecord for SectionSteel {
    const KEYWORD: Keyword = Keyword::SectionSteel;
    const VERSION: u32 = 2;
    const SELF_CONTAINED: bool = false;

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            grade: reader.index_ref("grade")?,
            plastic_elastic: reader.number("plas_elas")?,
            net_gross: reader.number("net_gross")?,
            exposed: reader.number("exposed")?,
            beta: reader.number("beta")?,
            kind: reader.tag("type")?,
            plate: reader.tag("plate")?,
            lock: reader.tag("lock")?,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.index_ref(self.grade);
        writer.number("plas_elas", self.plastic_elastic)?;
        writer.number("net_gross", self.net_gross)?;
        writer.number("exposed", self.exposed)?;
        writer.number("beta", self.beta)?;
        writer.tag(&self.kind);
        writer.tag(&self.plate);
        writer.tag(&self.lock);
        Ok(())
    }
}
