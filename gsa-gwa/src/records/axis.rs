use crate::error::{DecodeError, EncodeError};
use crate::grammar::{TokenReader, TokenWriter};
use crate::record::GwaRecord;
use crate::Keyword;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `AXIS.1`: a user-defined coordinate system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub kind: AxisKind,
    pub origin: [f64; 3],
    pub x_vector: [f64; 3],
    pub xy_vector: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum AxisKind {
    #[strum(serialize = "CART")]
    Cartesian,
    #[strum(serialize = "CYL")]
    Cylindrical,
    #[strum(serialize = "SPH")]
    Spherical,
}

impl Axis {
    /// A cartesian axis aligned with the global one at `origin`.
    pub fn cartesian(name: impl Into<String>, origin: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            kind: AxisKind::Cartesian,
            origin,
            x_vector: [1.0, 0.0, 0.0],
            xy_vector: [0.0, 1.0, 0.0],
        }
    }
}

impl GwaRecord for Axis {
    const KEYWORD: Keyword = Keyword::Axis;
    const VERSION: u32 = 1;

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: reader.text(),
            kind: reader.tag("type")?,
            origin: reader.vector3("origin")?,
            x_vector: reader.vector3("x_vector")?,
            xy_vector: reader.vector3("xy_vector")?,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.text("name", &self.name)?;
        writer.tag(&self.kind);
        writer.vector3("origin", self.origin)?;
        writer.vector3("x_vector", self.x_vector)?;
        writer.vector3("xy_vector", self.xy_vector)
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
