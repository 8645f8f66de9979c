use crate::error::{DecodeError, EncodeError};
use crate::fields::{Colour, PercentOrAbsolute};
use crate::grammar::{TokenReader, TokenWriter};
use crate::record::GwaRecord;
use crate::Keyword;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `PROP_MASS.3`: a lumped mass property.
///
/// ```text
/// PROP_MASS.3|7|MyMass|NO_RGB|10|1|1|1|0|0|0|NO|10%|10%|10%
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropMass {
    pub name: String,
    pub colour: Colour,
    pub mass: f64,
    /// Ixx, Iyy, Izz, Ixy, Iyz, Izx.
    pub inertia: [f64; 6],
    pub modification: MassModification,
    pub mod_x: Option<PercentOrAbsolute>,
    pub mod_y: Option<PercentOrAbsolute>,
    pub mod_z: Option<PercentOrAbsolute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum MassModification {
    #[strum(serialize = "NO")]
    None,
    #[strum(serialize = "DEFINED")]
    Defined,
    #[strum(serialize = "MOD")]
    Modified,
}

impl PropMass {
    pub fn new(name: impl Into<String>, mass: f64) -> Self {
        Self {
            name: name.into(),
            colour: Colour::NoRgb,
            mass,
            inertia: [0.0; 6],
            modification: MassModification::None,
            mod_x: None,
            mod_y: None,
            mod_z: None,
        }
    }
}

impl GwaRecord for PropMass {
    const KEYWORD: Keyword = Keyword::PropMass;
    const VERSION: u32 = 3;

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        let name = reader.text();
        let colour = reader.colour()?;
        let mass = reader.number("mass")?;
        let mut inertia = [0.0; 6];
        for slot in &mut inertia {
            *slot = reader.number("inertia")?;
        }
        Ok(Self {
            name,
            colour,
            mass,
            inertia,
            modification: reader.tag("mod")?,
            mod_x: reader.nullable_percent_or_absolute("mod_x")?,
            mod_y: reader.nullable_percent_or_absolute("mod_y")?,
            mod_z: reader.nullable_percent_or_absolute("mod_z")?,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.text("name", &self.name)?;
        writer.colour(&self.colour)?;
        writer.number("mass", self.mass)?;
        for i in self.inertia {
            writer.number("inertia", i)?;
        }
        writer.tag(&self.modification);
        writer.nullable_percent_or_absolute("mod_x", self.mod_x)?;
        writer.nullable_percent_or_absolute("mod_y", self.mod_y)?;
        writer.nullable_percent_or_absolute("mod_z", self.mod_z)
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
