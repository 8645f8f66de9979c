use crate::error::{DecodeError, EncodeError};
use crate::fields::Colour;
use crate::grammar::{TokenReader, TokenWriter};
use crate::record::GwaRecord;
use crate::Keyword;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `PROP_SPR.4`: a spring property.
///
/// The spring type token selects the fields that follow it; the damping
/// ratio closes every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSpring {
    pub name: String,
    pub colour: Colour,
    pub kind: SpringKind,
    pub damping_ratio: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum SpringType {
    #[strum(serialize = "AXIAL")]
    Axial,
    #[strum(serialize = "TORSIONAL")]
    Torsional,
    #[strum(serialize = "COMPRESSION")]
    Compression,
    #[strum(serialize = "TENSION")]
    Tension,
    #[strum(serialize = "GAP")]
    Gap,
    #[strum(serialize = "LOCKUP")]
    Lockup,
    #[strum(serialize = "FRICTION")]
    Friction,
    #[strum(serialize = "GENERAL")]
    General,
}

/// Type-specific spring stiffness data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpringKind {
    Axial {
        stiffness: f64,
    },
    Torsional {
        stiffness: f64,
    },
    Compression {
        stiffness: f64,
    },
    Tension {
        stiffness: f64,
    },
    Gap {
        stiffness: f64,
    },
    Lockup {
        stiffness: f64,
        positive_lock: f64,
        negative_lock: f64,
    },
    Friction {
        stiffness_x: f64,
        stiffness_y: f64,
        stiffness_z: f64,
        friction_coefficient: f64,
    },
    /// Stiffness per degree of freedom (x, y, z, xx, yy, zz); unset means free.
    General {
        stiffness: [Option<f64>; 6],
    },
}

impl SpringKind {
    pub fn spring_type(&self) -> SpringType {
        match self {
            Self::Axial { .. } => SpringType::Axial,
            Self::Torsional { .. } => SpringType::Torsional,
            Self::Compression { .. } => SpringType::Compression,
            Self::Tension { .. } => SpringType::Tension,
            Self::Gap { .. } => SpringType::Gap,
            Self::Lockup { .. } => SpringType::Lockup,
            Self::Friction { .. } => SpringType::Friction,
            Self::General { .. } => SpringType::General,
        }
    }
}

impl PropSpring {
    pub fn axial(name: impl Into<String>, stiffness: f64) -> Self {
        Self {
            name: name.into(),
            colour: Colour::NoRgb,
            kind: SpringKind::Axial { stiffness },
            damping_ratio: None,
        }
    }
}

impl GwaRecord for PropSpring {
    const KEYWORD: Keyword = Keyword::PropSpr;
    const VERSION: u32 = 4;

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        let name = reader.text();
        let colour = reader.colour()?;
        let spring_type: SpringType = reader.tag("type")?;

        let kind = match spring_type {
            SpringType::Axial => SpringKind::Axial {
                stiffness: reader.number("stiffness")?,
            },
            SpringType::Torsional => SpringKind::Torsional {
                stiffness: reader.number("stiffness")?,
            },
            SpringType::Compression => SpringKind::Compression {
                stiffness: reader.number("stiffness")?,
            },
            SpringType::Tension => SpringKind::Tension {
                stiffness: reader.number("stiffness")?,
            },
            SpringType::Gap => SpringKind::Gap {
                stiffness: reader.number("stiffness")?,
            },
            SpringType::Lockup => SpringKind::Lockup {
                stiffness: reader.number("stiffness")?,
                positive_lock: reader.number("positive_lock")?,
                negative_lock: reader.number("negative_lock")?,
            },
            SpringType::Friction => SpringKind::Friction {
                stiffness_x: reader.number("stiffness_x")?,
                stiffness_y: reader.number("stiffness_y")?,
                stiffness_z: reader.number("stiffness_z")?,
                friction_coefficient: reader.number("friction_coefficient")?,
            },
            SpringType::General => {
                let mut stiffness = [None; 6];
                for slot in &mut stiffness {
                    *slot = reader.nullable_number("stiffness")?;
                }
                SpringKind::General { stiffness }
            }
        };

        Ok(Self {
            name,
            colour,
            kind,
            damping_ratio: reader.nullable_number("damping")?,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.text("name", &self.name)?;
        writer.colour(&self.colour)?;
        writer.tag(&self.kind.spring_type());
        match &self.kind {
            SpringKind::Axial { stiffness }
            | SpringKind::Torsional { stiffness }
            | SpringKind::Compression { stiffness }
            | SpringKind::Tension { stiffness }
            | SpringKind::Gap { stiffness } => writer.number("stiffness", *stiffness)?,
            SpringKind::Lockup {
                stiffness,
                positive_lock,
                negative_lock,
            } => {
                writer.number("stiffness", *stiffness)?;
                writer.number("positive_lock", *positive_lock)?;
                writer.number("negative_lock", *negative_lock)?;
            }
            SpringKind::Friction {
                stiffness_x,
                stiffness_y,
                stiffness_z,
                friction_coefficient,
            } => {
                writer.number("stiffness_x", *stiffness_x)?;
                writer.number("stiffness_y", *stiffness_y)?;
                writer.number("stiffness_z", *stiffness_z)?;
                writer.number("friction_coefficient", *friction_coefficient)?;
            }
            SpringKind::General { stiffness } => {
                for s in stiffness {
                    writer.nullable_number("stiffness", *s)?;
                }
            }
        }
        writer.nullable_number("damping", self.damping_ratio)
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
