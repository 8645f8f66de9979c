use crate::error::{DecodeError, EncodeError};
use crate::fields::{Colour, PercentOrAbsolute};
use crate::grammar::{TokenReader, TokenWriter};
use crate::record::GwaRecord;
use crate::records::MaterialType;
use crate::Keyword;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// `PROP_2D.7`: a 2D element property (shell, plate, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop2d {
    pub name: String,
    pub colour: Colour,
    pub kind: Prop2dType,
    pub axis: AxisRef,
    /// `MAT_ANAL` index.
    pub analysis_material: Option<u32>,
    pub material_type: MaterialType,
    pub grade: Option<u32>,
    pub design: Option<u32>,
    pub thickness: f64,
    pub reference_point: Prop2dReferencePoint,
    pub ref_z: f64,
    pub additional_mass: f64,
    pub bending: PercentOrAbsolute,
    pub shear: PercentOrAbsolute,
    pub in_plane: PercentOrAbsolute,
    pub weight: PercentOrAbsolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Prop2dType {
    #[strum(serialize = "SHELL")]
    Shell,
    #[strum(serialize = "PLATE")]
    Plate,
    #[strum(serialize = "STRESS")]
    Stress,
    #[strum(serialize = "FABRIC")]
    Fabric,
    #[strum(serialize = "LOAD")]
    Load,
    #[strum(serialize = "CURVED")]
    Curved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Prop2dReferencePoint {
    #[strum(serialize = "CENTROID")]
    Centroid,
    #[strum(serialize = "TOP_CENTRE")]
    TopCentre,
    #[strum(serialize = "BOT_CENTRE")]
    BottomCentre,
}

/// The axis a property is defined in: a built-in one or an `AXIS` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisRef {
    Global,
    Local,
    Axis(u32),
}

impl FromStr for AxisRef {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("GLOBAL") {
            return Ok(Self::Global);
        }
        if token.eq_ignore_ascii_case("LOCAL") {
            return Ok(Self::Local);
        }
        match token.parse::<u32>() {
            Ok(0) => Ok(Self::Global),
            Ok(n) => Ok(Self::Axis(n)),
            Err(_) => Err(format!("'{token}' is not GLOBAL, LOCAL or an axis index")),
        }
    }
}

impl fmt::Display for AxisRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("GLOBAL"),
            Self::Local => f.write_str("LOCAL"),
            Self::Axis(n) => write!(f, "{n}"),
        }
    }
}

impl Prop2d {
    /// A shell of the given thickness with unmodified stiffness.
    pub fn shell(name: impl Into<String>, thickness: f64) -> Self {
        let full = PercentOrAbsolute::Percentage(100.0);
        Self {
            name: name.into(),
            colour: Colour::NoRgb,
            kind: Prop2dType::Shell,
            axis: AxisRef::Global,
            analysis_material: None,
            material_type: MaterialType::Concrete,
            grade: None,
            design: None,
            thickness,
            reference_point: Prop2dReferencePoint::Centroid,
            ref_z: 0.0,
            additional_mass: 0.0,
            bending: full,
            shear: full,
            in_plane: full,
            weight: full,
        }
    }
}

impl GwaRecord for Prop2d {
    const KEYWORD: Keyword = Keyword::Prop2d;
    const VERSION: u32 = 7;
    const RELATED: &'static [Keyword] = &[Keyword::Axis, Keyword::MatAnal];

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: reader.text(),
            colour: reader.colour()?,
            kind: reader.tag("type")?,
            axis: reader.parse_with("axis", |t| t.parse())?,
            analysis_material: reader.index_ref("mat")?,
            material_type: reader.tag("mat_type")?,
            grade: reader.index_ref("grade")?,
            design: reader.index_ref("design")?,
            thickness: reader.number("thickness")?,
            reference_point: reader.tag("ref_pt")?,
            ref_z: reader.number("ref_z")?,
            additional_mass: reader.number("mass")?,
            bending: reader.percent_or_absolute("bending")?,
            shear: reader.percent_or_absolute("shear")?,
            in_plane: reader.percent_or_absolute("in_plane")?,
            weight: reader.percent_or_absolute("weight")?,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.text("name", &self.name)?;
        writer.colour(&self.colour)?;
        writer.tag(&self.kind);
        writer.tag(&self.axis);
        writer.index_ref(self.analysis_material);
        writer.tag(&self.material_type);
        writer.index_ref(self.grade);
        writer.index_ref(self.design);
        writer.number("thickness", self.thickness)?;
        writer.tag(&self.reference_point);
        writer.number("ref_z", self.ref_z)?;
        writer.number("mass", self.additional_mass)?;
        writer.percent_or_absolute("bending", self.bending)?;
        writer.percent_or_absolute("shear", self.shear)?;
        writer.percent_or_absolute("in_plane", self.in_plane)?;
        writer.percent_or_absolute("weight", self.weight)
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
