use crate::error::{DecodeError, EncodeError};
use crate::grammar::{TokenReader, TokenWriter};
use crate::profile::Profile;
use crate::record::GwaRecord;
use crate::records::MaterialType;
use crate::Keyword;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `SECTION_COMP.4`: one component of a `SECTION`.
///
/// Only ever embedded in its parent line; it has no index of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionComponent {
    pub name: String,
    pub analysis_material: Option<u32>,
    pub material_type: MaterialType,
    pub grade: Option<u32>,
    pub profile: Profile,
    pub offset_y: f64,
    pub offset_z: f64,
    pub rotation: f64,
    pub reflect: Reflect,
    pub pool: i32,
    pub taper: TaperType,
    pub taper_position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Reflect {
    #[strum(serialize = "NONE")]
    None,
    #[strum(serialize = "Y_AXIS")]
    YAxis,
    #[strum(serialize = "Z_AXIS")]
    ZAxis,
    #[strum(serialize = "YZ_AXIS")]
    YzAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum TaperType {
    #[strum(serialize = "NONE")]
    None,
    #[strum(serialize = "LINEAR")]
    Linear,
    #[strum(serialize = "PROFILE")]
    Profile,
}

impl SectionComponent {
    pub fn new(profile: Profile, material_type: MaterialType, grade: Option<u32>) -> Self {
        Self {
            name: String::new(),
            analysis_material: None,
            material_type,
            grade,
            profile,
            offset_y: 0.0,
            offset_z: 0.0,
            rotation: 0.0,
            reflect: Reflect::None,
            pool: 0,
            taper: TaperType::None,
            taper_position: 0.0,
        }
    }
}

impl GwaRecord for SectionComponent {
    const KEYWORD: Keyword = Keyword::SectionComp;
    const VERSION: u32 = 4;
    const SELF_CONTAINED: bool = false;
    const RELATED: &'static [Keyword] = &[Keyword::MatAnal];

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: reader.text(),
            analysis_material: reader.index_ref("mat_anal")?,
            material_type: reader.tag("mat_type")?,
            grade: reader.index_ref("grade")?,
            profile: reader.parse_with("desc", |t| t.parse())?,
            offset_y: reader.number("offset_y")?,
            offset_z: reader.number("offset_z")?,
            rotation: reader.number("rotation")?,
            reflect: reader.tag("reflect")?,
            pool: reader.integer("pool")?,
            taper: reader.tag("taper_type")?,
            taper_position: reader.number("taper_pos")?,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.text("name", &self.name)?;
        writer.index_ref(self.analysis_material);
        writer.tag(&self.material_type);
        writer.index_ref(self.grade);
        writer.text("desc", &self.profile.to_string())?;
        writer.number("offset_y", self.offset_y)?;
        writer.number("offset_z", self.offset_z)?;
        writer.number("rotation", self.rotation)?;
        writer.tag(&self.reflect);
        writer.integer(self.pool);
        writer.tag(&self.taper);
        writer.number("taper_pos", self.taper_position)
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
