use crate::error::{DecodeError, EncodeError};
use crate::fields::Colour;
use crate::grammar::{TokenReader, TokenWriter};
use crate::record::GwaRecord;
use crate::records::{SectionComponent, SectionSteel};
use crate::Keyword;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `SECTION.7`: a 1D cross-section.
///
/// The line carries its components inline: a count, then each
/// `SECTION_COMP.4` item block, then an optional `SECTION_STEEL.2` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub colour: Colour,
    pub name: String,
    pub member: MemberType,
    pub pool: i32,
    pub reference_point: SectionReferencePoint,
    pub ref_y: f64,
    pub ref_z: f64,
    /// Additional mass per unit length.
    pub mass: f64,
    pub fraction: f64,
    pub cost: f64,
    pub left: f64,
    pub right: f64,
    pub slab: f64,
    pub components: Vec<SectionComponent>,
    pub steel: Option<SectionSteel>,
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum MemberType {
    #[strum(serialize = "1D_GENERIC")]
    Generic1d,
    #[strum(serialize = "BEAM")]
    Beam,
    #[strum(serialize = "COLUMN")]
    Column,
    #[strum(serialize = "SLAB")]
    Slab,
    #[strum(serialize = "WALL")]
    Wall,
    #[strum(serialize = "CANTILEVER")]
    Cantilever,
    #[strum(serialize = "RIBBED_SLAB")]
    RibbedSlab,
    #[strum(serialize = "COMPOSITE")]
    Composite,
    #[strum(serialize = "PILE")]
    Pile,
    #[strum(serialize = "EXPLICIT")]
    Explicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum SectionReferencePoint {
    #[strum(serialize = "CEN")]
    Centroid,
    #[strum(serialize = "TOP_LEFT")]
    TopLeft,
    #[strum(serialize = "TOP_CEN")]
    TopCentre,
    #[strum(serialize = "TOP_RIGHT")]
    TopRight,
    #[strum(serialize = "MID_LEFT")]
    MiddleLeft,
    #[strum(serialize = "MID_RIGHT")]
    MiddleRight,
    #[strum(serialize = "BOT_LEFT")]
    BottomLeft,
    #[strum(serialize = "BOT_CEN")]
    BottomCentre,
    #[strum(serialize = "BOT_RIGHT")]
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    #[strum(serialize = "NO_ENVIRON")]
    Excluded,
    #[strum(serialize = "ENVIRON")]
    Included,
}

impl Section {
    pub fn new(name: impl Into<String>, components: Vec<SectionComponent>) -> Self {
        Self {
            colour: Colour::NoRgb,
            name: name.into(),
            member: MemberType::Generic1d,
            pool: 0,
            reference_point: SectionReferencePoint::Centroid,
            ref_y: 0.0,
            ref_z: 0.0,
            mass: 0.0,
            fraction: 1.0,
            cost: 0.0,
            left: 0.0,
            right: 0.0,
            slab: 0.0,
            components,
            steel: None,
            environment: Environment::Excluded,
        }
    }

    /// Analysis material indices referenced by any component.
    pub fn analysis_materials(&self) -> impl Iterator<Item = u32> + '_ {
        self.components.iter().filter_map(|c| c.analysis_material)
    }
}

impl GwaRecord for Section {
    const KEYWORD: Keyword = Keyword::Section;
    const VERSION: u32 = 7;
    const RELATED: &'static [Keyword] =
        &[Keyword::MatAnal, Keyword::SectionComp, Keyword::SectionSteel];

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        let colour = reader.colour()?;
        let name = reader.text();
        let member = reader.tag("memb")?;
        let pool = reader.integer("pool")?;
        let reference_point = reader.tag("point")?;
        let ref_y = reader.number("ref_y")?;
        let ref_z = reader.number("ref_z")?;
        let mass = reader.number("mass")?;
        let fraction = reader.number("fraction")?;
        let cost = reader.number("cost")?;
        let left = reader.number("left")?;
        let right = reader.number("right")?;
        let slab = reader.number("slab")?;

        let count = reader.unsigned("num")?;
        // Each component spans at least its own header token.
        let mut components = Vec::with_capacity((count as usize).min(reader.remaining()));
        for _ in 0..count {
            reader.embedded_header(SectionComponent::KEYWORD, SectionComponent::VERSION)?;
            let outer = reader.enter(SectionComponent::KEYWORD);
            let component = SectionComponent::decode_items(reader)?;
            reader.leave(outer);
            components.push(component);
        }

        let steel = if reader.at_embedded(SectionSteel::KEYWORD) {
            reader.embedded_header(SectionSteel::KEYWORD, SectionSteel::VERSION)?;
            let outer = reader.enter(SectionSteel::KEYWORD);
            let steel = SectionSteel::decode_items(reader)?;
            reader.leave(outer);
            Some(steel)
        } else {
            None
        };

        let environment = reader.tag("environ")?;

        Ok(Self {
            colour,
            name,
            member,
            pool,
            reference_point,
            ref_y,
            ref_z,
            mass,
            fraction,
            cost,
            left,
            right,
            slab,
            components,
            steel,
            environment,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.colour(&self.colour)?;
        writer.text("name", &self.name)?;
        writer.tag(&self.member);
        writer.integer(self.pool);
        writer.tag(&self.reference_point);
        writer.number("ref_y", self.ref_y)?;
        writer.number("ref_z", self.ref_z)?;
        writer.number("mass", self.mass)?;
        writer.number("fraction", self.fraction)?;
        writer.number("cost", self.cost)?;
        writer.number("left", self.left)?;
        writer.number("right", self.right)?;
        writer.number("slab", self.slab)?;

        let count = u32::try_from(self.components.len())
            .map_err(|_| EncodeError::new(Self::KEYWORD.as_str(), "num", "too many components"))?;
        writer.unsigned(count);
        for component in &self.components {
            writer.embedded_header(SectionComponent::KEYWORD, SectionComponent::VERSION);
            let outer = writer.enter(SectionComponent::KEYWORD);
            component.encode_items(writer)?;
            writer.leave(outer);
        }

        if let Some(steel) = &self.steel {
            writer.embedded_header(SectionSteel::KEYWORD, SectionSteel::VERSION);
            let outer = writer.enter(SectionSteel::KEYWORD);
            steel.encode_items(writer)?;
            writer.leave(outer);
        }

        writer.tag(&self.environment);
        Ok(())
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
