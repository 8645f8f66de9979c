use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The type tag of a GWA line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum Keyword {
    #[strum(serialize = "AXIS")]
    #[serde(rename = "AXIS")]
    Axis,
    #[strum(serialize = "MAT_ANAL")]
    #[serde(rename = "MAT_ANAL")]
    MatAnal,
    #[strum(serialize = "PROP_MASS")]
    #[serde(rename = "PROP_MASS")]
    PropMass,
    #[strum(serialize = "PROP_SPR")]
    #[serde(rename = "PROP_SPR")]
    PropSpr,
    #[strum(serialize = "PROP_2D")]
    #[serde(rename = "PROP_2D")]
    Prop2d,
    #[strum(serialize = "SECTION")]
    #[serde(rename = "SECTION")]
    Section,
    #[strum(serialize = "SECTION_COMP")]
    #[serde(rename = "SECTION_COMP")]
    SectionComp,
    #[strum(serialize = "SECTION_STEEL")]
    #[serde(rename = "SECTION_STEEL")]
    SectionSteel,
    #[strum(serialize = "LOAD_TITLE")]
    #[serde(rename = "LOAD_TITLE")]
    LoadTitle,
    #[strum(serialize = "LOAD_GRAVITY")]
    #[serde(rename = "LOAD_GRAVITY")]
    LoadGravity,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
