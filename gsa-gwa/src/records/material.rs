use crate::error::{DecodeError, EncodeError};
use crate::fields::Colour;
use crate::grammar::{TokenReader, TokenWriter};
use crate::record::GwaRecord;
use crate::Keyword;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// `MAT_ANAL.1`: an analysis material model.
///
/// The parameter list is counted in the line and its length is fixed by
/// the model: isotropic elastic takes E, ν, ρ, α, G and damping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMaterial {
    pub kind: AnalysisMaterialKind,
    pub name: String,
    pub colour: Colour,
    pub params: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum AnalysisMaterialKind {
    #[strum(serialize = "MAT_ELAS_ISO")]
    ElasticIsotropic,
    #[strum(serialize = "MAT_ELAS_ORTHO")]
    ElasticOrthotropic,
    #[strum(serialize = "MAT_ELAS_PLAS_ISO")]
    ElasticPlasticIsotropic,
}

impl AnalysisMaterialKind {
    pub fn param_count(self) -> usize {
        match self {
            Self::ElasticIsotropic => 6,
            Self::ElasticPlasticIsotropic => 9,
            Self::ElasticOrthotropic => 13,
        }
    }
}

/// Design material families referenced by properties and section components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum MaterialType {
    #[strum(serialize = "GENERIC")]
    Generic,
    #[strum(serialize = "STEEL")]
    Steel,
    #[strum(serialize = "CONCRETE")]
    Concrete,
    #[strum(serialize = "ALUMINIUM")]
    Aluminium,
    #[strum(serialize = "GLASS")]
    Glass,
    #[strum(serialize = "FRP")]
    Frp,
    #[strum(serialize = "TIMBER")]
    Timber,
    #[strum(serialize = "FABRIC")]
    Fabric,
}

impl AnalysisMaterial {
    /// An isotropic elastic material.
    pub fn isotropic(
        name: impl Into<String>,
        elastic_modulus: f64,
        poisson_ratio: f64,
        density: f64,
        thermal_expansion: f64,
    ) -> Self {
        let shear_modulus = elastic_modulus / (2.0 * (1.0 + poisson_ratio));
        Self {
            kind: AnalysisMaterialKind::ElasticIsotropic,
            name: name.into(),
            colour: Colour::NoRgb,
            params: vec![
                elastic_modulus,
                poisson_ratio,
                density,
                thermal_expansion,
                shear_modulus,
                0.0,
            ],
        }
    }

    pub fn elastic_modulus(&self) -> Option<f64> {
        self.params.first().copied()
    }

    pub fn density(&self) -> Option<f64> {
        self.params.get(2).copied()
    }
}

impl GwaRecord for AnalysisMaterial {
    const KEYWORD: Keyword = Keyword::MatAnal;
    const VERSION: u32 = 1;

    fn decode_items(reader: &mut TokenReader<'_>) -> Result<Self, DecodeError> {
        let kind: AnalysisMaterialKind = reader.tag("type")?;
        let name = reader.text();
        let colour = reader.colour()?;
        let expected = kind.param_count();
        reader.parse_with("param_count", |t| match t.trim().parse::<usize>() {
            Ok(n) if n == expected => Ok(()),
            Ok(n) => Err(format!("{kind} takes {expected} parameters, line declares {n}")),
            Err(_) => Err(format!("'{t}' is not a parameter count")),
        })?;
        let params = (0..expected)
            .map(|_| reader.number("param"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            name,
            colour,
            params,
        })
    }

    fn encode_items(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.tag(&self.kind);
        writer.text("name", &self.name)?;
        writer.colour(&self.colour)?;
        if self.params.len() != self.kind.param_count() {
            return Err(EncodeError::new(
                Keyword::MatAnal.as_str(),
                "params",
                format!(
                    "{} takes {} parameters, record has {}",
                    self.kind,
                    self.kind.param_count(),
                    self.params.len()
                ),
            ));
        }
        writer.unsigned(self.params.len() as u32);
        for p in &self.params {
            writer.number("param", *p)?;
        }
        Ok(())
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
