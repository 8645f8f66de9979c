//! The section profile description mini-grammar.
//!
//! A description is a space-delimited token whose first word selects the
//! sub-grammar:
//!
//! ```text
//! EXP(m) 0.01 1e-4 2e-5 3e-6 0.8 0.8     explicit properties
//! STD I(mm) 200 100 5 10                  standard shape, arity fixed by shape
//! CAT UB UB203x133x25 19990407            catalogue reference
//! GEO P(m) M(0,0) L(1,0) L(1,1)           perimeter
//! ```

use crate::fields::parse_number;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// A cross-section profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Profile {
    Explicit {
        unit: Option<String>,
        area: f64,
        iyy: f64,
        izz: f64,
        j: f64,
        ky: f64,
        kz: f64,
    },
    Standard {
        shape: StandardShape,
        unit: Option<String>,
        dimensions: Vec<f64>,
    },
    Catalogue {
        family: String,
        name: String,
        date: Option<String>,
    },
    Perimeter {
        unit: Option<String>,
        path: Vec<PerimeterPoint>,
    },
}

/// Standard parametric shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum StandardShape {
    /// Rectangle: depth, width.
    R,
    /// Rectangular hollow: depth, width, web, flange.
    #[strum(serialize = "RHS")]
    Rhs,
    /// Circular hollow: diameter, wall.
    #[strum(serialize = "CHS")]
    Chs,
    /// Solid circle: diameter.
    C,
    /// I section: depth, width, web, flange.
    I,
    /// Tee: depth, width, web, flange.
    T,
    /// Channel: depth, width, web, flange.
    #[strum(serialize = "CH")]
    Ch,
    /// Angle: depth, width, web, flange.
    A,
}

impl StandardShape {
    /// Number of dimensions the shape takes.
    pub fn arity(self) -> usize {
        match self {
            Self::C => 1,
            Self::R | Self::Chs => 2,
            Self::Rhs | Self::I | Self::T | Self::Ch | Self::A => 4,
        }
    }
}

/// One vertex of a perimeter path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerimeterPoint {
    pub command: PathCommand,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum PathCommand {
    /// Start a new loop.
    M,
    /// Line to the point.
    L,
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(desc: &str) -> Result<Self, Self::Err> {
        let mut words = desc.split_whitespace();
        let first = words.next().ok_or("empty profile description")?;
        let (head, unit) = split_unit(first)?;

        let profile = match head.to_ascii_uppercase().as_str() {
            "EXP" => {
                let values = numbers(&mut words)?;
                let [area, iyy, izz, j, ky, kz] = <[f64; 6]>::try_from(values.as_slice())
                    .map_err(|_| format!("EXP takes 6 values, found {}", values.len()))?;
                Profile::Explicit {
                    unit,
                    area,
                    iyy,
                    izz,
                    j,
                    ky,
                    kz,
                }
            }
            "STD" => {
                if unit.is_some() {
                    return Err("STD takes its unit on the shape word".to_string());
                }
                let shape_word = words.next().ok_or("STD is missing a shape")?;
                let (shape, unit) = split_unit(shape_word)?;
                let shape: StandardShape = shape
                    .parse()
                    .map_err(|_| format!("unknown standard shape '{shape}'"))?;
                let dimensions = numbers(&mut words)?;
                if dimensions.len() != shape.arity() {
                    return Err(format!(
                        "shape {shape} takes {} dimensions, found {}",
                        shape.arity(),
                        dimensions.len()
                    ));
                }
                Profile::Standard {
                    shape,
                    unit,
                    dimensions,
                }
            }
            "CAT" => {
                if unit.is_some() {
                    return Err("CAT does not take a unit".to_string());
                }
                let family = words.next().ok_or("CAT is missing a family")?.to_string();
                let name = words.next().ok_or("CAT is missing a section name")?.to_string();
                let date = words.next().map(str::to_string);
                if let Some(extra) = words.next() {
                    return Err(format!("unexpected '{extra}' after catalogue reference"));
                }
                Profile::Catalogue { family, name, date }
            }
            "GEO" => {
                if unit.is_some() {
                    return Err("GEO takes its unit on the P word".to_string());
                }
                let p_word = words.next().ok_or("GEO is missing the P marker")?;
                let (marker, unit) = split_unit(p_word)?;
                if !marker.eq_ignore_ascii_case("P") {
                    return Err(format!("expected perimeter marker 'P', found '{marker}'"));
                }
                let path = words.map(parse_point).collect::<Result<Vec<_>, _>>()?;
                if path.is_empty() {
                    return Err("perimeter has no points".to_string());
                }
                if path[0].command != PathCommand::M {
                    return Err("perimeter must start with M".to_string());
                }
                Profile::Perimeter { unit, path }
            }
            other => return Err(format!("unknown profile type '{other}'")),
        };
        Ok(profile)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Explicit {
                unit,
                area,
                iyy,
                izz,
                j,
                ky,
                kz,
            } => write!(
                f,
                "EXP{} {area} {iyy} {izz} {j} {ky} {kz}",
                unit_suffix(unit)
            ),
            Profile::Standard {
                shape,
                unit,
                dimensions,
            } => {
                write!(f, "STD {shape}{}", unit_suffix(unit))?;
                for d in dimensions {
                    write!(f, " {d}")?;
                }
                Ok(())
            }
            Profile::Catalogue { family, name, date } => {
                write!(f, "CAT {family} {name}")?;
                if let Some(date) = date {
                    write!(f, " {date}")?;
                }
                Ok(())
            }
            Profile::Perimeter { unit, path } => {
                write!(f, "GEO P{}", unit_suffix(unit))?;
                for p in path {
                    write!(f, " {}({},{})", p.command, p.y, p.z)?;
                }
                Ok(())
            }
        }
    }
}

/// Splits `WORD(unit)` into the word and its unit.
fn split_unit(word: &str) -> Result<(&str, Option<String>), String> {
    match word.split_once('(') {
        None => Ok((word, None)),
        Some((head, rest)) => {
            let unit = rest
                .strip_suffix(')')
                .filter(|u| !u.is_empty() && !u.contains(['(', ')']))
                .ok_or_else(|| format!("malformed unit in '{word}'"))?;
            Ok((head, Some(unit.to_string())))
        }
    }
}

fn unit_suffix(unit: &Option<String>) -> String {
    unit.as_ref().map(|u| format!("({u})")).unwrap_or_default()
}

fn numbers<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Vec<f64>, String> {
    words.map(parse_number).collect()
}

fn parse_point(word: &str) -> Result<PerimeterPoint, String> {
    let (command, coords) = split_unit(word)?;
    let command: PathCommand = command
        .parse()
        .map_err(|_| format!("unknown perimeter command '{command}'"))?;
    let coords = coords.ok_or_else(|| format!("'{word}' has no coordinates"))?;
    let (y, z) = coords
        .split_once(',')
        .ok_or_else(|| format!("'{word}' needs two comma-separated coordinates"))?;
    Ok(PerimeterPoint {
        command,
        y: parse_number(y)?,
        z: parse_number(z)?,
    })
}
