//! Record grammars, one module per keyword.

mod axis;
mod load;
mod material;
mod prop_2d;
mod prop_mass;
mod prop_spring;
mod section;
mod section_comp;
mod section_steel;

pub use axis::{Axis, AxisKind};
pub use load::{IncludeType, LoadDirection, LoadGravity, LoadTitle, LoadType};
pub use material::{AnalysisMaterial, AnalysisMaterialKind, MaterialType};
pub use prop_2d::{AxisRef, Prop2d, Prop2dReferencePoint, Prop2dType};
pub use prop_mass::{MassModification, PropMass};
pub use prop_spring::{PropSpring, SpringKind, SpringType};
pub use section::{Environment, MemberType, Section, SectionReferencePoint};
pub use section_comp::{Reflect, SectionComponent, TaperType};
pub use section_steel::{LockType, PlateType, SectionSteel, SteelSectionType};
