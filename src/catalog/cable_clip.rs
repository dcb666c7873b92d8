//! Small tab with a pass-through hole for one cable.

use crate::errors::BuildError;
use crate::float_types::Real;
use crate::params::{ParamSpec, Resolved};
use crate::placement::PlateFrame;
use crate::recipe::Recipe;
use nalgebra::Vector3;

pub const SLUG: &str = "cable-clip";
pub const ALIASES: &[&str] = &["clip"];

pub const MIN_LENGTH: Real = 18.0;

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("diameter", 8.0).aliases(&["cable_d_mm", "d"]).range(0.5, 60.0),
    ParamSpec::number("width", 12.0).aliases(&["width_mm"]).range(4.0, 100.0),
    ParamSpec::number("thickness", 2.4).aliases(&["thickness_mm"]).range(0.8, 20.0),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let diameter = p.number("diameter")?;
    let width = p.number("width")?;
    let thickness = p.number("thickness")?;
    let length = MIN_LENGTH.max(2.2 * diameter);

    let plate = PlateFrame::centered_xy(Vector3::new(length, width, thickness));
    Ok(Recipe::new(plate.solid()?).subtract("cable-hole", plate.through_hole(0.0, 0.0, diameter)?))
}
