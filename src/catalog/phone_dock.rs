//! Desk dock: a base with a tall backrest and a low front lip.

use crate::errors::BuildError;
use crate::float_types::Real;
use crate::params::{ParamSpec, Resolved};
use crate::placement::{Axis, PlateFrame};
use crate::recipe::Recipe;
use nalgebra::{Point3, Vector3};

pub const SLUG: &str = "phone-dock";
pub const ALIASES: &[&str] = &["phone-holder", "dock"];

/// Backrest height as a fraction of the base depth.
pub const BACKREST_FRACTION: Real = 0.7;

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("base_w", 90.0).aliases(&["length_mm"]).range(20.0, 300.0),
    ParamSpec::number("base_d", 110.0).aliases(&["width_mm"]).range(20.0, 300.0),
    ParamSpec::number("wall", 4.0).aliases(&["thickness_mm"]).range(1.0, 20.0),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let base_w = p.number("base_w")?;
    let base_d = p.number("base_d")?;
    let wall = p.number("wall")?;

    let base = PlateFrame::new(Point3::origin(), Vector3::new(base_w, base_d, wall), Axis::Z);
    let backrest = base.block(
        Vector3::new(0.0, 0.0, wall),
        Vector3::new(base_w, wall, BACKREST_FRACTION * base_d),
    )?;
    let lip = base.block(
        Vector3::new(0.0, base_d - wall, wall),
        Vector3::new(base_w, wall, wall),
    )?;

    Ok(Recipe::new(base.solid()?).union("backrest", backrest).union("lip", lip))
}
