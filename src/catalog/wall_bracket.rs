//! L-shaped bracket: a base flange and an upright, both screwed through.

use crate::errors::BuildError;
use crate::params::{ParamSpec, Resolved};
use crate::placement::{Axis, PlateFrame};
use crate::recipe::Recipe;
use nalgebra::{Point3, Vector3};

pub const SLUG: &str = "wall-bracket";
pub const ALIASES: &[&str] = &["bracket", "l-bracket"];

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("length", 120.0).aliases(&["length_mm"]).range(20.0, 500.0),
    ParamSpec::number("width", 40.0).aliases(&["width_mm"]).range(10.0, 300.0),
    ParamSpec::number("height", 80.0).aliases(&["height_mm"]).range(10.0, 500.0),
    ParamSpec::number("thickness", 4.0).aliases(&["thickness_mm"]).range(1.0, 20.0),
    ParamSpec::diameter("hole_d_mm", 4.5).aliases(&["screw_d_mm", "hole"]).at_most(20.0),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let length = p.number("length")?;
    let width = p.number("width")?;
    let height = p.number("height")?;
    let thickness = p.number("thickness")?;
    let hole_d = p.diameter("hole_d_mm")?;

    // Upright holes sit a quarter height from the base; wider ones would bite into it
    if hole_d >= width.min(height / 2.0) {
        return Err(BuildError::invalid_dimension("hole_d_mm", hole_d));
    }

    let base = PlateFrame::new(Point3::origin(), Vector3::new(length, width, thickness), Axis::Z);
    let upright = PlateFrame::new(
        Point3::new(length - thickness, 0.0, thickness),
        Vector3::new(thickness, width, height),
        Axis::X,
    );

    let base_holes = [-0.25, 0.25]
        .into_iter()
        .map(|f| base.through_hole(f * length, 0.0, hole_d))
        .collect::<Result<Vec<_>, _>>()?;
    let upright_holes = [-0.25, 0.25]
        .into_iter()
        .map(|f| upright.through_hole(0.0, f * height, hole_d))
        .collect::<Result<Vec<_>, _>>()?;

    // Each flange is drilled before the next one joins it
    Ok(Recipe::new(base.solid()?)
        .subtract_all("base-hole", base_holes)
        .union("upright", upright.solid()?)
        .subtract_all("upright-hole", upright_holes))
}
