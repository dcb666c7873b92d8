//! Flat screw-on hook: a drilled back plate with an L-shaped hook beside it.

use crate::errors::BuildError;
use crate::float_types::Real;
use crate::params::{ParamSpec, Resolved};
use crate::placement::PlateFrame;
use crate::recipe::Recipe;
use nalgebra::Vector3;

pub const SLUG: &str = "wall-hook";
pub const ALIASES: &[&str] = &["wall-bracket-hook", "hook"];

/// Gap between the bottom edge of the plate and the hook arm.
pub const ARM_INSET: Real = 2.0;

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("base_w", 40.0).aliases(&["width_mm"]).range(10.0, 300.0),
    ParamSpec::number("base_h", 60.0).aliases(&["height_mm"]).range(10.0, 300.0),
    ParamSpec::number("wall", 3.5).aliases(&["thickness_mm"]).range(1.0, 20.0),
    ParamSpec::number("hook_depth", 35.0).range(5.0, 300.0),
    ParamSpec::number("hook_height", 35.0).range(5.0, 300.0),
    ParamSpec::number("hook_t", 8.0).range(2.0, 50.0),
    ParamSpec::diameter("hole_d", 4.5).aliases(&["hole_d_mm", "screw_d_mm"]).at_most(20.0),
    ParamSpec::number("hole_off", 12.0).range(3.0, 150.0),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let base_w = p.number("base_w")?;
    let base_h = p.number("base_h")?;
    let wall = p.number("wall")?;
    let depth = p.number("hook_depth")?;
    let height = p.number("hook_height")?;
    let hook_t = p.number("hook_t")?.min(depth);
    let hole_d = p.diameter("hole_d")?;
    let hole_off = p.number("hole_off")?;

    // A hole must not break out of the plate edge it is measured from
    if hole_d / 2.0 >= hole_off.min(base_w / 2.0) {
        return Err(BuildError::invalid_dimension("hole_d", hole_d));
    }

    let plate = PlateFrame::centered_xy(Vector3::new(base_w, base_h, wall));
    let v = base_h / 2.0 - hole_off;
    let holes = [v, -v]
        .into_iter()
        .map(|v| plate.through_hole(0.0, v, hole_d))
        .collect::<Result<Vec<_>, _>>()?;

    let arm = plate.block(
        Vector3::new(base_w, ARM_INSET, 0.0),
        Vector3::new(depth, hook_t, wall),
    )?;
    let lip = plate.block(
        Vector3::new(base_w + depth - hook_t, ARM_INSET, 0.0),
        Vector3::new(hook_t, height, wall),
    )?;

    Ok(Recipe::new(plate.solid()?)
        .subtract_all("hole", holes)
        .union("arm", arm)
        .union("lip", lip))
}
