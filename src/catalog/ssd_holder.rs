//! Cradle adapting a 2.5" drive to a wider bay: base, side rails and end stops.

use crate::errors::BuildError;
use crate::float_types::Real;
use crate::params::{ParamSpec, Resolved};
use crate::placement::PlateFrame;
use crate::recipe::Recipe;
use nalgebra::Vector3;

pub const SLUG: &str = "ssd-holder";
pub const ALIASES: &[&str] = &["ssd-bracket", "ssd-caddy"];

/// Narrowest side rail.
pub const MIN_RAIL: Real = 1.0;

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("drive_w", 69.85).range(20.0, 200.0),
    ParamSpec::number("drive_l", 100.0).aliases(&["length_mm"]).range(20.0, 300.0),
    ParamSpec::number("bay_w", 101.6).aliases(&["width_mm"]).range(25.0, 300.0),
    ParamSpec::number("wall", 3.0).aliases(&["thickness_mm"]).range(1.0, 20.0),
    ParamSpec::number("height", 20.0).aliases(&["height_mm"]).range(4.0, 100.0),
    ParamSpec::holes("holes"),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let drive_w = p.number("drive_w")?;
    let drive_l = p.number("drive_l")?;
    let bay_w = p.number("bay_w")?;
    let wall = p.number("wall")?;
    let height = p.number("height")?;
    let holes = p.holes("holes")?;

    // Rails always sit on the base, even when the bay is narrower than the drive
    let rail = MIN_RAIL.max((bay_w - drive_w) / 2.0);
    let base_w = drive_w + 2.0 * rail;

    let base = PlateFrame::centered_xy(Vector3::new(base_w, drive_l, wall));
    let free_holes = holes
        .iter()
        .map(|h| base.through_hole(h.x_mm, h.z_mm, h.d_mm))
        .collect::<Result<Vec<_>, _>>()?;

    let rail_size = Vector3::new(rail, drive_l, height);
    let stop_size = Vector3::new(base_w, wall, height / 2.0);

    Ok(Recipe::new(base.solid()?)
        .subtract_all("hole", free_holes)
        .union("rail", base.block(Vector3::new(0.0, 0.0, wall), rail_size)?)
        .union("rail", base.block(Vector3::new(base_w - rail, 0.0, wall), rail_size)?)
        .union("stop", base.block(Vector3::new(0.0, 0.0, wall), stop_size)?)
        .union("stop", base.block(Vector3::new(0.0, drive_l - wall, wall), stop_size)?))
}
