//! Monitor riser: a top shelf on two legs, with a tunnel underneath.

use crate::errors::BuildError;
use crate::float_types::PENETRATION_FACTOR;
use crate::params::{ParamSpec, Resolved};
use crate::placement::{Axis, PlateFrame};
use crate::recipe::Recipe;
use nalgebra::{Point3, Vector3};

pub const SLUG: &str = "monitor-stand";
pub const ALIASES: &[&str] = &["monitor-riser", "screen-riser"];

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("width", 400.0).aliases(&["length_mm"]).range(50.0, 1000.0),
    ParamSpec::number("depth", 200.0).aliases(&["width_mm"]).range(30.0, 600.0),
    ParamSpec::number("height", 70.0).aliases(&["height_mm"]).range(10.0, 300.0),
    ParamSpec::number("wall", 4.0).aliases(&["thickness_mm"]).range(1.0, 30.0),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let width = p.number("width")?;
    let depth = p.number("depth")?;
    let height = p.number("height")?;
    let wall = p.number("wall")?;

    if 2.0 * wall >= width || wall >= height {
        return Err(BuildError::invalid_dimension("wall", wall));
    }

    let body = PlateFrame::new(Point3::origin(), Vector3::new(width, depth, height), Axis::Z);

    // Open to the front, the back and the floor
    let over = PENETRATION_FACTOR * wall;
    let tunnel = body.block(
        Vector3::new(wall, -over, -over),
        Vector3::new(width - 2.0 * wall, depth + 2.0 * over, height - wall + over),
    )?;

    Ok(Recipe::new(body.solid()?).subtract("tunnel", tunnel))
}
