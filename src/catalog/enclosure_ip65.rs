//! Open-top electronics enclosure with cable entries through the front wall.

use crate::errors::BuildError;
use crate::params::{ParamSpec, Resolved};
use crate::placement::{Axis, PlateFrame};
use crate::recipe::Recipe;
use nalgebra::{Point3, Vector3};

pub const SLUG: &str = "enclosure-ip65";
pub const ALIASES: &[&str] = &["enclosure", "ip65-enclosure", "project-box"];

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("length", 120.0).aliases(&["length_mm"]).range(20.0, 500.0),
    ParamSpec::number("width", 68.0).aliases(&["width_mm"]).range(20.0, 500.0),
    ParamSpec::number("height", 45.0).aliases(&["height_mm"]).range(10.0, 300.0),
    ParamSpec::number("wall", 3.0).aliases(&["thickness_mm"]).range(1.0, 20.0),
    ParamSpec::holes("holes"),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let length = p.number("length")?;
    let width = p.number("width")?;
    let height = p.number("height")?;
    let wall = p.number("wall")?;
    let holes = p.holes("holes")?;

    let body = PlateFrame::new(Point3::origin(), Vector3::new(length, width, height), Axis::Z);
    let front = PlateFrame::new(Point3::origin(), Vector3::new(length, wall, height), Axis::Y);
    let entries = holes
        .iter()
        .map(|h| front.through_hole(h.x_mm, h.z_mm, h.d_mm))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Recipe::new(body.solid()?)
        .subtract("cavity", body.pocket(wall, wall, "wall")?)
        .subtract_all("cable-entry", entries))
}
