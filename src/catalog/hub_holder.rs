//! Open-top sleeve that holds a USB hub with a little play.

use crate::errors::BuildError;
use crate::params::{ParamSpec, Resolved};
use crate::placement::{Axis, PlateFrame};
use crate::recipe::Recipe;
use nalgebra::{Point3, Vector3};

pub const SLUG: &str = "hub-holder";
pub const ALIASES: &[&str] = &["usb-hub-holder", "hub-mount"];

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("hub_w", 100.0).range(10.0, 400.0),
    ParamSpec::number("hub_h", 28.0).range(5.0, 200.0),
    ParamSpec::number("hub_d", 30.0).range(5.0, 200.0),
    ParamSpec::number("tolerance", 0.5).aliases(&["clearance"]).range(0.0, 5.0),
    ParamSpec::number("wall", 3.0).aliases(&["thickness_mm"]).range(1.0, 20.0),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let play = 2.0 * p.number("tolerance")?;
    let inner = Vector3::new(
        p.number("hub_w")? + play,
        p.number("hub_d")? + play,
        p.number("hub_h")? + play,
    );
    let wall = p.number("wall")?;

    let outer = PlateFrame::new(
        Point3::new(-inner.x / 2.0 - wall, -inner.y / 2.0 - wall, 0.0),
        inner + Vector3::new(2.0 * wall, 2.0 * wall, wall),
        Axis::Z,
    );
    Ok(Recipe::new(outer.solid()?).subtract("sleeve", outer.pocket(wall, wall, "wall")?))
}
