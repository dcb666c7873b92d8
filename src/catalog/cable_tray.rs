//! Open U-channel tray with optional floor ventilation.

use crate::errors::BuildError;
use crate::float_types::{PENETRATION_FACTOR, Real};
use crate::params::{ParamSpec, Resolved};
use crate::placement::{Axis, Placement, PlateFrame};
use crate::recipe::{Feature, Primitive, Recipe};
use nalgebra::{Point3, Vector3};

pub const SLUG: &str = "cable-tray";
pub const ALIASES: &[&str] = &["tray", "cable-channel"];

/// Largest ventilation hole diameter.
pub const MAX_VENT_DIAMETER: Real = 8.0;

/// Floor length per ventilation hole.
pub const VENT_PITCH: Real = 30.0;

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("length", 180.0).aliases(&["length_mm"]).range(20.0, 1000.0),
    ParamSpec::number("width", 60.0).aliases(&["width_mm"]).range(10.0, 400.0),
    ParamSpec::number("height", 25.0).aliases(&["height_mm"]).range(5.0, 300.0),
    ParamSpec::number("thickness", 3.0).aliases(&["wall", "thickness_mm"]).range(0.8, 20.0),
    ParamSpec::flag("ventilated", false).aliases(&["vents"]),
    ParamSpec::holes("holes"),
];

/// Wall thickness actually used: thin enough to leave a channel.
pub fn wall_thickness(thickness: Real, width: Real, height: Real) -> Real {
    thickness.min(width / 4.0).min(height / 2.0)
}

/// `u` offsets and diameter of the floor ventilation holes.
pub fn vent_layout(length: Real, width: Real, wall: Real) -> (Vec<Real>, Real) {
    let n = ((length / VENT_PITCH).floor() as usize).max(1);
    let step = length / (n + 1) as Real;
    let offsets = (1..=n).map(|i| -length / 2.0 + step * i as Real).collect();
    (offsets, MAX_VENT_DIAMETER.min(0.5 * (width - 2.0 * wall)))
}

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let length = p.number("length")?;
    let width = p.number("width")?;
    let height = p.number("height")?;
    let wall = wall_thickness(p.number("thickness")?, width, height);
    let ventilated = p.flag("ventilated")?;
    let holes = p.holes("holes")?;

    let outer = PlateFrame::new(Point3::origin(), Vector3::new(length, width, height), Axis::Z);

    // Runs past both ends and out through the top
    let over = PENETRATION_FACTOR * wall;
    let channel = Feature::new(
        Primitive::cuboid(Vector3::new(
            length + 2.0 * over,
            width - 2.0 * wall,
            height - wall + over,
        ))?,
        Placement::translation(Vector3::new(-over, wall, wall)),
    );

    let mut recipe = Recipe::new(outer.solid()?).subtract("channel", channel);

    if ventilated {
        let floor = PlateFrame::new(Point3::origin(), Vector3::new(length, width, wall), Axis::Z);
        let (offsets, diameter) = vent_layout(length, width, wall);
        let vents = offsets
            .iter()
            .map(|u| floor.through_hole(*u, 0.0, diameter))
            .collect::<Result<Vec<_>, _>>()?;
        recipe = recipe.subtract_all("vent", vents);
    }

    let wall_extents = Vector3::new(length, wall, height);
    let walls = [
        PlateFrame::new(Point3::origin(), wall_extents, Axis::Y),
        PlateFrame::new(Point3::new(0.0, width - wall, 0.0), wall_extents, Axis::Y),
    ];
    for side in &walls {
        let tools = holes
            .iter()
            .map(|h| side.through_hole(h.x_mm, h.z_mm, h.d_mm))
            .collect::<Result<Vec<_>, _>>()?;
        recipe = recipe.subtract_all("side-hole", tools);
    }

    Ok(recipe)
}
