//! Base plate with a retention lip, a central slot and screw holes.

use crate::errors::BuildError;
use crate::float_types::{Real, SLOT_WIDTH_FRACTION};
use crate::params::{ParamSpec, Resolved};
use crate::placement::{Axis, PlateFrame};
use crate::recipe::Recipe;
use nalgebra::{Point3, Vector3};

pub const SLUG: &str = "router-mount";
pub const ALIASES: &[&str] = &["router", "router-bracket"];

/// Guide hole positions as fractions of the plate length.
pub const GUIDE_HOLES: [Real; 3] = [-0.25, 0.0, 0.25];

/// Longest slot, as a fraction of the plate length.
pub const MAX_SLOT_FRACTION: Real = 0.6;

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("length", 120.0)
        .aliases(&["router_width", "length_mm"])
        .range(30.0, 500.0),
    ParamSpec::number("width", 80.0)
        .aliases(&["router_depth", "width_mm"])
        .range(20.0, 400.0),
    ParamSpec::number("thickness", 4.0).aliases(&["thickness_mm"]).range(1.0, 20.0),
    ParamSpec::number("lip_height", 20.0).aliases(&["lip_h"]).range(2.0, 200.0),
    ParamSpec::number("slot_mm", 22.0).aliases(&["slot"]).range(1.0, 300.0),
    ParamSpec::diameter("screw_d_mm", 4.5).aliases(&["screw"]).at_most(20.0),
    ParamSpec::holes("holes"),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let length = p.number("length")?;
    let width = p.number("width")?;
    let thickness = p.number("thickness")?;
    let lip_height = p.number("lip_height")?;
    let slot = p.number("slot_mm")?.min(MAX_SLOT_FRACTION * length);
    let screw_d = p.diameter("screw_d_mm")?;
    let holes = p.holes("holes")?;

    let base = PlateFrame::new(Point3::origin(), Vector3::new(length, width, thickness), Axis::Z);

    let lip = base.block(
        Vector3::new(0.0, width - thickness, thickness),
        Vector3::new(length, thickness, lip_height),
    )?;

    let free_holes = holes
        .iter()
        .map(|h| base.through_hole(h.x_mm, h.z_mm, h.d_mm))
        .collect::<Result<Vec<_>, _>>()?;

    // Base cutters reach above the plate, so they go in before the lip
    Ok(Recipe::new(base.solid()?)
        .subtract("slot", base.slot(0.0, 0.0, slot, SLOT_WIDTH_FRACTION)?)
        .subtract_all("guide-hole", base.guide_holes(&GUIDE_HOLES, screw_d)?)
        .subtract_all("hole", free_holes)
        .union("lip", lip))
}
