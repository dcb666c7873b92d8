//! Quick-release plate with a row of three screw holes.

use crate::errors::BuildError;
use crate::params::{ParamSpec, Resolved};
use crate::placement::PlateFrame;
use crate::recipe::Recipe;
use nalgebra::Vector3;

pub const SLUG: &str = "qr-plate";
pub const ALIASES: &[&str] = &["quick-release-plate", "arca-plate", "camera-plate"];

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("length", 90.0).aliases(&["length_mm"]).range(20.0, 400.0),
    ParamSpec::number("width", 38.0).aliases(&["width_mm"]).range(10.0, 400.0),
    ParamSpec::number("thickness", 8.0).aliases(&["thickness_mm"]).range(1.0, 50.0),
    ParamSpec::number("slot_mm", 22.0).aliases(&["slot"]).range(0.0, 300.0),
    ParamSpec::diameter("screw_d_mm", 6.5).aliases(&["screw"]).at_most(20.0),
    ParamSpec::holes("holes"),
];

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let length = p.number("length")?;
    let width = p.number("width")?;
    let thickness = p.number("thickness")?;
    let spacing = p.number("slot_mm")?;
    let screw_d = p.diameter("screw_d_mm")?;
    let holes = p.holes("holes")?;

    let plate = PlateFrame::centered_xy(Vector3::new(length, width, thickness));

    let tools = if holes.is_empty() {
        let s = spacing / 2.0;
        [0.0, s, -s]
            .into_iter()
            .map(|u| plate.through_hole(u, 0.0, screw_d))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        holes
            .iter()
            .map(|h| plate.through_hole(h.x_mm, h.z_mm, h.d_mm))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Recipe::new(plate.solid()?).subtract_all("hole", tools))
}
