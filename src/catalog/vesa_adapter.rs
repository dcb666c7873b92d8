//! Flat adapter plate with a VESA mounting hole pattern.

use crate::errors::BuildError;
use crate::float_types::Real;
use crate::params::{ParamSpec, Resolved};
use crate::placement::PlateFrame;
use crate::recipe::Recipe;
use nalgebra::Vector3;
use tracing::debug;

pub const SLUG: &str = "vesa-adapter";
pub const ALIASES: &[&str] = &["vesa", "vesa-plate", "monitor-adapter"];

/// Standard hole pitches, horizontal x vertical.
pub const PATTERNS: &[&str] = &[
    "50x50", "75x75", "100x100", "100x200", "200x100", "200x200", "300x300", "400x400",
];

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("width", 120.0)
        .aliases(&["width_mm", "length_mm"])
        .range(20.0, 1000.0),
    ParamSpec::number("height", 120.0)
        .aliases(&["height_mm", "plate_height_mm"])
        .range(20.0, 1000.0),
    ParamSpec::number("thickness", 5.0).aliases(&["thickness_mm"]).range(1.0, 50.0),
    ParamSpec::text("pattern", "100x100", PATTERNS).aliases(&["vesa", "vesa_mm"]),
    ParamSpec::diameter("hole_d_mm", 5.0).aliases(&["hole", "hole_mm"]).at_most(30.0),
    ParamSpec::number("clearance", 7.5).aliases(&["margin"]).range(0.5, 100.0),
    ParamSpec::holes("holes"),
];

/// Hole pitch of a pattern such as `"100x200"`.
pub fn pattern_pitch(pattern: &str) -> Result<(Real, Real), BuildError> {
    let invalid =
        || BuildError::invalid_parameter("pattern", format!("malformed pattern `{pattern}`"));
    let (x, y) = pattern.split_once('x').ok_or_else(invalid)?;
    let x: Real = x.parse().map_err(|_| invalid())?;
    let y: Real = y.parse().map_err(|_| invalid())?;
    Ok((x, y))
}

/// Smallest plate side that keeps `clearance` of material outside a row of
/// holes `pitch` apart.
pub fn min_plate_side(pitch: Real, hole_d: Real, clearance: Real) -> Real {
    pitch + hole_d + 2.0 * clearance
}

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let width = p.number("width")?;
    let height = p.number("height")?;
    let thickness = p.number("thickness")?;
    let hole_d = p.diameter("hole_d_mm")?;
    let clearance = p.number("clearance")?;
    let holes = p.holes("holes")?;

    if !holes.is_empty() {
        let plate = PlateFrame::centered_xy(Vector3::new(width, height, thickness));
        let tools = holes
            .iter()
            .map(|h| plate.through_hole(h.x_mm, h.z_mm, h.d_mm))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Recipe::new(plate.solid()?).subtract_all("hole", tools));
    }

    let (px, py) = pattern_pitch(p.choice("pattern")?)?;
    let plate_width = width.max(min_plate_side(px, hole_d, clearance));
    let plate_height = height.max(min_plate_side(py, hole_d, clearance));
    if plate_width > width || plate_height > height {
        debug!(plate_width, plate_height, "plate grown to fit the hole pattern");
    }

    let plate = PlateFrame::centered_xy(Vector3::new(plate_width, plate_height, thickness));
    let (sx, sy) = (px / 2.0, py / 2.0);
    let tools = [(sx, sy), (-sx, sy), (sx, -sy), (-sx, -sy)]
        .into_iter()
        .map(|(u, v)| plate.through_hole(u, v, hole_d))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Recipe::new(plate.solid()?).subtract_all("vesa-hole", tools))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_parses() {
        for pattern in PATTERNS {
            let (x, y) = pattern_pitch(pattern).unwrap();
            assert!(x >= 50.0 && y >= 50.0);
        }
        assert_eq!(pattern_pitch("100x200").unwrap(), (100.0, 200.0));
    }

    #[test]
    fn default_plate_fits_the_default_pattern() {
        assert_eq!(min_plate_side(100.0, 5.0, 7.5), 120.0);
    }
}
