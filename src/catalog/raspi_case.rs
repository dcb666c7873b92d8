//! Open-top tray for a Raspberry Pi board, with the board's mounting holes.

use crate::errors::BuildError;
use crate::float_types::Real;
use crate::params::{ParamSpec, Resolved};
use crate::placement::PlateFrame;
use crate::recipe::Recipe;
use nalgebra::Vector3;
use tracing::debug;

pub const SLUG: &str = "raspi-case";
pub const ALIASES: &[&str] = &["raspberry-pi-case", "pi-case"];

/// Mounting hole pitch of the board, along its width and length.
pub const MOUNT_PITCH: (Real, Real) = (58.0, 49.0);

/// Distance from the board corner to the first mounting hole centre.
pub const MOUNT_INSET: Real = 3.5;

pub const PARAMS: &[ParamSpec] = &[
    ParamSpec::number("board_w", 85.0).aliases(&["length_mm"]).range(20.0, 300.0),
    ParamSpec::number("board_l", 56.0).aliases(&["width_mm"]).range(20.0, 300.0),
    ParamSpec::number("board_h", 17.0).aliases(&["height_mm"]).range(5.0, 100.0),
    ParamSpec::number("wall", 2.2).aliases(&["thickness_mm"]).range(0.8, 10.0),
    ParamSpec::flag("mount_holes", true),
    ParamSpec::diameter("mount_hole_d", 2.75).at_most(6.0),
];

/// Face coordinates of the mounting holes on the floor, or none when the
/// board is too small to carry the pattern.
pub fn mount_positions(board_w: Real, board_l: Real) -> Vec<(Real, Real)> {
    let (px, py) = MOUNT_PITCH;
    if board_w < px + 2.0 * MOUNT_INSET || board_l < py + 2.0 * MOUNT_INSET {
        return Vec::new();
    }
    let x0 = -board_w / 2.0 + MOUNT_INSET;
    let y0 = -board_l / 2.0 + MOUNT_INSET;
    vec![(x0, y0), (x0 + px, y0), (x0, y0 + py), (x0 + px, y0 + py)]
}

pub(crate) fn recipe(p: &Resolved) -> Result<Recipe, BuildError> {
    let board_w = p.number("board_w")?;
    let board_l = p.number("board_l")?;
    let board_h = p.number("board_h")?;
    let wall = p.number("wall")?;
    let mount_holes = p.flag("mount_holes")?;
    let hole_d = p.diameter("mount_hole_d")?;

    let case = PlateFrame::centered_xy(Vector3::new(
        board_w + 2.0 * wall,
        board_l + 2.0 * wall,
        board_h + wall,
    ));
    let mut recipe =
        Recipe::new(case.solid()?).subtract("cavity", case.pocket(wall, wall, "wall")?);

    if mount_holes {
        let positions = mount_positions(board_w, board_l);
        if positions.is_empty() {
            debug!(board_w, board_l, "board too small for the mounting pattern");
        }
        let floor = PlateFrame::centered_xy(Vector3::new(case.length(), case.width(), wall));
        let tools = positions
            .into_iter()
            .map(|(u, v)| floor.through_hole(u, v, hole_d))
            .collect::<Result<Vec<_>, _>>()?;
        recipe = recipe.subtract_all("mount-hole", tools);
    }

    Ok(recipe)
}
