// Re-export parry for the active float size
pub use parry3d_f64 as parry3d;

// Our Real scalar type:
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used across the crate.
/// Can be overridden:
///  1) **Build-time**: set env var `PARTFORGE_TOLERANCE`
///     (e.g. `PARTFORGE_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before building any part
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Plane-side classification epsilon for BSP splitting, in millimetres.
pub const EPSILON: Real = 1e-5;

#[inline]
const fn default_tolerance() -> Real {
    1e-6
}

/// Returns the current tolerance value.
/// If not set yet, it tries `PARTFORGE_TOLERANCE` (parsed as `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("PARTFORGE_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;
/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;
/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Fabrication constants
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Smallest radius a hole cylinder may have; smaller diameters are clamped up.
pub const MIN_RADIUS: Real = 0.1;

/// Tessellation of every catalog cylinder.
pub const CYLINDER_SECTIONS: usize = 32;

/// Length of a penetrating tool as a multiple of the material it must clear.
/// Must stay at or above 2.0: coincident tool and body faces produce
/// non-manifold boundaries in the boolean stage.
pub const PENETRATION_FACTOR: Real = 3.0;

/// Width of a slot as a fraction of the plate extent perpendicular to it.
pub const SLOT_WIDTH_FRACTION: Real = 0.4;

const _: () = assert!(PENETRATION_FACTOR >= 2.0);
