//! Export of finished parts.

#[cfg(feature = "stl-io")]
pub mod stl;
