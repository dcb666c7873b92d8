//! Parametric, 3D-printable parts built from primitives and **Constructive
//! Solid Geometry (CSG)** subtraction on polygons stored in [BSP](mesh::bsp)
//! trees.
//!
//! A part is named by its family (`"vesa-adapter"`, `"cable-tray"`, ...) and
//! a flat map of numeric parameters. [`build`] resolves the parameters against
//! the family's table of defaults and bounds, turns them into a
//! [`Recipe`](recipe::Recipe) of placed primitives and boolean steps, and
//! composes that recipe through the selected [boolean backend](backend).
//!
//! ```
//! use partforge::{build, params::params_from_json};
//!
//! let params = params_from_json(r#"{"width": 180, "height": 180, "thickness": 6}"#).unwrap();
//! let plate = build("vesa-adapter", &params).unwrap();
//! assert!(plate.volume() > 0.0);
//! ```
//!
//! # Features
//! #### Default
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//!
//! #### Optional
//! - **parallel**: use rayon for multithreading
//! - **bmesh**: exact boolean backend on top of `boolmesh`

#![forbid(unsafe_code)]
#![warn(unused)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod backend;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod params;
pub mod placement;
pub mod recipe;
pub mod traits;
pub mod triangulated;

#[cfg(feature = "bmesh")]
pub mod bmesh;

pub use catalog::{Family, ModelBuilder, build};
pub use errors::BuildError;
pub use mesh::Mesh;
pub use traits::CSGOps;
