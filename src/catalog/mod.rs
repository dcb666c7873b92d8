//! The part catalog: family registry and the model builder.

use crate::backend::{self, BooleanBackend};
use crate::errors::BuildError;
use crate::mesh::Mesh;
use crate::params::{ParamMap, ParamSpec, Resolved, defaults};
use crate::recipe::Recipe;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

pub mod cable_clip;
pub mod cable_tray;
pub mod enclosure_ip65;
pub mod hub_holder;
pub mod monitor_stand;
pub mod phone_dock;
pub mod qr_plate;
pub mod raspi_case;
pub mod router_mount;
pub mod ssd_holder;
pub mod vesa_adapter;
pub mod wall_bracket;
pub mod wall_hook;

/// A part family the catalog can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    VesaAdapter,
    RouterMount,
    CableTray,
    QrPlate,
    CableClip,
    WallBracket,
    WallHook,
    SsdHolder,
    HubHolder,
    RaspiCase,
    EnclosureIp65,
    PhoneDock,
    MonitorStand,
}

impl Family {
    pub const ALL: [Family; 13] = [
        Family::VesaAdapter,
        Family::RouterMount,
        Family::CableTray,
        Family::QrPlate,
        Family::CableClip,
        Family::WallBracket,
        Family::WallHook,
        Family::SsdHolder,
        Family::HubHolder,
        Family::RaspiCase,
        Family::EnclosureIp65,
        Family::PhoneDock,
        Family::MonitorStand,
    ];

    /// Canonical kebab-case identifier.
    pub const fn slug(self) -> &'static str {
        match self {
            Family::VesaAdapter => vesa_adapter::SLUG,
            Family::RouterMount => router_mount::SLUG,
            Family::CableTray => cable_tray::SLUG,
            Family::QrPlate => qr_plate::SLUG,
            Family::CableClip => cable_clip::SLUG,
            Family::WallBracket => wall_bracket::SLUG,
            Family::WallHook => wall_hook::SLUG,
            Family::SsdHolder => ssd_holder::SLUG,
            Family::HubHolder => hub_holder::SLUG,
            Family::RaspiCase => raspi_case::SLUG,
            Family::EnclosureIp65 => enclosure_ip65::SLUG,
            Family::PhoneDock => phone_dock::SLUG,
            Family::MonitorStand => monitor_stand::SLUG,
        }
    }

    /// Further identifiers accepted for this family.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Family::VesaAdapter => vesa_adapter::ALIASES,
            Family::RouterMount => router_mount::ALIASES,
            Family::CableTray => cable_tray::ALIASES,
            Family::QrPlate => qr_plate::ALIASES,
            Family::CableClip => cable_clip::ALIASES,
            Family::WallBracket => wall_bracket::ALIASES,
            Family::WallHook => wall_hook::ALIASES,
            Family::SsdHolder => ssd_holder::ALIASES,
            Family::HubHolder => hub_holder::ALIASES,
            Family::RaspiCase => raspi_case::ALIASES,
            Family::EnclosureIp65 => enclosure_ip65::ALIASES,
            Family::PhoneDock => phone_dock::ALIASES,
            Family::MonitorStand => monitor_stand::ALIASES,
        }
    }

    /// Parameter table, with defaults and bounds.
    pub const fn params(self) -> &'static [ParamSpec] {
        match self {
            Family::VesaAdapter => vesa_adapter::PARAMS,
            Family::RouterMount => router_mount::PARAMS,
            Family::CableTray => cable_tray::PARAMS,
            Family::QrPlate => qr_plate::PARAMS,
            Family::CableClip => cable_clip::PARAMS,
            Family::WallBracket => wall_bracket::PARAMS,
            Family::WallHook => wall_hook::PARAMS,
            Family::SsdHolder => ssd_holder::PARAMS,
            Family::HubHolder => hub_holder::PARAMS,
            Family::RaspiCase => raspi_case::PARAMS,
            Family::EnclosureIp65 => enclosure_ip65::PARAMS,
            Family::PhoneDock => phone_dock::PARAMS,
            Family::MonitorStand => monitor_stand::PARAMS,
        }
    }

    /// The documented defaults as a parameter map.
    pub fn default_params(self) -> ParamMap {
        defaults(self.params())
    }

    /// Describe the part for `params` without building it.
    pub fn recipe(self, params: &ParamMap) -> Result<Recipe, BuildError> {
        let resolved = Resolved::new(self.slug(), self.params(), params);
        match self {
            Family::VesaAdapter => vesa_adapter::recipe(&resolved),
            Family::RouterMount => router_mount::recipe(&resolved),
            Family::CableTray => cable_tray::recipe(&resolved),
            Family::QrPlate => qr_plate::recipe(&resolved),
            Family::CableClip => cable_clip::recipe(&resolved),
            Family::WallBracket => wall_bracket::recipe(&resolved),
            Family::WallHook => wall_hook::recipe(&resolved),
            Family::SsdHolder => ssd_holder::recipe(&resolved),
            Family::HubHolder => hub_holder::recipe(&resolved),
            Family::RaspiCase => raspi_case::recipe(&resolved),
            Family::EnclosureIp65 => enclosure_ip65::recipe(&resolved),
            Family::PhoneDock => phone_dock::recipe(&resolved),
            Family::MonitorStand => monitor_stand::recipe(&resolved),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Lowercase, with `_` and spaces folded to `-`.
fn normalize_slug(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for Family {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_slug(s);
        Family::ALL
            .into_iter()
            .find(|family| {
                std::iter::once(family.slug())
                    .chain(family.aliases().iter().copied())
                    .any(|name| normalize_slug(name) == wanted)
            })
            .ok_or_else(|| BuildError::UnknownFamily(s.to_owned()))
    }
}

/// Builds parts through one boolean backend.
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    backend: &'a dyn BooleanBackend,
}

impl<'a> ModelBuilder<'a> {
    pub const fn new(backend: &'a dyn BooleanBackend) -> Self {
        ModelBuilder { backend }
    }

    pub fn backend(&self) -> &'a dyn BooleanBackend {
        self.backend
    }

    /// Build the solid for `family` from `params`.
    pub fn build(&self, family: &str, params: &ParamMap) -> Result<Mesh, BuildError> {
        build_with(self.backend, family, params)
    }
}

impl ModelBuilder<'static> {
    /// Builder over the process-wide backend.
    pub fn global() -> Self {
        ModelBuilder::new(backend::global())
    }
}

#[instrument(skip(backend, params), fields(backend = backend.name()))]
fn build_with(
    backend: &dyn BooleanBackend,
    family: &str,
    params: &ParamMap,
) -> Result<Mesh, BuildError> {
    let family: Family = family.parse()?;
    let recipe = family.recipe(params)?;
    debug!(%family, steps = recipe.steps.len(), "recipe ready");
    recipe.realize(backend)
}

/// Build the solid for `family` from `params` with the process-wide backend.
///
/// # Example
/// ```
/// # use partforge::{build, params::ParamMap};
/// let plate = build("vesa-adapter", &ParamMap::new()).unwrap();
/// assert!(!plate.polygons.is_empty());
/// ```
pub fn build(family: &str, params: &ParamMap) -> Result<Mesh, BuildError> {
    ModelBuilder::global().build(family, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_resolve_loosely() {
        for raw in ["vesa-adapter", "VESA_ADAPTER", " Vesa Adapter ", "vesa"] {
            assert_eq!(raw.parse::<Family>().unwrap(), Family::VesaAdapter, "{raw}");
        }
        assert_eq!("router_mount".parse::<Family>().unwrap(), Family::RouterMount);
        assert_eq!("Cable Tray".parse::<Family>().unwrap(), Family::CableTray);
        assert_eq!("camera_plate".parse::<Family>().unwrap(), Family::QrPlate);
        assert_eq!("enclosure_ip65".parse::<Family>().unwrap(), Family::EnclosureIp65);
        assert_eq!("wall-bracket-hook".parse::<Family>().unwrap(), Family::WallHook);
    }

    #[test]
    fn unknown_family() {
        assert_eq!(
            "toaster".parse::<Family>().unwrap_err(),
            BuildError::UnknownFamily("toaster".into())
        );
    }

    #[test]
    fn slugs_are_unique() {
        for a in Family::ALL {
            for b in Family::ALL {
                if a != b {
                    assert_ne!(a.slug(), b.slug());
                    assert!(!b.aliases().contains(&a.slug()));
                }
            }
            assert_eq!(a.slug().parse::<Family>().unwrap(), a);
        }
    }

    #[test]
    fn every_family_has_a_default_recipe() {
        for family in Family::ALL {
            let recipe = family.recipe(&ParamMap::new()).unwrap();
            assert_eq!(recipe, family.recipe(&family.default_params()).unwrap());
        }
    }
}
