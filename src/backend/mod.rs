//! Boolean backends and the process-wide choice between them.

use crate::config::{BackendPreference, Settings};
use crate::errors::BuildError;
use crate::mesh::Mesh;
use crate::recipe::{Op, Operand};
use std::fmt::Debug;
use std::sync::OnceLock;
use tracing::info;

mod bsp;

pub use bsp::BspBackend;

#[cfg(feature = "bmesh")]
pub use crate::bmesh::ExactBackend;

/// Strategy for applying boolean steps to a solid.
pub trait BooleanBackend: Send + Sync + Debug {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Apply one boolean step.
    fn apply(&self, body: &Mesh, op: Op, tool: &Mesh) -> Result<Mesh, BuildError>;

    /// Apply every step in order, starting from `base`.
    fn compose(&self, base: Mesh, steps: &[Operand]) -> Result<Mesh, BuildError> {
        steps
            .iter()
            .try_fold(base, |body, step| self.apply(&body, step.op, &step.tool))
    }
}

/// Whether the exact backend was compiled into this build.
pub const fn exact_available() -> bool {
    cfg!(feature = "bmesh")
}

/// The backend `preference` resolves to in this build.
pub fn select(preference: BackendPreference) -> Box<dyn BooleanBackend> {
    match preference {
        BackendPreference::Bsp => Box::new(BspBackend),
        BackendPreference::Auto | BackendPreference::Exact => {
            #[cfg(feature = "bmesh")]
            {
                Box::new(ExactBackend)
            }
            #[cfg(not(feature = "bmesh"))]
            {
                if preference == BackendPreference::Exact {
                    tracing::warn!("exact backend requested but not compiled in; using bsp");
                }
                Box::new(BspBackend)
            }
        },
    }
}

/// The backend for this process, chosen once from [`Settings::global`].
pub fn global() -> &'static dyn BooleanBackend {
    static BACKEND: OnceLock<Box<dyn BooleanBackend>> = OnceLock::new();
    BACKEND
        .get_or_init(|| {
            let preference = Settings::global().backend;
            let backend = select(preference);
            info!(?preference, backend = backend.name(), "boolean backend selected");
            backend
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bsp_preference_is_honoured() {
        assert_eq!(select(BackendPreference::Bsp).name(), "bsp");
    }

    #[test]
    fn auto_matches_build() {
        let expected = if exact_available() { "exact" } else { "bsp" };
        assert_eq!(select(BackendPreference::Auto).name(), expected);
        assert_eq!(select(BackendPreference::Exact).name(), expected);
    }

    #[test]
    fn global_is_stable() {
        let a = global() as *const dyn BooleanBackend as *const ();
        let b = global() as *const dyn BooleanBackend as *const ();
        assert_eq!(a, b);
    }
}
