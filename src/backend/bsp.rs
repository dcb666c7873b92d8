use super::BooleanBackend;
use crate::errors::BuildError;
use crate::mesh::Mesh;
use crate::recipe::{Op, Operand};
use crate::traits::CSGOps;
use tracing::debug;

/// BSP-tree booleans on polygon meshes. Always available.
///
/// A single [`apply`](BooleanBackend::apply) returns the raw polygon soup;
/// [`compose`](BooleanBackend::compose) repairs the T-junctions the plane
/// splits leave behind, so its result is a closed surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct BspBackend;

impl BooleanBackend for BspBackend {
    fn name(&self) -> &'static str {
        "bsp"
    }

    fn apply(&self, body: &Mesh, op: Op, tool: &Mesh) -> Result<Mesh, BuildError> {
        let result = match op {
            Op::Union => body.union(tool),
            Op::Subtract => body.difference(tool),
        };
        if result.is_empty() {
            let reason = format!("{op:?} produced an empty solid");
            return Err(BuildError::geometry(self.name(), reason));
        }
        Ok(result)
    }

    fn compose(&self, base: Mesh, steps: &[Operand]) -> Result<Mesh, BuildError> {
        let body = steps.iter().try_fold(base, |body, step| {
            debug!(label = step.label, op = ?step.op, "bsp boolean");
            self.apply(&body, step.op, &step.tool)
        })?;
        Ok(body.repair_t_junctions())
    }
}
