//! Parts described as data: a base feature followed by boolean steps.

use crate::backend::BooleanBackend;
use crate::errors::{BuildError, require_positive};
use crate::float_types::{CYLINDER_SECTIONS, MIN_RADIUS, Real};
use crate::float_types::parry3d::bounding_volume::{Aabb, BoundingVolume};
use crate::mesh::Mesh;
use crate::placement::Placement;
use crate::traits::CSGOps;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

/// A primitive solid in its local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Box spanning `[0, size]` on each axis
    Cuboid { size: Vector3<Real> },
    /// Cylinder along +Z centred on the Z axis, spanning `z ∈ [0, height]`
    Cylinder { radius: Real, height: Real },
}

impl Primitive {
    pub fn cuboid(size: Vector3<Real>) -> Result<Self, BuildError> {
        require_positive("size.x", size.x)?;
        require_positive("size.y", size.y)?;
        require_positive("size.z", size.z)?;
        Ok(Primitive::Cuboid { size })
    }

    /// A hole-cutting cylinder; diameters below `2 * MIN_RADIUS` are clamped up.
    pub fn hole(diameter: Real, height: Real) -> Result<Self, BuildError> {
        if !diameter.is_finite() {
            return Err(BuildError::invalid_dimension("diameter", diameter));
        }
        Ok(Primitive::Cylinder {
            radius: MIN_RADIUS.max(diameter / 2.0),
            height: require_positive("height", height)?,
        })
    }

    /// Centre of the primitive's own bounding box.
    pub fn local_center(&self) -> Point3<Real> {
        match *self {
            Primitive::Cuboid { size } => Point3::from(size * 0.5),
            Primitive::Cylinder { height, .. } => Point3::new(0.0, 0.0, height * 0.5),
        }
    }

    pub fn realize(&self) -> Result<Mesh, BuildError> {
        match *self {
            Primitive::Cuboid { size } => Mesh::cuboid(size.x, size.y, size.z),
            Primitive::Cylinder { radius, height } => {
                Mesh::cylinder(radius, height, CYLINDER_SECTIONS)
            },
        }
    }
}

/// A primitive together with where it goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    pub primitive: Primitive,
    pub placement: Placement,
}

impl Feature {
    pub const fn new(primitive: Primitive, placement: Placement) -> Self {
        Feature {
            primitive,
            placement,
        }
    }

    pub fn realize(&self) -> Result<Mesh, BuildError> {
        let mesh = self.primitive.realize()?;
        if self.placement.is_identity() {
            return Ok(mesh);
        }
        Ok(mesh.transform(&self.placement.to_matrix()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Union,
    Subtract,
}

/// One boolean step of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub op: Op,
    pub feature: Feature,
    /// Short name used in logs ("lip", "slot", "guide-hole", ...)
    pub label: &'static str,
}

/// A step whose tool has been realised, ready for a backend.
#[derive(Debug, Clone)]
pub struct Operand {
    pub op: Op,
    pub label: &'static str,
    pub tool: Mesh,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub base: Feature,
    pub steps: Vec<Step>,
}

impl Recipe {
    pub const fn new(base: Feature) -> Self {
        Recipe {
            base,
            steps: Vec::new(),
        }
    }

    pub fn union(mut self, label: &'static str, feature: Feature) -> Self {
        self.steps.push(Step {
            op: Op::Union,
            feature,
            label,
        });
        self
    }

    pub fn subtract(mut self, label: &'static str, feature: Feature) -> Self {
        self.steps.push(Step {
            op: Op::Subtract,
            feature,
            label,
        });
        self
    }

    pub fn subtract_all(
        self,
        label: &'static str,
        features: impl IntoIterator<Item = Feature>,
    ) -> Self {
        features
            .into_iter()
            .fold(self, |recipe, feature| recipe.subtract(label, feature))
    }

    /// Realise the tools of every step that can change the body.
    ///
    /// A step equal to an earlier one is dropped, and so is a subtract
    /// tool that cannot reach the body: its bounds miss the base and every
    /// union tool added before it.
    pub fn operands(&self, base: &Mesh) -> Result<Vec<Operand>, BuildError> {
        let mut reach: Aabb = base.bounding_box();
        let mut operands = Vec::with_capacity(self.steps.len());

        for (i, step) in self.steps.iter().enumerate() {
            if self.steps[..i].contains(step) {
                debug!(label = step.label, index = i, "skipping duplicate step");
                continue;
            }
            let tool = step.feature.realize()?;
            match step.op {
                Op::Union => reach.merge(&tool.bounding_box()),
                Op::Subtract if !reach.intersects(&tool.bounding_box()) => {
                    debug!(label = step.label, index = i, "skipping tool outside the body");
                    continue;
                },
                Op::Subtract => {},
            }
            operands.push(Operand {
                op: step.op,
                label: step.label,
                tool,
            });
        }

        Ok(operands)
    }

    /// Build the solid: realise the base, compose the steps through
    /// `backend` and validate the result.
    #[instrument(skip_all, fields(backend = backend.name(), steps = self.steps.len()))]
    pub fn realize(&self, backend: &dyn BooleanBackend) -> Result<Mesh, BuildError> {
        let base = self.base.realize()?;
        let operands = self.operands(&base)?;
        debug!(applied = operands.len(), "composing");
        let body = backend.compose(base, &operands)?;
        body.validate(backend.name())?;
        Ok(body)
    }
}
