//! Rigid placement of features and the plate-frame helpers built on it.

use crate::errors::{BuildError, require_positive};
use crate::float_types::{FRAC_PI_2, PENETRATION_FACTOR, Real};
use crate::recipe::{Feature, Primitive};
use nalgebra::{Isometry3, Matrix4, Point3, Vector3};

/// Rotation (axis scaled by angle in radians) followed by translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rotation: Vector3<Real>,
    pub translation: Vector3<Real>,
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Placement {
    pub fn identity() -> Self {
        Placement {
            rotation: Vector3::zeros(),
            translation: Vector3::zeros(),
        }
    }

    pub fn translation(translation: Vector3<Real>) -> Self {
        Placement {
            rotation: Vector3::zeros(),
            translation,
        }
    }

    /// Rotate a primitive by `rotation`, then move its `local_center` onto `target`.
    ///
    /// # Example
    /// ```
    /// # use nalgebra::{Point3, Vector3};
    /// # use partforge::placement::Placement;
    /// let local = Point3::new(0.0, 0.0, 6.0);
    /// let p = Placement::centered(local, Vector3::zeros(), Point3::new(10.0, 5.0, 2.0));
    /// assert_eq!(p.translation, Vector3::new(10.0, 5.0, -4.0));
    /// ```
    pub fn centered(
        local_center: Point3<Real>,
        rotation: Vector3<Real>,
        target: Point3<Real>,
    ) -> Self {
        let rotated = Isometry3::new(Vector3::zeros(), rotation) * local_center;
        Placement {
            rotation,
            translation: target - rotated,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.rotation == Vector3::zeros() && self.translation == Vector3::zeros()
    }

    pub fn isometry(&self) -> Isometry3<Real> {
        Isometry3::new(self.translation, self.rotation)
    }

    pub fn to_matrix(&self) -> Matrix4<Real> {
        self.isometry().to_homogeneous()
    }

    pub fn apply(&self, point: &Point3<Real>) -> Point3<Real> {
        self.isometry() * point
    }
}

/// Thickness axis of a slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// World axes `(u, v)` of face coordinates on a slab with this thickness axis.
    pub const fn face_axes(self) -> (usize, usize) {
        match self {
            Axis::X => (1, 2),
            Axis::Y => (0, 2),
            Axis::Z => (0, 1),
        }
    }

    /// Axis-angle rotation taking a +Z cylinder onto this axis.
    pub fn cylinder_rotation(self) -> Vector3<Real> {
        match self {
            Axis::X => Vector3::new(0.0, FRAC_PI_2, 0.0),
            Axis::Y => Vector3::new(FRAC_PI_2, 0.0, 0.0),
            Axis::Z => Vector3::zeros(),
        }
    }
}

/// An axis-aligned slab of the body, addressed by face coordinates.
///
/// `(u, v)` are measured from the centre of the slab face; the slab is
/// `extents[axis]` thick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateFrame {
    pub corner: Point3<Real>,
    pub extents: Vector3<Real>,
    pub axis: Axis,
}

impl PlateFrame {
    pub fn new(corner: Point3<Real>, extents: Vector3<Real>, axis: Axis) -> Self {
        PlateFrame {
            corner,
            extents,
            axis,
        }
    }

    /// Slab spanning `[-sx/2, sx/2] × [-sy/2, sy/2] × [0, sz]`.
    pub fn centered_xy(extents: Vector3<Real>) -> Self {
        Self::new(
            Point3::new(-extents.x / 2.0, -extents.y / 2.0, 0.0),
            extents,
            Axis::Z,
        )
    }

    pub fn thickness(&self) -> Real {
        self.extents[self.axis.index()]
    }

    /// Extent along `u`.
    pub fn length(&self) -> Real {
        self.extents[self.axis.face_axes().0]
    }

    /// Extent along `v`.
    pub fn width(&self) -> Real {
        self.extents[self.axis.face_axes().1]
    }

    pub fn center(&self) -> Point3<Real> {
        self.corner + self.extents * 0.5
    }

    /// World point at face coordinates `(u, v)`, halfway through the slab.
    pub fn face_point(&self, u: Real, v: Real) -> Point3<Real> {
        let (iu, iv) = self.axis.face_axes();
        let mut p = self.center();
        p[iu] += u;
        p[iv] += v;
        p
    }

    /// A cylinder that cuts clean through the slab at `(u, v)`.
    pub fn through_hole(&self, u: Real, v: Real, diameter: Real) -> Result<Feature, BuildError> {
        let height = PENETRATION_FACTOR * require_positive("thickness", self.thickness())?;
        let primitive = Primitive::hole(diameter, height)?;
        let placement = Placement::centered(
            primitive.local_center(),
            self.axis.cylinder_rotation(),
            self.face_point(u, v),
        );
        Ok(Feature::new(primitive, placement))
    }

    /// Through-holes on the face centre line at `u = f × length`.
    pub fn guide_holes(
        &self,
        fractions: &[Real],
        diameter: Real,
    ) -> Result<Vec<Feature>, BuildError> {
        let length = self.length();
        fractions
            .iter()
            .map(|f| self.through_hole(f * length, 0.0, diameter))
            .collect()
    }

    /// A box `length` long on `u` and `fraction × width` wide on `v`,
    /// cutting through the slab at `(u, v)`.
    pub fn slot(
        &self,
        u: Real,
        v: Real,
        length: Real,
        fraction: Real,
    ) -> Result<Feature, BuildError> {
        let (iu, iv) = self.axis.face_axes();
        let mut size = Vector3::zeros();
        size[iu] = require_positive("slot_length", length)?;
        size[iv] = require_positive("slot_width", fraction * self.width())?;
        size[self.axis.index()] =
            PENETRATION_FACTOR * require_positive("thickness", self.thickness())?;

        let primitive = Primitive::cuboid(size)?;
        let placement =
            Placement::centered(primitive.local_center(), Vector3::zeros(), self.face_point(u, v));
        Ok(Feature::new(primitive, placement))
    }

    /// A plain box whose minimum corner sits at `corner + corner_offset`.
    pub fn block(
        &self,
        corner_offset: Vector3<Real>,
        size: Vector3<Real>,
    ) -> Result<Feature, BuildError> {
        Ok(Feature::new(
            Primitive::cuboid(size)?,
            Placement::translation(self.corner.coords + corner_offset),
        ))
    }

    /// The slab itself as a box feature.
    pub fn solid(&self) -> Result<Feature, BuildError> {
        self.block(Vector3::zeros(), self.extents)
    }

    /// Cut-out hollowing a Z slab into an open-top box: `wall` left on all
    /// four sides and `floor` underneath, running out through the top face.
    ///
    /// `key` names the wall parameter in the error when the walls leave no
    /// room inside.
    pub fn pocket(&self, wall: Real, floor: Real, key: &str) -> Result<Feature, BuildError> {
        let inner = Vector3::new(
            self.extents.x - 2.0 * wall,
            self.extents.y - 2.0 * wall,
            self.extents.z - floor,
        );
        if inner.iter().any(|&d| !d.is_finite() || d <= 0.0) {
            return Err(BuildError::invalid_dimension(key, wall));
        }
        let over = PENETRATION_FACTOR * floor;
        self.block(
            Vector3::new(wall, wall, floor),
            Vector3::new(inner.x, inner.y, inner.z + over),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CSGOps;

    fn approx(a: Real, b: Real) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn centered_moves_rotated_center_onto_target() {
        let rotation = Vector3::new(FRAC_PI_2, 0.0, 0.0);
        let target = Point3::new(1.0, 2.0, 3.0);
        let p = Placement::centered(Point3::new(0.0, 0.0, 3.0), rotation, target);
        let c = p.apply(&Point3::new(0.0, 0.0, 3.0));
        assert!(approx(c.x, 1.0) && approx(c.y, 2.0) && approx(c.z, 3.0));
    }

    #[test]
    fn through_hole_spans_thickness_on_each_axis() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let corner = Point3::new(1.0, 2.0, 3.0);
            let frame = PlateFrame::new(corner, Vector3::new(10.0, 20.0, 30.0), axis);
            let tool = frame.through_hole(0.0, 0.0, 2.0).unwrap().realize().unwrap();
            let bb = tool.bounding_box();
            let i = axis.index();
            let t = frame.thickness();
            assert!(approx(bb.maxs[i] - bb.mins[i], PENETRATION_FACTOR * t));
            assert!(approx((bb.maxs[i] + bb.mins[i]) / 2.0, frame.center()[i]));
            assert!(bb.mins[i] < frame.corner[i] && bb.maxs[i] > frame.corner[i] + t);
        }
    }

    #[test]
    fn face_coordinates_follow_axis_convention() {
        let frame = PlateFrame::new(Point3::origin(), Vector3::new(10.0, 20.0, 30.0), Axis::Y);
        let p = frame.face_point(1.0, 2.0);
        assert_eq!(p, Point3::new(6.0, 10.0, 17.0));
        assert_eq!(frame.length(), 10.0);
        assert_eq!(frame.width(), 30.0);
    }

    #[test]
    fn slot_is_over_provisioned_through_the_slab() {
        let frame = PlateFrame::new(Point3::origin(), Vector3::new(100.0, 50.0, 4.0), Axis::Z);
        let bb = frame.slot(0.0, 0.0, 30.0, 0.4).unwrap().realize().unwrap().bounding_box();
        assert!(approx(bb.mins.x, 35.0) && approx(bb.maxs.x, 65.0));
        assert!(approx(bb.mins.y, 15.0) && approx(bb.maxs.y, 35.0));
        assert!(approx(bb.mins.z, -4.0) && approx(bb.maxs.z, 8.0));
    }

    #[test]
    fn pocket_leaves_walls_and_floor() {
        let frame = PlateFrame::new(Point3::origin(), Vector3::new(20.0, 10.0, 6.0), Axis::Z);
        let bb = frame.pocket(2.0, 1.5, "wall").unwrap().realize().unwrap().bounding_box();
        assert!(approx(bb.mins.x, 2.0) && approx(bb.maxs.x, 18.0));
        assert!(approx(bb.mins.y, 2.0) && approx(bb.maxs.y, 8.0));
        assert!(approx(bb.mins.z, 1.5) && bb.maxs.z > 6.0);
        assert!(matches!(
            frame.pocket(5.0, 1.0, "wall"),
            Err(BuildError::InvalidDimension { ref key, .. }) if key == "wall"
        ));
    }

    #[test]
    fn guide_holes_spread_along_length() {
        let frame = PlateFrame::centered_xy(Vector3::new(120.0, 80.0, 4.0));
        let holes = frame.guide_holes(&[-0.25, 0.0, 0.25], 4.5).unwrap();
        let xs: Vec<Real> = holes
            .iter()
            .map(|h| h.realize().unwrap().bounding_box().center().x)
            .collect();
        assert!(approx(xs[0], -30.0) && approx(xs[1], 0.0) && approx(xs[2], 30.0));
    }
}
