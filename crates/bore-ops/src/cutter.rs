use std::f64::consts::FRAC_PI_2;

use bore_types::{HoleSpec, ProfilePoint, Transform};
use kernel_api::{Kernel, SolidHandle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interpolate::radius_at;
use crate::types::GeometryError;

/// Extra cutter length beyond the wall thickness, mm. The over-cut clears
/// both surfaces so no cutter face ends up coplanar with the body, which
/// boolean backends handle badly.
pub const CUTTER_MARGIN: f64 = 4.0;

/// A tone-hole cutter, derived fresh for every assembly run.
///
/// Describes a conical frustum spanning the body wall: the nominal hole
/// radius at the bore surface, the tapered radius at the exterior surface,
/// and where the frustum's midpoint sits relative to the revolution axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutterSpec {
    /// Radius at the bore-side mouth of the hole, mm.
    pub outer_radius: f64,
    /// Radius at the exterior surface, after the conicity taper, mm.
    pub inner_radius: f64,
    /// Total cutter length including the over-cut margin, mm.
    pub height: f64,
    /// Axial position of the hole centre, mm.
    pub axial_position: f64,
    /// Radial distance of the cutter midpoint from the revolution axis, mm.
    pub radial_center: f64,
}

impl CutterSpec {
    /// Placement of the kernel's frustum primitive into the part frame.
    ///
    /// The frustum arrives base-down at the origin extending along +Z. It
    /// is centred on its own axis, rotated a quarter turn about Y so its
    /// axis runs radially with the bore-side mouth facing the revolution
    /// axis, then translated to the hole position, midway through the wall.
    /// Rotation must precede translation; the reverse order displaces the
    /// cutter.
    pub fn placement(&self) -> Transform {
        Transform::translation(self.radial_center, 0.0, self.axial_position)
            .then(&Transform::rotation_y(FRAC_PI_2))
            .then(&Transform::translation(0.0, 0.0, -self.height / 2.0))
    }
}

/// Compute the cutter for one hole against sanitized profiles.
///
/// The wall thickness at the hole comes from interpolating both surfaces;
/// a wall that is zero or inverted is a measurement defect in the input
/// data and is reported against the hole's index.
pub fn generate_cutter(
    hole_index: usize,
    hole: &HoleSpec,
    internal: &[ProfilePoint],
    external: &[ProfilePoint],
    conicity_angle_deg: f64,
) -> Result<CutterSpec, GeometryError> {
    let r_ext = radius_at(hole.axial_position, external);
    let r_int = radius_at(hole.axial_position, internal);
    if r_ext <= r_int {
        return Err(GeometryError::NonPositiveWall {
            hole: hole_index,
            r_ext,
            r_int,
        });
    }

    let wall = r_ext - r_int;
    let outer_radius = hole.outer_radius();
    let inner_radius = outer_radius + wall * conicity_angle_deg.to_radians().tan();
    debug!(
        hole = hole_index,
        wall, outer_radius, inner_radius, "sized tone-hole cutter"
    );

    Ok(CutterSpec {
        outer_radius,
        inner_radius,
        height: wall + CUTTER_MARGIN,
        axial_position: hole.axial_position,
        radial_center: (r_ext + r_int) / 2.0,
    })
}

/// Compute cutters for every hole of a part. Cutters are independent of
/// one another; the first defective hole aborts the batch.
pub fn generate_cutters(
    holes: &[HoleSpec],
    internal: &[ProfilePoint],
    external: &[ProfilePoint],
    conicity_angle_deg: f64,
) -> Result<Vec<CutterSpec>, GeometryError> {
    holes
        .iter()
        .enumerate()
        .map(|(i, hole)| generate_cutter(i, hole, internal, external, conicity_angle_deg))
        .collect()
}

/// Realize a cutter in the kernel: frustum primitive, then placement.
pub fn build_cutter_solid(
    kernel: &mut dyn Kernel,
    hole_index: usize,
    spec: &CutterSpec,
) -> Result<SolidHandle, GeometryError> {
    let template = kernel
        .make_frustum(spec.outer_radius, spec.inner_radius, spec.height)
        .map_err(|e| GeometryError::CutterBooleanFailed {
            hole: hole_index,
            reason: e.to_string(),
        })?;
    kernel
        .transform_solid(&template, &spec.placement())
        .map_err(|e| GeometryError::CutterBooleanFailed {
            hole: hole_index,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall_profiles() -> (Vec<ProfilePoint>, Vec<ProfilePoint>) {
        // Constant bore radius 12, exterior radius 15: a 3 mm wall.
        let internal = vec![ProfilePoint::new(0.0, 24.0), ProfilePoint::new(200.0, 24.0)];
        let external = vec![ProfilePoint::new(0.0, 30.0), ProfilePoint::new(200.0, 30.0)];
        (internal, external)
    }

    #[test]
    fn zero_conicity_gives_cylindrical_cutter() {
        let (internal, external) = wall_profiles();
        let hole = HoleSpec::new(80.0, 5.0);
        let spec = generate_cutter(0, &hole, &internal, &external, 0.0).unwrap();

        assert_relative_eq!(spec.outer_radius, 2.5);
        assert_relative_eq!(spec.inner_radius, 2.5);
        assert_relative_eq!(spec.height, 3.0 + CUTTER_MARGIN);
        assert_relative_eq!(spec.radial_center, 13.5);
        assert_relative_eq!(spec.axial_position, 80.0);
    }

    #[test]
    fn conicity_tapers_the_exterior_mouth() {
        let (internal, external) = wall_profiles();
        let hole = HoleSpec::new(80.0, 5.0);
        let spec = generate_cutter(0, &hole, &internal, &external, 5.0).unwrap();

        let expected = 2.5 + 3.0 * 5.0_f64.to_radians().tan();
        assert_relative_eq!(spec.inner_radius, expected, epsilon = 1e-12);
        assert_relative_eq!(spec.outer_radius, 2.5);
    }

    #[test]
    fn negative_conicity_narrows_the_exterior_mouth() {
        let (internal, external) = wall_profiles();
        let hole = HoleSpec::new(80.0, 5.0);
        let spec = generate_cutter(0, &hole, &internal, &external, -5.0).unwrap();
        assert!(spec.inner_radius < spec.outer_radius);
    }

    #[test]
    fn inverted_wall_is_reported_with_hole_index() {
        let (external, internal) = wall_profiles(); // swapped: bore wider than body
        let hole = HoleSpec::new(80.0, 5.0);
        let err = generate_cutter(4, &hole, &internal, &external, 0.0).unwrap_err();
        match err {
            GeometryError::NonPositiveWall { hole, r_ext, r_int } => {
                assert_eq!(hole, 4);
                assert!(r_int > r_ext);
            }
            other => panic!("expected NonPositiveWall, got {other:?}"),
        }
    }

    #[test]
    fn placement_centres_cutter_inside_the_wall() {
        let spec = CutterSpec {
            outer_radius: 2.5,
            inner_radius: 2.5,
            height: 7.0,
            axial_position: 80.0,
            radial_center: 13.5,
        };
        let placement = spec.placement();

        // Local axis midpoint lands at the hole, halfway through the wall.
        let mid = placement.transform_point([0.0, 0.0, spec.height / 2.0]);
        assert_relative_eq!(mid[0], 13.5, epsilon = 1e-12);
        assert_relative_eq!(mid[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(mid[2], 80.0, epsilon = 1e-12);

        // The bore-side mouth (frustum base) faces the revolution axis.
        let base = placement.transform_point([0.0, 0.0, 0.0]);
        assert_relative_eq!(base[0], 13.5 - 3.5, epsilon = 1e-12);
        let top = placement.transform_point([0.0, 0.0, spec.height]);
        assert_relative_eq!(top[0], 13.5 + 3.5, epsilon = 1e-12);
    }

    #[test]
    fn cutters_are_generated_per_hole_independently() {
        let (internal, external) = wall_profiles();
        let holes = vec![
            HoleSpec::new(40.0, 5.0),
            HoleSpec::new(80.0, 6.0),
            HoleSpec::new(120.0, 5.5),
        ];
        let cutters = generate_cutters(&holes, &internal, &external, 0.0).unwrap();
        assert_eq!(cutters.len(), 3);
        assert_relative_eq!(cutters[1].outer_radius, 3.0);
        assert_relative_eq!(cutters[2].axial_position, 120.0);
    }
}
