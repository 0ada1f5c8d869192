use bore_types::ProfilePoint;
use kernel_api::{Kernel, SolidHandle};
use tracing::debug;

use crate::types::GeometryError;

/// First/last radii beyond this are treated as off-axis and get a
/// synthetic closure vertex.
const ON_AXIS_EPSILON: f64 = 1e-6;

/// Map a sanitized profile to the 2D polyline handed to the kernel,
/// closing it onto the revolution axis.
///
/// A profile whose first or last sample sits off-axis would revolve into an
/// open tube (or be rejected outright); inserting an on-axis vertex at the
/// same axial position turns the swept lamina into a closed cross-section.
/// This closure step is distinct from the positional sanitization.
pub fn profile_polyline(profile: &[ProfilePoint]) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = Vec::with_capacity(profile.len() + 2);
    if let Some(first) = profile.first() {
        if first.radius() > ON_AXIS_EPSILON {
            points.push([0.0, first.position]);
        }
    }
    points.extend(profile.iter().map(|p| [p.radius(), p.position]));
    if let Some(last) = profile.last() {
        if last.radius() > ON_AXIS_EPSILON {
            points.push([0.0, last.position]);
        }
    }
    points
}

/// Revolve a sanitized profile into a solid.
///
/// `resolution` is forwarded to the kernel untouched; a rejected revolve is
/// reported as a failure, never retried at a different resolution.
pub fn build_revolved_solid(
    kernel: &mut dyn Kernel,
    profile: &[ProfilePoint],
    resolution: u32,
) -> Result<SolidHandle, GeometryError> {
    let polyline = profile_polyline(profile);
    debug!(vertices = polyline.len(), resolution, "revolving profile");
    kernel
        .revolve_profile(&polyline, resolution)
        .map_err(|e| GeometryError::RevolveFailed {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_off_axis_endpoints() {
        let profile = vec![ProfilePoint::new(0.0, 23.0), ProfilePoint::new(200.0, 23.0)];
        let polyline = profile_polyline(&profile);
        assert_eq!(
            polyline,
            vec![[0.0, 0.0], [11.5, 0.0], [11.5, 200.0], [0.0, 200.0]]
        );
    }

    #[test]
    fn leaves_on_axis_endpoints_alone() {
        let profile = vec![
            ProfilePoint::new(0.0, 0.0),
            ProfilePoint::new(10.0, 20.0),
            ProfilePoint::new(30.0, 0.0),
        ];
        let polyline = profile_polyline(&profile);
        assert_eq!(polyline.len(), 3);
        assert_eq!(polyline[0], [0.0, 0.0]);
        assert_eq!(polyline[2], [0.0, 30.0]);
    }

    #[test]
    fn closes_only_the_off_axis_end() {
        let profile = vec![ProfilePoint::new(0.0, 0.0), ProfilePoint::new(50.0, 18.0)];
        let polyline = profile_polyline(&profile);
        assert_eq!(polyline.len(), 3);
        assert_eq!(polyline[2], [0.0, 50.0]);
    }

    #[test]
    fn empty_profile_produces_empty_polyline() {
        assert!(profile_polyline(&[]).is_empty());
    }
}
