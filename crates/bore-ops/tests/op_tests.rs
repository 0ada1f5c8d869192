use approx::assert_relative_eq;
use bore_ops::{build_cutter_solid, build_revolved_solid, generate_cutter, GeometryError};
use bore_types::{HoleSpec, ProfilePoint};
use kernel_api::{Kernel, MockKernel};

// ── Revolution Builder ──────────────────────────────────────────────────────

#[test]
fn revolved_profile_is_watertight_thanks_to_closure() {
    let mut kernel = MockKernel::new();
    // Both endpoints off-axis: the builder must close them onto the axis.
    let profile = vec![ProfilePoint::new(0.0, 23.0), ProfilePoint::new(218.8, 29.4)];
    let handle = build_revolved_solid(&mut kernel, &profile, 100).unwrap();

    assert!(kernel.is_watertight(&handle).unwrap());
    let (min, max) = kernel.bounding_box(&handle).unwrap();
    assert_relative_eq!(max[0], 14.7);
    assert_relative_eq!(min[2], 0.0);
    assert_relative_eq!(max[2], 218.8);
}

#[test]
fn raw_polyline_without_closure_is_not_watertight() {
    // Control for the closure test: handing the kernel the bare profile
    // produces the hollow-tube artifact the builder exists to prevent.
    let mut kernel = MockKernel::new();
    let handle = kernel
        .revolve_profile(&[[11.5, 0.0], [14.7, 218.8]], 100)
        .unwrap();
    assert!(!kernel.is_watertight(&handle).unwrap());
}

#[test]
fn empty_profile_fails_at_revolve_stage() {
    let mut kernel = MockKernel::new();
    let err = build_revolved_solid(&mut kernel, &[], 100).unwrap_err();
    assert!(matches!(err, GeometryError::RevolveFailed { .. }));
    assert_eq!(err.stage(), "revolve");
}

#[test]
fn kernel_resolution_is_forwarded_not_tuned() {
    let mut kernel = MockKernel::new();
    let profile = vec![ProfilePoint::new(0.0, 23.0), ProfilePoint::new(200.0, 23.0)];
    // A resolution the kernel rejects must surface as failure, not retry.
    let err = build_revolved_solid(&mut kernel, &profile, 2).unwrap_err();
    assert!(matches!(err, GeometryError::RevolveFailed { .. }));
    assert_eq!(kernel.op_count("revolve"), 1);
}

// ── Cutter Realization ──────────────────────────────────────────────────────

#[test]
fn cutter_solid_lands_midway_through_the_wall() {
    let mut kernel = MockKernel::new();
    let internal = vec![ProfilePoint::new(0.0, 24.0), ProfilePoint::new(200.0, 24.0)];
    let external = vec![ProfilePoint::new(0.0, 30.0), ProfilePoint::new(200.0, 30.0)];
    let hole = HoleSpec::new(80.0, 5.0);

    let spec = generate_cutter(0, &hole, &internal, &external, 0.0).unwrap();
    let solid = build_cutter_solid(&mut kernel, 0, &spec).unwrap();

    let center = kernel.center(&solid).unwrap();
    assert_relative_eq!(center[0], 13.5, epsilon = 1e-12);
    assert_relative_eq!(center[1], 0.0, epsilon = 1e-12);
    assert_relative_eq!(center[2], 80.0, epsilon = 1e-12);

    // With the margin the cutter must clear both surfaces of the 3 mm wall
    // (bore at radius 12, exterior at 15).
    let (min, max) = kernel.bounding_box(&solid).unwrap();
    assert!(min[0] < 12.0);
    assert!(max[0] > 15.0);
}

#[test]
fn degenerate_cutter_is_reported_against_its_hole() {
    let mut kernel = MockKernel::new();
    let spec = bore_ops::CutterSpec {
        outer_radius: 2.5,
        inner_radius: 2.5,
        height: -1.0,
        axial_position: 80.0,
        radial_center: 13.5,
    };
    let err = build_cutter_solid(&mut kernel, 2, &spec).unwrap_err();
    match &err {
        GeometryError::CutterBooleanFailed { hole, .. } => assert_eq!(*hole, 2),
        other => panic!("expected CutterBooleanFailed, got {other:?}"),
    }
    assert_eq!(err.stage(), "boolean-cutter-2");
}
