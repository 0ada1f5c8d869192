use bore_types::ProfilePoint;

/// Offset applied to separate coincident sample positions, mm.
pub const STEP_EPSILON: f64 = 0.001;

/// Return a copy of `profile` whose positions strictly increase.
///
/// Measured profiles encode a sharp shoulder as two samples at the same
/// axial position; revolving such a vertical step yields a degenerate
/// planar curve. Any point that fails to advance past its (already
/// sanitized) predecessor is nudged to sit one epsilon beyond it. Points
/// are never reordered or dropped and diameters are untouched. The caller's
/// profile is left alone. Output that already increases strictly passes
/// through unchanged, so the epsilon cannot accumulate across runs.
pub fn sanitize(profile: &[ProfilePoint]) -> Vec<ProfilePoint> {
    let mut result: Vec<ProfilePoint> = Vec::with_capacity(profile.len());
    for point in profile {
        let mut point = *point;
        if let Some(prev) = result.last() {
            if point.position <= prev.position {
                point.position = prev.position + STEP_EPSILON;
            }
        }
        result.push(point);
    }
    result
}
