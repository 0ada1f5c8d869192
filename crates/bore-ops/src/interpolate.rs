use bore_types::ProfilePoint;

/// Radius of the profile surface at an axial position.
///
/// Scans the profile in order for the first adjacent pair bracketing
/// `position` and linearly interpolates the radius between the two samples.
/// Queries with no bracketing pair clamp to the LAST sample's radius,
/// including queries before the first point, not only past the end. Tone
/// holes placed at or beyond a joint's terminal position rely on the tail
/// clamp, so out-of-range is not an error here. An empty profile yields 0.
pub fn radius_at(position: f64, profile: &[ProfilePoint]) -> f64 {
    for pair in profile.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        if p1.position <= position && position <= p2.position {
            let (y1, r1) = (p1.position, p1.radius());
            let (y2, r2) = (p2.position, p2.radius());
            // Coincident samples cannot happen after sanitization, but a
            // non-canonical profile must not divide by zero.
            if (y2 - y1).abs() < 1e-9 {
                return r1;
            }
            return r1 + (r2 - r1) * (position - y1) / (y2 - y1);
        }
    }
    profile.last().map(ProfilePoint::radius).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_taper() -> Vec<ProfilePoint> {
        vec![
            ProfilePoint::new(0.0, 20.0),
            ProfilePoint::new(100.0, 24.0),
            ProfilePoint::new(200.0, 18.0),
        ]
    }

    #[test]
    fn passes_through_every_sample() {
        let profile = straight_taper();
        for p in &profile {
            assert_relative_eq!(radius_at(p.position, &profile), p.radius());
        }
    }

    #[test]
    fn interpolates_between_samples() {
        let profile = straight_taper();
        assert_relative_eq!(radius_at(50.0, &profile), 11.0);
        assert_relative_eq!(radius_at(150.0, &profile), 10.5);
    }

    #[test]
    fn query_before_range_clamps_to_tail() {
        // The clamp goes to the LAST sample even for queries before the
        // first one. Deliberate legacy behavior; see DESIGN.md.
        let profile = straight_taper();
        assert_relative_eq!(radius_at(-1000.0, &profile), 9.0);
    }

    #[test]
    fn query_past_range_clamps_to_tail() {
        let profile = straight_taper();
        assert_relative_eq!(radius_at(1000.0, &profile), 9.0);
    }

    #[test]
    fn degenerate_bracket_returns_first_radius() {
        let profile = vec![ProfilePoint::new(5.0, 10.0), ProfilePoint::new(5.0, 30.0)];
        assert_relative_eq!(radius_at(5.0, &profile), 5.0);
    }

    #[test]
    fn single_point_profile_always_returns_its_radius() {
        let profile = vec![ProfilePoint::new(42.0, 12.0)];
        assert_relative_eq!(radius_at(0.0, &profile), 6.0);
        assert_relative_eq!(radius_at(42.0, &profile), 6.0);
        assert_relative_eq!(radius_at(99.0, &profile), 6.0);
    }

    #[test]
    fn empty_profile_returns_zero() {
        assert_eq!(radius_at(10.0, &[]), 0.0);
    }
}
