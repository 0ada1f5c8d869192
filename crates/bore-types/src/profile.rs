use serde::{Deserialize, Serialize};

/// One measured sample of a bore or exterior surface: diameter at an axial
/// position along the part, both in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Axial coordinate along the revolution axis, mm.
    pub position: f64,
    /// Measured diameter at that position, mm. Never negative.
    pub diameter: f64,
}

impl ProfilePoint {
    pub fn new(position: f64, diameter: f64) -> Self {
        Self { position, diameter }
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Axial span covered by a profile, as (first position, last position).
/// Returns None for an empty profile.
pub fn profile_span(profile: &[ProfilePoint]) -> Option<(f64, f64)> {
    match (profile.first(), profile.last()) {
        (Some(first), Some(last)) => Some((first.position, last.position)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_half_diameter() {
        let p = ProfilePoint::new(10.0, 23.0);
        assert_eq!(p.radius(), 11.5);
    }

    #[test]
    fn span_of_empty_profile_is_none() {
        assert_eq!(profile_span(&[]), None);
        let profile = vec![ProfilePoint::new(0.0, 20.0), ProfilePoint::new(200.0, 18.0)];
        assert_eq!(profile_span(&profile), Some((0.0, 200.0)));
    }
}
