/// Errors raised while turning profiles into solids.
///
/// Every failure knows which pipeline stage produced it, so front-ends can
/// show the label next to whatever intermediate solids did complete.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeometryError {
    #[error("revolve failed: {reason}")]
    RevolveFailed { reason: String },

    #[error(
        "hole {hole}: non-positive wall thickness \
         (exterior radius {r_ext} mm, bore radius {r_int} mm)"
    )]
    NonPositiveWall { hole: usize, r_ext: f64, r_int: f64 },

    #[error("{which} solid is not watertight, even after repair")]
    NotWatertight { which: String },

    #[error("hollowing the body failed: {reason}")]
    BodyBooleanFailed { reason: String },

    #[error("hole {hole}: cutter subtraction failed: {reason}")]
    CutterBooleanFailed { hole: usize, reason: String },
}

impl GeometryError {
    /// Stage label surfaced to callers alongside the failure message.
    pub fn stage(&self) -> String {
        match self {
            GeometryError::RevolveFailed { .. } => "revolve".to_string(),
            GeometryError::NonPositiveWall { .. } => "cutter".to_string(),
            GeometryError::NotWatertight { .. } | GeometryError::BodyBooleanFailed { .. } => {
                "boolean-body".to_string()
            }
            GeometryError::CutterBooleanFailed { hole, .. } => format!("boolean-cutter-{hole}"),
        }
    }
}
