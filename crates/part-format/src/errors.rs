/// Errors while decoding measured-part records.
///
/// All of these surface before an assembly session is ever created; a
/// record that decodes cleanly is safe to hand to the pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to parse record: {reason}")]
    Parse { reason: String },

    #[error("{which} record has no measurements")]
    MissingMeasurements { which: &'static str },

    #[error("{which} measurement {index} has negative diameter {diameter}")]
    NegativeDiameter {
        which: &'static str,
        index: usize,
        diameter: f64,
    },

    #[error("{which} measurement {index} goes backwards along the axis")]
    OutOfOrder { which: &'static str, index: usize },

    #[error("record declares {declared} holes but is missing field \"{field}\"")]
    MissingHoleField {
        declared: usize,
        field: &'static str,
    },

    #[error(
        "hole arrays do not match declared count {declared} \
         ({positions} positions, {diameters} diameters)"
    )]
    HoleCountMismatch {
        declared: usize,
        positions: usize,
        diameters: usize,
    },

    #[error("hole {index} has negative diameter {diameter}")]
    NegativeHoleDiameter { index: usize, diameter: f64 },
}
