use bore_types::{HoleSpec, Joint, PartSpec, ProfilePoint};
use serde::Deserialize;

use crate::errors::DecodeError;

/// Raw measured-part record as it appears in the data files.
///
/// Field names follow the measurement tooling's output. Hole fields are
/// absent on exterior records and on undrilled parts.
#[derive(Debug, Clone, Deserialize)]
pub struct PartRecord {
    #[serde(rename = "Part", default)]
    pub part: Option<String>,
    #[serde(default)]
    pub measurements: Vec<ProfilePoint>,
    #[serde(rename = "Number of holes", default)]
    pub number_of_holes: Option<usize>,
    #[serde(rename = "Holes position", default)]
    pub holes_position: Option<Vec<f64>>,
    #[serde(rename = "Holes diameter", default)]
    pub holes_diameter: Option<Vec<f64>>,
}

/// Parse a single record from JSON.
pub fn parse_record(json: &str) -> Result<PartRecord, DecodeError> {
    serde_json::from_str(json).map_err(|e| DecodeError::Parse {
        reason: e.to_string(),
    })
}

/// Decode a bore record plus its exterior sibling into a `PartSpec`.
///
/// The bore record carries the part name and the tone holes; the exterior
/// record contributes only its measurements.
pub fn decode_part(internal_json: &str, external_json: &str) -> Result<PartSpec, DecodeError> {
    let internal = parse_record(internal_json)?;
    let external = parse_record(external_json)?;
    decode_part_records(internal, external)
}

/// Validate and combine two already-parsed records.
pub fn decode_part_records(
    internal: PartRecord,
    external: PartRecord,
) -> Result<PartSpec, DecodeError> {
    validate_measurements("internal", &internal.measurements)?;
    validate_measurements("external", &external.measurements)?;
    let holes = decode_holes(&internal)?;

    let name = internal.part.unwrap_or_else(|| "part".to_string());
    let joint = Joint::from_stem(&name);
    Ok(PartSpec {
        name,
        joint,
        internal: internal.measurements,
        external: external.measurements,
        holes,
    })
}

fn validate_measurements(
    which: &'static str,
    measurements: &[ProfilePoint],
) -> Result<(), DecodeError> {
    if measurements.is_empty() {
        return Err(DecodeError::MissingMeasurements { which });
    }
    for (index, point) in measurements.iter().enumerate() {
        if point.diameter < 0.0 {
            return Err(DecodeError::NegativeDiameter {
                which,
                index,
                diameter: point.diameter,
            });
        }
        // Vertical steps (equal positions) are legitimate measurement
        // shorthand; only a position that moves backwards is malformed.
        if index > 0 && point.position < measurements[index - 1].position {
            return Err(DecodeError::OutOfOrder { which, index });
        }
    }
    Ok(())
}

fn decode_holes(record: &PartRecord) -> Result<Vec<HoleSpec>, DecodeError> {
    let declared = record.number_of_holes.unwrap_or(0);
    if declared == 0 {
        // Absent hole fields mean an undrilled part.
        return Ok(Vec::new());
    }

    let positions =
        record
            .holes_position
            .as_deref()
            .ok_or(DecodeError::MissingHoleField {
                declared,
                field: "Holes position",
            })?;
    let diameters =
        record
            .holes_diameter
            .as_deref()
            .ok_or(DecodeError::MissingHoleField {
                declared,
                field: "Holes diameter",
            })?;

    if positions.len() != declared || diameters.len() != declared {
        return Err(DecodeError::HoleCountMismatch {
            declared,
            positions: positions.len(),
            diameters: diameters.len(),
        });
    }
    for (index, &diameter) in diameters.iter().enumerate() {
        if diameter < 0.0 {
            return Err(DecodeError::NegativeHoleDiameter { index, diameter });
        }
    }

    Ok(positions
        .iter()
        .zip(diameters)
        .map(|(&axial_position, &outer_diameter)| HoleSpec::new(axial_position, outer_diameter))
        .collect())
}
