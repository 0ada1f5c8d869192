use serde::{Deserialize, Serialize};

use crate::profile::ProfilePoint;

/// A tone hole to be drilled through the body wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    /// Axial position of the hole centre along the revolution axis, mm.
    pub axial_position: f64,
    /// Nominal hole diameter at the bore surface, mm.
    pub outer_diameter: f64,
}

impl HoleSpec {
    pub fn new(axial_position: f64, outer_diameter: f64) -> Self {
        Self {
            axial_position,
            outer_diameter,
        }
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_diameter / 2.0
    }
}

/// Which joint of the instrument a part describes.
///
/// The measured data sets name their files after these joints, one bore
/// record plus an `_external` sibling per joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Joint {
    Head,
    Left,
    Right,
    Foot,
}

impl Joint {
    /// Canonical file stem of the bore (internal) record.
    pub fn bore_stem(&self) -> &'static str {
        match self {
            Joint::Head => "headjoint",
            Joint::Left => "left",
            Joint::Right => "right",
            Joint::Foot => "foot",
        }
    }

    /// Canonical file stem of the exterior record.
    pub fn exterior_stem(&self) -> String {
        format!("{}_external", self.bore_stem())
    }

    /// Match a record's part name back to a joint, if it uses a canonical stem.
    pub fn from_stem(stem: &str) -> Option<Self> {
        match stem {
            "headjoint" => Some(Joint::Head),
            "left" => Some(Joint::Left),
            "right" => Some(Joint::Right),
            "foot" => Some(Joint::Foot),
            _ => None,
        }
    }
}

/// A complete measured part: both surface profiles plus its tone holes.
///
/// Owned by the caller. The assembly pipeline copies the profiles before
/// sanitizing; the vectors here are never mutated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    /// Display name, taken from the record's part field when present.
    pub name: String,
    /// The joint this part belongs to, when recognizable from the name.
    pub joint: Option<Joint>,
    /// Bore (internal) surface profile, ascending by position.
    pub internal: Vec<ProfilePoint>,
    /// Exterior surface profile, ascending by position.
    pub external: Vec<ProfilePoint>,
    /// Tone holes, in drilling order.
    pub holes: Vec<HoleSpec>,
}
