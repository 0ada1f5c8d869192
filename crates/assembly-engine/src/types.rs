use std::fmt;

use bore_ops::GeometryError;
use kernel_api::KernelError;
use serde::{Deserialize, Serialize};

/// Pipeline position of an assembly session.
///
/// Stages advance strictly forward; `Failed` is terminal and carries the
/// label of the stage that broke (`revolve`, `cutter`, `boolean-body`,
/// `boolean-cutter-<hole>`). Reloading profiles or changing parameters
/// returns the session to `ProfilesLoaded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblyStage {
    Empty,
    ProfilesLoaded,
    SolidsBuilt,
    BodyCut,
    FullyAssembled,
    Failed(String),
}

impl fmt::Display for AssemblyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyStage::Empty => write!(f, "empty"),
            AssemblyStage::ProfilesLoaded => write!(f, "profiles-loaded"),
            AssemblyStage::SolidsBuilt => write!(f, "solids-built"),
            AssemblyStage::BodyCut => write!(f, "body-cut"),
            AssemblyStage::FullyAssembled => write!(f, "fully-assembled"),
            AssemblyStage::Failed(stage) => write!(f, "failed({stage})"),
        }
    }
}

/// Tunable parameters of one assembly run.
///
/// Changing any of these invalidates built solids: cutter geometry depends
/// on the conicity angle globally, so results may only be cached keyed by
/// the profile data plus this whole struct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyParams {
    /// Half-angle of the tone-hole taper across the wall, degrees.
    pub conicity_angle_deg: f64,
    /// Angular segment count requested for revolutions.
    pub revolve_resolution: u32,
    /// Display/export mesh quality; tessellation tolerance is 0.5 / quality.
    pub mesh_quality: u32,
}

impl AssemblyParams {
    pub const MAX_CONICITY_DEG: f64 = 20.0;
    pub const MIN_MESH_QUALITY: u32 = 50;
    pub const MAX_MESH_QUALITY: u32 = 500;

    pub fn validate(&self) -> Result<(), AssemblyError> {
        if !self.conicity_angle_deg.is_finite()
            || self.conicity_angle_deg.abs() > Self::MAX_CONICITY_DEG
        {
            return Err(AssemblyError::InvalidParameter {
                reason: format!(
                    "conicity angle {} outside ±{}°",
                    self.conicity_angle_deg,
                    Self::MAX_CONICITY_DEG
                ),
            });
        }
        if self.revolve_resolution < 3 {
            return Err(AssemblyError::InvalidParameter {
                reason: format!("revolve resolution {} below 3", self.revolve_resolution),
            });
        }
        if self.mesh_quality < Self::MIN_MESH_QUALITY || self.mesh_quality > Self::MAX_MESH_QUALITY
        {
            return Err(AssemblyError::InvalidParameter {
                reason: format!(
                    "mesh quality {} outside {}..={}",
                    self.mesh_quality,
                    Self::MIN_MESH_QUALITY,
                    Self::MAX_MESH_QUALITY
                ),
            });
        }
        Ok(())
    }

    pub fn tessellation_tolerance(&self) -> f64 {
        0.5 / self.mesh_quality as f64
    }
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self {
            conicity_angle_deg: 5.0,
            revolve_resolution: 100,
            mesh_quality: 300,
        }
    }
}

/// Errors from the assembly engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssemblyError {
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("operation requires stage {expected}, session is at {actual}")]
    WrongStage { expected: String, actual: String },

    #[error("no solids available to export")]
    NothingToExport,

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}
