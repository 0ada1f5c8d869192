use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// NEVER persisted. Valid only for the kernel session that produced it.
#[derive(Debug, Clone)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("revolve failed: {reason}")]
    RevolveFailed { reason: String },

    #[error("primitive construction failed: {reason}")]
    PrimitiveFailed { reason: String },

    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("repair failed: {reason}")]
    RepairFailed { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("export failed: {reason}")]
    ExportFailed { reason: String },

    #[error("solid not found: handle {handle}")]
    SolidNotFound { handle: u64 },

    #[error("kernel error: {message}")]
    Other { message: String },
}

/// Tessellated triangle mesh handed back to front-ends for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals [nx0, ny0, nz0, nx1, ny1, nz1, ...].
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}
