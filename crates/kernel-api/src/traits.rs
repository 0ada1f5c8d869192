use std::path::Path;

use bore_types::Transform;

use crate::types::{KernelError, RenderMesh, SolidHandle};

/// The external solid-modeling kernel boundary.
///
/// The geometry pipeline depends only on this trait, never on a concrete
/// B-rep backend. Implemented by MockKernel (deterministic test double) and
/// by whatever real kernel a front-end wires in. Handles are owned by the
/// kernel session that created them and must not cross threads.
pub trait Kernel {
    /// Revolve an open 2D polyline of (radius, axial position) vertices a
    /// full turn about the axial axis. `resolution` is the angular segment
    /// count requested from the backend, never auto-tuned here.
    fn revolve_profile(
        &mut self,
        points: &[[f64; 2]],
        resolution: u32,
    ) -> Result<SolidHandle, KernelError>;

    /// Construct a conical frustum with its base circle of `bottom_radius`
    /// on the local XY plane, extending `height` along local +Z up to the
    /// circle of `top_radius`. Equal radii yield a cylinder.
    fn make_frustum(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
    ) -> Result<SolidHandle, KernelError>;

    /// Apply an affine placement to a solid, returning a new solid.
    fn transform_solid(
        &mut self,
        solid: &SolidHandle,
        transform: &Transform,
    ) -> Result<SolidHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn subtract(
        &mut self,
        a: &SolidHandle,
        b: &SolidHandle,
    ) -> Result<SolidHandle, KernelError>;

    /// Whether the solid's boundary is closed and manifold.
    fn is_watertight(&self, solid: &SolidHandle) -> Result<bool, KernelError>;

    /// Ask the backend to heal a defective solid, returning a new solid.
    /// Callers re-check watertightness; repair is not guaranteed to succeed.
    fn repair(&mut self, solid: &SolidHandle) -> Result<SolidHandle, KernelError>;

    /// Tessellate a solid to a triangle mesh at the given tolerance.
    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;

    /// Export a solid to an STL file at the given tessellation tolerance.
    fn export_stl(
        &mut self,
        solid: &SolidHandle,
        path: &Path,
        tolerance: f64,
    ) -> Result<(), KernelError>;
}
