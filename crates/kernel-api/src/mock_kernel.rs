//! MockKernel: deterministic test double implementing Kernel.
//!
//! Tracks each solid as an axis-aligned bounding box plus a watertight flag,
//! which is enough to observe the pipeline's behavior: revolved solids are
//! watertight only when their polyline starts and ends on the axis, booleans
//! refuse defective operands, and placements move tracked boxes through the
//! supplied matrix. Every call is appended to an operation log so tests can
//! assert call sequences.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bore_types::Transform;

use crate::traits::Kernel;
use crate::types::{KernelError, RenderMesh, SolidHandle};

/// A tracked solid: bounding box and boundary state.
#[derive(Debug, Clone)]
struct MockSolid {
    min: [f64; 3],
    max: [f64; 3],
    watertight: bool,
}

impl MockSolid {
    fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    ops: Vec<&'static str>,
    exported: Vec<PathBuf>,
    /// When false, repair returns solids unhealed. Lets tests drive the
    /// repair-then-abort path.
    pub repair_enabled: bool,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
            ops: Vec::new(),
            exported: Vec::new(),
            repair_enabled: true,
        }
    }

    fn alloc_handle(&mut self) -> SolidHandle {
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn get(&self, handle: &SolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::SolidNotFound {
                handle: handle.id(),
            })
    }

    fn store(&mut self, solid: MockSolid) -> SolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    /// Number of times the named operation has been invoked.
    pub fn op_count(&self, op: &str) -> usize {
        self.ops.iter().filter(|o| **o == op).count()
    }

    /// The full operation log, in call order.
    pub fn ops(&self) -> &[&'static str] {
        &self.ops
    }

    /// Paths recorded by export_stl, in call order.
    pub fn exported_paths(&self) -> &[PathBuf] {
        &self.exported
    }

    /// Tracked bounding box of a solid, for test assertions.
    pub fn bounding_box(&self, handle: &SolidHandle) -> Option<([f64; 3], [f64; 3])> {
        self.solids.get(&handle.id()).map(|s| (s.min, s.max))
    }

    /// Tracked bounding-box centre of a solid, for test assertions.
    pub fn center(&self, handle: &SolidHandle) -> Option<[f64; 3]> {
        self.solids.get(&handle.id()).map(|s| s.center())
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// A polyline vertex closer to the axis than this counts as on-axis.
const AXIS_EPSILON: f64 = 1e-9;

impl Kernel for MockKernel {
    fn revolve_profile(
        &mut self,
        points: &[[f64; 2]],
        resolution: u32,
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push("revolve");
        if points.len() < 2 {
            return Err(KernelError::RevolveFailed {
                reason: format!("polyline has {} vertices, need at least 2", points.len()),
            });
        }
        if resolution < 3 {
            return Err(KernelError::RevolveFailed {
                reason: format!("resolution {} below minimum of 3", resolution),
            });
        }
        if let Some(p) = points.iter().find(|p| p[0] < 0.0) {
            return Err(KernelError::RevolveFailed {
                reason: format!("negative radius {} in profile", p[0]),
            });
        }

        let r_max = points.iter().map(|p| p[0]).fold(0.0_f64, f64::max);
        let z_min = points.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
        let z_max = points
            .iter()
            .map(|p| p[1])
            .fold(f64::NEG_INFINITY, f64::max);
        if z_max - z_min <= AXIS_EPSILON {
            return Err(KernelError::RevolveFailed {
                reason: "profile has no axial extent".to_string(),
            });
        }

        // A revolution is closed only when the lamina it sweeps touches the
        // axis at both ends; anything else leaves an open tube.
        let closed = points[0][0] <= AXIS_EPSILON && points[points.len() - 1][0] <= AXIS_EPSILON;

        Ok(self.store(MockSolid {
            min: [-r_max, -r_max, z_min],
            max: [r_max, r_max, z_max],
            watertight: closed,
        }))
    }

    fn make_frustum(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push("frustum");
        if bottom_radius < 0.0 || top_radius < 0.0 {
            return Err(KernelError::PrimitiveFailed {
                reason: "negative frustum radius".to_string(),
            });
        }
        if height <= 0.0 {
            return Err(KernelError::PrimitiveFailed {
                reason: format!("non-positive frustum height {}", height),
            });
        }
        if bottom_radius <= 0.0 && top_radius <= 0.0 {
            return Err(KernelError::PrimitiveFailed {
                reason: "frustum degenerates to a line".to_string(),
            });
        }

        let r_max = bottom_radius.max(top_radius);
        Ok(self.store(MockSolid {
            min: [-r_max, -r_max, 0.0],
            max: [r_max, r_max, height],
            watertight: true,
        }))
    }

    fn transform_solid(
        &mut self,
        solid: &SolidHandle,
        transform: &Transform,
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push("transform");
        let source = self.get(solid)?.clone();

        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for corner in 0..8 {
            let p = [
                if corner & 1 == 0 { source.min[0] } else { source.max[0] },
                if corner & 2 == 0 { source.min[1] } else { source.max[1] },
                if corner & 4 == 0 { source.min[2] } else { source.max[2] },
            ];
            let q = transform.transform_point(p);
            for axis in 0..3 {
                min[axis] = min[axis].min(q[axis]);
                max[axis] = max[axis].max(q[axis]);
            }
        }

        Ok(self.store(MockSolid {
            min,
            max,
            watertight: source.watertight,
        }))
    }

    fn subtract(
        &mut self,
        a: &SolidHandle,
        b: &SolidHandle,
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push("subtract");
        let solid_a = self.get(a)?.clone();
        let solid_b = self.get(b)?;
        if !solid_a.watertight || !solid_b.watertight {
            return Err(KernelError::BooleanFailed {
                reason: "operand is not watertight".to_string(),
            });
        }

        // The difference stays inside the minuend; its box is a fair proxy.
        Ok(self.store(MockSolid {
            min: solid_a.min,
            max: solid_a.max,
            watertight: true,
        }))
    }

    fn is_watertight(&self, solid: &SolidHandle) -> Result<bool, KernelError> {
        Ok(self.get(solid)?.watertight)
    }

    fn repair(&mut self, solid: &SolidHandle) -> Result<SolidHandle, KernelError> {
        self.ops.push("repair");
        let source = self.get(solid)?.clone();
        let healed = source.watertight || self.repair_enabled;
        Ok(self.store(MockSolid {
            min: source.min,
            max: source.max,
            watertight: healed,
        }))
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        self.ops.push("tessellate");
        if tolerance <= 0.0 {
            return Err(KernelError::TessellationFailed {
                reason: format!("non-positive tolerance {}", tolerance),
            });
        }
        let source = self.get(solid)?.clone();
        Ok(box_mesh(source.min, source.max))
    }

    fn export_stl(
        &mut self,
        solid: &SolidHandle,
        path: &Path,
        tolerance: f64,
    ) -> Result<(), KernelError> {
        self.ops.push("export");
        if tolerance <= 0.0 {
            return Err(KernelError::ExportFailed {
                reason: format!("non-positive tolerance {}", tolerance),
            });
        }
        self.get(solid)?;
        self.exported.push(path.to_path_buf());
        Ok(())
    }
}

/// Deterministic box mesh standing in for a real tessellation:
/// one quad (two triangles) per face, flat normals.
fn box_mesh(min: [f64; 3], max: [f64; 3]) -> RenderMesh {
    // (normal, four corners in winding order) per face.
    let faces: [([f64; 3], [[f64; 3]; 4]); 6] = [
        (
            [0.0, 0.0, -1.0],
            [
                [min[0], min[1], min[2]],
                [max[0], min[1], min[2]],
                [max[0], max[1], min[2]],
                [min[0], max[1], min[2]],
            ],
        ),
        (
            [0.0, 0.0, 1.0],
            [
                [min[0], min[1], max[2]],
                [max[0], min[1], max[2]],
                [max[0], max[1], max[2]],
                [min[0], max[1], max[2]],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [min[0], min[1], min[2]],
                [max[0], min[1], min[2]],
                [max[0], min[1], max[2]],
                [min[0], min[1], max[2]],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [min[0], max[1], min[2]],
                [max[0], max[1], min[2]],
                [max[0], max[1], max[2]],
                [min[0], max[1], max[2]],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [min[0], min[1], min[2]],
                [min[0], max[1], min[2]],
                [min[0], max[1], max[2]],
                [min[0], min[1], max[2]],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [max[0], min[1], min[2]],
                [max[0], max[1], min[2]],
                [max[0], max[1], max[2]],
                [max[0], min[1], max[2]],
            ],
        ),
    ];

    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for (normal, corners) in &faces {
        let base = (vertices.len() / 3) as u32;
        for corner in corners {
            vertices.extend_from_slice(&[corner[0] as f32, corner[1] as f32, corner[2] as f32]);
            normals.extend_from_slice(&[normal[0] as f32, normal[1] as f32, normal[2] as f32]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    RenderMesh {
        vertices,
        normals,
        indices,
    }
}
