use bore_ops::{
    build_cutter_solid, build_revolved_solid, generate_cutters, sanitize, CutterSpec,
    GeometryError,
};
use bore_types::{profile_span, HoleSpec, PartSpec, ProfilePoint};
use kernel_api::{Kernel, RenderMesh, SolidHandle};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::types::{AssemblyError, AssemblyParams, AssemblyStage};

/// One part being assembled against one kernel.
///
/// Sessions hold sanitized private copies of the caller's profiles plus
/// every solid built so far, so front-ends can render intermediates even
/// when a later stage fails. Independent sessions share nothing and may run
/// on separate threads, each with its own kernel.
pub struct AssemblySession {
    id: Uuid,
    name: String,
    params: AssemblyParams,
    stage: AssemblyStage,
    internal: Vec<ProfilePoint>,
    external: Vec<ProfilePoint>,
    holes: Vec<HoleSpec>,
    cutter_specs: Vec<CutterSpec>,
    external_solid: Option<SolidHandle>,
    internal_solid: Option<SolidHandle>,
    cutter_solids: Vec<SolidHandle>,
    body_solid: Option<SolidHandle>,
    final_solid: Option<SolidHandle>,
}

impl AssemblySession {
    pub fn new(params: AssemblyParams) -> Result<Self, AssemblyError> {
        params.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: String::new(),
            params,
            stage: AssemblyStage::Empty,
            internal: Vec::new(),
            external: Vec::new(),
            holes: Vec::new(),
            cutter_specs: Vec::new(),
            external_solid: None,
            internal_solid: None,
            cutter_solids: Vec::new(),
            body_solid: None,
            final_solid: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &AssemblyParams {
        &self.params
    }

    pub fn stage(&self) -> &AssemblyStage {
        &self.stage
    }

    /// Load a part, sanitizing both profiles into private copies. The
    /// caller's `PartSpec` is left untouched. Any previously built solids
    /// are dropped and the session returns to `ProfilesLoaded`.
    pub fn load_part(&mut self, part: &PartSpec) {
        self.name = part.name.clone();
        self.internal = sanitize(&part.internal);
        self.external = sanitize(&part.external);
        self.holes = part.holes.clone();
        self.clear_solids();
        self.stage = AssemblyStage::ProfilesLoaded;
        info!(part = %self.name, holes = self.holes.len(), "profiles loaded");

        // Holes outside the span measured on both surfaces get the
        // interpolator's tail clamp instead of a real wall thickness.
        if let (Some((int_start, int_end)), Some((ext_start, ext_end))) =
            (profile_span(&self.internal), profile_span(&self.external))
        {
            let start = int_start.max(ext_start);
            let end = int_end.min(ext_end);
            for (i, hole) in self.holes.iter().enumerate() {
                if hole.axial_position < start || hole.axial_position > end {
                    warn!(
                        hole = i,
                        position = hole.axial_position,
                        "hole lies outside the measured span [{start}, {end}]"
                    );
                }
            }
        }
    }

    /// Replace the run parameters. Built solids are invalidated: cutter
    /// geometry depends on the conicity angle globally, so the pipeline
    /// restarts from `ProfilesLoaded`.
    pub fn set_params(&mut self, params: AssemblyParams) -> Result<(), AssemblyError> {
        params.validate()?;
        self.params = params;
        if self.stage != AssemblyStage::Empty {
            self.clear_solids();
            self.stage = AssemblyStage::ProfilesLoaded;
        }
        Ok(())
    }

    fn clear_solids(&mut self) {
        self.cutter_specs.clear();
        self.external_solid = None;
        self.internal_solid = None;
        self.cutter_solids.clear();
        self.body_solid = None;
        self.final_solid = None;
    }

    fn require_stage(&self, expected: AssemblyStage) -> Result<(), AssemblyError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(AssemblyError::WrongStage {
                expected: expected.to_string(),
                actual: self.stage.to_string(),
            })
        }
    }

    fn fail(&mut self, err: GeometryError) -> AssemblyError {
        let stage = err.stage();
        warn!(stage = %stage, error = %err, "assembly failed");
        self.stage = AssemblyStage::Failed(stage);
        AssemblyError::Geometry(err)
    }

    /// Revolve both sanitized profiles into solids.
    #[instrument(skip(self, kernel), fields(part = %self.name))]
    pub fn build_solids(&mut self, kernel: &mut dyn Kernel) -> Result<(), AssemblyError> {
        self.require_stage(AssemblyStage::ProfilesLoaded)?;

        let external = match build_revolved_solid(kernel, &self.external, self.params.revolve_resolution)
        {
            Ok(handle) => handle,
            Err(e) => return Err(self.fail(e)),
        };
        let internal = match build_revolved_solid(kernel, &self.internal, self.params.revolve_resolution)
        {
            Ok(handle) => handle,
            Err(e) => return Err(self.fail(e)),
        };

        self.external_solid = Some(external);
        self.internal_solid = Some(internal);
        self.stage = AssemblyStage::SolidsBuilt;
        info!("revolution solids built");
        Ok(())
    }

    /// Subtract the bore from the blank, leaving the hollow body.
    ///
    /// Non-watertight operands get a single repair pass; a solid that stays
    /// defective aborts before the subtraction is even attempted, since a
    /// boolean on an open solid returns garbage rather than a recoverable
    /// partial result.
    #[instrument(skip(self, kernel), fields(part = %self.name))]
    pub fn hollow_body(&mut self, kernel: &mut dyn Kernel) -> Result<(), AssemblyError> {
        self.require_stage(AssemblyStage::SolidsBuilt)?;

        let (external, internal) = match (&self.external_solid, &self.internal_solid) {
            (Some(e), Some(i)) => (e.clone(), i.clone()),
            _ => {
                return Err(AssemblyError::WrongStage {
                    expected: AssemblyStage::SolidsBuilt.to_string(),
                    actual: self.stage.to_string(),
                })
            }
        };

        let external = match ensure_watertight(kernel, external, "external") {
            Ok(handle) => handle,
            Err(e) => return Err(self.fail(e)),
        };
        let internal = match ensure_watertight(kernel, internal, "internal") {
            Ok(handle) => handle,
            Err(e) => return Err(self.fail(e)),
        };
        self.external_solid = Some(external.clone());
        self.internal_solid = Some(internal.clone());

        let body = match kernel.subtract(&external, &internal) {
            Ok(handle) => handle,
            Err(e) => {
                return Err(self.fail(GeometryError::BodyBooleanFailed {
                    reason: e.to_string(),
                }))
            }
        };

        self.body_solid = Some(body);
        self.stage = AssemblyStage::BodyCut;
        info!("body hollowed");
        Ok(())
    }

    /// Drill every tone hole, in hole-list order, against the hollow body.
    ///
    /// Cutters are sized against the hollow wall, which is why the body
    /// must be cut first. Each cutter solid is retained as it is built, so
    /// a failure at hole `i` still leaves cutters `0..=i` inspectable.
    #[instrument(skip(self, kernel), fields(part = %self.name))]
    pub fn cut_tone_holes(&mut self, kernel: &mut dyn Kernel) -> Result<(), AssemblyError> {
        self.require_stage(AssemblyStage::BodyCut)?;

        let specs = match generate_cutters(
            &self.holes,
            &self.internal,
            &self.external,
            self.params.conicity_angle_deg,
        ) {
            Ok(specs) => specs,
            Err(e) => return Err(self.fail(e)),
        };
        self.cutter_specs = specs.clone();
        self.cutter_solids.clear();

        let mut body = match &self.body_solid {
            Some(handle) => handle.clone(),
            None => {
                return Err(AssemblyError::WrongStage {
                    expected: AssemblyStage::BodyCut.to_string(),
                    actual: self.stage.to_string(),
                })
            }
        };

        for (i, spec) in specs.iter().enumerate() {
            let cutter = match build_cutter_solid(kernel, i, spec) {
                Ok(handle) => handle,
                Err(e) => return Err(self.fail(e)),
            };
            self.cutter_solids.push(cutter.clone());

            body = match kernel.subtract(&body, &cutter) {
                Ok(handle) => handle,
                Err(e) => {
                    return Err(self.fail(GeometryError::CutterBooleanFailed {
                        hole: i,
                        reason: e.to_string(),
                    }))
                }
            };
        }

        self.final_solid = Some(body);
        self.stage = AssemblyStage::FullyAssembled;
        info!(holes = self.holes.len(), "assembly complete");
        Ok(())
    }

    /// Run the whole pipeline from `ProfilesLoaded`.
    pub fn assemble(&mut self, kernel: &mut dyn Kernel) -> Result<(), AssemblyError> {
        self.build_solids(kernel)?;
        self.hollow_body(kernel)?;
        self.cut_tone_holes(kernel)?;
        Ok(())
    }

    /// Tessellate the finished part at the session's mesh quality.
    pub fn tessellate_final(&self, kernel: &mut dyn Kernel) -> Result<RenderMesh, AssemblyError> {
        let solid = self
            .final_solid
            .as_ref()
            .ok_or_else(|| AssemblyError::WrongStage {
                expected: AssemblyStage::FullyAssembled.to_string(),
                actual: self.stage.to_string(),
            })?;
        Ok(kernel.tessellate(solid, self.params.tessellation_tolerance())?)
    }

    // Sanitized working copies, for 2D profile display.
    pub fn sanitized_internal(&self) -> &[ProfilePoint] {
        &self.internal
    }

    pub fn sanitized_external(&self) -> &[ProfilePoint] {
        &self.external
    }

    pub fn holes(&self) -> &[HoleSpec] {
        &self.holes
    }

    // Intermediates stay available after a failure, for diagnostics.
    pub fn external_solid(&self) -> Option<&SolidHandle> {
        self.external_solid.as_ref()
    }

    pub fn internal_solid(&self) -> Option<&SolidHandle> {
        self.internal_solid.as_ref()
    }

    pub fn body_solid(&self) -> Option<&SolidHandle> {
        self.body_solid.as_ref()
    }

    pub fn cutter_specs(&self) -> &[CutterSpec] {
        &self.cutter_specs
    }

    pub fn cutter_solids(&self) -> &[SolidHandle] {
        &self.cutter_solids
    }

    pub fn final_solid(&self) -> Option<&SolidHandle> {
        self.final_solid.as_ref()
    }
}

/// Check a boolean operand, asking the kernel for at most one repair pass.
fn ensure_watertight(
    kernel: &mut dyn Kernel,
    solid: SolidHandle,
    which: &str,
) -> Result<SolidHandle, GeometryError> {
    let wrap = |e: kernel_api::KernelError| GeometryError::BodyBooleanFailed {
        reason: e.to_string(),
    };

    if kernel.is_watertight(&solid).map_err(wrap)? {
        return Ok(solid);
    }
    warn!(which, "solid is not watertight, requesting one repair pass");
    let repaired = kernel.repair(&solid).map_err(wrap)?;
    if kernel.is_watertight(&repaired).map_err(wrap)? {
        Ok(repaired)
    } else {
        Err(GeometryError::NotWatertight {
            which: which.to_string(),
        })
    }
}
