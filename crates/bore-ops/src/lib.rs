pub mod cutter;
pub mod interpolate;
pub mod revolve;
pub mod sanitize;
pub mod types;

pub use cutter::{
    build_cutter_solid, generate_cutter, generate_cutters, CutterSpec, CUTTER_MARGIN,
};
pub use interpolate::radius_at;
pub use revolve::{build_revolved_solid, profile_polyline};
pub use sanitize::{sanitize, STEP_EPSILON};
pub use types::GeometryError;
