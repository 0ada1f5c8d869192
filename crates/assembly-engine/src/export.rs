use std::path::{Path, PathBuf};

use kernel_api::Kernel;
use tracing::info;

use crate::session::AssemblySession;
use crate::types::AssemblyError;

/// Export every piece the session has built so far as STL, next to `base`.
///
/// Writes `<base>_EXTERNAL.stl` and `<base>_INTERNAL.stl` for the two
/// revolutions, `<base>_CUTTER_<n>.stl` (1-based) per realized cutter, and
/// `<base>_FINAL.stl` once fully assembled, all at the session's
/// tessellation tolerance. Pieces that do not exist yet are skipped, so a
/// failed assembly can still dump its intermediates for inspection. Returns
/// the paths written, in order.
pub fn export_pieces(
    session: &AssemblySession,
    kernel: &mut dyn Kernel,
    base: &Path,
) -> Result<Vec<PathBuf>, AssemblyError> {
    let tolerance = session.params().tessellation_tolerance();
    let mut written = Vec::new();

    if let Some(solid) = session.external_solid() {
        let path = piece_path(base, "EXTERNAL");
        kernel.export_stl(solid, &path, tolerance)?;
        written.push(path);
    }
    if let Some(solid) = session.internal_solid() {
        let path = piece_path(base, "INTERNAL");
        kernel.export_stl(solid, &path, tolerance)?;
        written.push(path);
    }
    for (i, cutter) in session.cutter_solids().iter().enumerate() {
        let path = piece_path(base, &format!("CUTTER_{}", i + 1));
        kernel.export_stl(cutter, &path, tolerance)?;
        written.push(path);
    }
    if let Some(solid) = session.final_solid() {
        let path = piece_path(base, "FINAL");
        kernel.export_stl(solid, &path, tolerance)?;
        written.push(path);
    }

    if written.is_empty() {
        return Err(AssemblyError::NothingToExport);
    }
    info!(part = %session.name(), count = written.len(), "exported pieces");
    Ok(written)
}

/// `<dir>/<stem>_<SUFFIX>.stl`, dropping any extension `base` carried.
fn piece_path(base: &Path, suffix: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "part".to_string());
    base.with_file_name(format!("{stem}_{suffix}.stl"))
}
