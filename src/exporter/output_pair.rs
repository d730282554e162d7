// ==========================================
// Prospect Intake - Output Pair
// ==========================================
// Both outputs are written to staging siblings first and renamed into
// place only when both writes succeeded. A failed run leaves neither.
// ==========================================

use crate::domain::{CustomerDocument, RejectedRecord};
use crate::exporter::{AcceptedJsonSink, RejectedCsvSink};
use crate::importer::error::{ImportError, ImportResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const STAGING_SUFFIX: &str = ".partial";

/// `<path>.partial`, next to the final file so the rename stays on one filesystem
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

fn discard(paths: &[&Path]) {
    for path in paths {
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "could not remove staging file");
            }
        }
    }
}

fn commit(staged: &Path, target: &Path) -> ImportResult<()> {
    std::fs::rename(staged, target)
        .map_err(|e| ImportError::FileWriteError(format!("{}: {}", target.display(), e)))
}

/// Write the rejected CSV and the accepted JSON, all or nothing
pub fn write_outputs(
    locale: &str,
    rejected_path: &Path,
    rejected: &[RejectedRecord],
    accepted_path: &Path,
    documents: &[CustomerDocument],
) -> ImportResult<()> {
    let rejected_staging = staging_path(rejected_path);
    let accepted_staging = staging_path(accepted_path);

    let written = RejectedCsvSink::new(locale)
        .write(&rejected_staging, rejected)
        .and_then(|_| AcceptedJsonSink.write(&accepted_staging, documents));
    if let Err(e) = written {
        discard(&[&rejected_staging, &accepted_staging]);
        return Err(e);
    }

    if let Err(e) = commit(&rejected_staging, rejected_path) {
        discard(&[&rejected_staging, &accepted_staging]);
        return Err(e);
    }
    if let Err(e) = commit(&accepted_staging, accepted_path) {
        // the rejected file is already in place; take it back out
        discard(&[rejected_path, &accepted_staging]);
        return Err(e);
    }

    debug!(
        rejected = %rejected_path.display(),
        accepted = %accepted_path.display(),
        "outputs committed"
    );
    Ok(())
}
