use crate::app::error::ScanWarning;

/// Files between two progress reports.
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Side channel for advisory output produced while scanning.
///
/// Nothing sent here affects the scan result.
pub trait Diagnostics {
    fn warning(&self, warning: &ScanWarning);

    fn progress(&self, files_found: u64);
}

/// Routes diagnostics through the `log` facade (stderr under `env_logger`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warning(&self, warning: &ScanWarning) {
        match &warning.path {
            Some(path) => log::warn!(
                "Skipping {} ({:?}): {}",
                path.display(),
                warning.kind,
                warning.message
            ),
            None => log::warn!("Skipping entry ({:?}): {}", warning.kind, warning.message),
        }
    }

    fn progress(&self, files_found: u64) {
        log::info!("Found {} files...", files_found);
    }
}
