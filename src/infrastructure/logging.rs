use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

/// Sends `tracing` output to `log_file`, appending across runs.
///
/// The terminal belongs to the UI, so nothing is written to stdout or
/// stderr. If the file cannot be opened logging stays off and the error is
/// returned for the caller to report after the UI exits.
pub fn setup_tracing(log_file: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        // escape codes are noise in a plain log file
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(())
}
