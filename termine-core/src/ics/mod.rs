//! ICS file generation.
//!
//! One `.ics` document is written per prescription, named after it.

mod generate;

use std::path::Path;

pub use generate::generate_ics;

/// Output file name for a source document: `rezept_2026.pdf` -> `rezept_2026.ics`
pub fn ics_file_name(document: &Path) -> String {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "appointments".to_string());

    format!("{}.ics", stem)
}
