//! YAML dump of a harvested edition, for inspecting decomposition and chunking.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::types::{Chunk, SectionDocument};

/// Everything produced from one edition page.
#[derive(Debug, Serialize)]
pub struct EditionDump<'a> {
    pub url: &'a str,
    pub edition: String,
    pub effective_from: String,
    pub effective_to: String,
    pub sections: &'a [SectionDocument],
    pub chunks: &'a [Chunk],
}

impl<'a> EditionDump<'a> {
    /// Build a dump; the edition window is taken from the first section.
    #[must_use]
    pub fn new(url: &'a str, sections: &'a [SectionDocument], chunks: &'a [Chunk]) -> Self {
        let (edition, effective_from, effective_to) = sections
            .first()
            .map(|s| (s.window.title(), s.window.from_date(), s.window.to_date()))
            .unwrap_or_default();

        Self {
            url,
            edition,
            effective_from,
            effective_to,
            sections,
            chunks,
        }
    }
}

/// Generate the YAML text of a dump.
pub fn generate_yaml(dump: &EditionDump<'_>) -> Result<String> {
    let yaml_string = serde_yaml_ng::to_string(dump)?;
    let lines: Vec<&str> = yaml_string.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Save a dump as a YAML file.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
///
/// # Returns
/// Path to the saved file
pub fn save_yaml(dump: &EditionDump<'_>, output: &Path) -> Result<PathBuf> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = generate_yaml(dump)?;
    let temp_file = output.with_extension("yaml.tmp");

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if output.exists() {
        fs::remove_file(output)?;
    }

    fs::rename(&temp_file, output)?;

    Ok(output.to_path_buf())
}
