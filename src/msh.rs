/*!
 * Gmsh `.msh` metadata extraction.
 *
 * Only the `$PhysicalNames` block is read; the rest of the file is opaque.
 * Extraction never fails: problems are reported through `tracing` and an empty
 * list is returned, leaving the decision to continue to the caller.
 */

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

fn section_regex() -> &'static Regex {
    static SECTION: OnceLock<Regex> = OnceLock::new();
    SECTION.get_or_init(|| {
        Regex::new(r"(?s)\$PhysicalNames(.*?)\$EndPhysicalNames").expect("static regex")
    })
}

fn quoted_regex() -> &'static Regex {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    QUOTED.get_or_init(|| Regex::new(r#""([^"]*)""#).expect("static regex"))
}

/// Extract the boundary names from the text of a mesh file.
/// Returns `None` when the section markers are missing.
pub fn boundary_names_from_str(content: &str) -> Option<Vec<String>> {
    let block = section_regex().captures(content)?.get(1)?.as_str();
    Some(
        quoted_regex()
            .captures_iter(block)
            .filter_map(|caps| caps.get(1))
            .filter(|name| !name.as_str().is_empty())
            .map(|name| name.as_str().to_string())
            .collect(),
    )
}

/// Extract the boundary names from a mesh file, in file order.
/// Missing files, missing sections and read errors all yield an empty list.
pub fn boundary_names(msh_file: &Path) -> Vec<String> {
    let shown = msh_file.display();
    if !msh_file.exists() {
        tracing::warn!("MSH file does not exist: {}", shown);
        return Vec::new();
    }
    let Some(path) = msh_file.to_str() else {
        tracing::warn!("MSH path is not valid UTF-8: {}", shown);
        return Vec::new();
    };

    let content = match crate::io::read_to_string_lossy(path) {
        Ok(content) => content,
        Err(error) => {
            tracing::warn!("Failed to read MSH file:\n{}", error);
            return Vec::new();
        },
    };

    match boundary_names_from_str(&content) {
        Some(names) => {
            tracing::debug!(count = names.len(), "parsed $PhysicalNames from {}", shown);
            names
        },
        None => {
            tracing::warn!("No $PhysicalNames block found in {}", shown);
            Vec::new()
        },
    }
}
