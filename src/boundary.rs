/*!
 * Boundary patch-type rewriting.
 *
 * Each boundary region found in the mesh metadata becomes a directive that rewrites
 * `type patch;` inside that region's block of `constant/polyMesh/boundary`.
 * Directives are rendered as `sed` commands scoped to the range between the first
 * line naming the region and the next closing brace.
 */

use itertools::Itertools;
use serde::{Serialize, Deserialize};
use strum::Display;

/// Boundary file written by `gmshToFoam`, relative to the case directory.
pub const BOUNDARY_FILE: &str = "constant/polyMesh/boundary";

/// Region `gmshToFoam` creates for faces without a physical group.
pub const DEFAULT_REGION: &str = "defaultFaces";

/// Patch classification written into the boundary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PatchType {
    Wall,
    Patch,
}
impl PatchType {
    /// Any region whose name contains "wall" (any case) is a wall.
    pub fn classify(region: &str) -> Self {
        if region.to_lowercase().contains("wall") {
            PatchType::Wall
        } else {
            PatchType::Patch
        }
    }
}

/// A single scoped substitution for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchDirective {
    pub region: String,
    pub patch_type: PatchType,
}
impl PatchDirective {
    pub fn new(region: &str) -> Self {
        PatchDirective{region: region.to_string(), patch_type: PatchType::classify(region)}
    }

    /// Render as an in-place `sed` command against `boundary_file`.
    pub fn to_sed(&self, boundary_file: &str) -> String {
        let address = escape_single_quoted(&escape_sed_pattern(&self.region));
        format!(
            "sed -i '/{}/,/}}/ s/type[[:space:]]\\+patch;/type            {};/' {}",
            address, self.patch_type, boundary_file,
        )
    }
}

/// Build the directive list: one per region in order, then the `defaultFaces` fallback.
pub fn patch_directives(boundary_names: &[String]) -> Vec<PatchDirective> {
    boundary_names
        .iter()
        .map(|name| PatchDirective::new(name))
        .chain(std::iter::once(PatchDirective{
            region: DEFAULT_REGION.to_string(),
            patch_type: PatchType::Wall,
        }))
        .collect()
}

/// Join all directives into one `&&` chained shell fragment.
pub fn patch_script(directives: &[PatchDirective], boundary_file: &str) -> String {
    directives.iter().map(|directive| directive.to_sed(boundary_file)).join(" && ")
}

/// Escape basic-regex metacharacters and the `/` delimiter.
/// Braces stay literal in a BRE, so they pass through.
fn escape_sed_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '/' | '.' | '*' | '[' | ']' | '^' | '$' => {
                escaped.push('\\');
                escaped.push(c);
            },
            '\n' => escaped.push_str("\\n"),
            '\r' => {},
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Make text safe inside a single-quoted shell word.
fn escape_single_quoted(text: &str) -> String {
    text.replace('\'', r"'\''")
}
