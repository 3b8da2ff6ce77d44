pub mod catalog;
pub mod classes;
pub mod costs;
pub mod generate;

use std::path::Path;

use nc_core::Catalog;
use nc_core::seed::sample_catalog;

/// Load a catalog from `path`, or the built-in sample catalog.
fn load_catalog(path: Option<&Path>) -> Result<Catalog, String> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Catalog::from_json(&json).map_err(|e| format!("invalid catalog {}: {e}", path.display()))
        }
        None => sample_catalog().map_err(|e| e.to_string()),
    }
}

/// Render a rating as filled and empty dots.
fn dots(value: u32, max: u32) -> String {
    let filled = value.min(max) as usize;
    let empty = max.saturating_sub(value) as usize;
    format!("{}{}", "●".repeat(filled), "○".repeat(empty))
}
