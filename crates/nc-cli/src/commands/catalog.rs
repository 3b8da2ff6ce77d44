use std::path::Path;

pub fn run(output: Option<&Path>) -> Result<(), String> {
    let catalog = super::load_catalog(None)?;
    let json = catalog.to_json().map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            println!("  Wrote catalog to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
