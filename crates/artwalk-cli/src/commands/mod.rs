pub mod config;
pub mod export;
pub mod plan;

use artwalk_core::Itinerary;
use std::path::{Path, PathBuf};

/// Resolve the plan state file: explicit override or the config dir.
pub fn plan_path(custom: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match custom {
        Some(path) => Ok(path),
        None => Ok(artwalk_core::config::data_dir()?.join("plan.json")),
    }
}

pub fn load_plan(path: &Path) -> Result<Itinerary, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| format!("no plan at {}; create one with `plan new`", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_plan(path: &Path, plan: &Itinerary) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, serde_json::to_string_pretty(plan)?)?;
    Ok(())
}
