use clap::Subcommand;
use std::path::PathBuf;

use artwalk_core::{calendar_events, text_summary};

#[derive(Subcommand)]
pub enum ExportAction {
    /// Calendar-event records (one per visit) as JSON
    Events,
    /// Plain-text share summary
    Text,
}

pub fn run(
    action: ExportAction,
    plan_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = super::plan_path(plan_file)?;
    let plan = super::load_plan(&path)?;

    match action {
        ExportAction::Events => {
            println!("{}", serde_json::to_string_pretty(&calendar_events(&plan))?);
        }
        ExportAction::Text => {
            println!("{}", text_summary(&plan));
        }
    }
    Ok(())
}
