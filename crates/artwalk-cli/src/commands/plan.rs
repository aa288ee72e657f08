use clap::Subcommand;
use std::path::PathBuf;

use artwalk_core::{
    text_summary, Config, HttpRouteProvider, HttpVenueSource, Itinerary, Planner, PlanConfig,
    ReconcileReport, TimeField, TransportMode, Venue, VenueSource,
};
use chrono::NaiveDate;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Build a new plan from venue ids (fetched from the venue service)
    New {
        /// Plan date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Read venue records from a JSON file instead of the service
        #[arg(long)]
        venues_file: Option<PathBuf>,
        /// Override the configured start time (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// Venue ids, in visit order
        ids: Vec<String>,
    },
    /// Print the plan timetable
    Show {
        /// Print the raw plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move an item to a new position (re-resolves all routes)
    Move { from: usize, to: usize },
    /// Remove an item
    Remove { index: usize },
    /// Append a 30-minute break
    Break,
    /// Change a transit segment's mode (walk|drive|transit|bicycle)
    Mode { index: usize, mode: TransportMode },
    /// Edit the note on a visit or break
    Note { index: usize, text: String },
    /// Manually override a displayed time (scratch edit, re-timed on the
    /// next routes pass)
    SetTime {
        index: usize,
        field: TimeField,
        value: String,
    },
    /// Re-run route reconciliation over the whole plan
    Routes,
}

pub fn run(action: PlanAction, plan_file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = super::plan_path(plan_file)?;
    let config = Config::load_or_default();

    match action {
        PlanAction::New {
            date,
            venues_file,
            start,
            ids,
        } => {
            let venues = collect_venues(&config, venues_file, &ids)?;
            for venue in &venues {
                if venue.is_closed_on(date) {
                    eprintln!(
                        "warning: {} is closed on {}",
                        venue.title,
                        date.format("%A")
                    );
                }
            }

            let mut plan_config: PlanConfig = config.plan.clone();
            if let Some(start) = start {
                plan_config.start_time = start;
            }
            let provider = HttpRouteProvider::new(&config.endpoints.routing_url)?;
            let (planner, report) = Planner::build(venues, date, plan_config, provider)?;
            warn_on_fallbacks(&report);

            let plan = planner.into_plan();
            super::save_plan(&path, &plan)?;
            print_timetable(&plan);
        }
        PlanAction::Show { json } => {
            let plan = super::load_plan(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_timetable(&plan);
            }
        }
        PlanAction::Move { from, to } => {
            let plan = super::load_plan(&path)?;
            let provider = HttpRouteProvider::new(&config.endpoints.routing_url)?;
            let mut planner = Planner::new(plan, provider);
            let report = planner.move_item(from, to)?;
            warn_on_fallbacks(&report);
            let plan = planner.into_plan();
            super::save_plan(&path, &plan)?;
            print_timetable(&plan);
        }
        PlanAction::Remove { index } => {
            let mut plan = super::load_plan(&path)?;
            let removed = plan.remove_item(index)?;
            super::save_plan(&path, &plan)?;
            println!("removed item {index} ({})", removed.id());
        }
        PlanAction::Break => {
            let mut plan = super::load_plan(&path)?;
            plan.add_break()?;
            super::save_plan(&path, &plan)?;
            print_timetable(&plan);
        }
        PlanAction::Mode { index, mode } => {
            let plan = super::load_plan(&path)?;
            let provider = HttpRouteProvider::new(&config.endpoints.routing_url)?;
            let mut planner = Planner::new(plan, provider);
            let report = planner.set_mode(index, mode)?;
            warn_on_fallbacks(&report);
            let plan = planner.into_plan();
            super::save_plan(&path, &plan)?;
            print_timetable(&plan);
        }
        PlanAction::Note { index, text } => {
            let mut plan = super::load_plan(&path)?;
            plan.set_note(index, &text)?;
            super::save_plan(&path, &plan)?;
            println!("note updated");
        }
        PlanAction::SetTime {
            index,
            field,
            value,
        } => {
            let mut plan = super::load_plan(&path)?;
            plan.set_item_time(index, field, &value)?;
            super::save_plan(&path, &plan)?;
            println!("time overridden; run `plan routes` to re-time the rest");
        }
        PlanAction::Routes => {
            let plan = super::load_plan(&path)?;
            let provider = HttpRouteProvider::new(&config.endpoints.routing_url)?;
            let mut planner = Planner::new(plan, provider);
            let report = planner.refresh_routes();
            warn_on_fallbacks(&report);
            println!(
                "routes: {} resolved, {} fallbacks, {} skipped",
                report.resolved, report.fallbacks, report.skipped
            );
            let plan = planner.into_plan();
            super::save_plan(&path, &plan)?;
            print_timetable(&plan);
        }
    }
    Ok(())
}

/// Venue records for the requested ids, from a local JSON file or the
/// configured venue service.
fn collect_venues(
    config: &Config,
    venues_file: Option<PathBuf>,
    ids: &[String],
) -> Result<Vec<Venue>, Box<dyn std::error::Error>> {
    if let Some(file) = venues_file {
        let all: Vec<Venue> = serde_json::from_str(&std::fs::read_to_string(file)?)?;
        if ids.is_empty() {
            return Ok(all);
        }
        return ids
            .iter()
            .map(|id| {
                all.iter()
                    .find(|v| &v.id == id)
                    .cloned()
                    .ok_or_else(|| format!("venue '{id}' not in file").into())
            })
            .collect();
    }

    let source = HttpVenueSource::new(&config.endpoints.venues_url)?;
    Ok(source.venues(ids)?)
}

fn warn_on_fallbacks(report: &ReconcileReport) {
    // Single aggregate notice per pass, never one line per segment.
    if report.any_fallback() {
        eprintln!("warning: some routes could not be calculated; default times were used");
    }
}

fn print_timetable(plan: &Itinerary) {
    println!(
        "Plan for {} ({})",
        plan.date,
        artwalk_core::clock::format_duration(plan.total_minutes())
    );
    if plan.time_override_pending {
        println!("(manual time override pending; times may be inconsistent)");
    }
    println!();
    println!("{}", text_summary(plan));
}
