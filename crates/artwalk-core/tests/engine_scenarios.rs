//! End-to-end engine scenarios: builder, recalculator, edits, export.

use artwalk_core::{
    calendar_events, clock, Itinerary, ItineraryItem, PlanConfig, Planner, Route, RouteProvider,
    RoutingError, TransportMode, Venue,
};
use artwalk_core::{Coordinates, BREAK_MINUTES};
use chrono::NaiveDate;

fn make_config() -> PlanConfig {
    PlanConfig {
        start_time: "09:00".to_string(),
        visit_duration_minutes: 60,
        default_transit_minutes: 30,
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

fn assert_contiguous(plan: &Itinerary) {
    for pair in plan.items.windows(2) {
        assert_eq!(
            pair[1].start_time(),
            pair[0].end_time(),
            "adjacent items must be contiguous"
        );
    }
}

/// Always-failing provider.
struct NoRoutes;

impl RouteProvider for NoRoutes {
    fn compute_route(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
        _mode: TransportMode,
    ) -> Result<Route, RoutingError> {
        Err(RoutingError::Request("offline".to_string()))
    }
}

/// Fixed-answer provider.
struct FlatRoutes {
    duration_seconds: i64,
}

impl RouteProvider for FlatRoutes {
    fn compute_route(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
        _mode: TransportMode,
    ) -> Result<Route, RoutingError> {
        Ok(Route {
            duration_seconds: self.duration_seconds,
            distance_meters: 1500,
            encoded_path: "poly".to_string(),
        })
    }
}

#[test]
fn test_two_venue_plan_matches_reference_timeline() {
    // Builder with venues [A, B], start 09:00, visits 60, transit 30.
    let plan = Itinerary::build(
        vec![Venue::new("a", "A"), Venue::new("b", "B")],
        date(),
        make_config(),
    )
    .unwrap();

    assert_eq!(plan.items.len(), 3);
    match &plan.items[0] {
        ItineraryItem::Visit {
            start_time,
            end_time,
            venue,
            ..
        } => {
            assert_eq!(venue.id, "a");
            assert_eq!(start_time, "09:00");
            assert_eq!(end_time, "10:00");
        }
        _ => panic!("expected visit"),
    }
    match &plan.items[1] {
        ItineraryItem::Transit {
            start_time,
            end_time,
            mode,
            ..
        } => {
            assert_eq!(*mode, TransportMode::PublicTransit);
            assert_eq!(start_time, "10:00");
            assert_eq!(end_time, "10:30");
        }
        _ => panic!("expected transit"),
    }
    match &plan.items[2] {
        ItineraryItem::Visit {
            start_time,
            end_time,
            venue,
            ..
        } => {
            assert_eq!(venue.id, "b");
            assert_eq!(start_time, "10:30");
            assert_eq!(end_time, "11:30");
        }
        _ => panic!("expected visit"),
    }

    assert_eq!(plan.total_minutes(), Some(150));
    assert_eq!(clock::format_duration(plan.total_minutes()), "2 hr 30 min");
}

#[test]
fn test_calendar_export_covers_visits_only() {
    let plan = Itinerary::build(
        vec![Venue::new("a", "A"), Venue::new("b", "B")],
        date(),
        make_config(),
    )
    .unwrap();
    let events = calendar_events(&plan);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "A");
    assert_eq!(events[1].title, "B");
}

#[test]
fn test_duration_fidelity_per_variant() {
    let mut plan = Itinerary::build(
        vec![
            Venue::new("a", "A"),
            Venue::new("b", "B"),
            Venue::new("c", "C"),
        ],
        date(),
        make_config(),
    )
    .unwrap();
    plan.add_break().unwrap();
    if let ItineraryItem::Transit {
        duration_minutes, ..
    } = &mut plan.items[3]
    {
        *duration_minutes = Some(17);
    }
    plan.recalculate();

    for item in &plan.items {
        let span = clock::to_minutes(item.end_time()) - clock::to_minutes(item.start_time());
        match item {
            ItineraryItem::Visit { .. } => assert_eq!(span, 60),
            ItineraryItem::Break { .. } => assert_eq!(span, BREAK_MINUTES),
            ItineraryItem::Transit {
                duration_minutes, ..
            } => assert_eq!(span, duration_minutes.unwrap_or(30)),
        }
    }
}

#[test]
fn test_recalculation_is_idempotent_after_edits() {
    let mut plan = Itinerary::build(
        vec![
            Venue::new("a", "A"),
            Venue::new("b", "B"),
            Venue::new("c", "C"),
        ],
        date(),
        make_config(),
    )
    .unwrap();
    plan.move_item(4, 0).unwrap();
    plan.add_break().unwrap();

    let snapshot: Vec<String> = plan
        .items
        .iter()
        .map(|i| format!("{}|{}", i.start_time(), i.end_time()))
        .collect();
    plan.recalculate();
    let again: Vec<String> = plan
        .items
        .iter()
        .map(|i| format!("{}|{}", i.start_time(), i.end_time()))
        .collect();
    assert_eq!(snapshot, again);
    assert_contiguous(&plan);
}

#[test]
fn test_reorder_rebuilds_legs_and_reresolves() {
    // [V1, T1, V2, T2, V3]: moving V3 to the front yields
    // [V3, T?, V1, T?, V2] with times recomputed from the start.
    let geocoded = |id: &str, lat: f64| Venue::new(id, id.to_uppercase()).with_coordinates(lat, 2.0);
    let (mut planner, _) = Planner::build(
        vec![geocoded("v1", 48.0), geocoded("v2", 48.1), geocoded("v3", 48.2)],
        date(),
        make_config(),
        FlatRoutes {
            duration_seconds: 600,
        },
    )
    .unwrap();

    planner.move_item(4, 0).unwrap();
    let plan = planner.plan();

    let order: Vec<Option<&str>> = plan
        .items
        .iter()
        .map(|i| i.venue().map(|v| v.id.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![Some("v3"), None, Some("v1"), None, Some("v2")]
    );
    assert_eq!(plan.items[0].start_time(), "09:00");
    assert_contiguous(plan);
    // Every leg re-resolved through the provider: 600 s -> 10 min.
    for leg in plan.items.iter().filter(|i| i.is_transit()) {
        if let ItineraryItem::Transit {
            duration_minutes, ..
        } = leg
        {
            assert_eq!(*duration_minutes, Some(10));
        }
    }
}

#[test]
fn test_offline_provider_yields_fallbacks_everywhere() {
    let geocoded = |id: &str, lat: f64| Venue::new(id, id.to_uppercase()).with_coordinates(lat, 2.0);
    let (planner, report) = Planner::build(
        vec![geocoded("v1", 48.0), geocoded("v2", 48.1), geocoded("v3", 48.2)],
        date(),
        make_config(),
        NoRoutes,
    )
    .unwrap();

    assert!(report.any_fallback());
    assert_eq!(report.fallbacks, 2);
    for leg in planner.plan().items.iter().filter(|i| i.is_transit()) {
        if let ItineraryItem::Transit {
            duration_minutes,
            distance_meters,
            path,
            last_error,
            ..
        } = leg
        {
            assert_eq!(*duration_minutes, Some(30));
            assert!(distance_meters.is_none());
            assert!(path.is_none());
            assert!(last_error.as_deref().is_some_and(|e| !e.is_empty()));
        }
    }
    assert_contiguous(planner.plan());
}

#[test]
fn test_ungeocoded_venue_leaves_segment_untouched() {
    let (planner, report) = Planner::build(
        vec![
            Venue::new("v1", "V1").with_coordinates(48.0, 2.0),
            Venue::new("v2", "V2"),
        ],
        date(),
        make_config(),
        NoRoutes,
    )
    .unwrap();

    assert_eq!(report.fallbacks, 0);
    assert_eq!(report.skipped, 1);
    if let ItineraryItem::Transit {
        duration_minutes,
        last_error,
        ..
    } = &planner.plan().items[1]
    {
        assert!(duration_minutes.is_none());
        assert!(last_error.is_none());
    }
}

#[test]
fn test_plan_survives_file_round_trip() {
    // Session state is a JSON file between invocations; write and reload
    // one through a scratch directory.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");

    let mut plan = Itinerary::build(
        vec![Venue::new("a", "A"), Venue::new("b", "B")],
        date(),
        make_config(),
    )
    .unwrap();
    plan.set_note(0, "morning slot").unwrap();

    std::fs::write(&path, serde_json::to_string_pretty(&plan).unwrap()).unwrap();
    let back: Itinerary =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back.items.len(), plan.items.len());
    assert_eq!(back.items[0].id(), plan.items[0].id());
    assert_eq!(back.items[0].start_time(), "09:00");
}
