use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mvp_terminal::charts::{ChartProps, pie};
use mvp_terminal::dataset::{Dataset, LoadError, parse_dataset};
use mvp_terminal::filter::TeamFilter;
use mvp_terminal::hover::{ChartId, PointerEvent, PointerTarget};
use mvp_terminal::playback::{DEFAULT_ADVANCE_MS, DEFAULT_TICK_MS};
use mvp_terminal::state::{DashEvent, Dashboard, LoadStatus};

fn fixture_dataset() -> Arc<Dataset> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("mvp_sample.csv");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    Arc::new(parse_dataset(raw.as_bytes()).expect("fixture should parse"))
}

fn loaded_dashboard(now: Instant) -> Dashboard {
    let mut state = Dashboard::default();
    state.mount();
    state.apply_event(DashEvent::Loaded(Ok(fixture_dataset())), now);
    state
}

fn run_ticks(state: &mut Dashboard, count: u64, now: Instant) {
    for _ in 0..count {
        state.apply_event(DashEvent::Tick, now);
    }
}

#[test]
fn mount_hides_host_chrome() {
    let mut state = Dashboard::default();
    assert!(state.chrome.chart_title_visible);
    state.mount();
    assert!(!state.chrome.chart_title_visible);
    assert!(!state.chrome.now_showing_visible);
    assert_eq!(state.status, LoadStatus::Loading);
}

#[test]
fn load_selects_first_eligible_player() {
    let now = Instant::now();
    let state = loaded_dashboard(now);
    assert_eq!(state.status, LoadStatus::Ready);
    assert_eq!(state.year_extent(), (1991, 2004));
    assert_eq!(state.teams()[0], "All Teams");
    assert_eq!(state.selected_player(), Some("Karl Malone"));
    assert_eq!(state.selected_records().len(), 3);
    assert!(state.logs.iter().any(|l| l.contains("Loaded 7 records")));
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN] Skipped 1")));
}

#[test]
fn load_failure_leaves_inert_dashboard() {
    let now = Instant::now();
    let mut state = Dashboard::default();
    let err = LoadError::Io {
        path: "missing.csv".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "gone"),
    };
    state.apply_event(DashEvent::Loaded(Err(err)), now);

    assert!(matches!(state.status, LoadStatus::Failed(ref msg) if msg.contains("missing.csv")));
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN]")));
    assert!(state.players().is_empty());
    run_ticks(&mut state, 200, now);
    assert_eq!(state.selected_player(), None);
    assert_eq!(state.progress(), 0.0);
    assert!(state.selected_records().is_empty());

    let dir = tempfile::tempdir().expect("temp dir");
    let report = state.export_selected(dir.path()).expect("nothing to export");
    assert!(report.is_none());
}

#[test]
fn playback_advances_through_players() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    let per_player = DEFAULT_ADVANCE_MS / DEFAULT_TICK_MS;
    run_ticks(&mut state, per_player / 2, now);
    assert_eq!(state.progress(), 0.5);
    run_ticks(&mut state, per_player / 2, now);
    assert_eq!(state.selected_player(), Some("Michael Jordan"));
    run_ticks(&mut state, 2 * per_player, now);
    assert_eq!(state.selected_player(), Some("Karl Malone"));
}

#[test]
fn filter_change_resets_dropped_selection() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    run_ticks(&mut state, 10, now);
    assert!(state.toggle_only_single_team(now));
    assert_eq!(state.players(), ["Michael Jordan", "Tim Duncan"]);
    assert_eq!(state.selected_player(), Some("Michael Jordan"));
    assert_eq!(state.progress(), 0.0);
}

#[test]
fn filter_change_keeps_surviving_selection() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    assert!(state.select_player("Tim Duncan", now));
    assert!(state.set_team(TeamFilter::Team("SAS".to_string()), now));
    assert_eq!(state.players(), ["Tim Duncan"]);
    assert_eq!(state.selected_player(), Some("Tim Duncan"));
    assert!(!state.set_team(TeamFilter::Team("SAS".to_string()), now));
}

#[test]
fn over_restrictive_filters_empty_the_view() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    state.set_team(TeamFilter::Team("LAL".to_string()), now);
    state.set_only_single_team(true, now);
    assert!(state.players().is_empty());
    assert_eq!(state.selected_player(), None);
    run_ticks(&mut state, 100, now);
    assert_eq!(state.progress(), 0.0);
    assert!(state.logs.iter().any(|l| l.contains("No players match")));

    state.set_team(TeamFilter::All, now);
    assert_eq!(state.selected_player(), Some("Michael Jordan"));
}

#[test]
fn year_bounds_reject_crossing_values() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    assert!(!state.set_min_year(2010, now));
    assert!(!state.set_max_year(1980, now));
    assert_eq!(state.filter().min_year, 1991);
    assert_eq!(state.filter().max_year, 2004);

    assert!(state.set_max_year(1998, now));
    assert_eq!(state.players(), ["Karl Malone", "Michael Jordan"]);
    let years: Vec<i32> = state.selected_records().iter().map(|r| r.year).collect();
    assert_eq!(years, vec![1997, 1998]);

    assert!(state.nudge_max_year(10, now));
    assert_eq!(state.filter().max_year, 2004);
    assert!(!state.nudge_min_year(-5, now));
}

#[test]
fn cycle_team_walks_the_list() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    assert!(state.cycle_team(true, now));
    assert_eq!(state.filter().team, TeamFilter::Team("CHI".to_string()));
    assert!(state.cycle_team(false, now));
    assert!(state.cycle_team(false, now));
    assert_eq!(state.filter().team, TeamFilter::Team("UTA".to_string()));
}

#[test]
fn hover_pauses_and_leave_resumes() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    run_ticks(&mut state, 5, now);
    let progress = state.progress();

    state.pointer_moved(Some(PointerTarget::Year {
        chart: ChartId::Radar,
        year: 1997,
    }));
    assert!(state.playback().is_paused());
    assert_eq!(state.hover().hovered_year, Some(1997));
    run_ticks(&mut state, 500, now);
    assert_eq!(state.progress(), progress);
    assert_eq!(state.selected_player(), Some("Karl Malone"));

    state.pointer_moved(None);
    assert!(!state.playback().is_paused());
    assert_eq!(state.hover().hovered_year, None);
    run_ticks(&mut state, 1, now);
    assert!(state.progress() > progress);
}

#[test]
fn moving_between_charts_is_last_writer_wins() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    state.pointer_event(&PointerEvent::EnterYear(1997));
    state.pointer_event(&PointerEvent::EnterYear(1998));
    assert_eq!(state.hover().hovered_year, Some(1998));

    state.pointer_moved(Some(PointerTarget::Year {
        chart: ChartId::Line,
        year: 2004,
    }));
    state.pointer_moved(Some(PointerTarget::Wedge {
        team: "UTA".to_string(),
    }));
    assert_eq!(state.hover().hovered_year, None);
    assert_eq!(state.hover().hovered_team.as_deref(), Some("UTA"));
    assert!(state.playback().is_paused());

    state.clear_hover();
    assert_eq!(state.hover().hovered_team, None);
    assert!(!state.playback().is_paused());
}

#[test]
fn radar_hover_highlights_pie_wedge() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    state.pointer_moved(Some(PointerTarget::Year {
        chart: ChartId::Radar,
        year: 2004,
    }));
    let records = state.selected_records();
    let props = ChartProps {
        records: &records,
        ranges: state.ranges(),
        hover: state.hover(),
    };
    let scene = pie::scene(&props).expect("records present");
    let lit: Vec<&str> = scene
        .wedges
        .iter()
        .filter(|w| w.highlighted)
        .map(|w| w.team.as_str())
        .collect();
    assert_eq!(lit, vec!["LAL"]);
}

#[test]
fn keyboard_hover_steps_through_seasons() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    state.step_hovered_year(true);
    assert_eq!(state.hover().hovered_year, Some(1997));
    state.step_hovered_year(true);
    state.step_hovered_year(true);
    assert_eq!(state.hover().hovered_year, Some(2004));
    state.step_hovered_year(true);
    assert_eq!(state.hover().hovered_year, Some(1997));
    state.step_hovered_year(false);
    assert_eq!(state.hover().hovered_year, Some(2004));
    assert!(state.playback().is_paused());
}

#[test]
fn label_fades_to_new_player() {
    let start = Instant::now();
    let mut state = loaded_dashboard(start);
    assert_eq!(state.label().name, "");
    assert_eq!(state.label_opacity(start), 1.0);
    assert!(state.radar_intro(start) < 1.0);

    let later = start + Duration::from_millis(600);
    state.on_tick(later);
    assert_eq!(state.label().name, "Karl Malone");
    assert_eq!(state.label().team, "LAL");
    assert_eq!(state.label().rank, "5");
    assert_eq!(state.radar_intro(later), 1.0);

    state.select_next(later);
    assert!(state.label_opacity(later + Duration::from_millis(250)) < 1.0);
    state.on_tick(later + Duration::from_millis(600));
    assert_eq!(state.label().name, "Michael Jordan");
    state.select_prev(later);
    assert_eq!(state.selected_player(), Some("Karl Malone"));
}

#[test]
fn export_writes_workbook() {
    let now = Instant::now();
    let mut state = loaded_dashboard(now);
    let dir = tempfile::tempdir().expect("temp dir");
    let report = state
        .export_selected(dir.path())
        .expect("export should succeed")
        .expect("a player is selected");
    assert_eq!(report.seasons, 3);
    assert!(report.path.exists());
    assert!(report.path.starts_with(dir.path()));
    assert!(state.logs.iter().any(|l| l.contains("Exported 3 seasons")));
}
