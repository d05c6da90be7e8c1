use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use crate::charts::player_info::label_for;
use crate::config::DashboardConfig;
use crate::dataset::{Dataset, LoadError, Record};
use crate::derived::{DerivedView, MetricRanges, eligible_players, player_records};
use crate::export::{ExportReport, export_player};
use crate::filter::{FilterState, TeamFilter};
use crate::hover::{HoverState, PointerEvent, PointerTarget, transition};
use crate::playback::PlaybackController;
use crate::transitions::{FadeLabel, INTRO_DURATION, PlayerLabel, ScopedTimer, ease_cubic_out};

#[derive(Debug)]
pub enum DashEvent {
    Tick,
    Loaded(Result<Arc<Dataset>, LoadError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostChrome {
    pub chart_title_visible: bool,
    pub now_showing_visible: bool,
}

impl Default for HostChrome {
    fn default() -> Self {
        Self {
            chart_title_visible: true,
            now_showing_visible: true,
        }
    }
}

pub struct Dashboard {
    dataset: Arc<Dataset>,
    ranges: MetricRanges,
    teams: Vec<String>,
    year_extent: (i32, i32),
    filter: FilterState,
    players: Vec<String>,
    playback: PlaybackController,
    hover: HoverState,
    pointer: Option<PointerTarget>,
    label: FadeLabel,
    radar_intro: ScopedTimer,
    pub chrome: HostChrome,
    pub status: LoadStatus,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(PlaybackController::default())
    }
}

impl Dashboard {
    pub fn new(playback: PlaybackController) -> Self {
        Self {
            dataset: Arc::new(Dataset::default()),
            ranges: MetricRanges::default(),
            teams: Vec::new(),
            year_extent: (0, 0),
            filter: FilterState::default(),
            players: Vec::new(),
            playback,
            hover: HoverState::default(),
            pointer: None,
            label: FadeLabel::default(),
            radar_intro: ScopedTimer::default(),
            chrome: HostChrome::default(),
            status: LoadStatus::Loading,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn from_config(cfg: &DashboardConfig) -> Self {
        Self::new(PlaybackController::new(cfg.tick_ms, cfg.advance_ms))
    }

    pub fn mount(&mut self) {
        self.chrome.chart_title_visible = false;
        self.chrome.now_showing_visible = false;
    }

    pub fn apply_event(&mut self, event: DashEvent, now: Instant) {
        match event {
            DashEvent::Tick => self.on_tick(now),
            DashEvent::Loaded(result) => self.on_loaded(result, now),
        }
    }

    pub fn on_loaded(&mut self, result: Result<Arc<Dataset>, LoadError>, now: Instant) {
        match result {
            Ok(dataset) => {
                self.push_log(format!(
                    "[INFO] Loaded {} records",
                    dataset.records.len()
                ));
                if dataset.skipped_rows > 0 {
                    self.push_log(format!(
                        "[WARN] Skipped {} rows without a usable year",
                        dataset.skipped_rows
                    ));
                }
                self.set_dataset(dataset, now);
            }
            Err(err) => {
                self.push_log(format!("[WARN] Dataset load failed: {err}"));
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
    }

    pub fn set_dataset(&mut self, dataset: Arc<Dataset>, now: Instant) {
        self.filter = FilterState::for_dataset(&dataset);
        self.year_extent = dataset.year_extent().unwrap_or((0, 0));
        let view = DerivedView::compute(&dataset, &self.filter, None);
        self.teams = view.teams;
        self.players = view.players;
        self.ranges = view.ranges;
        self.dataset = dataset;
        self.status = LoadStatus::Ready;
        self.playback.select(0);
        self.on_selection_changed(now);
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.label.update(now);
        self.radar_intro.fire_if_due(now);
        if self.playback.tick(self.players.len()) {
            self.on_selection_changed(now);
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn ranges(&self) -> &MetricRanges {
        &self.ranges
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn year_extent(&self) -> (i32, i32) {
        self.year_extent
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn progress(&self) -> f64 {
        self.playback.progress()
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.players
            .get(self.playback.current_index)
            .map(String::as_str)
    }

    pub fn selected_records(&self) -> Vec<&Record> {
        match self.selected_player() {
            Some(player) => player_records(&self.dataset, player, &self.filter),
            None => Vec::new(),
        }
    }

    pub fn label(&self) -> &PlayerLabel {
        self.label.displayed()
    }

    pub fn label_opacity(&self, now: Instant) -> f64 {
        self.label.opacity(now)
    }

    pub fn radar_intro(&self, now: Instant) -> f64 {
        ease_cubic_out(self.radar_intro.fraction(now))
    }

    pub fn select_player(&mut self, name: &str, now: Instant) -> bool {
        let Some(idx) = self.players.iter().position(|p| p == name) else {
            return false;
        };
        self.playback.select(idx);
        self.on_selection_changed(now);
        true
    }

    pub fn select_next(&mut self, now: Instant) {
        if self.players.is_empty() {
            return;
        }
        let next = (self.playback.current_index + 1) % self.players.len();
        self.playback.select(next);
        self.on_selection_changed(now);
    }

    pub fn select_prev(&mut self, now: Instant) {
        if self.players.is_empty() {
            return;
        }
        let len = self.players.len();
        let prev = (self.playback.current_index + len - 1) % len;
        self.playback.select(prev);
        self.on_selection_changed(now);
    }

    fn on_selection_changed(&mut self, now: Instant) {
        let target = match self.selected_player() {
            Some(player) => label_for(player, &self.selected_records()),
            None => PlayerLabel::default(),
        };
        self.label.set_target(target, now);
        self.radar_intro.arm(now, INTRO_DURATION);
    }

    pub fn set_team(&mut self, team: TeamFilter, now: Instant) -> bool {
        let changed = self.filter.set_team(team);
        self.after_filter_change(changed, now)
    }

    pub fn cycle_team(&mut self, forward: bool, now: Instant) -> bool {
        let changed = self.filter.cycle_team(&self.teams, forward);
        self.after_filter_change(changed, now)
    }

    pub fn set_min_year(&mut self, year: i32, now: Instant) -> bool {
        let changed = self.filter.set_min_year(year);
        self.after_filter_change(changed, now)
    }

    pub fn set_max_year(&mut self, year: i32, now: Instant) -> bool {
        let changed = self.filter.set_max_year(year);
        self.after_filter_change(changed, now)
    }

    pub fn nudge_min_year(&mut self, delta: i32, now: Instant) -> bool {
        let changed = self.filter.nudge_min_year(delta, self.year_extent);
        self.after_filter_change(changed, now)
    }

    pub fn nudge_max_year(&mut self, delta: i32, now: Instant) -> bool {
        let changed = self.filter.nudge_max_year(delta, self.year_extent);
        self.after_filter_change(changed, now)
    }

    pub fn set_only_single_team(&mut self, only: bool, now: Instant) -> bool {
        let changed = self.filter.set_only_single_team(only);
        self.after_filter_change(changed, now)
    }

    pub fn toggle_only_single_team(&mut self, now: Instant) -> bool {
        let only = !self.filter.only_single_team;
        self.set_only_single_team(only, now)
    }

    fn after_filter_change(&mut self, changed: bool, now: Instant) -> bool {
        if changed {
            self.refresh_players(now);
        }
        changed
    }

    /// Recomputes the eligible list. A selection that survives keeps its place; one
    /// that drops out falls back to the first entry.
    fn refresh_players(&mut self, now: Instant) {
        let previous = self.selected_player().map(str::to_string);
        self.players = eligible_players(&self.dataset, &self.filter);

        let kept = previous
            .as_deref()
            .and_then(|name| self.players.iter().position(|p| p == name));
        match kept {
            Some(idx) => self.playback.current_index = idx,
            None => self.playback.select(0),
        }
        self.playback.clamp(self.players.len());

        if self.players.is_empty() {
            self.push_log("[INFO] No players match the current filters");
        }
        // Year-range changes alter the visible seasons even for a kept player.
        self.on_selection_changed(now);
    }

    pub fn pointer_event(&mut self, event: &PointerEvent) {
        self.hover.apply(event);
        self.playback.set_paused(self.hover.paused);
    }

    pub fn pointer_moved(&mut self, target: Option<PointerTarget>) {
        let events = transition(self.pointer.as_ref(), target.as_ref());
        for event in &events {
            self.pointer_event(event);
        }
        self.pointer = target;
    }

    pub fn step_hovered_year(&mut self, forward: bool) {
        let years: Vec<i32> = self.selected_records().iter().map(|r| r.year).collect();
        if years.is_empty() {
            return;
        }
        let next = match self
            .hover
            .hovered_year
            .and_then(|y| years.iter().position(|v| *v == y))
        {
            Some(idx) if forward => years[(idx + 1) % years.len()],
            Some(idx) => years[(idx + years.len() - 1) % years.len()],
            None if forward => years[0],
            None => years[years.len() - 1],
        };
        self.pointer_event(&PointerEvent::EnterYear(next));
    }

    pub fn clear_hover(&mut self) {
        self.pointer = None;
        self.pointer_event(&PointerEvent::Leave);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn export_selected(&mut self, dir: &Path) -> Result<Option<ExportReport>> {
        let Some(player) = self.selected_player().map(str::to_string) else {
            self.push_log("[INFO] Nothing to export");
            return Ok(None);
        };
        let report = {
            let records = self.selected_records();
            export_player(dir, &player, &records, &self.ranges)
        };
        match report {
            Ok(report) => {
                self.push_log(format!(
                    "[INFO] Exported {} seasons to {}",
                    report.seasons,
                    report.path.display()
                ));
                Ok(Some(report))
            }
            Err(err) => {
                self.push_log(format!("[WARN] Export failed: {err:#}"));
                Err(err)
            }
        }
    }
}
