use std::collections::{BTreeSet, HashMap, HashSet};

use crate::dataset::{Dataset, Metric, Record};
use crate::filter::{ALL_TEAMS, FilterState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn is_zero_variance(&self) -> bool {
        self.max == self.min
    }

    /// Rescales `value` to `[0, 1]`. Missing values yield `None`; a zero-variance metric
    /// always maps to the midpoint.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        if self.is_zero_variance() {
            return Some(0.5);
        }
        Some((value - self.min) / (self.max - self.min))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRanges {
    ranges: [MetricRange; 8],
}

impl Default for MetricRanges {
    fn default() -> Self {
        Self {
            ranges: [MetricRange { min: 0.0, max: 0.0 }; 8],
        }
    }
}

impl MetricRanges {
    pub fn compute(dataset: &Dataset) -> Self {
        let mut ranges = [MetricRange {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }; 8];
        for record in &dataset.records {
            for metric in Metric::ALL {
                let value = record.metric(metric);
                if !value.is_finite() {
                    continue;
                }
                let range = &mut ranges[metric.index()];
                range.min = range.min.min(value);
                range.max = range.max.max(value);
            }
        }
        // A metric with no values at all collapses to a zero-variance range.
        for range in &mut ranges {
            if range.min > range.max {
                *range = MetricRange { min: 0.0, max: 0.0 };
            }
        }
        Self { ranges }
    }

    pub fn get(&self, metric: Metric) -> MetricRange {
        self.ranges[metric.index()]
    }

    pub fn normalize(&self, metric: Metric, value: f64) -> Option<f64> {
        self.get(metric).normalize(value)
    }
}

pub fn team_list(dataset: &Dataset) -> Vec<String> {
    let teams: BTreeSet<&str> = dataset.records.iter().map(|r| r.team.as_str()).collect();
    std::iter::once(ALL_TEAMS.to_string())
        .chain(teams.into_iter().map(str::to_string))
        .collect()
}

pub fn eligible_players(dataset: &Dataset, filter: &FilterState) -> Vec<String> {
    let single_team = if filter.only_single_team {
        Some(single_team_players(dataset))
    } else {
        None
    };

    let players: BTreeSet<&str> = dataset
        .records
        .iter()
        .filter(|r| filter.team.matches(&r.team) && filter.contains_year(r.year))
        .map(|r| r.player.as_str())
        .filter(|p| single_team.as_ref().is_none_or(|set| set.contains(p)))
        .collect();
    players.into_iter().map(str::to_string).collect()
}

fn single_team_players(dataset: &Dataset) -> HashSet<&str> {
    let mut teams: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in &dataset.records {
        teams
            .entry(record.player.as_str())
            .or_default()
            .insert(record.team.as_str());
    }
    teams
        .into_iter()
        .filter(|(_, set)| set.len() == 1)
        .map(|(player, _)| player)
        .collect()
}

pub fn player_records<'a>(
    dataset: &'a Dataset,
    player: &str,
    filter: &FilterState,
) -> Vec<&'a Record> {
    let mut rows: Vec<&Record> = dataset
        .records
        .iter()
        .filter(|r| r.player == player && filter.contains_year(r.year))
        .collect();
    rows.sort_by_key(|r| r.year);
    rows
}

pub fn latest_record<'a>(records: &[&'a Record]) -> Option<&'a Record> {
    records.iter().copied().max_by_key(|r| r.year)
}

pub fn record_for_year<'a>(records: &[&'a Record], year: i32) -> Option<&'a Record> {
    records.iter().copied().find(|r| r.year == year)
}

#[derive(Debug, Clone)]
pub struct DerivedView<'a> {
    pub teams: Vec<String>,
    pub players: Vec<String>,
    pub ranges: MetricRanges,
    pub selected: Vec<&'a Record>,
}

impl<'a> DerivedView<'a> {
    pub fn compute(dataset: &'a Dataset, filter: &FilterState, selected: Option<&str>) -> Self {
        let players = eligible_players(dataset, filter);
        let selected = selected
            .filter(|name| players.iter().any(|p| p == name))
            .map(|name| player_records(dataset, name, filter))
            .unwrap_or_default();
        Self {
            teams: team_list(dataset),
            players,
            ranges: MetricRanges::compute(dataset),
            selected,
        }
    }
}
