use crate::dataset::Dataset;

pub const ALL_TEAMS: &str = "All Teams";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}

impl TeamFilter {
    pub fn from_label(label: &str) -> Self {
        if label == ALL_TEAMS {
            TeamFilter::All
        } else {
            TeamFilter::Team(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TeamFilter::All => ALL_TEAMS,
            TeamFilter::Team(team) => team,
        }
    }

    pub fn matches(&self, team: &str) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(selected) => selected == team,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub team: TeamFilter,
    pub min_year: i32,
    pub max_year: i32,
    pub only_single_team: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            team: TeamFilter::All,
            min_year: i32::MIN,
            max_year: i32::MAX,
            only_single_team: false,
        }
    }
}

impl FilterState {
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let (min_year, max_year) = dataset.year_extent().unwrap_or((0, 0));
        Self {
            min_year,
            max_year,
            ..Self::default()
        }
    }

    pub fn contains_year(&self, year: i32) -> bool {
        year >= self.min_year && year <= self.max_year
    }

    pub fn set_team(&mut self, team: TeamFilter) -> bool {
        if self.team == team {
            return false;
        }
        self.team = team;
        true
    }

    pub fn set_min_year(&mut self, year: i32) -> bool {
        if year > self.max_year || year == self.min_year {
            return false;
        }
        self.min_year = year;
        true
    }

    pub fn set_max_year(&mut self, year: i32) -> bool {
        if year < self.min_year || year == self.max_year {
            return false;
        }
        self.max_year = year;
        true
    }

    pub fn set_only_single_team(&mut self, only: bool) -> bool {
        if self.only_single_team == only {
            return false;
        }
        self.only_single_team = only;
        true
    }

    pub fn cycle_team(&mut self, teams: &[String], forward: bool) -> bool {
        if teams.is_empty() {
            return false;
        }
        let current = teams
            .iter()
            .position(|t| t == self.team.label())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % teams.len()
        } else {
            (current + teams.len() - 1) % teams.len()
        };
        self.set_team(TeamFilter::from_label(&teams[next]))
    }

    pub fn nudge_min_year(&mut self, delta: i32, extent: (i32, i32)) -> bool {
        let target = self.min_year.saturating_add(delta).clamp(extent.0, extent.1);
        self.set_min_year(target)
    }

    pub fn nudge_max_year(&mut self, delta: i32, extent: (i32, i32)) -> bool {
        let target = self.max_year.saturating_add(delta).clamp(extent.0, extent.1);
        self.set_max_year(target)
    }
}
