use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::state::DashEvent;

pub const DEFAULT_LOCATOR: &str = "mvp_1981-2020.csv";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

static SESSION: OnceCell<Arc<Dataset>> = OnceCell::new();
static CLIENT: OnceCell<Client> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http {status} fetching {url}")]
    Status { url: String, status: StatusCode },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    PtsWon,
    PtsMax,
    Pts,
    Trb,
    Ast,
    Stl,
    Blk,
    Tov,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::PtsWon,
        Metric::PtsMax,
        Metric::Pts,
        Metric::Trb,
        Metric::Ast,
        Metric::Stl,
        Metric::Blk,
        Metric::Tov,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::PtsWon => "Pts Won",
            Metric::PtsMax => "Pts Max",
            Metric::Pts => "PTS",
            Metric::Trb => "TRB",
            Metric::Ast => "AST",
            Metric::Stl => "STL",
            Metric::Blk => "BLK",
            Metric::Tov => "TOV",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankField {
    Per,
    PointsPerGame,
    AssistsPerGame,
    ReboundsPerGame,
    TrueShooting,
    WinShare,
    Mvp,
}

impl RankField {
    pub const ALL: [RankField; 7] = [
        RankField::Per,
        RankField::PointsPerGame,
        RankField::AssistsPerGame,
        RankField::ReboundsPerGame,
        RankField::TrueShooting,
        RankField::WinShare,
        RankField::Mvp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RankField::Per => "PER_rank",
            RankField::PointsPerGame => "Pt/g_rank",
            RankField::AssistsPerGame => "Assist/g_rank",
            RankField::ReboundsPerGame => "Reb/g_rank",
            RankField::TrueShooting => "TS%_rank",
            RankField::WinShare => "WinShare_rank",
            RankField::Mvp => "MVP_rank",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One player-season row. Metric and rank values are `NaN` when the source cell was
/// missing or not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub player: String,
    pub team: String,
    pub year: i32,
    pub team_rank: String,
    pub metrics: [f64; 8],
    pub ranks: [f64; 7],
}

impl Record {
    pub fn metric(&self, metric: Metric) -> f64 {
        self.metrics[metric.index()]
    }

    pub fn rank(&self, field: RankField) -> f64 {
        self.ranks[field.index()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub skipped_rows: usize,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            skipped_rows: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Http(String),
}

impl DataSource {
    pub fn parse(locator: &str) -> Self {
        let trimmed = locator.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Http(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Http(url) => url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Player")]
    player: String,
    #[serde(rename = "Team_Rank", default)]
    team_rank: String,
    #[serde(rename = "Pts Won")]
    pts_won: String,
    #[serde(rename = "Pts Max")]
    pts_max: String,
    #[serde(rename = "PTS")]
    pts: String,
    #[serde(rename = "TRB")]
    trb: String,
    #[serde(rename = "AST")]
    ast: String,
    #[serde(rename = "STL")]
    stl: String,
    #[serde(rename = "BLK")]
    blk: String,
    #[serde(rename = "TOV")]
    tov: String,
    #[serde(rename = "PER_rank", default)]
    per_rank: String,
    #[serde(rename = "Pt/g_rank", default)]
    pts_per_game_rank: String,
    #[serde(rename = "Assist/g_rank", default)]
    assists_per_game_rank: String,
    #[serde(rename = "Reb/g_rank", default)]
    rebounds_per_game_rank: String,
    #[serde(rename = "TS%_rank", default)]
    true_shooting_rank: String,
    #[serde(rename = "WinShare_rank", default)]
    win_share_rank: String,
    #[serde(rename = "MVP_rank", default)]
    mvp_rank: String,
}

impl RawRecord {
    fn into_record(self) -> Option<Record> {
        let year = coerce_year(&self.year)?;
        Some(Record {
            player: self.player.trim().to_string(),
            team: self.team.trim().to_string(),
            year,
            team_rank: self.team_rank.trim().to_string(),
            metrics: [
                coerce_number(&self.pts_won),
                coerce_number(&self.pts_max),
                coerce_number(&self.pts),
                coerce_number(&self.trb),
                coerce_number(&self.ast),
                coerce_number(&self.stl),
                coerce_number(&self.blk),
                coerce_number(&self.tov),
            ],
            ranks: [
                coerce_number(&self.per_rank),
                coerce_number(&self.pts_per_game_rank),
                coerce_number(&self.assists_per_game_rank),
                coerce_number(&self.rebounds_per_game_rank),
                coerce_number(&self.true_shooting_rank),
                coerce_number(&self.win_share_rank),
                coerce_number(&self.mvp_rank),
            ],
        })
    }
}

pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => f64::NAN,
    }
}

fn coerce_year(raw: &str) -> Option<i32> {
    let value = coerce_number(raw);
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i32::MIN as f64 || value > i32::MAX as f64 {
        return None;
    }
    Some(value as i32)
}

pub fn parse_dataset<R: Read>(rdr: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);
    let mut records = Vec::new();
    let mut skipped_rows = 0usize;
    for row in reader.deserialize::<RawRecord>() {
        match row?.into_record() {
            Some(record) => records.push(record),
            None => skipped_rows += 1,
        }
    }
    Ok(Dataset {
        records,
        skipped_rows,
    })
}

fn fetch_client() -> Result<&'static Client, LoadError> {
    let client = CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("mvp_terminal/", env!("CARGO_PKG_VERSION")))
            .build()
    })?;
    Ok(client)
}

pub fn load_dataset(source: &DataSource) -> Result<Dataset, LoadError> {
    match source {
        DataSource::File(path) => {
            let file = File::open(path).map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            })?;
            parse_dataset(file)
        }
        DataSource::Http(url) => {
            let resp = fetch_client()?.get(url).send()?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status,
                });
            }
            let body = resp.bytes()?;
            parse_dataset(body.as_ref())
        }
    }
}

pub fn load_session(source: &DataSource) -> Result<Arc<Dataset>, LoadError> {
    SESSION
        .get_or_try_init(|| load_dataset(source).map(Arc::new))
        .cloned()
}

pub fn spawn_loader(source: DataSource, tx: Sender<DashEvent>) {
    thread::spawn(move || {
        let result = load_session(&source);
        let _ = tx.send(DashEvent::Loaded(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_number_treats_blank_and_text_as_missing() {
        assert_eq!(coerce_number(" 12.5 "), 12.5);
        assert!(coerce_number("").is_nan());
        assert!(coerce_number("n/a").is_nan());
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("1e400").is_nan());
    }

    #[test]
    fn coerce_year_rejects_fractions() {
        assert_eq!(coerce_year("1999"), Some(1999));
        assert_eq!(coerce_year("1999.0"), Some(1999));
        assert_eq!(coerce_year("1999.5"), None);
        assert_eq!(coerce_year("abc"), None);
    }

    #[test]
    fn data_source_detects_urls() {
        assert_eq!(
            DataSource::parse("https://example.com/mvp.csv"),
            DataSource::Http("https://example.com/mvp.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("data/mvp.csv"),
            DataSource::File(PathBuf::from("data/mvp.csv"))
        );
    }
}
