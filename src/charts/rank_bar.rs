use crate::charts::ChartProps;
use crate::dataset::RankField;
use crate::derived::latest_record;

pub const BAR_FIELDS: [RankField; 6] = [
    RankField::Per,
    RankField::PointsPerGame,
    RankField::AssistsPerGame,
    RankField::ReboundsPerGame,
    RankField::TrueShooting,
    RankField::WinShare,
];

#[derive(Debug, Clone, PartialEq)]
pub struct RankBar {
    pub field: RankField,
    pub rank: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankBarScene {
    pub year: i32,
    pub bars: Vec<RankBar>,
    pub max_rank: f64,
}

pub fn scene(props: &ChartProps<'_>) -> Option<RankBarScene> {
    let latest = latest_record(props.records)?;
    let bars: Vec<RankBar> = BAR_FIELDS
        .iter()
        .map(|field| {
            let value = latest.rank(*field);
            RankBar {
                field: *field,
                rank: value.is_finite().then_some(value),
            }
        })
        .collect();
    let max_rank = bars
        .iter()
        .filter_map(|b| b.rank)
        .fold(1.0_f64, f64::max);
    Some(RankBarScene {
        year: latest.year,
        bars,
        max_rank,
    })
}
