use crate::charts::{ChartProps, Viewport};
use crate::dataset::RankField;

const HIT_FRACTION: f64 = 0.08;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub year: i32,
    pub per_rank: f64,
    pub mvp_rank: f64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankScatterScene {
    pub viewport: Viewport,
    pub points: Vec<ScatterPoint>,
}

pub fn scene(props: &ChartProps<'_>) -> Option<RankScatterScene> {
    if props.records.is_empty() {
        return None;
    }
    let points: Vec<ScatterPoint> = props
        .records
        .iter()
        .filter_map(|r| {
            let per_rank = r.rank(RankField::Per);
            let mvp_rank = r.rank(RankField::Mvp);
            if !per_rank.is_finite() || !mvp_rank.is_finite() {
                return None;
            }
            Some(ScatterPoint {
                year: r.year,
                per_rank,
                mvp_rank,
                highlighted: props.hover.hovered_year == Some(r.year),
            })
        })
        .collect();

    let max_x = points.iter().map(|p| p.per_rank).fold(1.0_f64, f64::max);
    let max_y = points.iter().map(|p| p.mvp_rank).fold(1.0_f64, f64::max);
    Some(RankScatterScene {
        viewport: Viewport {
            x: [0.0, max_x + 1.0],
            y: [0.0, max_y + 1.0],
        },
        points,
    })
}

pub fn hit_test(scene: &RankScatterScene, (x, y): (f64, f64)) -> Option<i32> {
    let span_x = scene.viewport.x[1] - scene.viewport.x[0];
    let span_y = scene.viewport.y[1] - scene.viewport.y[0];
    scene
        .points
        .iter()
        .map(|p| {
            let dx = (p.per_rank - x) / span_x;
            let dy = (p.mvp_rank - y) / span_y;
            (p.year, dx.hypot(dy))
        })
        .filter(|(_, d)| *d <= HIT_FRACTION)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(year, _)| year)
}
