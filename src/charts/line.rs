use crate::charts::{ChartProps, Viewport};
use crate::dataset::Metric;
use crate::palette::{Rgb, category10};

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub metric: Metric,
    pub color: Rgb,
    /// `(x, y)` in plot units: x is the year position in `[0, 1]`, y the normalized value.
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineScene {
    pub viewport: Viewport,
    pub years: (i32, i32),
    pub series: Vec<LineSeries>,
    pub hover_x: Option<f64>,
}

pub fn x_position(years: (i32, i32), year: i32) -> f64 {
    let span = f64::from(years.1) - f64::from(years.0);
    if span == 0.0 {
        return 0.5;
    }
    (f64::from(year) - f64::from(years.0)) / span
}

fn invert(years: (i32, i32), x: f64) -> i32 {
    let span = f64::from(years.1) - f64::from(years.0);
    (f64::from(years.0) + x * span).round() as i32
}

pub fn scene(props: &ChartProps<'_>) -> Option<LineScene> {
    let first = props.records.iter().map(|r| r.year).min()?;
    let last = props.records.iter().map(|r| r.year).max()?;
    let years = (first, last);

    let series = Metric::ALL
        .iter()
        .enumerate()
        .map(|(idx, metric)| LineSeries {
            metric: *metric,
            color: category10(idx),
            points: props
                .records
                .iter()
                .filter_map(|r| {
                    let y = props.ranges.normalize(*metric, r.metric(*metric))?;
                    Some((x_position(years, r.year), y))
                })
                .collect(),
        })
        .collect();

    Some(LineScene {
        viewport: Viewport {
            x: [-0.12, 1.25],
            y: [-0.15, 1.08],
        },
        years,
        series,
        hover_x: props.hover.hovered_year.map(|y| x_position(years, y)),
    })
}

pub fn hit_test(scene: &LineScene, (x, _): (f64, f64)) -> Option<i32> {
    if !(0.0..=1.0).contains(&x) {
        return None;
    }
    Some(invert(scene.years, x))
}

pub fn year_ticks((first, last): (i32, i32)) -> Vec<i32> {
    let span = i64::from(last) - i64::from(first);
    if span <= 0 {
        return vec![first];
    }
    let step = (span / 4).max(1) as usize;
    let mut ticks: Vec<i32> = (first..=last).step_by(step).take(6).collect();
    if ticks.last() != Some(&last) && ticks.len() < 6 {
        ticks.push(last);
    }
    ticks
}
