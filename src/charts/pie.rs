use std::f64::consts::TAU;

use crate::charts::{ChartProps, Viewport};
use crate::derived::record_for_year;
use crate::palette::{Rgb, seeded_palette};

pub const RADIUS: f64 = 1.0;
/// Hovered wedges grow by 10px on a 150px radius.
pub const EXPANDED_RADIUS: f64 = RADIUS * (1.0 + 10.0 / 150.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub team: String,
    pub count: usize,
    /// Radians clockwise from 12 o'clock.
    pub start: f64,
    pub end: f64,
    pub color: Rgb,
    pub highlighted: bool,
    pub expanded: bool,
}

impl Wedge {
    pub fn radius(&self) -> f64 {
        if self.expanded { EXPANDED_RADIUS } else { RADIUS }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieScene {
    pub viewport: Viewport,
    pub wedges: Vec<Wedge>,
    pub card: Option<String>,
    pub tooltip: Option<(String, usize)>,
}

pub fn point_on_arc(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}

pub fn scene(props: &ChartProps<'_>) -> Option<PieScene> {
    let player = &props.records.first()?.player;

    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in props.records {
        match counts.iter_mut().find(|(team, _)| *team == record.team) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.team.clone(), 1)),
        }
    }

    let hovered_team = props
        .hover
        .hovered_year
        .and_then(|year| record_for_year(props.records, year))
        .map(|r| r.team.clone());

    let colors = seeded_palette(player, counts.len());
    let total = props.records.len() as f64;
    let mut angle = 0.0;
    let wedges: Vec<Wedge> = counts
        .into_iter()
        .zip(colors)
        .map(|((team, count), color)| {
            let start = angle;
            angle += TAU * count as f64 / total;
            Wedge {
                highlighted: hovered_team.as_deref() == Some(team.as_str()),
                expanded: props.hover.hovered_team.as_deref() == Some(team.as_str()),
                team,
                count,
                start,
                end: angle,
                color,
            }
        })
        .collect();

    let tooltip = wedges
        .iter()
        .find(|w| w.expanded)
        .map(|w| (w.team.clone(), w.count));

    Some(PieScene {
        viewport: Viewport {
            x: [-1.2, 1.2],
            y: [-1.2, 1.2],
        },
        wedges,
        card: hovered_team,
        tooltip,
    })
}

pub fn hit_test(scene: &PieScene, (x, y): (f64, f64)) -> Option<String> {
    let distance = x.hypot(y);
    let mut angle = x.atan2(y);
    if angle < 0.0 {
        angle += TAU;
    }
    scene
        .wedges
        .iter()
        .find(|w| angle >= w.start && angle < w.end && distance <= w.radius())
        .map(|w| w.team.clone())
}
