use std::f64::consts::{FRAC_PI_2, TAU};

use crate::charts::{ChartProps, Viewport, format_value};
use crate::dataset::Metric;
use crate::palette::{Rgb, category10};

pub const LEVELS: usize = 5;
pub const MAX_RADIUS: f64 = 1.0;
const LABEL_RADIUS: f64 = 1.18;
const MIN_LABEL_NORM: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    pub label: &'static str,
    pub end: (f64, f64),
    pub label_at: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarPolygon {
    pub year: i32,
    pub vertices: Vec<(f64, f64)>,
    pub color: Rgb,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueLabel {
    pub at: (f64, f64),
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarScene {
    pub viewport: Viewport,
    pub rings: Vec<f64>,
    pub axes: Vec<RadarAxis>,
    pub polygons: Vec<RadarPolygon>,
    pub center_label: Option<String>,
    pub value_labels: Vec<ValueLabel>,
}

pub fn vertex(i: usize, n: usize, radius: f64) -> (f64, f64) {
    let angle = i as f64 * (TAU / n as f64) - FRAC_PI_2;
    (radius * angle.cos(), -radius * angle.sin())
}

pub fn scene(props: &ChartProps<'_>, intro: f64) -> RadarScene {
    let n = Metric::ALL.len();
    let intro = intro.clamp(0.0, 1.0);
    let hovered = props.hover.hovered_year;

    let axes = Metric::ALL
        .iter()
        .enumerate()
        .map(|(i, metric)| RadarAxis {
            label: metric.label(),
            end: vertex(i, n, MAX_RADIUS),
            label_at: vertex(i, n, LABEL_RADIUS),
        })
        .collect();

    let rings = (1..=LEVELS)
        .map(|level| MAX_RADIUS * level as f64 / LEVELS as f64)
        .collect();

    let polygons = props
        .records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let vertices = Metric::ALL
                .iter()
                .enumerate()
                .map(|(i, metric)| {
                    let norm = props
                        .ranges
                        .normalize(*metric, record.metric(*metric))
                        .unwrap_or(0.0);
                    vertex(i, n, norm * MAX_RADIUS * intro)
                })
                .collect();
            RadarPolygon {
                year: record.year,
                vertices,
                color: category10(idx),
                highlighted: hovered == Some(record.year),
            }
        })
        .collect();

    let mut value_labels = Vec::new();
    if let Some(year) = hovered {
        if let Some(record) = props.records.iter().find(|r| r.year == year) {
            for (i, metric) in Metric::ALL.iter().enumerate() {
                let value = record.metric(*metric);
                let norm = props
                    .ranges
                    .normalize(*metric, value)
                    .unwrap_or(0.0)
                    .max(MIN_LABEL_NORM);
                value_labels.push(ValueLabel {
                    at: vertex(i, n, norm * MAX_RADIUS),
                    text: format_value(value),
                });
            }
        }
    }

    RadarScene {
        viewport: Viewport {
            x: [-1.35, 1.35],
            y: [-1.3, 1.3],
        },
        rings,
        axes,
        polygons,
        center_label: hovered.map(|y| y.to_string()),
        value_labels,
    }
}

/// Year of the topmost polygon containing `point`. Later polygons are drawn on top.
pub fn hit_test(scene: &RadarScene, point: (f64, f64)) -> Option<i32> {
    scene
        .polygons
        .iter()
        .rev()
        .find(|poly| contains(&poly.vertices, point))
        .map(|poly| poly.year)
}

fn contains(vertices: &[(f64, f64)], (px, py): (f64, f64)) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_axis_points_up() {
        let (x, y) = vertex(0, 8, 1.0);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
        let (x, y) = vertex(2, 8, 1.0);
        assert!((x - 1.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn point_in_square() {
        let square = vec![(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        assert!(contains(&square, (0.0, 0.0)));
        assert!(!contains(&square, (2.0, 0.0)));
    }
}
