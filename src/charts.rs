pub mod line;
pub mod pie;
pub mod player_info;
pub mod radar;
pub mod rank_bar;
pub mod rank_scatter;

use crate::dataset::Record;
use crate::derived::MetricRanges;
use crate::hover::HoverState;

#[derive(Debug, Clone, Copy)]
pub struct ChartProps<'a> {
    pub records: &'a [&'a Record],
    pub ranges: &'a MetricRanges,
    pub hover: &'a HoverState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Viewport {
    pub fn point_at(&self, fx: f64, fy_from_top: f64) -> (f64, f64) {
        let x = self.x[0] + fx * (self.x[1] - self.x[0]);
        let y = self.y[1] - fy_from_top * (self.y[1] - self.y[0]);
        (x, y)
    }
}

pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
