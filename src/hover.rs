#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Year { chart: ChartId, year: i32 },
    Wedge { team: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartId {
    Radar,
    Line,
    RankScatter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    EnterYear(i32),
    EnterWedge(String),
    Leave,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    pub hovered_year: Option<i32>,
    pub hovered_team: Option<String>,
    pub paused: bool,
}

impl HoverState {
    /// Last writer wins: a later enter from another chart simply overwrites.
    pub fn apply(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::EnterYear(year) => {
                self.hovered_year = Some(*year);
                self.paused = true;
            }
            PointerEvent::EnterWedge(team) => {
                self.hovered_team = Some(team.clone());
                self.paused = true;
            }
            PointerEvent::Leave => {
                *self = Self::default();
            }
        }
    }
}

pub fn transition(
    previous: Option<&PointerTarget>,
    next: Option<&PointerTarget>,
) -> Vec<PointerEvent> {
    if previous == next {
        return Vec::new();
    }
    let mut events = Vec::new();
    if previous.is_some() {
        events.push(PointerEvent::Leave);
    }
    match next {
        Some(PointerTarget::Year { year, .. }) => events.push(PointerEvent::EnterYear(*year)),
        Some(PointerTarget::Wedge { team }) => events.push(PointerEvent::EnterWedge(team.clone())),
        None => {}
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_then_leave_round_trips_to_idle() {
        let mut hover = HoverState::default();
        hover.apply(&PointerEvent::EnterYear(1998));
        assert_eq!(hover.hovered_year, Some(1998));
        assert!(hover.paused);
        hover.apply(&PointerEvent::Leave);
        assert_eq!(hover, HoverState::default());
    }

    #[test]
    fn wedge_hover_pauses_without_year() {
        let mut hover = HoverState::default();
        hover.apply(&PointerEvent::EnterWedge("CHI".to_string()));
        assert!(hover.paused);
        assert_eq!(hover.hovered_year, None);
    }

    #[test]
    fn moving_between_targets_leaves_then_enters() {
        let a = PointerTarget::Year {
            chart: ChartId::Radar,
            year: 1991,
        };
        let b = PointerTarget::Year {
            chart: ChartId::Line,
            year: 1992,
        };
        assert_eq!(
            transition(Some(&a), Some(&b)),
            vec![PointerEvent::Leave, PointerEvent::EnterYear(1992)]
        );
        assert!(transition(Some(&a), Some(&a)).is_empty());
        assert_eq!(transition(Some(&a), None), vec![PointerEvent::Leave]);
    }
}
