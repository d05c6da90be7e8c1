use crate::dataset::Record;
use crate::derived::latest_record;
use crate::transitions::PlayerLabel;

pub fn label_for(player: &str, records: &[&Record]) -> PlayerLabel {
    let latest = latest_record(records);
    PlayerLabel {
        name: player.to_string(),
        team: latest.map(|r| r.team.clone()).unwrap_or_default(),
        rank: latest.map(|r| r.team_rank.clone()).unwrap_or_default(),
    }
}

pub fn caption_lines(label: &PlayerLabel) -> Vec<String> {
    let mut lines = vec![label.name.clone()];
    if !label.team.is_empty() {
        lines.push(format!("{} (Rank: {})", label.team, label.rank));
    }
    lines
}
