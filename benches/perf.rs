use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use mvp_terminal::charts::{ChartProps, line, pie, radar};
use mvp_terminal::dataset::{Dataset, parse_dataset};
use mvp_terminal::derived::{MetricRanges, eligible_players, player_records};
use mvp_terminal::filter::FilterState;
use mvp_terminal::hover::HoverState;

const HEADER: &str = "Year,Team,Player,Team_Rank,Pts Won,Pts Max,PTS,TRB,AST,STL,BLK,TOV,PER_rank,Pt/g_rank,Assist/g_rank,Reb/g_rank,TS%_rank,WinShare_rank,MVP_rank";
const TEAMS: [&str; 6] = ["BOS", "CHI", "LAL", "SAS", "UTA", "HOU"];

/// Forty seasons of fifteen candidates, with a few players changing teams.
fn synthetic_csv() -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for year in 1981..=2020 {
        for slot in 0..15 {
            let player = (year - 1981) / 6 * 15 + slot;
            let shift = (year as usize % 3) * (slot as usize % 2);
            let team = TEAMS[(player as usize + shift) % TEAMS.len()];
            let f = f64::from(slot + 1);
            out.push_str(&format!(
                "{year},{team},Player {player},{rank},{won},1200,{pts:.1},{trb:.1},{ast:.1},{stl:.1},{blk:.1},{tov:.1},{slot},{slot},{r2},{r3},{r4},{slot},{mvp}\n",
                rank = slot % 8 + 1,
                won = 1000 - slot * 60,
                pts = 32.0 - f,
                trb = 4.0 + f * 0.5,
                ast = 2.0 + f * 0.3,
                stl = 0.5 + f * 0.1,
                blk = 0.2 + f * 0.15,
                tov = 1.5 + f * 0.1,
                r2 = slot * 2 + 1,
                r3 = 30 - slot,
                r4 = slot + 5,
                mvp = slot + 1,
            ));
        }
    }
    out
}

fn sample_dataset() -> Dataset {
    parse_dataset(synthetic_csv().as_bytes()).expect("synthetic csv parses")
}

fn bench_parse(c: &mut Criterion) {
    let raw = synthetic_csv();
    c.bench_function("parse_dataset", |b| {
        b.iter(|| {
            let dataset = parse_dataset(black_box(raw.as_bytes())).unwrap();
            black_box(dataset.records.len());
        })
    });
}

fn bench_eligible(c: &mut Criterion) {
    let dataset = sample_dataset();
    let mut filter = FilterState::for_dataset(&dataset);
    filter.only_single_team = true;
    c.bench_function("eligible_players_single_team", |b| {
        b.iter(|| {
            let players = eligible_players(black_box(&dataset), black_box(&filter));
            black_box(players.len());
        })
    });
}

fn bench_scenes(c: &mut Criterion) {
    let dataset = sample_dataset();
    let ranges = MetricRanges::compute(&dataset);
    let filter = FilterState::for_dataset(&dataset);
    let records = player_records(&dataset, "Player 3", &filter);
    let hover = HoverState {
        hovered_year: records.first().map(|r| r.year),
        ..HoverState::default()
    };
    let props = ChartProps {
        records: &records,
        ranges: &ranges,
        hover: &hover,
    };

    c.bench_function("metric_ranges", |b| {
        b.iter(|| black_box(MetricRanges::compute(black_box(&dataset))))
    });
    c.bench_function("chart_scenes", |b| {
        b.iter(|| {
            let radar = radar::scene(black_box(&props), 1.0);
            let line = line::scene(black_box(&props));
            let pie = pie::scene(black_box(&props));
            black_box((radar.polygons.len(), line.is_some(), pie.is_some()));
        })
    });
}

criterion_group!(benches, bench_parse, bench_eligible, bench_scenes);
criterion_main!(benches);
