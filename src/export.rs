use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dataset::{Metric, RankField, Record};
use crate::derived::MetricRanges;

pub struct ExportReport {
    pub path: PathBuf,
    pub seasons: usize,
}

enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

fn number(value: f64) -> Cell {
    if value.is_finite() {
        Cell::Number(value)
    } else {
        Cell::Empty
    }
}

pub fn export_file_name(player: &str) -> String {
    let slug: String = player
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!(
        "mvp_{}_{}.xlsx",
        slug.trim_matches('_'),
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

pub fn export_player(
    dir: &Path,
    player: &str,
    records: &[&Record],
    ranges: &MetricRanges,
) -> Result<ExportReport> {
    let mut header = vec![
        Cell::Text("Year".to_string()),
        Cell::Text("Team".to_string()),
        Cell::Text("Team_Rank".to_string()),
    ];
    header.extend(Metric::ALL.iter().map(|m| Cell::Text(m.label().to_string())));
    header.extend(RankField::ALL.iter().map(|f| Cell::Text(f.label().to_string())));

    let mut seasons_rows = vec![header];
    for record in records {
        let mut row = vec![
            Cell::Number(f64::from(record.year)),
            Cell::Text(record.team.clone()),
            Cell::Text(record.team_rank.clone()),
        ];
        row.extend(Metric::ALL.iter().map(|m| number(record.metric(*m))));
        row.extend(RankField::ALL.iter().map(|f| number(record.rank(*f))));
        seasons_rows.push(row);
    }

    let mut normalized_header = vec![Cell::Text("Year".to_string())];
    normalized_header.extend(Metric::ALL.iter().map(|m| Cell::Text(m.label().to_string())));
    let mut normalized_rows = vec![normalized_header];
    for record in records {
        let mut row = vec![Cell::Number(f64::from(record.year))];
        row.extend(Metric::ALL.iter().map(|m| {
            ranges
                .normalize(*m, record.metric(*m))
                .map(Cell::Number)
                .unwrap_or(Cell::Empty)
        }));
        normalized_rows.push(row);
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed creating export dir {}", dir.display()))?;
    let path = dir.join(export_file_name(player));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Seasons")?;
        write_rows(sheet, &seasons_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Normalized")?;
        write_rows(sheet, &normalized_rows)?;
    }
    workbook
        .save(&path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        path,
        seasons: records.len(),
    })
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match cell {
                Cell::Text(value) => {
                    worksheet
                        .write_string(r, c, value)
                        .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
                }
                Cell::Number(value) => {
                    worksheet
                        .write_number(r, c, *value)
                        .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}
