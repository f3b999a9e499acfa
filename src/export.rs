use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::model::{CardColor, Club, Goal, GoalKind};

const FILE_PREFIX: &str = "primera-federacion";

pub const CSV_HEADER: [&str; 10] = [
    "Clube",
    "Grupo",
    "Gols Marcados Casa",
    "Gols Marcados Fora",
    "Gols Sofridos Casa",
    "Gols Sofridos Fora",
    "Amarelos Casa",
    "Amarelos Fora",
    "Vermelhos Casa",
    "Vermelhos Fora",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{FILE_PREFIX}-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Write `clubs` into `dir` under today's dated file name.
pub fn export(dir: &Path, clubs: &[Club], format: ExportFormat) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(export_file_name(format, Local::now().date_naive()));
    match format {
        ExportFormat::Json => fs::write(&path, clubs_to_json(clubs)?)
            .with_context(|| format!("write {}", path.display()))?,
        ExportFormat::Csv => fs::write(&path, clubs_to_csv(clubs))
            .with_context(|| format!("write {}", path.display()))?,
        ExportFormat::Xlsx => write_xlsx(&path, clubs)?,
    }
    Ok(path)
}

pub fn clubs_to_json(clubs: &[Club]) -> Result<String> {
    serde_json::to_string_pretty(clubs).context("serialize clubs")
}

pub fn clubs_to_csv(clubs: &[Club]) -> String {
    let header = CSV_HEADER.map(str::to_string);
    let mut out = csv_line(&header);
    for club in clubs {
        out.push('\n');
        out.push_str(&csv_line(&summary_row(club)));
    }
    out
}

/// Shape is trusted beyond what serde enforces (origin tags, group 1|2).
pub fn parse_clubs_json(raw: &str) -> Result<Vec<Club>> {
    serde_json::from_str::<Vec<Club>>(raw).context("parse clubs json")
}

pub fn import_json(path: &Path) -> Result<Vec<Club>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_clubs_json(&raw).with_context(|| format!("import {}", path.display()))
}

pub fn write_xlsx(path: &Path, clubs: &[Club]) -> Result<()> {
    let mut summary_rows = vec![CSV_HEADER.map(str::to_string).to_vec()];
    summary_rows.extend(clubs.iter().map(summary_row));

    let mut goal_rows = vec![vec![
        "Clube".to_string(),
        "Tipo".to_string(),
        "Local".to_string(),
        "Minuto".to_string(),
        "Origem".to_string(),
    ]];
    for club in clubs {
        for kind in [GoalKind::Scored, GoalKind::Conceded] {
            goal_rows.extend(club.goals(kind).iter().map(|g| goal_row(club, kind, g)));
        }
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Clubes")?;
        write_rows(sheet, &summary_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Gols")?;
        write_rows(sheet, &goal_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

/// Column order matches [`CSV_HEADER`].
fn summary_row(club: &Club) -> Vec<String> {
    let mut row = vec![club.name.clone(), club.group.to_string()];
    for kind in [GoalKind::Scored, GoalKind::Conceded] {
        let goals = club.goals(kind);
        row.push(goals.home.len().to_string());
        row.push(goals.away.len().to_string());
    }
    for color in [CardColor::Yellow, CardColor::Red] {
        let cards = club.cards(color);
        row.push(cards.home.to_string());
        row.push(cards.away.to_string());
    }
    row
}

fn goal_row(club: &Club, kind: GoalKind, goal: &Goal) -> Vec<String> {
    vec![
        club.name.clone(),
        kind.label().to_string(),
        goal.venue().label().to_string(),
        goal.minute.to_string(),
        goal.origin.label().to_string(),
    ]
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn csv_line(row: &[String]) -> String {
    row.iter()
        .map(|cell| {
            if needs_quotes(cell) {
                format!("\"{}\"", cell.replace('"', "\"\""))
            } else {
                cell.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_dated() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        assert_eq!(
            export_file_name(ExportFormat::Csv, date),
            "primera-federacion-2025-09-07.csv"
        );
    }

    #[test]
    fn csv_quotes_names_with_commas() {
        assert_eq!(
            csv_line(&["Club, B".to_string(), "say \"hi\"".to_string()]),
            "\"Club, B\",\"say \"\"hi\"\"\""
        );
    }

    #[test]
    fn summary_row_follows_header_order() {
        let mut club = Club::new("c", "Cultural", crate::model::Group::One);
        club.yellow_cards.home = 1;
        club.yellow_cards.away = 2;
        club.red_cards.home = 3;
        club.red_cards.away = 4;
        let row = summary_row(&club);
        assert_eq!(row.len(), CSV_HEADER.len());
        assert_eq!(row[6..], ["1", "2", "3", "4"]);
    }
}
