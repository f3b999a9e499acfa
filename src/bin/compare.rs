use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use comparador::comparison::{build_comparison, render_text};
use comparador::config::AppConfig;
use comparador::model::Club;
use comparador::{export, persist};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = AppConfig::from_env();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let names = positional_args(&args);
    let [home_key, away_key] = names.as_slice() else {
        return Err(anyhow!(
            "usage: compare <home club> <away club> [--data FILE] [--json]"
        ));
    };

    let data_path = parse_data_arg(&args).or(config.data_file);
    let clubs = persist::load_clubs(data_path.as_deref())?;

    let home = find_club(&clubs, home_key).with_context(|| format!("club not found: {home_key}"))?;
    let away = find_club(&clubs, away_key).with_context(|| format!("club not found: {away_key}"))?;
    if home.id == away.id {
        return Err(anyhow!("pick two different clubs"));
    }

    let cmp = build_comparison(home, away, &clubs);
    if args.iter().any(|a| a == "--json") {
        println!(
            "{}",
            serde_json::to_string_pretty(&cmp).context("serialize comparison")?
        );
    } else {
        print!("{}", render_text(&cmp));
    }

    if let Some(dir) = parse_csv_arg(&args) {
        let path = export::export(&dir, &clubs, export::ExportFormat::Csv)?;
        eprintln!("[INFO] CSV written to {}", path.display());
    }
    Ok(())
}

/// Matches on id first, then on a case-insensitive name.
fn find_club<'a>(clubs: &'a [Club], key: &str) -> Option<&'a Club> {
    let key = key.trim();
    clubs
        .iter()
        .find(|c| c.id == key)
        .or_else(|| clubs.iter().find(|c| c.name.to_lowercase() == key.to_lowercase()))
}

fn positional_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--data" || arg == "--csv" {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.clone());
    }
    out
}

fn parse_data_arg(args: &[String]) -> Option<PathBuf> {
    parse_path_flag(args, "--data")
}

fn parse_csv_arg(args: &[String]) -> Option<PathBuf> {
    parse_path_flag(args, "--csv")
}

fn parse_path_flag(args: &[String], flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
