use std::fs;
use std::path::PathBuf;

use comparador::export::{CSV_HEADER, clubs_to_csv, clubs_to_json, parse_clubs_json};
use comparador::model::{Club, Goal, GoalOrigin, Group, Venue};
use comparador::betting::betting_insights;
use comparador::insights::compare_insights;
use comparador::persist::{
    back_up_snapshot, load_clubs, read_snapshot, reset_all_data, save_clubs,
};
use comparador::roster::initial_clubs;

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("comparador-{}-{name}", std::process::id()));
    path.push("clubs.json");
    path
}

fn sample_club() -> Club {
    let mut club = Club::new("club-7", "Real, Murcia", Group::Two);
    club.goals_scored
        .home
        .push(Goal::new(33, GoalOrigin::LeftByline, Venue::Home));
    club.goals_conceded
        .away
        .push(Goal::new(91, GoalOrigin::DefensiveError, Venue::Away));
    club.yellow_cards.away = 4;
    club.red_cards.home = 1;
    club
}

#[test]
fn snapshot_round_trips() {
    let path = scratch_path("roundtrip");
    let clubs = vec![sample_club(), Club::new("club-8", "Teruel", Group::Two)];
    save_clubs(&path, &clubs).expect("save should succeed");
    let loaded = read_snapshot(&path)
        .expect("read should succeed")
        .expect("snapshot should exist");
    assert_eq!(loaded, clubs);

    let fresh = reset_all_data(Some(path.as_path())).expect("reset should succeed");
    assert_eq!(fresh, initial_clubs());
    assert!(read_snapshot(&path).expect("read after reset").is_none());

    if let Some(dir) = path.parent() {
        let _ = fs::remove_dir_all(dir);
    }
}

#[test]
fn corrupt_snapshot_is_an_error() {
    let path = scratch_path("corrupt");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{not json").unwrap();
    assert!(read_snapshot(&path).is_err());
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn csv_has_fixed_header_and_count_rows() {
    let csv = clubs_to_csv(&[sample_club()]);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER.join(",").as_str()));
    assert_eq!(lines.next(), Some("\"Real, Murcia\",2,1,0,0,1,0,4,1,0"));
    assert_eq!(lines.next(), None);
}

#[test]
fn json_export_imports_back() {
    let clubs = vec![sample_club()];
    let json = clubs_to_json(&clubs).unwrap();
    assert_eq!(parse_clubs_json(&json).unwrap(), clubs);
}

#[test]
fn import_rejects_third_group() {
    let raw = r#"[{"id":"x","name":"X","group":0,
        "goalsScored":{"home":[],"away":[]},"goalsConceded":{"home":[],"away":[]},
        "yellowCards":{"home":0,"away":0},"redCards":{"home":0,"away":0}}]"#;
    assert!(parse_clubs_json(raw).is_err());
}

#[test]
fn load_uses_roster_only_when_snapshot_is_missing() {
    let path = scratch_path("load");
    assert_eq!(load_clubs(Some(path.as_path())).unwrap(), initial_clubs());
    assert_eq!(load_clubs(None).unwrap(), initial_clubs());

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[{").unwrap();
    assert!(load_clubs(Some(path.as_path())).is_err());

    let backup = back_up_snapshot(&path).unwrap();
    assert!(!path.exists());
    assert_eq!(fs::read_to_string(&backup).unwrap(), "[{");
    assert!(backup.to_string_lossy().ends_with("clubs.json.bak"));
    assert_eq!(load_clubs(Some(path.as_path())).unwrap(), initial_clubs());

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn huge_imported_card_tallies_do_not_break_generators() {
    let raw = r#"[
        {"id":"a","name":"Alfa","group":1,
         "goalsScored":{"home":[],"away":[]},"goalsConceded":{"home":[],"away":[]},
         "yellowCards":{"home":4294967295,"away":1},"redCards":{"home":3000000000,"away":4294967295}},
        {"id":"b","name":"Beta","group":1,
         "goalsScored":{"home":[],"away":[]},"goalsConceded":{"home":[],"away":[]},
         "yellowCards":{"home":4294967295,"away":4294967295},"redCards":{"home":0,"away":0}}
    ]"#;
    let clubs = parse_clubs_json(raw).unwrap();
    let (a, b) = (&clubs[0], &clubs[1]);

    let insights = compare_insights(a, b, &clubs);
    assert!(insights.iter().all(|line| !line.is_empty()));

    let bets = betting_insights(a, b);
    assert!((3..=6).contains(&bets.len()));
    let cards = bets
        .iter()
        .find(|bet| bet.market == "Cartões")
        .expect("cards market present");
    // 4294967296 + 2 * 7294967295 for Alfa.
    assert!(
        cards.analysis.contains("Alfa: 18884901886 cartões totais"),
        "{}",
        cards.analysis
    );
}
