use serde::Serialize;

use crate::betting::betting_insights;
use crate::insights::compare_insights;
use crate::model::{BettingInsight, Club, GoalOriginStats};
use crate::origin_stats::aggregate_by_origin;

/// Origin breakdown of one club's combined home and away goals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginProfile {
    pub scored: Vec<GoalOriginStats>,
    pub conceded: Vec<GoalOriginStats>,
}

impl OriginProfile {
    pub fn of(club: &Club) -> Self {
        Self {
            scored: aggregate_by_origin(club.goals_scored.iter()),
            conceded: aggregate_by_origin(club.goals_conceded.iter()),
        }
    }
}

/// Everything the comparison view renders for `club1` (home) against
/// `club2` (away).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub club1: Club,
    pub club2: Club,
    pub club1_origins: OriginProfile,
    pub club2_origins: OriginProfile,
    pub insights: Vec<String>,
    pub betting_insights: Vec<BettingInsight>,
}

pub fn build_comparison(home: &Club, away: &Club, all_clubs: &[Club]) -> Comparison {
    Comparison {
        club1: home.clone(),
        club2: away.clone(),
        club1_origins: OriginProfile::of(home),
        club2_origins: OriginProfile::of(away),
        insights: compare_insights(home, away, all_clubs),
        betting_insights: betting_insights(home, away),
    }
}

/// Plain-text rendering used by the CLI.
pub fn render_text(cmp: &Comparison) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} (casa, Grupo {}) vs {} (fora, Grupo {})\n\n",
        cmp.club1.name, cmp.club1.group, cmp.club2.name, cmp.club2.group
    ));

    for (club, origins) in [
        (&cmp.club1, &cmp.club1_origins),
        (&cmp.club2, &cmp.club2_origins),
    ] {
        out.push_str(&format!(
            "{}: marcados {} ({} casa / {} fora), sofridos {} ({} casa / {} fora), amarelos {}, vermelhos {}\n",
            club.name,
            club.goals_scored.total(),
            club.goals_scored.home.len(),
            club.goals_scored.away.len(),
            club.goals_conceded.total(),
            club.goals_conceded.home.len(),
            club.goals_conceded.away.len(),
            club.yellow_cards.total(),
            club.red_cards.total()
        ));
        out.push_str(&format!("  origem dos gols marcados: {}\n", origin_line(&origins.scored)));
        out.push_str(&format!("  origem dos gols sofridos: {}\n", origin_line(&origins.conceded)));
    }

    out.push_str("\nInsights táticos:\n");
    if cmp.insights.is_empty() {
        out.push_str("  (nenhum padrão relevante)\n");
    }
    for line in &cmp.insights {
        out.push_str(&format!("  - {line}\n"));
    }

    out.push_str("\nMercados:\n");
    for bet in &cmp.betting_insights {
        match &bet.probability {
            Some(p) => out.push_str(&format!("  [{}] {} ({})\n", bet.market, bet.analysis, p)),
            None => out.push_str(&format!("  [{}] {}\n", bet.market, bet.analysis)),
        }
    }
    out
}

pub fn origin_line(stats: &[GoalOriginStats]) -> String {
    if stats.is_empty() {
        return "-".to_string();
    }
    stats
        .iter()
        .map(|s| format!("{} {} ({:.0}%)", s.origin.label(), s.count, s.percentage.round()))
        .collect::<Vec<_>>()
        .join(", ")
}
