use crate::group_stats::{CardAverages, average_cards};
use crate::model::Club;
use crate::numfmt::{one_decimal, whole};
use crate::origin_stats::aggregate_by_origin;

const HOME_BIAS_RATIO: f64 = 1.3;
const AWAY_FRAGILITY_RATIO: f64 = 1.3;
const ORIGIN_MIN_SHARE: f64 = 15.0;
const DISCIPLINE_RATIO: f64 = 1.15;
const LATE_MINUTE: u16 = 75;
const LATE_SHARE: f64 = 0.35;

/// Inputs shared by every tactical rule. `home` plays at its own ground.
struct Matchup<'a> {
    home: &'a Club,
    away: &'a Club,
    home_group: CardAverages,
    away_group: CardAverages,
}

type InsightRule = fn(&Matchup<'_>) -> Option<String>;

const RULES: [InsightRule; 6] = [
    home_scoring_bias,
    away_defensive_fragility,
    strength_meets_weakness,
    home_discipline,
    away_discipline,
    late_concessions,
];

/// Tactical observations for `home` hosting `away`, in fixed rule order.
/// `all_clubs` supplies the group card baselines.
pub fn compare_insights(home: &Club, away: &Club, all_clubs: &[Club]) -> Vec<String> {
    let matchup = Matchup {
        home,
        away,
        home_group: average_cards(all_clubs, home.group),
        away_group: average_cards(all_clubs, away.group),
    };
    RULES.iter().filter_map(|rule| rule(&matchup)).collect()
}

fn home_scoring_bias(m: &Matchup<'_>) -> Option<String> {
    let home = m.home.goals_scored.home.len();
    let away = m.home.goals_scored.away.len();
    if (home as f64) <= away as f64 * HOME_BIAS_RATIO {
        return None;
    }
    let share = home as f64 / (home + away) as f64 * 100.0;
    Some(format!(
        "{} tem desempenho significativamente melhor em casa, marcando {}% dos seus gols como mandante.",
        m.home.name,
        whole(share)
    ))
}

fn away_defensive_fragility(m: &Matchup<'_>) -> Option<String> {
    let home = m.away.goals_conceded.home.len();
    let away = m.away.goals_conceded.away.len();
    if (away as f64) <= home as f64 * AWAY_FRAGILITY_RATIO {
        return None;
    }
    Some(format!(
        "{} sofre consideravelmente mais gols fora de casa ({} fora vs {} em casa), indicando fragilidade como visitante.",
        m.away.name, away, home
    ))
}

fn strength_meets_weakness(m: &Matchup<'_>) -> Option<String> {
    let strength = aggregate_by_origin(m.home.goals_scored.iter());
    let weakness = aggregate_by_origin(m.away.goals_conceded.iter());
    let (top_strength, top_weakness) = (strength.first()?, weakness.first()?);
    if top_strength.origin != top_weakness.origin
        || top_strength.percentage <= ORIGIN_MIN_SHARE
        || top_weakness.percentage <= ORIGIN_MIN_SHARE
    {
        return None;
    }
    Some(format!(
        "Oportunidade tática: {} marca {}% dos gols via {}, exatamente a principal vulnerabilidade de {} ({}% dos gols sofridos).",
        m.home.name,
        one_decimal(top_strength.percentage),
        top_strength.origin.label(),
        m.away.name,
        one_decimal(top_weakness.percentage)
    ))
}

fn home_discipline(m: &Matchup<'_>) -> Option<String> {
    let percent_above = percent_above_group(m.home, m.home_group)?;
    Some(format!(
        "{} possui {} cartões no total ({}% acima da média do Grupo {}), indicando tendência disciplinar mais agressiva.",
        m.home.name,
        m.home.total_cards(),
        percent_above,
        m.home.group
    ))
}

fn away_discipline(m: &Matchup<'_>) -> Option<String> {
    let percent_above = percent_above_group(m.away, m.away_group)?;
    Some(format!(
        "{} apresenta {} cartões ({}% acima da média do Grupo {}), sugerindo jogo mais físico.",
        m.away.name,
        m.away.total_cards(),
        percent_above,
        m.away.group
    ))
}

/// `None` unless the club sits clearly above a non-empty group baseline.
fn percent_above_group(club: &Club, group: CardAverages) -> Option<String> {
    let total = club.total_cards() as f64;
    if group.total <= 0.0 || total <= group.total * DISCIPLINE_RATIO {
        return None;
    }
    Some(whole((total - group.total) / group.total * 100.0))
}

fn late_concessions(m: &Matchup<'_>) -> Option<String> {
    let conceded = m.home.goals_conceded.total();
    if conceded == 0 {
        return None;
    }
    let late = m
        .home
        .goals_conceded
        .iter()
        .filter(|g| g.minute > LATE_MINUTE)
        .count();
    let share = late as f64 / conceded as f64;
    if share <= LATE_SHARE {
        return None;
    }
    Some(format!(
        "{} sofre {}% dos gols após os 75 minutos, indicando possível desgaste físico no final das partidas.",
        m.home.name,
        whole(share * 100.0)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Goal, GoalOrigin, Group, Venue};

    fn goals(specs: &[(u16, GoalOrigin)], venue: Venue) -> Vec<Goal> {
        specs
            .iter()
            .map(|(minute, origin)| Goal::new(*minute, *origin, venue))
            .collect()
    }

    fn matchup<'a>(home: &'a Club, away: &'a Club, all: &[Club]) -> Matchup<'a> {
        Matchup {
            home,
            away,
            home_group: average_cards(all, home.group),
            away_group: average_cards(all, away.group),
        }
    }

    #[test]
    fn home_bias_reports_home_share() {
        let mut a = Club::new("a", "Alfa", Group::One);
        a.goals_scored.home = goals(&[(10, GoalOrigin::Corner); 3], Venue::Home);
        a.goals_scored.away = goals(&[(10, GoalOrigin::Corner)], Venue::Away);
        let b = Club::new("b", "Beta", Group::One);
        let text = home_scoring_bias(&matchup(&a, &b, &[])).unwrap();
        assert!(text.contains("75%"), "{text}");
    }

    #[test]
    fn home_bias_needs_clear_margin() {
        let mut a = Club::new("a", "Alfa", Group::One);
        a.goals_scored.home = goals(&[(10, GoalOrigin::Corner); 4], Venue::Home);
        a.goals_scored.away = goals(&[(10, GoalOrigin::Corner); 4], Venue::Away);
        let b = Club::new("b", "Beta", Group::One);
        assert!(home_scoring_bias(&matchup(&a, &b, &[])).is_none());
    }

    #[test]
    fn away_fragility_cites_both_counts() {
        let a = Club::new("a", "Alfa", Group::One);
        let mut b = Club::new("b", "Beta", Group::Two);
        b.goals_conceded.away = goals(&[(50, GoalOrigin::Other); 5], Venue::Away);
        b.goals_conceded.home = goals(&[(50, GoalOrigin::Other); 2], Venue::Home);
        let text = away_defensive_fragility(&matchup(&a, &b, &[])).unwrap();
        assert!(text.contains("(5 fora vs 2 em casa)"), "{text}");
    }

    #[test]
    fn shared_top_origin_is_flagged() {
        let mut a = Club::new("a", "Alfa", Group::One);
        a.goals_scored.home = goals(
            &[(5, GoalOrigin::Corner), (6, GoalOrigin::Corner), (7, GoalOrigin::Penalty)],
            Venue::Home,
        );
        let mut b = Club::new("b", "Beta", Group::One);
        b.goals_conceded.away = goals(&[(5, GoalOrigin::Corner), (9, GoalOrigin::Other)], Venue::Away);
        let text = strength_meets_weakness(&matchup(&a, &b, &[])).unwrap();
        assert!(text.contains("66.7% dos gols via Escanteio"), "{text}");
        assert!(text.contains("(50.0% dos gols sofridos)"), "{text}");
    }

    #[test]
    fn different_top_origins_stay_silent() {
        let mut a = Club::new("a", "Alfa", Group::One);
        a.goals_scored.home = goals(&[(5, GoalOrigin::Corner)], Venue::Home);
        let mut b = Club::new("b", "Beta", Group::One);
        b.goals_conceded.away = goals(&[(5, GoalOrigin::Penalty)], Venue::Away);
        assert!(strength_meets_weakness(&matchup(&a, &b, &[])).is_none());
    }

    /// Twenty goals where `SetPiece` leads with `shared` entries; the rest
    /// are spread thin so no other origin outranks it.
    fn twenty_goals(shared: usize, venue: Venue) -> Vec<Goal> {
        let mut specs = vec![(10, GoalOrigin::SetPiece); shared];
        specs.extend([(20, GoalOrigin::Corner); 3]);
        for origin in [
            GoalOrigin::RightByline,
            GoalOrigin::LeftByline,
            GoalOrigin::EdgeOfBox,
            GoalOrigin::CounterAttack,
            GoalOrigin::Penalty,
            GoalOrigin::DefensiveError,
        ] {
            specs.extend([(30, origin); 2]);
        }
        specs.extend(vec![(40, GoalOrigin::Other); 20 - specs.len()]);
        goals(&specs, venue)
    }

    #[test]
    fn shared_origin_at_exactly_fifteen_percent_stays_silent() {
        let mut a = Club::new("a", "Alfa", Group::One);
        a.goals_scored.home = twenty_goals(3, Venue::Home);
        let mut b = Club::new("b", "Beta", Group::One);
        b.goals_conceded.away = twenty_goals(3, Venue::Away);
        assert!(strength_meets_weakness(&matchup(&a, &b, &[])).is_none());

        a.goals_scored.home = twenty_goals(4, Venue::Home);
        b.goals_conceded.away = twenty_goals(4, Venue::Away);
        let text = strength_meets_weakness(&matchup(&a, &b, &[])).unwrap();
        assert!(text.contains("20.0% dos gols via Bola Parada"), "{text}");
    }

    #[test]
    fn discipline_compares_against_own_group() {
        let mut a = Club::new("a", "Alfa", Group::One);
        a.yellow_cards.home = 8;
        a.red_cards.away = 2;
        let mut peer = Club::new("p", "Peer", Group::One);
        peer.yellow_cards.home = 2;
        let b = Club::new("b", "Beta", Group::Two);
        let all = vec![a.clone(), peer, b.clone()];

        // Group 1 average total = (10 + 2) / 2 = 6, Alfa has 10 => 67% above.
        let text = home_discipline(&matchup(&a, &b, &all)).unwrap();
        assert!(text.contains("10 cartões no total (67% acima da média do Grupo 1)"), "{text}");
        // Beta is alone in group 2 with zero cards.
        assert!(away_discipline(&matchup(&a, &b, &all)).is_none());
    }

    #[test]
    fn discipline_skips_empty_baseline() {
        let mut a = Club::new("a", "Alfa", Group::One);
        a.yellow_cards.home = 3;
        let b = Club::new("b", "Beta", Group::Two);
        assert!(home_discipline(&matchup(&a, &b, &[])).is_none());
    }

    #[test]
    fn late_concessions_need_goals_and_share() {
        let b = Club::new("b", "Beta", Group::One);
        let mut a = Club::new("a", "Alfa", Group::One);
        assert!(late_concessions(&matchup(&a, &b, &[])).is_none());

        a.goals_conceded.home = goals(&[(80, GoalOrigin::Other), (20, GoalOrigin::Other)], Venue::Home);
        a.goals_conceded.away = goals(&[(90, GoalOrigin::Other)], Venue::Away);
        let text = late_concessions(&matchup(&a, &b, &[])).unwrap();
        assert!(text.contains("sofre 67% dos gols após os 75 minutos"), "{text}");

        a.goals_conceded.away = goals(&[(75, GoalOrigin::Other), (30, GoalOrigin::Other)], Venue::Away);
        assert!(late_concessions(&matchup(&a, &b, &[])).is_none());
    }
}
